//! Startup seeding of the public collections.
//!
//! On each start, every public collection that is empty gets a fixed set of
//! placeholder documents so a fresh deployment renders a complete site. A
//! collection with any documents at all is left alone: idempotency comes from
//! the emptiness check, not from a seeding marker, so real content is never
//! duplicated or overwritten.
//!
//! Seeding is best-effort. An unavailable store, a failed count, or a failed
//! insert abandons that collection only; the failure is logged and recorded
//! in the [`SeedReport`], never propagated.

use crate::repository::Repository;
use crate::schema::{
    Entity, EntityKind, MediaType, PhotoItem, PortfolioItem, ServiceItem, SiteContent, VideoItem,
};
use crate::store::Store;
use std::fmt;

/// What happened to one collection during a seeding pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was empty and this many documents were inserted.
    Seeded(usize),
    /// The collection already held this many documents.
    AlreadyPopulated(u64),
    /// No store is configured.
    Unavailable,
    /// Count or insert failed; `inserted` documents made it in first.
    Failed { inserted: usize, error: String },
}

impl fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedOutcome::Seeded(n) => write!(f, "seeded {n}"),
            SeedOutcome::AlreadyPopulated(n) => write!(f, "skipped ({n} existing)"),
            SeedOutcome::Unavailable => write!(f, "skipped (no store)"),
            SeedOutcome::Failed { inserted, error } => {
                write!(f, "failed after {inserted} inserts: {error}")
            }
        }
    }
}

/// Per-collection results of one seeding pass, in seeding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub entries: Vec<(EntityKind, SeedOutcome)>,
}

impl SeedReport {
    pub fn outcome(&self, kind: EntityKind) -> Option<&SeedOutcome> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }

    pub fn total_seeded(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, outcome)| match outcome {
                SeedOutcome::Seeded(n) => *n,
                SeedOutcome::Failed { inserted, .. } => *inserted,
                _ => 0,
            })
            .sum()
    }
}

/// Run one seeding pass over every public collection, in [`EntityKind::ALL`]
/// order.
pub async fn seed_all(store: &Store) -> SeedReport {
    let mut entries = Vec::new();
    for kind in EntityKind::ALL.into_iter().filter(|k| k.is_public()) {
        let outcome = match kind {
            EntityKind::SiteContent => seed_collection(store, vec![SiteContent::default()]).await,
            EntityKind::ServiceItem => seed_collection(store, default_services()).await,
            EntityKind::PortfolioItem => seed_collection(store, default_portfolio()).await,
            EntityKind::VideoItem => seed_collection(store, default_videos()).await,
            EntityKind::PhotoItem => seed_collection(store, default_photos()).await,
            EntityKind::ContactMessage => continue,
        };
        entries.push((kind, outcome));
    }
    let report = SeedReport { entries };
    tracing::info!(inserted = report.total_seeded(), "seeding pass finished");
    report
}

/// Insert `items` into `T`'s collection iff it is currently empty.
pub async fn seed_collection<T: Entity>(store: &Store, items: Vec<T>) -> SeedOutcome {
    let collection = T::KIND.collection();
    if !store.is_available() {
        tracing::debug!(collection, "store unavailable, not seeding");
        return SeedOutcome::Unavailable;
    }

    let repo = Repository::<T>::new(store.clone());
    match repo.count().await {
        Ok(0) => {}
        Ok(existing) => return SeedOutcome::AlreadyPopulated(existing),
        Err(e) => {
            tracing::warn!(collection, error = %e, "seeding skipped: count failed");
            return SeedOutcome::Failed {
                inserted: 0,
                error: e.to_string(),
            };
        }
    }

    let mut inserted = 0;
    for item in &items {
        if let Err(e) = repo.insert(item).await {
            tracing::warn!(collection, inserted, error = %e, "seeding aborted: insert failed");
            return SeedOutcome::Failed {
                inserted,
                error: e.to_string(),
            };
        }
        inserted += 1;
    }
    tracing::info!(collection, inserted, "collection seeded");
    SeedOutcome::Seeded(inserted)
}

// =============================================================================
// Seed sets
// =============================================================================

pub fn default_services() -> Vec<ServiceItem> {
    [
        ("Filmări aeriene 4K/8K", "Cadre fluide, cinematice, la calitate maximă.", "Video"),
        ("Fotografie aeriană profesională", "Compoziții curate, perspective unice.", "Camera"),
        ("Inspecții industriale", "Evaluări rapide și sigure pentru zone greu accesibile.", "Shield"),
        ("Filmări corporate & reclame", "Spoturi dinamice pentru campanii memorabile.", "Briefcase"),
        ("Cartografiere / mapping", "Hărți precise și modele 3D.", "Map"),
        ("Evenimente & nunți", "Momente unice surprinse din aer.", "Heart"),
    ]
    .into_iter()
    .map(|(title, description, icon)| ServiceItem {
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

pub fn default_portfolio() -> Vec<PortfolioItem> {
    [
        (MediaType::Image, "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee?q=80&w=1600&auto=format&fit=crop", "Landscape", "Mountain Range"),
        (MediaType::Image, "https://images.unsplash.com/photo-1491553895911-0055eca6402d?q=80&w=1600&auto=format&fit=crop", "Real Estate", "Modern Villa"),
        (MediaType::Video, "https://videos.pexels.com/video-files/855331/855331-hd_1920_1080_25fps.mp4", "Events", "Outdoor Festival"),
        (MediaType::Image, "https://images.unsplash.com/photo-1519681393784-d120267933ba?q=80&w=1600&auto=format&fit=crop", "Cinematic Shots", "City Nights"),
        (MediaType::Image, "https://images.unsplash.com/photo-1500534314209-a25ddb2bd429?q=80&w=1600&auto=format&fit=crop", "Corporate", "Business District"),
    ]
    .into_iter()
    .map(|(media_type, url, category, title)| PortfolioItem {
        media_type,
        url: url.to_string(),
        thumbnail: None,
        category: category.to_string(),
        title: Some(title.to_string()),
        description: None,
    })
    .collect()
}

pub fn default_videos() -> Vec<VideoItem> {
    [
        ("Showreel 2024", "https://videos.pexels.com/video-files/855331/855331-hd_1920_1080_25fps.mp4"),
        ("Real Estate Highlights", "https://videos.pexels.com/video-files/857195/857195-hd_1920_1080_30fps.mp4"),
    ]
    .into_iter()
    .map(|(title, url)| VideoItem {
        title: title.to_string(),
        url: url.to_string(),
        thumbnail: None,
    })
    .collect()
}

pub fn default_photos() -> Vec<PhotoItem> {
    [
        ("Cliffs", "https://images.unsplash.com/photo-1501785888041-af3ef285b470?q=80&w=1600&auto=format&fit=crop"),
        ("City", "https://images.unsplash.com/photo-1494526585095-c41746248156?q=80&w=1600&auto=format&fit=crop"),
        ("Forest", "https://images.unsplash.com/photo-1501785888041-af3ef285b470?q=80&w=1600&auto=format&fit=crop"),
    ]
    .into_iter()
    .map(|(title, url)| PhotoItem {
        title: Some(title.to_string()),
        url: url.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Filter;
    use crate::test_helpers::*;

    #[tokio::test]
    async fn seeds_every_public_collection_once() {
        let store = memory_store();
        let report = seed_all(&store).await;

        assert_eq!(report.outcome(EntityKind::SiteContent), Some(&SeedOutcome::Seeded(1)));
        assert_eq!(report.outcome(EntityKind::ServiceItem), Some(&SeedOutcome::Seeded(6)));
        assert_eq!(report.outcome(EntityKind::PortfolioItem), Some(&SeedOutcome::Seeded(5)));
        assert_eq!(report.outcome(EntityKind::VideoItem), Some(&SeedOutcome::Seeded(2)));
        assert_eq!(report.outcome(EntityKind::PhotoItem), Some(&SeedOutcome::Seeded(3)));
        assert_eq!(report.outcome(EntityKind::ContactMessage), None);
        assert_eq!(report.total_seeded(), 17);
        assert_eq!(store.count("contactmessage").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn report_covers_public_kinds_in_order() {
        let report = seed_all(&memory_store()).await;
        let kinds: Vec<EntityKind> = report.entries.iter().map(|(k, _)| *k).collect();
        let public: Vec<EntityKind> = EntityKind::ALL
            .into_iter()
            .filter(|k| k.is_public())
            .collect();
        assert_eq!(kinds, public);
    }

    #[tokio::test]
    async fn second_pass_changes_nothing() {
        let store = memory_store();
        seed_all(&store).await;
        let before = store.list("serviceitem", &Filter::all()).await.unwrap();

        let report = seed_all(&store).await;
        assert_eq!(report.total_seeded(), 0);
        assert_eq!(
            report.outcome(EntityKind::ServiceItem),
            Some(&SeedOutcome::AlreadyPopulated(6))
        );
        assert_eq!(store.list("serviceitem", &Filter::all()).await.unwrap(), before);
    }

    #[tokio::test]
    async fn populated_collection_is_left_alone() {
        let store = memory_store();
        let repo = Repository::<VideoItem>::new(store.clone());
        repo.insert(&VideoItem {
            title: "Real upload".into(),
            url: "https://example.com/v.mp4".into(),
            thumbnail: None,
        })
        .await
        .unwrap();

        let report = seed_all(&store).await;
        assert_eq!(
            report.outcome(EntityKind::VideoItem),
            Some(&SeedOutcome::AlreadyPopulated(1))
        );
        assert_eq!(store.count("videoitem").await.unwrap(), 1);
        assert_eq!(store.count("photoitem").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn unavailable_store_is_skipped_silently() {
        let report = seed_all(&Store::unavailable()).await;
        assert_eq!(report.entries.len(), 5);
        assert!(report
            .entries
            .iter()
            .all(|(_, outcome)| *outcome == SeedOutcome::Unavailable));
    }

    #[tokio::test]
    async fn seeds_preserve_listed_order() {
        let store = memory_store();
        seed_all(&store).await;
        let services = Repository::<ServiceItem>::new(store)
            .list(&Filter::all())
            .await
            .unwrap();
        let icons: Vec<_> = services.iter().map(|r| r.item.icon.as_str()).collect();
        assert_eq!(icons, ["Video", "Camera", "Shield", "Briefcase", "Map", "Heart"]);
    }

    #[tokio::test]
    async fn broken_collection_does_not_block_others() {
        let (tmp, store) = file_store().await;
        std::fs::write(tmp.path().join("serviceitem.json"), "garbage").unwrap();

        let report = seed_all(&store).await;
        assert!(matches!(
            report.outcome(EntityKind::ServiceItem),
            Some(SeedOutcome::Failed { inserted: 0, .. })
        ));
        assert_eq!(report.outcome(EntityKind::PhotoItem), Some(&SeedOutcome::Seeded(3)));
    }

    #[test]
    fn outcome_display() {
        assert_eq!(SeedOutcome::Seeded(3).to_string(), "seeded 3");
        assert_eq!(
            SeedOutcome::AlreadyPopulated(2).to_string(),
            "skipped (2 existing)"
        );
    }
}
