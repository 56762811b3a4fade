//! CLI output formatting for the `seed` and `status` commands.
//!
//! # Output Format
//!
//! ## Seed
//!
//! ```text
//! Seed
//!     SiteContent    seeded 1
//!     ServiceItem    skipped (6 existing)
//!     PortfolioItem  seeded 5
//!
//! Seeded 6 documents
//! ```
//!
//! ## Status
//!
//! ```text
//! Store: file (available)
//!     SiteContent     2
//!     ContactMessage  14
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure.

use crate::schema::EntityKind;
use crate::seed::SeedReport;
use crate::service::StoreStatus;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Widest kind name, so the second column lines up.
fn name_width<'a>(kinds: impl Iterator<Item = &'a EntityKind>) -> usize {
    kinds.map(|k| k.name().len()).max().unwrap_or(0)
}

/// Format one `name  detail` row at depth 1.
fn kind_line(kind: EntityKind, width: usize, detail: &str) -> String {
    format!("{}{:<width$}  {}", indent(1), kind.name(), detail)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Seed
// ============================================================================

pub fn format_seed_report(report: &SeedReport) -> Vec<String> {
    let mut lines = vec!["Seed".to_string()];
    let width = name_width(report.entries.iter().map(|(k, _)| k));
    for (kind, outcome) in &report.entries {
        lines.push(kind_line(*kind, width, &outcome.to_string()));
    }
    lines.push(String::new());
    lines.push(format!(
        "Seeded {}",
        plural(report.total_seeded(), "document")
    ));
    lines
}

pub fn print_seed_report(report: &SeedReport) {
    for line in format_seed_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Status
// ============================================================================

pub fn format_status(status: &StoreStatus) -> Vec<String> {
    if !status.available {
        return vec!["Store: not configured (serving defaults)".to_string()];
    }

    let mut lines = vec![format!("Store: {} (available)", status.backend)];
    let width = name_width(status.counts.iter().map(|(k, _)| k));
    for (kind, count) in &status.counts {
        let detail = match count {
            Some(n) => n.to_string(),
            None => "unreadable".to_string(),
        };
        lines.push(kind_line(*kind, width, &detail));
    }
    lines
}

pub fn print_status(status: &StoreStatus) {
    for line in format_status(status) {
        println!("{}", line);
    }
}
