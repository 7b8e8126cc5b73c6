//! CLI output formatting for all commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (locale, route, gallery) is its identity, with file paths
//! shown as secondary context after `→` or on indented lines.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Locales
//! 001 Français (fr) → /
//!     index.html
//!     info/index.html
//!     ...
//! 002 English (en) → /en/
//!     ...
//!
//! Gallery
//!     6 images from manifest
//!
//! Assets
//!     7 files
//!
//! Generated 60 pages in 4 locales at dist
//! ```
//!
//! ## Routes
//!
//! ```text
//! 001 / → index.html
//!     Accueil · Home · Startseite · Inicio
//! 002 /address → address/index.html
//!     ...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::gallery::ImageOrigin;
use crate::generate::{BuildSummary, CheckReport};
use crate::locale::{Locale, catalog};
use crate::routes::{ROUTES, Route};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `Français (fr)`
fn locale_label(locale: Locale) -> String {
    format!("{} ({})", locale.native_name(), locale.code())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec!["Locales".to_string()];
    for (i, pages) in summary.locales.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            locale_label(pages.locale),
            Route::Home.href(pages.locale)
        ));
        for file in &pages.files {
            lines.push(format!("{}{}", indent(1), file));
        }
    }

    lines.push(String::new());
    lines.push("Gallery".to_string());
    let origin = match summary.origin {
        ImageOrigin::Manifest => "from manifest",
        ImageOrigin::Fallback => "(fallback, manifest unavailable)",
    };
    lines.push(format!(
        "{}{} {}",
        indent(1),
        plural(summary.images, "image", "images"),
        origin
    ));

    lines.push(String::new());
    lines.push("Assets".to_string());
    lines.push(format!("{}{}", indent(1), plural(summary.assets, "file", "files")));

    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {} at {}",
        plural(summary.page_count(), "page", "pages"),
        plural(summary.locales.len(), "locale", "locales"),
        summary.output.display()
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let config = &report.config;
    let mut lines = vec![
        "Config".to_string(),
        format!("{}Contact: {}", indent(1), config.contact_email),
        format!("{}Manifest: {}", indent(1), config.gallery.manifest),
        format!("{}Assets: {}/", indent(1), config.gallery.assets_dir),
        String::new(),
        "Gallery".to_string(),
    ];
    match &report.manifest {
        Ok(count) => {
            lines.push(format!("{}{}", indent(1), plural(*count, "image", "images")));
            if *count == 0 {
                lines.push(format!("{}Gallery section will be omitted", indent(1)));
            }
        }
        Err(err) => {
            lines.push(format!("{}Unavailable: {}", indent(1), err));
            lines.push(format!(
                "{}Source: {}",
                indent(1),
                report.manifest_path.display()
            ));
            lines.push(format!("{}Build will use 4 fallback images", indent(1)));
        }
    }
    lines.push(String::new());
    lines.push("Config OK".to_string());
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Route table with each page's label in every locale.
pub fn format_routes() -> Vec<String> {
    let entries = ROUTES
        .iter()
        .map(|(path, route)| (*path, *route))
        .chain([("*", Route::NotFound)]);

    let mut lines = Vec::new();
    for (i, (path, route)) in entries.enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            path,
            route.output_file(Locale::DEFAULT)
        ));
        let labels: Vec<&str> = Locale::ALL
            .iter()
            .map(|&locale| catalog(locale).t(route.title_key()))
            .collect();
        lines.push(format!("{}{}", indent(1), labels.join(" \u{b7} ")));
    }
    lines
}

pub fn print_routes() {
    for line in format_routes() {
        println!("{}", line);
    }
}

// ============================================================================
// Language
// ============================================================================

/// Supported locales, the active one marked with `*`.
pub fn format_lang_output(current: Locale) -> Vec<String> {
    Locale::ALL
        .iter()
        .map(|&locale| {
            let marker = if locale == current { "*" } else { " " };
            format!("{} {} {}", marker, locale.emoji(), locale_label(locale))
        })
        .collect()
}

pub fn print_lang_output(current: Locale) {
    for line in format_lang_output(current) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
