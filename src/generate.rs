//! Static site generation.
//!
//! Reads the content directory (config and gallery manifest), renders every
//! page for every locale, and copies the image assets next to them.
//!
//! ## Generated Pages
//!
//! - **Route pages** (`/{route}/index.html`): one per entry of the route table
//! - **Viewer pages** (`/gallery/{n}/index.html`): the gallery with the
//!   lightbox open on image `n`
//! - **Not found** (`/404.html`): served by the file server for unknown paths
//!
//! The default locale is published at the root, the others under their code.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Home (fr)
//! ├── 404.html
//! ├── info/index.html
//! ├── gallery/
//! │   ├── index.html             # Gallery, viewer closed
//! │   ├── 1/index.html           # Viewer pages
//! │   └── ...
//! ├── en/
//! │   ├── index.html
//! │   ├── 404.html
//! │   └── ...
//! └── images/                    # Copied from the content directory
//!     ├── gallery.json
//!     └── 001.jpg
//! ```
//!
//! Locales are rendered in parallel. Each worker owns its own lightbox and
//! chrome handle; only the config, stylesheet and gallery are shared, read-only.

use crate::config::{self, ConfigError, SiteConfig};
use crate::gallery::{self, FileSource, GalleryState, ImageOrigin, ManifestError};
use crate::lightbox::{ChromeCell, Lightbox, LightboxError};
use crate::locale::{Locale, LocaleContext};
use crate::render::{self, PageContext};
use crate::routes::{self, ROUTES, Route};
use crate::rsvp::RsvpForm;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Lightbox error: {0}")]
    Lightbox(#[from] LightboxError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Path {0} is outside the asset directory")]
    StrayPath(PathBuf),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Result of a build, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub locales: Vec<LocalePages>,
    pub images: usize,
    pub origin: ImageOrigin,
    /// Files copied from the asset directory.
    pub assets: usize,
}

impl BuildSummary {
    pub fn page_count(&self) -> usize {
        self.locales.iter().map(|l| l.files.len()).sum()
    }
}

/// Files written for one locale, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePages {
    pub locale: Locale,
    pub files: Vec<String>,
}

/// Full stylesheet: color variables followed by the static styles.
pub fn stylesheet(config: &SiteConfig) -> String {
    let color_css = config::generate_color_css(&config.colors);
    format!("{}\n\n{}", color_css, CSS_STATIC)
}

/// Load the gallery described by the content directory's manifest.
pub fn load_gallery(source: &Path, config: &SiteConfig) -> GalleryState {
    GalleryState::load(&FileSource::new(source.join(&config.gallery.manifest)))
}

pub fn generate(source: &Path, output_dir: &Path) -> Result<BuildSummary, GenerateError> {
    let config = config::load_config(source)?;
    let gallery = load_gallery(source, &config);
    let css = stylesheet(&config);

    fs::create_dir_all(output_dir)?;

    let locales = Locale::ALL
        .par_iter()
        .map(|&locale| {
            let ctx = PageContext::new(&config, &css, LocaleContext::new(locale));
            let files = render_locale(&ctx, &gallery, output_dir)?;
            tracing::info!(%locale, pages = files.len(), "rendered locale");
            Ok::<_, GenerateError>(LocalePages { locale, files })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let assets = copy_assets(
        &source.join(&config.gallery.assets_dir),
        &output_dir.join(&config.gallery.assets_dir),
    )?;

    Ok(BuildSummary {
        output: output_dir.to_path_buf(),
        locales,
        images: gallery.images().len(),
        origin: gallery.origin().unwrap_or(ImageOrigin::Fallback),
        assets,
    })
}

/// Render and write every page of one locale. Returns the written files.
fn render_locale(
    ctx: &PageContext,
    gallery: &GalleryState,
    output_dir: &Path,
) -> Result<Vec<String>, GenerateError> {
    let locale = ctx.locale.current();
    let rsvp = RsvpForm::default();
    let mut files = Vec::new();

    for route in ROUTES.map(|(_, route)| route).into_iter().chain([Route::NotFound]) {
        let file = route.output_file(locale);
        let html = render::render_route(ctx, route, gallery, &rsvp);
        write_page(output_dir, &file, &html.into_string())?;
        files.push(file);
    }

    let count = gallery.images().len();
    if count > 0 {
        let mut viewer = Lightbox::new(count, ChromeCell::default())?;
        for index in 0..count {
            let file = routes::output_file_for(locale, &routes::viewer_path(index));
            let html = render::render_viewer(ctx, gallery, &mut viewer, index)?;
            write_page(output_dir, &file, &html.into_string())?;
            files.push(file);
        }
    }

    Ok(files)
}

fn write_page(output_dir: &Path, file: &str, html: &str) -> Result<(), GenerateError> {
    let path = output_dir.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html)?;
    tracing::debug!(file, "wrote page");
    Ok(())
}

/// Copy the asset directory into the output. A missing directory is skipped.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        tracing::warn!(dir = %src.display(), "asset directory not found, skipping");
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| GenerateError::StrayPath(entry.path().to_path_buf()))?;
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Outcome of `check`: config validity and manifest status, nothing written.
#[derive(Debug)]
pub struct CheckReport {
    pub config: SiteConfig,
    pub manifest_path: PathBuf,
    /// Image count, or why the fallback would be used.
    pub manifest: Result<usize, ManifestError>,
}

/// Validate config and manifest without writing anything.
///
/// Config errors fail the check; an unusable manifest is reported because
/// the build would degrade to the fallback images.
pub fn check(source: &Path) -> Result<CheckReport, GenerateError> {
    let config = config::load_config(source)?;
    let manifest_path = source.join(&config.gallery.manifest);
    let manifest =
        gallery::fetch_manifest(&FileSource::new(&manifest_path)).map(|m| m.images.len());
    Ok(CheckReport {
        config,
        manifest_path,
        manifest,
    })
}

// ============================================================================
// Tests
// ============================================================================
