//! Gallery manifest loading and grid layout.
//!
//! The gallery is described by a static JSON manifest produced outside this
//! tool:
//!
//! ```json
//! {
//!   "generated": "2026-05-02T18:04:11",
//!   "images": [
//!     { "filename": "001.jpg", "path": "/images/001.jpg", "alt": "Gallery image 1" }
//!   ]
//! }
//! ```
//!
//! The manifest is read once. Any failure (missing file, read error,
//! malformed JSON, duplicate filenames) is recovered locally by substituting
//! four placeholder images; it is logged, never surfaced to visitors. There
//! is no retry.
//!
//! ## Layout
//!
//! The first [`ROW_LEN`] images are shown in a fixed row, the rest in a
//! masonry block, both in manifest order. An empty gallery has no layout at
//! all: the section is omitted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of images in the leading fixed row.
pub const ROW_LEN: usize = 4;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate filename in manifest: {0}")]
    DuplicateFilename(String),
}

/// One gallery image as listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Unique within a gallery.
    pub filename: String,
    /// Site URL of the image (e.g. `/images/001.jpg`).
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryManifest {
    /// Generation timestamp as written by the producer. Kept verbatim: the
    /// producer writes local ISO timestamps without an offset.
    #[serde(default, rename = "generated", skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    pub images: Vec<GalleryImage>,
}

/// Where manifest bytes come from.
pub trait ManifestSource {
    fn fetch(&self) -> Result<Vec<u8>, ManifestError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// A manifest file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>, ManifestError> {
        if !self.path.is_file() {
            return Err(ManifestError::NotFound(self.path.clone()));
        }
        Ok(fs::read(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse and validate manifest bytes.
pub fn parse_manifest(bytes: &[u8]) -> Result<GalleryManifest, ManifestError> {
    let manifest: GalleryManifest = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::new();
    for image in &manifest.images {
        if !seen.insert(image.filename.as_str()) {
            return Err(ManifestError::DuplicateFilename(image.filename.clone()));
        }
    }
    Ok(manifest)
}

/// Fetch and parse a manifest from `source`.
pub fn fetch_manifest(source: &dyn ManifestSource) -> Result<GalleryManifest, ManifestError> {
    parse_manifest(&source.fetch()?)
}

/// The four placeholder images used when the manifest is unavailable.
pub fn fallback_images() -> Vec<GalleryImage> {
    (1..=4)
        .map(|n| GalleryImage {
            filename: format!("photo{n}.jpg"),
            path: format!("/images/photo{n}.jpg"),
            alt: Some(format!("Gallery image {n}")),
        })
        .collect()
}

/// Where the images of a ready gallery came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    Manifest,
    Fallback,
}

/// Loading state of the gallery, as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GalleryState {
    #[default]
    Loading,
    Ready {
        images: Vec<GalleryImage>,
        origin: ImageOrigin,
    },
}

impl GalleryState {
    /// Read the manifest once, degrading to the fallback list on failure.
    pub fn load(source: &dyn ManifestSource) -> Self {
        match fetch_manifest(source) {
            Ok(manifest) => {
                tracing::info!(
                    source = %source.describe(),
                    images = manifest.images.len(),
                    generated = manifest.generated_at.as_deref().unwrap_or("-"),
                    "loaded gallery manifest"
                );
                GalleryState::Ready {
                    images: manifest.images,
                    origin: ImageOrigin::Manifest,
                }
            }
            Err(err) => {
                tracing::warn!(
                    source = %source.describe(),
                    error = %err,
                    "gallery manifest unavailable, using fallback images"
                );
                GalleryState::Ready {
                    images: fallback_images(),
                    origin: ImageOrigin::Fallback,
                }
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GalleryState::Loading)
    }

    /// Images once ready; empty while loading.
    pub fn images(&self) -> &[GalleryImage] {
        match self {
            GalleryState::Loading => &[],
            GalleryState::Ready { images, .. } => images,
        }
    }

    pub fn origin(&self) -> Option<ImageOrigin> {
        match self {
            GalleryState::Loading => None,
            GalleryState::Ready { origin, .. } => Some(*origin),
        }
    }
}

/// The grid split of a non-empty gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryLayout<'a> {
    pub row: &'a [GalleryImage],
    pub masonry: &'a [GalleryImage],
}

impl GalleryLayout<'_> {
    /// Grid position (0-based, manifest order) of the first masonry image.
    pub fn masonry_offset(&self) -> usize {
        self.row.len()
    }
}

/// Split images into the leading row and the masonry remainder.
///
/// Returns `None` for an empty gallery.
pub fn partition(images: &[GalleryImage]) -> Option<GalleryLayout<'_>> {
    if images.is_empty() {
        return None;
    }
    let split = images.len().min(ROW_LEN);
    let (row, masonry) = images.split_at(split);
    Some(GalleryLayout { row, masonry })
}
