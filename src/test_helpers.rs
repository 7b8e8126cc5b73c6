//! Shared test utilities for the wedding-site test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (_source, out) = build_fixture_site();
//! let home = read_page(out.path(), "en/index.html");
//! assert!(home.contains("Camille & Sam"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::generate::generate;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Build the fixture site. Returns the content and output directories.
pub fn build_fixture_site() -> (TempDir, TempDir) {
    let source = setup_fixtures();
    let out = TempDir::new().unwrap();
    generate(source.path(), out.path()).unwrap();
    (source, out)
}

// =========================================================================
// Output lookups (panic with a clear message on miss)
// =========================================================================

/// Read a generated page. Panics if it was not written.
pub fn read_page(out: &Path, file: &str) -> String {
    std::fs::read_to_string(out.join(file))
        .unwrap_or_else(|e| panic!("page '{file}' not readable: {e}"))
}
