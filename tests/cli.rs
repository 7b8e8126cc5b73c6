//! End-to-end tests of the `wedding-site` binary against the fixture content.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn run(args: &[&str], state_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wedding-site"))
        .args(args)
        .args(["--source", fixtures().to_str().unwrap()])
        .args(["--state-dir", state_dir.to_str().unwrap()])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run wedding-site")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn build_writes_all_locales() {
    let state = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let text = stdout(&run(
        &["build", "--output", out.path().to_str().unwrap()],
        state.path(),
    ));

    assert!(text.contains("001 Français (fr)"));
    assert!(text.contains("6 images from manifest"));
    for file in [
        "index.html",
        "404.html",
        "rsvp/index.html",
        "gallery/3/index.html",
        "en/index.html",
        "de/info/index.html",
        "es/404.html",
        "images/gallery.json",
    ] {
        assert!(out.path().join(file).is_file(), "missing {file}");
    }
}

#[test]
fn check_reports_manifest() {
    let state = TempDir::new().unwrap();
    let text = stdout(&run(&["check"], state.path()));
    assert!(text.contains("Contact: hello@wedding.test"));
    assert!(text.contains("6 images"));
    assert!(text.contains("Config OK"));
}

#[test]
fn routes_lists_table() {
    let state = TempDir::new().unwrap();
    let text = stdout(&run(&["routes"], state.path()));
    assert!(text.contains("/accommodations \u{2192} accommodations/index.html"));
    assert!(text.contains("* \u{2192} 404.html"));
}

#[test]
fn preview_unknown_path_is_not_found() {
    let state = TempDir::new().unwrap();
    let html = stdout(&run(
        &["preview", "/nonexistent", "--accept-language", "en-US"],
        state.path(),
    ));
    assert!(html.contains("Page not found"));
}

#[test]
fn preview_browser_language_selects_locale() {
    let state = TempDir::new().unwrap();
    let de = stdout(&run(
        &["preview", "/", "--accept-language", "de-CH"],
        state.path(),
    ));
    assert!(de.contains(r#"lang="de""#));

    let fallback = stdout(&run(
        &["preview", "/", "--accept-language", "it-IT"],
        state.path(),
    ));
    assert!(fallback.contains(r#"lang="fr""#));
    assert!(fallback.contains("Accueil"));
}

#[test]
fn preview_rsvp_submission() {
    let state = TempDir::new().unwrap();
    let html = stdout(&run(&["preview", "/en/rsvp", "--rsvp-name", "Alex"], state.path()));
    assert!(html.contains("Thank you Alex, your answer has been recorded!"));
    assert!(!html.contains("<form"));
}

#[test]
fn preview_blank_rsvp_name_fails() {
    let state = TempDir::new().unwrap();
    let output = run(&["preview", "/rsvp", "--rsvp-name", "  "], state.path());
    assert!(!output.status.success());
}

#[test]
fn preview_open_viewer() {
    let state = TempDir::new().unwrap();
    let html = stdout(&run(&["preview", "/en/gallery", "--open", "2"], state.path()));
    assert!(html.contains("2 / 6"));
    assert!(html.contains("scroll-locked"));

    let output = run(&["preview", "/en/gallery", "--open", "7"], state.path());
    assert!(!output.status.success());
}

#[test]
fn preview_viewer_page_path() {
    let state = TempDir::new().unwrap();
    let html = stdout(&run(&["preview", "/gallery/3/"], state.path()));
    assert!(html.contains("3 / 6"));
    assert!(!html.contains("Page not found"));

    let html = stdout(&run(&["preview", "/en/gallery/1/"], state.path()));
    assert!(html.contains(r#"lang="en""#));
    assert!(html.contains("1 / 6"));
}

#[test]
fn preview_rejects_flags_for_other_pages() {
    let state = TempDir::new().unwrap();
    for args in [
        &["preview", "/info", "--open", "2"][..],
        &["preview", "/gallery/3/", "--open", "2"][..],
        &["preview", "/en/gallery", "--rsvp-name", "Alex"][..],
    ] {
        let output = run(args, state.path());
        assert!(!output.status.success(), "{args:?} should fail");
    }
}

#[test]
fn corrupt_preferences_fall_back_to_browser_language() {
    let state = TempDir::new().unwrap();
    let prefs = state.path().join("preferences.json");
    std::fs::write(&prefs, "{ truncated").unwrap();

    let html = stdout(&run(
        &["preview", "/", "--accept-language", "de-CH"],
        state.path(),
    ));
    assert!(html.contains(r#"lang="de""#));

    let text = stdout(&run(&["lang", "set", "en"], state.path()));
    assert!(text.contains("* 💂 English (en)"));
    let text = stdout(&run(&["lang", "show"], state.path()));
    assert!(text.contains("* 💂 English (en)"));
}

#[test]
fn lang_set_persists_between_runs() {
    let state = TempDir::new().unwrap();
    let text = stdout(&run(&["lang", "set", "es"], state.path()));
    assert!(text.contains("* 💃 Español (es)"));
    assert!(state.path().join("preferences.json").is_file());

    let text = stdout(&run(&["lang", "show"], state.path()));
    assert!(text.contains("* 💃 Español (es)"));

    // Stored preference beats the browser language.
    let html = stdout(&run(
        &["preview", "/info", "--accept-language", "en-GB"],
        state.path(),
    ));
    assert!(html.contains(r#"lang="es""#));
}

#[test]
fn lang_set_rejects_unsupported() {
    let state = TempDir::new().unwrap();
    let output = run(&["lang", "set", "it"], state.path());
    assert!(!output.status.success());
    assert!(!state.path().join("preferences.json").exists());
}

#[test]
fn gen_config_prints_stock_file() {
    let state = TempDir::new().unwrap();
    let text = stdout(&run(&["gen-config"], state.path()));
    assert!(text.contains("contact_email"));
    assert!(text.contains("[colors.light]"));
}
