//! Browser tests: lightbox keys and dismissal, locale redirect, RSVP submit.
//!
//! These tests use headless Chrome over a local HTTP server so that
//! `localStorage` and real navigation behave as on a deployed site.
//!
//! Run with: `cargo test --test browser_site -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::io::{Read as _, Write as _};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

// ===========================================================================
// Minimal static file server
// ===========================================================================

struct TestServer {
    port: u16,
    _stop: std::sync::mpsc::Sender<()>,
}

impl TestServer {
    fn start(root: PathBuf) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = std::sync::mpsc::channel::<()>();

        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                if rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let root = root.clone();
                        thread::spawn(move || serve_request(stream, &root));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self { port, _stop: tx }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

/// Serves `dir/index.html` for directory paths and `404.html` for misses,
/// like a typical static host.
fn serve_request(mut stream: std::net::TcpStream, root: &Path) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 4096];
    let n = match stream.read(&mut buf) {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request.split_whitespace().nth(1).unwrap_or("/");
    let path = path.split(['?', '#']).next().unwrap_or("/");
    let rel = path.trim_start_matches('/');
    let mut file_path = root.join(rel);
    if file_path.is_dir() {
        file_path = file_path.join("index.html");
    }

    let (status, file_path) = if file_path.is_file() {
        ("200 OK", file_path)
    } else {
        ("404 Not Found", root.join("404.html"))
    };
    let body = std::fs::read(&file_path).unwrap_or_default();
    let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let ct = match ext {
        "html" => "text/html; charset=utf-8",
        "json" => "application/json",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    };

    let header = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: {ct}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
}

// ===========================================================================
// Setup helpers
// ===========================================================================

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("browser-site")
}

fn ensure_site_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let bin = env!("CARGO_BIN_EXE_wedding-site");
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let status = Command::new(bin)
            .args([
                "build",
                "--source",
                root.join("fixtures/content").to_str().unwrap(),
                "--output",
                generated_dir().to_str().unwrap(),
            ])
            .status()
            .expect("failed to run wedding-site");
        assert!(status.success(), "site generation failed");
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn start_server() -> TestServer {
    ensure_site_built();
    TestServer::start(generated_dir())
}

fn eval(tab: &Tab, js: &str) -> serde_json::Value {
    tab.evaluate(js, false).unwrap().value.unwrap_or_default()
}

/// Store `locale` as the preferred language, then open `path`.
///
/// Every page redirects to the preferred locale, so tests pin it first.
fn open_as(tab: &Tab, server: &TestServer, locale: &str, path: &str) {
    tab.navigate_to(&server.url("/404.html"))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    eval(tab, &format!("localStorage.setItem('language', '{locale}')"));
    tab.navigate_to(&server.url(path))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
}

/// Poll until the tab's path equals `expected`. Panics after 5 s.
fn wait_for_path(tab: &Tab, expected: &str) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let path = eval(tab, "location.pathname");
        if path.as_str() == Some(expected) {
            tab.wait_until_navigated().unwrap();
            return;
        }
        assert!(
            Instant::now() < deadline,
            "expected path {expected}, still at {path}"
        );
        thread::sleep(Duration::from_millis(50));
    }
}

fn scroll_locked(tab: &Tab) -> bool {
    eval(tab, "document.body.classList.contains('scroll-locked')")
        .as_bool()
        .unwrap()
}

fn switcher_hidden(tab: &Tab) -> bool {
    eval(tab, "document.querySelector('.language-switcher').hidden")
        .as_bool()
        .unwrap()
}

// ===========================================================================
// Lightbox
// ===========================================================================

#[test]
#[ignore]
fn thumbnail_opens_viewer() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/en/gallery/");
    assert!(!scroll_locked(&tab));
    assert!(!switcher_hidden(&tab));

    tab.find_element(".gallery-grid-row a:nth-child(3)")
        .unwrap()
        .click()
        .unwrap();
    wait_for_path(&tab, "/en/gallery/3/");
    assert!(scroll_locked(&tab));
    assert!(switcher_hidden(&tab));
    assert_eq!(
        eval(&tab, "document.querySelector('.lightbox-counter').textContent"),
        "3 / 6"
    );
}

#[test]
#[ignore]
fn escape_closes_viewer_and_restores_chrome() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/en/gallery/2/");
    assert!(scroll_locked(&tab));

    tab.press_key("Escape").unwrap();
    wait_for_path(&tab, "/en/gallery/");
    assert!(!scroll_locked(&tab));
    assert!(!switcher_hidden(&tab));
}

#[test]
#[ignore]
fn backdrop_click_closes_viewer() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/en/gallery/4/");

    eval(&tab, "document.querySelector('.lightbox-overlay').click()");
    wait_for_path(&tab, "/en/gallery/");
    assert!(!scroll_locked(&tab));
}

#[test]
#[ignore]
fn close_button_closes_viewer() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/en/gallery/1/");

    tab.find_element(".lightbox-close").unwrap().click().unwrap();
    wait_for_path(&tab, "/en/gallery/");
    assert!(!switcher_hidden(&tab));
}

#[test]
#[ignore]
fn arrow_keys_wrap_around() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/en/gallery/6/");

    tab.press_key("ArrowRight").unwrap();
    wait_for_path(&tab, "/en/gallery/1/");

    tab.press_key("ArrowLeft").unwrap();
    wait_for_path(&tab, "/en/gallery/6/");
}

#[test]
#[ignore]
fn keys_ignored_on_closed_gallery() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/en/gallery/");

    tab.press_key("ArrowRight").unwrap();
    thread::sleep(Duration::from_millis(300));
    assert_eq!(eval(&tab, "location.pathname"), "/en/gallery/");
}

// ===========================================================================
// Locale
// ===========================================================================

#[test]
#[ignore]
fn stored_preference_redirects() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "de", "/info/");
    wait_for_path(&tab, "/de/info/");
    assert_eq!(eval(&tab, "document.documentElement.lang"), "de");
}

#[test]
#[ignore]
fn switcher_click_stores_choice() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/en/news/");

    tab.find_element(r#".language-switcher a[data-locale="es"]"#)
        .unwrap()
        .click()
        .unwrap();
    wait_for_path(&tab, "/es/news/");
    assert_eq!(eval(&tab, "localStorage.getItem('language')"), "es");
    let nav = eval(&tab, "document.querySelector('.nav').textContent");
    assert!(nav.as_str().unwrap().contains("Novedades"));
}

#[test]
#[ignore]
fn not_found_page_stays_put() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/nonexistent");
    thread::sleep(Duration::from_millis(300));
    assert_eq!(eval(&tab, "location.pathname"), "/nonexistent");
}

// ===========================================================================
// RSVP
// ===========================================================================

#[test]
#[ignore]
fn rsvp_submit_shows_thanks() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/en/rsvp/");

    assert_eq!(
        eval(&tab, "document.querySelector('input[name=attending]').checked"),
        true
    );
    tab.find_element("#rsvp-name")
        .unwrap()
        .type_into("Alex")
        .unwrap();
    tab.find_element(".rsvp-form button").unwrap().click().unwrap();

    let thanks = tab.wait_for_element(".rsvp-thanks").unwrap();
    assert_eq!(
        thanks.get_inner_text().unwrap(),
        "Thank you Alex, your answer has been recorded!"
    );
    assert_eq!(eval(&tab, "document.querySelector('form') === null"), true);
    assert_eq!(eval(&tab, "location.pathname"), "/en/rsvp/");
}

#[test]
#[ignore]
fn rsvp_blank_name_keeps_form() {
    let server = start_server();
    let tab = browser().new_tab().unwrap();
    open_as(&tab, &server, "en", "/en/rsvp/");

    tab.find_element("#rsvp-name")
        .unwrap()
        .type_into("   ")
        .unwrap();
    tab.find_element(".rsvp-form button").unwrap().click().unwrap();
    thread::sleep(Duration::from_millis(300));

    assert_eq!(eval(&tab, "document.querySelector('.rsvp-form') !== null"), true);
    assert_eq!(eval(&tab, "document.querySelector('.rsvp-thanks') === null"), true);
    assert_eq!(
        eval(&tab, "document.querySelector('#rsvp-name').validity.patternMismatch"),
        true
    );
}
