//! Route table.
//!
//! A fixed mapping from site paths to pages. There are no parameters and no
//! guards; access control, when wanted, belongs to the reverse proxy in front
//! of the published files. Anything not in the table resolves to
//! [`Route::NotFound`].
//!
//! ## Output Locations
//!
//! ```text
//! /                 → index.html            (default locale)
//! /info             → info/index.html
//! /en/info          → en/info/index.html    (other locales, prefixed)
//! anything else     → 404.html
//! ```

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Address,
    Info,
    Accommodations,
    News,
    Contact,
    Gallery,
    Rsvp,
    NotFound,
}

/// Every routable page with its path.
pub const ROUTES: [(&str, Route); 8] = [
    ("/", Route::Home),
    ("/address", Route::Address),
    ("/info", Route::Info),
    ("/accommodations", Route::Accommodations),
    ("/news", Route::News),
    ("/contact", Route::Contact),
    ("/gallery", Route::Gallery),
    ("/rsvp", Route::Rsvp),
];

/// Pages listed in the navigation menu, in menu order.
pub const NAV_ROUTES: [Route; 7] = [
    Route::Home,
    Route::Info,
    Route::Address,
    Route::Accommodations,
    Route::News,
    Route::Gallery,
    Route::Contact,
];

impl Route {
    /// Resolve a request path. Trailing slashes and a trailing `index.html`
    /// are ignored.
    pub fn resolve(path: &str) -> Route {
        let normalized = normalize(path);
        ROUTES
            .iter()
            .find(|(p, _)| *p == normalized)
            .map(|(_, route)| *route)
            .unwrap_or(Route::NotFound)
    }

    /// Resolve a path that may carry a locale prefix (`/en/info`).
    ///
    /// Unprefixed paths belong to the default locale.
    pub fn resolve_localized(path: &str) -> (Locale, Route) {
        let (locale, rest) = split_locale(&normalize(path));
        (locale, Route::resolve(&rest))
    }

    /// Path of the page, without locale prefix. `None` for [`Route::NotFound`].
    pub fn path(self) -> Option<&'static str> {
        ROUTES
            .iter()
            .find(|(_, route)| *route == self)
            .map(|(path, _)| *path)
    }

    /// Link target for this page in `locale`, with a trailing slash.
    pub fn href(self, locale: Locale) -> String {
        match self.path() {
            Some("/") | None => format!("{}/", locale.url_prefix()),
            Some(path) => format!("{}{}/", locale.url_prefix(), path),
        }
    }

    /// File written for this page in `locale`, relative to the output root.
    pub fn output_file(self, locale: Locale) -> String {
        match self.path() {
            Some(path) => output_file_for(locale, path),
            None if locale == Locale::DEFAULT => "404.html".to_string(),
            None => format!("{}/404.html", locale.code()),
        }
    }

    /// Translation key of the page's menu label / title.
    pub fn title_key(self) -> &'static str {
        match self {
            Route::Home => "nav.home",
            Route::Address => "nav.address",
            Route::Info => "nav.info",
            Route::Accommodations => "nav.accommodations",
            Route::News => "nav.news",
            Route::Contact => "nav.contact",
            Route::Gallery => "nav.gallery",
            Route::Rsvp => "nav.rsvp",
            Route::NotFound => "notFound",
        }
    }
}

/// Locale-independent path of the lightbox viewer page for image `index`
/// (0-based). Viewer pages live under the gallery route.
pub fn viewer_path(index: usize) -> String {
    format!("/gallery/{}/", index + 1)
}

/// Resolve a viewer page path (`/gallery/3/`, `/en/gallery/3/`) to its
/// locale and 0-based image index. `None` for anything else, including
/// `/gallery/0/`. The index is not checked against the gallery size.
pub fn resolve_viewer(path: &str) -> Option<(Locale, usize)> {
    let (locale, rest) = split_locale(&normalize(path));
    let n: usize = rest.strip_prefix("/gallery/")?.parse().ok()?;
    n.checked_sub(1).map(|index| (locale, index))
}

/// Prefix a locale-independent path for `locale`.
pub fn localized(locale: Locale, path: &str) -> String {
    format!("{}{}", locale.url_prefix(), path)
}

/// Output file for a locale-independent directory path (`/gallery/3/`).
pub fn output_file_for(locale: Locale, path: &str) -> String {
    let prefix = match locale {
        Locale::DEFAULT => String::new(),
        other => format!("{}/", other.code()),
    };
    let dir = path.trim_matches('/');
    if dir.is_empty() {
        format!("{prefix}index.html")
    } else {
        format!("{prefix}{dir}/index.html")
    }
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let path = match path.strip_suffix("/index.html") {
        Some(dir) => dir,
        None if path == "index.html" => "",
        None => path,
    };
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}

/// Split a normalized path into its locale and the unprefixed remainder.
fn split_locale(normalized: &str) -> (Locale, String) {
    let mut segments = normalized.trim_start_matches('/').splitn(2, '/');
    let first = segments.next().unwrap_or("");
    match Locale::from_code(first) {
        Some(locale) if locale != Locale::DEFAULT => {
            (locale, format!("/{}", segments.next().unwrap_or("")))
        }
        _ => (Locale::DEFAULT, normalized.to_string()),
    }
}
