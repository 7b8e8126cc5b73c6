//! Page templates.
//!
//! Every page is rendered for one locale from a [`PageContext`]. The shell
//! (header, language switcher, menu, footer) is shared; the page body depends
//! on the [`Route`].
//!
//! ## Page Chrome
//!
//! The shell reads a [`ChromeState`]: a locked page gets the `scroll-locked`
//! body class and the language switcher is rendered with `hidden`. Its links
//! stay in the document so the locale script can still find the translated
//! copies of the page.
//!
//! ## Scripts
//!
//! JavaScript is embedded at compile time and inlined:
//! - `static/locale.js`: every page; stores explicit language choices and
//!   redirects to the preferred locale (disabled on the not-found page)
//! - `static/lightbox.js`: viewer pages only; keys and backdrop clicks
//! - `static/rsvp.js`: RSVP page while the form is editable
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::SiteConfig;
use crate::gallery::{self, GalleryImage, GalleryState};
use crate::lightbox::{ChromeCell, ChromeState, Dismissal, Lightbox, LightboxError, ViewerFrame};
use crate::locale::{Locale, LocaleContext, PREFERENCE_KEY};
use crate::routes::{self, NAV_ROUTES, Route};
use crate::rsvp::{self, RsvpForm};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const LOCALE_JS: &str = include_str!("../static/locale.js");
const LIGHTBOX_JS: &str = include_str!("../static/lightbox.js");
const RSVP_JS: &str = include_str!("../static/rsvp.js");

/// Everything a template needs besides the page's own data.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub config: &'a SiteConfig,
    /// Full stylesheet, color variables included.
    pub css: &'a str,
    pub locale: LocaleContext,
}

impl<'a> PageContext<'a> {
    pub fn new(config: &'a SiteConfig, css: &'a str, locale: LocaleContext) -> Self {
        Self {
            config,
            css,
            locale,
        }
    }

    fn t<'k>(&self, key: &'k str) -> &'k str {
        self.locale.catalog().t(key)
    }

    fn current(&self) -> Locale {
        self.locale.current()
    }
}

/// An open lightbox as seen by the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenViewer {
    pub frame: ViewerFrame,
    pub chrome: ChromeState,
}

/// Where a page sits, for the shell.
struct Shell {
    route: Route,
    /// Locale-independent path, for the switcher links.
    path: String,
    chrome: ChromeState,
}

impl Shell {
    fn for_route(route: Route) -> Self {
        Self {
            route,
            path: route.href(Locale::DEFAULT),
            chrome: ChromeState::default(),
        }
    }
}

/// Render the page for `route`.
pub fn render_route(
    ctx: &PageContext,
    route: Route,
    gallery: &GalleryState,
    rsvp: &RsvpForm,
) -> Markup {
    match route {
        Route::Home => render_home(ctx),
        Route::Address => render_address(ctx),
        Route::Info => render_info(ctx),
        Route::Accommodations => render_accommodations(ctx),
        Route::News => render_news(ctx),
        Route::Contact => render_contact(ctx),
        Route::Gallery => render_gallery(ctx, gallery, None),
        Route::Rsvp => render_rsvp(ctx, rsvp),
        Route::NotFound => render_not_found(ctx),
    }
}

/// Render the viewer page for image `index`.
///
/// Drives `viewer` through an opening: the frame and the chrome are read
/// while it is open, then it is dismissed again.
pub fn render_viewer(
    ctx: &PageContext,
    gallery: &GalleryState,
    viewer: &mut Lightbox<ChromeCell>,
    index: usize,
) -> Result<Markup, LightboxError> {
    viewer.select(index)?;
    let open = viewer.frame().map(|frame| OpenViewer {
        frame,
        chrome: viewer.chrome().state(),
    });
    viewer.dismiss(Dismissal::CloseButton);
    let open = open.ok_or(LightboxError::NotOpen)?;
    Ok(render_gallery(ctx, gallery, Some(open)))
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(ctx: &PageContext, shell: &Shell, content: Markup) -> Markup {
    let locale = ctx.current();
    let locales = Locale::ALL.map(Locale::code).join(" ");
    let redirect = (shell.route == Route::NotFound).then_some("off");
    html! {
        (DOCTYPE)
        html lang=(locale.code())
            data-default-locale=(Locale::DEFAULT.code())
            data-locales=(locales)
            data-storage-key=(PREFERENCE_KEY)
            data-redirect=[redirect]
        {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (ctx.t(shell.route.title_key())) " | " (ctx.t("footer.names")) }
                @for other in Locale::ALL {
                    link rel="alternate" hreflang=(other.code())
                        href=(routes::localized(other, &shell.path));
                }
                style { (PreEscaped(ctx.css)) }
            }
            body.scroll-locked[shell.chrome.scroll_locked] {
                div.layout {
                    (site_header(ctx, shell))
                    main.main {
                        (content)
                    }
                    (site_footer(ctx))
                }
                script { (PreEscaped(LOCALE_JS)) }
            }
        }
    }
}

fn site_header(ctx: &PageContext, shell: &Shell) -> Markup {
    html! {
        header.header {
            input.nav-toggle type="checkbox" id="nav-toggle";
            label.menu-toggle for="nav-toggle" aria-label=(ctx.t("menu.toggle")) {
                span.hamburger {}
            }
            h1.header-title { (ctx.t("header.title")) }
            (language_switcher(ctx, shell))
            (render_nav(ctx, shell.route))
        }
    }
}

/// Language switcher: one emoji link per locale to the same page.
fn language_switcher(ctx: &PageContext, shell: &Shell) -> Markup {
    let current = ctx.current();
    html! {
        nav.language-switcher aria-label=(ctx.t("language.change"))
            hidden[!shell.chrome.switcher_visible]
        {
            @for locale in Locale::ALL {
                a.active[locale == current]
                    href=(routes::localized(locale, &shell.path))
                    hreflang=(locale.code())
                    data-locale=(locale.code())
                    title=(locale.native_name())
                    aria-current=[(locale == current).then_some("true")]
                {
                    (locale.emoji())
                }
            }
        }
    }
}

/// Main menu. The current page's link is marked `active`.
pub fn render_nav(ctx: &PageContext, current: Route) -> Markup {
    let locale = ctx.current();
    html! {
        nav.nav {
            @for route in NAV_ROUTES {
                a.active[route == current] href=(route.href(locale)) {
                    (ctx.t(route.title_key()))
                }
            }
        }
    }
}

fn site_footer(ctx: &PageContext) -> Markup {
    html! {
        footer.footer {
            p { (ctx.t("footer.names")) }
            p.subtitle { (ctx.t("footer.tagline")) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

pub fn render_home(ctx: &PageContext) -> Markup {
    let content = html! {
        div.home-content {
            p {
                (ctx.t("home.message1")) br;
                (ctx.t("home.message1b"))
            }
            p { (ctx.t("home.message2")) }
            p {
                a href=(Route::Info.href(ctx.current())) { (ctx.t("home.moreInfo")) }
            }
        }
    };
    base_document(ctx, &Shell::for_route(Route::Home), content)
}

pub fn render_address(ctx: &PageContext) -> Markup {
    let links = &ctx.config.links;
    let content = html! {
        div {
            h2 { (ctx.t("address.title")) }
            p {
                (ctx.t("address.street")) br;
                (ctx.t("address.city")) br;
                (ctx.t("address.country"))
            }
            p {
                (ctx.t("address.access")) br;
                (ctx.t("address.gps")) br;
                (ctx.t("address.map")) " "
                a href=(links.map) target="_blank" rel="noopener" { (ctx.t("address.mapLink")) }
                " " (ctx.t("address.mapSuffix"))
            }
            p {
                (ctx.t("address.train")) " "
                a href=(links.train) target="_blank" rel="noopener" { (ctx.t("address.trainLink")) }
                "." br;
                (ctx.t("address.trainInfo"))
            }
        }
    };
    base_document(ctx, &Shell::for_route(Route::Address), content)
}

pub fn render_info(ctx: &PageContext) -> Markup {
    let content = html! {
        div {
            h2 { (ctx.t("info.title")) }
            p {
                "📅 " strong { (ctx.t("info.date")) } br;
                "📍 " strong { (ctx.t("info.location")) }
            }
            ul.list {
                li { "👗 " (ctx.t("info.dress")) }
                li { "💍 " (ctx.t("info.ceremony")) }
                li { "🍽️ " (ctx.t("info.dinner")) }
                li { "👼 " (ctx.t("info.children")) }
            }
            p { i { (ctx.t("info.dietary")) } }
        }
    };
    base_document(ctx, &Shell::for_route(Route::Info), content)
}

pub fn render_accommodations(ctx: &PageContext) -> Markup {
    let content = html! {
        div {
            h2 { (ctx.t("accommodations.title")) }
            p { (ctx.t("accommodations.camping")) }
            p { (ctx.t("accommodations.online")) }
            p { (ctx.t("accommodations.backup")) }
        }
    };
    base_document(ctx, &Shell::for_route(Route::Accommodations), content)
}

pub fn render_news(ctx: &PageContext) -> Markup {
    let content = html! {
        div {
            h2 { (ctx.t("news.title")) }
            p { (ctx.t("news.message")) }
        }
    };
    base_document(ctx, &Shell::for_route(Route::News), content)
}

pub fn render_contact(ctx: &PageContext) -> Markup {
    let email = &ctx.config.contact_email;
    let content = html! {
        div {
            h2 { (ctx.t("contact.title")) }
            p {
                (ctx.t("contact.message")) br;
                "✉️ " a href={ "mailto:" (email) } { (email) }
            }
        }
    };
    base_document(ctx, &Shell::for_route(Route::Contact), content)
}

/// Gallery page, optionally with the lightbox open over it.
pub fn render_gallery(ctx: &PageContext, state: &GalleryState, open: Option<OpenViewer>) -> Markup {
    let images = state.images();
    let layout = gallery::partition(images);
    let shell = match open {
        Some(open) => Shell {
            route: Route::Gallery,
            path: routes::viewer_path(open.frame.index),
            chrome: open.chrome,
        },
        None => Shell::for_route(Route::Gallery),
    };

    let content = html! {
        div.gallery {
            h2 { (ctx.t("gallery.title")) }
            @if state.is_loading() {
                p.gallery-loading { (ctx.t("gallery.loading")) }
            }
            @if let Some(layout) = layout {
                p.gallery-caption { (ctx.t("gallery.caption1")) }
                div.gallery-grid-row {
                    @for (index, image) in layout.row.iter().enumerate() {
                        (thumbnail(ctx, image, index))
                    }
                }
                p.gallery-caption { (ctx.t("gallery.caption2")) }
                @if !layout.masonry.is_empty() {
                    div.gallery-masonry {
                        @for (offset, image) in layout.masonry.iter().enumerate() {
                            (thumbnail(ctx, image, layout.masonry_offset() + offset))
                        }
                    }
                }
            }
        }
        @if let Some(open) = open {
            (lightbox_overlay(ctx, images, &open.frame))
            script { (PreEscaped(LIGHTBOX_JS)) }
        }
    };
    base_document(ctx, &shell, content)
}

/// Alt text of the image at grid `index`, defaulting to a numbered label.
pub fn alt_text(ctx: &PageContext, image: &GalleryImage, index: usize) -> String {
    match &image.alt {
        Some(alt) => alt.clone(),
        None => format!("{} {}", ctx.t("gallery.altText"), index + 1),
    }
}

fn viewer_href(ctx: &PageContext, index: usize) -> String {
    routes::localized(ctx.current(), &routes::viewer_path(index))
}

fn thumbnail(ctx: &PageContext, image: &GalleryImage, index: usize) -> Markup {
    html! {
        a.gallery-item href=(viewer_href(ctx, index)) {
            img src=(image.path) alt=(alt_text(ctx, image, index)) loading="lazy";
        }
    }
}

fn lightbox_overlay(ctx: &PageContext, images: &[GalleryImage], frame: &ViewerFrame) -> Markup {
    let close = Route::Gallery.href(ctx.current());
    let previous = viewer_href(ctx, frame.previous);
    let next = viewer_href(ctx, frame.next);
    html! {
        div.lightbox-overlay role="dialog" aria-modal="true"
            data-close=(close) data-prev=(previous) data-next=(next)
        {
            a.lightbox-close href=(close) aria-label=(ctx.t("gallery.close")) { "✕" }
            a.lightbox-nav.lightbox-prev href=(previous) aria-label=(ctx.t("gallery.previous")) { "‹" }
            @if let Some(image) = images.get(frame.index) {
                div.lightbox-content {
                    img src=(image.path) alt=(alt_text(ctx, image, frame.index));
                    p.lightbox-counter { (frame.counter()) }
                }
            }
            a.lightbox-nav.lightbox-next href=(next) aria-label=(ctx.t("gallery.next")) { "›" }
        }
    }
}

/// Rejects names made only of whitespace, which `required` alone accepts.
const NAME_PATTERN: &str = r".*\S.*";

/// RSVP page: the form while editing, the acknowledgement once submitted.
pub fn render_rsvp(ctx: &PageContext, form: &RsvpForm) -> Markup {
    let catalog = ctx.locale.catalog();
    let content = html! {
        section.rsvp data-thank-you=(ctx.t("rsvp.thankYou")) {
            @match form {
                RsvpForm::Editing { name, attending } => {
                    h2 { (ctx.t("rsvp.title")) }
                    form.rsvp-form {
                        div {
                            label for="rsvp-name" { (ctx.t("rsvp.nameLabel")) }
                            br;
                            input id="rsvp-name" type="text" name="name" value=(name)
                                required pattern=(NAME_PATTERN);
                        }
                        div {
                            label {
                                input type="checkbox" name="attending" checked[*attending];
                                " " (ctx.t("rsvp.attendLabel"))
                            }
                        }
                        button type="submit" { (ctx.t("rsvp.submit")) }
                    }
                }
                RsvpForm::Submitted(entry) => {
                    p.rsvp-thanks { (rsvp::acknowledgement(catalog, entry)) }
                }
            }
        }
        @if !form.is_submitted() {
            script { (PreEscaped(RSVP_JS)) }
        }
    };
    base_document(ctx, &Shell::for_route(Route::Rsvp), content)
}

pub fn render_not_found(ctx: &PageContext) -> Markup {
    let content = html! {
        div.not-found {
            h2 { (ctx.t("notFound")) }
            p {
                a href=(Route::Home.href(ctx.current())) { (ctx.t("nav.home")) }
            }
        }
    };
    base_document(ctx, &Shell::for_route(Route::NotFound), content)
}

// ============================================================================
// Tests
// ============================================================================
