//! # Wedding Site
//!
//! A static site generator for a small multilingual wedding website: a few
//! informational pages, a photo gallery with a full-screen viewer, and an
//! RSVP form. Every page is rendered ahead of time for every locale; the
//! output is plain HTML, one stylesheet and three small vanilla scripts that
//! any file server can host.
//!
//! # Architecture
//!
//! ```text
//! content/config.toml ─┐
//! content/images/      ├─▶ generate ─▶ dist/{,en/,de/,es/}…/index.html
//! locales/*.json ──────┘   (embedded)
//! ```
//!
//! The interactive behavior is modeled in Rust and rendered as states:
//!
//! - The **lightbox** is a state machine ([`lightbox::Lightbox`]). The closed
//!   state is the gallery page; each open state is a viewer page produced by
//!   driving a real viewer through `select`, so the page chrome (scroll lock,
//!   hidden language switcher) comes from the same guard that the model uses.
//! - The **locale** is an explicit [`locale::LocaleContext`] handed to every
//!   template. Preferences persist through a [`preferences::PreferenceStore`]
//!   (a JSON file for the CLI, `localStorage` in the browser).
//! - The **RSVP form** ([`rsvp::RsvpForm`]) reports entries to a sink and
//!   never leaves the visitor's machine.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`generate`] | Renders every page for every locale, copies assets |
//! | [`render`] | Maud templates for the shell and each page |
//! | [`routes`] | Fixed path → page table, locale prefixes, output locations |
//! | [`lightbox`] | Viewer state machine and page-chrome suppression guard |
//! | [`gallery`] | Manifest loading with fallback, row/masonry layout |
//! | [`locale`] | Supported locales, embedded catalogs, locale resolution |
//! | [`preferences`] | Durable key-value store for the chosen language |
//! | [`rsvp`] | RSVP form model and submission sinks |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`output`] | CLI output formatting |

pub mod config;
pub mod gallery;
pub mod generate;
pub mod lightbox;
pub mod locale;
pub mod logging;
pub mod output;
pub mod preferences;
pub mod render;
pub mod routes;
pub mod rsvp;

#[cfg(test)]
pub(crate) mod test_helpers;
