//! Lightbox viewer.
//!
//! A full-screen modal over the gallery grid, showing one image at a time
//! with previous/next navigation that wraps around at both ends.
//!
//! ## States
//!
//! ```text
//!            select(i), 0 ≤ i < N
//!   Closed ─────────────────────────▶ Open(i)
//!     ▲                                 │ next      → Open((i + 1) mod N)
//!     │  dismiss (close, backdrop, Esc) │ previous  → Open((i + N - 1) mod N)
//!     └─────────────────────────────────┘
//! ```
//!
//! A viewer cannot exist for an empty gallery, so `N ≥ 1` always holds and
//! the index arithmetic is total.
//!
//! ## Page Chrome
//!
//! While open, the page behind the modal must not scroll and the language
//! switcher is hidden. Both effects are held by a [`ChromeSuppression`]
//! guard that owns a [`PageChrome`] handle for exactly as long as the viewer
//! is open. Dismissing, by any path, drops the guard; so does dropping the
//! viewer itself. Restoration therefore runs exactly once per opening, and a
//! second `select` is rejected until the guard is gone.
//!
//! ## Keyboard
//!
//! Keys are only handled while open. The listener lives inside the open
//! session: it comes into existence on `select` and disappears with
//! dismissal, so a closed viewer never reacts to keys.

use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightboxError {
    #[error("cannot open a lightbox over an empty gallery")]
    Empty,
    #[error("image index {index} out of range for {len} images")]
    OutOfRange { index: usize, len: usize },
    #[error("lightbox is already open at image {0}")]
    AlreadyOpen(usize),
    #[error("lightbox is closed")]
    NotOpen,
}

/// The page elements the lightbox suppresses while open.
pub trait PageChrome {
    fn set_scroll_locked(&self, locked: bool);
    fn set_switcher_visible(&self, visible: bool);
}

/// Visual state of the page chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeState {
    pub scroll_locked: bool,
    pub switcher_visible: bool,
}

impl Default for ChromeState {
    fn default() -> Self {
        Self {
            scroll_locked: false,
            switcher_visible: true,
        }
    }
}

/// A shared, inspectable [`PageChrome`]: clones observe the same state.
///
/// The renderer reads it to decide how to draw the page around a frame.
#[derive(Debug, Clone, Default)]
pub struct ChromeCell(Rc<Cell<ChromeState>>);

impl ChromeCell {
    pub fn state(&self) -> ChromeState {
        self.0.get()
    }
}

impl PageChrome for ChromeCell {
    fn set_scroll_locked(&self, locked: bool) {
        let mut state = self.0.get();
        state.scroll_locked = locked;
        self.0.set(state);
    }

    fn set_switcher_visible(&self, visible: bool) {
        let mut state = self.0.get();
        state.switcher_visible = visible;
        self.0.set(state);
    }
}

/// Exclusive hold on the page chrome: scrolling locked, switcher hidden.
///
/// Released on drop.
#[derive(Debug)]
pub struct ChromeSuppression<C: PageChrome> {
    chrome: C,
}

impl<C: PageChrome> ChromeSuppression<C> {
    pub fn acquire(chrome: C) -> Self {
        chrome.set_scroll_locked(true);
        chrome.set_switcher_visible(false);
        Self { chrome }
    }
}

impl<C: PageChrome> Drop for ChromeSuppression<C> {
    fn drop(&mut self) {
        self.chrome.set_scroll_locked(false);
        self.chrome.set_switcher_visible(true);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Closed,
    Open(usize),
}

/// The ways a visitor can close the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    CloseButton,
    Backdrop,
    Escape,
}

/// Keys the viewer understands, by their DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Moved(usize),
    Dismissed,
}

/// Snapshot of an open viewer, with the indices its controls lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerFrame {
    pub index: usize,
    pub previous: usize,
    pub next: usize,
    pub count: usize,
}

impl ViewerFrame {
    /// 1-based position, as shown in the counter.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn counter(&self) -> String {
        format!("{} / {}", self.position(), self.count)
    }
}

struct OpenSession<C: PageChrome> {
    index: usize,
    _suppression: ChromeSuppression<C>,
}

/// Lightbox over a fixed number of images.
pub struct Lightbox<C: PageChrome + Clone> {
    len: usize,
    chrome: C,
    session: Option<OpenSession<C>>,
}

impl<C: PageChrome + Clone> Lightbox<C> {
    /// Create a closed viewer over `len` images.
    pub fn new(len: usize, chrome: C) -> Result<Self, LightboxError> {
        if len == 0 {
            return Err(LightboxError::Empty);
        }
        Ok(Self {
            len,
            chrome,
            session: None,
        })
    }

    pub fn image_count(&self) -> usize {
        self.len
    }

    /// The chrome handle this viewer suppresses while open.
    pub fn chrome(&self) -> &C {
        &self.chrome
    }

    pub fn state(&self) -> ViewerState {
        match &self.session {
            Some(session) => ViewerState::Open(session.index),
            None => ViewerState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Whether keyboard events are currently handled.
    pub fn is_listening(&self) -> bool {
        self.session.is_some()
    }

    /// Open the viewer on image `index`.
    pub fn select(&mut self, index: usize) -> Result<(), LightboxError> {
        if index >= self.len {
            return Err(LightboxError::OutOfRange {
                index,
                len: self.len,
            });
        }
        if let Some(session) = &self.session {
            return Err(LightboxError::AlreadyOpen(session.index));
        }
        self.session = Some(OpenSession {
            index,
            _suppression: ChromeSuppression::acquire(self.chrome.clone()),
        });
        tracing::trace!(index, "lightbox opened");
        Ok(())
    }

    pub fn next(&mut self) -> Result<usize, LightboxError> {
        let len = self.len;
        let session = self.session.as_mut().ok_or(LightboxError::NotOpen)?;
        session.index = (session.index + 1) % len;
        Ok(session.index)
    }

    pub fn previous(&mut self) -> Result<usize, LightboxError> {
        let len = self.len;
        let session = self.session.as_mut().ok_or(LightboxError::NotOpen)?;
        session.index = (session.index + len - 1) % len;
        Ok(session.index)
    }

    /// Close the viewer. Returns `false` if it was already closed.
    pub fn dismiss(&mut self, via: Dismissal) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::trace!(index = session.index, ?via, "lightbox dismissed");
                true
            }
            None => false,
        }
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if !self.is_listening() {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::Escape => {
                self.dismiss(Dismissal::Escape);
                KeyOutcome::Dismissed
            }
            Key::ArrowLeft => self
                .previous()
                .map(KeyOutcome::Moved)
                .unwrap_or(KeyOutcome::Ignored),
            Key::ArrowRight => self
                .next()
                .map(KeyOutcome::Moved)
                .unwrap_or(KeyOutcome::Ignored),
            Key::Other => KeyOutcome::Ignored,
        }
    }

    /// The current frame, if open.
    pub fn frame(&self) -> Option<ViewerFrame> {
        self.session.as_ref().map(|session| ViewerFrame {
            index: session.index,
            previous: (session.index + self.len - 1) % self.len,
            next: (session.index + 1) % self.len,
            count: self.len,
        })
    }
}
