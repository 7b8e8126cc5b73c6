//! RSVP form.
//!
//! Two fields, a name and an attendance flag (checked by default). Submitting
//! hands the entry to an [`RsvpSink`] and moves the form to a terminal
//! `Submitted` state; there is no way back short of reloading the page.
//! Nothing is persisted: the default sink only emits a log event.

use crate::locale::Catalog;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsvpError {
    #[error("name is required")]
    EmptyName,
    #[error("form has already been submitted")]
    AlreadySubmitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpEntry {
    pub name: String,
    pub attending: bool,
}

/// Receiver of submitted entries.
pub trait RsvpSink {
    fn record(&mut self, entry: &RsvpEntry);
}

/// Emits each entry as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl RsvpSink for LogSink {
    fn record(&mut self, entry: &RsvpEntry) {
        tracing::info!(name = %entry.name, attending = entry.attending, "RSVP");
    }
}

impl RsvpSink for Vec<RsvpEntry> {
    fn record(&mut self, entry: &RsvpEntry) {
        self.push(entry.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsvpForm {
    Editing { name: String, attending: bool },
    Submitted(RsvpEntry),
}

impl Default for RsvpForm {
    fn default() -> Self {
        RsvpForm::Editing {
            name: String::new(),
            attending: true,
        }
    }
}

impl RsvpForm {
    pub fn set_name(&mut self, value: impl Into<String>) {
        if let RsvpForm::Editing { name, .. } = self {
            *name = value.into();
        }
    }

    pub fn set_attending(&mut self, value: bool) {
        if let RsvpForm::Editing { attending, .. } = self {
            *attending = value;
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, RsvpForm::Submitted(_))
    }

    /// Submit the form, reporting the entry to `sink`.
    ///
    /// A blank name is refused, mirroring the name input's `required` and
    /// `pattern` attributes.
    pub fn submit(&mut self, sink: &mut dyn RsvpSink) -> Result<RsvpEntry, RsvpError> {
        let entry = match self {
            RsvpForm::Submitted(_) => return Err(RsvpError::AlreadySubmitted),
            RsvpForm::Editing { name, .. } if name.trim().is_empty() => {
                return Err(RsvpError::EmptyName);
            }
            RsvpForm::Editing { name, attending } => RsvpEntry {
                name: name.clone(),
                attending: *attending,
            },
        };
        sink.record(&entry);
        *self = RsvpForm::Submitted(entry.clone());
        Ok(entry)
    }
}

/// Acknowledgement text shown once the form is submitted.
pub fn acknowledgement(catalog: &Catalog, entry: &RsvpEntry) -> String {
    catalog.t_with("rsvp.thankYou", &[("name", entry.name.as_str())])
}
