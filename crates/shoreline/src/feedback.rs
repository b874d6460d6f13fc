//! Visitor feedback and the visit counter.
//!
//! Feedback entries are kept newest first under [`FEEDBACK_KEY`]; the page shows
//! the [`RECENT_LIMIT`] most recent. The visit counter lives under
//! [`VISITS_KEY`] and is bumped once per page view.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::ShorelineError,
    storage::{self, KeyValueStore},
};

pub const FEEDBACK_KEY: &str = "bb_feedback";
pub const VISITS_KEY: &str = "bb_visits";

/// How many entries the "Recent feedback" list shows.
pub const RECENT_LIMIT: usize = 5;

/// Reasons a feedback form is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("the {0} field is required")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// A submitted feedback form as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    name: String,
    email: String,
    message: String,
    /// Submission time in Unix milliseconds.
    ts: i64,
}

impl FeedbackEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.ts)
    }
}

/// The feedback form's fields before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FeedbackForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Validates the form and stamps it with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError`] when a field is blank or the email is malformed.
    pub fn into_entry(self, now: DateTime<Utc>) -> Result<FeedbackEntry, FeedbackError> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        let message = required("message", &self.message)?;
        if !is_email(email) {
            return Err(FeedbackError::InvalidEmail(email.to_string()));
        }

        Ok(FeedbackEntry {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            ts: now.timestamp_millis(),
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FeedbackError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FeedbackError::MissingField(field));
    }
    Ok(value)
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}

/// The persisted feedback list.
#[derive(Debug)]
pub struct FeedbackBook<S: KeyValueStore> {
    store: S,
    entries: Vec<FeedbackEntry>,
}

impl<S: KeyValueStore> FeedbackBook<S> {
    /// Loads existing entries; a missing or corrupt list starts empty.
    pub fn open(store: S) -> Self {
        let entries = storage::load_or(&store, FEEDBACK_KEY, Vec::new());
        Self { store, entries }
    }

    /// Validates `form`, prepends it and persists the list.
    ///
    /// # Errors
    ///
    /// Returns [`ShorelineError::Feedback`] for an invalid form and
    /// [`ShorelineError::Storage`] when the list cannot be saved. Nothing
    /// changes in either case.
    pub fn submit(
        &mut self,
        form: FeedbackForm,
        now: DateTime<Utc>,
    ) -> Result<&FeedbackEntry, ShorelineError> {
        let entry = form.into_entry(now)?;

        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(entry);
        entries.extend(self.entries.iter().cloned());
        storage::save(&mut self.store, FEEDBACK_KEY, &entries)?;

        info!(count = entries.len(); "Feedback stored");
        self.entries = entries;
        Ok(&self.entries[0])
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    /// The entries shown under "Recent feedback".
    pub fn recent(&self) -> &[FeedbackEntry] {
        &self.entries[..self.entries.len().min(RECENT_LIMIT)]
    }
}

/// Counts one more page view and returns the new total.
///
/// # Errors
///
/// Returns [`ShorelineError::Storage`] when the counter cannot be saved.
pub fn record_visit<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<u64, ShorelineError> {
    let visits = storage::load_or(&*store, VISITS_KEY, 0u64).saturating_add(1);
    storage::save(store, VISITS_KEY, &visits)?;
    Ok(visits)
}

/// The current visit total without counting a visit.
pub fn visit_count<S: KeyValueStore + ?Sized>(store: &S) -> u64 {
    storage::load_or(store, VISITS_KEY, 0u64)
}
