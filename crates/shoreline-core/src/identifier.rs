//! Section identifiers backed by string interning.
//!
//! Every content section on the page is addressed by a [`SectionId`]. Ids are
//! interned once and afterwards compared and copied as plain integers, which
//! keeps the navigator's per-batch bookkeeping allocation free.

use std::{
    convert::Infallible,
    fmt,
    str::FromStr,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by all section identifiers.
///
/// # Thread Safety
///
/// Access is serialized through a `Mutex`. A poisoned lock is recovered, since
/// the interner is append-only and cannot be left half-updated.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Opaque identifier of one content section.
///
/// # Examples
///
/// ```
/// use shoreline_core::identifier::SectionId;
///
/// let home = SectionId::new("home");
/// let again: SectionId = "home".into();
///
/// assert_eq!(home, again);
/// assert_eq!(home, "home");
/// assert_eq!(home.to_string(), "home");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(DefaultSymbol);

impl SectionId {
    /// Creates a `SectionId` from its element id.
    ///
    /// Interning the same name twice yields equal ids.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Calls `f` with the string form of this id.
    ///
    /// The interner lock is released before `f` runs, so `f` may create ids.
    pub fn with_name<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let name = interner()
            .resolve(self.0)
            .unwrap_or_default()
            .to_owned();
        f(&name)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_name(|name| f.write_str(name))
    }
}

impl FromStr for SectionId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for SectionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.with_name(|name| name == other)
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
