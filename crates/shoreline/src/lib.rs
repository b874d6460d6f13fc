//! Shoreline - a single-page guide to the world's most beautiful beaches.
//!
//! The heart of the crate is the [`navigator`]: it keeps the menu's active
//! section in step with what the visitor is looking at, using visibility
//! reports from a viewport observer and pinning the target of a menu click
//! while the smooth scroll toward it runs. Around it sit the page's
//! other behaviors: the gallery modal, visitor feedback and the visit counter,
//! the footer ticker and the document export.
//!
//! [`viewport::SimulatedViewport`] stands in for a browser so the navigator can
//! be driven end to end; [`tour::Tour`] wires the two together.
//!
//! # Examples
//!
//! ```
//! use shoreline::{catalog, config::AppConfig, identifier::SectionId, tour::{Tour, TourStep}};
//!
//! let mut tour = Tour::new(&AppConfig::default(), catalog::section_ids());
//! assert_eq!(tour.active_section(), Some(SectionId::new("home")));
//!
//! let stop = tour.step(TourStep::Navigate(SectionId::new("about")));
//! assert_eq!(stop.active(), Some(SectionId::new("about")));
//! ```

pub mod clock;
pub mod config;
pub mod export;
pub mod feedback;
pub mod gallery;
pub mod navigator;
pub mod storage;
pub mod ticker;
pub mod tour;
pub mod viewport;

mod error;

pub use shoreline_core::{catalog, geometry, identifier, observation};

pub use error::ShorelineError;
