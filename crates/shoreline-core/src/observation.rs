//! Viewport visibility records and observer configuration.
//!
//! # Overview
//!
//! - [`VisibilityObservation`] - One per-section report produced by a viewport
//!   observer: whether the section intersects the activation band and by how much.
//! - [`ActivationBand`] - The restricted vertical region of the viewport that
//!   counts as "intersecting", expressed as margins relative to viewport height.
//! - [`Thresholds`] - Discrete intersection ratios at which an observer reports
//!   a change.
//! - [`ObserverOptions`] - Band and thresholds bundled for a subscription.
//!
//! The defaults restrict the band to the slice between 40% from the top and
//! 55% from the bottom of the viewport, and report at ratios 0.25, 0.5 and 0.75.

use serde::Deserialize;
use thiserror::Error;

use crate::{geometry::Extent, identifier::SectionId};

/// Errors raised when observer options are out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("threshold {0} is outside the range [0, 1]")]
    ThresholdOutOfRange(f32),

    #[error("activation band margin {0} is outside the range [-1, 1]")]
    MarginOutOfRange(f32),

    #[error("activation band margins {top} and {bottom} leave no visible band")]
    EmptyBand { top: f32, bottom: f32 },
}

/// A per-section report of viewport intersection state.
///
/// The ratio is the share of the section's height that lies inside the
/// activation band. It is always finite and within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityObservation {
    section: SectionId,
    is_intersecting: bool,
    intersection_ratio: f32,
}

impl VisibilityObservation {
    /// Creates an observation, clamping the ratio into `[0, 1]`.
    ///
    /// A non-finite ratio is recorded as zero.
    pub fn new(section: SectionId, is_intersecting: bool, intersection_ratio: f32) -> Self {
        let intersection_ratio = if intersection_ratio.is_finite() {
            intersection_ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            section,
            is_intersecting,
            intersection_ratio,
        }
    }

    /// Shorthand for an intersecting observation with the given ratio.
    pub fn intersecting(section: SectionId, ratio: f32) -> Self {
        Self::new(section, true, ratio)
    }

    /// Shorthand for a non-intersecting observation.
    pub fn hidden(section: SectionId) -> Self {
        Self::new(section, false, 0.0)
    }

    pub fn section(&self) -> SectionId {
        self.section
    }

    pub fn is_intersecting(&self) -> bool {
        self.is_intersecting
    }

    pub fn intersection_ratio(&self) -> f32 {
        self.intersection_ratio
    }
}

#[derive(Deserialize)]
struct RawBand {
    top: f32,
    bottom: f32,
}

/// The vertical slice of the viewport that counts as "intersecting".
///
/// Margins are fractions of the viewport height applied to the top and bottom
/// edges. Negative margins shrink the viewport, positive ones grow it, the same
/// way a CSS root margin of `-40% 0px -55% 0px` does.
///
/// # Examples
///
/// ```
/// # use shoreline_core::{geometry::Extent, observation::ActivationBand};
/// let band = ActivationBand::default();
/// let viewport = Extent::new(1000.0, 800.0);
///
/// let active = band.apply(viewport);
/// assert_eq!(active.top(), 1320.0);
/// assert_eq!(active.bottom(), 1360.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawBand")]
pub struct ActivationBand {
    top: f32,
    bottom: f32,
}

impl ActivationBand {
    /// Creates a band from top and bottom margins.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError`] when a margin lies outside `[-1, 1]` or the
    /// margins together consume the whole viewport.
    pub fn new(top: f32, bottom: f32) -> Result<Self, OptionsError> {
        for margin in [top, bottom] {
            if !(-1.0..=1.0).contains(&margin) {
                return Err(OptionsError::MarginOutOfRange(margin));
            }
        }
        if 1.0 + top + bottom <= 0.0 {
            return Err(OptionsError::EmptyBand { top, bottom });
        }
        Ok(Self { top, bottom })
    }

    /// The whole viewport, with no margins.
    pub fn full() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
        }
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Maps a viewport extent to the activation band inside it.
    pub fn apply(&self, viewport: Extent) -> Extent {
        let height = viewport.height();
        viewport.inset(self.top * height, self.bottom * height)
    }
}

impl Default for ActivationBand {
    fn default() -> Self {
        Self {
            top: -0.40,
            bottom: -0.55,
        }
    }
}

impl TryFrom<RawBand> for ActivationBand {
    type Error = OptionsError;

    fn try_from(raw: RawBand) -> Result<Self, Self::Error> {
        Self::new(raw.top, raw.bottom)
    }
}

/// Sorted, de-duplicated intersection ratios at which changes are reported.
///
/// # Examples
///
/// ```
/// # use shoreline_core::observation::Thresholds;
/// let thresholds = Thresholds::new([0.75, 0.25, 0.5, 0.25]).unwrap();
/// assert_eq!(thresholds.values(), &[0.25, 0.5, 0.75]);
///
/// assert_eq!(thresholds.bucket(0.1), 0);
/// assert_eq!(thresholds.bucket(0.5), 2);
/// assert_eq!(thresholds.bucket(1.0), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f32>")]
pub struct Thresholds(Vec<f32>);

impl Thresholds {
    /// Creates a threshold list.
    ///
    /// An empty list behaves like `[0.0]`: any change in intersection is reported.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::ThresholdOutOfRange`] for values outside `[0, 1]`.
    pub fn new(values: impl IntoIterator<Item = f32>) -> Result<Self, OptionsError> {
        let mut values = values
            .into_iter()
            .map(|value| {
                if (0.0..=1.0).contains(&value) {
                    Ok(value)
                } else {
                    Err(OptionsError::ThresholdOutOfRange(value))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        values.sort_by(f32::total_cmp);
        values.dedup();
        if values.is_empty() {
            values.push(0.0);
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// Returns how many thresholds `ratio` has reached.
    ///
    /// Two ratios in the same bucket are indistinguishable to a subscriber.
    pub fn bucket(&self, ratio: f32) -> usize {
        self.0.iter().take_while(|&&t| ratio >= t).count()
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self(vec![0.25, 0.5, 0.75])
    }
}

impl TryFrom<Vec<f32>> for Thresholds {
    type Error = OptionsError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

/// Options passed to a viewport observer when subscribing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObserverOptions {
    band: ActivationBand,
    thresholds: Thresholds,
}

impl ObserverOptions {
    pub fn new(band: ActivationBand, thresholds: Thresholds) -> Self {
        Self { band, thresholds }
    }

    pub fn band(&self) -> ActivationBand {
        self.band
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}
