//! Configuration types for the Shoreline guide.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from TOML.
//! Every section and field is optional and falls back to the defaults below.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`NavigationConfig`] - Activation band, reporting thresholds and pin timeout
//!   used by the [`Navigator`](crate::navigator::Navigator).
//! - [`ViewportConfig`] - Viewport size, scroll animation timing and section
//!   heights for the [`SimulatedViewport`](crate::viewport::SimulatedViewport).
//! - [`StorageConfig`] - Where persisted values live.
//!
//! # Example
//!
//! ```
//! # use shoreline::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [navigation]
//!     activation_band = { top = -0.3, bottom = -0.6 }
//!     thresholds = [0.1, 0.5, 0.9]
//!     pin_timeout_ms = 900
//! "#).unwrap();
//!
//! assert_eq!(config.navigation().thresholds().values(), &[0.1, 0.5, 0.9]);
//! assert_eq!(config.viewport().height(), 800.0);
//! ```

use std::{path::PathBuf, time::Duration};

use indexmap::IndexMap;
use serde::Deserialize;

use shoreline_core::observation::{ActivationBand, ObserverOptions, Thresholds};

/// Top-level configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    navigation: NavigationConfig,

    #[serde(default)]
    viewport: ViewportConfig,

    #[serde(default)]
    storage: StorageConfig,
}

impl AppConfig {
    pub fn new(
        navigation: NavigationConfig,
        viewport: ViewportConfig,
        storage: StorageConfig,
    ) -> Self {
        Self {
            navigation,
            viewport,
            storage,
        }
    }

    pub fn navigation(&self) -> &NavigationConfig {
        &self.navigation
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Replaces the storage directory, e.g. from a command-line override.
    pub fn with_storage_dir(mut self, dir: PathBuf) -> Self {
        self.storage.dir = Some(dir);
        self
    }
}

fn default_pin_timeout_ms() -> u64 {
    1500
}

/// Settings for active-section tracking.
///
/// The band and thresholds are tuning constants: a narrow band keeps adjacent
/// sections from both reporting high overlap near a boundary, and several
/// thresholds make the "highest ratio wins" rule meaningful.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    activation_band: ActivationBand,

    #[serde(default)]
    thresholds: Thresholds,

    /// How long a navigation target holds the active section after a menu
    /// click. Should exceed the smooth scroll duration.
    #[serde(default = "default_pin_timeout_ms")]
    pin_timeout_ms: u64,
}

impl NavigationConfig {
    pub fn new(
        activation_band: ActivationBand,
        thresholds: Thresholds,
        pin_timeout: Duration,
    ) -> Self {
        Self {
            activation_band,
            thresholds,
            pin_timeout_ms: u64::try_from(pin_timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn activation_band(&self) -> ActivationBand {
        self.activation_band
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn pin_timeout(&self) -> Duration {
        Duration::from_millis(self.pin_timeout_ms)
    }

    /// Options handed to the viewport observer on subscription.
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions::new(self.activation_band, self.thresholds.clone())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            activation_band: ActivationBand::default(),
            thresholds: Thresholds::default(),
            pin_timeout_ms: default_pin_timeout_ms(),
        }
    }
}

fn default_viewport_height() -> f32 {
    800.0
}

fn default_scroll_duration_ms() -> u64 {
    600
}

fn default_frame_ms() -> u64 {
    16
}

/// Settings for the simulated viewport.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_height")]
    height: f32,

    #[serde(default = "default_scroll_duration_ms")]
    scroll_duration_ms: u64,

    #[serde(default = "default_frame_ms")]
    frame_ms: u64,

    /// Rendered height of each section keyed by section id, in document order.
    /// Empty means the built-in site layout.
    #[serde(default)]
    section_heights: IndexMap<String, f32>,
}

impl ViewportConfig {
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }

    /// Duration of one animation frame; never zero.
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    pub fn section_heights(&self) -> &IndexMap<String, f32> {
        &self.section_heights
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn with_section_heights(mut self, heights: IndexMap<String, f32>) -> Self {
        self.section_heights = heights;
        self
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            height: default_viewport_height(),
            scroll_duration_ms: default_scroll_duration_ms(),
            frame_ms: default_frame_ms(),
            section_heights: IndexMap::new(),
        }
    }
}

/// Settings for persisted values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory holding persisted values. `None` lets the caller pick a
    /// platform default.
    #[serde(default)]
    dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn dir(&self) -> Option<&PathBuf> {
        self.dir.as_ref()
    }
}
