//! Scripted walks through the page.
//!
//! A [`Tour`] wires a [`Navigator`] to a [`SimulatedViewport`] and plays a
//! list of [`TourStep`]s: menu navigations and user scrolls. A user scroll
//! cancels any smooth scroll in flight and any pending navigation pin. After
//! each step the tour lets motion settle, forwarding every visibility report to
//! the navigator frame by frame, and records which section ended up highlighted.

use std::{fmt, str::FromStr};

use log::{debug, info};
use thiserror::Error;

use shoreline_core::identifier::SectionId;

use crate::{
    config::AppConfig,
    navigator::Navigator,
    viewport::{Delivery, PageLayout, SimulatedViewport},
};

/// Error returned when a tour step cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tour step '{0}': expected a section id or '@<offset>'")]
pub struct ParseStepError(String);

/// One scripted interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TourStep {
    /// Click the menu entry for a section.
    Navigate(SectionId),
    /// Scroll the page to an absolute offset in pixels.
    Scroll(f32),
}

impl fmt::Display for TourStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate(section) => write!(f, "{section}"),
            Self::Scroll(y) => write!(f, "@{y}"),
        }
    }
}

/// Parses `zones` as a navigation and `@1200` as a scroll.
impl FromStr for TourStep {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(offset) = s.strip_prefix('@') {
            return match offset.trim().parse::<f32>() {
                Ok(y) if y.is_finite() => Ok(Self::Scroll(y)),
                _ => Err(ParseStepError(s.to_string())),
            };
        }
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(ParseStepError(s.to_string()));
        }
        Ok(Self::Navigate(SectionId::new(s)))
    }
}

/// Where the page came to rest after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourStop {
    step: TourStep,
    scroll_top: f32,
    active: Option<SectionId>,
}

impl TourStop {
    pub fn step(&self) -> TourStep {
        self.step
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn active(&self) -> Option<SectionId> {
        self.active
    }
}

type SiteNavigator = Navigator<SimulatedViewport, SimulatedViewport, SimulatedViewport>;

/// A navigator observing a simulated page.
#[derive(Debug)]
pub struct Tour {
    viewport: SimulatedViewport,
    navigator: SiteNavigator,
}

impl Tour {
    /// Lays out the page from `config` and starts tracking `sections`.
    pub fn new(config: &AppConfig, sections: impl IntoIterator<Item = SectionId>) -> Self {
        let viewport = SimulatedViewport::new(
            PageLayout::from_config(config.viewport()),
            config.viewport(),
        );
        Self::with_viewport(viewport, config, sections)
    }

    /// Uses an existing viewport, e.g. one built with
    /// [`SimulatedViewport::unavailable`].
    pub fn with_viewport(
        viewport: SimulatedViewport,
        config: &AppConfig,
        sections: impl IntoIterator<Item = SectionId>,
    ) -> Self {
        let navigator = Navigator::new(
            viewport.clone(),
            viewport.clone(),
            viewport.clone(),
            config.navigation(),
        );
        let mut tour = Self {
            viewport,
            navigator,
        };
        tour.navigator.initialize(sections);
        tour.settle();
        tour
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.navigator.active_section()
    }

    pub fn viewport(&self) -> &SimulatedViewport {
        &self.viewport
    }

    pub fn navigator(&self) -> &SiteNavigator {
        &self.navigator
    }

    /// Performs `step` and waits for the page to come to rest.
    pub fn step(&mut self, step: TourStep) -> TourStop {
        debug!(step = step.to_string(); "Tour step");
        match step {
            TourStep::Navigate(section) => self.navigator.navigate_to(section),
            TourStep::Scroll(y) => {
                self.navigator.user_scrolled();
                let deliveries = self.viewport.scroll_to(y);
                self.forward(deliveries);
            }
        }
        self.settle();

        let stop = TourStop {
            step,
            scroll_top: self.viewport.scroll_top(),
            active: self.navigator.active_section(),
        };
        info!(
            step = step.to_string(),
            scroll_top = stop.scroll_top,
            active = stop.active.map(|id| id.to_string());
            "Tour stop"
        );
        stop
    }

    /// Plays every step in order.
    pub fn run(&mut self, steps: impl IntoIterator<Item = TourStep>) -> Vec<TourStop> {
        steps.into_iter().map(|step| self.step(step)).collect()
    }

    /// Detaches the navigator from the viewport.
    pub fn finish(mut self) {
        self.navigator.teardown();
    }

    fn settle(&mut self) {
        loop {
            let deliveries = self.viewport.drain();
            self.forward(deliveries);
            if !self.viewport.is_animating() {
                break;
            }
            let deliveries = self.viewport.tick();
            self.forward(deliveries);
        }
    }

    fn forward(&mut self, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            self.navigator
                .deliver(delivery.handle(), delivery.observations());
        }
    }
}
