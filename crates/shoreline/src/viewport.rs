//! A simulated page viewport.
//!
//! [`SimulatedViewport`] stands in for the browser: it lays the page's sections
//! out vertically, keeps a scroll position, animates smooth scrolls frame by
//! frame, and reports visibility changes the way an intersection observer does.
//! It implements all three navigator collaborators ([`ViewportObserver`],
//! [`ScrollTo`] and [`Clock`]), so one viewport can drive a [`Navigator`]
//! end to end without a browser.
//!
//! # Reporting rules
//!
//! For every subscription, each tracked section is measured against the
//! activation band (the viewport shrunk by the subscription's band margins).
//! The ratio is the share of the section's height inside the band. A section
//! is reported when it is first observed and afterwards only when its
//! intersecting flag flips or its ratio moves into a different threshold
//! bucket. Sections missing from the layout are never reported.
//!
//! Reports are queued as [`Delivery`] values and handed out by [`tick`],
//! [`scroll_to`], [`settle`] and [`drain`]; the caller forwards them to the
//! navigator.
//!
//! [`Navigator`]: crate::navigator::Navigator
//! [`tick`]: SimulatedViewport::tick
//! [`scroll_to`]: SimulatedViewport::scroll_to
//! [`settle`]: SimulatedViewport::settle
//! [`drain`]: SimulatedViewport::drain

use std::{cell::RefCell, collections::HashMap, mem, rc::Rc, time::Duration};

use log::{debug, trace};

use shoreline_core::{
    geometry::Extent,
    identifier::SectionId,
    observation::{ObserverOptions, VisibilityObservation},
};

use crate::{
    clock::Clock,
    config::ViewportConfig,
    navigator::{
        ObserverUnavailable, ScrollBehavior, ScrollTo, SubscriptionHandle, ViewportObserver,
    },
};

/// Rendered heights of the site's sections at an 800px tall viewport.
const SITE_HEIGHTS: &[(&str, f32)] = &[
    ("home", 528.0),
    ("gallery", 700.0),
    ("zones", 900.0),
    ("ads", 420.0),
    ("feedback", 760.0),
    ("about", 380.0),
    ("contact", 400.0),
    ("sitemap", 260.0),
];

/// Sections stacked top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    sections: Vec<(SectionId, Extent)>,
}

impl PageLayout {
    /// Stacks sections in the given order with the given heights.
    pub fn stacked(heights: impl IntoIterator<Item = (SectionId, f32)>) -> Self {
        let mut top = 0.0;
        let sections = heights
            .into_iter()
            .map(|(id, height)| {
                let extent = Extent::new(top, height);
                top = extent.bottom();
                (id, extent)
            })
            .collect();
        Self { sections }
    }

    /// The built-in layout of the guide's eight sections.
    pub fn site_default() -> Self {
        Self::stacked(
            SITE_HEIGHTS
                .iter()
                .map(|&(name, height)| (SectionId::new(name), height)),
        )
    }

    /// The configured section heights, or the built-in layout when none are set.
    pub fn from_config(config: &ViewportConfig) -> Self {
        if config.section_heights().is_empty() {
            return Self::site_default();
        }
        Self::stacked(
            config
                .section_heights()
                .iter()
                .map(|(name, &height)| (SectionId::new(name), height)),
        )
    }

    pub fn extent(&self, section: SectionId) -> Option<Extent> {
        self.sections
            .iter()
            .find(|(id, _)| *id == section)
            .map(|(_, extent)| *extent)
    }

    /// Total document height.
    pub fn height(&self) -> f32 {
        self.sections
            .last()
            .map_or(0.0, |(_, extent)| extent.bottom())
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections.iter().map(|(id, _)| *id)
    }
}

/// One observer callback: the changed observations of a subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    handle: SubscriptionHandle,
    observations: Vec<VisibilityObservation>,
}

impl Delivery {
    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }

    pub fn observations(&self) -> &[VisibilityObservation] {
        &self.observations
    }
}

#[derive(Debug)]
struct Subscription {
    handle: SubscriptionHandle,
    targets: Vec<SectionId>,
    options: ObserverOptions,
    /// Last reported (intersecting, threshold bucket) per target.
    reported: HashMap<SectionId, (bool, usize)>,
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f32,
    to: f32,
    start: Duration,
    duration: Duration,
}

impl Animation {
    /// Position at `now` and whether the animation has finished.
    fn position(&self, now: Duration) -> (f32, bool) {
        let elapsed = now.saturating_sub(self.start).as_secs_f32();
        let total = self.duration.as_secs_f32();
        let t = if total > 0.0 { (elapsed / total).min(1.0) } else { 1.0 };
        if t >= 1.0 {
            return (self.to, true);
        }
        (self.from + (self.to - self.from) * ease_in_out(t), false)
    }
}

/// Cubic ease-in-out over `t` in `[0, 1]`.
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug)]
struct ViewportState {
    layout: PageLayout,
    height: f32,
    scroll_top: f32,
    now: Duration,
    frame: Duration,
    scroll_duration: Duration,
    available: bool,
    next_handle: u64,
    subscriptions: Vec<Subscription>,
    animation: Option<Animation>,
    pending: Vec<Delivery>,
    subscribe_calls: usize,
    unsubscribe_calls: usize,
}

impl ViewportState {
    fn max_scroll(&self) -> f32 {
        (self.layout.height() - self.height).max(0.0)
    }

    fn set_scroll_top(&mut self, y: f32) {
        self.scroll_top = y.clamp(0.0, self.max_scroll());
        self.observe();
    }

    /// Measures every subscription and queues the changes.
    fn observe(&mut self) {
        let viewport = Extent::new(self.scroll_top, self.height);
        for subscription in &mut self.subscriptions {
            let band = subscription.options.band().apply(viewport);
            let mut observations = Vec::new();

            for &target in &subscription.targets {
                let Some(extent) = self.layout.extent(target) else {
                    continue;
                };
                let observation = measure(target, extent, band);
                let bucket = if observation.is_intersecting() {
                    subscription
                        .options
                        .thresholds()
                        .bucket(observation.intersection_ratio())
                } else {
                    0
                };
                let state = (observation.is_intersecting(), bucket);
                if subscription.reported.insert(target, state) != Some(state) {
                    observations.push(observation);
                }
            }

            if !observations.is_empty() {
                trace!(
                    subscription = subscription.handle.to_string(),
                    changed = observations.len();
                    "Queueing observations"
                );
                self.pending.push(Delivery {
                    handle: subscription.handle,
                    observations,
                });
            }
        }
    }
}

fn measure(target: SectionId, extent: Extent, band: Extent) -> VisibilityObservation {
    match extent.intersect(band) {
        Some(overlap) if extent.height() > 0.0 => {
            VisibilityObservation::intersecting(target, overlap.height() / extent.height())
        }
        Some(_) => VisibilityObservation::intersecting(target, 1.0),
        None => VisibilityObservation::hidden(target),
    }
}

/// Shared handle to a simulated browser viewport.
///
/// Clones refer to the same viewport, so one clone can be handed to a
/// navigator as observer, another as scroller and a third as clock, while the
/// caller keeps one to drive time and scrolling.
#[derive(Debug, Clone)]
pub struct SimulatedViewport {
    state: Rc<RefCell<ViewportState>>,
}

impl SimulatedViewport {
    /// Creates a viewport scrolled to the top of `layout`.
    pub fn new(layout: PageLayout, config: &ViewportConfig) -> Self {
        let state = ViewportState {
            layout,
            height: config.height().max(0.0),
            scroll_top: 0.0,
            now: Duration::ZERO,
            frame: config.frame(),
            scroll_duration: config.scroll_duration(),
            available: true,
            next_handle: 0,
            subscriptions: Vec::new(),
            animation: None,
            pending: Vec::new(),
            subscribe_calls: 0,
            unsubscribe_calls: 0,
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Creates a viewport whose observer capability is missing.
    ///
    /// Scrolling still works; subscribing fails with [`ObserverUnavailable`].
    pub fn unavailable(layout: PageLayout, config: &ViewportConfig) -> Self {
        let viewport = Self::new(layout, config);
        viewport.state.borrow_mut().available = false;
        viewport
    }

    pub fn scroll_top(&self) -> f32 {
        self.state.borrow().scroll_top
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().animation.is_some()
    }

    /// Scrolls immediately to `y`, as a user would with the wheel.
    ///
    /// Cancels any running smooth scroll. Returns all queued deliveries.
    pub fn scroll_to(&self, y: f32) -> Vec<Delivery> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        state.animation = None;
        state.set_scroll_top(y);
        mem::take(&mut state.pending)
    }

    /// Advances time by one frame. Returns all queued deliveries.
    pub fn tick(&self) -> Vec<Delivery> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        state.now += state.frame;
        if let Some(animation) = state.animation {
            let (position, finished) = animation.position(state.now);
            if finished {
                state.animation = None;
            }
            state.set_scroll_top(position);
        }
        mem::take(&mut state.pending)
    }

    /// Runs frames until no smooth scroll is in progress.
    ///
    /// Returns every delivery produced on the way, oldest first, starting with
    /// any that were already queued.
    pub fn settle(&self) -> Vec<Delivery> {
        let mut deliveries = self.drain();
        while self.is_animating() {
            deliveries.extend(self.tick());
        }
        deliveries
    }

    /// Takes the deliveries queued so far without advancing time.
    pub fn drain(&self) -> Vec<Delivery> {
        mem::take(&mut self.state.borrow_mut().pending)
    }

    /// Number of subscriptions currently live.
    pub fn live_subscriptions(&self) -> usize {
        self.state.borrow().subscriptions.len()
    }

    /// Sections tracked by each live subscription.
    pub fn tracked_sections(&self) -> Vec<Vec<SectionId>> {
        self.state
            .borrow()
            .subscriptions
            .iter()
            .map(|subscription| subscription.targets.clone())
            .collect()
    }

    pub fn subscribe_calls(&self) -> usize {
        self.state.borrow().subscribe_calls
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.state.borrow().unsubscribe_calls
    }
}

impl ViewportObserver for SimulatedViewport {
    fn subscribe(
        &mut self,
        targets: &[SectionId],
        options: &ObserverOptions,
    ) -> Result<SubscriptionHandle, ObserverUnavailable> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if !state.available {
            return Err(ObserverUnavailable::new("viewport observation is not supported"));
        }

        state.subscribe_calls += 1;
        state.next_handle += 1;
        let handle = SubscriptionHandle::new(state.next_handle);
        state.subscriptions.push(Subscription {
            handle,
            targets: targets.to_vec(),
            options: options.clone(),
            reported: HashMap::new(),
        });
        debug!(subscription = handle.to_string(), targets = targets.len(); "Subscribed");

        // Like the browser primitive, every target is reported once up front.
        state.observe();
        Ok(handle)
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        state.unsubscribe_calls += 1;
        state.subscriptions.retain(|subscription| subscription.handle != handle);
        state.pending.retain(|delivery| delivery.handle != handle);
        debug!(subscription = handle.to_string(); "Unsubscribed");
    }
}

impl ScrollTo for SimulatedViewport {
    fn scroll_into_view(&mut self, section: SectionId, behavior: ScrollBehavior) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let Some(extent) = state.layout.extent(section) else {
            debug!(section = section.to_string(); "No element to scroll to");
            return;
        };

        let to = extent.top().clamp(0.0, state.max_scroll());
        let smooth = behavior == ScrollBehavior::Smooth && !state.scroll_duration.is_zero();
        if !smooth || to == state.scroll_top {
            state.animation = None;
            state.set_scroll_top(to);
            return;
        }

        trace!(section = section.to_string(), from = state.scroll_top, to = to; "Smooth scroll");
        state.animation = Some(Animation {
            from: state.scroll_top,
            to,
            start: state.now,
            duration: state.scroll_duration,
        });
    }
}

impl Clock for SimulatedViewport {
    fn now(&self) -> Duration {
        self.state.borrow().now
    }
}
