//! Active-section tracking.
//!
//! The [`Navigator`] owns the one piece of shared UI state on the page: which
//! section is currently "in focus". Two independent signals feed it:
//!
//! - **Explicit navigation** ([`Navigator::navigate_to`]): the user picks a
//!   section from the menu. The active section changes immediately and a smooth
//!   scroll toward the section is requested.
//! - **Passive scrolling** ([`Navigator::deliver`]): a viewport observer reports
//!   batches of [`VisibilityObservation`]s. The intersecting section with the
//!   highest ratio wins; ties go to the section registered first; an empty
//!   batch changes nothing.
//!
//! A smooth scroll passes over intermediate sections, and the observer reports
//! each of them on the way. To keep those reports from overwriting the
//! optimistic update, `navigate_to` *pins* its target for the configured pin
//! window and batches are ignored while it holds. A batch reporting the target
//! as intersecting confirms it but does not release it: a short section can
//! pass through the activation band and out again before the scroll stops, and
//! the section that follows must not take over. The pin lapses once the window
//! has elapsed, is replaced by a newer `navigate_to`, and is dropped by
//! [`Navigator::user_scrolled`] and [`Navigator::teardown`].
//!
//! # Collaborators
//!
//! ```text
//!   content store ──section ids──► Navigator ──scroll_into_view──► ScrollTo
//!                                    ▲   │
//!        ViewportObserver ──batches──┘   └──active_section()──► UI
//! ```
//!
//! Observers do not call back into the navigator. The host event loop receives
//! batches tagged with a [`SubscriptionHandle`] and forwards them through
//! `deliver`; batches carrying a stale handle are dropped, which is what makes
//! teardown and re-initialization safe against late deliveries.

use std::{fmt, time::Duration};

use indexmap::IndexSet;
use log::{debug, info, trace, warn};
use thiserror::Error;

use shoreline_core::{
    identifier::SectionId,
    observation::{ObserverOptions, VisibilityObservation},
};

use crate::{clock::Clock, config::NavigationConfig};

/// Identifies one live observer subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The viewport observer capability is missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("viewport observer unavailable: {reason}")]
pub struct ObserverUnavailable {
    reason: String,
}

impl ObserverUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Reports which tracked sections intersect the viewport's activation band.
pub trait ViewportObserver {
    /// Starts tracking `targets`.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverUnavailable`] when the environment cannot observe the
    /// viewport at all.
    fn subscribe(
        &mut self,
        targets: &[SectionId],
        options: &ObserverOptions,
    ) -> Result<SubscriptionHandle, ObserverUnavailable>;

    /// Stops a subscription. Unknown handles are ignored.
    fn unsubscribe(&mut self, handle: SubscriptionHandle);
}

/// How a scroll request moves the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Scrolls a section into view. Fire-and-forget: no completion is reported.
pub trait ScrollTo {
    fn scroll_into_view(&mut self, section: SectionId, behavior: ScrollBehavior);
}

#[derive(Debug, Clone, Copy)]
struct Pin {
    target: SectionId,
    since: Duration,
    confirmed: bool,
}

/// Owner of the active section.
///
/// # Examples
///
/// ```
/// # use shoreline::{clock::ManualClock, config::NavigationConfig, navigator::Navigator};
/// # use shoreline::viewport::{PageLayout, SimulatedViewport};
/// # use shoreline::config::ViewportConfig;
/// # use shoreline_core::identifier::SectionId;
/// let ids = ["home", "gallery", "zones"].map(SectionId::new);
/// let layout = PageLayout::stacked(ids.iter().map(|&id| (id, 900.0)));
/// let viewport = SimulatedViewport::new(layout, &ViewportConfig::default());
///
/// let mut navigator = Navigator::new(
///     viewport.clone(),
///     viewport.clone(),
///     viewport.clone(),
///     &NavigationConfig::default(),
/// );
/// navigator.initialize(ids);
/// assert_eq!(navigator.active_section(), Some(ids[0]));
///
/// navigator.navigate_to(ids[2]);
/// assert_eq!(navigator.active_section(), Some(ids[2]));
///
/// for delivery in viewport.settle() {
///     navigator.deliver(delivery.handle(), delivery.observations());
/// }
/// assert_eq!(navigator.active_section(), Some(ids[2]));
/// ```
pub struct Navigator<O, S, C>
where
    O: ViewportObserver,
    S: ScrollTo,
    C: Clock,
{
    observer: O,
    scroller: S,
    clock: C,
    options: ObserverOptions,
    pin_timeout: Duration,
    sections: IndexSet<SectionId>,
    active: Option<SectionId>,
    subscription: Option<SubscriptionHandle>,
    pin: Option<Pin>,
}

impl<O, S, C> Navigator<O, S, C>
where
    O: ViewportObserver,
    S: ScrollTo,
    C: Clock,
{
    /// Creates a navigator with no registered sections.
    ///
    /// Nothing is observed until [`initialize`](Self::initialize) is called.
    pub fn new(observer: O, scroller: S, clock: C, config: &NavigationConfig) -> Self {
        Self {
            observer,
            scroller,
            clock,
            options: config.observer_options(),
            pin_timeout: config.pin_timeout(),
            sections: IndexSet::new(),
            active: None,
            subscription: None,
            pin: None,
        }
    }

    /// Registers the sections to track, in document order, and subscribes to
    /// the viewport observer.
    ///
    /// Duplicate ids keep their first position. Calling this again releases the
    /// previous subscription before creating the new one. The active section is
    /// kept when it is still registered and otherwise reset to the first section.
    ///
    /// If the observer is unavailable the navigator keeps working for explicit
    /// navigation only.
    pub fn initialize(&mut self, sections: impl IntoIterator<Item = SectionId>) {
        if self.subscription.is_some() {
            debug!("Navigator already initialized, releasing previous subscription");
        }
        self.release();

        self.sections = sections.into_iter().collect();
        self.active = match self.active {
            Some(current) if self.sections.contains(&current) => Some(current),
            _ => self.sections.first().copied(),
        };

        if self.sections.is_empty() {
            debug!("No sections registered, nothing to observe");
            return;
        }

        let targets: Vec<SectionId> = self.sections.iter().copied().collect();
        match self.observer.subscribe(&targets, &self.options) {
            Ok(handle) => {
                info!(
                    subscription = handle.to_string(),
                    sections = targets.len();
                    "Tracking sections"
                );
                self.subscription = Some(handle);
            }
            Err(err) => {
                warn!(
                    error = err.to_string();
                    "Scroll tracking disabled, explicit navigation only"
                );
            }
        }
    }

    /// Releases the observer subscription and forgets any pinned target.
    ///
    /// Safe to call repeatedly and before `initialize`. Batches delivered
    /// afterwards are ignored.
    pub fn teardown(&mut self) {
        if self.subscription.is_some() {
            info!("Navigator torn down");
        }
        self.release();
    }

    /// Makes `target` active and scrolls it into view.
    ///
    /// Unregistered ids are ignored.
    pub fn navigate_to(&mut self, target: SectionId) {
        if !self.sections.contains(&target) {
            warn!(section = target.to_string(); "Ignoring navigation to unregistered section");
            return;
        }

        debug!(section = target.to_string(); "Navigating");
        self.active = Some(target);
        if self.subscription.is_some() {
            self.pin = Some(Pin {
                target,
                since: self.clock.now(),
                confirmed: false,
            });
        }
        self.scroller.scroll_into_view(target, ScrollBehavior::Smooth);
    }

    /// Processes one batch of observations from the subscription `handle`.
    pub fn deliver(&mut self, handle: SubscriptionHandle, batch: &[VisibilityObservation]) {
        if self.subscription != Some(handle) {
            trace!(subscription = handle.to_string(); "Dropping batch from stale subscription");
            return;
        }
        trace!(batch:?; "Observation batch");

        if let Some(pin) = self.pin {
            if !self.holds(pin) {
                debug!(section = pin.target.to_string(); "Navigation pin expired");
                self.pin = None;
            } else if !pin.confirmed
                && batch
                    .iter()
                    .any(|obs| obs.section() == pin.target && obs.is_intersecting())
            {
                debug!(section = pin.target.to_string(); "Navigation target confirmed");
                self.pin = Some(Pin {
                    confirmed: true,
                    ..pin
                });
                return;
            } else {
                trace!(section = pin.target.to_string(); "Batch ignored while pinned");
                return;
            }
        }

        let Some(winner) = self.select(batch) else {
            return;
        };
        if self.active != Some(winner) {
            debug!(section = winner.to_string(); "Active section changed");
            self.active = Some(winner);
        }
    }

    /// The user moved the page themselves.
    ///
    /// Drops the pending navigation pin so the batches caused by the user's
    /// scroll are reconciled normally. Call before forwarding those batches.
    pub fn user_scrolled(&mut self) {
        if let Some(pin) = self.pin.take() {
            debug!(section = pin.target.to_string(); "Navigation pin dropped by user scroll");
        }
    }

    /// The section currently in focus, or `None` before initialization.
    pub fn active_section(&self) -> Option<SectionId> {
        self.active
    }

    /// Registered sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections.iter().copied()
    }

    /// Whether scroll tracking is live.
    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }

    /// The navigation target holding the active section, if its pin window
    /// has not elapsed yet.
    pub fn pinned_target(&self) -> Option<SectionId> {
        self.pin.filter(|&pin| self.holds(pin)).map(|pin| pin.target)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn scroller(&self) -> &S {
        &self.scroller
    }

    /// Highest intersecting ratio wins; ties go to the earliest registered
    /// section. Observations for unregistered sections are skipped.
    fn select(&self, batch: &[VisibilityObservation]) -> Option<SectionId> {
        batch
            .iter()
            .filter(|obs| obs.is_intersecting())
            .filter_map(|obs| {
                self.sections
                    .get_index_of(&obs.section())
                    .map(|index| (index, obs.intersection_ratio()))
            })
            .min_by(|(index_a, ratio_a), (index_b, ratio_b)| {
                ratio_b.total_cmp(ratio_a).then(index_a.cmp(index_b))
            })
            .and_then(|(index, _)| self.sections.get_index(index).copied())
    }

    fn holds(&self, pin: Pin) -> bool {
        self.clock.now().saturating_sub(pin.since) < self.pin_timeout
    }

    fn release(&mut self) {
        self.pin = None;
        if let Some(handle) = self.subscription.take() {
            debug!(subscription = handle.to_string(); "Releasing subscription");
            self.observer.unsubscribe(handle);
        }
    }
}

impl<O, S, C> Drop for Navigator<O, S, C>
where
    O: ViewportObserver,
    S: ScrollTo,
    C: Clock,
{
    fn drop(&mut self) {
        self.release();
    }
}

impl<O, S, C> fmt::Debug for Navigator<O, S, C>
where
    O: ViewportObserver,
    S: ScrollTo,
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("sections", &self.sections)
            .field("active", &self.active)
            .field("subscription", &self.subscription)
            .field("pin", &self.pin)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::clock::ManualClock;

    use super::*;

    #[derive(Debug, Default)]
    struct ObserverLog {
        next: u64,
        live: Vec<(SubscriptionHandle, Vec<SectionId>)>,
        subscribes: usize,
        unsubscribes: usize,
        options: Option<ObserverOptions>,
    }

    /// Records subscriptions; batches are injected by the test directly.
    #[derive(Debug, Clone, Default)]
    struct MockObserver {
        log: Rc<RefCell<ObserverLog>>,
        unavailable: bool,
    }

    impl MockObserver {
        fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }

        fn live(&self) -> Vec<(SubscriptionHandle, Vec<SectionId>)> {
            self.log.borrow().live.clone()
        }

        fn handle(&self) -> SubscriptionHandle {
            self.live()
                .last()
                .map(|(handle, _)| *handle)
                .expect("no live subscription")
        }
    }

    impl ViewportObserver for MockObserver {
        fn subscribe(
            &mut self,
            targets: &[SectionId],
            options: &ObserverOptions,
        ) -> Result<SubscriptionHandle, ObserverUnavailable> {
            if self.unavailable {
                return Err(ObserverUnavailable::new("not supported"));
            }
            let mut log = self.log.borrow_mut();
            log.next += 1;
            log.subscribes += 1;
            log.options = Some(options.clone());
            let handle = SubscriptionHandle::new(log.next);
            log.live.push((handle, targets.to_vec()));
            Ok(handle)
        }

        fn unsubscribe(&mut self, handle: SubscriptionHandle) {
            let mut log = self.log.borrow_mut();
            log.unsubscribes += 1;
            log.live.retain(|(live, _)| *live != handle);
        }
    }

    #[derive(Debug, Clone, Default)]
    struct MockScroller {
        requests: Rc<RefCell<Vec<(SectionId, ScrollBehavior)>>>,
    }

    impl ScrollTo for MockScroller {
        fn scroll_into_view(&mut self, section: SectionId, behavior: ScrollBehavior) {
            self.requests.borrow_mut().push((section, behavior));
        }
    }

    type TestNavigator = Navigator<MockObserver, MockScroller, ManualClock>;

    fn ids(names: &[&str]) -> Vec<SectionId> {
        names.iter().map(|name| SectionId::new(name)).collect()
    }

    fn id(name: &str) -> SectionId {
        SectionId::new(name)
    }

    type Harness = (TestNavigator, MockObserver, MockScroller, ManualClock);

    fn navigator_with(observer: MockObserver) -> Harness {
        let scroller = MockScroller::default();
        let clock = ManualClock::default();
        let navigator = Navigator::new(
            observer.clone(),
            scroller.clone(),
            clock.clone(),
            &NavigationConfig::default(),
        );
        (navigator, observer, scroller, clock)
    }

    fn navigator() -> Harness {
        navigator_with(MockObserver::default())
    }

    fn seen(name: &str, ratio: f32) -> VisibilityObservation {
        VisibilityObservation::intersecting(id(name), ratio)
    }

    fn hidden(name: &str) -> VisibilityObservation {
        VisibilityObservation::hidden(id(name))
    }

    #[test]
    fn test_active_is_none_before_initialize() {
        let (navigator, ..) = navigator();
        assert_eq!(navigator.active_section(), None);
        assert!(!navigator.is_observing());
    }

    #[test]
    fn test_initialize_selects_first_section_and_subscribes() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["home", "gallery", "zones"]));

        assert_eq!(navigator.active_section(), Some(id("home")));
        assert!(navigator.is_observing());

        let live = observer.live();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].1, ids(&["home", "gallery", "zones"]));
        assert_eq!(
            observer.log.borrow().options,
            Some(NavigationConfig::default().observer_options())
        );
    }

    #[test]
    fn test_concrete_scenario() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["home", "gallery", "zones"]));
        let handle = observer.handle();
        assert_eq!(navigator.active_section(), Some(id("home")));

        navigator.deliver(handle, &[hidden("home"), seen("gallery", 0.6), seen("zones", 0.3)]);
        assert_eq!(navigator.active_section(), Some(id("gallery")));

        navigator.deliver(handle, &[hidden("home"), hidden("gallery"), hidden("zones")]);
        assert_eq!(navigator.active_section(), Some(id("gallery")));
    }

    #[test]
    fn test_tie_break_prefers_registration_order() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["home", "gallery", "zones"]));
        let handle = observer.handle();

        // Batch order must not matter.
        navigator.deliver(handle, &[seen("zones", 0.5), seen("gallery", 0.5)]);
        assert_eq!(navigator.active_section(), Some(id("gallery")));
    }

    #[test]
    fn test_empty_batch_keeps_active() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["home", "gallery"]));
        let handle = observer.handle();

        navigator.deliver(handle, &[seen("gallery", 0.2)]);
        navigator.deliver(handle, &[]);
        assert_eq!(navigator.active_section(), Some(id("gallery")));
    }

    #[test]
    fn test_unregistered_observations_are_skipped() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["home", "gallery"]));
        let handle = observer.handle();

        navigator.deliver(handle, &[seen("footer", 1.0), seen("gallery", 0.1)]);
        assert_eq!(navigator.active_section(), Some(id("gallery")));

        navigator.deliver(handle, &[seen("footer", 1.0)]);
        assert_eq!(navigator.active_section(), Some(id("gallery")));
    }

    #[test]
    fn test_navigate_sets_active_and_scrolls() {
        let (mut navigator, _, scroller, _) = navigator();
        navigator.initialize(ids(&["home", "gallery", "zones"]));

        navigator.navigate_to(id("zones"));

        assert_eq!(navigator.active_section(), Some(id("zones")));
        assert_eq!(navigator.pinned_target(), Some(id("zones")));
        assert_eq!(
            *scroller.requests.borrow(),
            vec![(id("zones"), ScrollBehavior::Smooth)]
        );
    }

    #[test]
    fn test_navigate_to_unregistered_is_noop() {
        let (mut navigator, _, scroller, _) = navigator();
        navigator.initialize(ids(&["home", "gallery"]));

        navigator.navigate_to(id("nowhere"));

        assert_eq!(navigator.active_section(), Some(id("home")));
        assert_eq!(navigator.pinned_target(), None);
        assert!(scroller.requests.borrow().is_empty());
    }

    #[test]
    fn test_navigate_then_settle_converges() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["A", "B", "C"]));
        let handle = observer.handle();

        navigator.navigate_to(id("C"));

        // Scroll passes through B.
        navigator.deliver(handle, &[hidden("A"), seen("B", 0.4)]);
        assert_eq!(navigator.active_section(), Some(id("C")));
        navigator.deliver(handle, &[seen("B", 0.9)]);
        assert_eq!(navigator.active_section(), Some(id("C")));

        // Settles on C.
        navigator.deliver(handle, &[hidden("B"), seen("C", 0.5)]);
        assert_eq!(navigator.active_section(), Some(id("C")));
        assert_eq!(navigator.pinned_target(), Some(id("C")));
    }

    #[test]
    fn test_confirmed_target_survives_overshoot() {
        let (mut navigator, observer, _, clock) = navigator();
        navigator.initialize(ids(&["A", "S", "B"]));
        let handle = observer.handle();

        navigator.navigate_to(id("S"));
        navigator.deliver(handle, &[hidden("A"), seen("S", 0.2)]);

        // The scroll carries the short section out of the band again.
        navigator.deliver(handle, &[hidden("S"), seen("B", 0.05)]);
        assert_eq!(navigator.active_section(), Some(id("S")));

        clock.advance(Duration::from_millis(600));
        navigator.deliver(handle, &[seen("B", 0.1)]);
        assert_eq!(navigator.active_section(), Some(id("S")));
    }

    #[test]
    fn test_pin_outlives_confirmation_until_window_elapses() {
        let (mut navigator, observer, _, clock) = navigator();
        navigator.initialize(ids(&["A", "B", "C"]));
        let handle = observer.handle();

        navigator.navigate_to(id("C"));
        navigator.deliver(handle, &[seen("B", 0.8), seen("C", 0.1)]);
        assert_eq!(navigator.active_section(), Some(id("C")));

        navigator.deliver(handle, &[seen("B", 0.8)]);
        assert_eq!(navigator.active_section(), Some(id("C")));

        clock.advance(Duration::from_millis(1500));
        assert_eq!(navigator.pinned_target(), None);
        navigator.deliver(handle, &[seen("B", 0.8)]);
        assert_eq!(navigator.active_section(), Some(id("B")));
    }

    #[test]
    fn test_user_scroll_drops_pin() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["A", "B", "C"]));
        let handle = observer.handle();

        navigator.navigate_to(id("C"));
        navigator.deliver(handle, &[seen("A", 1.0)]);
        assert_eq!(navigator.active_section(), Some(id("C")));

        navigator.user_scrolled();
        assert_eq!(navigator.pinned_target(), None);
        navigator.deliver(handle, &[seen("A", 1.0)]);
        assert_eq!(navigator.active_section(), Some(id("A")));

        // Nothing pinned: a no-op.
        navigator.user_scrolled();
        assert_eq!(navigator.active_section(), Some(id("A")));
    }

    #[test]
    fn test_second_navigation_supersedes_pin() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["A", "B", "C"]));
        let handle = observer.handle();

        navigator.navigate_to(id("C"));
        navigator.navigate_to(id("A"));
        assert_eq!(navigator.pinned_target(), Some(id("A")));

        navigator.deliver(handle, &[seen("C", 1.0)]);
        assert_eq!(navigator.active_section(), Some(id("A")));

        navigator.deliver(handle, &[hidden("C"), seen("A", 0.3)]);
        assert_eq!(navigator.active_section(), Some(id("A")));
        assert_eq!(navigator.pinned_target(), Some(id("A")));
    }

    #[test]
    fn test_pin_expires_after_timeout() {
        let (mut navigator, observer, _, clock) = navigator();
        navigator.initialize(ids(&["A", "B", "C"]));
        let handle = observer.handle();

        navigator.navigate_to(id("C"));
        clock.advance(Duration::from_millis(1499));
        navigator.deliver(handle, &[seen("B", 0.5)]);
        assert_eq!(navigator.active_section(), Some(id("C")));

        clock.advance(Duration::from_millis(1));
        navigator.deliver(handle, &[seen("B", 0.5)]);
        assert_eq!(navigator.active_section(), Some(id("B")));
        assert_eq!(navigator.pinned_target(), None);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let (mut navigator, observer, ..) = navigator();
        navigator.teardown();
        navigator.initialize(ids(&["home"]));
        navigator.teardown();
        navigator.teardown();

        let log = observer.log.borrow();
        assert!(log.unsubscribes <= log.subscribes);
        assert!(log.live.is_empty());
        assert!(!navigator.is_observing());
    }

    #[test]
    fn test_no_mutation_after_teardown() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["home", "gallery"]));
        let handle = observer.handle();
        navigator.navigate_to(id("gallery"));

        navigator.teardown();
        assert_eq!(navigator.pinned_target(), None);

        navigator.deliver(handle, &[seen("home", 1.0)]);
        assert_eq!(navigator.active_section(), Some(id("gallery")));
    }

    #[test]
    fn test_reinitialize_keeps_single_subscription() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["A", "B"]));
        let stale = observer.handle();
        navigator.initialize(ids(&["A", "B", "C"]));

        let live = observer.live();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].1, ids(&["A", "B", "C"]));

        // Late batch from the first subscription is dropped.
        navigator.deliver(stale, &[seen("B", 1.0)]);
        assert_eq!(navigator.active_section(), Some(id("A")));

        navigator.deliver(observer.handle(), &[seen("C", 1.0)]);
        assert_eq!(navigator.active_section(), Some(id("C")));
    }

    #[test]
    fn test_reinitialize_resets_unregistered_active() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["A", "B", "C"]));
        navigator.deliver(observer.handle(), &[seen("C", 1.0)]);

        navigator.initialize(ids(&["A", "C"]));
        assert_eq!(navigator.active_section(), Some(id("C")));

        navigator.initialize(ids(&["B", "A"]));
        assert_eq!(navigator.active_section(), Some(id("B")));
    }

    #[test]
    fn test_duplicate_sections_keep_first_position() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(ids(&["A", "B", "A"]));

        assert_eq!(navigator.sections().collect::<Vec<_>>(), ids(&["A", "B"]));
        assert_eq!(observer.live()[0].1, ids(&["A", "B"]));
    }

    #[test]
    fn test_empty_initialize_does_not_subscribe() {
        let (mut navigator, observer, ..) = navigator();
        navigator.initialize(Vec::new());

        assert_eq!(navigator.active_section(), None);
        assert_eq!(observer.log.borrow().subscribes, 0);
    }

    #[test]
    fn test_unavailable_observer_degrades_to_explicit_navigation() {
        let (mut navigator, _, scroller, _) = navigator_with(MockObserver::unavailable());
        navigator.initialize(ids(&["home", "gallery"]));

        assert!(!navigator.is_observing());
        assert_eq!(navigator.active_section(), Some(id("home")));

        navigator.navigate_to(id("gallery"));
        assert_eq!(navigator.active_section(), Some(id("gallery")));
        assert_eq!(navigator.pinned_target(), None);
        assert_eq!(scroller.requests.borrow().len(), 1);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let observer = MockObserver::default();
        {
            let (mut navigator, ..) = navigator_with(observer.clone());
            navigator.initialize(ids(&["home"]));
            assert_eq!(observer.live().len(), 1);
        }
        assert!(observer.live().is_empty());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use crate::clock::ManualClock;

    use super::*;

    struct NullObserver;

    impl ViewportObserver for NullObserver {
        fn subscribe(
            &mut self,
            _targets: &[SectionId],
            _options: &ObserverOptions,
        ) -> Result<SubscriptionHandle, ObserverUnavailable> {
            Ok(SubscriptionHandle::new(1))
        }

        fn unsubscribe(&mut self, _handle: SubscriptionHandle) {}
    }

    struct NullScroller;

    impl ScrollTo for NullScroller {
        fn scroll_into_view(&mut self, _section: SectionId, _behavior: ScrollBehavior) {}
    }

    const NAMES: [&str; 5] = ["s0", "s1", "s2", "s3", "s4"];

    fn batch_strategy() -> impl Strategy<Value = Vec<(usize, bool, f32)>> {
        prop::collection::vec((0usize..NAMES.len(), any::<bool>(), 0.0f32..=1.0), 0..8)
    }

    fn build(batch: &[(usize, bool, f32)]) -> Vec<VisibilityObservation> {
        batch
            .iter()
            .map(|&(index, hit, ratio)| {
                VisibilityObservation::new(SectionId::new(NAMES[index]), hit, ratio)
            })
            .collect()
    }

    fn fresh() -> Navigator<NullObserver, NullScroller, ManualClock> {
        let mut navigator = Navigator::new(
            NullObserver,
            NullScroller,
            ManualClock::default(),
            &NavigationConfig::default(),
        );
        navigator.initialize(NAMES.map(SectionId::new));
        navigator
    }

    /// The active section always stays within the registered set, and equals
    /// the expected winner whenever anything intersects.
    fn check_reconcile_matches_model(
        batch: Vec<(usize, bool, f32)>,
    ) -> Result<(), TestCaseError> {
        let mut navigator = fresh();
        let before = navigator.active_section();
        navigator.deliver(SubscriptionHandle::new(1), &build(&batch));

        let expected = batch
            .iter()
            .filter(|(_, hit, _)| *hit)
            .fold(None::<(usize, f32)>, |best, &(index, _, ratio)| match best {
                Some((best_index, best_ratio))
                    if best_ratio > ratio || (best_ratio == ratio && best_index <= index) =>
                {
                    Some((best_index, best_ratio))
                }
                _ => Some((index, ratio)),
            })
            .map(|(index, _)| SectionId::new(NAMES[index]));

        match expected {
            Some(winner) => prop_assert_eq!(navigator.active_section(), Some(winner)),
            None => prop_assert_eq!(navigator.active_section(), before),
        }
        Ok(())
    }

    /// Any sequence of batches after navigate_to, whether or not it reports
    /// the target, leaves the target active while the pin holds.
    fn check_pin_holds(
        target: usize,
        batches: Vec<Vec<(usize, bool, f32)>>,
    ) -> Result<(), TestCaseError> {
        let mut navigator = fresh();
        let target_id = SectionId::new(NAMES[target]);
        navigator.navigate_to(target_id);

        for batch in batches {
            navigator.deliver(SubscriptionHandle::new(1), &build(&batch));
            prop_assert_eq!(navigator.active_section(), Some(target_id));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn reconcile_matches_model(batch in batch_strategy()) {
            check_reconcile_matches_model(batch)?;
        }

        #[test]
        fn pin_holds_for_its_window(
            target in 0usize..NAMES.len(),
            batches in prop::collection::vec(batch_strategy(), 0..6),
        ) {
            check_pin_holds(target, batches)?;
        }
    }
}
