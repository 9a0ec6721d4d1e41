// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pull-to-refresh controller.
//!
//! ## Event flow
//!
//! ```text
//! pan start ─▶ read scroll metrics, arm top and/or bottom axis
//! pan down  ─▶ top axis follows the drag, translate content, toggle *-refresh
//! pan up    ─▶ bottom axis follows the drag, translate content, toggle *-refresh
//! pan end   ─▶ snap back; committed edge: *-loading + Sequence, else reset
//! ```
//!
//! A [`Sequence`] finishes the loading state once the caller's operation and
//! the minimum loading duration have both completed. The host spawns it on
//! its local executor.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::future::{LocalBoxFuture, join};
use kurbo::Vec2;
use log::{debug, trace};

use crate::class::{Edge, StateClass};
use crate::gesture::{PanEvent, PanOptions, PanPhase, PanRecognizer};
use crate::host::{ClassList, Document, Element, Subscription, Timer};
use crate::options::{Config, InitError, PullRefreshOptions};

type ClassListOf<D> = <<D as Document>::Element as Element>::ClassList;

/// Pull state of one edge.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AxisState {
    /// Whether the gesture started at this edge.
    pub enabled: bool,
    /// Current pull distance after resistance, in pixels.
    pub distance: f64,
}

impl AxisState {
    /// Disabled with no displacement.
    pub const REST: Self = Self {
        enabled: false,
        distance: 0.0,
    };

    fn reset(&mut self) {
        *self = Self::REST;
    }
}

/// Container bookkeeping captured at the start of each gesture.
#[derive(Clone, Debug)]
pub struct ContainerState<C> {
    /// Handle to the container's class list.
    pub class_list: C,
    /// Scroll offset observed at the last pan start.
    pub scroll_offset: f64,
    /// Scroll extent observed at the last pan start.
    pub scroll_extent: f64,
}

/// What the host should do after forwarding a [`PanEvent`].
#[derive(Debug, Default)]
pub struct Response {
    /// The host should suppress the event's default behavior (native scrolling).
    pub default_prevented: bool,
    /// A loading sequence the host should spawn on its local executor.
    pub sequence: Option<Sequence>,
}

impl Response {
    fn ignored() -> Self {
        Self::default()
    }

    fn prevented() -> Self {
        Self {
            default_prevented: true,
            sequence: None,
        }
    }
}

/// A running refresh or load-more operation.
///
/// Completes after both the caller's future and the minimum loading duration
/// have completed, then resets the edge's visuals.
#[must_use = "a Sequence has to be spawned to finish the loading state"]
pub struct Sequence {
    edge: Edge,
    future: LocalBoxFuture<'static, ()>,
}

impl Sequence {
    /// The edge whose operation this is.
    pub fn edge(&self) -> Edge {
        self.edge
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("edge", &self.edge)
            .finish_non_exhaustive()
    }
}

impl Future for Sequence {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.future.as_mut().poll(cx)
    }
}

struct PendingReset<S> {
    subscription: S,
    fired: Rc<Cell<bool>>,
}

/// Everything a reset touches, shared between the controller and in-flight
/// sequences.
struct Visuals<D: Document> {
    document: Rc<D>,
    content: D::Element,
    classes: ClassListOf<D>,
    pending: Rc<RefCell<[Option<PendingReset<D::Subscription>>; 2]>>,
}

impl<D: Document> Clone for Visuals<D> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            content: self.content.clone(),
            classes: self.classes.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<D> Visuals<D>
where
    D: Document + 'static,
{
    /// Return `edge` to rest and schedule removal of its reset class.
    fn reset(&self, edge: Edge) {
        self.content.set_translation(None);
        self.classes.remove(edge.loading_class());
        self.classes.remove(edge.refresh_class());
        self.cancel_pending(edge);
        self.classes.add(edge.reset_class());

        let fired = Rc::new(Cell::new(false));
        let subscription = {
            let fired = fired.clone();
            let classes = self.classes.clone();
            self.document
                .on_transition_end_once(Box::new(move || {
                    fired.set(true);
                    classes.remove(edge.reset_class());
                }))
        };
        self.pending.borrow_mut()[edge.index()] = Some(PendingReset {
            subscription,
            fired,
        });
    }

    /// Drop a reset still waiting for its transition, removing its class.
    fn cancel_pending(&self, edge: Edge) {
        let pending = self.pending.borrow_mut()[edge.index()].take();
        if let Some(pending) = pending
            && !pending.fired.get()
        {
            trace!("cancelling pending {} listener", edge.reset_class());
            pending.subscription.cancel();
            self.classes.remove(edge.reset_class());
        }
    }

    fn has_pending(&self, edge: Edge) -> bool {
        self.pending.borrow()[edge.index()]
            .as_ref()
            .is_some_and(|pending| !pending.fired.get())
    }
}

/// Pull-to-refresh / pull-to-load-more controller for one scroll container.
///
/// See the [crate documentation](crate) for an overview and an example.
pub struct PullRefresh<D: Document, T> {
    config: Config<D::Element>,
    container: ContainerState<ClassListOf<D>>,
    refresh: AxisState,
    loading: AxisState,
    visuals: Visuals<D>,
    timer: T,
}

impl<D: Document, T> fmt::Debug for PullRefresh<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullRefresh")
            .field("refresh", &self.refresh)
            .field("loading", &self.loading)
            .field("scroll_offset", &self.container.scroll_offset)
            .field("scroll_extent", &self.container.scroll_extent)
            .field("distance_to_refresh", &self.config.distance_to_refresh)
            .field("resistance", &self.config.resistance)
            .finish_non_exhaustive()
    }
}

impl<D, T> PullRefresh<D, T>
where
    D: Document + 'static,
    T: Timer + 'static,
{
    /// Bind a controller to the elements described by `options`.
    ///
    /// Elements not passed explicitly are looked up in `document`. If any of
    /// the container, content, or top elements cannot be found, nothing is
    /// attached and [`InitError::MissingElement`] is returned. Otherwise a
    /// vertical-only pan recognizer is attached to the content element.
    pub fn init<R>(
        document: D,
        timer: T,
        recognizer: &mut R,
        options: PullRefreshOptions<D::Element>,
    ) -> Result<Self, InitError>
    where
        R: PanRecognizer<D::Element> + ?Sized,
    {
        let config = options
            .resolve(&document)
            .inspect_err(|err| debug!("pull-to-refresh not initialized: {err}"))?;

        let class_list = config.container.class_list();
        recognizer.attach(&config.content, PanOptions::VERTICAL);

        let visuals = Visuals {
            document: Rc::new(document),
            content: config.content.clone(),
            classes: class_list.clone(),
            pending: Rc::new(RefCell::new([None, None])),
        };

        Ok(Self {
            config,
            container: ContainerState {
                class_list,
                scroll_offset: 0.0,
                scroll_extent: 0.0,
            },
            refresh: AxisState::REST,
            loading: AxisState::REST,
            visuals,
            timer,
        })
    }

    /// Forward a recognized pan event.
    pub fn handle(&mut self, event: PanEvent) -> Response {
        match event.phase {
            PanPhase::Start => {
                self.pan_start();
                Response::ignored()
            }
            PanPhase::Down => self.pan_down(event.distance),
            PanPhase::Up => self.pan_up(event.distance),
            PanPhase::End => self.pan_end(),
        }
    }

    /// Arm the axes according to the scroll position at gesture start.
    ///
    /// A reset from an earlier gesture that is still waiting for its
    /// transition is cancelled first.
    pub fn pan_start(&mut self) {
        for edge in Edge::ALL {
            self.visuals.cancel_pending(edge);
        }

        let metrics = self.visuals.document.scroll_metrics();
        self.container.scroll_offset = metrics.offset;
        self.container.scroll_extent = metrics.extent;

        self.refresh = AxisState {
            enabled: metrics.at_top(),
            distance: 0.0,
        };
        self.loading = AxisState {
            enabled: metrics.at_bottom(),
            distance: 0.0,
        };
        trace!(
            "pan start at {metrics:?}: refresh={} loading={}",
            self.refresh.enabled, self.loading.enabled
        );
    }

    /// Handle a downward move with cumulative raw `distance`.
    pub fn pan_down(&mut self, distance: f64) -> Response {
        if !self.is_tracking() {
            return Response::ignored();
        }
        let scaled = self.scale(distance);
        trace!("pan down {distance} -> {scaled}");

        self.refresh.distance = scaled;
        self.loading.distance = if self.loading.distance < scaled {
            0.0
        } else {
            scaled
        };
        self.apply_content_transform();
        self.update_container_classes();
        Response::prevented()
    }

    /// Handle an upward move with cumulative raw `distance`.
    pub fn pan_up(&mut self, distance: f64) -> Response {
        if !self.is_tracking() {
            return Response::ignored();
        }
        let scaled = self.scale(distance);
        trace!("pan up {distance} -> {scaled}");

        self.loading.distance = scaled;
        self.refresh.distance = if self.refresh.distance < scaled {
            0.0
        } else {
            scaled
        };
        self.apply_content_transform();
        self.update_container_classes();
        Response::prevented()
    }

    /// Finish the gesture: start a committed edge's operation or reset.
    pub fn pan_end(&mut self) -> Response {
        self.config.content.set_translation(None);

        let classes = &self.container.class_list;
        let sequence = if self.refresh.enabled && classes.contains(StateClass::TopRefresh) {
            self.begin(Edge::Top)
        } else if self.loading.enabled && classes.contains(StateClass::BottomRefresh) {
            self.begin(Edge::Bottom)
        } else {
            self.visuals.reset(Edge::Top);
            self.visuals.reset(Edge::Bottom);
            None
        };

        self.refresh.reset();
        self.loading.reset();
        trace!("pan end, sequence started: {}", sequence.is_some());

        Response {
            default_prevented: true,
            sequence,
        }
    }

    /// State of the axis pulled past `edge`.
    pub fn axis(&self, edge: Edge) -> AxisState {
        match edge {
            Edge::Top => self.refresh,
            Edge::Bottom => self.loading,
        }
    }

    /// Container bookkeeping from the last gesture start.
    pub fn container_state(&self) -> &ContainerState<ClassListOf<D>> {
        &self.container
    }

    /// Whether either axis is armed by the current gesture.
    pub fn is_tracking(&self) -> bool {
        self.refresh.enabled || self.loading.enabled
    }

    /// Whether `edge` has a reset still waiting for its transition to end.
    pub fn has_pending_reset(&self, edge: Edge) -> bool {
        self.visuals.has_pending(edge)
    }

    /// Threshold distance after resistance.
    pub fn distance_to_refresh(&self) -> f64 {
        self.config.distance_to_refresh
    }

    /// Divisor applied to raw drag distance.
    pub fn resistance(&self) -> f64 {
        self.config.resistance
    }

    /// The scroll container.
    pub fn container(&self) -> &D::Element {
        &self.config.container
    }

    /// The content element.
    pub fn content(&self) -> &D::Element {
        &self.config.content
    }

    /// The top indicator element.
    pub fn top(&self) -> &D::Element {
        &self.config.top
    }

    fn scale(&self, distance: f64) -> f64 {
        (distance / self.config.resistance).max(0.0)
    }

    fn apply_content_transform(&self) {
        if self.refresh.enabled {
            self.config
                .content
                .set_translation(Some(Vec2::new(0.0, self.refresh.distance)));
        }
        if self.loading.enabled {
            self.config
                .content
                .set_translation(Some(Vec2::new(0.0, -self.loading.distance)));
        }
    }

    fn update_container_classes(&self) {
        let threshold = self.config.distance_to_refresh;
        let classes = &self.container.class_list;
        classes.toggle(StateClass::TopRefresh, self.refresh.distance > threshold);
        classes.toggle(StateClass::BottomRefresh, self.loading.distance > threshold);
    }

    fn begin(&self, edge: Edge) -> Option<Sequence> {
        self.container.class_list.add(edge.loading_class());

        let operation = match edge {
            Edge::Top => self.config.refresh.as_ref(),
            Edge::Bottom => self.config.load_more.as_ref(),
        };
        let Some(operation) = operation else {
            match edge {
                Edge::Top => self.visuals.reset(Edge::Top),
                // The bottom edge keeps its loading class without an operation.
                Edge::Bottom => debug!("no load-more operation, leaving {}", edge.loading_class()),
            }
            return None;
        };

        debug!("starting {edge:?} operation");
        let operation = operation();
        let min_duration = self.timer.sleep(self.config.min_loading_duration);
        let visuals = self.visuals.clone();
        Some(Sequence {
            edge,
            future: Box::pin(async move {
                join(operation, min_duration).await;
                debug!("{edge:?} operation finished");
                visuals.reset(edge);
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::StateClasses;
    use crate::headless::{HeadlessDocument, HeadlessElement, ManualTimer, RecordingRecognizer};
    use crate::host::ScrollMetrics;
    use core::time::Duration;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;

    struct Fixture {
        document: HeadlessDocument,
        container: HeadlessElement,
        content: HeadlessElement,
        timer: ManualTimer,
    }

    impl Fixture {
        fn new() -> Self {
            let document = HeadlessDocument::new();
            let container = HeadlessElement::new();
            let content = HeadlessElement::new();
            document.insert(".container", container.clone());
            document.insert(".content", content.clone());
            document.insert(".top", HeadlessElement::new());
            Self {
                document,
                container,
                content,
                timer: ManualTimer::new(),
            }
        }

        fn controller(
            &self,
            options: PullRefreshOptions<HeadlessElement>,
        ) -> PullRefresh<HeadlessDocument, ManualTimer> {
            let mut recognizer = RecordingRecognizer::default();
            PullRefresh::init(
                self.document.clone(),
                self.timer.clone(),
                &mut recognizer,
                options,
            )
            .unwrap()
        }

        fn scroll_to_top(&self) {
            self.document.set_scroll_metrics(ScrollMetrics {
                offset: 0.0,
                extent: 2000.0,
                viewport: 800.0,
            });
        }

        fn scroll_to_bottom(&self) {
            self.document.set_scroll_metrics(ScrollMetrics {
                offset: 1200.0,
                extent: 2000.0,
                viewport: 800.0,
            });
        }

        fn scroll_to_middle(&self) {
            self.document.set_scroll_metrics(ScrollMetrics {
                offset: 500.0,
                extent: 2000.0,
                viewport: 800.0,
            });
        }
    }

    #[test]
    fn pan_start_arms_axes_from_scroll_position() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new());

        fx.scroll_to_top();
        ptr.pan_start();
        assert!(ptr.axis(Edge::Top).enabled);
        assert!(!ptr.axis(Edge::Bottom).enabled);
        assert_eq!(ptr.container_state().scroll_offset, 0.0);
        assert_eq!(ptr.container_state().scroll_extent, 2000.0);
        ptr.pan_end();

        fx.scroll_to_bottom();
        ptr.pan_start();
        assert!(!ptr.axis(Edge::Top).enabled);
        assert!(ptr.axis(Edge::Bottom).enabled);
        assert_eq!(ptr.container_state().scroll_offset, 1200.0);
    }

    #[test]
    fn pan_down_scales_by_resistance_and_translates_content() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new());
        fx.scroll_to_top();
        ptr.pan_start();

        let response = ptr.pan_down(100.0);
        assert!(response.default_prevented);
        assert!(response.sequence.is_none());
        assert_eq!(ptr.axis(Edge::Top).distance, 40.0);
        assert_eq!(fx.content.translation(), Some(Vec2::new(0.0, 40.0)));
        assert!(!fx.container.has_class(StateClass::TopRefresh));

        ptr.pan_down(160.0);
        assert_eq!(ptr.axis(Edge::Top).distance, 64.0);
        assert!(fx.container.has_class(StateClass::TopRefresh));

        // Dragging back under the threshold removes the class again.
        ptr.pan_down(150.0);
        assert_eq!(ptr.axis(Edge::Top).distance, 60.0);
        assert!(!fx.container.has_class(StateClass::TopRefresh));
    }

    #[test]
    fn pan_up_translates_content_upward() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new());
        fx.scroll_to_bottom();
        ptr.pan_start();

        let response = ptr.pan_up(200.0);
        assert!(response.default_prevented);
        assert_eq!(ptr.axis(Edge::Bottom).distance, 80.0);
        assert_eq!(fx.content.translation(), Some(Vec2::new(0.0, -80.0)));
        assert!(fx.container.has_class(StateClass::BottomRefresh));
        assert!(!fx.container.has_class(StateClass::TopRefresh));
    }

    #[test]
    fn opposing_axis_is_zeroed_only_when_smaller() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new().resistance(1.0));
        fx.scroll_to_bottom();
        ptr.pan_start();

        ptr.pan_up(50.0);
        assert_eq!(ptr.axis(Edge::Bottom).distance, 50.0);

        // Previous bottom distance (50) is not less than 30: it takes 30.
        ptr.pan_down(30.0);
        assert_eq!(ptr.axis(Edge::Top).distance, 30.0);
        assert_eq!(ptr.axis(Edge::Bottom).distance, 30.0);

        // Previous bottom distance (30) is less than 40: it is zeroed.
        ptr.pan_down(40.0);
        assert_eq!(ptr.axis(Edge::Top).distance, 40.0);
        assert_eq!(ptr.axis(Edge::Bottom).distance, 0.0);
    }

    #[test]
    fn opposing_axis_is_zeroed_only_when_smaller_going_up() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new().resistance(1.0));
        fx.scroll_to_top();
        ptr.pan_start();

        ptr.pan_down(50.0);
        assert_eq!(ptr.axis(Edge::Top).distance, 50.0);

        // Previous top distance (50) is not less than 30: it takes 30.
        ptr.pan_up(30.0);
        assert_eq!(ptr.axis(Edge::Bottom).distance, 30.0);
        assert_eq!(ptr.axis(Edge::Top).distance, 30.0);
        assert_eq!(fx.content.translation(), Some(Vec2::new(0.0, 30.0)));

        // Previous top distance (30) is less than 40: it is zeroed.
        ptr.pan_up(40.0);
        assert_eq!(ptr.axis(Edge::Bottom).distance, 40.0);
        assert_eq!(ptr.axis(Edge::Top).distance, 0.0);
        assert_eq!(fx.content.translation(), Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn moves_away_from_edges_do_not_prevent_scrolling() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new());
        fx.scroll_to_middle();
        ptr.pan_start();
        assert!(!ptr.is_tracking());

        let down = ptr.pan_down(300.0);
        let up = ptr.pan_up(300.0);
        assert!(!down.default_prevented);
        assert!(!up.default_prevented);
        assert_eq!(ptr.axis(Edge::Top), AxisState::REST);
        assert_eq!(ptr.axis(Edge::Bottom), AxisState::REST);
        assert_eq!(fx.content.translation(), None);
    }

    #[test]
    fn uncommitted_end_resets_both_edges() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new());
        fx.scroll_to_top();
        ptr.pan_start();
        ptr.pan_down(50.0);

        let response = ptr.pan_end();
        assert!(response.default_prevented);
        assert!(response.sequence.is_none());
        assert_eq!(fx.content.translation(), None);
        assert!(fx.container.has_class(StateClass::TopReset));
        assert!(fx.container.has_class(StateClass::BottomReset));
        assert_eq!(ptr.axis(Edge::Top), AxisState::REST);
        assert_eq!(ptr.axis(Edge::Bottom), AxisState::REST);

        assert_eq!(fx.document.finish_transition(), 2);
        assert!(!fx.container.has_class(StateClass::TopReset));
        assert!(!fx.container.has_class(StateClass::BottomReset));
        assert!(!ptr.has_pending_reset(Edge::Top));
    }

    #[test]
    fn committed_refresh_without_operation_resets_immediately() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new());
        fx.scroll_to_top();
        ptr.pan_start();
        ptr.pan_down(200.0);

        let response = ptr.pan_end();
        assert!(response.sequence.is_none());
        assert!(!fx.container.has_class(StateClass::TopLoading));
        assert!(!fx.container.has_class(StateClass::TopRefresh));
        assert!(fx.container.has_class(StateClass::TopReset));
        assert!(ptr.has_pending_reset(Edge::Top));
        assert!(!ptr.has_pending_reset(Edge::Bottom));
    }

    #[test]
    fn committed_load_without_operation_keeps_loading_class() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new());
        fx.scroll_to_bottom();
        ptr.pan_start();
        ptr.pan_up(200.0);

        let response = ptr.pan_end();
        assert!(response.sequence.is_none());
        assert!(fx.container.has_class(StateClass::BottomLoading));
        assert!(!fx.container.has_class(StateClass::BottomReset));
        assert!(!ptr.has_pending_reset(Edge::Bottom));
    }

    #[test]
    fn refresh_waits_for_both_operation_and_minimum_duration() {
        let fx = Fixture::new();
        let calls = Rc::new(Cell::new(0_u32));
        let options = {
            let calls = calls.clone();
            let timer = fx.timer.clone();
            PullRefreshOptions::new().on_refresh(move || {
                calls.set(calls.get() + 1);
                timer.sleep(Duration::from_millis(10))
            })
        };
        let mut ptr = fx.controller(options);
        fx.scroll_to_top();
        ptr.pan_start();
        ptr.pan_down(160.0);

        let response = ptr.pan_end();
        let sequence = response.sequence.expect("committed refresh starts a sequence");
        assert_eq!(sequence.edge(), Edge::Top);
        assert_eq!(calls.get(), 1);
        assert!(fx.container.has_class(StateClass::TopLoading));

        let mut pool = LocalPool::new();
        pool.spawner().spawn_local(sequence).unwrap();
        pool.run_until_stalled();
        assert!(fx.container.has_class(StateClass::TopLoading));

        fx.timer.advance(Duration::from_millis(10));
        pool.run_until_stalled();
        assert!(fx.container.has_class(StateClass::TopLoading));

        fx.timer.advance(Duration::from_millis(189));
        pool.run_until_stalled();
        assert!(fx.container.has_class(StateClass::TopLoading));

        fx.timer.advance(Duration::from_millis(1));
        pool.run_until_stalled();
        assert!(!fx.container.has_class(StateClass::TopLoading));
        assert!(!fx.container.has_class(StateClass::TopRefresh));
        assert!(fx.container.has_class(StateClass::TopReset));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn pan_start_response_is_ignored() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new());
        fx.scroll_to_top();

        let response = ptr.handle(PanEvent::start());
        assert!(!response.default_prevented);
        assert!(response.sequence.is_none());
        assert!(ptr.is_tracking());
    }

    #[test]
    fn new_gesture_cancels_stale_reset() {
        let fx = Fixture::new();
        let mut ptr = fx.controller(PullRefreshOptions::new());
        fx.scroll_to_top();
        ptr.pan_start();
        ptr.pan_end();
        assert_eq!(fx.document.pending_transition_listeners(), 2);

        ptr.pan_start();
        assert_eq!(fx.document.pending_transition_listeners(), 0);
        assert!(!fx.container.has_class(StateClass::TopReset));
        assert!(!fx.container.has_class(StateClass::BottomReset));
        assert!(!ptr.has_pending_reset(Edge::Top));
    }

    #[test]
    fn finished_sequence_replaces_pending_reset_on_its_edge() {
        let fx = Fixture::new();
        let options = {
            let timer = fx.timer.clone();
            PullRefreshOptions::new().on_refresh(move || timer.sleep(Duration::from_millis(500)))
        };
        let mut ptr = fx.controller(options);
        fx.scroll_to_top();

        ptr.pan_start();
        ptr.pan_down(200.0);
        let sequence = ptr.pan_end().sequence.expect("committed refresh starts a sequence");
        let mut pool = LocalPool::new();
        pool.spawner().spawn_local(sequence).unwrap();
        pool.run_until_stalled();
        assert_eq!(fx.document.pending_transition_listeners(), 0);

        // A short pull while the refresh is still loading resets both edges.
        ptr.pan_start();
        ptr.pan_down(20.0);
        assert!(ptr.pan_end().sequence.is_none());
        assert_eq!(fx.document.pending_transition_listeners(), 2);
        assert!(fx.container.has_class(StateClass::TopReset));

        // The refresh finishing resets the top edge again; the older top
        // listener is dropped rather than kept alongside the new one.
        fx.timer.advance(Duration::from_millis(500));
        pool.run_until_stalled();
        assert_eq!(fx.document.pending_transition_listeners(), 2);
        assert!(ptr.has_pending_reset(Edge::Top));
        assert!(!fx.container.has_class(StateClass::TopLoading));

        assert_eq!(fx.document.finish_transition(), 2);
        assert_eq!(fx.container.classes(), StateClasses::empty());
        assert!(!ptr.has_pending_reset(Edge::Top));
        assert!(!ptr.has_pending_reset(Edge::Bottom));
    }

    #[test]
    fn zero_minimum_duration_resets_when_operation_finishes() {
        let fx = Fixture::new();
        let options = PullRefreshOptions::new()
            .min_loading_duration(Duration::ZERO)
            .on_refresh(|| async {});
        let mut ptr = fx.controller(options);
        fx.scroll_to_top();
        ptr.pan_start();
        ptr.pan_down(200.0);

        let sequence = ptr.pan_end().sequence.expect("committed refresh starts a sequence");
        let mut pool = LocalPool::new();
        pool.spawner().spawn_local(sequence).unwrap();
        pool.run_until_stalled();
        assert!(!fx.container.has_class(StateClass::TopLoading));
        assert!(fx.container.has_class(StateClass::TopReset));
    }
}
