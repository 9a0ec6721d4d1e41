// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller options and their resolution against a [`Document`].

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;
use core::future::Future;
use core::time::Duration;

use futures::future::LocalBoxFuture;

use crate::host::Document;

/// Default pull distance, after resistance, that arms a refresh or load.
pub const DEFAULT_DISTANCE_TO_REFRESH: f64 = 60.0;

/// Default divisor applied to raw drag distance.
pub const DEFAULT_RESISTANCE: f64 = 2.5;

/// Default minimum time the loading classes stay applied.
pub const DEFAULT_MIN_LOADING_DURATION: Duration = Duration::from_millis(200);

/// Caller operation run on a committed pull.
///
/// Called with no arguments; the returned future completes when the
/// operation is done.
pub type LoadFn = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Selectors used to look up elements that were not passed explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selectors {
    /// Scroll container whose class list carries the state classes.
    pub container: &'static str,
    /// Content element that is translated and panned.
    pub content: &'static str,
    /// Top indicator element.
    pub top: &'static str,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            container: ".container",
            content: ".content",
            top: ".top",
        }
    }
}

/// The three elements the controller binds to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// The scroll container.
    Container,
    /// The content element.
    Content,
    /// The top indicator element.
    Top,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Container => "container",
            Self::Content => "content",
            Self::Top => "top",
        })
    }
}

/// Error returned when a controller cannot be initialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    /// A required element was neither passed nor found by its selector.
    MissingElement(ElementRole),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(role) => write!(f, "no {role} element to bind to"),
        }
    }
}

impl core::error::Error for InitError {}

/// Options for [`PullRefresh::init`](crate::PullRefresh::init).
///
/// Every field is optional. Elements that are not passed are looked up with
/// [`Selectors`]; numeric options that are absent, zero or not positive fall
/// back to their defaults.
pub struct PullRefreshOptions<E> {
    /// Scroll container element.
    pub container: Option<E>,
    /// Content element.
    pub content: Option<E>,
    /// Top indicator element.
    pub top: Option<E>,
    /// Selectors for elements not passed explicitly.
    pub selectors: Selectors,
    /// Pull distance, after resistance, that arms a refresh or load.
    pub distance_to_refresh: Option<f64>,
    /// Divisor applied to raw drag distance.
    pub resistance: Option<f64>,
    /// Minimum time the loading class stays applied.
    pub min_loading_duration: Option<Duration>,
    /// Run on a committed pull at the top edge.
    pub refresh: Option<LoadFn>,
    /// Run on a committed pull at the bottom edge.
    pub load_more: Option<LoadFn>,
}

impl<E> Default for PullRefreshOptions<E> {
    fn default() -> Self {
        Self {
            container: None,
            content: None,
            top: None,
            selectors: Selectors::default(),
            distance_to_refresh: None,
            resistance: None,
            min_loading_duration: None,
            refresh: None,
            load_more: None,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for PullRefreshOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullRefreshOptions")
            .field("container", &self.container)
            .field("content", &self.content)
            .field("top", &self.top)
            .field("selectors", &self.selectors)
            .field("distance_to_refresh", &self.distance_to_refresh)
            .field("resistance", &self.resistance)
            .field("min_loading_duration", &self.min_loading_duration)
            .field("refresh", &self.refresh.is_some())
            .field("load_more", &self.load_more.is_some())
            .finish()
    }
}

impl<E> PullRefreshOptions<E> {
    /// Options with every value defaulted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `element` as the scroll container.
    #[must_use]
    pub fn container(mut self, element: E) -> Self {
        self.container = Some(element);
        self
    }

    /// Bind to `element` as the content element.
    #[must_use]
    pub fn content(mut self, element: E) -> Self {
        self.content = Some(element);
        self
    }

    /// Bind to `element` as the top indicator.
    #[must_use]
    pub fn top(mut self, element: E) -> Self {
        self.top = Some(element);
        self
    }

    /// Look up missing elements with `selectors`.
    #[must_use]
    pub fn selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Set the threshold distance in pixels.
    #[must_use]
    pub fn distance_to_refresh(mut self, distance: f64) -> Self {
        self.distance_to_refresh = Some(distance);
        self
    }

    /// Set the drag resistance.
    #[must_use]
    pub fn resistance(mut self, resistance: f64) -> Self {
        self.resistance = Some(resistance);
        self
    }

    /// Set the minimum time the loading class stays applied.
    ///
    /// [`Duration::ZERO`] turns the minimum off: the loading state ends as
    /// soon as the operation does. Defaults to [`DEFAULT_MIN_LOADING_DURATION`].
    #[must_use]
    pub fn min_loading_duration(mut self, duration: Duration) -> Self {
        self.min_loading_duration = Some(duration);
        self
    }

    /// Run `f` on a committed pull at the top edge.
    #[must_use]
    pub fn on_refresh<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.refresh = Some(boxed(f));
        self
    }

    /// Run `f` on a committed pull at the bottom edge.
    #[must_use]
    pub fn on_load_more<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.load_more = Some(boxed(f));
        self
    }

    /// Resolve against `document`, falling back to selectors and defaults.
    pub(crate) fn resolve<D>(self, document: &D) -> Result<Config<E>, InitError>
    where
        D: Document<Element = E>,
    {
        let Self {
            container,
            content,
            top,
            selectors,
            distance_to_refresh,
            resistance,
            min_loading_duration,
            refresh,
            load_more,
        } = self;

        let lookup = |explicit: Option<E>, selector: &str, role| {
            explicit
                .or_else(|| document.query_selector(selector))
                .ok_or(InitError::MissingElement(role))
        };
        let container = lookup(container, selectors.container, ElementRole::Container)?;
        let content = lookup(content, selectors.content, ElementRole::Content)?;
        let top = lookup(top, selectors.top, ElementRole::Top)?;

        Ok(Config {
            container,
            content,
            top,
            distance_to_refresh: positive_or(distance_to_refresh, DEFAULT_DISTANCE_TO_REFRESH),
            resistance: positive_or(resistance, DEFAULT_RESISTANCE),
            min_loading_duration: min_loading_duration.unwrap_or(DEFAULT_MIN_LOADING_DURATION),
            refresh,
            load_more,
        })
    }
}

fn boxed<F, Fut>(f: F) -> LoadFn
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    Rc::new(move || -> LocalBoxFuture<'static, ()> { Box::pin(f()) })
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| *v > 0.0 && v.is_finite()).unwrap_or(default)
}

/// Options after resolution; immutable for the controller's lifetime.
pub(crate) struct Config<E> {
    pub(crate) container: E,
    pub(crate) content: E,
    pub(crate) top: E,
    pub(crate) distance_to_refresh: f64,
    pub(crate) resistance: f64,
    pub(crate) min_loading_duration: Duration,
    pub(crate) refresh: Option<LoadFn>,
    pub(crate) load_more: Option<LoadFn>,
}

impl<E: fmt::Debug> fmt::Debug for Config<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("container", &self.container)
            .field("content", &self.content)
            .field("top", &self.top)
            .field("distance_to_refresh", &self.distance_to_refresh)
            .field("resistance", &self.resistance)
            .field("min_loading_duration", &self.min_loading_duration)
            .field("refresh", &self.refresh.is_some())
            .field("load_more", &self.load_more.is_some())
            .finish()
    }
}
