// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host traits: the slice of a DOM-like environment the controller needs.
//!
//! A host provides:
//! - element lookup by selector and the scroll metrics of the document's
//!   scroll root ([`Document`]),
//! - class-list mutation on the container ([`ClassList`]),
//! - a translation on the content element ([`Element`]),
//! - a one-shot "transition completed" notification ([`Subscription`]),
//! - a sleep future for the minimum loading duration ([`Timer`]).
//!
//! Handles are expected to be cheap to clone and to share the underlying
//! element, the way DOM handles do.

use alloc::boxed::Box;
use core::future::Future;
use core::time::Duration;

use kurbo::Vec2;

use crate::class::StateClass;

/// Mutable class list of an element.
///
/// Mutation goes through `&self` because the list is shared with the host.
pub trait ClassList {
    /// Add `class`; adding a present class is a no-op.
    fn add(&self, class: StateClass);
    /// Remove `class`; removing an absent class is a no-op.
    fn remove(&self, class: StateClass);
    /// Whether `class` is present.
    fn contains(&self, class: StateClass) -> bool;

    /// Add `class` when `present`, otherwise remove it.
    fn toggle(&self, class: StateClass, present: bool) {
        if present {
            self.add(class);
        } else {
            self.remove(class);
        }
    }
}

/// Handle to a host element.
pub trait Element: Clone {
    /// Class list handle type.
    type ClassList: ClassList + Clone;

    /// A handle to this element's class list.
    fn class_list(&self) -> Self::ClassList;

    /// Translate the element visually by `offset`, or clear the translation
    /// with `None`.
    fn set_translation(&self, offset: Option<Vec2>);
}

/// Scroll position of the document's scroll root, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset: f64,
    /// Total scrollable height.
    pub extent: f64,
    /// Visible height.
    pub viewport: f64,
}

impl ScrollMetrics {
    /// Scrolled all the way up.
    pub fn at_top(&self) -> bool {
        self.offset == 0.0
    }

    /// Scrolled all the way down.
    pub fn at_bottom(&self) -> bool {
        self.extent == self.viewport + self.offset
    }
}

/// A pending one-shot notification that can be cancelled.
pub trait Subscription {
    /// Unregister the listener. The callback will not run afterwards.
    fn cancel(self);
}

/// Callback run once when the host reports a finished visual transition.
pub type TransitionCallback = Box<dyn FnOnce()>;

/// The document the controlled elements live in.
pub trait Document {
    /// Element handle type.
    type Element: Element;
    /// Handle returned by [`Document::on_transition_end_once`].
    type Subscription: Subscription;

    /// First element matching `selector`, if any.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Current scroll metrics of the document-level scroll root.
    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Run `callback` once, on the next completed visual transition.
    fn on_transition_end_once(&self, callback: TransitionCallback) -> Self::Subscription;
}

/// Source of sleep futures.
pub trait Timer: Clone {
    /// Future returned by [`Timer::sleep`].
    type Sleep: Future<Output = ()>;

    /// A future that completes once `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> Self::Sleep;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_and_bottom_detection() {
        let top = ScrollMetrics {
            offset: 0.0,
            extent: 2000.0,
            viewport: 800.0,
        };
        assert!(top.at_top());
        assert!(!top.at_bottom());

        let bottom = ScrollMetrics {
            offset: 1200.0,
            extent: 2000.0,
            viewport: 800.0,
        };
        assert!(!bottom.at_top());
        assert!(bottom.at_bottom());

        // Content shorter than the viewport is both.
        let short = ScrollMetrics {
            offset: 0.0,
            extent: 600.0,
            viewport: 600.0,
        };
        assert!(short.at_top() && short.at_bottom());
    }

    #[test]
    fn middle_is_neither_edge() {
        let middle = ScrollMetrics {
            offset: 300.0,
            extent: 2000.0,
            viewport: 800.0,
        };
        assert!(!middle.at_top());
        assert!(!middle.at_bottom());
    }
}
