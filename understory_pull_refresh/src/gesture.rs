// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan gesture plumbing between an external recognizer and the controller.
//!
//! Recognition itself happens elsewhere. The controller only asks for a
//! recognizer to be attached to the content element ([`PanRecognizer`]) and
//! expects the host to forward the recognized phases as [`PanEvent`]s.

use kurbo::Vec2;

/// Phase of a pan gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PanPhase {
    /// `panstart`: the pan crossed the recognizer's threshold.
    Start,
    /// `pandown`: the pointer is moving toward positive Y.
    Down,
    /// `panup`: the pointer is moving toward negative Y.
    Up,
    /// `panend`: the pointer was released.
    End,
}

/// A recognized pan event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanEvent {
    /// Which phase this event reports.
    pub phase: PanPhase,
    /// Cumulative distance from the gesture's origin, in pixels.
    pub distance: f64,
}

impl PanEvent {
    /// A pan start event.
    pub fn start() -> Self {
        Self {
            phase: PanPhase::Start,
            distance: 0.0,
        }
    }

    /// A downward move with cumulative `distance`.
    pub fn down(distance: f64) -> Self {
        Self {
            phase: PanPhase::Down,
            distance,
        }
    }

    /// An upward move with cumulative `distance`.
    pub fn up(distance: f64) -> Self {
        Self {
            phase: PanPhase::Up,
            distance,
        }
    }

    /// A pan end event.
    pub fn end() -> Self {
        Self {
            phase: PanPhase::End,
            distance: 0.0,
        }
    }

    /// A move event from the cumulative 2D `delta` since the gesture's origin.
    ///
    /// The distance is the length of `delta`; the phase is [`PanPhase::Down`]
    /// for a non-negative vertical component and [`PanPhase::Up`] otherwise.
    pub fn from_delta(delta: Vec2) -> Self {
        let phase = if delta.y < 0.0 {
            PanPhase::Up
        } else {
            PanPhase::Down
        };
        Self {
            phase,
            distance: delta.hypot(),
        }
    }
}

/// Directions a pan recognizer reports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Vertical pans only; horizontal pans stay available to other gestures.
    #[default]
    Vertical,
    /// Horizontal pans only.
    Horizontal,
    /// Pans in any direction.
    All,
}

/// Browser touch-action the recognizer should install on its element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// Leave native touch behavior untouched.
    #[default]
    Auto,
    /// Let the recognizer compute a touch-action from its enabled gestures.
    Compute,
    /// Disable native panning and zooming.
    None,
}

/// Options passed to [`PanRecognizer::attach`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PanOptions {
    /// Directions to report.
    pub direction: PanDirection,
    /// Touch-action for the element.
    pub touch_action: TouchAction,
}

impl PanOptions {
    /// Vertical-only pans with the `auto` touch-action.
    pub const VERTICAL: Self = Self {
        direction: PanDirection::Vertical,
        touch_action: TouchAction::Auto,
    };
}

/// An external pan gesture recognizer.
pub trait PanRecognizer<E> {
    /// Start recognizing pans on `element`.
    fn attach(&mut self, element: &E, options: PanOptions);
}
