// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edges and the CSS state classes the controller toggles on the container.
//!
//! The controller never styles anything itself. It only adds and removes the
//! class names below on the container element; the host's stylesheet decides
//! what "refresh armed", "loading" and "resetting" look like.

use core::fmt;

/// One of the two pullable edges of the scroll container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The top edge: pulling down past it requests a refresh.
    Top,
    /// The bottom edge: pulling up past it requests more content.
    Bottom,
}

impl Edge {
    /// Both edges, top first.
    pub const ALL: [Self; 2] = [Self::Top, Self::Bottom];

    /// Class present while the pull on this edge is past the threshold.
    pub const fn refresh_class(self) -> StateClass {
        match self {
            Self::Top => StateClass::TopRefresh,
            Self::Bottom => StateClass::BottomRefresh,
        }
    }

    /// Class present while this edge's callback is running.
    pub const fn loading_class(self) -> StateClass {
        match self {
            Self::Top => StateClass::TopLoading,
            Self::Bottom => StateClass::BottomLoading,
        }
    }

    /// Class present while this edge animates back to rest.
    pub const fn reset_class(self) -> StateClass {
        match self {
            Self::Top => StateClass::TopReset,
            Self::Bottom => StateClass::BottomReset,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
        }
    }
}

/// A state class applied to the container element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateClass {
    /// `top-refresh`: the top pull is past the threshold.
    TopRefresh,
    /// `bottom-refresh`: the bottom pull is past the threshold.
    BottomRefresh,
    /// `top-loading`: the refresh callback is running.
    TopLoading,
    /// `bottom-loading`: the load-more callback is running.
    BottomLoading,
    /// `top-reset`: the top edge is transitioning back to rest.
    TopReset,
    /// `bottom-reset`: the bottom edge is transitioning back to rest.
    BottomReset,
}

impl StateClass {
    /// Every state class, in a stable order.
    pub const ALL: [Self; 6] = [
        Self::TopRefresh,
        Self::BottomRefresh,
        Self::TopLoading,
        Self::BottomLoading,
        Self::TopReset,
        Self::BottomReset,
    ];

    /// The CSS class name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopRefresh => "top-refresh",
            Self::BottomRefresh => "bottom-refresh",
            Self::TopLoading => "top-loading",
            Self::BottomLoading => "bottom-loading",
            Self::TopReset => "top-reset",
            Self::BottomReset => "bottom-reset",
        }
    }

    /// The flag bit for this class in a [`StateClasses`] set.
    pub const fn flag(self) -> StateClasses {
        match self {
            Self::TopRefresh => StateClasses::TOP_REFRESH,
            Self::BottomRefresh => StateClasses::BOTTOM_REFRESH,
            Self::TopLoading => StateClasses::TOP_LOADING,
            Self::BottomLoading => StateClasses::BOTTOM_LOADING,
            Self::TopReset => StateClasses::TOP_RESET,
            Self::BottomReset => StateClasses::BOTTOM_RESET,
        }
    }
}

impl fmt::Display for StateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// A compact set of [`StateClass`] values.
    ///
    /// Used by hosts that keep class state in memory rather than in a DOM
    /// token list, such as [`HeadlessClassList`](crate::headless::HeadlessClassList).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StateClasses: u8 {
        /// `top-refresh`
        const TOP_REFRESH    = 0b0000_0001;
        /// `bottom-refresh`
        const BOTTOM_REFRESH = 0b0000_0010;
        /// `top-loading`
        const TOP_LOADING    = 0b0000_0100;
        /// `bottom-loading`
        const BOTTOM_LOADING = 0b0000_1000;
        /// `top-reset`
        const TOP_RESET      = 0b0001_0000;
        /// `bottom-reset`
        const BOTTOM_RESET   = 0b0010_0000;
    }
}

impl From<StateClass> for StateClasses {
    fn from(class: StateClass) -> Self {
        class.flag()
    }
}
