// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pull_refresh --heading-base-level=0

//! Understory Pull Refresh: a headless pull-to-refresh / pull-to-load-more controller.
//!
//! [`PullRefresh`] turns vertical pan gestures over a scrollable panel into
//! panel displacement and, once a threshold is crossed at the top or bottom
//! edge, into a caller-supplied asynchronous refresh or load-more operation.
//!
//! The crate does **not** recognize gestures, lay anything out, or fetch
//! data. Callers are expected to:
//! - Provide a DOM-like host through the traits in [`host`]
//!   (`understory_pull_refresh_web` implements them with `web-sys`;
//!   [`headless`] implements them in memory).
//! - Attach a pan recognizer ([`PanRecognizer`]) and forward its phases as
//!   [`PanEvent`]s to [`PullRefresh::handle`].
//! - Honor [`Response::default_prevented`] and spawn any returned
//!   [`Sequence`] on a local executor.
//! - Style the state classes ([`StateClass`]) the controller toggles on the
//!   container: `top-refresh`, `bottom-refresh`, `top-loading`,
//!   `bottom-loading`, `top-reset`, `bottom-reset`.
//!
//! ## Behavior
//!
//! - A gesture that starts scrolled to the top arms the refresh axis; one that
//!   starts scrolled to the bottom arms the load-more axis.
//! - Moves divide the raw distance by the resistance (default 2.5), translate
//!   the content element, and add the edge's `*-refresh` class once the
//!   result exceeds the threshold (default 60 px).
//! - Releasing with `*-refresh` present adds `*-loading` and runs the edge's
//!   operation. The loading class stays for at least the minimum loading
//!   duration (default 200 ms), even when the operation finishes sooner.
//! - Resetting an edge removes its classes, adds `*-reset`, and removes that
//!   once the host reports the next finished transition. A new gesture
//!   cancels a reset that is still waiting.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use futures::executor::LocalPool;
//! use futures::task::LocalSpawnExt;
//! use understory_pull_refresh::headless::{
//!     HeadlessDocument, HeadlessElement, ManualTimer, RecordingRecognizer,
//! };
//! use understory_pull_refresh::host::ScrollMetrics;
//! use understory_pull_refresh::{PanEvent, PullRefresh, PullRefreshOptions, StateClass};
//!
//! let document = HeadlessDocument::new();
//! let container = HeadlessElement::new();
//! document.insert(".container", container.clone());
//! document.insert(".content", HeadlessElement::new());
//! document.insert(".top", HeadlessElement::new());
//! document.set_scroll_metrics(ScrollMetrics { offset: 0.0, extent: 1000.0, viewport: 600.0 });
//!
//! let timer = ManualTimer::new();
//! let mut recognizer = RecordingRecognizer::default();
//! let options = PullRefreshOptions::new().on_refresh(|| async {
//!     // Fetch fresh content here.
//! });
//! let mut ptr = PullRefresh::init(document, timer.clone(), &mut recognizer, options).unwrap();
//!
//! // Pull down 160 px: 160 / 2.5 = 64 > 60, so the refresh is armed.
//! ptr.handle(PanEvent::start());
//! assert!(ptr.handle(PanEvent::down(160.0)).default_prevented);
//! assert!(container.has_class(StateClass::TopRefresh));
//!
//! // Release: the refresh runs and the loading class shows for at least 200 ms.
//! let sequence = ptr.handle(PanEvent::end()).sequence.unwrap();
//! assert!(container.has_class(StateClass::TopLoading));
//!
//! let mut pool = LocalPool::new();
//! pool.spawner().spawn_local(sequence).unwrap();
//! pool.run_until_stalled();
//! timer.advance(Duration::from_millis(200));
//! pool.run_until_stalled();
//! assert!(!container.has_class(StateClass::TopLoading));
//! assert!(container.has_class(StateClass::TopReset));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//!
//! This crate is `no_std` compatible (with `alloc`). State is shared through
//! `Rc`, so a controller and its sequences stay on one thread.

#![no_std]

extern crate alloc;

mod class;
mod controller;
mod gesture;
pub mod headless;
pub mod host;
mod options;

pub use class::{Edge, StateClass, StateClasses};
pub use controller::{AxisState, ContainerState, PullRefresh, Response, Sequence};
pub use gesture::{PanDirection, PanEvent, PanOptions, PanPhase, PanRecognizer, TouchAction};
pub use options::{
    DEFAULT_DISTANCE_TO_REFRESH, DEFAULT_MIN_LOADING_DURATION, DEFAULT_RESISTANCE, ElementRole,
    InitError, LoadFn, PullRefreshOptions, Selectors,
};
