// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pull_refresh_web --heading-base-level=0

//! Browser DOM host for `understory_pull_refresh`.
//!
//! This crate implements the `understory_pull_refresh::host` traits on top of
//! `web_sys` when targeting `wasm32`:
//!
//! - `WebDocument`: `querySelector` lookups, scroll metrics of the
//!   document's scrolling element (falling back to `<body>`), and one-shot
//!   `transitionend` listeners on `<body>`.
//! - `WebElement` / `WebClassList`: `classList` mutation and a
//!   `translate3d` transform on the content element.
//! - `WebTimer`: `setTimeout`-backed sleeps.
//!
//! Gesture recognition is not included. Attach whichever pan recognizer the
//! page already uses (for example, Hammer.js through your own bindings),
//! implement `PanRecognizer` for it, and forward its `panstart` / `pandown` /
//! `panup` / `panend` callbacks to `PullRefresh::handle`. Spawn returned
//! sequences with `wasm_bindgen_futures::spawn_local` or an equivalent local
//! executor.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn host() -> Option<(
//!     understory_pull_refresh_web::WebDocument,
//!     understory_pull_refresh_web::WebTimer,
//! )> {
//!     understory_pull_refresh_web::window_host()
//! }
//! ```
//!
//! On other targets this crate is empty.

#![no_std]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{
    WebClassList, WebDocument, WebElement, WebSleep, WebSubscription, WebTimer, window_host,
};
