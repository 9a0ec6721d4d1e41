// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `web_sys` implementations of the host traits.

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;

use futures::channel::oneshot;
use kurbo::Vec2;
use log::warn;
use understory_pull_refresh::StateClass;
use understory_pull_refresh::host::{
    ClassList, Document, Element, ScrollMetrics, Subscription, Timer, TransitionCallback,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, DomTokenList, Event, HtmlElement, Window};

const TRANSITION_END: &str = "transitionend";

/// The document and timer of the current window, if there is one.
pub fn window_host() -> Option<(WebDocument, WebTimer)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    Some((WebDocument::new(document), WebTimer::new(window)))
}

/// An element's `classList`.
#[derive(Clone, Debug)]
pub struct WebClassList(DomTokenList);

impl ClassList for WebClassList {
    fn add(&self, class: StateClass) {
        if let Err(err) = self.0.add_1(class.as_str()) {
            warn!("classList.add({class}) failed: {err:?}");
        }
    }

    fn remove(&self, class: StateClass) {
        if let Err(err) = self.0.remove_1(class.as_str()) {
            warn!("classList.remove({class}) failed: {err:?}");
        }
    }

    fn contains(&self, class: StateClass) -> bool {
        self.0.contains(class.as_str())
    }
}

/// Handle to an HTML element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebElement(HtmlElement);

impl WebElement {
    /// Wrap `element`.
    pub fn new(element: HtmlElement) -> Self {
        Self(element)
    }

    /// The wrapped element.
    pub fn as_html_element(&self) -> &HtmlElement {
        &self.0
    }
}

impl From<HtmlElement> for WebElement {
    fn from(element: HtmlElement) -> Self {
        Self(element)
    }
}

impl Element for WebElement {
    type ClassList = WebClassList;

    fn class_list(&self) -> WebClassList {
        WebClassList(self.0.class_list())
    }

    fn set_translation(&self, offset: Option<Vec2>) {
        let value = match offset {
            Some(offset) => format!("translate3d({}px, {}px, 0)", offset.x, offset.y),
            None => String::new(),
        };
        let style = self.0.style();
        for property in ["transform", "-webkit-transform"] {
            if let Err(err) = style.set_property(property, &value) {
                warn!("setting {property} failed: {err:?}");
            }
        }
    }
}

/// Handle to a DOM document.
#[derive(Clone, Debug)]
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    /// Wrap `document`.
    pub fn new(document: web_sys::Document) -> Self {
        Self(document)
    }
}

impl Document for WebDocument {
    type Element = WebElement;
    type Subscription = WebSubscription;

    fn query_selector(&self, selector: &str) -> Option<WebElement> {
        self.0
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(WebElement)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let root = self
            .0
            .scrolling_element()
            .or_else(|| self.0.body().map(Into::into));
        let Some(root) = root else {
            return ScrollMetrics::default();
        };
        ScrollMetrics {
            offset: f64::from(root.scroll_top()),
            extent: f64::from(root.scroll_height()),
            viewport: f64::from(root.client_height()),
        }
    }

    fn on_transition_end_once(&self, callback: TransitionCallback) -> WebSubscription {
        let closure: Closure<dyn FnMut(Event)> = Closure::once(move |_event: Event| callback());
        let target = self.0.body();
        if let Some(body) = &target {
            let options = AddEventListenerOptions::new();
            options.set_once(true);
            if let Err(err) = body.add_event_listener_with_callback_and_add_event_listener_options(
                TRANSITION_END,
                closure.as_ref().unchecked_ref(),
                &options,
            ) {
                warn!("adding {TRANSITION_END} listener failed: {err:?}");
            }
        }
        WebSubscription { target, closure }
    }
}

/// A `transitionend` listener registered on `<body>`.
///
/// The listener's closure lives as long as this handle.
pub struct WebSubscription {
    target: Option<HtmlElement>,
    closure: Closure<dyn FnMut(Event)>,
}

impl fmt::Debug for WebSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSubscription")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Subscription for WebSubscription {
    fn cancel(self) {
        if let Some(target) = &self.target {
            if let Err(err) = target.remove_event_listener_with_callback(
                TRANSITION_END,
                self.closure.as_ref().unchecked_ref(),
            ) {
                warn!("removing {TRANSITION_END} listener failed: {err:?}");
            }
        }
    }
}

/// Sleeps backed by `window.setTimeout`.
#[derive(Clone, Debug)]
pub struct WebTimer(Window);

impl WebTimer {
    /// Schedule timeouts on `window`.
    pub fn new(window: Window) -> Self {
        Self(window)
    }
}

impl Timer for WebTimer {
    type Sleep = WebSleep;

    fn sleep(&self, duration: Duration) -> WebSleep {
        let (tx, rx) = oneshot::channel();
        let callback = Closure::<dyn FnMut()>::once_into_js(move || {
            // The receiver may be gone if the sequence was dropped.
            let _ = tx.send(());
        });
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = self
            .0
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            warn!("setTimeout failed: {err:?}");
        }
        WebSleep(rx)
    }
}

/// Future returned by [`WebTimer::sleep`].
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct WebSleep(oneshot::Receiver<()>);

impl Future for WebSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        // A cancelled sender means the timeout can never fire; treat it as elapsed.
        Pin::new(&mut self.0).poll(cx).map(|_| ())
    }
}
