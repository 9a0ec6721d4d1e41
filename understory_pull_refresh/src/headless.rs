// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory host for running the controller without a browser.
//!
//! Elements keep their classes in a [`StateClasses`] set and remember their
//! last translation; the document keeps a selector table, scroll metrics set
//! by the caller, and a queue of transition listeners that the caller flushes
//! with [`HeadlessDocument::finish_transition`]. Time only moves when
//! [`ManualTimer::advance`] is called.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::future::Future;
use core::mem;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use core::time::Duration;

use kurbo::Vec2;

use crate::class::{StateClass, StateClasses};
use crate::gesture::{PanOptions, PanRecognizer};
use crate::host::{
    ClassList, Document, Element, ScrollMetrics, Subscription, Timer, TransitionCallback,
};

/// Class list stored as a shared [`StateClasses`] set.
#[derive(Clone, Debug, Default)]
pub struct HeadlessClassList(Rc<Cell<StateClasses>>);

impl HeadlessClassList {
    /// Current contents.
    pub fn get(&self) -> StateClasses {
        self.0.get()
    }
}

impl ClassList for HeadlessClassList {
    fn add(&self, class: StateClass) {
        self.0.set(self.0.get() | class.flag());
    }

    fn remove(&self, class: StateClass) {
        self.0.set(self.0.get() - class.flag());
    }

    fn contains(&self, class: StateClass) -> bool {
        self.0.get().contains(class.flag())
    }
}

#[derive(Debug, Default)]
struct ElementInner {
    classes: HeadlessClassList,
    translation: Cell<Option<Vec2>>,
}

/// A shared handle to an in-memory element.
#[derive(Clone, Debug, Default)]
pub struct HeadlessElement(Rc<ElementInner>);

impl HeadlessElement {
    /// A fresh element with no classes and no translation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both handles refer to the same element.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Last translation set on the element.
    pub fn translation(&self) -> Option<Vec2> {
        self.0.translation.get()
    }

    /// Classes currently applied.
    pub fn classes(&self) -> StateClasses {
        self.0.classes.get()
    }

    /// Whether `class` is applied.
    pub fn has_class(&self, class: StateClass) -> bool {
        self.0.classes.contains(class)
    }
}

impl Element for HeadlessElement {
    type ClassList = HeadlessClassList;

    fn class_list(&self) -> HeadlessClassList {
        self.0.classes.clone()
    }

    fn set_translation(&self, offset: Option<Vec2>) {
        self.0.translation.set(offset);
    }
}

#[derive(Default)]
struct DocumentInner {
    elements: RefCell<Vec<(String, HeadlessElement)>>,
    scroll: Cell<ScrollMetrics>,
    listeners: RefCell<Vec<(u64, TransitionCallback)>>,
    next_listener: Cell<u64>,
}

/// A shared handle to an in-memory document.
#[derive(Clone, Default)]
pub struct HeadlessDocument(Rc<DocumentInner>);

impl fmt::Debug for HeadlessDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessDocument")
            .field("elements", &self.0.elements.borrow())
            .field("scroll", &self.0.scroll.get())
            .field("pending_listeners", &self.pending_transition_listeners())
            .finish()
    }
}

impl HeadlessDocument {
    /// An empty document scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `element` the match for `selector`, replacing any earlier one.
    pub fn insert(&self, selector: &str, element: HeadlessElement) {
        let mut elements = self.0.elements.borrow_mut();
        elements.retain(|(existing, _)| existing != selector);
        elements.push((selector.into(), element));
    }

    /// Set what [`Document::scroll_metrics`] reports.
    pub fn set_scroll_metrics(&self, metrics: ScrollMetrics) {
        self.0.scroll.set(metrics);
    }

    /// Number of transition listeners waiting to fire.
    pub fn pending_transition_listeners(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    /// Report a completed transition, running every waiting listener once.
    ///
    /// Returns the number of listeners that ran.
    pub fn finish_transition(&self) -> usize {
        let listeners = mem::take(&mut *self.0.listeners.borrow_mut());
        let count = listeners.len();
        for (_, callback) in listeners {
            callback();
        }
        count
    }
}

impl Document for HeadlessDocument {
    type Element = HeadlessElement;
    type Subscription = HeadlessSubscription;

    fn query_selector(&self, selector: &str) -> Option<HeadlessElement> {
        self.0
            .elements
            .borrow()
            .iter()
            .find(|(existing, _)| existing == selector)
            .map(|(_, element)| element.clone())
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.0.scroll.get()
    }

    fn on_transition_end_once(&self, callback: TransitionCallback) -> HeadlessSubscription {
        let id = self.0.next_listener.get();
        self.0.next_listener.set(id + 1);
        self.0.listeners.borrow_mut().push((id, callback));
        HeadlessSubscription {
            id,
            document: Rc::downgrade(&self.0),
        }
    }
}

/// Handle to a listener registered on a [`HeadlessDocument`].
#[derive(Debug)]
pub struct HeadlessSubscription {
    id: u64,
    document: Weak<DocumentInner>,
}

impl Subscription for HeadlessSubscription {
    fn cancel(self) {
        if let Some(document) = self.document.upgrade() {
            document.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

#[derive(Debug, Default)]
struct TimerInner {
    now: Duration,
    wakers: Vec<Waker>,
}

/// A clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer(Rc<RefCell<TimerInner>>);

impl ManualTimer {
    /// A timer at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.0.borrow().now
    }

    /// Move time forward by `by` and wake every waiting sleep.
    pub fn advance(&self, by: Duration) {
        let wakers = {
            let mut inner = self.0.borrow_mut();
            inner.now += by;
            mem::take(&mut inner.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }
}

impl Timer for ManualTimer {
    type Sleep = Sleep;

    fn sleep(&self, duration: Duration) -> Sleep {
        Sleep {
            timer: self.clone(),
            deadline: self.now() + duration,
        }
    }
}

/// Future returned by [`ManualTimer::sleep`].
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Sleep {
    timer: ManualTimer,
    deadline: Duration,
}

impl Future for Sleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut inner = self.timer.0.borrow_mut();
        if inner.now >= self.deadline {
            Poll::Ready(())
        } else {
            inner.wakers.push(cx.waker().clone());
            Poll::Pending
        }
    }
}

/// A recognizer that records attachments instead of recognizing anything.
#[derive(Clone, Debug, Default)]
pub struct RecordingRecognizer {
    attached: Vec<PanOptions>,
}

impl RecordingRecognizer {
    /// Options of every attachment so far.
    pub fn attachments(&self) -> &[PanOptions] {
        &self.attached
    }
}

impl<E> PanRecognizer<E> for RecordingRecognizer {
    fn attach(&mut self, _element: &E, options: PanOptions) {
        self.attached.push(options);
    }
}
