// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Observable state
//!
//! A [`Store`] owns some state `S` together with a list of subscribers. Every
//! mutation goes through [`Store::update`], and once the mutator returns the
//! subscribers are called with a shared reference to the new state. A view
//! subscribes once when it is mounted and renders again on every notification.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use exercises::effect::EffectState;
//! use exercises::store::{Store, Then};
//!
//! let effect = Store::new(EffectState::default());
//! let painted = Rc::new(RefCell::new(Vec::new()));
//!
//! let paint = painted.clone();
//! effect
//!     .subscribe(move |state: &EffectState| paint.borrow_mut().push(state.effect_classes()))
//!     .unwrap();
//!
//! // Dropping the highlight changes the classes, repaint
//! effect.update(|state| state.highlight_active = false).unwrap();
//!
//! // Switching shrink on only matters if it was off
//! effect
//!     .update(|state| {
//!         if state.shrink_active {
//!             Then::Stop
//!         } else {
//!             state.shrink_active = true;
//!             Then::Render
//!         }
//!     })
//!     .unwrap();
//!
//! assert_eq!(&*painted.borrow(), &["", "shrink"]);
//! ```
use std::cell::{Cell, RefCell};
use std::fmt::{self, Debug};
use std::rc::{Rc, Weak};

use log::trace;

use crate::Error;

/// Describes whether or not subscribers should be notified after state changes.
/// For uses see:
///
/// * [`Store::update`]
/// * [`Signal::update`]
pub trait ShouldRender {
    fn should_render(self) -> bool;
}

/// Closures without return type always notify.
impl ShouldRender for () {
    fn should_render(self) -> bool {
        true
    }
}

/// Describes whether or not subscribers should be notified after state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Then {
    /// This is a silent update
    Stop,
    /// Notify subscribers after this update
    Render,
}

impl ShouldRender for Then {
    fn should_render(self) -> bool {
        match self {
            Then::Stop => false,
            Then::Render => true,
        }
    }
}

/// Handle returned by [`Store::subscribe`], used to remove the subscriber again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Subscriber<S> = Box<dyn FnMut(&S)>;

struct Inner<S> {
    state: RefCell<S>,
    subscribers: RefCell<Vec<(Subscription, Subscriber<S>)>>,
    next_id: Cell<u64>,
}

impl<S> Inner<S> {
    fn update<F, O>(&self, mutator: F) -> Result<(), Error>
    where
        F: FnOnce(&mut S) -> O,
        O: ShouldRender,
    {
        let render = mutator(&mut *self.state.try_borrow_mut()?).should_render();

        if render {
            self.notify()?;
        }

        Ok(())
    }

    fn notify(&self) -> Result<(), Error> {
        // State stays borrowed while subscribers run, so any attempt to
        // mutate it from within a subscriber is reported as a cycle.
        let state = self.state.try_borrow()?;
        let mut subscribers = self.subscribers.try_borrow_mut()?;

        trace!("notifying {} subscriber(s)", subscribers.len());

        for (_, subscriber) in subscribers.iter_mut() {
            subscriber(&state);
        }

        Ok(())
    }
}

/// Owning handle to some observable state `S`.
///
/// Cloning a `Store` is cheap and produces another handle to the same state.
/// The state is dropped together with the last `Store` handle, at which point
/// any outstanding [`Signal`]s will fail to update it.
pub struct Store<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Store {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Store::new(S::default())
    }
}

impl<S: Debug> Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner.state.try_borrow() {
            Ok(state) => f.debug_tuple("Store").field(&*state).finish(),
            Err(_) => f.write_str("Store(<borrowed>)"),
        }
    }
}

impl<S> Store<S> {
    pub fn new(state: S) -> Self {
        Store {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Register a subscriber. It will be called with the current state after
    /// every update that renders, in the order subscribers were added.
    pub fn subscribe<F>(&self, subscriber: F) -> Result<Subscription, Error>
    where
        F: FnMut(&S) + 'static,
    {
        let mut subscribers = self.inner.subscribers.try_borrow_mut()?;

        let id = Subscription(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);

        subscribers.push((id, Box::new(subscriber)));

        trace!("subscribed {id:?}");

        Ok(id)
    }

    /// Remove a subscriber, returns `false` if it wasn't subscribed.
    pub fn unsubscribe(&self, id: Subscription) -> Result<bool, Error> {
        let mut subscribers = self.inner.subscribers.try_borrow_mut()?;
        let before = subscribers.len();

        subscribers.retain(|(sub, _)| *sub != id);

        Ok(subscribers.len() != before)
    }

    /// Mutate the state, then notify subscribers if the mutator asks for it.
    pub fn update<F, O>(&self, mutator: F) -> Result<(), Error>
    where
        F: FnOnce(&mut S) -> O,
        O: ShouldRender,
    {
        self.inner.update(mutator)
    }

    /// Same as [`update`](Store::update), but it never notifies subscribers.
    pub fn update_silent<F>(&self, mutator: F) -> Result<(), Error>
    where
        F: FnOnce(&mut S),
    {
        self.inner.update(move |state| {
            mutator(state);
            Then::Stop
        })
    }

    /// Replace the entire state with a new value and notify subscribers.
    pub fn set(&self, val: S) -> Result<(), Error> {
        self.update(move |s| *s = val)
    }

    /// Read the state.
    pub fn with<F, R>(&self, reader: F) -> Result<R, Error>
    where
        F: FnOnce(&S) -> R,
    {
        Ok(reader(&*self.inner.state.try_borrow()?))
    }

    /// Get the value of state if state implements `Copy`.
    pub fn get(&self) -> Result<S, Error>
    where
        S: Copy,
    {
        self.with(|state| *state)
    }

    /// Clone the current state.
    pub fn snapshot(&self) -> Result<S, Error>
    where
        S: Clone,
    {
        self.with(S::clone)
    }

    /// Create a weak [`Signal`] to this state.
    pub fn signal(&self) -> Signal<S> {
        Signal {
            weak: Rc::downgrade(&self.inner),
        }
    }
}

/// A weak handle to the state of a [`Store`].
///
/// `Signal` does not keep the state alive, which makes it the thing to hand to
/// deferred actions: they operate on whatever the state is when they run, and
/// become no-ops returning [`Error::StateDropped`] once the owner is gone.
pub struct Signal<S> {
    weak: Weak<Inner<S>>,
}

impl<S> Clone for Signal<S> {
    fn clone(&self) -> Self {
        Signal {
            weak: self.weak.clone(),
        }
    }
}

impl<S> Signal<S> {
    fn inner(&self) -> Result<Rc<Inner<S>>, Error> {
        self.weak.upgrade().ok_or(Error::StateDropped)
    }

    /// Update the state behind this `Signal`.
    pub fn update<F, O>(&self, mutator: F) -> Result<(), Error>
    where
        F: FnOnce(&mut S) -> O,
        O: ShouldRender,
    {
        self.inner()?.update(mutator)
    }

    /// Replace the entire state with a new value and notify subscribers.
    pub fn set(&self, val: S) -> Result<(), Error> {
        self.update(move |s| *s = val)
    }

    /// Returns `true` while at least one [`Store`] handle is alive.
    pub fn is_alive(&self) -> bool {
        self.weak.strong_count() > 0
    }
}
