// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Input echo
//!
//! A text field that mirrors whatever is typed into it, and a button that
//! pops up a fixed alert.

use log::debug;

use crate::notify::Notifier;
use crate::store::{Store, Then};
use crate::Error;

pub const ALERT_MESSAGE: &str = "I'm an alert!";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EchoState {
    /// Text of the last observed input event, empty until the first one.
    pub value: String,
}

/// Target of an input event whose current text can be read.
pub trait InputSource {
    /// Current text of the target, `None` if it has none.
    fn read_text(&self) -> Option<String>;
}

impl InputSource for str {
    fn read_text(&self) -> Option<String> {
        Some(self.to_owned())
    }
}

impl InputSource for String {
    fn read_text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl<T> InputSource for &T
where
    T: InputSource + ?Sized,
{
    fn read_text(&self) -> Option<String> {
        (**self).read_text()
    }
}

impl<T> InputSource for Option<T>
where
    T: InputSource,
{
    fn read_text(&self) -> Option<String> {
        self.as_ref().and_then(T::read_text)
    }
}

/// Show [`ALERT_MESSAGE`]. Reads and writes no state.
pub fn show_alert<N>(notifier: &N)
where
    N: Notifier + ?Sized,
{
    notifier.notify(ALERT_MESSAGE);
}

/// Copy the text of `source` into `state.value`, verbatim.
///
/// If the source has no readable text the state is left untouched.
pub fn get_input<I>(state: &mut EchoState, source: &I) -> Result<(), Error>
where
    I: InputSource + ?Sized,
{
    state.value = source.read_text().ok_or(Error::UnreadableInput)?;

    Ok(())
}

/// A mounted input echo widget.
pub struct InputEcho<N> {
    store: Store<EchoState>,
    notifier: N,
}

impl<N: Notifier> InputEcho<N> {
    pub fn new(notifier: N) -> Self {
        InputEcho {
            store: Store::default(),
            notifier,
        }
    }

    /// The observable state of this widget, subscribe to it to render.
    pub fn store(&self) -> &Store<EchoState> {
        &self.store
    }

    pub fn value(&self) -> Result<String, Error> {
        self.store.with(|state| state.value.clone())
    }

    pub fn show_alert(&self) {
        show_alert(&self.notifier);
    }

    /// Handle an input event, subscribers are notified on success.
    pub fn get_input<I>(&self, source: &I) -> Result<(), Error>
    where
        I: InputSource + ?Sized,
    {
        let mut outcome = Ok(());

        self.store.update(|state| {
            outcome = get_input(state, source);

            match outcome {
                Ok(()) => Then::Render,
                Err(_) => Then::Stop,
            }
        })?;

        if let Err(err) = outcome {
            debug!("input event ignored: {err}");
        }

        outcome
    }
}
