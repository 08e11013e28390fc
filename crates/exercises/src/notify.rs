// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-visible notifications

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

/// Presents a blocking, user-dismissable message.
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<N> Notifier for &N
where
    N: Notifier + ?Sized,
{
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

impl<N> Notifier for Rc<N>
where
    N: Notifier + ?Sized,
{
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

/// A [`Notifier`] that keeps every message instead of showing it.
/// Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct NotifyLog {
    messages: Rc<RefCell<Vec<String>>>,
}

impl NotifyLog {
    pub fn new() -> Self {
        NotifyLog::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Notifier for NotifyLog {
    fn notify(&self, message: &str) {
        debug!("notification: {message}");

        self.messages.borrow_mut().push(message.to_owned());
    }
}
