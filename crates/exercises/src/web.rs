// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Browser implementations of the scheduling, notification and input traits.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::UnwrapThrowExt;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};

use crate::echo::InputSource;
use crate::notify::Notifier;
use crate::timer::{Scheduler, Task};

/// Longest delay `setTimeout` accepts, anything above overflows and fires at once.
const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;

/// Runs tasks on the browser event loop through `setTimeout`.
///
/// Delays longer than a single timeout can hold are covered by a chain of timeouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let (millis, rest) = split_delay(delay);

        // Nothing ever cancels a scheduled task.
        if rest.is_zero() {
            Timeout::new(millis, task).forget();
        } else {
            Timeout::new(millis, move || GlooScheduler.schedule(rest, task)).forget();
        }
    }
}

/// Split `delay` into whole milliseconds for the next timeout, rounded up,
/// and whatever is left over once that timeout has fired.
fn split_delay(delay: Duration) -> (u32, Duration) {
    let millis = delay.as_nanos().div_ceil(1_000_000);
    let millis = u32::try_from(millis).unwrap_or(u32::MAX).min(MAX_TIMEOUT_MS);

    (millis, delay.saturating_sub(Duration::from_millis(millis.into())))
}

/// Shows notifications with `window.alert`, which blocks until dismissed.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        web_sys::window()
            .expect_throw("no global `window` exists")
            .alert_with_message(message)
            .unwrap_throw();
    }
}

impl InputSource for HtmlInputElement {
    fn read_text(&self) -> Option<String> {
        Some(self.value())
    }
}

impl InputSource for HtmlTextAreaElement {
    fn read_text(&self) -> Option<String> {
        Some(self.value())
    }
}
