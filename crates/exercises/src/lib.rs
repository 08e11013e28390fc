// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Exercises
//!
//! _Two tiny reactive widgets, with the moving parts spelled out._
//!
//! The crate holds everything the demos need that is not markup:
//!
//! * [`Store`](store::Store): an observable state container. Mutations go through
//!   [`update`](store::Store::update) and notify subscribers, which is how a view
//!   learns it has to render again.
//! * [`Scheduler`](timer::Scheduler): one-shot deferred actions. [`TimerQueue`](timer::TimerQueue)
//!   runs them against a manual clock, `web::GlooScheduler` against the browser event loop.
//! * [`Notifier`](notify::Notifier): blocking, user-visible notifications.
//! * The two components: [`InputEcho`](echo::InputEcho) and [`EffectToggle`](effect::EffectToggle).
//!
//! ```
//! use std::time::Duration;
//! use exercises::prelude::*;
//!
//! let timers = TimerQueue::new();
//! let toggle = EffectToggle::new(timers.clone());
//!
//! toggle.start_effect();
//! assert_eq!(toggle.state().unwrap().phase(), Some(Phase::Highlighted));
//!
//! timers.advance(Duration::from_millis(1500));
//! assert_eq!(toggle.state().unwrap().phase(), Some(Phase::Shrunk));
//! ```

mod error;

pub mod echo;
pub mod effect;
pub mod notify;
pub mod store;
pub mod timer;

#[cfg(feature = "web")]
pub mod web;

pub use error::Error;

/// The prelude module with most commonly used types.
pub mod prelude {
    pub use crate::echo::{EchoState, InputEcho, InputSource};
    pub use crate::effect::{EffectState, EffectToggle, Phase};
    pub use crate::notify::{Notifier, NotifyLog};
    pub use crate::store::{ShouldRender, Signal, Store, Then};
    pub use crate::timer::{Scheduler, TimerQueue};
    pub use crate::Error;
}
