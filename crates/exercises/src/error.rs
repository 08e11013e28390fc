// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cell::{BorrowError, BorrowMutError};

/// Error type returned by state updates and input handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The state has already been dropped, happens if a deferred update
    /// fires after its component has been torn down.
    #[error("Could not update state: State was dropped")]
    StateDropped,

    /// Attempted to touch the state while it is being updated, or while
    /// subscribers are being notified of an update.
    #[error("Cycle detected: Attempting to update state during an ongoing update")]
    CycleDetected,

    /// The event target had no text that could be read.
    #[error("Event target has no readable text")]
    UnreadableInput,
}

impl From<BorrowMutError> for Error {
    fn from(_: BorrowMutError) -> Self {
        Error::CycleDetected
    }
}

impl From<BorrowError> for Error {
    fn from(_: BorrowError) -> Self {
        Error::CycleDetected
    }
}
