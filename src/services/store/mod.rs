//! Boundary to the external event store.
//!
//! The engine never persists anything. A successful drop hands one
//! [`RescheduleCommand`] to the store; retries, ordering and failures are the
//! store's business.

use crate::interaction::drag::RescheduleCommand;

#[cfg_attr(test, mockall::automock)]
pub trait EventStore {
    fn update_event(&mut self, command: &RescheduleCommand);
}
