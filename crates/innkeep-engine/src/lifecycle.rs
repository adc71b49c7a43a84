//! Booking status transition guard.

use tracing::debug;

use innkeep_entity::booking::BookingStatus;

use crate::error::BookingError;

/// Reject any status change that is not a lifecycle edge.
///
/// The engine only judges the move; persisting the new status is up to the
/// booking store.
pub fn ensure_transition(from: BookingStatus, to: BookingStatus) -> Result<(), BookingError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        debug!(%from, %to, "Rejected booking status transition");
        Err(BookingError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_in_from_confirmed() {
        assert!(ensure_transition(BookingStatus::Confirmed, BookingStatus::CheckedIn).is_ok());
    }

    #[test]
    fn test_cancel_after_check_in_rejected() {
        assert_eq!(
            ensure_transition(BookingStatus::CheckedIn, BookingStatus::Cancelled),
            Err(BookingError::InvalidTransition {
                from: BookingStatus::CheckedIn,
                to: BookingStatus::Cancelled,
            })
        );
    }
}
