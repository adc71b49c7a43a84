//! Service wiring shared by every front end.

use std::sync::Arc;

use innkeep_core::config::AppConfig;
use innkeep_core::error::AppError;
use innkeep_engine::CalendarOptions;
use innkeep_store::MemoryStore;

use crate::booking::BookingService;
use crate::checklist::{ChecklistService, ChecklistTemplate};
use crate::expense::ExpenseService;
use crate::guest::GuestService;
use crate::inventory::InventoryService;
use crate::room::RoomService;

/// All services, built over one store.
///
/// Cloning is cheap: every field is `Arc`-backed.
#[derive(Debug, Clone)]
pub struct ServiceState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The backing store, kept for snapshotting.
    pub store: Arc<MemoryStore>,
    pub bookings: BookingService,
    pub checklists: ChecklistService,
    pub expenses: ExpenseService,
    pub guests: GuestService,
    pub inventory: InventoryService,
    pub rooms: RoomService,
}

impl ServiceState {
    /// Wires every service to `store`.
    ///
    /// Fails when the calendar or checklist sections of `config` do not
    /// parse.
    pub fn new(config: AppConfig, store: MemoryStore) -> Result<Self, AppError> {
        let calendar = CalendarOptions::try_from(&config.calendar)?;
        let template = ChecklistTemplate::try_from(&config.checklist)?;
        let store = Arc::new(store);

        Ok(Self {
            bookings: BookingService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                template.clone(),
                calendar,
            ),
            checklists: ChecklistService::new(store.clone(), store.clone(), template),
            expenses: ExpenseService::new(store.clone()),
            guests: GuestService::new(store.clone(), store.clone()),
            inventory: InventoryService::new(store.clone(), config.inventory.low_stock_inclusive),
            rooms: RoomService::new(store.clone(), store.clone()),
            config: Arc::new(config),
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innkeep_core::error::ErrorKind;

    #[test]
    fn test_rejects_bad_calendar_config() {
        let mut config = AppConfig::default();
        config.calendar.week_starts_on = "caturday".to_string();
        let err = ServiceState::new(config, MemoryStore::new()).unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_builds_with_defaults() {
        let state = ServiceState::new(AppConfig::default(), MemoryStore::new()).unwrap();
        assert_eq!(
            state.bookings.calendar_options().week_starts_on,
            chrono::Weekday::Mon
        );
    }
}
