//! Integration tests for saving and reloading the data snapshot.

mod helpers;

use helpers::TestApp;
use chrono::NaiveDate;
use innkeep_core::error::ErrorKind;
use innkeep_entity::booking::{BookingFilter, BookingStatus};
use innkeep_entity::expense::NewExpense;
use innkeep_entity::inventory::NewInventoryItem;
use innkeep_store::Snapshot;

#[tokio::test]
async fn test_state_survives_reopen() {
    let app = TestApp::new();
    let room = app.create_room("101", 2, 100).await;
    let guest = app.create_guest("Maria", "Santos").await;
    let booking = app.book(&room, &guest, "2024-06-01", "2024-06-05").await;
    app.state.bookings.check_in(booking.id).await.unwrap();
    app.state
        .inventory
        .create(NewInventoryItem {
            name: "Bath towel".to_string(),
            category: "Linen".to_string(),
            quantity: 40,
            current_level: 5,
            minimum_level: 10,
            unit: "pcs".to_string(),
            notes: None,
        })
        .await
        .unwrap();
    app.save().await;

    let reopened = app.reopen().await;
    let bookings = reopened
        .bookings
        .list_bookings(&BookingFilter::all())
        .await
        .unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].status, BookingStatus::CheckedIn);
    assert_eq!(reopened.checklists.get(booking.id).await.unwrap().len(), 8);
    assert_eq!(reopened.guests.search("santos").await.unwrap().len(), 1);
    assert_eq!(reopened.inventory.low_stock().await.unwrap().len(), 1);

    // The reloaded store still enforces overlaps.
    let err = reopened
        .bookings
        .create_booking(TestApp::request(&room, &guest, "2024-06-02", "2024-06-03"))
        .await;
    assert!(err.is_err());
}

#[tokio::test]
async fn test_reopen_without_snapshot_is_empty() {
    let app = TestApp::new();
    let reopened = app.reopen().await;
    assert!(reopened
        .rooms
        .list(Default::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_expenses_survive_reopen() {
    let app = TestApp::new();
    let june = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
    for (description, amount, day) in [("Plumber", 250, 3), ("Detergent", 40, 1)] {
        app.state
            .expenses
            .record(NewExpense {
                description: description.to_string(),
                amount,
                date_incurred: june(day),
            })
            .await
            .unwrap();
    }
    app.save().await;

    let reopened = app.reopen().await;
    let summary = reopened.expenses.list(Some(june(2)), None).await.unwrap();
    assert_eq!(summary.expenses.len(), 1);
    assert_eq!(summary.expenses[0].description, "Plumber");
    assert_eq!(summary.total, 250);
}

#[tokio::test]
async fn test_hand_edited_snapshot_is_rejected() {
    let app = TestApp::new();
    app.state
        .inventory
        .create(NewInventoryItem {
            name: "Soap".to_string(),
            category: "Toiletries".to_string(),
            quantity: 10,
            current_level: 10,
            minimum_level: 2,
            unit: "pcs".to_string(),
            notes: None,
        })
        .await
        .unwrap();
    app.save().await;

    let text = std::fs::read_to_string(&app.snapshot_path).unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&text).unwrap();
    json["inventory"][0]["current_level"] = serde_json::json!(99);
    std::fs::write(&app.snapshot_path, json.to_string()).unwrap();

    let err = Snapshot::load(&app.snapshot_path).await.unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}
