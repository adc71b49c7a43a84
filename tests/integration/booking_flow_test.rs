//! Integration tests for the full front-desk booking flow.

mod helpers;

use helpers::{TestApp, date};
use innkeep_core::error::ErrorKind;
use innkeep_engine::BookingError;
use innkeep_entity::booking::{BookingFilter, BookingStatus};
use innkeep_entity::room::RoomStatus;

#[tokio::test]
async fn test_stay_from_booking_to_check_out() {
    let app = TestApp::new();
    let room = app.create_room("101", 2, 100).await;
    let guest = app.create_guest("Maria", "Santos").await;

    let booking = app.book(&room, &guest, "2024-06-01", "2024-06-05").await;
    assert_eq!(booking.total_amount, 400);

    let arrivals = app.state.bookings.arrivals(date("2024-06-01")).await.unwrap();
    assert_eq!(arrivals.len(), 1);

    app.state.bookings.check_in(booking.id).await.unwrap();
    assert_eq!(
        app.state.rooms.get(room.id).await.unwrap().status,
        RoomStatus::Occupied
    );

    let items = app.state.checklists.get(booking.id).await.unwrap();
    assert_eq!(items.len(), 8);
    for item in &items {
        app.state.checklists.toggle(item.id).await.unwrap();
    }
    assert!(app.state.checklists.progress(booking.id).await.unwrap().is_complete());

    let extended = app.state.bookings.extend(booking.id, 2).await.unwrap();
    assert_eq!(extended.check_out(), date("2024-06-07"));
    assert_eq!(extended.total_amount, 600);

    let departures = app.state.bookings.departures(date("2024-06-07")).await.unwrap();
    assert_eq!(departures.len(), 1);

    let done = app.state.bookings.check_out(booking.id).await.unwrap();
    assert_eq!(done.status, BookingStatus::CheckedOut);
    assert_eq!(
        app.state.rooms.get(room.id).await.unwrap().status,
        RoomStatus::Available
    );
}

#[tokio::test]
async fn test_overlapping_requests_are_rejected() {
    let app = TestApp::new();
    let room = app.create_room("101", 2, 100).await;
    let guest = app.create_guest("Maria", "Santos").await;
    let other = app.create_guest("John", "Reyes").await;

    let first = app.book(&room, &guest, "2024-06-01", "2024-06-05").await;

    let err = app
        .state
        .bookings
        .create_booking(TestApp::request(&room, &other, "2024-06-03", "2024-06-06"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    assert!(matches!(
        err.source_as::<BookingError>(),
        Some(BookingError::BookingConflict { conflicting, .. }) if *conflicting == first.id
    ));

    // Boundary touch is fine.
    app.book(&room, &other, "2024-06-05", "2024-06-08").await;

    // Active bookings of a room never overlap.
    let active = app
        .state
        .bookings
        .list_bookings(&BookingFilter::for_room(room.id).active())
        .await
        .unwrap();
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            assert!(!a.stay.overlaps(&b.stay));
        }
    }
}

#[tokio::test]
async fn test_failed_extension_leaves_booking_untouched() {
    let app = TestApp::new();
    let room = app.create_room("101", 2, 100).await;
    let guest = app.create_guest("Maria", "Santos").await;

    let booking = app.book(&room, &guest, "2024-06-01", "2024-06-05").await;
    app.book(&room, &guest, "2024-06-06", "2024-06-09").await;

    let err = app.state.bookings.extend(booking.id, 2).await.unwrap_err();
    assert!(matches!(
        err.source_as::<BookingError>(),
        Some(BookingError::ExtensionConflict { .. })
    ));

    let stored = app.state.bookings.get_booking(booking.id).await.unwrap();
    assert_eq!(stored, booking);
}

#[tokio::test]
async fn test_week_calendar_hides_checkout_day() {
    let app = TestApp::new();
    let room = app.create_room("101", 2, 100).await;
    app.create_room("102", 2, 100).await;
    let guest = app.create_guest("Maria", "Santos").await;
    let booking = app.book(&room, &guest, "2024-06-01", "2024-06-05").await;

    let week = app
        .state
        .bookings
        .week_calendar(date("2024-06-03"))
        .await
        .unwrap();
    assert_eq!(week.rows.len(), 1);

    let occupied: Vec<_> = week.rows[0]
        .days
        .iter()
        .filter(|cell| cell.bookings.contains(&booking.id))
        .map(|cell| cell.day)
        .collect();
    assert_eq!(occupied, vec![date("2024-06-03"), date("2024-06-04")]);
}
