//! Integration tests for the Booking repository using in-memory SurrealDB.

use chrono::{Days, NaiveDate, Utc};
use roombook_core::error::RoombookError;
use roombook_core::models::booking::{BookingStatus, CreateBooking};
use roombook_core::models::campus::CreateCampus;
use roombook_core::models::room::CreateRoom;
use roombook_core::models::slot::RoomSlot;
use roombook_core::repository::{
    BookingRepository, CampusRepository, Pagination, RoomRepository,
};
use roombook_db::repository::{
    SurrealBookingRepository, SurrealCampusRepository, SurrealRoomRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

struct Fixture {
    db: Surreal<Db>,
    bookings: SurrealBookingRepository<Db>,
    rooms: SurrealRoomRepository<Db>,
    room_a: Uuid,
    room_b: Uuid,
}

async fn setup() -> Fixture {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    roombook_db::run_migrations(&db).await.unwrap();

    let campus = SurrealCampusRepository::new(db.clone())
        .create(CreateCampus {
            name: "Main".into(),
        })
        .await
        .unwrap();

    let rooms = SurrealRoomRepository::new(db.clone());
    let mut ids = Vec::new();
    for code in ["A101", "B202"] {
        let room = rooms
            .create(CreateRoom {
                campus_id: campus.id,
                code: code.into(),
                room_type: "Lecture".into(),
                capacity: 30,
            })
            .await
            .unwrap();
        ids.push(room.id);
    }

    Fixture {
        bookings: SurrealBookingRepository::new(db.clone()),
        rooms,
        room_a: ids[0],
        room_b: ids[1],
        db,
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn in_days(n: u64) -> NaiveDate {
    today() + Days::new(n)
}

fn request(user_id: Uuid, date: NaiveDate, pairs: &[RoomSlot]) -> CreateBooking {
    CreateBooking::new(user_id, date, pairs.iter().copied(), today()).unwrap()
}

#[tokio::test]
async fn create_and_get_booking() {
    let f = setup().await;
    let user = Uuid::new_v4();
    let date = in_days(3);

    let booking = f
        .bookings
        .create(request(
            user,
            date,
            &[
                RoomSlot::new(f.room_a, 2),
                RoomSlot::new(f.room_a, 1),
                RoomSlot::new(f.room_b, 1),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(booking.user_id, user);
    assert_eq!(booking.booking_date, date);
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.roomslots.len(), 3);
    assert!(booking.approved_at.is_none());
    assert!(booking.cancelled_at.is_none());

    let fetched = f.bookings.get_by_id(booking.id).await.unwrap();
    assert_eq!(fetched.roomslots, booking.roomslots);

    let err = f.bookings.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RoombookError::NotFound { .. }));
}

#[tokio::test]
async fn same_roomslot_same_date_conflicts() {
    let f = setup().await;
    let date = in_days(5);

    f.bookings
        .create(request(Uuid::new_v4(), date, &[RoomSlot::new(f.room_a, 1)]))
        .await
        .unwrap();

    let err = f
        .bookings
        .create(request(Uuid::new_v4(), date, &[RoomSlot::new(f.room_a, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, RoombookError::Conflict { .. }));

    // Another slot in the same room on the same date is free.
    f.bookings
        .create(request(Uuid::new_v4(), date, &[RoomSlot::new(f.room_a, 2)]))
        .await
        .unwrap();
}

#[tokio::test]
async fn same_roomslot_other_date_does_not_conflict() {
    let f = setup().await;

    f.bookings
        .create(request(Uuid::new_v4(), in_days(1), &[RoomSlot::new(f.room_a, 1)]))
        .await
        .unwrap();
    f.bookings
        .create(request(Uuid::new_v4(), in_days(2), &[RoomSlot::new(f.room_a, 1)]))
        .await
        .unwrap();
}

#[tokio::test]
async fn partial_overlap_rejects_the_whole_request() {
    let f = setup().await;
    let date = in_days(4);

    f.bookings
        .create(request(Uuid::new_v4(), date, &[RoomSlot::new(f.room_b, 3)]))
        .await
        .unwrap();

    let err = f
        .bookings
        .create(request(
            Uuid::new_v4(),
            date,
            &[RoomSlot::new(f.room_a, 3), RoomSlot::new(f.room_b, 3)],
        ))
        .await
        .unwrap_err();
    match err {
        RoombookError::Conflict { message } => {
            assert!(message.contains(&f.room_b.to_string()));
            assert!(!message.contains(&f.room_a.to_string()));
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    // Nothing of the rejected request was written.
    f.bookings
        .create(request(Uuid::new_v4(), date, &[RoomSlot::new(f.room_a, 3)]))
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_roomslot_is_rejected() {
    let f = setup().await;

    let err = f
        .bookings
        .create(request(Uuid::new_v4(), in_days(2), &[RoomSlot::new(f.room_a, 9)]))
        .await
        .unwrap_err();
    assert!(matches!(err, RoombookError::Conflict { .. }));

    let err = f
        .bookings
        .create(request(
            Uuid::new_v4(),
            in_days(2),
            &[RoomSlot::new(Uuid::new_v4(), 1)],
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, RoombookError::Conflict { .. }));
}

#[tokio::test]
async fn unavailable_room_is_rejected() {
    let f = setup().await;
    f.rooms.set_available(f.room_b, false).await.unwrap();

    let err = f
        .bookings
        .create(request(Uuid::new_v4(), in_days(2), &[RoomSlot::new(f.room_b, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, RoombookError::Conflict { .. }));
}

#[tokio::test]
async fn guarded_update_only_matches_allowed_states() {
    let f = setup().await;
    let booking = f
        .bookings
        .create(request(Uuid::new_v4(), in_days(2), &[RoomSlot::new(f.room_a, 1)]))
        .await
        .unwrap();

    let approved = f
        .bookings
        .update_status(booking.id, &[BookingStatus::Pending], BookingStatus::Approved)
        .await
        .unwrap()
        .expect("pending booking should be approved");
    assert_eq!(approved.status, BookingStatus::Approved);
    assert!(approved.approved_at.is_some());

    // A second approval no longer matches the guard.
    let again = f
        .bookings
        .update_status(booking.id, &[BookingStatus::Pending], BookingStatus::Approved)
        .await
        .unwrap();
    assert!(again.is_none());

    let cancelled = f
        .bookings
        .update_status(
            booking.id,
            &[BookingStatus::Pending, BookingStatus::Approved],
            BookingStatus::Canceled,
        )
        .await
        .unwrap()
        .expect("approved booking should be cancelled");
    assert_eq!(cancelled.status, BookingStatus::Canceled);
    assert!(cancelled.cancelled_at.is_some());
}

#[tokio::test]
async fn released_roomslots_can_be_booked_again() {
    let f = setup().await;
    let date = in_days(6);
    let pair = [RoomSlot::new(f.room_a, 4)];

    let first = f
        .bookings
        .create(request(Uuid::new_v4(), date, &pair))
        .await
        .unwrap();
    f.bookings
        .update_status(first.id, &[BookingStatus::Pending], BookingStatus::Rejected)
        .await
        .unwrap()
        .unwrap();

    let second = f
        .bookings
        .create(request(Uuid::new_v4(), date, &pair))
        .await
        .unwrap();
    f.bookings
        .update_status(
            second.id,
            &[BookingStatus::Pending, BookingStatus::Approved],
            BookingStatus::Canceled,
        )
        .await
        .unwrap()
        .unwrap();

    f.bookings
        .create(request(Uuid::new_v4(), date, &pair))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_for_one_roomslot_admit_one() {
    let f = setup().await;
    let date = in_days(7);
    let pair = RoomSlot::new(f.room_a, 5);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = f.bookings.clone();
        handles.push(tokio::spawn(async move {
            repo.create(request(Uuid::new_v4(), date, &[pair])).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert!(matches!(err, RoombookError::Conflict { .. })),
        }
    }
    assert_eq!(created, 1);

    let mut result = f
        .db
        .query("SELECT * FROM booking_roomslot WHERE slot_number = 5")
        .await
        .unwrap();
    let links: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(links.len(), 1);
}

#[tokio::test]
async fn history_is_newest_date_first_and_paginated() {
    let f = setup().await;
    let user = Uuid::new_v4();

    for day in 1..=25 {
        f.bookings
            .create(request(user, in_days(day), &[RoomSlot::new(f.room_a, 1)]))
            .await
            .unwrap();
    }
    // Someone else's booking does not show up.
    f.bookings
        .create(request(Uuid::new_v4(), in_days(1), &[RoomSlot::new(f.room_b, 1)]))
        .await
        .unwrap();

    let first = f
        .bookings
        .list_by_user(user, Pagination::new(1, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(first.total, 25);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].booking_date, in_days(25));
    assert!(first.items.iter().all(|b| b.user_id == user));
    assert!(first.items.iter().all(|b| b.roomslots.len() == 1));

    let last = f
        .bookings
        .list_by_user(user, Pagination::new(3, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[4].booking_date, in_days(1));
}

#[tokio::test]
async fn pending_queue_is_oldest_date_first() {
    let f = setup().await;

    let later = f
        .bookings
        .create(request(Uuid::new_v4(), in_days(9), &[RoomSlot::new(f.room_a, 1)]))
        .await
        .unwrap();
    let sooner = f
        .bookings
        .create(request(Uuid::new_v4(), in_days(2), &[RoomSlot::new(f.room_a, 1)]))
        .await
        .unwrap();
    let decided = f
        .bookings
        .create(request(Uuid::new_v4(), in_days(1), &[RoomSlot::new(f.room_a, 1)]))
        .await
        .unwrap();
    f.bookings
        .update_status(decided.id, &[BookingStatus::Pending], BookingStatus::Approved)
        .await
        .unwrap()
        .unwrap();

    let pending = f.bookings.list_pending(Pagination::default()).await.unwrap();
    let ids: Vec<Uuid> = pending.items.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);
    assert_eq!(pending.total, 2);
}
