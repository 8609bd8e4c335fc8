//! Integration tests for schema initialization using in-memory SurrealDB.

use roombook_core::repository::SlotRepository;
use roombook_db::repository::SurrealSlotRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    roombook_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    for table in [
        "user",
        "campus",
        "room",
        "slot",
        "roomslot",
        "booking",
        "booking_roomslot",
        "_migration",
    ] {
        assert!(info_str.contains(table), "missing {table} table");
    }
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    roombook_db::run_migrations(&db).await.unwrap();
    roombook_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 2, "expected one record per migration");

    // The slot seed must not be applied twice.
    let slots = SurrealSlotRepository::new(db).list().await.unwrap();
    assert_eq!(slots.len(), 6);
}

#[tokio::test]
async fn seeded_slots_are_ordered_with_their_times() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    roombook_db::run_migrations(&db).await.unwrap();

    let slots = SurrealSlotRepository::new(db).list().await.unwrap();
    let numbers: Vec<u32> = slots.iter().map(|s| s.slot_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);

    assert_eq!(slots[0].start_time.to_string(), "07:00:00");
    assert_eq!(slots[0].end_time.to_string(), "09:15:00");
    assert_eq!(slots[5].start_time.to_string(), "20:00:00");
    assert_eq!(slots[5].end_time.to_string(), "22:15:00");
    for slot in &slots {
        assert!(slot.start_time < slot.end_time);
    }
}

#[tokio::test]
async fn invalid_booking_status_is_rejected_by_schema() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    roombook_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE booking SET user_id = 'u', booking_date = '2030-01-01', \
             status = 'Cancelled'",
        )
        .await
        .unwrap()
        .check();
    assert!(result.is_err(), "status outside the allowed set must fail");
}
