//! SurrealDB implementation of [`BookingRepository`].
//!
//! Bookings live in `booking`; the roomslots a booking holds live in
//! `booking_roomslot`, one row per (room, slot) pair. Creation runs the
//! conflict check and the insert under the per-date lock from
//! [`DateLocks`], and writes the booking and its links in one transaction.
//! Status changes are compare-and-set updates guarded on the stored status.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use roombook_core::error::{RoombookError, RoombookResult};
use roombook_core::models::booking::{
    Booking, BookingStatus, CreateBooking, describe_roomslots,
};
use roombook_core::models::slot::RoomSlot;
use roombook_core::repository::{BookingRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{info, warn};
use uuid::Uuid;

use super::{CountRow, DateLocks, RoomSlotRow, first_total, into_roomslots, parse_uuid};
use crate::error::DbError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, SurrealValue)]
struct BookingRow {
    record_id: String,
    user_id: String,
    booking_date: String,
    status: String,
    requested_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, SurrealValue)]
struct LinkRow {
    booking_id: String,
    room_id: String,
    slot_number: u32,
}

impl BookingRow {
    fn try_into_booking(self, mut roomslots: Vec<RoomSlot>) -> Result<Booking, DbError> {
        roomslots.sort();
        let booking_date = NaiveDate::parse_from_str(&self.booking_date, DATE_FORMAT)
            .map_err(|e| DbError::Decode(format!("invalid booking date: {e}")))?;
        let status = self
            .status
            .parse::<BookingStatus>()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        Ok(Booking {
            id: parse_uuid(&self.record_id, "booking")?,
            user_id: parse_uuid(&self.user_id, "user")?,
            booking_date,
            status,
            roomslots,
            requested_at: self.requested_at,
            approved_at: self.approved_at,
            cancelled_at: self.cancelled_at,
        })
    }
}

/// Join booking rows with their link rows, preserving the row order.
fn assemble(rows: Vec<BookingRow>, links: Vec<LinkRow>) -> Result<Vec<Booking>, DbError> {
    let mut by_booking: HashMap<String, Vec<RoomSlot>> = HashMap::new();
    for link in links {
        let roomslot = RoomSlot::new(parse_uuid(&link.room_id, "room")?, link.slot_number);
        by_booking.entry(link.booking_id).or_default().push(roomslot);
    }

    rows.into_iter()
        .map(|row| {
            let roomslots = by_booking.remove(&row.record_id).unwrap_or_default();
            row.try_into_booking(roomslots)
        })
        .collect()
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// SurrealDB implementation of the Booking repository.
#[derive(Clone)]
pub struct SurrealBookingRepository<C: Connection> {
    db: Surreal<C>,
    locks: DateLocks,
}

impl<C: Connection> SurrealBookingRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            locks: DateLocks::new(),
        }
    }

    /// Roomslots held by Pending or Approved bookings on `date`.
    async fn held_roomslots(&self, date: &str) -> Result<Vec<RoomSlot>, DbError> {
        let mut result = self
            .db
            .query(
                "LET $active = (SELECT VALUE meta::id(id) FROM booking \
                 WHERE booking_date = $date AND status IN ['Pending', 'Approved']); \
                 SELECT room_id, slot_number FROM booking_roomslot \
                 WHERE booking_id IN $active",
            )
            .bind(("date", date.to_string()))
            .await?;

        let rows: Vec<RoomSlotRow> = result.take(1)?;
        into_roomslots(rows)
    }

    /// Existing roomslots of the given rooms that are currently available.
    async fn bookable_roomslots(&self, room_ids: Vec<String>) -> Result<Vec<RoomSlot>, DbError> {
        let mut result = self
            .db
            .query(
                "LET $open = (SELECT VALUE meta::id(id) FROM room \
                 WHERE meta::id(id) IN $room_ids AND is_available = true); \
                 SELECT room_id, slot_number FROM roomslot \
                 WHERE room_id IN $open",
            )
            .bind(("room_ids", room_ids))
            .await?;

        let rows: Vec<RoomSlotRow> = result.take(1)?;
        into_roomslots(rows)
    }

    async fn links_for(&self, booking_ids: Vec<String>) -> Result<Vec<LinkRow>, DbError> {
        if booking_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut result = self
            .db
            .query(
                "SELECT booking_id, room_id, slot_number FROM booking_roomslot \
                 WHERE booking_id IN $ids",
            )
            .bind(("ids", booking_ids))
            .await?;

        Ok(result.take(0)?)
    }

    async fn page(
        &self,
        filter: &str,
        order: &str,
        user_id: Option<Uuid>,
        pagination: Pagination,
    ) -> RoombookResult<PaginatedResult<Booking>> {
        let user_id = user_id.map(|id| id.to_string()).unwrap_or_default();

        let count_query = format!("SELECT count() AS total FROM booking WHERE {filter} GROUP ALL");
        let mut count_result = self
            .db
            .query(&count_query)
            .bind(("user_id", user_id.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = first_total(count_rows);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM booking \
             WHERE {filter} \
             ORDER BY {order} \
             LIMIT $limit START $offset"
        );
        let mut result = self
            .db
            .query(&query)
            .bind(("user_id", user_id))
            .bind(("limit", pagination.limit()))
            .bind(("offset", pagination.offset()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<BookingRow> = result.take(0).map_err(DbError::from)?;

        let ids = rows.iter().map(|r| r.record_id.clone()).collect();
        let links = self.links_for(ids).await?;
        let items = assemble(rows, links)?;

        Ok(PaginatedResult::new(items, total, pagination))
    }
}

impl<C: Connection> BookingRepository for SurrealBookingRepository<C> {
    async fn create(&self, input: CreateBooking) -> RoombookResult<Booking> {
        self.locks.prune_before(Utc::now().date_naive());
        let _guard = self.locks.acquire(input.booking_date).await;

        let date = format_date(input.booking_date);
        let selection = &input.roomslots;

        let clashing = selection.conflicts_with(self.held_roomslots(&date).await?);
        if !clashing.is_empty() {
            warn!(
                user_id = %input.user_id,
                date = %date,
                clashing = %describe_roomslots(&clashing),
                "Booking rejected: roomslots already taken"
            );
            return Err(RoombookError::Conflict {
                message: format!(
                    "already booked on {date}: {}",
                    describe_roomslots(&clashing)
                ),
            });
        }

        let room_ids = selection
            .room_ids()
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        let missing = selection.missing_from(self.bookable_roomslots(room_ids).await?);
        if !missing.is_empty() {
            warn!(
                user_id = %input.user_id,
                date = %date,
                missing = %describe_roomslots(&missing),
                "Booking rejected: unknown or unavailable roomslots"
            );
            return Err(RoombookError::Conflict {
                message: format!(
                    "non-existent or unavailable room/slot: {}",
                    describe_roomslots(&missing)
                ),
            });
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let links: Vec<serde_json::Value> = selection
            .iter()
            .map(|rs| {
                serde_json::json!({
                    "booking_id": id_str,
                    "room_id": rs.room_id.to_string(),
                    "slot_number": rs.slot_number,
                })
            })
            .collect();

        self.db
            .query(
                "BEGIN TRANSACTION; \
                 CREATE type::record('booking', $id) SET \
                 user_id = $user_id, booking_date = $date, \
                 status = 'Pending', requested_at = time::now(); \
                 INSERT INTO booking_roomslot $links; \
                 COMMIT TRANSACTION;",
            )
            .bind(("id", id_str))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("date", date.clone()))
            .bind(("links", serde_json::Value::Array(links)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement(e, "booking"))?;

        info!(
            booking_id = %id,
            date = %date,
            roomslots = selection.len(),
            "Booking inserted"
        );

        self.get_by_id(id).await
    }

    async fn get_by_id(&self, id: Uuid) -> RoombookResult<Booking> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM type::record('booking', $id); \
                 SELECT booking_id, room_id, slot_number FROM booking_roomslot \
                 WHERE booking_id = $id",
            )
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BookingRow> = result.take(0).map_err(DbError::from)?;
        let links: Vec<LinkRow> = result.take(1).map_err(DbError::from)?;

        let booking = assemble(rows, links)?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                entity: "booking".into(),
                id: id_str,
            })?;

        Ok(booking)
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: &[BookingStatus],
        to: BookingStatus,
    ) -> RoombookResult<Option<Booking>> {
        let stamp = match to {
            BookingStatus::Approved => ", approved_at = time::now()",
            BookingStatus::Canceled => ", cancelled_at = time::now()",
            BookingStatus::Pending | BookingStatus::Rejected => "",
        };
        let query = format!(
            "UPDATE type::record('booking', $id) SET status = $status{stamp} \
             WHERE status IN $from"
        );
        let from: Vec<String> = from.iter().map(|s| s.as_str().to_string()).collect();

        let mut result = self
            .db
            .query(&query)
            .bind(("id", id.to_string()))
            .bind(("status", to.as_str().to_string()))
            .bind(("from", from))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let updated: Vec<surrealdb_types::Value> = result.take(0).map_err(DbError::from)?;
        if updated.is_empty() {
            return Ok(None);
        }

        self.get_by_id(id).await.map(Some)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> RoombookResult<PaginatedResult<Booking>> {
        self.page(
            "user_id = $user_id",
            "booking_date DESC, requested_at DESC",
            Some(user_id),
            pagination,
        )
        .await
    }

    async fn list_pending(
        &self,
        pagination: Pagination,
    ) -> RoombookResult<PaginatedResult<Booking>> {
        self.page(
            "status = 'Pending'",
            "booking_date ASC, requested_at ASC",
            None,
            pagination,
        )
        .await
    }
}
