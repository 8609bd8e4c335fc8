//! SurrealDB implementation of [`RoomRepository`].
//!
//! A room is created together with one roomslot per seeded slot, in a
//! single transaction.

use chrono::{DateTime, Utc};
use roombook_core::error::{RoombookError, RoombookResult};
use roombook_core::models::room::{CreateRoom, Room, UpdateRoom};
use roombook_core::models::slot::RoomSlot;
use roombook_core::repository::{PaginatedResult, Pagination, RoomRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;
use uuid::Uuid;

use super::{CountRow, RoomSlotRow, first_total, into_roomslots, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct RoomRow {
    record_id: String,
    campus_id: String,
    code: String,
    room_type: String,
    capacity: u32,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoomRow {
    fn try_into_room(self) -> Result<Room, DbError> {
        Ok(Room {
            id: parse_uuid(&self.record_id, "room")?,
            campus_id: parse_uuid(&self.campus_id, "campus")?,
            code: self.code,
            room_type: self.room_type,
            capacity: self.capacity,
            is_available: self.is_available,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct IdRow {
    #[allow(dead_code)]
    record_id: String,
}

#[derive(Debug, SurrealValue)]
struct SlotNumberRow {
    slot_number: u32,
}

fn single(rows: Vec<RoomRow>, id: impl Into<String>) -> Result<Room, DbError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| DbError::NotFound {
            entity: "room".into(),
            id: id.into(),
        })?
        .try_into_room()
}

/// SurrealDB implementation of the Room repository.
#[derive(Clone)]
pub struct SurrealRoomRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealRoomRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn ensure_campus_exists(&self, campus_id: Uuid) -> RoombookResult<()> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id FROM type::record('campus', $id)")
            .bind(("id", campus_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<IdRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(RoombookError::not_found("campus", campus_id));
        }
        Ok(())
    }

    /// Fails with `AlreadyExists` when another room of `campus_id` uses
    /// `code`. `except` is the room being updated, if any.
    async fn ensure_code_free(
        &self,
        campus_id: Uuid,
        code: &str,
        except: Option<Uuid>,
    ) -> RoombookResult<()> {
        match self.get_by_code(campus_id, code).await {
            Ok(existing) if Some(existing.id) != except => Err(RoombookError::AlreadyExists {
                entity: format!("room {code} in campus {campus_id}"),
            }),
            Ok(_) | Err(RoombookError::NotFound { .. }) => Ok(()),
            Err(other) => Err(other),
        }
    }

    async fn page(
        &self,
        filter: Option<Uuid>,
        pagination: Pagination,
    ) -> RoombookResult<PaginatedResult<Room>> {
        let clause = if filter.is_some() {
            "WHERE campus_id = $campus_id"
        } else {
            ""
        };
        let campus_id = filter.map(|id| id.to_string()).unwrap_or_default();

        let count_query = format!("SELECT count() AS total FROM room {clause} GROUP ALL");
        let mut count_result = self
            .db
            .query(&count_query)
            .bind(("campus_id", campus_id.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = first_total(count_rows);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM room {clause} \
             ORDER BY code ASC \
             LIMIT $limit START $offset"
        );
        let mut result = self
            .db
            .query(&query)
            .bind(("campus_id", campus_id))
            .bind(("limit", pagination.limit()))
            .bind(("offset", pagination.offset()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoomRow> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(RoomRow::try_into_room)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult::new(items, total, pagination))
    }
}

impl<C: Connection> RoomRepository for SurrealRoomRepository<C> {
    async fn create(&self, input: CreateRoom) -> RoombookResult<Room> {
        self.ensure_campus_exists(input.campus_id).await?;
        self.ensure_code_free(input.campus_id, &input.code, None)
            .await?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let mut slot_result = self
            .db
            .query("SELECT slot_number FROM slot ORDER BY slot_number ASC")
            .await
            .map_err(DbError::from)?;
        let slots: Vec<SlotNumberRow> = slot_result.take(0).map_err(DbError::from)?;

        let roomslots: Vec<serde_json::Value> = slots
            .iter()
            .map(|s| serde_json::json!({ "room_id": id_str, "slot_number": s.slot_number }))
            .collect();

        let insert_roomslots = if roomslots.is_empty() {
            ""
        } else {
            "INSERT INTO roomslot $roomslots;"
        };

        let query = format!(
            "BEGIN TRANSACTION; \
             CREATE type::record('room', $id) SET \
             campus_id = $campus_id, code = $code, \
             room_type = $room_type, capacity = $capacity, \
             is_available = true; \
             {insert_roomslots} \
             COMMIT TRANSACTION;"
        );
        self.db
            .query(&query)
            .bind(("id", id_str))
            .bind(("campus_id", input.campus_id.to_string()))
            .bind(("code", input.code.clone()))
            .bind(("room_type", input.room_type))
            .bind(("capacity", input.capacity))
            .bind(("roomslots", serde_json::Value::Array(roomslots)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement(e, "room"))?;

        info!(
            room_id = %id,
            campus_id = %input.campus_id,
            code = %input.code,
            roomslots = slots.len(),
            "Room created"
        );

        self.get_by_id(id).await
    }

    async fn get_by_id(&self, id: Uuid) -> RoombookResult<Room> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM type::record('room', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoomRow> = result.take(0).map_err(DbError::from)?;
        Ok(single(rows, id_str)?)
    }

    async fn get_by_code(&self, campus_id: Uuid, code: &str) -> RoombookResult<Room> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM room \
                 WHERE campus_id = $campus_id AND code = $code",
            )
            .bind(("campus_id", campus_id.to_string()))
            .bind(("code", code.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoomRow> = result.take(0).map_err(DbError::from)?;
        Ok(single(rows, format!("campus={campus_id},code={code}"))?)
    }

    async fn update(&self, id: Uuid, input: UpdateRoom) -> RoombookResult<Room> {
        let current = self.get_by_id(id).await?;

        if input.campus_id.is_some() || input.code.is_some() {
            let campus_id = input.campus_id.unwrap_or(current.campus_id);
            let code = input.code.as_deref().unwrap_or(&current.code);
            if input.campus_id.is_some() {
                self.ensure_campus_exists(campus_id).await?;
            }
            self.ensure_code_free(campus_id, code, Some(id)).await?;
        }

        let mut sets = Vec::new();
        if input.campus_id.is_some() {
            sets.push("campus_id = $campus_id");
        }
        if input.code.is_some() {
            sets.push("code = $code");
        }
        if input.room_type.is_some() {
            sets.push("room_type = $room_type");
        }
        if input.capacity.is_some() {
            sets.push("capacity = $capacity");
        }
        if input.is_available.is_some() {
            sets.push("is_available = $is_available");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('room', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id.to_string()));

        if let Some(campus_id) = input.campus_id {
            builder = builder.bind(("campus_id", campus_id.to_string()));
        }
        if let Some(code) = input.code {
            builder = builder.bind(("code", code));
        }
        if let Some(room_type) = input.room_type {
            builder = builder.bind(("room_type", room_type));
        }
        if let Some(capacity) = input.capacity {
            builder = builder.bind(("capacity", capacity));
        }
        if let Some(is_available) = input.is_available {
            builder = builder.bind(("is_available", is_available));
        }

        builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement(e, "room"))?;

        self.get_by_id(id).await
    }

    async fn set_available(&self, id: Uuid, available: bool) -> RoombookResult<Room> {
        self.update(
            id,
            UpdateRoom {
                is_available: Some(available),
                ..UpdateRoom::default()
            },
        )
        .await
    }

    async fn list(&self, pagination: Pagination) -> RoombookResult<PaginatedResult<Room>> {
        self.page(None, pagination).await
    }

    async fn list_by_campus(
        &self,
        campus_id: Uuid,
        pagination: Pagination,
    ) -> RoombookResult<PaginatedResult<Room>> {
        self.page(Some(campus_id), pagination).await
    }

    async fn list_roomslots(&self, room_id: Uuid) -> RoombookResult<Vec<RoomSlot>> {
        self.get_by_id(room_id).await?;

        let mut result = self
            .db
            .query(
                "SELECT room_id, slot_number FROM roomslot \
                 WHERE room_id = $room_id ORDER BY slot_number ASC",
            )
            .bind(("room_id", room_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoomSlotRow> = result.take(0).map_err(DbError::from)?;
        Ok(into_roomslots(rows)?)
    }
}
