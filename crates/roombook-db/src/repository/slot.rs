//! SurrealDB implementation of [`SlotRepository`].

use chrono::NaiveTime;
use roombook_core::error::RoombookResult;
use roombook_core::models::slot::Slot;
use roombook_core::repository::SlotRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, SurrealValue)]
struct SlotRow {
    slot_number: u32,
    start_time: String,
    end_time: String,
}

fn parse_time(value: &str) -> Result<NaiveTime, DbError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|e| DbError::Decode(format!("invalid slot time '{value}': {e}")))
}

impl SlotRow {
    fn try_into_slot(self) -> Result<Slot, DbError> {
        Ok(Slot {
            slot_number: self.slot_number,
            start_time: parse_time(&self.start_time)?,
            end_time: parse_time(&self.end_time)?,
        })
    }
}

/// SurrealDB implementation of the Slot repository. Slots are read-only
/// seed data.
#[derive(Clone)]
pub struct SurrealSlotRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSlotRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SlotRepository for SurrealSlotRepository<C> {
    async fn list(&self) -> RoombookResult<Vec<Slot>> {
        let mut result = self
            .db
            .query("SELECT slot_number, start_time, end_time FROM slot ORDER BY slot_number ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SlotRow> = result.take(0).map_err(DbError::from)?;
        let slots = rows
            .into_iter()
            .map(SlotRow::try_into_slot)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(slots)
    }
}
