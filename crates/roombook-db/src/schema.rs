//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Booking statuses are stored as strings with
//! ASSERT constraints; calendar dates as `YYYY-MM-DD` strings and slot
//! times as `HH:MM` strings.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        sql: SCHEMA_V1,
    },
    Migration {
        version: 2,
        name: "seed_slots",
        sql: SEED_SLOTS_V2,
    },
];

// -----------------------------------------------------------------------
// Schema v1: initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD full_name ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE int ASSERT $value IN [0, 1, 2, 3];
DEFINE FIELD is_active ON TABLE user TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Campuses
-- =======================================================================
DEFINE TABLE campus SCHEMAFULL;
DEFINE FIELD name ON TABLE campus TYPE string;
DEFINE FIELD created_at ON TABLE campus TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE campus TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Rooms (scoped to campus)
-- =======================================================================
DEFINE TABLE room SCHEMAFULL;
DEFINE FIELD campus_id ON TABLE room TYPE string;
DEFINE FIELD code ON TABLE room TYPE string;
DEFINE FIELD room_type ON TABLE room TYPE string;
DEFINE FIELD capacity ON TABLE room TYPE int ASSERT $value >= 0;
DEFINE FIELD is_available ON TABLE room TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE room TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE room TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_room_campus_code ON TABLE room \
    COLUMNS campus_id, code UNIQUE;

-- =======================================================================
-- Slots (fixed time-of-day intervals, seeded)
-- =======================================================================
DEFINE TABLE slot SCHEMAFULL;
DEFINE FIELD slot_number ON TABLE slot TYPE int;
DEFINE FIELD start_time ON TABLE slot TYPE string;
DEFINE FIELD end_time ON TABLE slot TYPE string;
DEFINE INDEX idx_slot_number ON TABLE slot COLUMNS slot_number UNIQUE;

-- =======================================================================
-- Roomslots (room x slot, reused across dates)
-- =======================================================================
DEFINE TABLE roomslot SCHEMAFULL;
DEFINE FIELD room_id ON TABLE roomslot TYPE string;
DEFINE FIELD slot_number ON TABLE roomslot TYPE int;
DEFINE INDEX idx_roomslot_room_slot ON TABLE roomslot \
    COLUMNS room_id, slot_number UNIQUE;

-- =======================================================================
-- Bookings
-- =======================================================================
DEFINE TABLE booking SCHEMAFULL;
DEFINE FIELD user_id ON TABLE booking TYPE string;
DEFINE FIELD booking_date ON TABLE booking TYPE string;
DEFINE FIELD status ON TABLE booking TYPE string \
    ASSERT $value IN ['Pending', 'Approved', 'Rejected', 'Canceled'];
DEFINE FIELD requested_at ON TABLE booking TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD approved_at ON TABLE booking TYPE option<datetime>;
DEFINE FIELD cancelled_at ON TABLE booking TYPE option<datetime>;
DEFINE INDEX idx_booking_user ON TABLE booking COLUMNS user_id;
DEFINE INDEX idx_booking_date_status ON TABLE booking \
    COLUMNS booking_date, status;

-- Booking -> Roomslot links
DEFINE TABLE booking_roomslot SCHEMAFULL;
DEFINE FIELD booking_id ON TABLE booking_roomslot TYPE string;
DEFINE FIELD room_id ON TABLE booking_roomslot TYPE string;
DEFINE FIELD slot_number ON TABLE booking_roomslot TYPE int;
DEFINE INDEX idx_booking_roomslot_link ON TABLE booking_roomslot \
    COLUMNS booking_id, room_id, slot_number UNIQUE;
";

// -----------------------------------------------------------------------
// v2: slot seed data
// -----------------------------------------------------------------------

const SEED_SLOTS_V2: &str = "\
CREATE slot:1 SET slot_number = 1, start_time = '07:00', end_time = '09:15';
CREATE slot:2 SET slot_number = 2, start_time = '09:30', end_time = '11:45';
CREATE slot:3 SET slot_number = 3, start_time = '12:30', end_time = '14:45';
CREATE slot:4 SET slot_number = 4, start_time = '15:00', end_time = '17:15';
CREATE slot:5 SET slot_number = 5, start_time = '17:30', end_time = '19:45';
CREATE slot:6 SET slot_number = 6, start_time = '20:00', end_time = '22:15';
";

/// Run all pending migrations against the database.
///
/// Idempotent: migrations already recorded in `_migration` are skipped.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
