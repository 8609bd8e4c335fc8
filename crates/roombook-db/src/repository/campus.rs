//! SurrealDB implementation of [`CampusRepository`].

use chrono::{DateTime, Utc};
use roombook_core::error::RoombookResult;
use roombook_core::models::campus::{Campus, CreateCampus, UpdateCampus};
use roombook_core::repository::CampusRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CampusRow {
    record_id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CampusRow {
    fn try_into_campus(self) -> Result<Campus, DbError> {
        Ok(Campus {
            id: parse_uuid(&self.record_id, "campus")?,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Campus repository.
#[derive(Clone)]
pub struct SurrealCampusRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCampusRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CampusRepository for SurrealCampusRepository<C> {
    async fn create(&self, input: CreateCampus) -> RoombookResult<Campus> {
        let id = Uuid::new_v4();

        self.db
            .query("CREATE type::record('campus', $id) SET name = $name")
            .bind(("id", id.to_string()))
            .bind(("name", input.name))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::from_statement(e, "campus"))?;

        self.get_by_id(id).await
    }

    async fn get_by_id(&self, id: Uuid) -> RoombookResult<Campus> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM type::record('campus', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CampusRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "campus".into(),
            id: id_str,
        })?;

        Ok(row.try_into_campus()?)
    }

    async fn update(&self, id: Uuid, input: UpdateCampus) -> RoombookResult<Campus> {
        self.get_by_id(id).await?;

        if let Some(name) = input.name {
            self.db
                .query(
                    "UPDATE type::record('campus', $id) SET \
                     name = $name, updated_at = time::now()",
                )
                .bind(("id", id.to_string()))
                .bind(("name", name))
                .await
                .map_err(DbError::from)?
                .check()
                .map_err(|e| DbError::from_statement(e, "campus"))?;
        }

        self.get_by_id(id).await
    }

    async fn list(&self) -> RoombookResult<Vec<Campus>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM campus ORDER BY name ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CampusRow> = result.take(0).map_err(DbError::from)?;
        let campuses = rows
            .into_iter()
            .map(CampusRow::try_into_campus)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(campuses)
    }
}
