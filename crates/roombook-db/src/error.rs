//! Database-specific error types and conversions.

use roombook_core::error::RoombookError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed row: {0}")]
    Decode(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    Duplicate { entity: String },
}

impl DbError {
    /// Classify a failed statement: unique index violations become
    /// [`DbError::Duplicate`], everything else [`DbError::Query`].
    pub(crate) fn from_statement(err: impl std::fmt::Display, entity: &str) -> Self {
        let message = err.to_string();
        if message.contains("already contains") {
            DbError::Duplicate {
                entity: entity.into(),
            }
        } else {
            DbError::Query(message)
        }
    }
}

impl From<DbError> for RoombookError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => RoombookError::NotFound { entity, id },
            DbError::Duplicate { entity } => RoombookError::AlreadyExists { entity },
            DbError::Hash(message) => RoombookError::Crypto(message),
            other => RoombookError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_index_violation_maps_to_already_exists() {
        let err = DbError::from_statement(
            "Database index `idx_user_email` already contains 'a@b.c', with record `user:x`",
            "user",
        );
        assert!(matches!(
            RoombookError::from(err),
            RoombookError::AlreadyExists { ref entity } if entity == "user"
        ));
    }

    #[test]
    fn other_failures_map_to_database_errors() {
        let err = DbError::from_statement("Found NONE for field `email`", "user");
        assert!(matches!(RoombookError::from(err), RoombookError::Database(_)));
    }
}
