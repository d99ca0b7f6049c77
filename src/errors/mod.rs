use thiserror::Error;

/// A field that failed validation at the store boundary
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failures raised by the event store before anything reaches the rating engine.
///
/// Carried inside `anyhow::Error`; the HTTP layer downcasts to pick a status code.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{record} references unknown {entity} {id}")]
    DanglingReference {
        record: &'static str,
        entity: &'static str,
        id: i64,
    },

    #[error("{entity} {id} is referenced by {references} logged record(s)")]
    InUse {
        entity: &'static str,
        id: i64,
        references: i64,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl StoreError {
    pub fn player_not_found(id: i64) -> Self {
        Self::NotFound { entity: "player", id }
    }

    pub fn match_not_found(id: i64) -> Self {
        Self::NotFound { entity: "match", id }
    }
}

/// Add context to store read errors
pub fn read_context(entity: &str, id: i64) -> String {
    format!("Failed to read {} {}", entity, id)
}

/// Add context to store write errors
pub fn write_context(operation: &str, entity: &str) -> String {
    format!("Failed to {} {}", operation, entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_field() {
        let err = StoreError::from(ValidationError::new("name", "must not be empty"));
        assert_eq!(err.to_string(), "invalid name: must not be empty");
    }

    #[test]
    fn in_use_message_counts_references() {
        let err = StoreError::InUse {
            entity: "player",
            id: 4,
            references: 2,
        };
        assert_eq!(
            err.to_string(),
            "player 4 is referenced by 2 logged record(s)"
        );
    }

    #[test]
    fn dangling_reference_names_the_record() {
        let err = StoreError::DanglingReference {
            record: "assessment",
            entity: "match",
            id: 9,
        };
        assert_eq!(err.to_string(), "assessment references unknown match 9");
    }
}
