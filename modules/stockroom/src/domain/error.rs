use thiserror::Error;

/// Which collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Item,
    ClockIn,
}

impl Resource {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Resource::Item => "Item",
            Resource::ClockIn => "Clock-in record",
        }
    }
}

/// One offending field of a rejected payload or query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn field_names(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed for: {}", field_names(.violations))]
    Validation { violations: Vec<FieldViolation> },

    #[error("{} not found: {id}", .resource.label())]
    NotFound { resource: Resource, id: String },

    #[error("Malformed {} identifier: '{id}'", .resource.label())]
    MalformedIdentifier { resource: Resource, id: String },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl DomainError {
    #[must_use]
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation(vec![FieldViolation::new(field, message)])
    }

    pub fn not_found(resource: Resource, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn malformed_identifier(resource: Resource, id: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            resource,
            id: id.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }
}
