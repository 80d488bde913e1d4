use axum::extract::rejection::QueryRejection;
use stockroom_errors::{Problem, ValidationViolation};

use crate::domain::error::{DomainError, Resource};
use crate::errors::ErrorCode;

fn not_found(resource: Resource, instance: &str, trace_id: Option<String>) -> Problem {
    match resource {
        Resource::Item => ErrorCode::ItemNotFound.with_context("Item not found", instance, trace_id),
        Resource::ClockIn => ErrorCode::ClockInNotFound.with_context(
            "Clock-in record not found",
            instance,
            trace_id,
        ),
    }
}

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

/// Map a domain error to an RFC 9457 Problem for the request at `instance`.
///
/// A malformed identifier yields exactly the not-found body.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();

    match e {
        DomainError::Validation { violations } => ErrorCode::Validation
            .with_context(e.to_string(), instance, trace_id)
            .with_errors(
                violations
                    .iter()
                    .map(|v| ValidationViolation {
                        field: v.field.clone(),
                        message: v.message.clone(),
                    })
                    .collect(),
            ),
        DomainError::NotFound { resource, .. }
        | DomainError::MalformedIdentifier { resource, .. } => {
            not_found(*resource, instance, trace_id)
        }
        DomainError::StoreUnavailable { .. } => {
            tracing::error!(error = ?e, "Document store error occurred");
            ErrorCode::InternalDatabase.with_context(
                "An internal error occurred",
                instance,
                trace_id,
            )
        }
    }
}

/// Error mapper bound to one request path, for `map_err` in handlers.
pub fn problem_at(instance: &str) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, instance)
}

/// Undecodable request bodies map to 422.
pub fn json_decode_to_problem(e: &serde_json::Error, instance: &str) -> Problem {
    ErrorCode::Validation
        .with_context(format!("JSON decode error: {e}"), instance, current_trace_id())
        .with_errors(vec![ValidationViolation {
            field: "body".to_owned(),
            message: e.to_string(),
        }])
}

pub fn query_rejection_to_problem(rejection: &QueryRejection, instance: &str) -> Problem {
    ErrorCode::Validation.with_context(rejection.body_text(), instance, current_trace_id())
}
