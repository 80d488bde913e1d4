//! Error data types shared by the stockroom crates
//!
//! - RFC 9457 Problem Details (`Problem`)
//! - Error catalog entries (`ErrDef`)
//!
//! With the `axum` feature, `Problem` is directly usable as a handler response.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationViolation};

/// Standard result type for HTTP handlers.
///
/// Any error implementing `Into<Problem>` can be propagated with `?`.
pub type ApiResult<T = ()> = Result<T, Problem>;

/// Attach the request instance and an optional trace id to a Problem.
pub fn finalize(mut p: Problem, instance: &str, trace_id: Option<String>) -> Problem {
    p = p.with_instance(instance);
    if let Some(tid) = trace_id {
        p = p.with_trace_id(tid);
    }
    p
}
