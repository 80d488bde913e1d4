//! Static error catalog entries

use crate::problem::Problem;
use http::StatusCode;

/// One catalog entry: the fixed parts of a Problem for a given error kind.
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Build a Problem for this entry with the given detail.
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        // invalid codes in a catalog entry degrade to 500
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Problem::new(status, self.title, detail.into())
            .with_code(self.code)
            .with_type(self.type_url)
    }

    /// Build a Problem and attach request context in one step.
    pub fn with_context(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        crate::finalize(self.as_problem(detail), instance, trace_id)
    }
}
