//! Stockroom error catalog
//!
//! Fixed parts (status, title, code, type) of every Problem the REST surface emits.

use stockroom_errors::{ErrDef, Problem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ItemNotFound,
    ClockInNotFound,
    Validation,
    InternalDatabase,
}

const ITEM_NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Not Found",
    code: "STOCKROOM_ITEM_NOT_FOUND",
    type_url: "https://errors.stockroom.dev/STOCKROOM_ITEM_NOT_FOUND",
};

const CLOCK_IN_NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Not Found",
    code: "STOCKROOM_CLOCK_IN_NOT_FOUND",
    type_url: "https://errors.stockroom.dev/STOCKROOM_CLOCK_IN_NOT_FOUND",
};

const VALIDATION: ErrDef = ErrDef {
    status: 422,
    title: "Unprocessable Entity",
    code: "STOCKROOM_VALIDATION",
    type_url: "https://errors.stockroom.dev/STOCKROOM_VALIDATION",
};

const INTERNAL_DATABASE: ErrDef = ErrDef {
    status: 500,
    title: "Internal Server Error",
    code: "STOCKROOM_INTERNAL_DATABASE",
    type_url: "https://errors.stockroom.dev/STOCKROOM_INTERNAL_DATABASE",
};

impl ErrorCode {
    #[must_use]
    pub const fn def(self) -> ErrDef {
        match self {
            ErrorCode::ItemNotFound => ITEM_NOT_FOUND,
            ErrorCode::ClockInNotFound => CLOCK_IN_NOT_FOUND,
            ErrorCode::Validation => VALIDATION,
            ErrorCode::InternalDatabase => INTERNAL_DATABASE,
        }
    }

    pub fn with_context(
        self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        self.def().with_context(detail, instance, trace_id)
    }
}
