use std::{io, path::PathBuf};

use thiserror::Error;

use crate::core::Ticks;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read input file {}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line_no}: {reason}: {line:?}")]
    MalformedLine {
        line_no: usize,
        line: String,
        reason: LineError,
    },

    #[error("line {line_no}: process {name:?} already defined on line {first_line_no}")]
    DuplicateName {
        name: String,
        line_no: usize,
        first_line_no: usize,
    },

    #[error("time slice must be greater than zero")]
    ZeroTimeSlice,

    #[error("simulated clock overflowed: t={now} + {delta} exceeds {}", u64::MAX)]
    TimeOverflow { now: Ticks, delta: Ticks },
}

/// Why a descriptor line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),

    #[error("field `{field}` is not a valid integer ({value:?})")]
    NotAnInteger { field: &'static str, value: String },

    #[error("block interval must be greater than zero")]
    ZeroBlockInterval,
}
