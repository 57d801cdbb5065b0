use thiserror::Error;

/// Errors produced by the connection-set algebra.
///
/// One variant per failure mode a caller can actually trigger; these mirror
/// the exception taxonomy of the Python reference implementation rather than
/// a single catch-all error string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CsaError {
    #[error("malformed interval [{lo}, {hi}]: lower bound exceeds upper bound")]
    MalformedInterval { lo: i64, hi: i64 },

    #[error("negative index {0}: interval sets only contain non-negative integers")]
    NegativeIndex(i64),

    #[error("intervals [{prev_lo}, {prev_hi}] and [{lo}, {hi}] overlap")]
    OverlappingIntervals {
        prev_lo: u64,
        prev_hi: u64,
        lo: u64,
        hi: u64,
    },

    #[error("{0}")]
    InfiniteOperation(String),

    #[error("wrong operand class: expected {expected}, found {found}")]
    WrongOperandClass {
        expected: &'static str,
        found: &'static str,
    },

    #[error("arity mismatch: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("malformed XML: {0}")]
    BadXml(String),

    #[error("mask multiset-sum of overlapping connections at ({i}, {j})")]
    OverlappingMaskSum { i: u64, j: u64 },
}

pub type Result<T> = std::result::Result<T, CsaError>;
