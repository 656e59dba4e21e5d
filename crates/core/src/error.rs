//! Validation error model.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type used across the engine.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Input-validation failure.
///
/// The engine does no IO, so every failure it can report is one of these. Each
/// variant is detected before any state changes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Payer name is empty or blank.
    #[error("payer name must not be empty")]
    InvalidPayer,

    /// Total is zero, negative, or not representable as money.
    #[error("total must be a positive amount (got {0})")]
    InvalidTotal(String),

    /// No (non-blank) participants were supplied.
    #[error("at least one participant is required")]
    EmptyParticipants,

    /// Split detail keys differ from the participant set.
    #[error("split details do not match participants (missing: {missing:?}, unexpected: {unexpected:?})")]
    SplitDetailsMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// Exact amounts or percentages do not add up.
    #[error("split values sum to {actual}, expected {expected}")]
    SplitSumMismatch { expected: Decimal, actual: Decimal },

    /// A split value is non-numeric, or out of range for the split type.
    #[error("invalid split value for {participant}: {reason}")]
    InvalidShareValue { participant: String, reason: String },

    /// Split type is not one of `equal`, `exact`, `percentage`, `shares`.
    #[error("unknown split type: {0}")]
    UnknownSplitType(String),

    /// A textual `Name:Value` line could not be parsed.
    #[error("malformed split detail on line {line}: {content:?}")]
    MalformedSplitDetail { line: usize, content: String },

    /// Recording this total would push the ledger's combined totals past the
    /// largest representable amount.
    #[error("ledger cannot hold another {0}: combined totals would overflow")]
    LedgerCapacityExceeded(String),
}

impl ValidationError {
    pub fn invalid_total(total: impl ToString) -> Self {
        Self::InvalidTotal(total.to_string())
    }

    pub fn invalid_share(participant: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShareValue {
            participant: participant.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidPayer => "invalid_payer",
            ValidationError::InvalidTotal(_) => "invalid_total",
            ValidationError::EmptyParticipants => "empty_participants",
            ValidationError::SplitDetailsMismatch { .. } => "split_details_mismatch",
            ValidationError::SplitSumMismatch { .. } => "split_sum_mismatch",
            ValidationError::InvalidShareValue { .. } => "invalid_share_value",
            ValidationError::UnknownSplitType(_) => "unknown_split_type",
            ValidationError::MalformedSplitDetail { .. } => "malformed_split_detail",
            ValidationError::LedgerCapacityExceeded(_) => "ledger_capacity_exceeded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errors = [
            ValidationError::InvalidPayer,
            ValidationError::invalid_total("0"),
            ValidationError::EmptyParticipants,
            ValidationError::SplitDetailsMismatch {
                missing: vec![],
                unexpected: vec![],
            },
            ValidationError::SplitSumMismatch {
                expected: Decimal::ONE_HUNDRED,
                actual: Decimal::ZERO,
            },
            ValidationError::invalid_share("Bob", "must be positive"),
            ValidationError::UnknownSplitType("thirds".into()),
            ValidationError::MalformedSplitDetail {
                line: 1,
                content: "oops".into(),
            },
            ValidationError::LedgerCapacityExceeded("1.00".into()),
        ];

        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn mismatch_message_lists_offending_names() {
        let err = ValidationError::SplitDetailsMismatch {
            missing: vec!["Carol".into()],
            unexpected: vec!["Dave".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Carol"));
        assert!(msg.contains("Dave"));
    }
}
