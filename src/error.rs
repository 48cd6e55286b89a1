//! Error types for the contract, the codec and the ledger backends.
//!
//! Every failure surfaces unchanged to the caller. Entity errors carry the
//! offending ledger key and a stable label (`CLAIM_NOT_FOUND`, ...) that the
//! gateway side matches on.

use thiserror::Error;

use crate::keys::EntityKind;

pub type ContractResult<T> = Result<T, ContractError>;
pub type CodecResult<T> = Result<T, CodecError>;
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors raised by a contract function.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Read of a key that holds no record of this kind.
    #[error("{kind} {key} does not exist")]
    NotFound { kind: EntityKind, key: String },

    /// Create collided with an existing record.
    #[error("{kind} {key} already exists")]
    AlreadyExists { kind: EntityKind, key: String },

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("{function} expects {expected} argument(s), got {got}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{function}: invalid {argument}: {reason}")]
    InvalidArgument {
        function: &'static str,
        argument: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ContractError {
    /// Stable error label reported alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            ContractError::NotFound { kind, .. } => kind.not_found_code(),
            ContractError::AlreadyExists { kind, .. } => kind.already_exists_code(),
            ContractError::UnknownFunction(_) => "UNKNOWN_FUNCTION",
            ContractError::ArgumentCount { .. } => "INCORRECT_ARGUMENT_COUNT",
            ContractError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ContractError::Codec(_) => "CODEC_ERROR",
            ContractError::Ledger(_) => "LEDGER_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContractError::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, ContractError::AlreadyExists { .. })
    }
}

/// Errors decoding a stored record.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{kind} record is not valid JSON: {source}")]
    Malformed {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} record is not a JSON object")]
    NotAnObject { kind: EntityKind },

    #[error("{kind} record is missing field {field}")]
    MissingField {
        kind: EntityKind,
        field: &'static str,
    },

    #[error("{kind} record field {field} must be {expected}")]
    InvalidField {
        kind: EntityKind,
        field: &'static str,
        expected: &'static str,
    },

    #[error("{kind} record has unknown field {field}")]
    UnknownField { kind: EntityKind, field: String },
}

/// Errors from a ledger backend.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to open ledger at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_key() {
        let err = ContractError::NotFound {
            kind: EntityKind::Claim,
            key: "claim-9".to_string(),
        };
        assert_eq!(err.to_string(), "Claim claim-9 does not exist");
        assert_eq!(err.code(), "CLAIM_NOT_FOUND");
        assert!(err.is_not_found());

        let err = ContractError::AlreadyExists {
            kind: EntityKind::Customer,
            key: "cust-1".to_string(),
        };
        assert_eq!(err.to_string(), "Customer cust-1 already exists");
        assert_eq!(err.code(), "CUSTOMER_ALREADY_EXISTS");
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_codec_error_converts() {
        let err: ContractError = CodecError::MissingField {
            kind: EntityKind::VehInsurance,
            field: "vin",
        }
        .into();
        assert_eq!(err.code(), "CODEC_ERROR");
        assert_eq!(err.to_string(), "Insurance record is missing field vin");
    }
}
