use thiserror::Error;

/// Why a transfer was refused outright, independent of balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The sending account is flagged as suspicious.
    SuspiciousSource,
    /// The receiving account is flagged as suspicious.
    SuspiciousDestination,
    /// Negative transfer amounts are never allowed.
    NegativeAmount,
}

// Reasons stay lowercase; they render inline after "Transfer rejected: ".
impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::SuspiciousSource => {
                write!(f, "something went wrong when sending kudos")
            }
            RejectReason::SuspiciousDestination => {
                write!(f, "something went wrong when receiving kudos")
            }
            RejectReason::NegativeAmount => write!(f, "negative amounts are not allowed"),
        }
    }
}

/// Every way a kudos transfer can be denied. All variants are recoverable
/// caller errors; no kudos move when any of them is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Transfer rejected: {0}")]
    Rejected(RejectReason),

    #[error("Not enough kudos")]
    InsufficientFunds,

    #[error("Invalid target username: {0}")]
    InvalidTarget(String),

    #[error("Invalid API key")]
    InvalidCredential,

    #[error("Cannot send kudos to the anonymous account")]
    AnonymousTarget,

    #[error("The anonymous account cannot send kudos")]
    AnonymousSource,

    #[error("Cannot send kudos to yourself")]
    SelfTransfer,
}

/// Successful transfers resolve to the amount actually moved.
pub type TransferResult = std::result::Result<f64, TransferError>;
