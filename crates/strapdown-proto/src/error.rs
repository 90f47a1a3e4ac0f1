//! Error codes shared by every layer of the protocol.
//!
//! The device and the host exchange these codes on the wire (acknowledge
//! frames carry one), so the enumeration is dense and its numeric values are
//! part of the protocol. [`ErrorCode::name`] returns the canonical
//! screaming-snake-case identifier used in diagnostic logs and on every
//! support channel; keep the table in sync with the enum.

use thiserror::Error;

/// Result alias used across the protocol crate.
pub type Result<T> = core::result::Result<T, ErrorCode>;

/// Protocol error codes.
///
/// The enumeration is dense: every discriminant from 0 to
/// [`ErrorCode::COUNT`]` - 1` is a valid code, which lets the name lookup be
/// a plain table index and lets acknowledge payloads round-trip the raw
/// value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    /// Operation completed; also the device's "success" acknowledge status.
    #[error("NO_ERROR")]
    NoError = 0,
    /// Generic failure, including an unsupported message identifier.
    #[error("ERROR")]
    Error = 1,
    /// A required reference was missing.
    #[error("NULL_POINTER")]
    NullPointer = 2,
    /// Frame checksum mismatch; the frame was dropped.
    #[error("INVALID_CRC")]
    InvalidCrc = 3,
    /// Frame or payload structure is malformed.
    #[error("INVALID_FRAME")]
    InvalidFrame = 4,
    /// Operation did not complete in the allowed time.
    #[error("TIME_OUT")]
    TimeOut = 5,
    /// Write to the underlying interface failed.
    #[error("WRITE_ERROR")]
    WriteError = 6,
    /// Read from the underlying interface failed.
    #[error("READ_ERROR")]
    ReadError = 7,
    /// A buffer was too small for the requested operation.
    #[error("BUFFER_OVERFLOW")]
    BufferOverflow = 8,
    /// A parameter is out of range for the operation.
    #[error("INVALID_PARAMETER")]
    InvalidParameter = 9,
    /// More input is needed before a result is available.
    #[error("NOT_READY")]
    NotReady = 10,
    /// Dynamic allocation failed.
    #[error("MALLOC_FAILED")]
    MallocFailed = 11,
    /// The operation was cancelled before completion.
    #[error("OPERATION_CANCELLED")]
    OperationCancelled = 12,
    /// The connected device cannot support the request.
    #[error("INCOMPATIBLE_HARDWARE")]
    IncompatibleHardware = 13,
    /// Protocol or payload version is not supported.
    #[error("INVALID_VERSION")]
    InvalidVersion = 14,
}

/// Canonical names, indexed by discriminant.
static ERROR_NAMES: [&str; ErrorCode::COUNT] = [
    "NO_ERROR",
    "ERROR",
    "NULL_POINTER",
    "INVALID_CRC",
    "INVALID_FRAME",
    "TIME_OUT",
    "WRITE_ERROR",
    "READ_ERROR",
    "BUFFER_OVERFLOW",
    "INVALID_PARAMETER",
    "NOT_READY",
    "MALLOC_FAILED",
    "OPERATION_CANCELLED",
    "INCOMPATIBLE_HARDWARE",
    "INVALID_VERSION",
];

impl ErrorCode {
    /// Number of defined codes.
    pub const COUNT: usize = 15;

    /// Canonical screaming-snake-case name for this code.
    #[must_use]
    pub fn name(self) -> &'static str {
        ERROR_NAMES[self as usize]
    }

    /// Raw wire value of this code.
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self as u32
    }

    /// Decode a raw wire value. `None` if out of range.
    #[must_use]
    pub const fn from_raw(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::NoError),
            1 => Some(Self::Error),
            2 => Some(Self::NullPointer),
            3 => Some(Self::InvalidCrc),
            4 => Some(Self::InvalidFrame),
            5 => Some(Self::TimeOut),
            6 => Some(Self::WriteError),
            7 => Some(Self::ReadError),
            8 => Some(Self::BufferOverflow),
            9 => Some(Self::InvalidParameter),
            10 => Some(Self::NotReady),
            11 => Some(Self::MallocFailed),
            12 => Some(Self::OperationCancelled),
            13 => Some(Self::IncompatibleHardware),
            14 => Some(Self::InvalidVersion),
            _ => None,
        }
    }

    /// Returns true if this code reports a temporary condition that may
    /// succeed on retry.
    ///
    /// Framing and decode failures are never transient: they indicate a
    /// corrupted stream or an incompatible peer.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::TimeOut | Self::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_discriminants() {
        assert_eq!(ErrorCode::NoError.name(), "NO_ERROR");
        assert_eq!(ErrorCode::InvalidCrc.name(), "INVALID_CRC");
        assert_eq!(ErrorCode::BufferOverflow.name(), "BUFFER_OVERFLOW");
        assert_eq!(ErrorCode::InvalidVersion.name(), "INVALID_VERSION");
    }

    #[test]
    fn raw_round_trip_is_dense() {
        for raw in 0..ErrorCode::COUNT as u32 {
            let code = ErrorCode::from_raw(raw).expect("dense range");
            assert_eq!(code.to_raw(), raw);
            // Display mirrors the canonical name.
            assert_eq!(code.to_string(), code.name());
        }
        assert_eq!(ErrorCode::from_raw(ErrorCode::COUNT as u32), None);
    }

    #[test]
    fn transient_codes() {
        assert!(ErrorCode::TimeOut.is_transient());
        assert!(ErrorCode::NotReady.is_transient());
        assert!(!ErrorCode::InvalidCrc.is_transient());
        assert!(!ErrorCode::BufferOverflow.is_transient());
    }
}
