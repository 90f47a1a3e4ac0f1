//! Command acknowledge payload.
//!
//! Every configuration command is answered with an acknowledge frame that
//! echoes the command identity and reports the device-side outcome as a raw
//! error code.

use crate::{
    error::{ErrorCode, Result},
    stream::{StreamReader, StreamWriter},
};

/// Acknowledge of a command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AckLog {
    /// Id of the acknowledged command.
    pub acked_id: u16,
    /// Class of the acknowledged command.
    pub acked_class: u8,
    /// Raw device outcome; see [`AckLog::error_code`].
    pub code: u32,
}

impl AckLog {
    /// Build an acknowledge for a command identity.
    #[must_use]
    pub fn new(acked_class: u8, acked_id: u16, code: ErrorCode) -> Self {
        Self { acked_id, acked_class, code: code.to_raw() }
    }

    /// Decoded outcome. `None` if the device sent an unknown value.
    #[must_use]
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_raw(self.code)
    }

    /// True when the device accepted the command.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error_code() == Some(ErrorCode::NoError)
    }

    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let log = Self {
            acked_id: r.read_u16_le(),
            acked_class: r.read_u8(),
            code: r.read_u32_le(),
        };
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u16_le(self.acked_id);
        w.write_u8(self.acked_class);
        w.write_u32_le(self.code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_mapping() {
        let ok = AckLog::new(0x02, 7, ErrorCode::NoError);
        assert!(ok.is_success());
        let rejected = AckLog::new(0x02, 7, ErrorCode::InvalidParameter);
        assert_eq!(rejected.error_code(), Some(ErrorCode::InvalidParameter));
        assert!(!rejected.is_success());

        let unknown = AckLog { acked_id: 7, acked_class: 2, code: 9999 };
        assert_eq!(unknown.error_code(), None);
    }
}
