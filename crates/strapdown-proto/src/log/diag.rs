//! Device diagnostic log: a severity, an error code and a short message.

use crate::{
    error::{ErrorCode, Result},
    frame::MAX_PAYLOAD_SIZE,
    stream::{StreamReader, StreamWriter},
};

/// Largest diagnostic string the payload can carry, null terminator
/// included.
pub const DIAG_MAX_STRING_SIZE: usize = MAX_PAYLOAD_SIZE - 6;

/// Severity reported by the device firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DiagSeverity {
    /// Fault that degrades operation.
    Error = 0,
    /// Abnormal condition the device recovered from.
    Warning = 1,
    /// Operational notice.
    Info = 2,
    /// Firmware debugging output.
    Debug = 3,
}

impl DiagSeverity {
    /// Decode the wire value. `None` for unknown severities.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Error),
            1 => Some(Self::Warning),
            2 => Some(Self::Info),
            3 => Some(Self::Debug),
            _ => None,
        }
    }
}

/// Diagnostic message emitted by the device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Raw severity; see [`DiagLog::severity`].
    pub severity: u8,
    /// Raw device error code; see [`DiagLog::error_code`].
    pub code: u8,
    /// Diagnostic text.
    pub message: String,
}

impl DiagLog {
    /// Decoded severity. `None` if the device sent an unknown value.
    #[must_use]
    pub fn severity(&self) -> Option<DiagSeverity> {
        DiagSeverity::from_raw(self.severity)
    }

    /// Decoded error code. `None` if the device sent an unknown value.
    #[must_use]
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_raw(u32::from(self.code))
    }

    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let time_stamp = r.read_u32_le();
        let severity = r.read_u8();
        let code = r.read_u8();
        let raw = r.rest();
        r.finish()?;

        // The wire string is null-terminated; anything after the first NUL
        // is padding.
        let text = raw.split(|&byte| byte == 0).next().unwrap_or(&[]);
        Ok(Self {
            time_stamp,
            severity,
            code,
            message: String::from_utf8_lossy(text).into_owned(),
        })
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u8(self.severity);
        w.write_u8(self.code);
        let text = self.message.as_bytes();
        let len = text.len().min(DIAG_MAX_STRING_SIZE - 1);
        w.write_bytes(&text[..len]);
        w.write_u8(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_with_null_terminator() {
        let log = DiagLog {
            time_stamp: 5000,
            severity: DiagSeverity::Warning as u8,
            code: ErrorCode::TimeOut as u8,
            message: "gnss outage".to_owned(),
        };
        let mut buf = [0u8; 64];
        let mut w = StreamWriter::new(&mut buf);
        log.write(&mut w);
        let written = w.finish().unwrap();
        assert_eq!(written, 6 + log.message.len() + 1);
        assert_eq!(buf[written - 1], 0);

        let payload = bytes::Bytes::copy_from_slice(&buf[..written]);
        let mut r = StreamReader::new(&payload);
        let back = DiagLog::read(&mut r).unwrap();
        assert_eq!(back, log);
        assert_eq!(back.severity(), Some(DiagSeverity::Warning));
        assert_eq!(back.error_code(), Some(ErrorCode::TimeOut));
    }

    #[test]
    fn text_after_nul_is_padding() {
        let mut payload = vec![0u8; 6];
        payload.extend_from_slice(b"ok\0garbage");
        let mut r = StreamReader::new(&payload);
        let log = DiagLog::read(&mut r).unwrap();
        assert_eq!(log.message, "ok");
    }

    #[test]
    fn missing_terminator_takes_whole_payload() {
        let mut payload = vec![1u8, 0, 0, 0, 0, 9];
        payload.extend_from_slice(b"tail");
        let mut r = StreamReader::new(&payload);
        let log = DiagLog::read(&mut r).unwrap();
        assert_eq!(log.message, "tail");
    }
}
