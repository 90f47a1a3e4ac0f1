//! Raw pass-through buffers.
//!
//! GNSS receivers and RTCM links tunnel their native byte streams through
//! the telemetry channel. The payload is opaque to this crate and forwarded
//! verbatim.

use bytes::Bytes;

use crate::{
    error::{ErrorCode, Result},
    frame::MAX_PAYLOAD_SIZE,
    stream::StreamWriter,
};

/// Opaque pass-through buffer.
///
/// Holds a slice of the originating frame, so no copy happens on decode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawDataLog {
    /// Tunneled bytes, at most one payload long.
    pub data: Bytes,
}

impl RawDataLog {
    /// Wrap `data`, rejecting anything larger than one frame payload.
    pub fn new(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.len() > MAX_PAYLOAD_SIZE {
            return Err(ErrorCode::BufferOverflow);
        }
        Ok(Self { data })
    }

    pub(crate) fn read(payload: &Bytes) -> Result<Self> {
        Self::new(payload.clone())
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_bytes(&self.data);
    }
}
