//! Synchronization event markers.

use crate::{
    error::Result,
    stream::{StreamReader, StreamWriter},
};

/// Physical line a sync event was captured or generated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventChannel {
    /// Input line A.
    InA,
    /// Input line B.
    InB,
    /// Input line C.
    InC,
    /// Input line D.
    InD,
    /// Input line E.
    InE,
    /// Output line A.
    OutA,
    /// Output line B.
    OutB,
}

/// Timestamped sync event marker.
///
/// A single log can report up to four additional events captured in the same
/// output period; `status` flags which offsets are populated and whether the
/// capture overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventLog {
    /// Time of the first event since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Event status bitmask (offset validity, overflow).
    pub status: u16,
    /// Offset of the second event after the first, in microseconds.
    pub time_offset0: u16,
    /// Offset of the third event after the first, in microseconds.
    pub time_offset1: u16,
    /// Offset of the fourth event after the first, in microseconds.
    pub time_offset2: u16,
    /// Offset of the fifth event after the first, in microseconds.
    pub time_offset3: u16,
}

impl EventLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            time_offset0: r.read_u16_le(),
            time_offset1: r.read_u16_le(),
            time_offset2: r.read_u16_le(),
            time_offset3: r.read_u16_le(),
        };
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        w.write_u16_le(self.time_offset0);
        w.write_u16_le(self.time_offset1);
        w.write_u16_le(self.time_offset2);
        w.write_u16_le(self.time_offset3);
    }
}
