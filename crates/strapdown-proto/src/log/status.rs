//! General device status log.

use crate::{
    error::Result,
    stream::{StreamReader, StreamWriter},
};

/// Aggregated device status.
///
/// The `uptime` field was appended in protocol 1.7; decoders accept the
/// shorter legacy payload and default it to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// General status bitmask (power, temperature, datalogger).
    pub general_status: u16,
    /// Secondary communication status bitmask.
    pub com_status2: u16,
    /// Communication status bitmask.
    pub com_status: u32,
    /// Aiding equipment status bitmask.
    pub aiding_status: u32,
    /// Reserved for future use.
    pub reserved2: u32,
    /// Reserved for future use.
    pub reserved3: u16,
    /// Time since power up, in seconds. Zero on legacy payloads.
    pub uptime: u32,
}

impl StatusLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            general_status: r.read_u16_le(),
            com_status2: r.read_u16_le(),
            com_status: r.read_u32_le(),
            aiding_status: r.read_u32_le(),
            reserved2: r.read_u32_le(),
            reserved3: r.read_u16_le(),
            uptime: 0,
        };
        // Uptime was added in version 1.7.
        if r.space() >= 4 {
            log.uptime = r.read_u32_le();
        }
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.general_status);
        w.write_u16_le(self.com_status2);
        w.write_u32_le(self.com_status);
        w.write_u32_le(self.aiding_status);
        w.write_u32_le(self.reserved2);
        w.write_u16_le(self.reserved3);
        w.write_u32_le(self.uptime);
    }
}
