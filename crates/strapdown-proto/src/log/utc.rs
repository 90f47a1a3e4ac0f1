//! UTC time log and its packed clock status.

use crate::{
    error::Result,
    stream::{StreamReader, StreamWriter},
};

/// Internal clock alignment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClockStatus {
    /// Clock error detected.
    Error = 0,
    /// No valid reference, free running.
    FreeRunning = 1,
    /// Converging towards the reference.
    Steering = 2,
    /// Aligned to the reference.
    Valid = 3,
}

impl ClockStatus {
    /// Decode the packed field. `None` for reserved values.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Error),
            1 => Some(Self::FreeRunning),
            2 => Some(Self::Steering),
            3 => Some(Self::Valid),
            _ => None,
        }
    }
}

/// UTC information state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum UtcStatus {
    /// UTC time is unknown.
    Invalid = 0,
    /// UTC known but leap second not yet received.
    NoLeapSec = 1,
    /// UTC fully resolved.
    Valid = 2,
}

impl UtcStatus {
    /// Decode the packed field. `None` for reserved values.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Invalid),
            1 => Some(Self::NoLeapSec),
            2 => Some(Self::Valid),
            _ => None,
        }
    }
}

const CLOCK_STABLE_INPUT: u16 = 1 << 0;
const CLOCK_STATUS_SHIFT: u16 = 1;
const CLOCK_STATUS_MASK: u16 = 0x000F;
const CLOCK_UTC_SYNC: u16 = 1 << 5;
const UTC_STATUS_SHIFT: u16 = 6;
const UTC_STATUS_MASK: u16 = 0x000F;

/// UTC time referenced to the device timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UtcLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Packed clock/UTC status; see the accessors.
    pub status: u16,
    /// Year, e.g. 2026.
    pub year: u16,
    /// Month in [1, 12].
    pub month: i8,
    /// Day in [1, 31].
    pub day: i8,
    /// Hour in [0, 23].
    pub hour: i8,
    /// Minute in [0, 59].
    pub minute: i8,
    /// Second in [0, 60], 60 during a leap second.
    pub second: i8,
    /// Nanosecond of the current second.
    pub nano_second: i32,
    /// GPS time of week, in milliseconds.
    pub gps_time_of_week: u32,
}

impl UtcLog {
    /// True when the clock input is stable.
    #[must_use]
    pub fn has_clock_input(&self) -> bool {
        self.status & CLOCK_STABLE_INPUT != 0
    }

    /// Internal clock alignment state. `None` for reserved wire values.
    #[must_use]
    pub fn clock_status(&self) -> Option<ClockStatus> {
        ClockStatus::from_raw(((self.status >> CLOCK_STATUS_SHIFT) & CLOCK_STATUS_MASK) as u8)
    }

    /// True when the clock is synchronized to UTC.
    #[must_use]
    pub fn is_utc_synced(&self) -> bool {
        self.status & CLOCK_UTC_SYNC != 0
    }

    /// UTC information state. `None` for reserved wire values.
    #[must_use]
    pub fn utc_status(&self) -> Option<UtcStatus> {
        UtcStatus::from_raw(((self.status >> UTC_STATUS_SHIFT) & UTC_STATUS_MASK) as u8)
    }

    /// Pack a status word from its components.
    #[must_use]
    pub fn pack_status(
        stable_input: bool,
        clock: ClockStatus,
        utc_synced: bool,
        utc: UtcStatus,
    ) -> u16 {
        let mut status = 0;
        if stable_input {
            status |= CLOCK_STABLE_INPUT;
        }
        status |= (clock as u16 & CLOCK_STATUS_MASK) << CLOCK_STATUS_SHIFT;
        if utc_synced {
            status |= CLOCK_UTC_SYNC;
        }
        status |= (utc as u16 & UTC_STATUS_MASK) << UTC_STATUS_SHIFT;
        status
    }

    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            year: r.read_u16_le(),
            month: r.read_i8(),
            day: r.read_i8(),
            hour: r.read_i8(),
            minute: r.read_i8(),
            second: r.read_i8(),
            nano_second: r.read_i32_le(),
            gps_time_of_week: r.read_u32_le(),
        };
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        w.write_u16_le(self.year);
        w.write_i8(self.month);
        w.write_i8(self.day);
        w.write_i8(self.hour);
        w.write_i8(self.minute);
        w.write_i8(self.second);
        w.write_i32_le(self.nano_second);
        w.write_u32_le(self.gps_time_of_week);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_pack_unpack() {
        let status = UtcLog::pack_status(true, ClockStatus::Steering, true, UtcStatus::NoLeapSec);
        let log = UtcLog { status, ..UtcLog::default() };
        assert!(log.has_clock_input());
        assert_eq!(log.clock_status(), Some(ClockStatus::Steering));
        assert!(log.is_utc_synced());
        assert_eq!(log.utc_status(), Some(UtcStatus::NoLeapSec));
    }

    #[test]
    fn reserved_status_values_decode_to_none() {
        let log = UtcLog {
            status: UtcLog::pack_status(false, ClockStatus::Error, false, UtcStatus::Valid)
                | (0x8 << CLOCK_STATUS_SHIFT),
            ..UtcLog::default()
        };
        assert_eq!(log.clock_status(), None);
    }
}
