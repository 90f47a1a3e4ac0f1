//! GNSS receiver logs: velocity, position and true heading.
//!
//! The product family carries up to two receivers; both emit the same
//! payload layouts under different message ids. Position and heading have
//! grown trailing fields over protocol revisions, so their decoders probe
//! the remaining space before reading the tail and substitute the documented
//! defaults when a legacy device omits it.

use crate::{
    error::Result,
    stream::{StreamReader, StreamWriter},
};

/// Which physical receiver produced a GNSS log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GnssUnit {
    /// Primary receiver.
    Primary,
    /// Secondary receiver.
    Secondary,
}

/// Sentinel for an unknown differential base station.
pub const UNKNOWN_BASE_STATION_ID: u16 = 0xFFFF;
/// Sentinel for an unknown differential correction age.
pub const UNKNOWN_DIFFERENTIAL_AGE: u16 = 0xFFFF;

/// GNSS velocity solution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GnssVelLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Velocity solution status bitmask.
    pub status: u32,
    /// GPS time of week, in milliseconds.
    pub time_of_week: u32,
    /// North, East, Down velocity, in m/s.
    pub velocity: [f32; 3],
    /// 1-sigma accuracy for each velocity axis, in m/s.
    pub velocity_acc: [f32; 3],
    /// Course over ground, in degrees.
    pub course: f32,
    /// 1-sigma course accuracy, in degrees.
    pub course_acc: f32,
}

impl GnssVelLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u32_le(),
            time_of_week: r.read_u32_le(),
            ..Self::default()
        };
        for axis in &mut log.velocity {
            *axis = r.read_f32_le();
        }
        for acc in &mut log.velocity_acc {
            *acc = r.read_f32_le();
        }
        log.course = r.read_f32_le();
        log.course_acc = r.read_f32_le();
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u32_le(self.status);
        w.write_u32_le(self.time_of_week);
        for axis in self.velocity {
            w.write_f32_le(axis);
        }
        for acc in self.velocity_acc {
            w.write_f32_le(acc);
        }
        w.write_f32_le(self.course);
        w.write_f32_le(self.course_acc);
    }
}

/// GNSS position solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GnssPosLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Position solution status bitmask.
    pub status: u32,
    /// GPS time of week, in milliseconds.
    pub time_of_week: u32,
    /// Latitude, in degrees.
    pub latitude: f64,
    /// Longitude, in degrees.
    pub longitude: f64,
    /// Altitude above mean sea level, in meters.
    pub altitude: f64,
    /// Geoid undulation, in meters.
    pub undulation: f32,
    /// 1-sigma latitude accuracy, in meters.
    pub latitude_accuracy: f32,
    /// 1-sigma longitude accuracy, in meters.
    pub longitude_accuracy: f32,
    /// 1-sigma altitude accuracy, in meters.
    pub altitude_accuracy: f32,
    /// Number of space vehicles used in the solution. Zero on legacy
    /// payloads.
    pub num_sv_used: u8,
    /// Differential base station id, [`UNKNOWN_BASE_STATION_ID`] when
    /// unknown.
    pub base_station_id: u16,
    /// Differential correction age in 0.01 s,
    /// [`UNKNOWN_DIFFERENTIAL_AGE`] when unknown.
    pub differential_age: u16,
}

impl Default for GnssPosLog {
    fn default() -> Self {
        Self {
            time_stamp: 0,
            status: 0,
            time_of_week: 0,
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            undulation: 0.0,
            latitude_accuracy: 0.0,
            longitude_accuracy: 0.0,
            altitude_accuracy: 0.0,
            num_sv_used: 0,
            base_station_id: UNKNOWN_BASE_STATION_ID,
            differential_age: UNKNOWN_DIFFERENTIAL_AGE,
        }
    }
}

impl GnssPosLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u32_le(),
            time_of_week: r.read_u32_le(),
            latitude: r.read_f64_le(),
            longitude: r.read_f64_le(),
            altitude: r.read_f64_le(),
            undulation: r.read_f32_le(),
            latitude_accuracy: r.read_f32_le(),
            longitude_accuracy: r.read_f32_le(),
            altitude_accuracy: r.read_f32_le(),
            ..Self::default()
        };
        // Base station information was added in version 1.4.
        if r.space() >= 5 {
            log.num_sv_used = r.read_u8();
            log.base_station_id = r.read_u16_le();
            log.differential_age = r.read_u16_le();
        }
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u32_le(self.status);
        w.write_u32_le(self.time_of_week);
        w.write_f64_le(self.latitude);
        w.write_f64_le(self.longitude);
        w.write_f64_le(self.altitude);
        w.write_f32_le(self.undulation);
        w.write_f32_le(self.latitude_accuracy);
        w.write_f32_le(self.longitude_accuracy);
        w.write_f32_le(self.altitude_accuracy);
        w.write_u8(self.num_sv_used);
        w.write_u16_le(self.base_station_id);
        w.write_u16_le(self.differential_age);
    }
}

/// GNSS true heading from a dual-antenna baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GnssHdtLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Heading solution status bitmask.
    pub status: u16,
    /// GPS time of week, in milliseconds.
    pub time_of_week: u32,
    /// True heading, in degrees.
    pub heading: f32,
    /// 1-sigma heading accuracy, in degrees.
    pub heading_accuracy: f32,
    /// Pitch between the antennas, in degrees.
    pub pitch: f32,
    /// 1-sigma pitch accuracy, in degrees.
    pub pitch_accuracy: f32,
    /// Antenna baseline length, in meters. Zero on legacy payloads.
    pub baseline: f32,
}

impl GnssHdtLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            time_of_week: r.read_u32_le(),
            heading: r.read_f32_le(),
            heading_accuracy: r.read_f32_le(),
            pitch: r.read_f32_le(),
            pitch_accuracy: r.read_f32_le(),
            baseline: 0.0,
        };
        // The baseline field was added in version 2.0.
        if r.space() > 0 {
            log.baseline = r.read_f32_le();
        }
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        w.write_u32_le(self.time_of_week);
        w.write_f32_le(self.heading);
        w.write_f32_le(self.heading_accuracy);
        w.write_f32_le(self.pitch);
        w.write_f32_le(self.pitch_accuracy);
        w.write_f32_le(self.baseline);
    }
}
