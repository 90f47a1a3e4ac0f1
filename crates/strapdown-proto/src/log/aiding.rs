//! Aiding sensor logs: odometer, Doppler velocity log, air data, USBL
//! positioning and depth.

use crate::{
    error::Result,
    stream::{StreamReader, StreamWriter},
};

/// Odometer velocity input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OdometerLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Odometer status bitmask.
    pub status: u16,
    /// Velocity along the odometer direction, in m/s.
    pub velocity: f32,
}

impl OdometerLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            velocity: r.read_f32_le(),
        };
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        w.write_f32_le(self.velocity);
    }
}

/// Which tracking mode produced a DVL log.
///
/// Bottom tracking and water layer tracking share one payload layout; if a
/// future revision diverges they split at the catalogue, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DvlModel {
    /// Velocity relative to the sea floor.
    BottomTrack,
    /// Velocity relative to a water layer.
    WaterTrack,
}

/// Doppler velocity log measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DvlLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// DVL status bitmask.
    pub status: u16,
    /// Velocity on X, Y, Z in the DVL frame, in m/s.
    pub velocity: [f32; 3],
    /// Quality indicator for each axis, unitless.
    pub velocity_quality: [f32; 3],
}

impl DvlLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            ..Self::default()
        };
        for axis in &mut log.velocity {
            *axis = r.read_f32_le();
        }
        for quality in &mut log.velocity_quality {
            *quality = r.read_f32_le();
        }
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        for axis in self.velocity {
            w.write_f32_le(axis);
        }
        for quality in self.velocity_quality {
            w.write_f32_le(quality);
        }
    }
}

/// Barometric air data.
///
/// The differential pressure block was appended in protocol 2.0; legacy
/// payloads decode with zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AirDataLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Air data status bitmask.
    pub status: u16,
    /// Absolute pressure, in Pa.
    pub pressure_abs: f32,
    /// Barometric altitude, in meters.
    pub altitude: f32,
    /// Differential pressure, in Pa. Zero on legacy payloads.
    pub pressure_diff: f32,
    /// True airspeed, in m/s. Zero on legacy payloads.
    pub true_airspeed: f32,
    /// Outside air temperature, in °C. Zero on legacy payloads.
    pub air_temperature: f32,
}

impl AirDataLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            pressure_abs: r.read_f32_le(),
            altitude: r.read_f32_le(),
            ..Self::default()
        };
        // Differential pressure, airspeed and temperature arrived in 2.0.
        if r.space() >= 12 {
            log.pressure_diff = r.read_f32_le();
            log.true_airspeed = r.read_f32_le();
            log.air_temperature = r.read_f32_le();
        }
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        w.write_f32_le(self.pressure_abs);
        w.write_f32_le(self.altitude);
        w.write_f32_le(self.pressure_diff);
        w.write_f32_le(self.true_airspeed);
        w.write_f32_le(self.air_temperature);
    }
}

/// USBL acoustic positioning input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UsblLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// USBL status bitmask.
    pub status: u16,
    /// Latitude, in degrees.
    pub latitude: f64,
    /// Longitude, in degrees.
    pub longitude: f64,
    /// Depth below surface, in meters.
    pub depth: f32,
    /// 1-sigma latitude accuracy, in meters.
    pub latitude_accuracy: f32,
    /// 1-sigma longitude accuracy, in meters.
    pub longitude_accuracy: f32,
    /// 1-sigma depth accuracy, in meters.
    pub depth_accuracy: f32,
}

impl UsblLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            latitude: r.read_f64_le(),
            longitude: r.read_f64_le(),
            depth: r.read_f32_le(),
            latitude_accuracy: r.read_f32_le(),
            longitude_accuracy: r.read_f32_le(),
            depth_accuracy: r.read_f32_le(),
        };
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        w.write_f64_le(self.latitude);
        w.write_f64_le(self.longitude);
        w.write_f32_le(self.depth);
        w.write_f32_le(self.latitude_accuracy);
        w.write_f32_le(self.longitude_accuracy);
        w.write_f32_le(self.depth_accuracy);
    }
}

/// Subsea depth sensor input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DepthLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Depth sensor status bitmask.
    pub status: u16,
    /// Absolute pressure, in Pa.
    pub pressure_abs: f32,
    /// Depth below surface, in meters, positive up.
    pub altitude: f32,
}

impl DepthLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            pressure_abs: r.read_f32_le(),
            altitude: r.read_f32_le(),
        };
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        w.write_f32_le(self.pressure_abs);
        w.write_f32_le(self.altitude);
    }
}
