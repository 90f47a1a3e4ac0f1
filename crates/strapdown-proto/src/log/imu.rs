//! Inertial sensor logs.
//!
//! Three layouts share the IMU data: the full float log, the compact
//! fixed-point log used at high rates, and the packed fast log streamed on
//! the high-frequency class.

use crate::{
    error::Result,
    stream::{StreamReader, StreamWriter},
};

/// Full-rate IMU log with float fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImuLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// IMU status bitmask.
    pub status: u16,
    /// Accelerations on X, Y, Z, in m/s².
    pub accelerometers: [f32; 3],
    /// Angular rates around X, Y, Z, in rad/s.
    pub gyroscopes: [f32; 3],
    /// Internal temperature, in °C.
    pub temperature: f32,
    /// Velocity increments on X, Y, Z, in m/s.
    pub delta_velocity: [f32; 3],
    /// Angle increments around X, Y, Z, in rad.
    pub delta_angle: [f32; 3],
}

impl ImuLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            ..Self::default()
        };
        for axis in &mut log.accelerometers {
            *axis = r.read_f32_le();
        }
        for axis in &mut log.gyroscopes {
            *axis = r.read_f32_le();
        }
        log.temperature = r.read_f32_le();
        for axis in &mut log.delta_velocity {
            *axis = r.read_f32_le();
        }
        for axis in &mut log.delta_angle {
            *axis = r.read_f32_le();
        }
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        for axis in self.accelerometers {
            w.write_f32_le(axis);
        }
        for axis in self.gyroscopes {
            w.write_f32_le(axis);
        }
        w.write_f32_le(self.temperature);
        for axis in self.delta_velocity {
            w.write_f32_le(axis);
        }
        for axis in self.delta_angle {
            w.write_f32_le(axis);
        }
    }
}

/// Compact fixed-point IMU log.
///
/// Fields stay in their wire representation; the getters apply the
/// documented scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImuShortLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// IMU status bitmask.
    pub status: u16,
    /// Velocity increments, scaled by 2²⁰ per m/s.
    pub delta_velocity: [i32; 3],
    /// Angle increments, scaled by 2²⁶ per rad.
    pub delta_angle: [i32; 3],
    /// Temperature, scaled by 256 per °C.
    pub temperature: i16,
}

impl ImuShortLog {
    /// Velocity increments in m/s.
    #[must_use]
    pub fn delta_velocity(&self) -> [f32; 3] {
        self.delta_velocity.map(|raw| raw as f32 / 1_048_576.0)
    }

    /// Angle increments in rad.
    #[must_use]
    pub fn delta_angle(&self) -> [f32; 3] {
        self.delta_angle.map(|raw| raw as f32 / 67_108_864.0)
    }

    /// Temperature in °C.
    #[must_use]
    pub fn temperature(&self) -> f32 {
        f32::from(self.temperature) / 256.0
    }

    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            ..Self::default()
        };
        for axis in &mut log.delta_velocity {
            *axis = r.read_i32_le();
        }
        for axis in &mut log.delta_angle {
            *axis = r.read_i32_le();
        }
        log.temperature = r.read_i16_le();
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        for axis in self.delta_velocity {
            w.write_i32_le(axis);
        }
        for axis in self.delta_angle {
            w.write_i32_le(axis);
        }
        w.write_i16_le(self.temperature);
    }
}

/// Packed IMU log for the high-frequency class.
///
/// Accelerations ride the wire as i16 × 0.01 m/s², angular rates as
/// i16 × 0.001 rad/s. Values are unpacked to floats on decode and repacked
/// on encode, so a round trip quantizes to the wire resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FastImuLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// IMU status bitmask.
    pub status: u16,
    /// Accelerations on X, Y, Z, in m/s².
    pub accelerometers: [f32; 3],
    /// Angular rates around X, Y, Z, in rad/s.
    pub gyroscopes: [f32; 3],
}

impl FastImuLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            ..Self::default()
        };
        for axis in &mut log.accelerometers {
            *axis = f32::from(r.read_i16_le()) * 0.01;
        }
        for axis in &mut log.gyroscopes {
            *axis = f32::from(r.read_i16_le()) * 0.001;
        }
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        for axis in self.accelerometers {
            w.write_i16_le((axis * 100.0) as i16);
        }
        for axis in self.gyroscopes {
            w.write_i16_le((axis * 1000.0) as i16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imu_short_scale_factors() {
        let log = ImuShortLog {
            delta_velocity: [1_048_576, -2_097_152, 0],
            delta_angle: [67_108_864, -33_554_432, 0],
            temperature: 6400,
            ..ImuShortLog::default()
        };
        assert_eq!(log.delta_velocity(), [1.0, -2.0, 0.0]);
        assert_eq!(log.delta_angle(), [1.0, -0.5, 0.0]);
        assert_eq!(log.temperature(), 25.0);
    }

    #[test]
    fn fast_imu_quantizes_to_wire_resolution() {
        // Values at wire resolution, so the i16 packing is lossless.
        let log = FastImuLog {
            time_stamp: 42,
            status: 1,
            accelerometers: [7.0 * 0.01, -123.0 * 0.01, 980.0 * 0.01],
            gyroscopes: [1.0 * 0.001, -2.0 * 0.001, 10.0 * 0.001],
        };
        let mut buf = [0u8; 32];
        let mut w = StreamWriter::new(&mut buf);
        log.write(&mut w);
        let written = w.finish().unwrap();
        assert_eq!(written, 4 + 2 + 6 + 6);

        let mut r = StreamReader::new(&buf[..written]);
        let back = FastImuLog::read(&mut r).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn imu_truncated_payload_overflows() {
        let buf = [0u8; 10];
        let mut r = StreamReader::new(&buf);
        assert!(ImuLog::read(&mut r).is_err());
    }
}
