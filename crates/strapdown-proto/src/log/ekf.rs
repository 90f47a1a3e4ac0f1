//! Navigation filter solution logs: attitude as Euler angles or quaternion,
//! and the full navigation solution.

use crate::{
    error::Result,
    stream::{StreamReader, StreamWriter},
};

/// Filter attitude as Euler angles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EkfEulerLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Roll, pitch, yaw, in rad.
    pub euler: [f32; 3],
    /// 1-sigma deviation for each angle, in rad.
    pub euler_std_dev: [f32; 3],
    /// Filter solution status bitmask.
    pub status: u32,
}

impl EkfEulerLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self { time_stamp: r.read_u32_le(), ..Self::default() };
        for angle in &mut log.euler {
            *angle = r.read_f32_le();
        }
        for dev in &mut log.euler_std_dev {
            *dev = r.read_f32_le();
        }
        log.status = r.read_u32_le();
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        for angle in self.euler {
            w.write_f32_le(angle);
        }
        for dev in self.euler_std_dev {
            w.write_f32_le(dev);
        }
        w.write_u32_le(self.status);
    }
}

/// Filter attitude as a quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EkfQuatLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Attitude quaternion (w, x, y, z).
    pub quaternion: [f32; 4],
    /// 1-sigma deviation for roll, pitch, yaw, in rad.
    pub euler_std_dev: [f32; 3],
    /// Filter solution status bitmask.
    pub status: u32,
}

impl EkfQuatLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self { time_stamp: r.read_u32_le(), ..Self::default() };
        for part in &mut log.quaternion {
            *part = r.read_f32_le();
        }
        for dev in &mut log.euler_std_dev {
            *dev = r.read_f32_le();
        }
        log.status = r.read_u32_le();
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        for part in self.quaternion {
            w.write_f32_le(part);
        }
        for dev in self.euler_std_dev {
            w.write_f32_le(dev);
        }
        w.write_u32_le(self.status);
    }
}

/// Filter navigation solution: velocity and geodetic position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EkfNavLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// North, East, Down velocity, in m/s.
    pub velocity: [f32; 3],
    /// 1-sigma deviation for each velocity axis, in m/s.
    pub velocity_std_dev: [f32; 3],
    /// Latitude, in degrees.
    pub latitude: f64,
    /// Longitude, in degrees.
    pub longitude: f64,
    /// Altitude above mean sea level, in meters.
    pub altitude: f64,
    /// Geoid undulation, in meters.
    pub undulation: f32,
    /// 1-sigma deviation for latitude, longitude, altitude, in meters.
    pub position_std_dev: [f32; 3],
    /// Filter solution status bitmask.
    pub status: u32,
}

impl EkfNavLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self { time_stamp: r.read_u32_le(), ..Self::default() };
        for axis in &mut log.velocity {
            *axis = r.read_f32_le();
        }
        for dev in &mut log.velocity_std_dev {
            *dev = r.read_f32_le();
        }
        log.latitude = r.read_f64_le();
        log.longitude = r.read_f64_le();
        log.altitude = r.read_f64_le();
        log.undulation = r.read_f32_le();
        for dev in &mut log.position_std_dev {
            *dev = r.read_f32_le();
        }
        log.status = r.read_u32_le();
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        for axis in self.velocity {
            w.write_f32_le(axis);
        }
        for dev in self.velocity_std_dev {
            w.write_f32_le(dev);
        }
        w.write_f64_le(self.latitude);
        w.write_f64_le(self.longitude);
        w.write_f64_le(self.altitude);
        w.write_f32_le(self.undulation);
        for dev in self.position_std_dev {
            w.write_f32_le(dev);
        }
        w.write_u32_le(self.status);
    }
}
