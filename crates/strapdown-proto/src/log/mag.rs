//! Magnetometer logs.

use crate::{
    error::Result,
    stream::{StreamReader, StreamWriter},
};

/// Size of one raw magnetic calibration take.
pub const MAG_CALIB_TAKE_SIZE: usize = 16;

/// Calibrated magnetometer output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MagLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Magnetometer status bitmask.
    pub status: u16,
    /// Magnetic field on X, Y, Z, in arbitrary units.
    pub magnetometers: [f32; 3],
    /// Accelerations on X, Y, Z, in m/s².
    pub accelerometers: [f32; 3],
}

impl MagLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            status: r.read_u16_le(),
            ..Self::default()
        };
        for axis in &mut log.magnetometers {
            *axis = r.read_f32_le();
        }
        for axis in &mut log.accelerometers {
            *axis = r.read_f32_le();
        }
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.status);
        for axis in self.magnetometers {
            w.write_f32_le(axis);
        }
        for axis in self.accelerometers {
            w.write_f32_le(axis);
        }
    }
}

/// One raw take recorded during on-site magnetic calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MagCalibLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Reserved for future use.
    pub reserved: u16,
    /// Opaque calibration take, forwarded to the calibration tool.
    pub mag_data: [u8; MAG_CALIB_TAKE_SIZE],
}

impl MagCalibLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            reserved: r.read_u16_le(),
            ..Self::default()
        };
        r.read_bytes(&mut log.mag_data);
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u16_le(self.reserved);
        w.write_bytes(&self.mag_data);
    }
}
