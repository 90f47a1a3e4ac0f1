//! Vessel motion log: surge, sway, heave and their derivatives.

use crate::{
    error::Result,
    stream::{StreamReader, StreamWriter},
};

/// Which heave computation produced a ship motion log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipMotionKind {
    /// Real-time output with minimal latency.
    Standard,
    /// Delayed high-precision output.
    HighPrecision,
}

/// Vessel motion on the surge, sway and heave axes.
///
/// Velocity and status were appended in protocol 1.4; legacy payloads decode
/// with zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShipMotionLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Main heave period, in seconds.
    pub main_heave_period: f32,
    /// Surge, sway, heave excursion, in meters.
    pub ship_motion: [f32; 3],
    /// Accelerations on the same axes, in m/s².
    pub ship_accel: [f32; 3],
    /// Velocities on the same axes, in m/s. Zeros on legacy payloads.
    pub ship_vel: [f32; 3],
    /// Heave solution status bitmask. Zero on legacy payloads.
    pub status: u16,
}

impl ShipMotionLog {
    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut log = Self {
            time_stamp: r.read_u32_le(),
            main_heave_period: r.read_f32_le(),
            ..Self::default()
        };
        for axis in &mut log.ship_motion {
            *axis = r.read_f32_le();
        }
        for axis in &mut log.ship_accel {
            *axis = r.read_f32_le();
        }
        // Velocity and status were added in version 1.4.
        if r.space() >= 14 {
            for axis in &mut log.ship_vel {
                *axis = r.read_f32_le();
            }
            log.status = r.read_u16_le();
        }
        r.finish()?;
        Ok(log)
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_f32_le(self.main_heave_period);
        for axis in self.ship_motion {
            w.write_f32_le(axis);
        }
        for axis in self.ship_accel {
            w.write_f32_le(axis);
        }
        for axis in self.ship_vel {
            w.write_f32_le(axis);
        }
        w.write_u16_le(self.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_payload_zeroes_velocity_and_status() {
        let full = ShipMotionLog {
            time_stamp: 77,
            main_heave_period: 8.2,
            ship_motion: [0.1, -0.2, 1.4],
            ship_accel: [0.0, 0.0, -0.3],
            ship_vel: [0.4, 0.5, 0.6],
            status: 0x0101,
        };
        let mut buf = [0u8; 64];
        let mut w = StreamWriter::new(&mut buf);
        full.write(&mut w);
        let written = w.finish().unwrap();
        assert_eq!(written, 4 + 4 + 12 + 12 + 12 + 2);

        let mut r = StreamReader::new(&buf[..written - 14]);
        let legacy = ShipMotionLog::read(&mut r).unwrap();
        assert_eq!(legacy.ship_vel, [0.0; 3]);
        assert_eq!(legacy.status, 0);
        assert_eq!(legacy.ship_motion, full.ship_motion);
    }
}
