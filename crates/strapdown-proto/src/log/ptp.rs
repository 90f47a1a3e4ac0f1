//! PTP (IEEE 1588) synchronization status log.

use tracing::debug;

use crate::{
    error::{ErrorCode, Result},
    stream::{StreamReader, StreamWriter},
};

/// PTP port state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PtpState {
    /// PTP is disabled.
    Disabled = 0,
    /// Fault detected, synchronization unavailable.
    Faulty = 1,
    /// Acting as grandmaster.
    Master = 2,
    /// Listening without serving time.
    Passive = 3,
}

impl PtpState {
    /// Decode the wire value. `None` for reserved values.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Disabled),
            1 => Some(Self::Faulty),
            2 => Some(Self::Master),
            3 => Some(Self::Passive),
            _ => None,
        }
    }
}

/// Time scale PTP timestamps are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PtpTimeScale {
    /// International atomic time.
    Tai = 0,
    /// Coordinated universal time.
    Utc = 1,
    /// GPS time.
    Gps = 2,
}

impl PtpTimeScale {
    /// Decode the wire value. `None` for reserved values.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Tai),
            1 => Some(Self::Utc),
            2 => Some(Self::Gps),
            _ => None,
        }
    }
}

/// Snapshot of the PTP synchronization engine.
///
/// `master_ip_address` keeps the exact wire value: the field is documented
/// with big-endian semantics but transmitted little-endian, so the core
/// preserves the bit pattern and [`PtpStatusLog::master_ip_octets`] exposes
/// the dotted-quad view for presentation code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtpStatusLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// PTP port state.
    pub state: PtpState,
    /// Time scale in use.
    pub time_scale: PtpTimeScale,
    /// Offset of the time scale to UTC, in seconds.
    pub time_scale_offset: f64,
    /// Local clock identity, `u64::MAX` when unknown.
    pub local_clock_identity: u64,
    /// Local clock priority 1.
    pub local_clock_priority1: u8,
    /// Local clock priority 2.
    pub local_clock_priority2: u8,
    /// Local clock class.
    pub local_clock_class: u8,
    /// Local clock accuracy code.
    pub local_clock_accuracy: u8,
    /// Local clock offset scaled log variance.
    pub local_clock_log2_variance: u16,
    /// Local clock time source code.
    pub local_clock_time_source: u8,
    /// Master clock identity, `u64::MAX` when unknown.
    pub master_clock_identity: u64,
    /// Master clock priority 1.
    pub master_clock_priority1: u8,
    /// Master clock priority 2.
    pub master_clock_priority2: u8,
    /// Master clock class.
    pub master_clock_class: u8,
    /// Master clock accuracy code.
    pub master_clock_accuracy: u8,
    /// Master clock offset scaled log variance.
    pub master_clock_log2_variance: u16,
    /// Master clock time source code.
    pub master_clock_time_source: u8,
    /// Master IPv4 address as carried on the wire, `u32::MAX` when unknown.
    pub master_ip_address: u32,
    /// Mean path delay to the master, in seconds.
    pub mean_path_delay: f32,
    /// Standard deviation of the mean path delay, in seconds.
    pub mean_path_delay_std_dev: f32,
    /// Offset to the master clock, in seconds.
    pub clock_offset: f64,
    /// Standard deviation of the clock offset, in seconds.
    pub clock_offset_std_dev: f32,
    /// Local clock frequency offset, in parts per billion.
    pub clock_freq_offset: f32,
    /// Standard deviation of the frequency offset, in parts per billion.
    pub clock_freq_offset_std_dev: f32,
}

impl Default for PtpStatusLog {
    /// Unsynchronized snapshot: faulty state, unknown identities, NaN
    /// metrics.
    fn default() -> Self {
        Self {
            time_stamp: 0,
            state: PtpState::Faulty,
            time_scale: PtpTimeScale::Tai,
            time_scale_offset: 0.0,
            local_clock_identity: u64::MAX,
            local_clock_priority1: 0,
            local_clock_priority2: 0,
            local_clock_class: 0,
            local_clock_accuracy: 0,
            local_clock_log2_variance: 0,
            local_clock_time_source: 0,
            master_clock_identity: u64::MAX,
            master_clock_priority1: 0,
            master_clock_priority2: 0,
            master_clock_class: 0,
            master_clock_accuracy: 0,
            master_clock_log2_variance: 0,
            master_clock_time_source: 0,
            master_ip_address: u32::MAX,
            mean_path_delay: f32::NAN,
            mean_path_delay_std_dev: f32::NAN,
            clock_offset: f64::NAN,
            clock_offset_std_dev: f32::NAN,
            clock_freq_offset: f32::NAN,
            clock_freq_offset_std_dev: f32::NAN,
        }
    }
}

impl PtpStatusLog {
    /// Master IPv4 address as A.B.C.D octets, A being the most significant
    /// byte of the stored value.
    #[must_use]
    pub fn master_ip_octets(&self) -> [u8; 4] {
        self.master_ip_address.to_be_bytes()
    }

    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let time_stamp = r.read_u32_le();
        let raw_state = r.read_u8();
        let raw_time_scale = r.read_u8();
        let time_scale_offset = r.read_f64_le();

        let local_clock_identity = r.read_u64_le();
        let local_clock_priority1 = r.read_u8();
        let local_clock_priority2 = r.read_u8();
        let local_clock_class = r.read_u8();
        let local_clock_accuracy = r.read_u8();
        let local_clock_log2_variance = r.read_u16_le();
        let local_clock_time_source = r.read_u8();

        let master_clock_identity = r.read_u64_le();
        let master_clock_priority1 = r.read_u8();
        let master_clock_priority2 = r.read_u8();
        let master_clock_class = r.read_u8();
        let master_clock_accuracy = r.read_u8();
        let master_clock_log2_variance = r.read_u16_le();
        let master_clock_time_source = r.read_u8();
        let master_ip_address = r.read_u32_le();

        let mean_path_delay = r.read_f32_le();
        let mean_path_delay_std_dev = r.read_f32_le();
        let clock_offset = r.read_f64_le();
        let clock_offset_std_dev = r.read_f32_le();
        let clock_freq_offset = r.read_f32_le();
        let clock_freq_offset_std_dev = r.read_f32_le();

        r.finish()?;

        let Some(state) = PtpState::from_raw(raw_state) else {
            debug!(raw_state, "invalid PTP state");
            return Err(ErrorCode::InvalidParameter);
        };
        let Some(time_scale) = PtpTimeScale::from_raw(raw_time_scale) else {
            debug!(raw_time_scale, "invalid PTP time scale");
            return Err(ErrorCode::InvalidParameter);
        };

        Ok(Self {
            time_stamp,
            state,
            time_scale,
            time_scale_offset,
            local_clock_identity,
            local_clock_priority1,
            local_clock_priority2,
            local_clock_class,
            local_clock_accuracy,
            local_clock_log2_variance,
            local_clock_time_source,
            master_clock_identity,
            master_clock_priority1,
            master_clock_priority2,
            master_clock_class,
            master_clock_accuracy,
            master_clock_log2_variance,
            master_clock_time_source,
            master_ip_address,
            mean_path_delay,
            mean_path_delay_std_dev,
            clock_offset,
            clock_offset_std_dev,
            clock_freq_offset,
            clock_freq_offset_std_dev,
        })
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u8(self.state as u8);
        w.write_u8(self.time_scale as u8);
        w.write_f64_le(self.time_scale_offset);

        w.write_u64_le(self.local_clock_identity);
        w.write_u8(self.local_clock_priority1);
        w.write_u8(self.local_clock_priority2);
        w.write_u8(self.local_clock_class);
        w.write_u8(self.local_clock_accuracy);
        w.write_u16_le(self.local_clock_log2_variance);
        w.write_u8(self.local_clock_time_source);

        w.write_u64_le(self.master_clock_identity);
        w.write_u8(self.master_clock_priority1);
        w.write_u8(self.master_clock_priority2);
        w.write_u8(self.master_clock_class);
        w.write_u8(self.master_clock_accuracy);
        w.write_u16_le(self.master_clock_log2_variance);
        w.write_u8(self.master_clock_time_source);
        w.write_u32_le(self.master_ip_address);

        w.write_f32_le(self.mean_path_delay);
        w.write_f32_le(self.mean_path_delay_std_dev);
        w.write_f64_le(self.clock_offset);
        w.write_f32_le(self.clock_offset_std_dev);
        w.write_f32_le(self.clock_freq_offset);
        w.write_f32_le(self.clock_freq_offset_std_dev);
    }
}
