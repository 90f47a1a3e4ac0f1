//! Satellites-in-view log.
//!
//! The only variable-size composite in the catalogue: a group carries up to
//! [`MAX_SATELLITES`] satellites, each with up to [`MAX_SIGNALS`] tracked
//! signals. Satellite and signal records both pack their statuses into a
//! flag word:
//!
//! | Field                      | Offset | Width |
//! |----------------------------|--------|-------|
//! | tracking status            | 0      | 3     |
//! | health status              | 3      | 2     |
//! | elevation status (sat)     | 5      | 2     |
//! | constellation id (sat)     | 7      | 4     |
//! | SNR valid (signal, bit 5)  | 5      | 1     |
//!
//! Every packed field is validated against its enum while decoding; any
//! out-of-set value fails the whole group with
//! [`ErrorCode::InvalidFrame`] and drops whatever was decoded so far.

use tracing::debug;

use crate::{
    error::{ErrorCode, Result},
    stream::{StreamReader, StreamWriter},
};

/// Most satellites one group can carry.
pub const MAX_SATELLITES: usize = 64;
/// Most signals one satellite can carry.
pub const MAX_SIGNALS: usize = 8;

const TRACKING_OFFSET: u16 = 0;
const TRACKING_MASK: u16 = 0x0007;
const HEALTH_OFFSET: u16 = 3;
const HEALTH_MASK: u16 = 0x0003;
const ELEVATION_OFFSET: u16 = 5;
const ELEVATION_MASK: u16 = 0x0003;
const CONSTELLATION_OFFSET: u16 = 7;
const CONSTELLATION_MASK: u16 = 0x000F;
const SIGNAL_SNR_VALID: u8 = 1 << 5;

fn field(flags: u16, offset: u16, mask: u16) -> u8 {
    ((flags >> offset) & mask) as u8
}

fn set_field(flags: &mut u16, value: u8, offset: u16, mask: u16) {
    *flags &= !(mask << offset);
    *flags |= (u16::from(value) & mask) << offset;
}

/// GNSS constellation a satellite belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Constellation {
    /// Constellation not reported.
    Unknown = 0,
    /// GPS (USA).
    Gps = 1,
    /// GLONASS (Russia).
    Glonass = 2,
    /// Galileo (Europe).
    Galileo = 3,
    /// BeiDou (China).
    BeiDou = 4,
    /// QZSS (Japan).
    Qzss = 5,
    /// SBAS augmentation satellites.
    Sbas = 6,
    /// NavIC (India).
    Navic = 7,
}

impl Constellation {
    /// Decode the packed field. `None` for reserved values.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Gps),
            2 => Some(Self::Glonass),
            3 => Some(Self::Galileo),
            4 => Some(Self::BeiDou),
            5 => Some(Self::Qzss),
            6 => Some(Self::Sbas),
            7 => Some(Self::Navic),
            _ => None,
        }
    }
}

/// Tracking status of a satellite or signal.
///
/// Doubles as the solution status when the latter is known. Higher values
/// take priority when summarizing signals into their satellite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TrackingStatus {
    /// No signal or idle.
    Unknown = 0,
    /// Being searched, not yet usable.
    Searching = 1,
    /// Tracked; solution usage unknown.
    Tracking = 2,
    /// Tracked and not used in the solution.
    TrackingNotUsed = 3,
    /// Tracked and rejected from the solution.
    TrackingRejected = 4,
    /// Tracked and used in the solution.
    TrackingUsed = 5,
}

impl TrackingStatus {
    /// Decode the packed field. `None` for reserved values.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Searching),
            2 => Some(Self::Tracking),
            3 => Some(Self::TrackingNotUsed),
            4 => Some(Self::TrackingRejected),
            5 => Some(Self::TrackingUsed),
            _ => None,
        }
    }
}

/// Health status of a satellite or signal.
///
/// Higher values take priority when summarizing signals into their
/// satellite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum HealthStatus {
    /// Health not reported.
    Unknown = 0,
    /// Usable.
    Healthy = 1,
    /// Not usable.
    Unhealthy = 2,
}

impl HealthStatus {
    /// Decode the packed field. `None` for reserved values.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Healthy),
            2 => Some(Self::Unhealthy),
            _ => None,
        }
    }
}

/// Whether a satellite is rising or setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElevationStatus {
    /// Trend not reported.
    Unknown = 0,
    /// Elevation is decreasing.
    Setting = 1,
    /// Elevation is increasing.
    Rising = 2,
}

impl ElevationStatus {
    /// Decode the packed field. `None` for reserved values.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Setting),
            2 => Some(Self::Rising),
            _ => None,
        }
    }
}

/// GNSS signal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)] // Names are the documentation.
pub enum SignalId {
    GpsL1Ca = 0,
    GpsL1P = 1,
    GpsL2C = 2,
    GpsL2P = 3,
    GpsL5 = 4,
    GlonassG1Ca = 16,
    GlonassG2Ca = 17,
    GalileoE1 = 32,
    GalileoE5a = 33,
    GalileoE5b = 34,
    GalileoE6 = 35,
    BeiDouB1I = 48,
    BeiDouB2I = 49,
    BeiDouB3I = 50,
    QzssL1Ca = 64,
    QzssL2C = 65,
    QzssL5 = 66,
    SbasL1Ca = 80,
    NavicL5 = 96,
}

impl SignalId {
    /// Decode the wire value. `None` for unknown signals.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::GpsL1Ca),
            1 => Some(Self::GpsL1P),
            2 => Some(Self::GpsL2C),
            3 => Some(Self::GpsL2P),
            4 => Some(Self::GpsL5),
            16 => Some(Self::GlonassG1Ca),
            17 => Some(Self::GlonassG2Ca),
            32 => Some(Self::GalileoE1),
            33 => Some(Self::GalileoE5a),
            34 => Some(Self::GalileoE5b),
            35 => Some(Self::GalileoE6),
            48 => Some(Self::BeiDouB1I),
            49 => Some(Self::BeiDouB2I),
            50 => Some(Self::BeiDouB3I),
            64 => Some(Self::QzssL1Ca),
            65 => Some(Self::QzssL2C),
            66 => Some(Self::QzssL5),
            80 => Some(Self::SbasL1Ca),
            96 => Some(Self::NavicL5),
            _ => None,
        }
    }
}

/// One tracked signal on a satellite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalData {
    /// Signal identifier.
    pub id: SignalId,
    /// Packed flags: tracking, health, SNR validity.
    pub flags: u8,
    /// Signal-to-noise ratio, in dB.
    pub snr: u8,
}

impl SignalData {
    /// True when the SNR field holds a measurement.
    #[must_use]
    pub fn snr_is_valid(&self) -> bool {
        self.flags & SIGNAL_SNR_VALID != 0
    }

    /// Health status, [`HealthStatus::Unknown`] if the field is reserved.
    #[must_use]
    pub fn health_status(&self) -> HealthStatus {
        HealthStatus::from_raw(field(u16::from(self.flags), HEALTH_OFFSET, HEALTH_MASK))
            .unwrap_or(HealthStatus::Unknown)
    }

    /// Tracking status, [`TrackingStatus::Unknown`] if the field is
    /// reserved.
    #[must_use]
    pub fn tracking_status(&self) -> TrackingStatus {
        TrackingStatus::from_raw(field(u16::from(self.flags), TRACKING_OFFSET, TRACKING_MASK))
            .unwrap_or(TrackingStatus::Unknown)
    }

    fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let raw_id = r.read_u8();
        let flags = r.read_u8();
        let snr = r.read_u8();
        r.finish()?;

        let Some(id) = SignalId::from_raw(raw_id) else {
            debug!(raw_id, "invalid signal id");
            return Err(ErrorCode::InvalidFrame);
        };
        check_health(field(u16::from(flags), HEALTH_OFFSET, HEALTH_MASK))?;
        check_tracking(field(u16::from(flags), TRACKING_OFFSET, TRACKING_MASK))?;
        Ok(Self { id, flags, snr })
    }

    fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u8(self.id as u8);
        w.write_u8(self.flags);
        w.write_u8(self.snr);
    }
}

/// One satellite in view with its tracked signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteData {
    /// Satellite identifier within its constellation.
    pub id: u8,
    /// Elevation in degrees, [-90, +90]; meaningful when the elevation is
    /// known.
    pub elevation: i8,
    /// Azimuth in degrees, [0, 359]; meaningful when the elevation is
    /// known.
    pub azimuth: u16,
    /// Packed flags: tracking, health, elevation trend, constellation.
    pub flags: u16,
    /// Tracked signals, at most [`MAX_SIGNALS`].
    pub signals: Vec<SignalData>,
}

impl SatelliteData {
    /// Constellation, [`Constellation::Unknown`] if the field is reserved.
    #[must_use]
    pub fn constellation(&self) -> Constellation {
        Constellation::from_raw(field(self.flags, CONSTELLATION_OFFSET, CONSTELLATION_MASK))
            .unwrap_or(Constellation::Unknown)
    }

    /// Elevation trend, [`ElevationStatus::Unknown`] if the field is
    /// reserved.
    #[must_use]
    pub fn elevation_status(&self) -> ElevationStatus {
        ElevationStatus::from_raw(field(self.flags, ELEVATION_OFFSET, ELEVATION_MASK))
            .unwrap_or(ElevationStatus::Unknown)
    }

    /// Health status, [`HealthStatus::Unknown`] if the field is reserved.
    #[must_use]
    pub fn health_status(&self) -> HealthStatus {
        HealthStatus::from_raw(field(self.flags, HEALTH_OFFSET, HEALTH_MASK))
            .unwrap_or(HealthStatus::Unknown)
    }

    /// Tracking status, [`TrackingStatus::Unknown`] if the field is
    /// reserved.
    #[must_use]
    pub fn tracking_status(&self) -> TrackingStatus {
        TrackingStatus::from_raw(field(self.flags, TRACKING_OFFSET, TRACKING_MASK))
            .unwrap_or(TrackingStatus::Unknown)
    }

    /// Find a tracked signal by id.
    #[must_use]
    pub fn signal(&self, id: SignalId) -> Option<&SignalData> {
        self.signals.iter().find(|signal| signal.id == id)
    }

    /// Append a signal and fold its statuses into this satellite's summary.
    ///
    /// The summary keeps the highest-priority status seen across all
    /// signals: unhealthy beats healthy beats unknown, and tracking-used
    /// beats every weaker tracking state. Returns `None` once the satellite
    /// already carries [`MAX_SIGNALS`] signals.
    pub fn add_signal(
        &mut self,
        id: SignalId,
        health: HealthStatus,
        tracking: TrackingStatus,
        snr: Option<u8>,
    ) -> Option<&SignalData> {
        if self.signals.len() >= MAX_SIGNALS {
            return None;
        }
        let mut flags = 0u16;
        set_field(&mut flags, health as u8, HEALTH_OFFSET, HEALTH_MASK);
        set_field(&mut flags, tracking as u8, TRACKING_OFFSET, TRACKING_MASK);
        let mut flags = flags as u8;
        if snr.is_some() {
            flags |= SIGNAL_SNR_VALID;
        }

        self.update_summary(health, tracking);
        self.signals.push(SignalData { id, flags, snr: snr.unwrap_or(0) });
        self.signals.last()
    }

    fn update_summary(&mut self, health: HealthStatus, tracking: TrackingStatus) {
        let health = self.health_status().max(health);
        let tracking = self.tracking_status().max(tracking);
        set_field(&mut self.flags, health as u8, HEALTH_OFFSET, HEALTH_MASK);
        set_field(&mut self.flags, tracking as u8, TRACKING_OFFSET, TRACKING_MASK);
    }

    fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let id = r.read_u8();
        let elevation = r.read_i8();
        let azimuth = r.read_u16_le();
        let flags = r.read_u16_le();
        let nr_signals = usize::from(r.read_u8());
        r.finish()?;

        if nr_signals > MAX_SIGNALS {
            debug!(nr_signals, "invalid number of signals");
            return Err(ErrorCode::InvalidFrame);
        }
        if Constellation::from_raw(field(flags, CONSTELLATION_OFFSET, CONSTELLATION_MASK))
            .is_none()
        {
            debug!(flags, "invalid constellation id");
            return Err(ErrorCode::InvalidFrame);
        }
        if ElevationStatus::from_raw(field(flags, ELEVATION_OFFSET, ELEVATION_MASK)).is_none() {
            debug!(flags, "invalid elevation status");
            return Err(ErrorCode::InvalidFrame);
        }
        check_health(field(flags, HEALTH_OFFSET, HEALTH_MASK))?;
        check_tracking(field(flags, TRACKING_OFFSET, TRACKING_MASK))?;

        let mut signals = Vec::with_capacity(nr_signals);
        for _ in 0..nr_signals {
            signals.push(SignalData::read(r)?);
        }
        Ok(Self { id, elevation, azimuth, flags, signals })
    }

    fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u8(self.id);
        w.write_i8(self.elevation);
        w.write_u16_le(self.azimuth);
        w.write_u16_le(self.flags);
        w.write_u8(self.signals.len() as u8);
        for signal in &self.signals {
            signal.write(w);
        }
    }
}

/// Snapshot of every satellite in view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SatGroupLog {
    /// Time since sensor power up, in microseconds.
    pub time_stamp: u32,
    /// Reserved for future use.
    pub reserved: u32,
    /// Satellites in view, at most [`MAX_SATELLITES`].
    pub satellites: Vec<SatelliteData>,
}

impl SatGroupLog {
    /// Create an empty group.
    #[must_use]
    pub fn new(time_stamp: u32) -> Self {
        Self { time_stamp, reserved: 0, satellites: Vec::new() }
    }

    /// Find a satellite by id.
    #[must_use]
    pub fn satellite(&self, id: u8) -> Option<&SatelliteData> {
        self.satellites.iter().find(|sat| sat.id == id)
    }

    /// Append a satellite. Returns `None` once the group already carries
    /// [`MAX_SATELLITES`] satellites.
    #[allow(clippy::too_many_arguments)]
    pub fn add_satellite(
        &mut self,
        id: u8,
        elevation: i8,
        azimuth: u16,
        constellation: Constellation,
        elevation_status: ElevationStatus,
        health: HealthStatus,
        tracking: TrackingStatus,
    ) -> Option<&mut SatelliteData> {
        if self.satellites.len() >= MAX_SATELLITES {
            return None;
        }
        let mut flags = 0u16;
        set_field(&mut flags, constellation as u8, CONSTELLATION_OFFSET, CONSTELLATION_MASK);
        set_field(&mut flags, elevation_status as u8, ELEVATION_OFFSET, ELEVATION_MASK);
        set_field(&mut flags, health as u8, HEALTH_OFFSET, HEALTH_MASK);
        set_field(&mut flags, tracking as u8, TRACKING_OFFSET, TRACKING_MASK);
        self.satellites.push(SatelliteData {
            id,
            elevation,
            azimuth,
            flags,
            signals: Vec::new(),
        });
        self.satellites.last_mut()
    }

    pub(crate) fn read(r: &mut StreamReader<'_>) -> Result<Self> {
        let time_stamp = r.read_u32_le();
        let reserved = r.read_u32_le();
        let nr_satellites = usize::from(r.read_u8());
        r.finish()?;

        if nr_satellites > MAX_SATELLITES {
            debug!(nr_satellites, "invalid number of satellites");
            return Err(ErrorCode::InvalidFrame);
        }
        let mut satellites = Vec::with_capacity(nr_satellites);
        for _ in 0..nr_satellites {
            // An error here drops `satellites` and everything decoded so
            // far with it.
            satellites.push(SatelliteData::read(r)?);
        }
        Ok(Self { time_stamp, reserved, satellites })
    }

    pub(crate) fn write(&self, w: &mut StreamWriter<'_>) {
        w.write_u32_le(self.time_stamp);
        w.write_u32_le(self.reserved);
        w.write_u8(self.satellites.len() as u8);
        for satellite in &self.satellites {
            satellite.write(w);
        }
    }
}

fn check_health(raw: u8) -> Result<()> {
    if HealthStatus::from_raw(raw).is_none() {
        debug!(raw, "invalid health status");
        return Err(ErrorCode::InvalidFrame);
    }
    Ok(())
}

fn check_tracking(raw: u8) -> Result<()> {
    if TrackingStatus::from_raw(raw).is_none() {
        debug!(raw, "invalid tracking status");
        return Err(ErrorCode::InvalidFrame);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_group() -> SatGroupLog {
        let mut group = SatGroupLog::new(1_000);
        let sat = group
            .add_satellite(
                12,
                45,
                210,
                Constellation::Gps,
                ElevationStatus::Rising,
                HealthStatus::Healthy,
                TrackingStatus::Tracking,
            )
            .unwrap();
        sat.add_signal(SignalId::GpsL1Ca, HealthStatus::Healthy, TrackingStatus::TrackingUsed, Some(47))
            .unwrap();
        sat.add_signal(SignalId::GpsL5, HealthStatus::Unknown, TrackingStatus::Searching, None)
            .unwrap();
        group
            .add_satellite(
                3,
                -10,
                90,
                Constellation::Galileo,
                ElevationStatus::Setting,
                HealthStatus::Unknown,
                TrackingStatus::Searching,
            )
            .unwrap();
        group
    }

    fn encode(group: &SatGroupLog) -> Vec<u8> {
        let mut buf = [0u8; 512];
        let mut w = StreamWriter::new(&mut buf);
        group.write(&mut w);
        let written = w.finish().unwrap();
        buf[..written].to_vec()
    }

    #[test]
    fn round_trip() {
        let group = sample_group();
        let wire = encode(&group);
        let mut r = StreamReader::new(&wire);
        let back = SatGroupLog::read(&mut r).unwrap();
        assert_eq!(back, group);
    }

    #[test]
    fn signal_summary_follows_priority_rules() {
        let group = sample_group();
        let sat = group.satellite(12).unwrap();
        // TrackingUsed from the first signal wins over the initial
        // Tracking; Healthy is kept over the second signal's Unknown.
        assert_eq!(sat.tracking_status(), TrackingStatus::TrackingUsed);
        assert_eq!(sat.health_status(), HealthStatus::Healthy);
        assert_eq!(sat.constellation(), Constellation::Gps);

        let l1 = sat.signal(SignalId::GpsL1Ca).unwrap();
        assert!(l1.snr_is_valid());
        assert_eq!(l1.snr, 47);
        let l5 = sat.signal(SignalId::GpsL5).unwrap();
        assert!(!l5.snr_is_valid());
    }

    #[test]
    fn too_many_satellites_is_invalid() {
        let mut buf = [0u8; 16];
        let mut w = StreamWriter::new(&mut buf);
        w.write_u32_le(0);
        w.write_u32_le(0);
        w.write_u8(65);
        let written = w.finish().unwrap();
        let mut r = StreamReader::new(&buf[..written]);
        assert_eq!(SatGroupLog::read(&mut r), Err(ErrorCode::InvalidFrame));
    }

    #[test]
    fn too_many_signals_is_invalid() {
        let mut buf = [0u8; 32];
        let mut w = StreamWriter::new(&mut buf);
        w.write_u32_le(0);
        w.write_u32_le(0);
        w.write_u8(1);
        // One satellite claiming 9 signals.
        w.write_u8(1);
        w.write_i8(0);
        w.write_u16_le(0);
        w.write_u16_le((Constellation::Gps as u16) << CONSTELLATION_OFFSET);
        w.write_u8(9);
        let written = w.finish().unwrap();
        let mut r = StreamReader::new(&buf[..written]);
        assert_eq!(SatGroupLog::read(&mut r), Err(ErrorCode::InvalidFrame));
    }

    #[test]
    fn reserved_constellation_is_invalid() {
        let mut buf = [0u8; 32];
        let mut w = StreamWriter::new(&mut buf);
        w.write_u32_le(0);
        w.write_u32_le(0);
        w.write_u8(1);
        w.write_u8(1);
        w.write_i8(0);
        w.write_u16_le(0);
        w.write_u16_le(9 << CONSTELLATION_OFFSET); // constellation 9: reserved
        w.write_u8(0);
        let written = w.finish().unwrap();
        let mut r = StreamReader::new(&buf[..written]);
        assert_eq!(SatGroupLog::read(&mut r), Err(ErrorCode::InvalidFrame));
    }

    #[test]
    fn truncated_group_overflows() {
        let wire = encode(&sample_group());
        let mut r = StreamReader::new(&wire[..wire.len() - 2]);
        assert_eq!(SatGroupLog::read(&mut r), Err(ErrorCode::BufferOverflow));
    }

    #[test]
    fn capacity_limits_enforced_by_builder() {
        let mut group = SatGroupLog::new(0);
        for id in 0..MAX_SATELLITES as u8 {
            assert!(
                group
                    .add_satellite(
                        id,
                        0,
                        0,
                        Constellation::Gps,
                        ElevationStatus::Unknown,
                        HealthStatus::Unknown,
                        TrackingStatus::Unknown,
                    )
                    .is_some()
            );
        }
        assert!(
            group
                .add_satellite(
                    255,
                    0,
                    0,
                    Constellation::Gps,
                    ElevationStatus::Unknown,
                    HealthStatus::Unknown,
                    TrackingStatus::Unknown,
                )
                .is_none()
        );
    }
}
