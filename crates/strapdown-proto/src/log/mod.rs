//! Message catalogue and dispatcher.
//!
//! Every `(class, id)` pair the library understands maps to one decoder and
//! one encoder. [`Message::parse`] routes a validated frame to its decoder
//! and returns the tagged union; [`Message::to_frame`] runs the inverse
//! path. Several payloads are emitted under more than one id (two GNSS
//! receivers, seven event lines, two DVL tracking modes); the union carries
//! a small discriminant next to the shared payload so encoding can pick the
//! same id back.

pub mod ack;
pub mod aiding;
pub mod diag;
pub mod ekf;
pub mod event;
pub mod gnss;
pub mod imu;
pub mod mag;
pub mod ptp;
pub mod raw;
pub mod sat;
pub mod session;
pub mod ship_motion;
pub mod status;
pub mod utc;

use bytes::Bytes;

use crate::{
    error::{ErrorCode, Result},
    frame::{Frame, MAX_PAYLOAD_SIZE},
    stream::{StreamReader, StreamWriter},
};

use self::{
    ack::AckLog,
    aiding::{AirDataLog, DepthLog, DvlLog, DvlModel, OdometerLog, UsblLog},
    diag::DiagLog,
    ekf::{EkfEulerLog, EkfNavLog, EkfQuatLog},
    event::{EventChannel, EventLog},
    gnss::{GnssHdtLog, GnssPosLog, GnssUnit, GnssVelLog},
    imu::{FastImuLog, ImuLog, ImuShortLog},
    mag::{MagCalibLog, MagLog},
    ptp::PtpStatusLog,
    raw::RawDataLog,
    sat::SatGroupLog,
    session::SessionInfoPage,
    ship_motion::{ShipMotionKind, ShipMotionLog},
    status::StatusLog,
    utc::UtcLog,
};

/// Top-level message family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageClass {
    /// Primary telemetry logs.
    LogEcom0 = 0x02,
    /// High-rate telemetry logs.
    LogEcom1 = 0x03,
    /// Configuration commands and acknowledges.
    Command = 0x10,
}

impl MessageClass {
    /// Decode a wire class byte. `None` for unknown families.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x02 => Some(Self::LogEcom0),
            0x03 => Some(Self::LogEcom1),
            0x10 => Some(Self::Command),
            _ => None,
        }
    }

    /// Wire value of this class.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Message ids of the primary telemetry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
#[allow(missing_docs)] // Names mirror the catalogue table.
pub enum LogId {
    Status = 1,
    UtcTime = 2,
    Imu = 3,
    Mag = 4,
    MagCalib = 5,
    EkfEuler = 6,
    EkfQuat = 7,
    EkfNav = 8,
    ShipMotion = 9,
    Gnss1Vel = 10,
    Gnss1Pos = 11,
    Gnss1Hdt = 12,
    Gnss2Vel = 13,
    Gnss2Pos = 14,
    Gnss2Hdt = 15,
    OdoVel = 16,
    EventInA = 17,
    EventInB = 18,
    EventInC = 19,
    EventInD = 20,
    EventInE = 21,
    DvlBottomTrack = 29,
    DvlWaterTrack = 30,
    Gnss1Raw = 31,
    ShipMotionHp = 32,
    AirData = 36,
    Usbl = 37,
    Gnss2Raw = 38,
    ImuShort = 44,
    EventOutA = 45,
    EventOutB = 46,
    Depth = 47,
    Diag = 48,
    RtcmRaw = 49,
    Gnss1Sat = 50,
    Gnss2Sat = 51,
    SessionInfo = 53,
    PtpStatus = 57,
}

impl LogId {
    /// Decode a wire id. `None` for ids outside the catalogue.
    #[must_use]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Status),
            2 => Some(Self::UtcTime),
            3 => Some(Self::Imu),
            4 => Some(Self::Mag),
            5 => Some(Self::MagCalib),
            6 => Some(Self::EkfEuler),
            7 => Some(Self::EkfQuat),
            8 => Some(Self::EkfNav),
            9 => Some(Self::ShipMotion),
            10 => Some(Self::Gnss1Vel),
            11 => Some(Self::Gnss1Pos),
            12 => Some(Self::Gnss1Hdt),
            13 => Some(Self::Gnss2Vel),
            14 => Some(Self::Gnss2Pos),
            15 => Some(Self::Gnss2Hdt),
            16 => Some(Self::OdoVel),
            17 => Some(Self::EventInA),
            18 => Some(Self::EventInB),
            19 => Some(Self::EventInC),
            20 => Some(Self::EventInD),
            21 => Some(Self::EventInE),
            29 => Some(Self::DvlBottomTrack),
            30 => Some(Self::DvlWaterTrack),
            31 => Some(Self::Gnss1Raw),
            32 => Some(Self::ShipMotionHp),
            36 => Some(Self::AirData),
            37 => Some(Self::Usbl),
            38 => Some(Self::Gnss2Raw),
            44 => Some(Self::ImuShort),
            45 => Some(Self::EventOutA),
            46 => Some(Self::EventOutB),
            47 => Some(Self::Depth),
            48 => Some(Self::Diag),
            49 => Some(Self::RtcmRaw),
            50 => Some(Self::Gnss1Sat),
            51 => Some(Self::Gnss2Sat),
            53 => Some(Self::SessionInfo),
            57 => Some(Self::PtpStatus),
            _ => None,
        }
    }

    /// Wire value of this id.
    #[must_use]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}

/// Message ids of the high-rate telemetry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HighRateId {
    /// Packed IMU data.
    FastImu = 0,
}

impl HighRateId {
    /// Decode a wire id. `None` for ids outside the catalogue.
    #[must_use]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::FastImu),
            _ => None,
        }
    }

    /// Wire value of this id.
    #[must_use]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}

/// Message ids of the command class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CmdId {
    /// Acknowledge of a previous command.
    Ack = 0,
}

impl CmdId {
    /// Decode a wire id. `None` for ids outside the catalogue.
    #[must_use]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::Ack),
            _ => None,
        }
    }

    /// Wire value of this id.
    #[must_use]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}

/// Tagged union over every message the catalogue recognises.
///
/// Variants are value types; only [`Message::GnssSat`] owns heap data (its
/// nested signal vectors), released by `Drop`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// General device status.
    Status(StatusLog),
    /// UTC time.
    UtcTime(UtcLog),
    /// Full-rate IMU data.
    Imu(ImuLog),
    /// Compact fixed-point IMU data.
    ImuShort(ImuShortLog),
    /// Packed high-rate IMU data.
    FastImu(FastImuLog),
    /// Calibrated magnetometer output.
    Mag(MagLog),
    /// Raw magnetic calibration take.
    MagCalib(MagCalibLog),
    /// Filter attitude as Euler angles.
    EkfEuler(EkfEulerLog),
    /// Filter attitude as a quaternion.
    EkfQuat(EkfQuatLog),
    /// Filter navigation solution.
    EkfNav(EkfNavLog),
    /// Vessel motion.
    ShipMotion {
        /// Which heave computation produced the log.
        kind: ShipMotionKind,
        /// Payload.
        data: ShipMotionLog,
    },
    /// GNSS velocity solution.
    GnssVel {
        /// Emitting receiver.
        unit: GnssUnit,
        /// Payload.
        data: GnssVelLog,
    },
    /// GNSS position solution.
    GnssPos {
        /// Emitting receiver.
        unit: GnssUnit,
        /// Payload.
        data: GnssPosLog,
    },
    /// GNSS true heading.
    GnssHdt {
        /// Emitting receiver.
        unit: GnssUnit,
        /// Payload.
        data: GnssHdtLog,
    },
    /// GNSS receiver native byte stream.
    GnssRaw {
        /// Emitting receiver.
        unit: GnssUnit,
        /// Payload.
        data: RawDataLog,
    },
    /// Satellites in view.
    GnssSat {
        /// Emitting receiver.
        unit: GnssUnit,
        /// Payload.
        data: SatGroupLog,
    },
    /// Odometer velocity.
    OdoVel(OdometerLog),
    /// Sync event marker.
    Event {
        /// Line the event was captured or generated on.
        channel: EventChannel,
        /// Payload.
        data: EventLog,
    },
    /// Doppler velocity log measurement.
    Dvl {
        /// Tracking mode.
        model: DvlModel,
        /// Payload.
        data: DvlLog,
    },
    /// Barometric air data.
    AirData(AirDataLog),
    /// USBL positioning input.
    Usbl(UsblLog),
    /// Depth sensor input.
    Depth(DepthLog),
    /// Device diagnostic message.
    Diag(DiagLog),
    /// RTCM corrections pass-through.
    RtcmRaw(RawDataLog),
    /// One page of the session information blob.
    SessionInfo(SessionInfoPage),
    /// PTP synchronization status.
    PtpStatus(PtpStatusLog),
    /// Command acknowledge.
    Ack(AckLog),
}

impl Message {
    /// Decode the payload of a validated frame.
    ///
    /// Unknown `(class, id)` pairs return [`ErrorCode::Error`]; a consumer
    /// that tolerates newer devices logs and drops the frame.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        Self::parse(frame.class, frame.id, &frame.payload)
    }

    /// Decode a payload from its `(class, id)` identity.
    pub fn parse(class: u8, id: u16, payload: &Bytes) -> Result<Self> {
        match MessageClass::from_u8(class) {
            Some(MessageClass::LogEcom0) => Self::parse_log(id, payload),
            Some(MessageClass::LogEcom1) => Self::parse_high_rate(id, payload),
            Some(MessageClass::Command) => Self::parse_command(id, payload),
            None => Err(ErrorCode::Error),
        }
    }

    fn parse_log(id: u16, payload: &Bytes) -> Result<Self> {
        use GnssUnit::{Primary, Secondary};

        let Some(id) = LogId::from_u16(id) else {
            return Err(ErrorCode::Error);
        };
        let mut r = StreamReader::new(payload);
        let message = match id {
            LogId::Status => Self::Status(StatusLog::read(&mut r)?),
            LogId::UtcTime => Self::UtcTime(UtcLog::read(&mut r)?),
            LogId::Imu => Self::Imu(ImuLog::read(&mut r)?),
            LogId::ImuShort => Self::ImuShort(ImuShortLog::read(&mut r)?),
            LogId::Mag => Self::Mag(MagLog::read(&mut r)?),
            LogId::MagCalib => Self::MagCalib(MagCalibLog::read(&mut r)?),
            LogId::EkfEuler => Self::EkfEuler(EkfEulerLog::read(&mut r)?),
            LogId::EkfQuat => Self::EkfQuat(EkfQuatLog::read(&mut r)?),
            LogId::EkfNav => Self::EkfNav(EkfNavLog::read(&mut r)?),
            LogId::ShipMotion => Self::ShipMotion {
                kind: ShipMotionKind::Standard,
                data: ShipMotionLog::read(&mut r)?,
            },
            LogId::ShipMotionHp => Self::ShipMotion {
                kind: ShipMotionKind::HighPrecision,
                data: ShipMotionLog::read(&mut r)?,
            },
            LogId::Gnss1Vel => Self::GnssVel { unit: Primary, data: GnssVelLog::read(&mut r)? },
            LogId::Gnss2Vel => Self::GnssVel { unit: Secondary, data: GnssVelLog::read(&mut r)? },
            LogId::Gnss1Pos => Self::GnssPos { unit: Primary, data: GnssPosLog::read(&mut r)? },
            LogId::Gnss2Pos => Self::GnssPos { unit: Secondary, data: GnssPosLog::read(&mut r)? },
            LogId::Gnss1Hdt => Self::GnssHdt { unit: Primary, data: GnssHdtLog::read(&mut r)? },
            LogId::Gnss2Hdt => Self::GnssHdt { unit: Secondary, data: GnssHdtLog::read(&mut r)? },
            LogId::Gnss1Raw => Self::GnssRaw { unit: Primary, data: RawDataLog::read(payload)? },
            LogId::Gnss2Raw => Self::GnssRaw { unit: Secondary, data: RawDataLog::read(payload)? },
            LogId::Gnss1Sat => Self::GnssSat { unit: Primary, data: SatGroupLog::read(&mut r)? },
            LogId::Gnss2Sat => Self::GnssSat { unit: Secondary, data: SatGroupLog::read(&mut r)? },
            LogId::OdoVel => Self::OdoVel(OdometerLog::read(&mut r)?),
            LogId::EventInA => Self::event(EventChannel::InA, &mut r)?,
            LogId::EventInB => Self::event(EventChannel::InB, &mut r)?,
            LogId::EventInC => Self::event(EventChannel::InC, &mut r)?,
            LogId::EventInD => Self::event(EventChannel::InD, &mut r)?,
            LogId::EventInE => Self::event(EventChannel::InE, &mut r)?,
            LogId::EventOutA => Self::event(EventChannel::OutA, &mut r)?,
            LogId::EventOutB => Self::event(EventChannel::OutB, &mut r)?,
            LogId::DvlBottomTrack => Self::Dvl {
                model: DvlModel::BottomTrack,
                data: DvlLog::read(&mut r)?,
            },
            LogId::DvlWaterTrack => Self::Dvl {
                model: DvlModel::WaterTrack,
                data: DvlLog::read(&mut r)?,
            },
            LogId::AirData => Self::AirData(AirDataLog::read(&mut r)?),
            LogId::Usbl => Self::Usbl(UsblLog::read(&mut r)?),
            LogId::Depth => Self::Depth(DepthLog::read(&mut r)?),
            LogId::Diag => Self::Diag(DiagLog::read(&mut r)?),
            LogId::RtcmRaw => Self::RtcmRaw(RawDataLog::read(payload)?),
            LogId::SessionInfo => Self::SessionInfo(SessionInfoPage::read(&mut r, payload)?),
            LogId::PtpStatus => Self::PtpStatus(PtpStatusLog::read(&mut r)?),
        };
        Ok(message)
    }

    fn event(channel: EventChannel, r: &mut StreamReader<'_>) -> Result<Self> {
        Ok(Self::Event { channel, data: EventLog::read(r)? })
    }

    fn parse_high_rate(id: u16, payload: &Bytes) -> Result<Self> {
        let Some(id) = HighRateId::from_u16(id) else {
            return Err(ErrorCode::Error);
        };
        let mut r = StreamReader::new(payload);
        match id {
            HighRateId::FastImu => Ok(Self::FastImu(FastImuLog::read(&mut r)?)),
        }
    }

    fn parse_command(id: u16, payload: &Bytes) -> Result<Self> {
        let Some(id) = CmdId::from_u16(id) else {
            return Err(ErrorCode::Error);
        };
        let mut r = StreamReader::new(payload);
        match id {
            CmdId::Ack => Ok(Self::Ack(AckLog::read(&mut r)?)),
        }
    }

    /// `(class, id)` this message encodes under.
    #[must_use]
    pub fn class_id(&self) -> (u8, u16) {
        use GnssUnit::{Primary, Secondary};

        let log = |id: LogId| (MessageClass::LogEcom0.to_u8(), id.to_u16());
        match self {
            Self::Status(_) => log(LogId::Status),
            Self::UtcTime(_) => log(LogId::UtcTime),
            Self::Imu(_) => log(LogId::Imu),
            Self::ImuShort(_) => log(LogId::ImuShort),
            Self::FastImu(_) => {
                (MessageClass::LogEcom1.to_u8(), HighRateId::FastImu.to_u16())
            }
            Self::Mag(_) => log(LogId::Mag),
            Self::MagCalib(_) => log(LogId::MagCalib),
            Self::EkfEuler(_) => log(LogId::EkfEuler),
            Self::EkfQuat(_) => log(LogId::EkfQuat),
            Self::EkfNav(_) => log(LogId::EkfNav),
            Self::ShipMotion { kind: ShipMotionKind::Standard, .. } => log(LogId::ShipMotion),
            Self::ShipMotion { kind: ShipMotionKind::HighPrecision, .. } => {
                log(LogId::ShipMotionHp)
            }
            Self::GnssVel { unit: Primary, .. } => log(LogId::Gnss1Vel),
            Self::GnssVel { unit: Secondary, .. } => log(LogId::Gnss2Vel),
            Self::GnssPos { unit: Primary, .. } => log(LogId::Gnss1Pos),
            Self::GnssPos { unit: Secondary, .. } => log(LogId::Gnss2Pos),
            Self::GnssHdt { unit: Primary, .. } => log(LogId::Gnss1Hdt),
            Self::GnssHdt { unit: Secondary, .. } => log(LogId::Gnss2Hdt),
            Self::GnssRaw { unit: Primary, .. } => log(LogId::Gnss1Raw),
            Self::GnssRaw { unit: Secondary, .. } => log(LogId::Gnss2Raw),
            Self::GnssSat { unit: Primary, .. } => log(LogId::Gnss1Sat),
            Self::GnssSat { unit: Secondary, .. } => log(LogId::Gnss2Sat),
            Self::OdoVel(_) => log(LogId::OdoVel),
            Self::Event { channel, .. } => log(match channel {
                EventChannel::InA => LogId::EventInA,
                EventChannel::InB => LogId::EventInB,
                EventChannel::InC => LogId::EventInC,
                EventChannel::InD => LogId::EventInD,
                EventChannel::InE => LogId::EventInE,
                EventChannel::OutA => LogId::EventOutA,
                EventChannel::OutB => LogId::EventOutB,
            }),
            Self::Dvl { model: DvlModel::BottomTrack, .. } => log(LogId::DvlBottomTrack),
            Self::Dvl { model: DvlModel::WaterTrack, .. } => log(LogId::DvlWaterTrack),
            Self::AirData(_) => log(LogId::AirData),
            Self::Usbl(_) => log(LogId::Usbl),
            Self::Depth(_) => log(LogId::Depth),
            Self::Diag(_) => log(LogId::Diag),
            Self::RtcmRaw(_) => log(LogId::RtcmRaw),
            Self::SessionInfo(_) => log(LogId::SessionInfo),
            Self::PtpStatus(_) => log(LogId::PtpStatus),
            Self::Ack(_) => (MessageClass::Command.to_u8(), CmdId::Ack.to_u16()),
        }
    }

    /// Encode this message into a ready-to-send frame.
    ///
    /// Encoders always emit the current full layout, including every
    /// version-tolerant tail field.
    pub fn to_frame(&self) -> Result<Frame> {
        let mut buf = [0u8; MAX_PAYLOAD_SIZE];
        let mut w = StreamWriter::new(&mut buf);
        self.write_payload(&mut w);
        let written = w.finish()?;
        let (class, id) = self.class_id();
        Frame::new(class, id, Bytes::copy_from_slice(&buf[..written]))
    }

    fn write_payload(&self, w: &mut StreamWriter<'_>) {
        match self {
            Self::Status(data) => data.write(w),
            Self::UtcTime(data) => data.write(w),
            Self::Imu(data) => data.write(w),
            Self::ImuShort(data) => data.write(w),
            Self::FastImu(data) => data.write(w),
            Self::Mag(data) => data.write(w),
            Self::MagCalib(data) => data.write(w),
            Self::EkfEuler(data) => data.write(w),
            Self::EkfQuat(data) => data.write(w),
            Self::EkfNav(data) => data.write(w),
            Self::ShipMotion { data, .. } => data.write(w),
            Self::GnssVel { data, .. } => data.write(w),
            Self::GnssPos { data, .. } => data.write(w),
            Self::GnssHdt { data, .. } => data.write(w),
            Self::GnssRaw { data, .. } => data.write(w),
            Self::GnssSat { data, .. } => data.write(w),
            Self::OdoVel(data) => data.write(w),
            Self::Event { data, .. } => data.write(w),
            Self::Dvl { data, .. } => data.write(w),
            Self::AirData(data) => data.write(w),
            Self::Usbl(data) => data.write(w),
            Self::Depth(data) => data.write(w),
            Self::Diag(data) => data.write(w),
            Self::RtcmRaw(data) => data.write(w),
            Self::SessionInfo(data) => data.write(w),
            Self::PtpStatus(data) => data.write(w),
            Self::Ack(data) => data.write(w),
        }
    }
}
