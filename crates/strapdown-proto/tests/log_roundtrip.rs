//! Catalogue round-trip and end-to-end decode scenarios.
//!
//! Every catalogued message is encoded to a frame, pushed through the
//! reassembler and dispatched back; the result must be field-for-field
//! identical (floats bit-equal, since the codec moves raw IEEE-754 words).

use bytes::Bytes;
use strapdown_proto::{
    ErrorCode, Frame, Message, Reassembler, StreamWriter,
    log::{
        ack::AckLog,
        aiding::{AirDataLog, DepthLog, DvlLog, DvlModel, OdometerLog, UsblLog},
        diag::DiagLog,
        ekf::{EkfEulerLog, EkfNavLog, EkfQuatLog},
        event::{EventChannel, EventLog},
        gnss::{GnssHdtLog, GnssPosLog, GnssUnit, GnssVelLog},
        imu::{FastImuLog, ImuLog, ImuShortLog},
        mag::{MagCalibLog, MagLog},
        ptp::{PtpState, PtpStatusLog, PtpTimeScale},
        raw::RawDataLog,
        sat::{
            Constellation, ElevationStatus, HealthStatus, SatGroupLog, SignalId, TrackingStatus,
        },
        session::SessionInfoPage,
        ship_motion::{ShipMotionKind, ShipMotionLog},
        status::StatusLog,
        utc::{ClockStatus, UtcLog, UtcStatus},
    },
};

fn round_trip(message: &Message) {
    let frame = message.to_frame().expect("should encode");
    let mut rx = Reassembler::new();
    rx.feed(&frame.to_bytes().expect("should frame"));
    let received = rx.next_frame().expect("should reassemble");
    assert_eq!(received, frame);
    let decoded = Message::from_frame(&received).expect("should dispatch");
    assert_eq!(&decoded, message);
}

fn sample_sat_group() -> SatGroupLog {
    let mut group = SatGroupLog::new(5_000_000);
    let sat = group
        .add_satellite(
            7,
            62,
            143,
            Constellation::Gps,
            ElevationStatus::Rising,
            HealthStatus::Healthy,
            TrackingStatus::Tracking,
        )
        .expect("group has room");
    sat.add_signal(SignalId::GpsL1Ca, HealthStatus::Healthy, TrackingStatus::TrackingUsed, Some(48))
        .expect("satellite has room");
    sat.add_signal(SignalId::GpsL2C, HealthStatus::Healthy, TrackingStatus::TrackingNotUsed, Some(39))
        .expect("satellite has room");
    let sat = group
        .add_satellite(
            21,
            18,
            305,
            Constellation::Glonass,
            ElevationStatus::Setting,
            HealthStatus::Healthy,
            TrackingStatus::Tracking,
        )
        .expect("group has room");
    sat.add_signal(SignalId::GlonassG1Ca, HealthStatus::Healthy, TrackingStatus::TrackingUsed, Some(44))
        .expect("satellite has room");
    sat.add_signal(SignalId::GlonassG2Ca, HealthStatus::Unknown, TrackingStatus::Searching, None)
        .expect("satellite has room");
    group
}

#[test]
fn every_catalogue_entry_round_trips() {
    let messages = [
        Message::Status(StatusLog {
            time_stamp: 1,
            general_status: 0x0007,
            com_status2: 2,
            com_status: 3,
            aiding_status: 4,
            reserved2: 0,
            reserved3: 0,
            uptime: 86_400,
        }),
        Message::UtcTime(UtcLog {
            time_stamp: 2,
            status: UtcLog::pack_status(true, ClockStatus::Valid, true, UtcStatus::Valid),
            year: 2026,
            month: 8,
            day: 1,
            hour: 12,
            minute: 34,
            second: 56,
            nano_second: 123_456_789,
            gps_time_of_week: 550_296_000,
        }),
        Message::Imu(ImuLog {
            time_stamp: 3,
            status: 0x0007,
            accelerometers: [0.01, -0.02, 9.81],
            gyroscopes: [0.001, 0.002, -0.003],
            temperature: 24.5,
            delta_velocity: [0.0001, -0.0002, 0.049],
            delta_angle: [5e-6, -5e-6, 1e-5],
        }),
        Message::ImuShort(ImuShortLog {
            time_stamp: 4,
            status: 1,
            delta_velocity: [1_000, -2_000, 1_048_576],
            delta_angle: [500, -500, 67_108],
            temperature: 6_272,
        }),
        // Fast IMU values sit at wire resolution so the i16 packing is
        // lossless.
        Message::FastImu(FastImuLog {
            time_stamp: 5,
            status: 1,
            accelerometers: [0.0, 42.0 * 0.01, 980.0 * 0.01],
            gyroscopes: [1.0 * 0.001, -2.0 * 0.001, 100.0 * 0.001],
        }),
        Message::Mag(MagLog {
            time_stamp: 6,
            status: 1,
            magnetometers: [0.2, -0.1, 0.45],
            accelerometers: [0.0, 0.0, 9.79],
        }),
        Message::MagCalib(MagCalibLog {
            time_stamp: 7,
            reserved: 0,
            mag_data: *b"0123456789abcdef",
        }),
        Message::EkfEuler(EkfEulerLog {
            time_stamp: 8,
            euler: [0.01, -0.02, 1.57],
            euler_std_dev: [0.001, 0.001, 0.002],
            status: 0x0425,
        }),
        Message::EkfQuat(EkfQuatLog {
            time_stamp: 9,
            quaternion: [0.707, 0.0, 0.0, 0.707],
            euler_std_dev: [0.001, 0.001, 0.002],
            status: 0x0425,
        }),
        Message::EkfNav(EkfNavLog {
            time_stamp: 10,
            velocity: [1.5, -0.2, 0.01],
            velocity_std_dev: [0.05, 0.05, 0.08],
            latitude: 43.61,
            longitude: 1.44,
            altitude: 152.3,
            undulation: 48.1,
            position_std_dev: [0.8, 0.8, 1.5],
            status: 0x0425,
        }),
        Message::ShipMotion {
            kind: ShipMotionKind::Standard,
            data: ShipMotionLog {
                time_stamp: 11,
                main_heave_period: 7.5,
                ship_motion: [0.1, -0.1, 0.8],
                ship_accel: [0.01, -0.01, 0.2],
                ship_vel: [0.05, -0.05, 0.3],
                status: 1,
            },
        },
        Message::ShipMotion {
            kind: ShipMotionKind::HighPrecision,
            data: ShipMotionLog { time_stamp: 12, ..ShipMotionLog::default() },
        },
        Message::GnssVel {
            unit: GnssUnit::Primary,
            data: GnssVelLog {
                time_stamp: 13,
                status: 0,
                time_of_week: 402_000,
                velocity: [1.0, 2.0, -0.1],
                velocity_acc: [0.1, 0.1, 0.2],
                course: 87.5,
                course_acc: 1.5,
            },
        },
        Message::GnssPos {
            unit: GnssUnit::Secondary,
            data: GnssPosLog {
                time_stamp: 14,
                status: 0,
                time_of_week: 402_200,
                latitude: 48.8566,
                longitude: 2.3522,
                altitude: 35.0,
                undulation: 44.6,
                latitude_accuracy: 0.9,
                longitude_accuracy: 1.1,
                altitude_accuracy: 2.0,
                num_sv_used: 17,
                base_station_id: 1234,
                differential_age: 150,
            },
        },
        Message::GnssHdt {
            unit: GnssUnit::Primary,
            data: GnssHdtLog {
                time_stamp: 15,
                status: 1,
                time_of_week: 402_400,
                heading: 181.25,
                heading_accuracy: 0.15,
                pitch: -0.5,
                pitch_accuracy: 0.2,
                baseline: 2.05,
            },
        },
        Message::GnssRaw {
            unit: GnssUnit::Primary,
            data: RawDataLog::new(Bytes::from_static(b"\xb5\x62ubx-raw")).expect("fits"),
        },
        Message::GnssSat { unit: GnssUnit::Secondary, data: sample_sat_group() },
        Message::OdoVel(OdometerLog { time_stamp: 16, status: 1, velocity: 13.9 }),
        Message::Event {
            channel: EventChannel::InB,
            data: EventLog {
                time_stamp: 17,
                status: 0x0003,
                time_offset0: 100,
                time_offset1: 200,
                time_offset2: 0,
                time_offset3: 0,
            },
        },
        Message::Dvl {
            model: DvlModel::BottomTrack,
            data: DvlLog {
                time_stamp: 18,
                status: 1,
                velocity: [0.5, -0.1, 0.02],
                velocity_quality: [0.9, 0.9, 0.7],
            },
        },
        Message::AirData(AirDataLog {
            time_stamp: 19,
            status: 1,
            pressure_abs: 101_325.0,
            altitude: 120.5,
            pressure_diff: 480.0,
            true_airspeed: 28.3,
            air_temperature: 11.5,
        }),
        Message::Usbl(UsblLog {
            time_stamp: 20,
            status: 1,
            latitude: -33.86,
            longitude: 151.21,
            depth: 45.2,
            latitude_accuracy: 2.0,
            longitude_accuracy: 2.0,
            depth_accuracy: 0.5,
        }),
        Message::Depth(DepthLog {
            time_stamp: 21,
            status: 1,
            pressure_abs: 501_325.0,
            altitude: -40.1,
        }),
        Message::Diag(DiagLog {
            time_stamp: 22,
            severity: 1,
            code: ErrorCode::TimeOut as u8,
            message: "aiding outage on GNSS1".to_owned(),
        }),
        Message::RtcmRaw(RawDataLog::new(Bytes::from_static(b"\xd3\x00\x13rtcm")).expect("fits")),
        Message::SessionInfo(SessionInfoPage {
            page_index: 0,
            nr_pages: 2,
            data: Bytes::from_static(b"{\"serial\":\"0460"),
        }),
        Message::PtpStatus(PtpStatusLog {
            time_stamp: 23,
            state: PtpState::Passive,
            time_scale: PtpTimeScale::Gps,
            time_scale_offset: 18.0,
            mean_path_delay: 1.0e-6,
            mean_path_delay_std_dev: 1.0e-7,
            clock_offset: 2.0e-8,
            clock_offset_std_dev: 5.0e-9,
            clock_freq_offset: -3.2,
            clock_freq_offset_std_dev: 0.1,
            ..PtpStatusLog::default()
        }),
        Message::Ack(AckLog::new(0x10, 2, ErrorCode::NoError)),
    ];

    for message in &messages {
        round_trip(message);
    }
}

// Scenario: a known IMU log must produce the documented leading bytes and
// decode to bit-identical field values.
#[test]
fn hello_imu_frame_layout() {
    let imu = Message::Imu(ImuLog {
        time_stamp: 1_000_000,
        status: 0x0007,
        accelerometers: [0.0, 0.0, 9.806_65],
        gyroscopes: [0.0, 0.0, 0.0],
        temperature: 25.0,
        delta_velocity: [0.0, 0.0, 0.0],
        delta_angle: [0.0, 0.0, 0.0],
    });
    let wire = imu.to_frame().unwrap().to_bytes().unwrap();

    // FF 5A, class 2, id 3, len 58.
    assert_eq!(&wire[..7], &[0xFF, 0x5A, 0x02, 0x03, 0x00, 0x3A, 0x00]);

    let mut rx = Reassembler::new();
    rx.feed(&wire);
    let frame = rx.next_frame().expect("CRC must verify");
    match Message::from_frame(&frame).unwrap() {
        Message::Imu(back) => {
            assert_eq!(back.time_stamp, 1_000_000);
            assert_eq!(back.status, 0x0007);
            assert_eq!(back.accelerometers[2].to_bits(), 9.806_65_f32.to_bits());
            assert_eq!(back.temperature.to_bits(), 25.0_f32.to_bits());
        }
        other => panic!("wrong variant: {other:?}"),
    }
}

// Scenario: a pre-1.4 GNSS position payload (52 bytes) decodes with the
// documented defaults and no error.
#[test]
fn truncated_gnss_pos_decodes_with_defaults() {
    let full = GnssPosLog {
        time_stamp: 1,
        status: 0,
        time_of_week: 2,
        latitude: 59.33,
        longitude: 18.06,
        altitude: 28.0,
        undulation: 24.1,
        latitude_accuracy: 1.0,
        longitude_accuracy: 1.0,
        altitude_accuracy: 2.2,
        ..GnssPosLog::default()
    };
    let frame = Message::GnssPos { unit: GnssUnit::Primary, data: full }.to_frame().unwrap();
    let legacy_payload = frame.payload.slice(..frame.payload.len() - 5);
    assert_eq!(legacy_payload.len(), 52);

    match Message::parse(frame.class, frame.id, &legacy_payload).unwrap() {
        Message::GnssPos { data, .. } => {
            assert_eq!(data.num_sv_used, 0);
            assert_eq!(data.base_station_id, 0xFFFF);
            assert_eq!(data.differential_age, 0xFFFF);
            assert_eq!(data.latitude, full.latitude);
        }
        other => panic!("wrong variant: {other:?}"),
    }
}

// Scenario: garbage, a Status frame, more garbage, a UTC frame. Both frames
// come out; the garbage only moves counters.
#[test]
fn garbled_stream_recovers_both_frames() {
    let status = Message::Status(StatusLog { time_stamp: 1, ..StatusLog::default() });
    let utc = Message::UtcTime(UtcLog { time_stamp: 2, year: 2026, ..UtcLog::default() });

    let mut wire: Vec<u8> = (0..100u32).map(|i| (i * 13 % 0xEF) as u8).collect();
    wire.extend_from_slice(&status.to_frame().unwrap().to_bytes().unwrap());
    wire.extend((0..50u32).map(|i| (i * 29 % 0xEF) as u8));
    wire.extend_from_slice(&utc.to_frame().unwrap().to_bytes().unwrap());

    let mut rx = Reassembler::new();
    rx.feed(&wire);
    let mut decoded = Vec::new();
    while let Some(frame) = rx.next_frame() {
        decoded.push(Message::from_frame(&frame).unwrap());
    }
    assert_eq!(decoded, vec![status, utc]);
}

// Scenario: a 2x2 satellites group survives dispatch; dropping the decoded
// variant releases the nested vectors through Drop.
#[test]
fn satellite_group_round_trips_through_dispatch() {
    let group = sample_sat_group();
    let frame =
        Message::GnssSat { unit: GnssUnit::Primary, data: group.clone() }.to_frame().unwrap();
    match Message::from_frame(&frame).unwrap() {
        Message::GnssSat { data, .. } => {
            assert_eq!(data, group);
            assert_eq!(data.satellites.len(), 2);
            assert_eq!(data.satellites[0].signals.len(), 2);
        }
        other => panic!("wrong variant: {other:?}"),
    }
}

#[test]
fn oversized_satellite_counts_fail_dispatch() {
    // Group header claiming 65 satellites.
    let mut buf = [0u8; 16];
    let mut w = StreamWriter::new(&mut buf);
    w.write_u32_le(0);
    w.write_u32_le(0);
    w.write_u8(65);
    let written = w.finish().unwrap();
    let payload = Bytes::copy_from_slice(&buf[..written]);
    assert_eq!(Message::parse(0x02, 50, &payload), Err(ErrorCode::InvalidFrame));
}

// Scenario: PTP with a state byte of 5 is rejected parameter-invalid.
#[test]
fn ptp_invalid_state_rejected_at_dispatch() {
    let frame = Message::PtpStatus(PtpStatusLog {
        mean_path_delay: 0.0,
        mean_path_delay_std_dev: 0.0,
        clock_offset: 0.0,
        clock_offset_std_dev: 0.0,
        clock_freq_offset: 0.0,
        clock_freq_offset_std_dev: 0.0,
        ..PtpStatusLog::default()
    })
    .to_frame()
    .unwrap();
    let mut payload = frame.payload.to_vec();
    payload[4] = 5;
    let payload = Bytes::from(payload);
    assert_eq!(Message::parse(frame.class, frame.id, &payload), Err(ErrorCode::InvalidParameter));
}

#[test]
fn unknown_identity_is_unsupported() {
    let frame = Frame::new(0x04, 1, Bytes::from_static(b"??")).unwrap();
    assert_eq!(Message::from_frame(&frame), Err(ErrorCode::Error));
}
