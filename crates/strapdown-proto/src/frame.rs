//! Frame layer: wire format and stream reassembly.
//!
//! One frame on the wire:
//!
//! ```text
//! +------+------+-------+----------+----------+-----------+----------+------+
//! | 0xFF | 0x5A | class | id (LE)  | len (LE) | payload   | crc (LE) | 0x33 |
//! | 1 B  | 1 B  | 1 B   | 2 B      | 2 B      | 0..=4086  | 2 B      | 1 B  |
//! +------+------+-------+----------+----------+-----------+----------+------+
//! ```
//!
//! The CRC covers the five header bytes after the sync pair plus the payload.
//!
//! [`Reassembler`] turns an arbitrary byte stream into frames: it hunts for
//! the sync pair, validates the candidate, and on any malformed candidate
//! resumes hunting one byte past the previous sync. Corruption therefore
//! costs at most the length of the damaged region; the next clean frame is
//! always recovered.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{debug, warn};

use crate::{
    crc::{Crc16, crc16},
    error::{ErrorCode, Result},
};

/// First sync byte.
pub const SYNC_1: u8 = 0xFF;
/// Second sync byte.
pub const SYNC_2: u8 = 0x5A;
/// End-of-frame marker.
pub const ETX: u8 = 0x33;
/// Largest payload a frame may carry.
pub const MAX_PAYLOAD_SIZE: usize = 4086;

/// class + id + len, after the sync pair.
const HEADER_SIZE: usize = 5;
/// crc + etx, after the payload.
const TRAILER_SIZE: usize = 3;
/// Everything except the payload.
const OVERHEAD: usize = 2 + HEADER_SIZE + TRAILER_SIZE;

/// One validated frame.
///
/// The payload is a slice of the reassembler's input buffer ([`Bytes`]), so
/// emitting a frame does not copy the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message family (logs, commands, vendor extensions).
    pub class: u8,
    /// Message number within the class.
    pub id: u16,
    /// Message body between the header and the CRC.
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame, rejecting oversized payloads.
    pub fn new(class: u8, id: u16, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(ErrorCode::BufferOverflow);
        }
        Ok(Self { class, id, payload })
    }

    /// Size of this frame on the wire.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        OVERHEAD + self.payload.len()
    }

    /// Append the wire representation of this frame to `dst`.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        if self.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(ErrorCode::BufferOverflow);
        }
        let header = self.header_bytes();

        let mut digest = Crc16::new();
        digest.update(&header);
        digest.update(&self.payload);

        dst.put_slice(&[SYNC_1, SYNC_2]);
        dst.put_slice(&header);
        dst.put_slice(&self.payload);
        dst.put_u16_le(digest.value());
        dst.put_u8(ETX);
        Ok(())
    }

    /// Wire representation of this frame.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    fn header_bytes(&self) -> [u8; HEADER_SIZE] {
        let id = self.id.to_le_bytes();
        let len = (self.payload.len() as u16).to_le_bytes();
        [self.class, id[0], id[1], len[0], len[1]]
    }
}

/// Counters kept by the reassembler.
///
/// Framing errors never surface as decode results; a consumer that cares
/// inspects these counters instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReassemblerStats {
    /// Frames emitted.
    pub frames: u64,
    /// Candidates dropped for a checksum mismatch.
    pub invalid_crc: u64,
    /// Candidates dropped for a bad length field or end marker.
    pub invalid_frames: u64,
    /// Bytes skipped while hunting for a sync pair.
    pub discarded_bytes: u64,
}

/// Stateful scanner that turns a byte stream into frames.
///
/// Feed arbitrarily-chunked input with [`Reassembler::feed`], then drain with
/// [`Reassembler::next_frame`] until it returns `None`. Frames come out in
/// strict wire order. Partial frames are retained across calls, so the caller
/// never has to align its reads with frame boundaries.
#[derive(Debug, Default)]
pub struct Reassembler {
    buf: BytesMut,
    stats: ReassemblerStats,
}

impl Reassembler {
    /// Create an empty reassembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append newly received bytes to the input buffer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Extract the next validated frame, or `None` until more input arrives.
    ///
    /// Malformed candidates (bad length, bad end marker, checksum mismatch)
    /// are counted, logged, and skipped by resuming the hunt one byte past
    /// their sync pair.
    pub fn next_frame(&mut self) -> Option<Frame> {
        loop {
            let Some(start) = self.find_sync() else {
                self.discard_to_tail();
                return None;
            };
            if start > 0 {
                self.discard(start);
            }

            if self.buf.len() < 2 + HEADER_SIZE {
                return None;
            }
            let class = self.buf[2];
            let id = u16::from_le_bytes([self.buf[3], self.buf[4]]);
            let len = usize::from(u16::from_le_bytes([self.buf[5], self.buf[6]]));
            if len > MAX_PAYLOAD_SIZE {
                debug!(class, id, len, "length field out of range, resyncing");
                self.stats.invalid_frames += 1;
                self.discard(1);
                continue;
            }

            let total = OVERHEAD + len;
            if self.buf.len() < total {
                return None;
            }

            if self.buf[total - 1] != ETX {
                debug!(class, id, "missing end marker, resyncing");
                self.stats.invalid_frames += 1;
                self.discard(1);
                continue;
            }

            let received = u16::from_le_bytes([self.buf[total - 3], self.buf[total - 2]]);
            let computed = crc16(&self.buf[2..2 + HEADER_SIZE + len]);
            if received != computed {
                warn!(class, id, received, computed, "frame checksum mismatch");
                self.stats.invalid_crc += 1;
                self.discard(1);
                continue;
            }

            let frame = self.buf.split_to(total).freeze();
            self.stats.frames += 1;
            return Some(Frame {
                class,
                id,
                payload: frame.slice(2 + HEADER_SIZE..2 + HEADER_SIZE + len),
            });
        }
    }

    /// Counters accumulated since construction.
    #[must_use]
    pub fn stats(&self) -> ReassemblerStats {
        self.stats
    }

    /// Bytes currently retained while waiting for the rest of a frame.
    #[must_use]
    pub fn pending_bytes(&self) -> usize {
        self.buf.len()
    }

    /// Drop all buffered input and restart the hunt.
    pub fn clear(&mut self) {
        self.discard(self.buf.len());
    }

    fn find_sync(&self) -> Option<usize> {
        self.buf.windows(2).position(|pair| pair == [SYNC_1, SYNC_2])
    }

    /// No sync pair in the buffer: everything except a trailing 0xFF (which
    /// may be the first half of a pair split across reads) is garbage.
    fn discard_to_tail(&mut self) {
        let keep = usize::from(self.buf.last() == Some(&SYNC_1));
        self.discard(self.buf.len() - keep);
    }

    fn discard(&mut self, count: usize) {
        if count > 0 {
            self.stats.discarded_bytes += count as u64;
            self.buf.advance(count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_bytes(class: u8, id: u16, payload: &[u8]) -> Vec<u8> {
        let frame = Frame::new(class, id, payload.to_vec()).unwrap();
        frame.to_bytes().unwrap().to_vec()
    }

    #[test]
    fn encode_layout() {
        let wire = frame_bytes(0x02, 0x0001, &[0xAA, 0xBB]);
        assert_eq!(&wire[..7], &[0xFF, 0x5A, 0x02, 0x01, 0x00, 0x02, 0x00]);
        assert_eq!(&wire[7..9], &[0xAA, 0xBB]);
        assert_eq!(wire[wire.len() - 1], ETX);
        let crc = u16::from_le_bytes([wire[9], wire[10]]);
        assert_eq!(crc, crc16(&wire[2..9]));
    }

    #[test]
    fn round_trip_single_frame() {
        let wire = frame_bytes(0x02, 0x0203, b"payload");
        let mut rx = Reassembler::new();
        rx.feed(&wire);
        let frame = rx.next_frame().unwrap();
        assert_eq!(frame.class, 0x02);
        assert_eq!(frame.id, 0x0203);
        assert_eq!(&frame.payload[..], b"payload");
        assert!(rx.next_frame().is_none());
        assert_eq!(rx.pending_bytes(), 0);
    }

    #[test]
    fn byte_at_a_time_feed() {
        let wire = frame_bytes(0x02, 7, &[1, 2, 3]);
        let mut rx = Reassembler::new();
        for (i, &byte) in wire.iter().enumerate() {
            rx.feed(&[byte]);
            let got = rx.next_frame();
            if i + 1 == wire.len() {
                assert_eq!(got.unwrap().payload.as_ref(), &[1, 2, 3]);
            } else {
                assert!(got.is_none(), "emitted early at byte {i}");
            }
        }
    }

    #[test]
    fn pipelined_frames_drain_in_order() {
        let mut wire = frame_bytes(0x02, 1, &[1]);
        wire.extend(frame_bytes(0x02, 2, &[2]));
        wire.extend(frame_bytes(0x02, 3, &[3]));
        let mut rx = Reassembler::new();
        rx.feed(&wire);
        for expect in 1..=3u16 {
            assert_eq!(rx.next_frame().unwrap().id, expect);
        }
        assert!(rx.next_frame().is_none());
    }

    #[test]
    fn garbage_prefix_is_skipped() {
        // No 0xFF in the garbage so no false sync.
        let mut wire: Vec<u8> = (0..100u8).collect();
        wire.extend(frame_bytes(0x02, 9, b"ok"));
        let mut rx = Reassembler::new();
        rx.feed(&wire);
        let frame = rx.next_frame().unwrap();
        assert_eq!(&frame.payload[..], b"ok");
        assert_eq!(rx.stats().discarded_bytes, 100);
    }

    #[test]
    fn crc_mismatch_drops_frame_then_recovers() {
        let mut bad = frame_bytes(0x02, 5, b"abcdef");
        let flip = bad.len() - 4; // last payload byte
        bad[flip] ^= 0x01;
        bad.extend(frame_bytes(0x02, 6, b"good"));

        let mut rx = Reassembler::new();
        rx.feed(&bad);
        let frame = rx.next_frame().unwrap();
        assert_eq!(frame.id, 6);
        assert_eq!(rx.stats().invalid_crc, 1);
        assert!(rx.next_frame().is_none());
    }

    #[test]
    fn bad_etx_resyncs() {
        let mut bad = frame_bytes(0x02, 5, b"xy");
        let last = bad.len() - 1;
        bad[last] = 0x00;
        bad.extend(frame_bytes(0x02, 8, b"z"));

        let mut rx = Reassembler::new();
        rx.feed(&bad);
        assert_eq!(rx.next_frame().unwrap().id, 8);
        assert!(rx.stats().invalid_frames >= 1);
    }

    #[test]
    fn oversized_length_field_resyncs() {
        let mut wire = vec![SYNC_1, SYNC_2, 0x02, 0x01, 0x00, 0xFF, 0xFF];
        wire.extend(frame_bytes(0x02, 4, b"ok"));
        let mut rx = Reassembler::new();
        rx.feed(&wire);
        assert_eq!(rx.next_frame().unwrap().id, 4);
        assert_eq!(rx.stats().invalid_frames, 1);
    }

    #[test]
    fn split_sync_pair_is_retained() {
        let wire = frame_bytes(0x02, 11, b"tail");
        let mut rx = Reassembler::new();
        // Garbage ending exactly on the first sync byte.
        rx.feed(&[0x00, 0x11, 0x22, SYNC_1]);
        assert!(rx.next_frame().is_none());
        // Rest of the frame, minus the sync byte already buffered.
        rx.feed(&wire[1..]);
        assert_eq!(rx.next_frame().unwrap().id, 11);
    }

    #[test]
    fn oversized_payload_rejected_at_construction() {
        let huge = vec![0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x02, 1, huge), Err(ErrorCode::BufferOverflow));
    }

    #[test]
    fn empty_payload_frame() {
        let wire = frame_bytes(0x10, 0, &[]);
        assert_eq!(wire.len(), OVERHEAD);
        let mut rx = Reassembler::new();
        rx.feed(&wire);
        let frame = rx.next_frame().unwrap();
        assert!(frame.payload.is_empty());
    }
}
