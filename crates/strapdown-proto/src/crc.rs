//! Frame checksum.
//!
//! CRC-16 with polynomial 0x1021, zero initial value, no reflection and no
//! final xor. The check value for `b"123456789"` is 0x31C3.

const POLY: u16 = 0x1021;

/// Incremental CRC-16 digest.
///
/// The frame writer digests the header and the payload separately without
/// assembling them in one buffer first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc16 {
    value: u16,
}

impl Crc16 {
    /// Start a new digest at the zero initial value.
    #[must_use]
    pub fn new() -> Self {
        Self { value: 0 }
    }

    /// Fold `data` into the digest, most significant bit first.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.value ^= u16::from(byte) << 8;
            for _ in 0..8 {
                self.value = if self.value & 0x8000 != 0 {
                    (self.value << 1) ^ POLY
                } else {
                    self.value << 1
                };
            }
        }
    }

    /// Current checksum value.
    #[must_use]
    pub fn value(self) -> u16 {
        self.value
    }
}

/// One-shot checksum over `data`.
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    let mut digest = Crc16::new();
    digest.update(data);
    digest.value()
}
