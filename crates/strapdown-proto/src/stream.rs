//! Cursor-based reader and writer over a fixed byte slice.
//!
//! Every message payload in the protocol is encoded and decoded through these
//! two types. All multi-byte values are little-endian regardless of host, and
//! floats are bit-for-bit IEEE-754.
//!
//! Instead of returning a `Result` from every primitive access, both cursors
//! carry a sticky error latch: the first operation that would run past the
//! end of the slice sets the latch to [`ErrorCode::BufferOverflow`], parks
//! the cursor at the end, and every later read yields zero while every later
//! write is a no-op. A decoder reads its whole field list and samples the
//! latch once at the end, which keeps multi-field decoders linear.
//!
//! # Invariants
//!
//! - The cursor never exceeds the slice length.
//! - Once latched, the cursor stays at the end and the latch survives until
//!   [`StreamReader::reset`] / [`StreamWriter::reset`].

use crate::error::{ErrorCode, Result};

macro_rules! impl_read_le {
    ($name:ident, $ty:ty, $size:expr) => {
        #[doc = concat!("Read a little-endian `", stringify!($ty), "`.")]
        #[doc = ""]
        #[doc = "Returns zero and latches the cursor on overrun."]
        pub fn $name(&mut self) -> $ty {
            let mut raw = [0u8; $size];
            if let Some(bytes) = self.take($size) {
                raw.copy_from_slice(bytes);
            }
            <$ty>::from_le_bytes(raw)
        }
    };
}

macro_rules! impl_write_le {
    ($name:ident, $ty:ty) => {
        #[doc = concat!("Write a little-endian `", stringify!($ty), "`.")]
        #[doc = ""]
        #[doc = "No-op that latches the cursor on overrun."]
        pub fn $name(&mut self, value: $ty) {
            self.put(&value.to_le_bytes());
        }
    };
}

/// Read cursor over a borrowed payload slice.
#[derive(Debug)]
pub struct StreamReader<'a> {
    buf: &'a [u8],
    cursor: usize,
    status: ErrorCode,
}

impl<'a> StreamReader<'a> {
    /// Create a reader positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, cursor: 0, status: ErrorCode::NoError }
    }

    /// Advance over `len` bytes, or latch and return `None`.
    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.status != ErrorCode::NoError {
            return None;
        }
        if len > self.buf.len() - self.cursor {
            self.status = ErrorCode::BufferOverflow;
            self.cursor = self.buf.len();
            return None;
        }
        let slice = &self.buf[self.cursor..self.cursor + len];
        self.cursor += len;
        Some(slice)
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_u16_le, u16, 2);
    impl_read_le!(read_i16_le, i16, 2);
    impl_read_le!(read_u32_le, u32, 4);
    impl_read_le!(read_i32_le, i32, 4);
    impl_read_le!(read_u64_le, u64, 8);
    impl_read_le!(read_i64_le, i64, 8);
    impl_read_le!(read_f32_le, f32, 4);
    impl_read_le!(read_f64_le, f64, 8);

    /// Read an opaque byte run into `dst`.
    ///
    /// A short run latches the cursor and leaves `dst` zero-filled.
    pub fn read_bytes(&mut self, dst: &mut [u8]) {
        match self.take(dst.len()) {
            Some(bytes) => dst.copy_from_slice(bytes),
            None => dst.fill(0),
        }
    }

    /// Consume and return all remaining bytes.
    pub fn rest(&mut self) -> &'a [u8] {
        let remaining = self.space();
        self.take(remaining).unwrap_or(&[])
    }

    /// Advance the cursor over `len` bytes without reading them.
    ///
    /// A short skip latches the cursor like any other read.
    pub fn skip(&mut self, len: usize) {
        let _ = self.take(len);
    }

    /// Bytes left between the cursor and the end of the slice.
    ///
    /// Version-tolerant decoders use this to probe for trailing fields that
    /// were added in later protocol revisions.
    #[must_use]
    pub fn space(&self) -> usize {
        self.buf.len() - self.cursor
    }

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current latch value. Reading it does not clear it.
    #[must_use]
    pub fn last_error(&self) -> ErrorCode {
        self.status
    }

    /// Sample the latch once, after all field reads.
    pub fn finish(&self) -> Result<()> {
        match self.status {
            ErrorCode::NoError => Ok(()),
            code => Err(code),
        }
    }

    /// Rewind to the start and clear the latch.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.status = ErrorCode::NoError;
    }
}

/// Write cursor over a borrowed mutable slice.
#[derive(Debug)]
pub struct StreamWriter<'a> {
    buf: &'a mut [u8],
    cursor: usize,
    status: ErrorCode,
}

impl<'a> StreamWriter<'a> {
    /// Create a writer positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, cursor: 0, status: ErrorCode::NoError }
    }

    /// Copy `bytes` at the cursor, or latch.
    fn put(&mut self, bytes: &[u8]) {
        if self.status != ErrorCode::NoError {
            return;
        }
        if bytes.len() > self.buf.len() - self.cursor {
            self.status = ErrorCode::BufferOverflow;
            self.cursor = self.buf.len();
            return;
        }
        self.buf[self.cursor..self.cursor + bytes.len()].copy_from_slice(bytes);
        self.cursor += bytes.len();
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_i8, i8);
    impl_write_le!(write_u16_le, u16);
    impl_write_le!(write_i16_le, i16);
    impl_write_le!(write_u32_le, u32);
    impl_write_le!(write_i32_le, i32);
    impl_write_le!(write_u64_le, u64);
    impl_write_le!(write_i64_le, i64);
    impl_write_le!(write_f32_le, f32);
    impl_write_le!(write_f64_le, f64);

    /// Write an opaque byte run.
    pub fn write_bytes(&mut self, src: &[u8]) {
        self.put(src);
    }

    /// Bytes left between the cursor and the end of the slice.
    #[must_use]
    pub fn space(&self) -> usize {
        self.buf.len() - self.cursor
    }

    /// Current cursor position (bytes written so far).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current latch value. Reading it does not clear it.
    #[must_use]
    pub fn last_error(&self) -> ErrorCode {
        self.status
    }

    /// Sample the latch once and return the number of bytes written.
    pub fn finish(&self) -> Result<usize> {
        match self.status {
            ErrorCode::NoError => Ok(self.cursor),
            code => Err(code),
        }
    }

    /// Rewind to the start and clear the latch.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.status = ErrorCode::NoError;
    }
}
