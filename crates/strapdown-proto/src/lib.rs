//! Wire protocol engine for the strapdown INS telemetry stream.
//!
//! The product family emits a continuous stream of telemetry frames over a
//! serial link, a UDP socket or a captured log file, and answers
//! configuration commands on the same framing. This crate is the pure
//! protocol core: it owns no I/O and is driven byte-in / frame-out by the
//! embedding application.
//!
//! # Layers
//!
//! - [`stream`]: little-endian cursor codec with a sticky error latch, used
//!   by every payload encoder and decoder
//! - [`frame`]: sync hunting, CRC validation and frame reassembly over an
//!   arbitrary byte stream
//! - [`log`]: one encoder/decoder pair per catalogued `(class, id)` and the
//!   [`Message`] union returned by dispatch
//! - [`error`]: the dense protocol error code enumeration
//!
//! # Receiving telemetry
//!
//! ```
//! use strapdown_proto::{Message, Reassembler};
//!
//! let mut rx = Reassembler::new();
//! # let bytes_from_device: &[u8] = &[];
//! rx.feed(bytes_from_device);
//! while let Some(frame) = rx.next_frame() {
//!     match Message::from_frame(&frame) {
//!         Ok(message) => println!("{message:?}"),
//!         Err(code) => eprintln!("dropped {}/{}: {code}", frame.class, frame.id),
//!     }
//! }
//! ```

pub mod crc;
pub mod error;
pub mod frame;
pub mod log;
pub mod stream;

pub use crc::crc16;
pub use error::{ErrorCode, Result};
pub use frame::{ETX, Frame, MAX_PAYLOAD_SIZE, Reassembler, ReassemblerStats, SYNC_1, SYNC_2};
pub use log::{CmdId, HighRateId, LogId, Message, MessageClass};
pub use stream::{StreamReader, StreamWriter};
