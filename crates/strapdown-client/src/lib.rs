//! Sans-IO client for strapdown INS devices.
//!
//! Sits on top of [`strapdown_proto`] and adds the stateful pieces a host
//! application needs: the byte-in / event-out telemetry [`Receiver`], the
//! paged session-descriptor reassembler, and the request/response
//! [`CommandExchange`] for the configuration channel.
//!
//! The crate follows the action pattern: nothing here performs I/O or reads
//! a clock. The caller owns the serial port, socket or capture file, feeds
//! received bytes in, transmits the frames it is handed back, and drives
//! time through explicit instants. This keeps every state machine
//! deterministic under test.

mod command;
mod receiver;
mod session;

pub use command::{CommandEvent, CommandExchange, DEFAULT_COMMAND_TIMEOUT};
pub use receiver::{Receiver, ReceiverStats, TelemetryEvent};
pub use session::{SESSION_INFO_CAPACITY, SessionInfoCtx, SessionProgress};
pub use strapdown_proto as proto;
