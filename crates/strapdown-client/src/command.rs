//! Request/response command exchange.
//!
//! Configuration commands ride the same framing as telemetry: the host
//! sends a command frame and the device answers with an acknowledge that
//! echoes the command identity and carries an outcome code. This state
//! machine tracks one in-flight command at a time.
//!
//! It is pure (no I/O, no clock): the caller transmits the frames, feeds
//! received frames back in, and drives time through
//! [`CommandExchange::poll_timeout`]. Generic over the instant type so
//! deterministic tests can use a virtual clock.

use std::{
    ops::Sub,
    time::{Duration, Instant},
};

use strapdown_proto::{
    ErrorCode, Frame, Message,
    log::ack::AckLog,
};

/// Default time allowed for the device to acknowledge a command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(500);

/// Outcome events produced by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEvent {
    /// The device acknowledged the in-flight command.
    Acked {
        /// Class of the acknowledged command.
        class: u8,
        /// Id of the acknowledged command.
        id: u16,
        /// Device outcome; [`ErrorCode::NoError`] on acceptance.
        code: ErrorCode,
    },
    /// The in-flight command was superseded before completion.
    Cancelled {
        /// Class of the cancelled command.
        class: u8,
        /// Id of the cancelled command.
        id: u16,
    },
    /// No acknowledge arrived within the timeout.
    TimedOut {
        /// Class of the expired command.
        class: u8,
        /// Id of the expired command.
        id: u16,
    },
}

#[derive(Debug, Clone, Copy)]
struct Pending<I> {
    class: u8,
    id: u16,
    sent_at: I,
}

/// One-command-at-a-time request/response tracker.
#[derive(Debug, Clone)]
pub struct CommandExchange<I = Instant>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    timeout: Duration,
    pending: Option<Pending<I>>,
}

impl<I> CommandExchange<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create an idle exchange with the given acknowledge timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, pending: None }
    }

    /// True while a command is awaiting its acknowledge.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record that `frame` was transmitted at `now` and arm the timeout.
    ///
    /// Tracking a new command while one is still in flight supersedes the
    /// old one and reports it as [`CommandEvent::Cancelled`].
    pub fn track(&mut self, frame: &Frame, now: I) -> Option<CommandEvent> {
        let cancelled = self.pending.take().map(|old| CommandEvent::Cancelled {
            class: old.class,
            id: old.id,
        });
        self.pending = Some(Pending { class: frame.class, id: frame.id, sent_at: now });
        cancelled
    }

    /// Offer a received frame to the exchange.
    ///
    /// Consumes a matching acknowledge and reports the device outcome;
    /// anything else (telemetry, an acknowledge for a command this exchange
    /// is not tracking) is ignored and left to the telemetry path.
    pub fn on_frame(&mut self, frame: &Frame) -> Option<CommandEvent> {
        let pending = self.pending?;
        let Ok(Message::Ack(ack)) = Message::from_frame(frame) else {
            return None;
        };
        if !acks(&ack, pending.class, pending.id) {
            return None;
        }
        self.pending = None;
        Some(CommandEvent::Acked {
            class: pending.class,
            id: pending.id,
            code: ack.error_code().unwrap_or(ErrorCode::Error),
        })
    }

    /// Expire the in-flight command once `now` passes its deadline.
    pub fn poll_timeout(&mut self, now: I) -> Option<CommandEvent> {
        let pending = self.pending?;
        if now - pending.sent_at < self.timeout {
            return None;
        }
        self.pending = None;
        Some(CommandEvent::TimedOut { class: pending.class, id: pending.id })
    }
}

impl Default for CommandExchange {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

fn acks(ack: &AckLog, class: u8, id: u16) -> bool {
    ack.acked_class == class && ack.acked_id == id
}
