//! Byte-in / event-out telemetry receiver.
//!
//! [`Receiver`] is the surface the embedding application drives: it owns a
//! frame reassembler and the session-info context, and turns raw interface
//! bytes into [`TelemetryEvent`]s. It performs no I/O itself; serial port,
//! UDP socket or file replay stay with the caller.

use tracing::warn;

use strapdown_proto::{
    ErrorCode, Message, Reassembler, ReassemblerStats,
    log::session::SessionInfoPage,
};

use crate::session::{SessionInfoCtx, SessionProgress};

/// Events produced while consuming the telemetry stream.
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    /// A telemetry or command message was decoded.
    Message(Message),
    /// The paged session descriptor completed.
    SessionInfoReady(String),
    /// A structurally valid frame failed to decode and was dropped.
    ///
    /// The stream continues; a consumer that tolerates newer devices simply
    /// logs these.
    DecodeFailed {
        /// Frame class.
        class: u8,
        /// Frame id within the class.
        id: u16,
        /// Decoder verdict.
        code: ErrorCode,
    },
}

/// Counters kept by the receiver, on top of the reassembler's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiverStats {
    /// Messages decoded and surfaced.
    pub messages: u64,
    /// Frames dropped by their payload decoder.
    pub decode_failures: u64,
}

/// Sans-IO telemetry consumer.
///
/// Session-info pages are consumed internally and surface only as
/// [`TelemetryEvent::SessionInfoReady`] once the blob completes; the last
/// complete blob stays readable through [`Receiver::session_info`].
#[derive(Debug, Default)]
pub struct Receiver {
    reassembler: Reassembler,
    session: SessionInfoCtx,
    stats: ReceiverStats,
}

impl Receiver {
    /// Create an idle receiver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume newly received interface bytes and return the events they
    /// complete, in wire order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<TelemetryEvent> {
        self.reassembler.feed(bytes);

        let mut events = Vec::new();
        while let Some(frame) = self.reassembler.next_frame() {
            match Message::from_frame(&frame) {
                Ok(Message::SessionInfo(page)) => {
                    self.stats.messages += 1;
                    if let Some(event) = self.process_session_page(&page) {
                        events.push(event);
                    }
                }
                Ok(message) => {
                    self.stats.messages += 1;
                    events.push(TelemetryEvent::Message(message));
                }
                Err(code) => {
                    warn!(class = frame.class, id = frame.id, %code, "dropping frame");
                    self.stats.decode_failures += 1;
                    events.push(TelemetryEvent::DecodeFailed {
                        class: frame.class,
                        id: frame.id,
                        code,
                    });
                }
            }
        }
        events
    }

    fn process_session_page(&mut self, page: &SessionInfoPage) -> Option<TelemetryEvent> {
        match self.session.process(page.page_index, page.nr_pages, &page.data) {
            Ok(SessionProgress::Complete) => self
                .session
                .string()
                .map(|blob| TelemetryEvent::SessionInfoReady(blob.to_owned())),
            Ok(SessionProgress::Pending) => None,
            Err(code) => Some(TelemetryEvent::DecodeFailed {
                class: strapdown_proto::MessageClass::LogEcom0.to_u8(),
                id: strapdown_proto::LogId::SessionInfo.to_u16(),
                code,
            }),
        }
    }

    /// The last completed session descriptor, if any.
    #[must_use]
    pub fn session_info(&self) -> Option<&str> {
        self.session.string()
    }

    /// Receiver counters.
    #[must_use]
    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }

    /// Reassembler counters (frames, CRC errors, discarded bytes).
    #[must_use]
    pub fn link_stats(&self) -> ReassemblerStats {
        self.reassembler.stats()
    }
}
