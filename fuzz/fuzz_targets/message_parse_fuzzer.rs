//! Fuzz target for the message dispatcher.
//!
//! Any `(class, id, payload)` triple must either decode into a message that
//! re-encodes without error, or fail with a structured error code. Panics
//! and aborts are bugs.

#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use strapdown_proto::Message;

#[derive(Debug, Arbitrary)]
struct Input {
    class: u8,
    id: u16,
    payload: Vec<u8>,
}

fuzz_target!(|input: Input| {
    if input.payload.len() > strapdown_proto::MAX_PAYLOAD_SIZE {
        return;
    }
    let payload = Bytes::from(input.payload);
    if let Ok(message) = Message::parse(input.class, input.id, &payload) {
        // Whatever decoded must encode back into a frame.
        let frame = message.to_frame().expect("decoded message must encode");
        assert_eq!(frame.class, input.class);
        assert_eq!(frame.id, input.id);
    }
});
