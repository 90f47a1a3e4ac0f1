//! Fuzz target for the satellites-in-view decoder.
//!
//! The satellite group is the only variable-size composite in the
//! catalogue: nested count-bounded loops plus packed bit-field validation
//! over attacker-controlled data. Dispatching an arbitrary payload under
//! the two satellite ids drives `SatGroupLog::read` directly, without a
//! framing layer in front that would filter almost every input.
//!
//! An arbitrary payload must either fail with a structured error code, or
//! decode into a group that survives a write/read round trip unchanged.

#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use strapdown_proto::{LogId, Message, MessageClass};

fuzz_target!(|data: &[u8]| {
    if data.len() > strapdown_proto::MAX_PAYLOAD_SIZE {
        return;
    }
    let payload = Bytes::copy_from_slice(data);
    let class = MessageClass::LogEcom0.to_u8();
    for id in [LogId::Gnss1Sat.to_u16(), LogId::Gnss2Sat.to_u16()] {
        if let Ok(message) = Message::parse(class, id, &payload) {
            // Whatever passed the limit and enum checks must re-encode and
            // re-decode to the same group.
            let frame = message.to_frame().expect("decoded group must encode");
            let back = Message::from_frame(&frame).expect("written group must decode");
            assert_eq!(back, message);
        }
    }
});
