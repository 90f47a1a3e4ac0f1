//! Fuzz target for the full byte-in / event-out pipeline.
//!
//! Drives the client receiver with arbitrary bytes: reassembly, dispatch
//! and session-info paging all run. Nothing in the pipeline may panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use strapdown_client::Receiver;

fuzz_target!(|data: &[u8]| {
    let mut rx = Receiver::new();
    for piece in data.chunks(17) {
        let _ = rx.feed(piece);
    }
    let _ = rx.session_info();
});
