//! Negative-space fuzzer for the message catalog.
//!
//! Feeds arbitrary (type id, body) pairs to the decoder. The decoder must
//! never panic: a known type either decodes or returns a structured
//! error, an unknown type always decodes to the generic fallback. When a
//! body decodes, re-encoding and decoding again must reproduce the same
//! message — the round-trip holds for whatever subset of the input the
//! catalog recognized.

#![no_main]

use ctilink_proto::Message;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let type_id = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    let body = &data[4..];

    let Ok(msg) = Message::decode(type_id, body) else {
        // Structured decode failure; never a panic.
        return;
    };

    assert_eq!(msg.type_id(), type_id);

    let reencoded = msg.encode_body();
    let again = Message::decode(type_id, &reencoded)
        .expect("re-encoded body must decode");
    assert_eq!(again, msg, "decode(encode(m)) must equal m");
});
