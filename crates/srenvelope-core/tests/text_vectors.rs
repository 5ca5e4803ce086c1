//! Text framing vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use srenvelope_core::envelope::text::{unwrap, DEFAULT_FRAMING_OFFSET};

mod vector_loader;
use vector_loader::load;

#[test]
fn text_vectors() {
    let files = [
        "text_device_event.json",
        "text_payee_event.json",
        "text_suspense_event.json",
        "text_offset_zero.json",
        "text_too_short.json",
        "text_bad_base64.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();
        let text = std::str::from_utf8(&raw).unwrap();
        let offset = v.offset.unwrap_or(DEFAULT_FRAMING_OFFSET);
        let res = unwrap(text, offset);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let out = res.expect("expected ok unwrap");
        let ex = v.expect.expect("missing expect block");

        if let Some(s) = ex.get("utf8") {
            assert_eq!(String::from_utf8(out).unwrap(), s.as_str().unwrap(), "vector={}", v.description);
        } else {
            assert_eq!(hex::encode(out), ex["hex"].as_str().unwrap(), "vector={}", v.description);
        }
    }
}
