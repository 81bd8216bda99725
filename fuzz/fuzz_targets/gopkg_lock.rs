#![no_main]

use depscribe_go_handler::loader::parse_str;
use depscribe_go_handler::{Format, reconcile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(tree) = parse_str(content, Format::Toml, "fuzz/Gopkg.lock") {
            let _ = reconcile(&tree, "fuzz/Gopkg.lock");
        }
    }
});
