#![no_main]

use depscribe_go_handler::handler::glide;
use depscribe_go_handler::loader::parse_str;
use depscribe_go_handler::Format;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(tree) = parse_str(content, Format::Yaml, "fuzz/glide.lock") {
            let _ = glide::read_lock(&tree, "fuzz/glide.lock");
            let _ = glide::read_manifest(&tree, "fuzz/glide.yaml");
        }
    }
});
