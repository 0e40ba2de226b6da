#![no_main]
use libfuzzer_sys::fuzz_target;

use descent_json::{parse_with_max_depth, scan, TokenType};

fuzz_target!(|data: &[u8]| {
    // The fuzzer gives us raw bytes; only UTF-8 can reach the scanner.
    if let Ok(s) = std::str::from_utf8(data) {
        // Looking for panics and stack overflows, so results are mostly dropped.
        if let Ok(tokens) = scan(s) {
            assert_eq!(tokens.last().map(|t| &t.kind), Some(&TokenType::Eof));
        }
        let _ = parse_with_max_depth(s, 64);
    }
});
