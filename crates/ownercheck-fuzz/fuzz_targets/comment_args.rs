#![no_main]
use libfuzzer_sys::fuzz_target;
use ownercheck_core::CommentArgs;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(args) = CommentArgs::decode(s) {
            // Every decoded char came from exactly two input chars
            let decoded: usize = args.iter().map(|a| a.chars().count()).sum();
            assert!(decoded * 2 <= s.chars().count());
        }
    }
});
