#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tree) = rpnex::parse(s) {
            let from_tree = rpnex::eval_tree(&tree).map_err(|e| e.kind());
            let direct = rpnex::evaluate(s).map_err(|e| e.kind());
            match (from_tree, direct) {
                (Ok(t), Ok(d)) => assert!(t.to_bits() == d.to_bits() || (t.is_nan() && d.is_nan())),
                (t, d) => assert_eq!(t.err(), d.err()),
            }
        }
    }
});
