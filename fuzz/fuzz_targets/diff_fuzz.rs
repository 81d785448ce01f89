#![no_main]
use libfuzzer_sys::fuzz_target;
use pkgdiff::diff;
use pkgdiff::lines::tokenize;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the split point between the two texts.
    let split = data[0] as usize % data.len();
    let payload = &data[1..];
    let split = split.min(payload.len());
    let left = String::from_utf8_lossy(&payload[..split]);
    let right = String::from_utf8_lossy(&payload[split..]);

    let a = tokenize(&left);
    let b = tokenize(&right);
    let script = diff::diff(&a, &b).unwrap();

    if script.is_empty() {
        assert_eq!(a, b);
        return;
    }
    assert_eq!(script.left().copied().collect::<Vec<_>>(), a);
    assert_eq!(script.right().copied().collect::<Vec<_>>(), b);
    assert!(script.distance() <= a.len() + b.len());
});
