#![no_main]

use libfuzzer_sys::fuzz_target;

use halfconv::{encode_f64, encode_f64_bytes};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as native doubles: the raw and typed paths must agree,
    // and a trailing partial element must be ignored without panicking
    let doubles: Vec<f64> = data
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0_u8; 8];
            bytes.copy_from_slice(chunk);
            f64::from_ne_bytes(bytes)
        })
        .collect();

    let mut from_bytes = vec![0_u16; doubles.len() + 1];
    let mut from_typed = vec![0_u16; doubles.len() + 1];
    encode_f64_bytes(&mut from_bytes, data).unwrap();
    encode_f64(&mut from_typed, &doubles).unwrap();
    assert_eq!(from_bytes, from_typed);
});
