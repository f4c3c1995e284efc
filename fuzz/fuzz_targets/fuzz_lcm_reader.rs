#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must fail gracefully, never panic
    let _ = lcpeak::lcm::LcmReader::new().read(data);

    // The validator runs every check on whatever part of the input it can
    // parse; it reports problems instead of returning errors
    let report = lcpeak::validator::validate_lcm(data, "fuzz.lcm");
    let _ = report.is_valid();
});
