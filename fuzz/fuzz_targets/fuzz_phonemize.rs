#![no_main]

use chipvoice_synth::phonemize;
use chipvoice_synth::unit::MORAIC_NASAL;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let units = phonemize(&text);
    for unit in &units {
        assert!(unit.duration_ms > 0 || unit.onset_str() == MORAIC_NASAL);
        assert!(!unit.is_geminate);
    }
});
