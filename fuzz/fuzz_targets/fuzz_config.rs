#![no_main]

use chipvoice_spec::VoiceConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(parsed) = VoiceConfig::from_json_str(text) {
            assert_eq!(parsed.config.clone().normalized(), parsed.config);
        }
    }
});
