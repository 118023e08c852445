//! Fuzz target: `CoreConfig::from_bytes` / `CoreConfig::from_json`
//!
//! Feeds arbitrary bytes to both loaders, as a corrupted storage blob or a
//! hostile provisioning document would.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Anything either loader accepts passes validation
//! - An accepted blob re-serializes to an equal config
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use chanval::config::CoreConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = CoreConfig::from_bytes(data) {
        assert!(config.validate().is_ok());

        let mut buf = [0u8; 32];
        let bytes = config.to_bytes(&mut buf).expect("valid config must serialize");
        let again = CoreConfig::from_bytes(bytes).expect("round-trip must parse");
        assert_eq!(config, again);
    }

    if let Ok(json) = core::str::from_utf8(data) {
        if let Ok(config) = CoreConfig::from_json(json) {
            assert!(config.validate().is_ok());
        }
    }
});
