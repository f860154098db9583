#![no_main]

use datscan::defaults::defaults_for;
use datscan::parser::{CancelToken, DatFileParser};
use datscan::segments::{find_segments, MatchCriteria};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed input must come back as an error, never a panic
    let parser = DatFileParser::default();
    let Ok(set) = parser.parse_bytes(data, "fuzz.dat", &CancelToken::new()) else {
        return;
    };

    let Some(defaults) = defaults_for(set.measurement_type(), set.columns()) else {
        return;
    };

    for criteria in [
        MatchCriteria::auto_detect(&defaults.filter_column, defaults.default_tolerance, 2),
        MatchCriteria::fixed(&defaults.filter_column, 0.0, defaults.default_tolerance, 1),
    ] {
        let _ = find_segments(&set, &criteria);
    }
});
