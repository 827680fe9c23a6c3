#![no_main]

use libfuzzer_sys::fuzz_target;

use fwsim_core::{shortest_paths, Distance, DistanceMatrix};

fuzz_target!(|data: &[u8]| {
    let Ok(rows) = serde_json::from_slice::<Vec<Vec<Distance>>>(data) else {
        return;
    };
    let Ok(matrix) = DistanceMatrix::from_rows(rows) else {
        return;
    };
    // Rejected matrices are fine; accepted ones must run to completion.
    if let Ok(result) = shortest_paths(&matrix) {
        assert_eq!(result.len(), matrix.len());
    }
});
