#![no_main]

use libfuzzer_sys::fuzz_target;
use tessel_grid::{WorkspaceGridState, invariant_report, validate};

fuzz_target!(|data: &[u8]| {
    // Untrusted layouts must never panic the checker.
    let Ok(state) = serde_json::from_slice::<WorkspaceGridState>(data) else {
        return;
    };

    let report = invariant_report(&state);
    assert_eq!(
        validate(&state).is_ok(),
        !report.has_errors(),
        "validate and invariant_report disagree: {:?}",
        report.issues
    );

    let _ = state.resizers();
});
