//! Data trial: correct the belief by typing `see`.

use super::outcome::{Feedback, TrialKind, TrialOutcome};

const ACCEPTED: [&str; 2] = ["see", "\"see\""];

/// Validates a typed belief. Passes iff the trimmed, lowercased input is
/// exactly `see` or `"see"`.
#[must_use]
pub fn validate(input: &str) -> TrialOutcome {
    let normalized = input.trim().to_lowercase();
    if ACCEPTED.contains(&normalized.as_str()) {
        TrialOutcome::pass(TrialKind::Data, Feedback::BeliefCorrected)
    } else {
        TrialOutcome::fail(TrialKind::Data, Some(Feedback::BeliefRejected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_inputs_pass() {
        for input in ["See", " see ", "\"see\"", "SEE", "\t\"See\"\n"] {
            let outcome = validate(input);
            assert!(outcome.passed, "expected {input:?} to pass");
            assert_eq!(outcome.feedback, Some(Feedback::BeliefCorrected));
        }
    }

    #[test]
    fn test_near_misses_fail() {
        for input in ["i see", "seeing", "", "  ", "'see'", "se e"] {
            let outcome = validate(input);
            assert!(!outcome.passed, "expected {input:?} to fail");
            assert_eq!(outcome.feedback_message(), "认知修正失败，请重新尝试");
        }
    }

    #[test]
    fn test_outcome_carries_data_beacon() {
        let outcome = validate("see");
        assert_eq!(outcome.beacon_id.as_str(), "DATA_BEACON");
    }
}
