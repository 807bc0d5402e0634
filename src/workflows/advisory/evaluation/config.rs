use serde::{Deserialize, Serialize};

/// Policy dials behind the eligibility engine.
///
/// The 60% threshold is fixed departmental policy, not a derived value;
/// the struct exists so tests and deployments can pin every dial
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryPolicy {
    /// Minimum eligibility score, in percent, before a category counts as
    /// a likely qualification.
    pub eligibility_threshold: u8,
    /// Days of remaining passport validity a requirement check expects.
    pub passport_validity_floor_days: i64,
    /// Remaining validity below which passport expiry becomes an absolute
    /// disqualifier.
    pub imminent_expiry_window_days: i64,
    /// Continuous work-visa years required for the residence-based
    /// permanent residence route.
    pub permanent_residence_tenure_years: u8,
    /// Cap on alternative pathways returned next to a recommendation.
    pub max_alternative_options: usize,
}

impl Default for AdvisoryPolicy {
    fn default() -> Self {
        Self {
            eligibility_threshold: 60,
            passport_validity_floor_days: 180,
            imminent_expiry_window_days: 30,
            permanent_residence_tenure_years: 5,
            max_alternative_options: 3,
        }
    }
}
