use super::rules::RuleContext;
use crate::workflows::advisory::domain::{ApplicantProfile, CapabilityFlag};

/// Identifies which table entry decided a disqualifier. Exposed to tests so
/// keyword binding stays a checkable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DisqualifierRuleKind {
    CriminalRecord,
    PriorViolation,
    UndesirableListing,
    ImminentPassportExpiry,
}

/// One entry of the disqualifier keyword table. `triggered` returns the
/// detail text when the exclusion applies, `None` otherwise. Unknown
/// disqualifier text never triggers; absence of data reads as "not known to
/// apply", the same as everywhere else in the profile.
pub(crate) struct DisqualifierRule {
    pub(crate) kind: DisqualifierRuleKind,
    matches: fn(&str) -> bool,
    triggered: fn(&ApplicantProfile, &RuleContext<'_>) -> Option<String>,
}

static DISQUALIFIER_TABLE: &[DisqualifierRule] = &[
    DisqualifierRule {
        kind: DisqualifierRuleKind::CriminalRecord,
        matches: |text| text.contains("criminal"),
        triggered: |profile, _| {
            profile
                .asserts(CapabilityFlag::CriminalRecord)
                .then(|| "applicant discloses a criminal record".to_string())
        },
    },
    DisqualifierRule {
        kind: DisqualifierRuleKind::PriorViolation,
        matches: |text| {
            text.contains("overstay") || text.contains("contraven") || text.contains("violation")
        },
        triggered: |profile, _| {
            if profile.asserts(CapabilityFlag::PreviousOverstay) {
                Some("applicant discloses a previous overstay".to_string())
            } else if profile.asserts(CapabilityFlag::PreviousImmigrationViolation) {
                Some("applicant discloses a previous contravention of visa conditions".to_string())
            } else {
                None
            }
        },
    },
    DisqualifierRule {
        kind: DisqualifierRuleKind::UndesirableListing,
        matches: |text| text.contains("undesirable") || text.contains("prohibited person"),
        triggered: |profile, _| {
            profile
                .asserts(CapabilityFlag::DeclaredUndesirable)
                .then(|| "applicant has been declared an undesirable person".to_string())
        },
    },
    DisqualifierRule {
        kind: DisqualifierRuleKind::ImminentPassportExpiry,
        matches: |text| text.contains("passport") && text.contains("expire"),
        triggered: |profile, ctx| {
            let window = ctx.policy.imminent_expiry_window_days;
            let expiry = profile.passport_expiry?;
            let remaining = (expiry - ctx.today).num_days();
            (remaining < window)
                .then(|| format!("passport expires in {remaining} day(s), inside the {window}-day window"))
        },
    },
];

/// Whether a disqualifier string applies to the profile. Returns the detail
/// text of the first matching table entry that triggers.
pub(crate) fn check_disqualifier(
    profile: &ApplicantProfile,
    disqualifier: &str,
    ctx: &RuleContext<'_>,
) -> Option<String> {
    let normalized = disqualifier.to_lowercase();

    let rule = DISQUALIFIER_TABLE
        .iter()
        .find(|rule| (rule.matches)(&normalized))?;

    let details = (rule.triggered)(profile, ctx);
    if details.is_some() {
        tracing::trace!(rule = ?rule.kind, "disqualifier triggered");
    }
    details
}

/// Which table entry would decide the given disqualifier text, if any.
#[cfg(test)]
pub(crate) fn matching_disqualifier_kind(disqualifier: &str) -> Option<DisqualifierRuleKind> {
    let normalized = disqualifier.to_lowercase();
    DISQUALIFIER_TABLE
        .iter()
        .find(|rule| (rule.matches)(&normalized))
        .map(|rule| rule.kind)
}
