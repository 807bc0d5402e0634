use crate::workflows::advisory::catalog::VisaCategory;
use crate::workflows::advisory::domain::{Disqualification, RequirementOutcome, RiskFlag};

/// Appended to every piece of generated guidance.
pub(crate) const ADVISORY_DISCLAIMER: &str =
    "This is automated guidance only; the Department of Home Affairs makes all final decisions.";

/// Render the structured evaluation into advisory text.
///
/// Template logic only: the decision was already made by the rule tables.
pub(crate) fn generate(
    category: &VisaCategory,
    eligible: bool,
    score: u8,
    risk_flags: &[RiskFlag],
    disqualifications: &[Disqualification],
    unmet: &[RequirementOutcome],
) -> String {
    let mut text = String::new();

    if eligible {
        text.push_str(&format!(
            "You appear to qualify for the {} with an eligibility score of {}%.\n",
            category.name, score
        ));

        if !risk_flags.is_empty() {
            text.push_str("Outstanding items to resolve before applying:\n");
            for flag in risk_flags {
                text.push_str(&format!("- {}\n", flag.details));
            }
        }

        text.push_str(
            "Recommended next steps:\n\
             1. Gather the supporting documents on the category checklist.\n\
             2. Book an appointment at your nearest VFS Global centre.\n\
             3. Pay the prescribed fee and keep the receipt.\n\
             4. Submit the application and track its progress.\n",
        );
    } else {
        text.push_str(&format!(
            "You do not currently meet the published criteria for the {} (score {}%).\n",
            category.name, score
        ));

        if !disqualifications.is_empty() {
            text.push_str("Disqualifying factors:\n");
            for disqualification in disqualifications {
                text.push_str(&format!("- {}\n", disqualification.details));
            }
        }

        if !unmet.is_empty() {
            text.push_str("Unmet requirements:\n");
            for outcome in unmet {
                text.push_str(&format!(
                    "- [{}] {}: {}\n",
                    outcome.severity.label(),
                    outcome.requirement,
                    outcome.details
                ));
            }
        }

        text.push_str(
            "Consider consulting a registered immigration practitioner before applying.\n",
        );
    }

    text.push_str(&format!("Legal basis: {}.\n", category.legal_reference));
    text.push_str(ADVISORY_DISCLAIMER);
    text
}
