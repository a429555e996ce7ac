use super::Classification;
use crate::workflows::lead_scoring::domain::{IntentLabel, Lead, Offer};

const SENIOR_ROLE_KEYWORDS: [&str; 7] = ["ceo", "founder", "cto", "cxo", "head", "vp", "director"];
const MID_LEVEL_ROLE_KEYWORDS: [&str; 3] = ["manager", "lead", "senior"];
const OUTREACH_BIO_KEYWORDS: [&str; 5] = ["growth", "sales", "revops", "outreach", "marketing"];

/// Deterministic keyword classifier used when no remote model is configured or reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn classify(&self, lead: &Lead, offer: &Offer) -> Classification {
        let role = lead.role.to_lowercase();
        let industry = lead.industry.to_lowercase();
        let bio = lead.linkedin_bio.to_lowercase();
        let icp_text = offer.ideal_use_cases.join(" ").to_lowercase();

        if contains_any(&role, &SENIOR_ROLE_KEYWORDS) {
            let reasoning = if industry.contains("saas")
                || icp_text.contains("saas")
                || industry.contains("software")
            {
                "Decision-maker at an organization matching ICP (SaaS/software)."
            } else {
                "Senior decision-maker role detected."
            };
            return Classification::new(IntentLabel::High, reasoning);
        }

        if contains_any(&role, &MID_LEVEL_ROLE_KEYWORDS) {
            let reasoning = if industry.contains("saas")
                || industry.contains("b2b")
                || industry.contains("software")
                || icp_text.contains("saas")
            {
                "Mid-level role in relevant industry; may influence purchasing decisions."
            } else {
                "Relevant role, but not a confirmed decision-maker."
            };
            return Classification::new(IntentLabel::Medium, reasoning);
        }

        if contains_any(&bio, &OUTREACH_BIO_KEYWORDS) {
            return Classification::new(
                IntentLabel::Medium,
                "Role or bio mentions growth/marketing\u{2014}may be receptive to outreach.",
            );
        }

        Classification::new(IntentLabel::Low, "No strong signals in role, industry or bio.")
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
