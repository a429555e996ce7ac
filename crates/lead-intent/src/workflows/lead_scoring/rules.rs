use super::domain::{Lead, Offer};

const DECISION_MAKER_KEYWORDS: [&str; 11] = [
    "ceo",
    "cto",
    "cfo",
    "coo",
    "chief",
    "founder",
    "president",
    "head of",
    "vp",
    "vice president",
    "director",
];
const INFLUENCER_KEYWORDS: [&str; 5] = ["manager", "lead", "senior", "principal", "team lead"];
const ADJACENT_INDUSTRY_KEYWORDS: [&str; 5] = ["tech", "technology", "software", "b2b", "saas"];

pub const MAX_RULE_SCORE: u8 = 50;

/// Which deterministic check produced a slice of the rule score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFactor {
    RoleRelevance,
    IndustryMatch,
    DataCompleteness,
}

/// Discrete contribution to a rule score, logged with each scored lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleComponent {
    pub factor: RuleFactor,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBreakdown {
    pub components: Vec<RuleComponent>,
    pub total: u8,
}

impl RuleFactor {
    pub fn label(self) -> &'static str {
        match self {
            RuleFactor::RoleRelevance => "role",
            RuleFactor::IndustryMatch => "industry",
            RuleFactor::DataCompleteness => "completeness",
        }
    }
}

impl RuleBreakdown {
    /// One-line audit trail, e.g. `role +20 (decision-maker role (ceo)); ...`.
    pub fn summary(&self) -> String {
        self.components
            .iter()
            .map(|c| format!("{} +{} ({})", c.factor.label(), c.points, c.notes))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Rule score in `0..=50` for a lead against an offer.
pub fn rule_score(lead: &Lead, offer: &Offer) -> u8 {
    score_lead(lead, offer).total
}

pub fn score_lead(lead: &Lead, offer: &Offer) -> RuleBreakdown {
    let components = vec![
        role_relevance(&lead.role),
        industry_match(&lead.industry, &offer.ideal_use_cases),
        data_completeness(lead),
    ];
    let sum: u16 = components.iter().map(|c| u16::from(c.points)).sum();
    let total = sum.min(u16::from(MAX_RULE_SCORE)) as u8;

    RuleBreakdown { components, total }
}

fn role_relevance(role: &str) -> RuleComponent {
    let role = role.to_lowercase();
    // Decision-maker keywords win even when an influencer keyword is also present.
    let (points, notes) = if let Some(keyword) = first_contained(&role, &DECISION_MAKER_KEYWORDS) {
        (20, format!("decision-maker role ({keyword})"))
    } else if let Some(keyword) = first_contained(&role, &INFLUENCER_KEYWORDS) {
        (10, format!("influencer role ({keyword})"))
    } else {
        (0, "no buying role detected".to_string())
    };

    RuleComponent {
        factor: RuleFactor::RoleRelevance,
        points,
        notes,
    }
}

fn industry_match(industry: &str, ideal_use_cases: &[String]) -> RuleComponent {
    let industry = industry.to_lowercase();
    let icp_keywords: Vec<String> = ideal_use_cases
        .iter()
        .flat_map(|use_case| {
            use_case
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    let exact = icp_keywords
        .iter()
        .find(|keyword| industry.contains(keyword.as_str()));

    let (points, notes) = if let Some(keyword) = exact {
        (20, format!("industry matches ICP keyword '{keyword}'"))
    } else if let Some(keyword) = first_contained(&industry, &ADJACENT_INDUSTRY_KEYWORDS) {
        (10, format!("adjacent industry ({keyword})"))
    } else {
        (0, "industry outside ICP".to_string())
    };

    RuleComponent {
        factor: RuleFactor::IndustryMatch,
        points,
        notes,
    }
}

fn data_completeness(lead: &Lead) -> RuleComponent {
    let (points, notes) = if lead.is_complete() {
        (10, "all profile fields present")
    } else {
        (0, "profile incomplete")
    };

    RuleComponent {
        factor: RuleFactor::DataCompleteness,
        points,
        notes: notes.to_string(),
    }
}

fn first_contained<'a>(haystack: &str, keywords: &[&'a str]) -> Option<&'a str> {
    keywords
        .iter()
        .copied()
        .find(|keyword| haystack.contains(keyword))
}
