use std::sync::Arc;

use tracing::{debug, info, warn};

use super::classifier::{ClassificationError, IntentClassifier};
use super::domain::{Lead, Offer, ScoreComponents, ScoredLead};
use super::rules;

/// Error raised while scoring a single lead; recorded on that lead only.
#[derive(Debug, thiserror::Error)]
pub enum LeadScoringError {
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

/// Combines the rule score with the classifier verdict for every lead, in input order.
#[derive(Debug)]
pub struct ScoringOrchestrator<C> {
    classifier: Arc<C>,
}

impl<C> Clone for ScoringOrchestrator<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<C> ScoringOrchestrator<C>
where
    C: IntentClassifier,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn score_components(
        &self,
        lead: &Lead,
        offer: &Offer,
    ) -> Result<ScoreComponents, LeadScoringError> {
        let breakdown = rules::score_lead(lead, offer);
        debug!(lead = %lead.name, rules = %breakdown.summary(), "rule score computed");
        let classification = self.classifier.classify(lead, offer)?;

        Ok(ScoreComponents {
            rule_score: breakdown.total,
            ai_label: classification.label,
            ai_reasoning: classification.reasoning,
            ai_points: classification.label.points(),
        })
    }

    pub fn score_lead(&self, lead: &Lead, offer: &Offer) -> ScoredLead {
        match self.score_components(lead, offer) {
            Ok(components) => {
                debug!(
                    lead = %lead.name,
                    rule_score = components.rule_score,
                    ai_label = %components.ai_label,
                    "lead scored"
                );
                ScoredLead::from_components(lead, components)
            }
            Err(err) => {
                warn!(lead = %lead.name, error = %err, "lead scoring failed");
                ScoredLead::failed(lead, err)
            }
        }
    }

    /// Scores leads one after another; one failure never stops the run.
    pub fn run(&self, offer: &Offer, leads: &[Lead]) -> Vec<ScoredLead> {
        info!(offer = %offer.name, leads = leads.len(), "scoring run started");
        let results: Vec<ScoredLead> = leads
            .iter()
            .map(|lead| self.score_lead(lead, offer))
            .collect();
        info!(scored = results.len(), "scoring run finished");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::lead_scoring::classifier::{Classification, ClassifierAdapter};
    use crate::workflows::lead_scoring::domain::IntentLabel;

    /// Fixed verdict, or an internal error for leads whose name starts with "boom".
    struct ScriptedClassifier(IntentLabel);

    impl IntentClassifier for ScriptedClassifier {
        fn classify(
            &self,
            lead: &Lead,
            _offer: &Offer,
        ) -> Result<Classification, ClassificationError> {
            if lead.name.starts_with("boom") {
                return Err(ClassificationError::Unavailable("model crashed".into()));
            }
            Ok(Classification::new(self.0, format!("scripted {}", self.0)))
        }
    }

    fn offer() -> Offer {
        Offer {
            name: "AI Outreach Automation".into(),
            value_props: vec!["24/7 outreach".into()],
            ideal_use_cases: vec!["B2B SaaS mid-market".into()],
        }
    }

    fn lead(name: &str, role: &str, industry: &str) -> Lead {
        Lead {
            name: name.into(),
            role: role.into(),
            company: "TestCorp".into(),
            industry: industry.into(),
            location: "Chicago".into(),
            linkedin_bio: "Works at TestCorp".into(),
        }
    }

    #[test]
    fn final_score_adds_rule_and_ai_points() {
        let orchestrator = ScoringOrchestrator::new(Arc::new(ScriptedClassifier(IntentLabel::High)));
        let scored = orchestrator.score_lead(&lead("Ava", "CEO", "SaaS"), &offer());
        assert_eq!(scored.score, 100);
        assert_eq!(scored.intent, IntentLabel::High);
        assert_eq!(scored.reasoning, "scripted High");

        let orchestrator = ScoringOrchestrator::new(Arc::new(ScriptedClassifier(IntentLabel::Low)));
        let scored = orchestrator.score_lead(&lead("Bob", "Intern", "Retail"), &offer());
        assert_eq!(scored.score, 20);
        assert_eq!(scored.intent, IntentLabel::Low);
    }

    #[test]
    fn boundary_scores_land_in_expected_tiers() {
        // 30 rule points + Medium (30) = 60; 40 rule points + Medium = 70.
        let orchestrator = ScoringOrchestrator::new(Arc::new(ScriptedClassifier(IntentLabel::Medium)));
        let medium = orchestrator.score_lead(&lead("Jane", "Marketing Manager", "Technology"), &offer());
        assert_eq!((medium.score, medium.intent), (60, IntentLabel::Medium));

        let mut incomplete = lead("Alice", "Head of Growth", "B2B SaaS");
        incomplete.location.clear();
        let high = orchestrator.score_lead(&incomplete, &offer());
        assert_eq!((high.score, high.intent), (70, IntentLabel::High));

        let low = ScoringOrchestrator::new(Arc::new(ScriptedClassifier(IntentLabel::Medium)))
            .score_lead(&lead("Bob", "Intern", "Retail"), &offer());
        assert_eq!((low.score, low.intent), (40, IntentLabel::Medium));
    }

    #[test]
    fn failing_lead_is_isolated_and_order_is_preserved() {
        let orchestrator = ScoringOrchestrator::new(Arc::new(ScriptedClassifier(IntentLabel::Medium)));
        let leads = vec![
            lead("first", "CEO", "SaaS"),
            lead("boom-second", "CTO", "SaaS"),
            lead("third", "Intern", "Retail"),
        ];

        let results = orchestrator.run(&offer(), &leads);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "first");
        assert_eq!(results[1].name, "boom-second");
        assert_eq!(results[1].role, "CTO");
        assert_eq!(results[1].intent, IntentLabel::Low);
        assert_eq!(results[1].score, 0);
        assert!(results[1].reasoning.starts_with("Error processing lead:"));
        assert!(results[1].reasoning.contains("model crashed"));
        assert_eq!(results[2].name, "third");
        assert_eq!(results[2].score, 40);
    }

    #[test]
    fn heuristic_adapter_scores_the_sample_lead() {
        let orchestrator = ScoringOrchestrator::new(Arc::new(ClassifierAdapter::default()));
        let sample = Lead {
            name: "Ava Patel".into(),
            role: "Head of Growth".into(),
            company: "FlowMetrics".into(),
            industry: "SaaS".into(),
            location: "Bengaluru, India".into(),
            linkedin_bio: "Growth leader at FlowMetrics. Loves scaling SDR teams.".into(),
        };
        let components = orchestrator
            .score_components(&sample, &offer())
            .expect("heuristic never fails");
        assert_eq!(components.rule_score, 50);
        assert_eq!(components.ai_label, IntentLabel::High);
        assert_eq!(components.ai_points, 50);
        assert_eq!(components.final_score(), 100);
    }

    #[test]
    fn empty_lead_list_yields_no_results() {
        let orchestrator = ScoringOrchestrator::new(Arc::new(ClassifierAdapter::default()));
        assert!(orchestrator.run(&offer(), &[]).is_empty());
    }
}
