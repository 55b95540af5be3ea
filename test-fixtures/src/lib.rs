//! Test fixture loader and builders shared by the Insight crates.
//!
//! Provides typed loading of the JSON corpora under `corpora/`, terse
//! quote, finding and theme builders, and scripted text generators for narrative
//! tests.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use insight_core::errors::GenerationError;
use insight_core::models::{
    AppliedThresholds, ClusterKey, DealOutcome, EvidenceBundle, FindingCategory, GateRecord,
    Polarity, PriorityTier, StakeholderRole, StrengthTier, ThemeStatus, Verdict,
};
use insight_core::traits::ITextGenerator;
use insight_core::{Finding, GenerationId, Quote, Sentiment, Theme};
use serde::de::DeserializeOwned;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Load a quote corpus from `corpora/<name>.json`.
pub fn load_corpus(name: &str) -> Vec<Quote> {
    load_fixture(&format!("corpora/{name}.json"))
}

// ---------------------------------------------------------------------------
// Quote builder
// ---------------------------------------------------------------------------

/// Builder for test quotes with sensible defaults: a relevant (4), negative
/// pricing quote from "Acme" on a lost deal.
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
    quote: Quote,
}

impl QuoteBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            quote: Quote {
                id: id.to_string(),
                text: format!("Renewal pricing was a problem for the team ({id})"),
                company: "Acme".to_string(),
                interviewee: format!("interviewee-{id}"),
                stakeholder_role: StakeholderRole::Unknown,
                deal_outcome: DealOutcome::Lost,
                criterion: "pricing".to_string(),
                secondary_criterion: None,
                tertiary_criterion: None,
                relevance: 4,
                sentiment: Sentiment::Negative,
                criterion_relevance: BTreeMap::new(),
                subject: None,
            },
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.quote.text = text.to_string();
        self
    }

    pub fn company(mut self, company: &str) -> Self {
        self.quote.company = company.to_string();
        self
    }

    pub fn interviewee(mut self, interviewee: &str) -> Self {
        self.quote.interviewee = interviewee.to_string();
        self
    }

    pub fn criterion(mut self, criterion: &str) -> Self {
        self.quote.criterion = criterion.to_string();
        self
    }

    pub fn secondary(mut self, criterion: &str) -> Self {
        self.quote.secondary_criterion = Some(criterion.to_string());
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.quote.subject = Some(subject.to_string());
        self
    }

    pub fn sentiment(mut self, sentiment: Sentiment) -> Self {
        self.quote.sentiment = sentiment;
        self
    }

    pub fn relevance(mut self, relevance: u8) -> Self {
        self.quote.relevance = relevance;
        self
    }

    pub fn criterion_relevance(mut self, criterion: &str, relevance: u8) -> Self {
        self.quote
            .criterion_relevance
            .insert(criterion.to_string(), relevance);
        self
    }

    pub fn role(mut self, role: StakeholderRole) -> Self {
        self.quote.stakeholder_role = role;
        self
    }

    pub fn deal(mut self, outcome: DealOutcome) -> Self {
        self.quote.deal_outcome = outcome;
        self
    }

    pub fn build(self) -> Quote {
        self.quote
    }
}

// ---------------------------------------------------------------------------
// Finding builder
// ---------------------------------------------------------------------------

/// Builder for already-validated findings: a passed, standard-priority
/// pricing barrier backed by one "Acme" quote `{id}-q1`.
#[derive(Debug, Clone)]
pub struct FindingBuilder {
    finding: Finding,
}

impl FindingBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            finding: Finding {
                id: id.to_string(),
                generation: GenerationId::from("gen-1"),
                cluster_key: ClusterKey::new(format!("cl-{id}")),
                criterion: "pricing".to_string(),
                category: FindingCategory::Barrier,
                polarity: Polarity::Weakness,
                quote_ids: BTreeSet::from([format!("{id}-q1")]),
                companies: BTreeSet::from(["Acme".to_string()]),
                representative_quote_ids: vec![format!("{id}-q1")],
                evidence_strength: 5.0,
                confidence: 5.0,
                mean_impact: 4.0,
                priority: PriorityTier::Standard,
                statement: format!("Buyers at 1 company report friction with pricing ({id})."),
                cross_criteria: false,
                competitive: None,
                gate_record: None,
                verdict: Verdict::Passed,
                created_at: chrono::Utc::now(),
                superseded_by: None,
            },
        }
    }

    pub fn criterion(mut self, criterion: &str) -> Self {
        self.finding.criterion = criterion.to_string();
        self
    }

    /// Replace the company set with the single `company`.
    pub fn company(mut self, company: &str) -> Self {
        self.finding.companies = BTreeSet::from([company.to_string()]);
        self
    }

    pub fn companies(mut self, companies: &[&str]) -> Self {
        self.finding.companies = companies.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Replace the supporting quotes; representatives follow.
    pub fn quotes(mut self, ids: &[&str]) -> Self {
        self.finding.quote_ids = ids.iter().map(|s| s.to_string()).collect();
        self.finding.representative_quote_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn category(mut self, category: FindingCategory) -> Self {
        self.finding.category = category;
        self
    }

    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.finding.polarity = polarity;
        self
    }

    pub fn verdict(mut self, verdict: Verdict) -> Self {
        self.finding.verdict = verdict;
        self
    }

    pub fn statement(mut self, statement: &str) -> Self {
        self.finding.statement = statement.to_string();
        self
    }

    pub fn build(self) -> Finding {
        self.finding
    }
}

// ---------------------------------------------------------------------------
// Theme builder
// ---------------------------------------------------------------------------

/// Builder for published themes: an emerging pricing barrier over "Acme"
/// and "Globex", findings `{id}-f1..3`, quality 5.
#[derive(Debug, Clone)]
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            theme: Theme {
                id: id.to_string(),
                generation: GenerationId::from("gen-1"),
                statement: Some(format!(
                    "Buyers at two companies describe pricing as a weakness ({id}). \
                     Finance teams pushed back on the quote."
                )),
                category: FindingCategory::Barrier,
                polarity: Polarity::Weakness,
                criteria: BTreeSet::from(["pricing".to_string()]),
                strength: StrengthTier::Emerging,
                companies: BTreeSet::from(["Acme".to_string(), "Globex".to_string()]),
                finding_ids: (1..=3).map(|n| format!("{id}-f{n}")).collect(),
                quote_ids: BTreeSet::from([format!("{id}-q1")]),
                competitive: false,
                competitive_signal: None,
                quality_score: 5.0,
                gate_record: GateRecord {
                    subject_id: id.to_string(),
                    results: Vec::new(),
                    thresholds: AppliedThresholds {
                        min_companies: 2,
                        min_quotes: 3,
                        min_impact: 3.0,
                        coherence: 0.7,
                        adjustments: Vec::new(),
                    },
                    passed: true,
                },
                verdict: Verdict::Passed,
                status: ThemeStatus::Published,
                generation_attempts: 1,
                supersedes: Vec::new(),
                created_at: chrono::Utc::now(),
            },
        }
    }

    pub fn statement(mut self, statement: &str) -> Self {
        self.theme.statement = Some(statement.to_string());
        self
    }

    pub fn quotes(mut self, ids: &[&str]) -> Self {
        self.theme.quote_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn companies(mut self, companies: &[&str]) -> Self {
        self.theme.companies = companies.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.theme.polarity = polarity;
        self
    }

    pub fn quality(mut self, quality: f64) -> Self {
        self.theme.quality_score = quality;
        self
    }

    pub fn status(mut self, status: ThemeStatus) -> Self {
        self.theme.status = status;
        self
    }

    pub fn verdict(mut self, verdict: Verdict) -> Self {
        self.theme.verdict = verdict;
        self
    }

    pub fn build(self) -> Theme {
        self.theme
    }
}

// ---------------------------------------------------------------------------
// Text generators
// ---------------------------------------------------------------------------

/// Replays a fixed script of responses. The last response repeats once the
/// script runs out.
#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    last: Mutex<Option<Result<String, GenerationError>>>,
    calls: AtomicUsize,
    bundles: Mutex<Vec<EvidenceBundle>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            bundles: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `text`.
    pub fn always(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Always fail with `error`.
    pub fn failing(error: GenerationError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every bundle received, in call order.
    pub fn bundles(&self) -> Vec<EvidenceBundle> {
        self.bundles.lock().unwrap().clone()
    }
}

impl ITextGenerator for ScriptedGenerator {
    fn generate(&self, bundle: &EvidenceBundle) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bundles.lock().unwrap().push(bundle.clone());
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = Some(next);
        }
        last.clone().unwrap_or_else(|| {
            Err(GenerationError::Unavailable {
                reason: "empty script".to_string(),
            })
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Writes a valid two-sentence statement from the bundle itself.
#[derive(Debug, Default)]
pub struct TemplateGenerator {
    calls: AtomicUsize,
}

impl TemplateGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ITextGenerator for TemplateGenerator {
    fn generate(&self, bundle: &EvidenceBundle) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let tone = match bundle.polarity {
            Polarity::Strength => "a consistent strength",
            Polarity::Weakness => "a consistent weakness",
            Polarity::MixedSignal => "a divided signal",
        };
        let criteria = bundle.criteria.join(" and ");
        Ok(format!(
            "Buyers at {} companies describe {} as {} in their evaluation. \
             The pattern appears in {} supporting quotes across those accounts.",
            bundle.company_count,
            criteria,
            tone,
            bundle.quotes.len()
        ))
    }

    fn name(&self) -> &str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_corpora_exist() {
        for name in ["pricing_weakness", "mixed_corpus", "small_corpus"] {
            assert!(
                fixture_exists(&format!("corpora/{name}.json")),
                "Missing corpus: {name}"
            );
        }
    }

    #[test]
    fn corpora_parse_as_quotes() {
        let quotes = load_corpus("mixed_corpus");
        assert!(!quotes.is_empty());
        assert!(quotes.iter().all(|q| !q.id.is_empty()));
    }

    #[test]
    fn builder_defaults_are_relevant() {
        let q = QuoteBuilder::new("q1").build();
        assert_eq!(q.relevance, 4);
        assert_eq!(q.criterion, "pricing");
        assert!(q.is_relevant());
    }

    #[test]
    fn scripted_generator_repeats_last_response() {
        let generator = ScriptedGenerator::new(vec![
            Err(GenerationError::Transient {
                reason: "timeout".into(),
            }),
            Ok("done".into()),
        ]);
        let bundle = sample_bundle();
        assert!(generator.generate(&bundle).is_err());
        assert_eq!(generator.generate(&bundle).unwrap(), "done");
        assert_eq!(generator.generate(&bundle).unwrap(), "done");
        assert_eq!(generator.calls(), 3);
    }

    #[test]
    fn finding_builder_defaults_are_validated() {
        let f = FindingBuilder::new("f1").company("Globex").build();
        assert!(f.is_validated());
        assert_eq!(f.companies.len(), 1);
        assert!(f.quote_ids.contains("f1-q1"));
    }

    fn sample_bundle() -> EvidenceBundle {
        use insight_core::models::NarrativeConstraints;
        EvidenceBundle {
            theme_id: "t1".into(),
            category: FindingCategory::Barrier,
            polarity: Polarity::Weakness,
            criteria: vec!["pricing".into()],
            company_count: 3,
            quotes: Vec::new(),
            finding_summaries: Vec::new(),
            constraints: NarrativeConstraints {
                required_sentences: 2,
                min_words: 12,
                max_words: 80,
                banned_phrases: Vec::new(),
                temperature: 0.0,
            },
            attempt: 1,
            previous_violations: Vec::new(),
        }
    }
}
