//! Default values for every tunable threshold. Nothing outside this module
//! hard-codes a threshold; the engine always reads them from `InsightConfig`.

// Clustering
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.3;
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;
pub const DEFAULT_CROSS_CRITERIA: bool = true;
pub const DEFAULT_MIN_CROSS_CRITERIA_SPAN: usize = 2;

// Finding synthesis
pub const DEFAULT_MIN_QUOTE_RELEVANCE: u8 = 2;
pub const DEFAULT_MIN_FINDING_QUOTES: usize = 2;
pub const DEFAULT_MIN_FINDING_COMPANIES: usize = 1;
pub const DEFAULT_MIN_FINDING_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_PRIORITY_THRESHOLD: f64 = 1.5;
pub const DEFAULT_STANDARD_THRESHOLD: f64 = 0.8;
pub const DEFAULT_MAX_REPRESENTATIVE_QUOTES: usize = 4;
pub const DEFAULT_DIVERSITY_SATURATION: usize = 4;
pub const DEFAULT_EVIDENCE_DIVERSITY_WEIGHT: f64 = 0.5;
pub const DEFAULT_DIVERSITY_LINEAR_SHARE: f64 = 0.8;
pub const DEFAULT_EVIDENCE_SIZE_KNEE: f64 = 3.0;
pub const DEFAULT_STATEMENT_KEY_PHRASES: usize = 3;

// Confidence scoring weights
pub const DEFAULT_W_SALIENCE: f64 = 0.30;
pub const DEFAULT_W_SENTIMENT_STRENGTH: f64 = 0.20;
pub const DEFAULT_W_SPECIFICITY: f64 = 0.20;
pub const DEFAULT_W_BUSINESS_IMPACT: f64 = 0.15;
pub const DEFAULT_W_COMPETITIVE_DYNAMICS: f64 = 0.15;
pub const DEFAULT_SENTIMENT_POLAR: f64 = 1.0;
pub const DEFAULT_SENTIMENT_MIXED: f64 = 0.6;
pub const DEFAULT_SENTIMENT_NEUTRAL: f64 = 0.3;
pub const DEFAULT_ROLE_EXECUTIVE: f64 = 1.0;
pub const DEFAULT_ROLE_BUDGET_HOLDER: f64 = 1.0;
pub const DEFAULT_ROLE_EVALUATOR: f64 = 0.8;
pub const DEFAULT_ROLE_END_USER: f64 = 0.7;
pub const DEFAULT_ROLE_UNKNOWN: f64 = 0.6;
pub const DEFAULT_TIPPING_POINT_MULTIPLIER: f64 = 1.3;
pub const DEFAULT_DIFFERENTIATOR_MULTIPLIER: f64 = 1.2;
pub const DEFAULT_SPECIFICITY_WORDS: usize = 40;
pub const DEFAULT_DEAL_IMPACT_BONUS: f64 = 1.0;

// Quality gates
pub const DEFAULT_GATE_MIN_COMPANIES: usize = 2;
pub const DEFAULT_GATE_MIN_COMPANIES_FLOOR: usize = 1;
pub const DEFAULT_GATE_MIN_QUOTES: usize = 3;
pub const DEFAULT_GATE_MIN_QUOTES_FLOOR: usize = 2;
pub const DEFAULT_GATE_MIN_IMPACT: f64 = 3.0;
pub const DEFAULT_GATE_IMPACT_FLOOR: f64 = 2.5;
pub const DEFAULT_GATE_IMPACT_CEILING: f64 = 3.5;
pub const DEFAULT_GATE_COHERENCE: f64 = 0.7;
pub const DEFAULT_SMALL_CORPUS_QUOTES: usize = 50;
pub const DEFAULT_LOW_QUALITY_MEAN_RELEVANCE: f64 = 3.0;
pub const DEFAULT_HIGH_QUALITY_MEAN_RELEVANCE: f64 = 4.0;
pub const DEFAULT_ADAPTIVE_GATES: bool = true;

// Theme synthesis
pub const DEFAULT_MIN_FINDINGS_PER_THEME: usize = 3;
pub const DEFAULT_MIN_COMPANIES_PER_THEME: usize = 2;
pub const DEFAULT_HIGH_TIER_COMPANIES: usize = 5;
pub const DEFAULT_HIGH_TIER_FINDINGS: usize = 8;
pub const DEFAULT_MEDIUM_TIER_COMPANIES: usize = 3;
pub const DEFAULT_MEDIUM_TIER_FINDINGS: usize = 4;
pub const DEFAULT_QUALITY_W_COVERAGE: f64 = 0.4;
pub const DEFAULT_QUALITY_W_IMPACT: f64 = 0.3;
pub const DEFAULT_QUALITY_W_VOLUME: f64 = 0.2;
pub const DEFAULT_QUALITY_W_COHERENCE: f64 = 0.1;
pub const DEFAULT_COVERAGE_TARGET_COMPANIES: usize = 5;
pub const DEFAULT_VOLUME_TARGET_QUOTES: usize = 12;

// Narrative generation
pub const DEFAULT_REQUIRED_SENTENCES: usize = 2;
pub const DEFAULT_MIN_WORDS: usize = 12;
pub const DEFAULT_MAX_WORDS: usize = 80;
pub const DEFAULT_MAX_BUNDLE_QUOTES: usize = 8;
pub const DEFAULT_MAX_EXCERPT_CHARS: usize = 240;
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_MAX_VALIDATION_ATTEMPTS: u32 = 3;
pub const DEFAULT_MAX_SERVICE_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 250;
pub const DEFAULT_GENERATION_BATCH_SIZE: usize = 50;
pub const DEFAULT_GENERATION_CONCURRENCY: usize = 4;

// Deduplication
pub const DEFAULT_QUOTE_SIMILARITY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_THEME_SIMILARITY_THRESHOLD: f64 = 0.75;
pub const DEFAULT_MAX_FINDINGS_PER_QUOTE: usize = 1;

// Execution
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_FINDING_BATCH_SIZE: usize = 64;

pub const DEFAULT_BANNED_PHRASES: &[&str] = &[
    "should",
    "we recommend",
    "recommend",
    "must implement",
    "needs to",
    "need to",
    "consider implementing",
    "action item",
    "next step",
];

pub const DEFAULT_JARGON: &[&str] = &[
    "synergy",
    "paradigm",
    "leverage",
    "best-in-class",
    "omnichannel",
    "ebitda",
    "hipaa",
];

pub const DEFAULT_TIPPING_POINT_TERMS: &[&str] = &[
    "deal breaker",
    "dealbreaker",
    "deciding factor",
    "tipping point",
    "the reason we chose",
    "the reason we signed",
    "made the decision",
    "would have walked",
];

pub const DEFAULT_DIFFERENTIATOR_TERMS: &[&str] = &[
    "differentiator",
    "stood out",
    "set them apart",
    "blocker",
    "showstopper",
    "non-starter",
    "must have",
];

pub const DEFAULT_BUSINESS_IMPACT_TERMS: &[&str] = &[
    "revenue",
    "cost",
    "budget",
    "roi",
    "savings",
    "churn",
    "renewal",
    "margin",
    "hours",
    "headcount",
];

pub const DEFAULT_COMPETITIVE_DYNAMICS_TERMS: &[&str] = &[
    "competitor",
    "alternative",
    "incumbent",
    "other vendor",
    "switched",
    "evaluated",
    "shortlist",
];

pub const DEFAULT_STRATEGIC_TERMS: &[&str] = &[
    "roadmap",
    "strategy",
    "strategic",
    "long-term",
    "partnership",
    "vision",
    "future",
];

pub const DEFAULT_COMPARISON_PHRASES: &[&str] = &[
    "versus",
    "vs",
    "compared to",
    "compared with",
    "switched from",
    "switched to",
    "better than",
    "worse than",
    "instead of",
    "moved away from",
];

pub const DEFAULT_MARKET_TERMS: &[&str] = &[
    "competitor",
    "competition",
    "alternative",
    "incumbent",
    "other vendor",
    "other vendors",
    "market leader",
    "other tools",
];
