//! Rule-based transaction classifier
//!
//! Maps a free-text description to a category, an eco-impact rating and a
//! short explanation by walking an ordered rule table. The first matching
//! rule wins; when nothing matches the transaction falls back to `Other`
//! with a neutral impact.
//!
//! ## Rule Table Resolution
//!
//! The table is TOML, loaded with this precedence:
//! 1. An explicit path (`--rules`, or the `GREENSCORE_RULES` env var)
//! 2. Override in data dir (~/.local/share/greenscore/config/rules.toml)
//! 3. Embedded defaults (compiled into binary)

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{
    validate_amount, validate_eco_impact, Category, ClassificationMethod, ClassificationResult,
    PatternType, RawTransaction, RuleStrength, Transaction,
};

/// Embedded default rule table (compiled into binary)
const DEFAULT_RULES: &str = include_str!("../../../config/rules.toml");

/// Environment variable naming a rule table file
pub const RULES_ENV_VAR: &str = "GREENSCORE_RULES";

/// Confidence reported for a strong-keyword match
pub const STRONG_CONFIDENCE: f64 = 0.85;
/// Confidence reported for a generic-keyword match
pub const WEAK_CONFIDENCE: f64 = 0.6;
/// Confidence reported when no rule matched
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Reasoning used when no rule matched
pub const FALLBACK_REASONING: &str = "Unclassified transaction";

/// Compiled form of a rule's patterns
#[derive(Debug, Clone)]
enum Matcher {
    /// Lowercased substrings
    Contains(Vec<String>),
    /// Lowercased, trimmed whole descriptions
    Exact(Vec<String>),
    Regex(Vec<Regex>),
}

impl Matcher {
    fn compile(pattern_type: PatternType, patterns: &[String]) -> Result<Self> {
        Ok(match pattern_type {
            PatternType::Contains => {
                Matcher::Contains(patterns.iter().map(|p| p.to_lowercase()).collect())
            }
            PatternType::Exact => {
                Matcher::Exact(patterns.iter().map(|p| p.trim().to_lowercase()).collect())
            }
            PatternType::Regex => Matcher::Regex(
                patterns
                    .iter()
                    .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            ),
        })
    }

    /// `desc_lower` must be `description.to_lowercase()`
    fn is_match(&self, description: &str, desc_lower: &str) -> bool {
        match self {
            Matcher::Contains(patterns) => patterns.iter().any(|p| desc_lower.contains(p.as_str())),
            Matcher::Exact(patterns) => {
                let trimmed = desc_lower.trim();
                patterns.iter().any(|p| trimmed == p)
            }
            Matcher::Regex(patterns) => patterns.iter().any(|re| re.is_match(description)),
        }
    }
}

/// One entry of the ordered rule table
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRule {
    pub id: String,
    pub category: Category,
    pub eco_impact: i32,
    pub strength: RuleStrength,
    pub pattern_type: PatternType,
    pub patterns: Vec<String>,
    pub detail: String,
    #[serde(skip)]
    matcher: Matcher,
}

impl ClassificationRule {
    /// Build and compile a rule
    pub fn new(
        id: impl Into<String>,
        category: Category,
        eco_impact: i32,
        strength: RuleStrength,
        pattern_type: PatternType,
        patterns: Vec<String>,
        detail: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        validate_eco_impact(eco_impact).map_err(|e| Error::Rules(format!("rule {}: {}", id, e)))?;
        if patterns.is_empty() || patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::Rules(format!("rule {}: patterns must be non-empty", id)));
        }
        let matcher = Matcher::compile(pattern_type, &patterns)?;
        Ok(Self {
            id,
            category,
            eco_impact,
            strength,
            pattern_type,
            patterns,
            detail: detail.into(),
            matcher,
        })
    }

    pub fn confidence(&self) -> f64 {
        match self.strength {
            RuleStrength::Strong => STRONG_CONFIDENCE,
            RuleStrength::Weak => WEAK_CONFIDENCE,
        }
    }

    pub fn matches(&self, description: &str) -> bool {
        self.matcher.is_match(description, &description.to_lowercase())
    }
}

/// Where the active rule table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    Embedded,
    File(PathBuf),
    /// Built in code (tests, embedding applications)
    Inline,
}

impl std::fmt::Display for RuleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleSource::Embedded => write!(f, "embedded defaults"),
            RuleSource::File(path) => write!(f, "{}", path.display()),
            RuleSource::Inline => write!(f, "inline"),
        }
    }
}

/// Rule-based classifier over an ordered rule table
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
    source: RuleSource,
}

impl Classifier {
    /// Create a classifier using the standard rule table resolution
    pub fn new() -> Result<Self> {
        Self::load(None)
    }

    /// Create a classifier from the embedded defaults only
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            rules: parse_rules(DEFAULT_RULES)?,
            source: RuleSource::Embedded,
        })
    }

    /// Create a classifier from an explicit rule file
    pub fn with_rules_path(path: &Path) -> Result<Self> {
        Self::load(Some(path))
    }

    /// Create a classifier from rules built in code
    pub fn with_rules(rules: Vec<ClassificationRule>) -> Self {
        Self {
            rules,
            source: RuleSource::Inline,
        }
    }

    fn load(explicit: Option<&Path>) -> Result<Self> {
        let (content, source) = resolve_rules(explicit)?;
        let rules = parse_rules(&content)?;
        info!(rules = rules.len(), source = %source, "Loaded classification rules");
        Ok(Self { rules, source })
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn source(&self) -> &RuleSource {
        &self.source
    }

    /// Classify a description
    ///
    /// Fails with `InvalidInput` when `amount` is not a positive number. An
    /// unmatched description is not an error; it yields the `Other` fallback.
    pub fn classify(&self, description: &str, amount: f64) -> Result<ClassificationResult> {
        validate_amount(amount).map_err(Error::InvalidInput)?;

        let desc_lower = description.to_lowercase();
        for rule in &self.rules {
            if rule.matcher.is_match(description, &desc_lower) {
                debug!(rule = %rule.id, description, "Classification rule matched");
                return Ok(ClassificationResult {
                    category: rule.category,
                    eco_impact: rule.eco_impact,
                    reasoning: reasoning_for(rule.eco_impact, &rule.detail),
                    confidence: rule.confidence(),
                    method: ClassificationMethod::RuleBased,
                    rule: Some(rule.id.clone()),
                });
            }
        }

        debug!(description, "No classification rule matched");
        Ok(ClassificationResult {
            category: Category::Other,
            eco_impact: 0,
            reasoning: FALLBACK_REASONING.to_string(),
            confidence: FALLBACK_CONFIDENCE,
            method: ClassificationMethod::Default,
            rule: None,
        })
    }

    /// Classify a raw record into an immutable transaction
    pub fn classify_record(&self, raw: &RawTransaction) -> Result<Transaction> {
        let result = self.classify(&raw.description, raw.amount).map_err(|e| match e {
            Error::InvalidInput(msg) => Error::InvalidInput(format!(
                "{} ({})",
                msg,
                raw.id.as_deref().unwrap_or(&raw.description)
            )),
            other => other,
        })?;

        let id = raw
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| derive_transaction_id(&raw.date, &raw.description, raw.amount));

        Ok(Transaction {
            id,
            description: raw.description.clone(),
            amount: raw.amount,
            category: result.category,
            date: raw.date,
            eco_impact: result.eco_impact,
            reasoning: result.reasoning,
            merchant: raw.merchant.clone(),
        })
    }

    /// Classify a batch; the first invalid record fails the batch
    pub fn classify_batch(&self, raws: &[RawTransaction]) -> Result<Vec<Transaction>> {
        raws.iter().map(|raw| self.classify_record(raw)).collect()
    }
}

/// Impact-graded reasoning text
pub fn reasoning_for(eco_impact: i32, detail: &str) -> String {
    let lead = match eco_impact {
        i32::MIN..=-5 => "High environmental impact.",
        -4 => "Significant environmental concern.",
        -3 => "Notable negative environmental impact.",
        -2 => "Moderate environmental concern.",
        -1 => "Slightly negative environmental impact.",
        0 => "Neutral environmental impact.",
        1 => "Slightly positive environmental impact.",
        2 => "Moderately positive environmental impact.",
        3 => "Good sustainable practice.",
        4 => "Great eco-friendly decision.",
        _ => "Excellent sustainability choice!",
    };
    if detail.is_empty() {
        lead.to_string()
    } else {
        format!("{} {}", lead, detail)
    }
}

/// Stable id for a record that arrived without one
pub fn derive_transaction_id(date: &NaiveDate, description: &str, amount: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(amount.to_be_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("TXN-{}", &digest[..12])
}

/// Default rule override path
pub fn default_rules_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("greenscore").join("config").join("rules.toml"))
}

/// Pick the rule table content (explicit → env → data dir → embedded)
fn resolve_rules(explicit: Option<&Path>) -> Result<(String, RuleSource)> {
    let env_path = std::env::var(RULES_ENV_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    if let Some(path) = explicit.map(Path::to_path_buf).or(env_path) {
        if !path.exists() {
            return Err(Error::Rules(format!(
                "rule file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(&path)?;
        return Ok((content, RuleSource::File(path)));
    }

    if let Some(default_path) = default_rules_path() {
        if default_path.exists() {
            let content = fs::read_to_string(&default_path)?;
            return Ok((content, RuleSource::File(default_path)));
        }
    }

    Ok((DEFAULT_RULES.to_string(), RuleSource::Embedded))
}

/// Raw rule table structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawRuleTable {
    #[serde(default)]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    id: String,
    category: String,
    eco_impact: i32,
    #[serde(default)]
    strength: RuleStrength,
    #[serde(default)]
    pattern_type: PatternType,
    patterns: Vec<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Parse and validate a rule table from TOML content
pub fn parse_rules(content: &str) -> Result<Vec<ClassificationRule>> {
    let raw: RawRuleTable = toml::from_str(content)?;

    let mut seen = HashSet::new();
    let mut rules = Vec::with_capacity(raw.rules.len());

    for rule in raw.rules {
        if !seen.insert(rule.id.clone()) {
            return Err(Error::Rules(format!("duplicate rule id: {}", rule.id)));
        }
        let category = rule
            .category
            .parse::<Category>()
            .map_err(|e| Error::Rules(format!("rule {}: {}", rule.id, e)))?;

        rules.push(ClassificationRule::new(
            rule.id,
            category,
            rule.eco_impact,
            rule.strength,
            rule.pattern_type,
            rule.patterns,
            rule.detail.unwrap_or_default(),
        )?);
    }

    Ok(rules)
}
