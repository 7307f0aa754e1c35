//! On-disk rule configuration.
//!
//! ```yaml
//! enableCustomFishRules: true
//! enableVanillaFishRules: true
//! customFishRules:
//!   - possibleItems: [2290, 2291]
//!     chanceNumerator: 1
//!     chanceDenominator: 4
//!     rarity: Rare
//!     conditions: [InLava, HardMode]
//! ```
//!
//! Entries are decoded one at a time: a malformed entry is logged and
//! skipped without affecting the others.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::error::FishdropError;
use crate::types::{Condition, DeclarativeRule, ItemId, Rarity, Symbol};

/// Drop rule settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropConfig {
    /// Consult the compiled custom rules first.
    #[serde(
        rename = "enableCustomFishRules",
        alias = "enableCustomRules",
        default = "enabled"
    )]
    pub enable_custom_rules: bool,
    /// Fall back to the engine's own rules.
    #[serde(
        rename = "enableVanillaFishRules",
        alias = "enableVanillaRules",
        default = "enabled"
    )]
    pub enable_vanilla_rules: bool,
    #[serde(
        rename = "customFishRules",
        alias = "customRules",
        default,
        deserialize_with = "lenient_entries"
    )]
    pub custom_rules: Vec<RuleEntry>,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            enable_custom_rules: true,
            enable_vanilla_rules: true,
            custom_rules: Vec::new(),
        }
    }
}

impl DropConfig {
    /// # Errors
    ///
    /// Returns [`FishdropError::Config`] if the document itself is not valid
    /// YAML or has the wrong shape. Bad rule entries are skipped instead.
    pub fn from_yaml_str(input: &str) -> Result<Self, FishdropError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(input)?)
    }

    /// # Errors
    ///
    /// Returns [`FishdropError`] on I/O or document-level parse failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FishdropError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&input)
    }

    /// # Errors
    ///
    /// Returns [`FishdropError::Config`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, FishdropError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The custom rules with names resolved to symbols.
    #[must_use]
    pub fn declarative_rules(&self) -> Vec<DeclarativeRule> {
        self.custom_rules.iter().map(RuleEntry::to_declarative).collect()
    }
}

fn enabled() -> bool {
    true
}

fn one() -> i32 {
    1
}

/// One rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEntry {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub possible_items: Vec<ItemId>,
    #[serde(default = "one")]
    pub chance_numerator: i32,
    #[serde(default = "one")]
    pub chance_denominator: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
}

impl RuleEntry {
    /// Resolve names to symbols. An unknown rarity becomes `None` (compiled as
    /// `Common`); unknown conditions are dropped.
    #[must_use]
    pub fn to_declarative(&self) -> DeclarativeRule {
        let rarity = self.rarity.as_deref().and_then(|name| {
            let parsed = Rarity::parse(name);
            if parsed.is_none() {
                debug!(rarity = name, "unknown rarity, using Common");
            }
            parsed
        });
        let conditions = self
            .conditions
            .iter()
            .filter_map(|name| {
                let parsed = Condition::parse(name);
                if parsed.is_none() {
                    debug!(condition = %name, "dropping unknown condition");
                }
                parsed
            })
            .collect();

        DeclarativeRule {
            possible_items: self.possible_items.clone(),
            chance_numerator: self.chance_numerator,
            chance_denominator: self.chance_denominator,
            rarity,
            conditions,
        }
    }
}

impl From<&DeclarativeRule> for RuleEntry {
    fn from(rule: &DeclarativeRule) -> Self {
        Self {
            possible_items: rule.possible_items.clone(),
            chance_numerator: rule.chance_numerator,
            chance_denominator: rule.chance_denominator,
            rarity: rule.rarity.map(|r| r.name().to_owned()),
            conditions: rule.conditions.iter().map(|c| c.name().to_owned()).collect(),
        }
    }
}

/// A rule entry that could not be decoded.
#[derive(Debug, Error)]
#[error("rule entry #{index}: {source}")]
pub struct EntryError {
    pub index: usize,
    #[source]
    pub source: serde_yaml::Error,
}

/// Decode each value on its own, collecting failures instead of stopping.
pub fn decode_entries(values: Vec<serde_yaml::Value>) -> (Vec<RuleEntry>, Vec<EntryError>) {
    let mut entries = Vec::with_capacity(values.len());
    let mut errors = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        match serde_yaml::from_value(value) {
            Ok(entry) => entries.push(entry),
            Err(source) => errors.push(EntryError { index, source }),
        }
    }
    (entries, errors)
}

fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<RuleEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<serde_yaml::Value> = nullable_vec(deserializer)?;
    let (entries, errors) = decode_entries(values);
    for err in &errors {
        error!("skipping drop rule: {err}");
    }
    Ok(entries)
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct RuleDocument {
    #[serde(default, deserialize_with = "lenient_entries")]
    rules: Vec<RuleEntry>,
}

/// Parse an export document (a `rules:` list) into declarative rules.
///
/// # Errors
///
/// Returns [`FishdropError::Config`] if the document is not valid YAML.
pub fn parse_rule_document(input: &str) -> Result<Vec<DeclarativeRule>, FishdropError> {
    let doc: RuleDocument = serde_yaml::from_str(input)?;
    Ok(doc.rules.iter().map(RuleEntry::to_declarative).collect())
}
