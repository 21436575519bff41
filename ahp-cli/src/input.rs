/// Hierarchy file loading: TOML or JSON, auto-detected.
///
/// Judgments are written the way a person answers them: which of two items is
/// preferred, and by how much on the 1-9 scale. Pairs left out count as equal.
use std::collections::BTreeMap;

use ahp_core::{AhpError, Comparison, Hierarchy, LabelSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JudgmentEntry {
    pub preferred: String,
    pub over: String,
    pub intensity: u8,
}

/// A misspelled section must fail to parse rather than leave every pair at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HierarchyFile {
    pub criteria: Vec<String>,
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub criteria_judgments: Vec<JudgmentEntry>,
    /// Keyed by criterion name.
    #[serde(default)]
    pub alternative_judgments: BTreeMap<String, Vec<JudgmentEntry>>,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("File looks like JSON but failed to parse: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown {kind} \"{label}\" in {context}")]
    UnknownLabel {
        kind: String,
        label: String,
        context: String,
    },

    #[error("Alternative judgments given for unknown criterion \"{0}\"")]
    UnknownCriterion(String),

    #[error(transparent)]
    Ahp(#[from] AhpError),
}

/// Parse a hierarchy document. Content starting with `{` is JSON, anything
/// else is TOML.
pub fn parse_hierarchy_file(content: &str) -> Result<HierarchyFile, InputError> {
    let trimmed = content.trim();
    if trimmed.starts_with('{') {
        Ok(serde_json::from_str(trimmed)?)
    } else {
        Ok(toml::from_str(trimmed)?)
    }
}

/// Split a comma-separated list ("Car,Bus,Truck"). A single trailing comma is
/// tolerated; blank entries elsewhere are kept so `LabelSet` can reject them.
pub fn split_labels(list: &str) -> Vec<String> {
    let list = list.trim();
    let list = list.strip_suffix(',').unwrap_or(list);
    if list.trim().is_empty() {
        return Vec::new();
    }
    list.split(',').map(|s| s.trim().to_string()).collect()
}

fn to_comparisons(
    entries: &[JudgmentEntry],
    labels: &LabelSet,
    context: &str,
) -> Result<Vec<Comparison>, InputError> {
    let index = |label: &str| {
        labels.index_of(label).ok_or_else(|| InputError::UnknownLabel {
            kind: labels.kind().to_string(),
            label: label.to_string(),
            context: context.to_string(),
        })
    };

    entries
        .iter()
        .map(|e| -> Result<Comparison, InputError> {
            Ok(Comparison::new(index(&e.preferred)?, index(&e.over)?, e.intensity))
        })
        .collect()
}

impl HierarchyFile {
    /// Validate labels and judgments and build the core `Hierarchy`.
    pub fn to_hierarchy(&self) -> Result<Hierarchy, InputError> {
        let criteria = LabelSet::new("criterion", &self.criteria)?;
        let alternatives = LabelSet::new("alternative", &self.alternatives)?;

        let criteria_comparisons =
            to_comparisons(&self.criteria_judgments, &criteria, "criteria judgments")?;

        let mut by_criterion: Vec<Vec<Comparison>> = vec![Vec::new(); criteria.len()];
        for (name, entries) in &self.alternative_judgments {
            let k = criteria
                .index_of(name)
                .ok_or_else(|| InputError::UnknownCriterion(name.clone()))?;
            let context = format!("alternative judgments for \"{}\"", criteria.label(k));
            by_criterion[k].extend(to_comparisons(entries, &alternatives, &context)?);
        }

        Ok(Hierarchy::from_comparisons(
            criteria,
            alternatives,
            &criteria_comparisons,
            &by_criterion,
        )?)
    }
}
