/// Starter hierarchy files.
///
/// Lists every pair once at intensity 1 ("equally important"), so the user
/// only edits the judgments that differ.
use std::collections::BTreeMap;

use ahp_core::LabelSet;

use crate::input::{HierarchyFile, JudgmentEntry};

const TOML_HEADER: &str = "\
# AHP hierarchy
#
# Each judgment says `preferred` is `intensity` times more important than `over`.
# Swap the two names to flip the direction. Pairs you delete count as equal.
#
# Intensity scale:
#   1 = equal   3 = moderate   5 = strong   7 = very strong   9 = extreme
#   (2, 4, 6, 8 are intermediate values)

";

fn all_pairs(labels: &LabelSet) -> Vec<JudgmentEntry> {
    let names = labels.labels();
    let mut pairs = Vec::new();
    for i in 0..names.len() {
        for j in (i + 1)..names.len() {
            pairs.push(JudgmentEntry {
                preferred: names[i].clone(),
                over: names[j].clone(),
                intensity: 1,
            });
        }
    }
    pairs
}

/// Skeleton with all pairs listed at intensity 1.
pub fn skeleton(criteria: &LabelSet, alternatives: &LabelSet) -> HierarchyFile {
    let alternative_judgments: BTreeMap<String, Vec<JudgmentEntry>> = criteria
        .labels()
        .iter()
        .map(|c| (c.clone(), all_pairs(alternatives)))
        .collect();

    HierarchyFile {
        criteria: criteria.labels().to_vec(),
        alternatives: alternatives.labels().to_vec(),
        criteria_judgments: all_pairs(criteria),
        alternative_judgments,
    }
}

pub fn render_toml(file: &HierarchyFile) -> Result<String, toml::ser::Error> {
    Ok(format!("{TOML_HEADER}{}", toml::to_string_pretty(file)?))
}

pub fn render_json(file: &HierarchyFile) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(file)
}
