/// Output formatting: terminal tables, bar charts and JSON.
use ahp_core::constants::CONSISTENCY_THRESHOLD;
use ahp_core::{Hierarchy, HierarchyResult, MatrixEvaluation, PairwiseMatrix};
use serde::Serialize;

/// Width of a full bar in the terminal charts.
const BAR_WIDTH: usize = 40;

pub struct TableOptions {
    pub precision: usize,
    pub chart: bool,
}

#[derive(Serialize)]
struct JsonWeight {
    name: String,
    weight: f64,
}

#[derive(Serialize)]
struct JsonRankedAlternative {
    rank: usize,
    name: String,
    score: f64,
}

#[derive(Serialize)]
struct JsonMatrix {
    label: String,
    matrix: Vec<Vec<f64>>,
    weights: Vec<JsonWeight>,
    lambda_max: f64,
    consistency_index: f64,
    consistency_ratio: f64,
    consistent: bool,
}

#[derive(Serialize)]
struct JsonOutput {
    ranking: Vec<JsonRankedAlternative>,
    criteria: JsonMatrix,
    alternatives: Vec<JsonMatrix>,
    consistent: bool,
    warnings: Vec<String>,
}

fn name_width(labels: &[String]) -> usize {
    labels.iter().map(|l| l.chars().count()).max().unwrap_or(4).max(4)
}

/// Horizontal bar scaled against the largest value in the chart.
pub fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.min(BAR_WIDTH))
}

fn print_matrix(title: &str, labels: &[String], matrix: &PairwiseMatrix, precision: usize) {
    let width = name_width(labels);
    let cell = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(precision + 3);

    println!("#### {title}");
    print!("{:<width$}", "");
    for label in labels {
        print!(" | {label:>cell$}");
    }
    println!();
    println!("{}", "-".repeat(width + labels.len() * (cell + 3)));
    for (label, row) in labels.iter().zip(matrix.rows()) {
        print!("{label:<width$}");
        for value in row {
            print!(" | {value:>cell$.precision$}");
        }
        println!();
    }
    println!();
}

fn print_weights(title: &str, labels: &[String], weights: &[f64], options: &TableOptions) {
    let width = name_width(labels);
    let max = weights.iter().copied().fold(0.0_f64, f64::max);

    println!("#### {title}");
    for (label, &w) in labels.iter().zip(weights) {
        if options.chart {
            println!("{label:<width$} | {w:>8.prec$} | {}", bar(w, max), prec = options.precision);
        } else {
            println!("{label:<width$} | {w:>8.prec$}", prec = options.precision);
        }
    }
    println!();
}

fn consistency_line(eval: &MatrixEvaluation, precision: usize) -> String {
    let status = if eval.priorities.consistency.consistent { "ok" } else { "FAILED" };
    format!(
        "{:<24} CR = {:.prec$} (lambda_max = {:.prec$}) {}",
        eval.label,
        eval.priorities.consistency.ratio,
        eval.priorities.lambda_max,
        status,
        prec = precision,
    )
}

/// Print the full evaluation as terminal tables.
pub fn print_tables(hierarchy: &Hierarchy, result: &HierarchyResult, options: &TableOptions) {
    let criteria = hierarchy.criteria().labels();
    let alternatives = hierarchy.alternatives().labels();

    print_matrix("Criteria table", criteria, hierarchy.criteria_matrix(), options.precision);
    for (name, matrix) in criteria.iter().zip(hierarchy.alternative_matrices()) {
        let title = format!("Alternatives for criterion {name}");
        print_matrix(&title, alternatives, matrix, options.precision);
    }

    print_weights("Criteria weights", criteria, result.criteria_weights().as_slice(), options);

    // Final ranking
    let width = name_width(alternatives);
    let ranking = result.ranking();
    let max = ranking.first().map_or(0.0, |r| r.score);
    println!("#### Final ranking");
    println!(" # | {:<width$} |    Score", "Alternative");
    println!("---|-{}-|---------", "-".repeat(width));
    let prec = options.precision;
    for (i, r) in ranking.iter().enumerate() {
        let name = &alternatives[r.index];
        let rank = i + 1;
        let score = r.score;
        if options.chart {
            let chart = bar(score, max);
            println!("{rank:>2} | {name:<width$} | {score:>8.prec$} | {chart}");
        } else {
            println!("{rank:>2} | {name:<width$} | {score:>8.prec$}");
        }
    }
    println!();

    println!("#### Consistency (threshold CR < {CONSISTENCY_THRESHOLD})");
    for eval in result.evaluations() {
        println!("{}", consistency_line(eval, options.precision));
    }
    for warning in result.warnings() {
        println!("Warning: {warning}");
    }
}

fn json_matrix(eval: &MatrixEvaluation, labels: &[String], matrix: &PairwiseMatrix) -> JsonMatrix {
    JsonMatrix {
        label: eval.label.clone(),
        matrix: matrix.to_rows(),
        weights: labels
            .iter()
            .zip(eval.priorities.weights.iter())
            .map(|(name, &weight)| JsonWeight { name: name.clone(), weight })
            .collect(),
        lambda_max: eval.priorities.lambda_max,
        consistency_index: eval.priorities.consistency_index,
        consistency_ratio: eval.priorities.consistency.ratio,
        consistent: eval.priorities.consistency.consistent,
    }
}

fn build_json(hierarchy: &Hierarchy, result: &HierarchyResult) -> JsonOutput {
    let criteria = hierarchy.criteria().labels();
    let alternatives = hierarchy.alternatives().labels();

    JsonOutput {
        ranking: result
            .ranking()
            .iter()
            .enumerate()
            .map(|(i, r)| JsonRankedAlternative {
                rank: i + 1,
                name: alternatives[r.index].clone(),
                score: r.score,
            })
            .collect(),
        criteria: json_matrix(&result.criteria, criteria, hierarchy.criteria_matrix()),
        alternatives: result
            .alternatives
            .iter()
            .zip(hierarchy.alternative_matrices())
            .map(|(eval, matrix)| json_matrix(eval, alternatives, matrix))
            .collect(),
        consistent: result.is_consistent(),
        warnings: result.warnings().iter().map(|w| w.to_string()).collect(),
    }
}

/// Render the evaluation as pretty-printed JSON.
pub fn render_json(
    hierarchy: &Hierarchy,
    result: &HierarchyResult,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&build_json(hierarchy, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahp_core::{Comparison, LabelSet};

    fn sample() -> (Hierarchy, HierarchyResult) {
        let hierarchy = Hierarchy::from_comparisons(
            LabelSet::new("criterion", ["A", "B", "C"]).unwrap(),
            LabelSet::new("alternative", ["X", "Y"]).unwrap(),
            &[Comparison::new(0, 1, 9), Comparison::new(1, 2, 9)],
            &[vec![Comparison::new(0, 1, 3)], vec![], vec![]],
        )
        .unwrap();
        let result = hierarchy.evaluate().unwrap();
        (hierarchy, result)
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(1.0, 1.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(0.5, 1.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0, 1.0), "");
        assert_eq!(bar(0.3, 0.0), "");
    }

    #[test]
    fn test_json_output_shape() {
        let (hierarchy, result) = sample();
        let text = render_json(&hierarchy, &result).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["ranking"].as_array().unwrap().len(), 2);
        assert_eq!(json["ranking"][0]["rank"], 1);
        assert_eq!(json["criteria"]["label"], "criteria table");
        assert_eq!(json["criteria"]["consistent"], false);
        assert_eq!(json["alternatives"][0]["label"], "A");
        assert_eq!(json["alternatives"][0]["matrix"][0][1], 3.0);
        assert_eq!(json["consistent"], false);

        let warnings = json["warnings"].as_array().unwrap();
        assert_eq!(warnings.len(), 1);
        let first = warnings[0].as_str().unwrap();
        assert!(first.starts_with("Consistency check failed for criteria table"));
    }

    #[test]
    fn test_consistency_line_marks_failures() {
        let (_, result) = sample();
        assert!(consistency_line(&result.criteria, 4).ends_with("FAILED"));
        assert!(consistency_line(&result.alternatives[0], 4).ends_with("ok"));
    }
}
