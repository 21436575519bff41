mod config;
mod input;
mod output;
mod template;

use ahp_core::{HierarchyResult, LabelSet};
use clap::Parser;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AhpConfig;
use crate::input::{parse_hierarchy_file, split_labels};
use crate::output::TableOptions;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

/// Exit status when `--strict` is set and a matrix fails the consistency check.
const EXIT_INCONSISTENT: i32 = 2;

#[derive(Parser)]
#[command(name = "ahp", version, about = "Rank alternatives with the Analytic Hierarchy Process")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Evaluate a hierarchy file and print weights, ranking and consistency
    Rank(RankArgs),
    /// Print a starter hierarchy file with every pair set to "equal"
    Template(TemplateArgs),
    /// Create a default config file at ~/.config/ahp/config.toml
    Init {
        /// Where to write the config (default: ~/.config/ahp/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Parser)]
struct RankArgs {
    /// Hierarchy file (TOML or JSON). Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Output JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Decimal places shown in tables
    #[arg(long)]
    precision: Option<usize>,

    /// Don't draw bar charts
    #[arg(long)]
    no_chart: bool,

    /// Exit with status 2 if any matrix fails the consistency check
    #[arg(long)]
    strict: bool,

    /// Show solver details (lambda_max, CI, CR) on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/ahp/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct TemplateArgs {
    /// Comma-separated criteria, e.g. "Price,Comfort,Safety"
    #[arg(long)]
    criteria: String,

    /// Comma-separated alternatives, e.g. "Car,Bus,Truck"
    #[arg(long)]
    alternatives: String,

    /// Emit JSON instead of TOML
    #[arg(long)]
    json: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read the hierarchy from a file, or from stdin when no path is given.
fn read_input(path: Option<&PathBuf>) -> String {
    match path {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            bail(format!("Failed to read hierarchy file {}: {e}", path.display()))
        }),
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                bail(
                    "No hierarchy provided. Pass a file path or pipe one via stdin \
                     (see `ahp template`).",
                );
            }
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}")));
            content
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => {
            init_tracing(args.verbose);
            run_rank(args);
        }
        Commands::Template(args) => run_template(args),
        Commands::Init { config: path } => {
            let path = path.unwrap_or_else(config::config_path);
            config::create_default_config(&path);
            println!("Created config at {}", path.display());
            println!("Edit it to set your default output options.");
        }
    }
}

/// Output settings for `rank` after merging the config file with CLI flags.
struct RankOptions {
    json: bool,
    strict: bool,
    table: TableOptions,
}

/// CLI flags win over config values; config fills in what the flags leave unset.
fn resolve_options(args: &RankArgs, cfg: &AhpConfig) -> RankOptions {
    RankOptions {
        json: args.json || cfg.json.unwrap_or(false),
        strict: args.strict || cfg.strict.unwrap_or(false),
        table: TableOptions {
            precision: args
                .precision
                .or(cfg.precision)
                .unwrap_or(config::DEFAULT_PRECISION),
            chart: !args.no_chart && cfg.chart.unwrap_or(true),
        },
    }
}

/// Exit status to finish with after the results are printed, if not 0.
fn strict_exit_code(strict: bool, result: &HierarchyResult) -> Option<i32> {
    (strict && !result.is_consistent()).then_some(EXIT_INCONSISTENT)
}

fn run_rank(args: RankArgs) {
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);
    let options = resolve_options(&args, &cfg);

    let content = read_input(args.input.as_ref());
    let file = parse_hierarchy_file(&content).unwrap_or_else(|e| bail(e));
    let hierarchy = file.to_hierarchy().unwrap_or_else(|e| bail(e));

    info!(
        criteria = hierarchy.criteria().len(),
        alternatives = hierarchy.alternatives().len(),
        "evaluating hierarchy"
    );

    let result = hierarchy.evaluate().unwrap_or_else(|e| bail(e));

    if options.json {
        let text = output::render_json(&hierarchy, &result)
            .unwrap_or_else(|e| bail(format!("Failed to serialize results: {e}")));
        println!("{text}");
    } else {
        output::print_tables(&hierarchy, &result, &options.table);
    }

    if let Some(code) = strict_exit_code(options.strict, &result) {
        std::process::exit(code);
    }
}

fn run_template(args: TemplateArgs) {
    let criteria =
        LabelSet::new("criterion", split_labels(&args.criteria)).unwrap_or_else(|e| bail(e));
    let alternatives = LabelSet::new("alternative", split_labels(&args.alternatives))
        .unwrap_or_else(|e| bail(e));
    if criteria.is_empty() || alternatives.is_empty() {
        bail(
            "Need at least one criterion and one alternative, separated by commas \
             (e.g. Car,Bus,Truck)",
        );
    }

    let file = template::skeleton(&criteria, &alternatives);
    let text = if args.json {
        template::render_json(&file).unwrap_or_else(|e| bail(e))
    } else {
        template::render_toml(&file).unwrap_or_else(|e| bail(e))
    };
    println!("{text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_args(flags: &[&str]) -> RankArgs {
        let mut argv = vec!["rank"];
        argv.extend_from_slice(flags);
        RankArgs::try_parse_from(argv).unwrap()
    }

    fn evaluate(toml: &str) -> HierarchyResult {
        let file = parse_hierarchy_file(toml).unwrap();
        file.to_hierarchy().unwrap().evaluate().unwrap()
    }

    const INTRANSITIVE: &str = r#"
criteria = ["A", "B", "C"]
alternatives = ["X", "Y"]

[[criteria_judgments]]
preferred = "A"
over = "B"
intensity = 9

[[criteria_judgments]]
preferred = "B"
over = "C"
intensity = 9
"#;

    const CONSISTENT: &str = r#"
criteria = ["A", "B"]
alternatives = ["X", "Y"]

[[criteria_judgments]]
preferred = "A"
over = "B"
intensity = 3
"#;

    #[test]
    fn test_defaults_without_flags_or_config() {
        let options = resolve_options(&rank_args(&[]), &AhpConfig::default());
        assert!(!options.json);
        assert!(!options.strict);
        assert!(options.table.chart);
        assert_eq!(options.table.precision, config::DEFAULT_PRECISION);
    }

    #[test]
    fn test_config_fills_unset_flags() {
        let cfg = config::parse_config("json = true\nprecision = 2\nchart = false\n").unwrap();
        let options = resolve_options(&rank_args(&[]), &cfg);
        assert!(options.json);
        assert!(!options.table.chart);
        assert_eq!(options.table.precision, 2);
    }

    #[test]
    fn test_cli_flags_win_over_config() {
        let cfg = config::parse_config("precision = 2\nchart = true\n").unwrap();
        let options = resolve_options(&rank_args(&["--precision", "6", "--no-chart"]), &cfg);
        assert_eq!(options.table.precision, 6);
        assert!(!options.table.chart);
    }

    #[test]
    fn test_strict_from_flag_or_config() {
        let strict_cfg = config::parse_config("strict = true\n").unwrap();
        let lenient_cfg = config::parse_config("strict = false\n").unwrap();

        assert!(resolve_options(&rank_args(&["--strict"]), &AhpConfig::default()).strict);
        assert!(resolve_options(&rank_args(&["--strict"]), &lenient_cfg).strict);
        assert!(resolve_options(&rank_args(&[]), &strict_cfg).strict);
        assert!(!resolve_options(&rank_args(&[]), &lenient_cfg).strict);
    }

    #[test]
    fn test_strict_exit_code_only_for_inconsistent_results() {
        let inconsistent = evaluate(INTRANSITIVE);
        let consistent = evaluate(CONSISTENT);

        assert_eq!(strict_exit_code(true, &inconsistent), Some(EXIT_INCONSISTENT));
        assert_eq!(EXIT_INCONSISTENT, 2);
        assert_eq!(strict_exit_code(false, &inconsistent), None);
        assert_eq!(strict_exit_code(true, &consistent), None);
    }
}
