//! Promptcheck: Prompt Quality Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use promptcheck::analyzer::Evaluator;
use promptcheck::config::{build_ignore_set, is_ignored, load_config, Config, CONFIG_FILENAME};
use promptcheck::history::{
    format_delta, load_history, make_entry, previous_score, save_history, HistoryStore,
};
use promptcheck::llm::{evaluate_with_llm, ClaudeClient};
use promptcheck::reporter::{ConsoleReporter, JsonReporter};
use promptcheck::watcher::PromptWatcher;
use promptcheck::{parse_criteria, validate_prompt, FeedbackReport};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// Promptcheck: Prompt Quality Analyzer for LLM prompts
#[derive(Parser, Debug)]
#[command(name = "promptcheck")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Prompt file or directory to evaluate (or use --text / --stdin)
    #[arg(required_unless_present_any = ["command", "text", "stdin"])]
    path: Option<PathBuf>,

    /// Evaluate an inline prompt instead of a file
    #[arg(long, short)]
    text: Option<String>,

    /// Read the prompt from stdin
    #[arg(long)]
    stdin: bool,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum score threshold (exit 1 if below)
    #[arg(long)]
    threshold: Option<u8>,

    /// Quiet mode (one line per prompt)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (show matched and missing signals)
    #[arg(long, short)]
    verbose: bool,

    /// Comma-separated criteria to evaluate
    /// (clarity, context, constraints, examples, format)
    #[arg(long, value_delimiter = ',')]
    criteria: Vec<String>,

    /// Weight override, repeatable: --weight clarity=2.0
    #[arg(long, value_name = "CRITERION=WEIGHT")]
    weight: Vec<String>,

    /// Skip the improved-prompt rewrite
    #[arg(long)]
    no_rewrite: bool,

    /// Ask the LLM collaborator for feedback (requires ANTHROPIC_API_KEY;
    /// falls back to heuristics when unavailable)
    #[arg(long)]
    improve: bool,

    /// Model to use with --improve
    #[arg(long)]
    model: Option<String>,

    /// Path to config file (default: search .promptcheckrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch the prompt file for changes and re-evaluate
    #[arg(long)]
    watch: bool,

    /// Do not record this run in .promptcheck-history.json
    #[arg(long)]
    no_history: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .promptcheckrc.json with sensible defaults
    Init {
        /// Minimum score threshold (e.g. 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(Commands::Init { threshold, dir }) = &args.command {
        return run_init(*threshold, dir.as_deref());
    }

    // Resolve work directory for config search and history
    let work_dir = match args.path.as_deref() {
        Some(p) if p.is_file() => p.parent().unwrap_or(Path::new(".")).to_path_buf(),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from("."),
    };

    // Unknown criteria from the CLI warn but do not abort the valid ones
    let (_, criteria_errors) = parse_criteria(&args.criteria);
    for e in &criteria_errors {
        eprintln!("{}: {}", "Warning".yellow(), e);
    }
    let valid_criteria: Vec<String> = args
        .criteria
        .iter()
        .filter(|name| name.parse::<promptcheck::Criterion>().is_ok())
        .cloned()
        .collect();
    if !args.criteria.is_empty() && valid_criteria.is_empty() {
        anyhow::bail!("no valid criteria selected");
    }

    // Load config (CLI flags override config file)
    let mut config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(
        args.threshold,
        &valid_criteria,
        args.no_rewrite,
        args.model.as_deref(),
    );
    apply_weight_flags(&mut config, &args.weight)?;
    config.validate()?;

    let evaluator = config.evaluator()?;

    if args.watch {
        let path = args
            .path
            .clone()
            .context("--watch requires a prompt file or directory")?;
        return run_watch(&args, &evaluator, &path);
    }

    // Gather (source, prompt) pairs
    let inputs = collect_inputs(&args, &config)?;
    if inputs.is_empty() {
        eprintln!("{}: No prompt files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    // Inline input fails fast on empty prompts; batch files degrade to
    // zeroed reports instead so one bad file doesn't kill the run.
    if inputs.len() == 1 && (args.text.is_some() || args.stdin) {
        if let Err(e) = validate_prompt(&inputs[0].1) {
            anyhow::bail!("{}", e);
        }
    }

    let results = evaluate_inputs(&args, &config, &evaluator, inputs);

    report_results(&args, &work_dir, &results)?;

    // Threshold gate: the weakest prompt decides the exit code
    if let Some(threshold) = config.threshold {
        let minimum = results
            .iter()
            .map(|r| r.report.score.value)
            .min()
            .unwrap_or(0);
        if minimum < threshold {
            return Ok(ExitCode::from(1));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Parse repeated `--weight criterion=value` flags into the config table
fn apply_weight_flags(config: &mut Config, flags: &[String]) -> Result<()> {
    for flag in flags {
        let (name, value) = flag
            .split_once('=')
            .with_context(|| format!("Invalid weight '{}', expected CRITERION=WEIGHT", flag))?;
        let weight: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("Invalid weight value in '{}'", flag))?;
        config.weights.insert(name.trim().to_string(), weight);
    }
    Ok(())
}

fn collect_inputs(args: &Args, config: &Config) -> Result<Vec<(String, String)>> {
    if let Some(ref text) = args.text {
        return Ok(vec![("prompt".to_string(), text.clone())]);
    }

    if args.stdin {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read prompt from stdin")?;
        return Ok(vec![("stdin".to_string(), buffer)]);
    }

    let path = args.path.as_deref().expect("path required without --text/--stdin");
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let files = collect_prompt_files(path, ignore_set.as_ref(), &config.get_prompt_patterns())?;
    let mut inputs = Vec::with_capacity(files.len());
    for file in files {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read prompt file: {}", file.display()))?;
        inputs.push((file.display().to_string(), content));
    }
    Ok(inputs)
}

/// Collect prompt files from a file or directory path, in sorted order
fn collect_prompt_files(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    patterns: &[String],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let pattern_set = build_ignore_set(patterns)?;
    let mut files = Vec::new();
    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let p = entry.path();
        let name = match p.file_name() {
            Some(n) => Path::new(n),
            None => continue,
        };
        if !pattern_set.is_match(name) {
            continue;
        }
        if let Some(set) = ignore_set {
            if is_ignored(p, set) {
                continue;
            }
        }
        files.push(p.to_path_buf());
    }
    files.sort();
    Ok(files)
}

/// One evaluated prompt: where it came from, its text, and the report
struct Evaluated {
    source: String,
    prompt: String,
    report: FeedbackReport,
}

fn evaluate_inputs(
    args: &Args,
    config: &Config,
    evaluator: &Evaluator,
    inputs: Vec<(String, String)>,
) -> Vec<Evaluated> {
    let client = if args.improve {
        match ClaudeClient::from_env() {
            Ok(client) => {
                let model = config.model.as_deref();
                Some(match model {
                    Some(m) => client.model(m),
                    None => client,
                })
            }
            Err(e) => {
                eprintln!(
                    "{}: {} - falling back to heuristic evaluation",
                    "Warning".yellow(),
                    e
                );
                None
            }
        }
    } else {
        None
    };

    inputs
        .into_iter()
        .map(|(source, prompt)| {
            let report = match client.as_ref() {
                Some(backend) => evaluate_with_llm(&prompt, evaluator, backend),
                None => {
                    let mut report = evaluator.evaluate(&prompt);
                    // --improve without a usable client is a degraded run
                    if args.improve {
                        report.degraded = true;
                    }
                    report
                }
            };
            Evaluated {
                source,
                prompt,
                report,
            }
        })
        .collect()
}

fn report_results(args: &Args, work_dir: &Path, results: &[Evaluated]) -> Result<()> {
    let reports: Vec<FeedbackReport> = results.iter().map(|r| r.report.clone()).collect();
    let stats = Evaluator::aggregate_stats(&reports);
    let labeled: Vec<(String, FeedbackReport)> = results
        .iter()
        .map(|r| (r.source.clone(), r.report.clone()))
        .collect();

    // History is keyed by the prompt text; load before appending so the
    // delta compares against the previous run
    let mut history = load_history(work_dir);

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 {
            println!("{}", reporter.report(&results[0].report));
        } else {
            println!("{}", reporter.report_with_summary(&labeled, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for r in results {
            let prev = previous_score(&history, &r.prompt);
            let delta = format_delta(prev, r.report.score.value);
            if delta.is_empty() {
                reporter.report_quiet(&r.source, &r.report);
            } else {
                println!(
                    "{}: {} ({}){}",
                    r.source, r.report.score.value, r.report.score.grade, delta
                );
            }
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if results.len() == 1 {
            reporter.report(&results[0].source, &results[0].report);
        } else {
            reporter.report_many(&labeled, &stats);
        }
    }

    if !args.no_history {
        for r in results {
            history.append(make_entry(&r.prompt, &r.report));
        }
        let _ = save_history(work_dir, &history);
    }

    Ok(())
}

fn run_watch(args: &Args, evaluator: &Evaluator, path: &Path) -> Result<ExitCode> {
    let mut reporter = ConsoleReporter::new();
    if args.verbose {
        reporter = reporter.verbose();
    }

    let evaluate_one = |file: &Path| {
        match std::fs::read_to_string(file) {
            Ok(content) => {
                let report = evaluator.evaluate(&content);
                reporter.report(&file.display().to_string(), &report);
            }
            Err(e) => eprintln!("{}: {}: {}", "Warning".yellow(), file.display(), e),
        }
    };

    // Initial pass before waiting for changes
    if path.is_file() {
        evaluate_one(path);
    }

    let watcher = PromptWatcher::watch(path)
        .map_err(|e| anyhow::anyhow!("Failed to watch {}: {}", path.display(), e))?;
    println!(
        "{}",
        format!("Watching {} for changes... (Ctrl-C to stop)", path.display()).dimmed()
    );

    // Watch events may carry absolute paths; compare canonical forms
    let target = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    loop {
        for changed in watcher.next_changes() {
            // When watching a single file, ignore sibling churn
            if path.is_file() {
                let canon = changed.canonicalize().unwrap_or_else(|_| changed.clone());
                if canon != target {
                    continue;
                }
            }
            evaluate_one(&changed);
        }
    }
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let dir = dir.unwrap_or(Path::new("."));
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::from(2));
    }

    let content = format!(
        r#"{{
  "threshold": {},
  "criteria": ["clarity", "context", "constraints", "examples", "format"],
  "weights": {{}},
  "rewrite": true,
  "ignore": [],
  "promptPatterns": ["*.prompt", "*.txt", "*.md"]
}}
"#,
        threshold.unwrap_or(70)
    );

    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {}", config_path.display());
    Ok(ExitCode::SUCCESS)
}
