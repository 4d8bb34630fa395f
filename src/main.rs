//! Healthwheel: Wheel of Health quiz CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use healthwheel::bank::{Descriptions, QuestionBank, QUESTIONS_FILENAME};
use healthwheel::config::{default_config_json, load_config, CliOverrides, CONFIG_FILENAME};
use healthwheel::prompt::Prompt;
use healthwheel::reporter::{ConsoleReporter, HtmlReporter, JsonReporter};
use healthwheel::session::{QuizSession, TracingObserver};
use healthwheel::shuffle::rng_from_seed;
use healthwheel::{ProgressStyle, QuizResults, ResultsLayout, SortOrder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Healthwheel: rate yourself across the Wheel of Health
#[derive(Parser, Debug)]
#[command(name = "healthwheel")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Question bank JSON file (default: config `questions`, then questions.json)
    questions: Option<PathBuf>,

    /// Directory of <category>.html description files
    #[arg(long, value_name = "DIR")]
    descriptions: Option<PathBuf>,

    /// Results order: score (strongest first) or name (alphabetical)
    #[arg(long, value_name = "ORDER")]
    sort: Option<SortOrder>,

    /// Results layout: accordion or grid
    #[arg(long)]
    layout: Option<ResultsLayout>,

    /// Progress display: bar or text
    #[arg(long)]
    progress: Option<ProgressStyle>,

    /// Include category descriptions in the results
    #[arg(long)]
    show_descriptions: bool,

    /// Require an empty line to confirm each rating
    #[arg(long)]
    manual_advance: bool,

    /// Seed for the question order (random when omitted)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Output results as JSON
    #[arg(long, short)]
    json: bool,

    /// Also write an HTML report to FILE
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .healthwheelrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .healthwheelrc.json with sensible defaults
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    init_logging(args.verbose);

    if let Some(Commands::Init { dir }) = args.command {
        return run_init(dir.as_deref());
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    // Load config (CLI flags override config file)
    let config = load_config(&cwd, args.config.as_deref())?.merge_with_cli(CliOverrides {
        questions: args.questions.clone(),
        descriptions: args.descriptions.clone(),
        seed: args.seed,
        progress_style: args.progress,
        sort_order: args.sort,
        results_layout: args.layout,
        show_descriptions: args.show_descriptions,
        manual_advance: args.manual_advance,
    });
    let options = config.quiz_options();

    let questions_path = config
        .questions
        .clone()
        .unwrap_or_else(|| PathBuf::from(QUESTIONS_FILENAME));
    let bank = QuestionBank::from_path(&questions_path)?;

    let descriptions_dir = config.descriptions.clone().or_else(|| {
        let sibling = questions_path
            .parent()
            .unwrap_or(Path::new("."))
            .join("descriptions");
        sibling.is_dir().then_some(sibling)
    });
    let descriptions = match &descriptions_dir {
        Some(dir) => Descriptions::load_dir(dir, &bank.categories()),
        None => Descriptions::new(),
    };

    if !args.quiet {
        eprintln!(
            "{}: Loaded {} questions in {} categories from {}",
            "Info".cyan(),
            bank.len(),
            bank.categories().len(),
            questions_path.display()
        );
    }

    let mut rng = rng_from_seed(config.seed);
    let mut session = QuizSession::shuffled(&bank, &mut rng).with_observer(TracingObserver);

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stderr()).with_options(&options);
    if !args.quiet {
        prompt.intro(bank.categories().len(), bank.len())?;
    }
    let answers = prompt.run(&mut session)?;

    let results = QuizResults::from_answers(answers, options.sort_order);

    if args.json {
        let attached = options.show_descriptions.then_some(&descriptions);
        println!("{}", JsonReporter::new().pretty().report(&results, attached));
    } else {
        let mut reporter = ConsoleReporter::from_options(&options);
        if args.no_color {
            reporter = reporter.without_colors();
        }
        if args.quiet {
            reporter.report_quiet(&results);
        } else {
            reporter.report(&results, &descriptions);
        }
    }

    if let Some(html_path) = &args.html {
        let html = HtmlReporter::from_options(&options).report(&results, &descriptions);
        fs::write(html_path, html)
            .with_context(|| format!("Failed to write HTML report: {}", html_path.display()))?;
        if !args.quiet {
            eprintln!("{}: Wrote {}", "Info".cyan(), html_path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_init(dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    fs::write(&config_path, default_config_json())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{} {}", "Created".green(), config_path.display());
    Ok(ExitCode::SUCCESS)
}
