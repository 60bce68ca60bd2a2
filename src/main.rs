use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use wordcheck::cli::output::{self, OutputFormat};
use wordcheck::{checker, Config, WordTable};

#[derive(Parser, Debug)]
#[command(name = "wordcheck")]
#[command(version, about = "Check texts against a hash-table dictionary", long_about = None)]
struct Cli {
    /// Texts to check (directories are searched recursively)
    #[arg(value_name = "TEXTS")]
    texts: Vec<PathBuf>,

    /// Word list to load, one whitespace-separated word per entry
    #[arg(short, long, env = "WORDCHECK_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Number of hash table buckets
    #[arg(short, long)]
    buckets: Option<usize>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Only print the totals, not each misspelled word
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Show how a dictionary spreads across the buckets
    Stats {
        /// Word list to load
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// Number of hash table buckets
        #[arg(short, long)]
        buckets: Option<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "wordcheck", &mut io::stdout());
        return Ok(());
    }

    let colored = !cli.no_color;

    if let Some(Commands::Stats {
        dictionary,
        buckets,
    }) = cli.command
    {
        let config = Config::load(dictionary.or(cli.dictionary), buckets.or(cli.buckets))?;
        return show_stats(&config, colored, &cli.format);
    }

    let config = Config::load(cli.dictionary.clone(), cli.buckets)?;

    if cli.texts.is_empty() {
        anyhow::bail!("No texts specified. Use --help for usage information.");
    }

    let texts = checker::collect_texts(&cli.texts)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Loading {}...", config.dictionary.display()));
    let loaded = checker::SpellChecker::new(&config);
    spinner.finish_and_clear();
    let mut checker = loaded?;

    let mut results = Vec::with_capacity(texts.len());
    for text in &texts {
        results.push(checker.check_file(text)?);
    }

    let report = checker.finish();
    let show_misspelled = config.show_misspelled && !cli.quiet;
    output::print_report(&results, &report, colored, show_misspelled, &cli.format)?;

    Ok(())
}

fn show_stats(config: &Config, colored: bool, format: &OutputFormat) -> Result<()> {
    let buckets = NonZeroUsize::new(config.buckets).context("Bucket count must be at least 1")?;
    let mut table = WordTable::with_buckets(buckets);
    table
        .try_load(&config.dictionary)
        .with_context(|| format!("Could not load {}.", config.dictionary.display()))?;

    output::print_stats(&table, colored, format)?;
    table.unload();

    Ok(())
}
