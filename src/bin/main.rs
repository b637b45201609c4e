use anyhow::{Context, Result};
use beygja_core::config::Config;
use beygja_core::core::codes::CodeMapper;
use beygja_core::import::{import_syllables, import_words};
use beygja_core::report::Report;
use beygja_core::store::Store;
use beygja_core::VerbEngine;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "beygja", version, about = "DIM import and weak verb paradigm checks")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate DIM verb tags into verb codes
    Code {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Import a DIM export into a store snapshot
    Import {
        /// DIM CSV file (Kristínarsnið)
        dim: PathBuf,
        #[arg(long)]
        store: PathBuf,
        /// Leading lines to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,
        /// `id;syllables` file of stem syllable counts
        #[arg(long)]
        syllables: Option<PathBuf>,
    },
    /// Compare recorded weak verb paradigms with predicted ones
    Verbs {
        #[arg(long)]
        store: PathBuf,
        /// Fail cells holding variants the prediction does not explain
        #[arg(long)]
        strict: bool,
        /// Only analyze headwords matching this pattern
        #[arg(long)]
        filter: Option<String>,
        /// Mixed verb endings, one per line
        #[arg(long)]
        mixed: Option<PathBuf>,
        /// Ignore forms graded above this
        #[arg(long)]
        max_grade: Option<u8>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn run_code(tags: &[String]) -> Result<()> {
    let mut mapper = CodeMapper::new();
    for tag in tags {
        let mapped = mapper.map_tag(tag).with_context(|| format!("cannot map {tag:?}"))?;
        println!("{tag}\t{}\t{}", mapped.code, mapped.order);
    }
    Ok(())
}

fn run_import(
    config: &Config,
    dim: &Path,
    store_path: &Path,
    skip: usize,
    syllables: Option<&Path>,
) -> Result<()> {
    let mut store = Store::load_or_new(store_path)
        .with_context(|| format!("cannot load store {}", store_path.display()))?;
    let mut mapper = CodeMapper::new();

    let summary = import_words(open(dim)?, skip, &mut store, &mut mapper, config.progress_interval())
        .with_context(|| format!("import of {} aborted", dim.display()))?;
    log::info!(
        "Imported {} rows: {} new words, {} verb forms",
        summary.rows,
        summary.words,
        summary.verb_forms
    );

    if let Some(path) = syllables {
        let applied = import_syllables(open(path)?, &mut store)
            .with_context(|| format!("syllable import of {} aborted", path.display()))?;
        log::info!("Applied {applied} syllable counts");
    }

    store
        .save(store_path)
        .with_context(|| format!("cannot save store {}", store_path.display()))?;
    Ok(())
}

fn run_verbs(config: &Config, store_path: &Path, filter: Option<&str>, json: bool) -> Result<()> {
    let store = Store::load(store_path)
        .with_context(|| format!("cannot load store {}", store_path.display()))?;
    let filter = filter.map(Regex::new).transpose().context("invalid --filter pattern")?;

    let mut engine = VerbEngine::new(config.strict);
    if let Some(path) = &config.mixed_verbs {
        engine = engine
            .load_mixed_verbs(path)
            .context("cannot load mixed verb list")?;
    }
    let paradigm_filter = config.paradigm_filter();

    let mut report = Report::new(config.strict);
    for word in store.verbs() {
        if filter.as_ref().is_some_and(|re| !re.is_match(&word.headword)) {
            continue;
        }
        let paradigm = store.collated_paradigm(word.id, &paradigm_filter, engine.collator())?;
        let syllables = word.syllables.unwrap_or(config.default_syllables);
        let outcome = engine.analyze(&word.headword, usize::from(syllables), &paradigm);
        report.record(&word.headword, word.external_id, outcome);
    }

    let stdout = io::stdout().lock();
    if json {
        report.write_json(stdout)?;
        println!();
    } else {
        report.write_text(stdout)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(cli.config.as_deref()).context("cannot load config")?;

    match cli.command {
        Command::Code { tags } => run_code(&tags),
        Command::Import {
            dim,
            store,
            skip,
            syllables,
        } => run_import(&config, &dim, &store, skip, syllables.as_deref()),
        Command::Verbs {
            store,
            strict,
            filter,
            mixed,
            max_grade,
            json,
        } => {
            config.strict |= strict;
            if mixed.is_some() {
                config.mixed_verbs = mixed;
            }
            if max_grade.is_some() {
                config.max_grade = max_grade;
            }
            run_verbs(&config, &store, filter.as_deref(), json)
        }
    }
}
