// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

use crate::catalog::{self, CatalogSnapshot, DumpCatalogSource, build_from};
use crate::config::options::AppOptions;
use crate::progress::Progress;
use crate::runner;

#[derive(Parser, Debug)]
#[command(name = "dex_scrape", version)]
#[command(about = "Assign persistent evolving collectibles to roster participants", long_about = None)]
pub struct Cli {
    /// TOML config file; missing means defaults
    #[arg(short, long, global = true, default_value = "dex_scrape.toml")]
    pub config: PathBuf,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the species catalog from a dump and write the snapshot
    BuildCatalog {
        #[arg(long)]
        dump: Option<PathBuf>,
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Run one scrape cycle
    Run(RunArgs),
    /// Print catalog counts and fingerprint
    ShowCatalog {
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Saved roster page or http:// URL
    #[arg(long)]
    pub roster: Option<String>,
    #[arg(long)]
    pub dump: Option<PathBuf>,
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Ignore the cached snapshot
    #[arg(long)]
    pub rebuild_catalog: bool,
    /// Assignment store file
    #[arg(long)]
    pub store: Option<PathBuf>,
    /// Participant records file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Seed for first-sighting draws
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RunArgs {
    /// Command-line values win over the config file.
    pub fn apply(self, opts: &mut AppOptions) {
        if let Some(v) = self.roster { opts.roster = v; }
        if let Some(v) = self.dump { opts.catalog.dump_path = v; }
        if let Some(v) = self.snapshot { opts.catalog.snapshot_path = v; }
        if self.rebuild_catalog { opts.catalog.rebuild = true; }
        if let Some(v) = self.store { opts.store.assignments_path = v; }
        if let Some(v) = self.out { opts.store.records_path = v; }
        if self.seed.is_some() { opts.seed = self.seed; }
    }
}

/// Status lines on stderr.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Processing {total} roster rows");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, _name: &str, _score: u32) {
        self.done += 1;
    }

    fn finish(&mut self) {
        eprintln!("{} of {} rows produced a record", self.done, self.total);
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut opts = AppOptions::load(&cli.config)
        .wrap_err_with(|| format!("loading config {}", cli.config.display()))?;
    if cli.verbose {
        opts.log_level = s!("debug");
    }
    crate::log::init(&opts.log_level, Some(&AppOptions::log_path()));

    match cli.command {
        Command::BuildCatalog { dump, snapshot } => {
            let dump = dump.unwrap_or(opts.catalog.dump_path);
            let snapshot = snapshot.unwrap_or(opts.catalog.snapshot_path);
            let catalog = build_from(&DumpCatalogSource::open(&dump)?)?;
            catalog.ensure_usable()?;
            CatalogSnapshot::of(&catalog).save(&snapshot)?;
            println!(
                "Wrote {} ({} paths, {} elite, fingerprint {:016x})",
                snapshot.display(),
                catalog.paths().len(),
                catalog.elite().len(),
                catalog.fingerprint()
            );
        }
        Command::Run(args) => {
            args.apply(&mut opts);
            let mut progress = ConsoleProgress::default();
            let summary = runner::run(&opts, Some(&mut progress))?;
            if let Some(ev) = &summary.reset {
                println!("Reset: {} dropped from {} to 0", ev.key, ev.previous);
            }
            println!(
                "Wrote {} records to {} ({} participants tracked)",
                summary.records_written,
                opts.store.records_path.display(),
                summary.tracked
            );
        }
        Command::ShowCatalog { snapshot } => {
            if let Some(v) = snapshot {
                opts.catalog.snapshot_path = v;
            }
            let catalog = catalog::load_or_build(&opts.catalog)?;
            println!("species      {}", catalog.species_count());
            println!("paths        {}", catalog.paths().len());
            println!("elite paths  {}", catalog.elite_paths().len());
            println!("elite        {}", catalog.elite().len());
            println!("fingerprint  {:016x}", catalog.fingerprint());
        }
    }
    Ok(())
}
