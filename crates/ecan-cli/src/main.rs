use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use ecan_core::{
    EcanConfig, EconomyEngine, GraphSnapshot, ResourceVector, StimulusContext, Task,
    export_json, import_json, now_unix_millis, run_cycle, schedule,
};
use ecan_store::Store;

#[derive(Parser)]
#[command(name = "ecan", about = "Economic attention allocation and task scheduling CLI")]
struct Cli {
    /// Ledger name under the data directory
    #[arg(long, global = true, default_value = "default")]
    state: String,

    /// TOML file overriding engine config defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and store attention for every node in a graph snapshot
    Stimulate {
        /// Graph snapshot JSON file
        graph: PathBuf,

        /// Content category hint (grants the context bonus)
        #[arg(long)]
        category: Option<String>,

        /// Task-kind hint (grants the context bonus)
        #[arg(long)]
        task_kind: Option<String>,
    },

    /// Run full economic cycles against a graph snapshot
    Cycle {
        /// Graph snapshot JSON file
        graph: PathBuf,

        /// Number of cycles to run
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Admit a task batch into an available resource budget
    Schedule {
        /// Task file: {"available": {...}, "tasks": [...]}
        tasks: PathBuf,
    },

    /// Show ledger statistics
    Stats,

    /// Export the ledger to a JSON snapshot file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Import a JSON snapshot file into the ledger
    Import {
        /// Input file path
        path: PathBuf,
    },
}

/// On-disk task batch: an available budget plus the tasks competing for it.
#[derive(Deserialize)]
struct TaskFile {
    available: ResourceVector,
    tasks: Vec<Task>,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn engine_config(cli: &Cli) -> Result<EcanConfig> {
    let Some(path) = &cli.config else {
        return Ok(EcanConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: EcanConfig =
        toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn open_store(cli: &Cli) -> Result<Store> {
    let base = ecan_store::default_base_dir();
    std::fs::create_dir_all(&base)
        .with_context(|| format!("failed to create data dir {}", base.display()))?;
    let path = base.join(format!("{}.db", cli.state));
    Store::open(&path).with_context(|| format!("failed to open ledger {}", path.display()))
}

fn load_graph(path: &Path) -> Result<GraphSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read graph {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse graph {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Stimulate {
            graph,
            category,
            task_kind,
        } => cmd_stimulate(&cli, graph, category.clone(), task_kind.clone()),
        Commands::Cycle { graph, count } => cmd_cycle(&cli, graph, *count),
        Commands::Schedule { tasks } => cmd_schedule(tasks),
        Commands::Stats => cmd_stats(&cli),
        Commands::Export { path } => cmd_export(&cli, path),
        Commands::Import { path } => cmd_import(&cli, path),
    }
}

fn cmd_stimulate(
    cli: &Cli,
    graph: &Path,
    category: Option<String>,
    task_kind: Option<String>,
) -> Result<()> {
    let store = open_store(cli)?;
    let mut system = store
        .load_system(engine_config(cli)?)
        .context("failed to load ledger")?;
    let snapshot = load_graph(graph)?;

    let context = if category.is_some() || task_kind.is_some() {
        Some(StimulusContext {
            category,
            task_kind,
        })
    } else {
        None
    };

    let written = EconomyEngine::stimulate(
        &mut system,
        &snapshot,
        context.as_ref(),
        now_unix_millis(),
    );
    store.save_system(&system).context("failed to save ledger")?;

    println!(
        "stimulated {written} nodes. entries={}, bank={:.1}",
        system.len(),
        system.attention_bank()
    );
    Ok(())
}

fn cmd_cycle(cli: &Cli, graph: &Path, count: u32) -> Result<()> {
    let store = open_store(cli)?;
    let mut system = store
        .load_system(engine_config(cli)?)
        .context("failed to load ledger")?;
    let snapshot = load_graph(graph)?;

    for i in 1..=count {
        let report = run_cycle(&mut system, &snapshot);
        println!(
            "cycle {i}: transferred={}, rent={}, wages={}, decayed={}, forgotten={}, bank={:.1}",
            report.transferred,
            report.rent_collected,
            report.wages_paid,
            report.decayed,
            report.forgotten,
            report.bank
        );
    }

    store.save_system(&system).context("failed to save ledger")?;
    println!("done. entries={}", system.len());
    Ok(())
}

fn cmd_schedule(tasks_path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(tasks_path)
        .with_context(|| format!("failed to read tasks {}", tasks_path.display()))?;
    let file: TaskFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse tasks {}", tasks_path.display()))?;

    let total = file.tasks.len();
    let result = schedule(&file.tasks, &file.available);

    for task in &result.admitted {
        println!(
            "admit {:<24} priority={:<8} cpu={} mem={} bw={} disk={}",
            task.id,
            task.priority,
            task.resources.cpu,
            task.resources.memory,
            task.resources.bandwidth,
            task.resources.storage
        );
    }
    println!(
        "admitted {}/{} tasks, utilization {:.1}%",
        result.admitted.len(),
        total,
        result.resource_utilization_percent
    );
    Ok(())
}

fn cmd_stats(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let system = store
        .load_system(engine_config(cli)?)
        .context("failed to load ledger")?;

    println!("ledger:   {}", cli.state);
    println!("entries:  {}", system.len());
    println!("bank:     {:.1}", system.attention_bank());

    let mut top: Vec<_> = system.iter().collect();
    top.sort_by(|a, b| b.1.sti.cmp(&a.1.sti));
    for (id, value) in top.into_iter().take(5) {
        println!(
            "  {id}: sti={}, lti={}, vlti={}",
            value.sti,
            value.lti,
            value.vlti as u8
        );
    }
    Ok(())
}

fn cmd_export(cli: &Cli, path: &Path) -> Result<()> {
    let store = open_store(cli)?;
    let system = store
        .load_system(engine_config(cli)?)
        .context("failed to load ledger")?;

    let json = export_json(&system).context("failed to serialize snapshot")?;
    std::fs::write(path, &json)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("exported {} entries to {}", system.len(), path.display());
    Ok(())
}

fn cmd_import(cli: &Cli, path: &Path) -> Result<()> {
    let store = open_store(cli)?;
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let system = import_json(&raw, engine_config(cli)?).context("failed to import snapshot")?;

    store.save_system(&system).context("failed to save ledger")?;
    println!(
        "imported {} entries from {}. bank={:.1}",
        system.len(),
        path.display(),
        system.attention_bank()
    );
    Ok(())
}
