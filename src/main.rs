use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use configuration::{load_config, HorizonOverrides, HorizonSettings, InitialState, Logging};
use economy::{load_ecology, load_economy, Ecology, EconomyModel};
use indicatif::{ProgressBar, ProgressStyle};
use optimizer::SimplexSolver;
use planner::PlanningHorizonController;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

mod logger;
mod report;

use crate::logger::init_logger;
use crate::report::{summary_table, PlanReport};

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; RUST_LOG may come from the shell.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate(args) => {
            let _guard = init_logger(&Logging::default());
            handle_validate(args)
        }
        Commands::Plan(args) => handle_plan(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Receding-horizon planning of a multi-period economy.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the input files and report their dimensions.
    Validate(InputArgs),
    /// Optimise a plan over the configured periods.
    Plan(PlanArgs),
}

#[derive(Args)]
struct InputArgs {
    /// JSON file with the economy's time-indexed matrices.
    #[arg(long)]
    economy: PathBuf,

    /// JSON file with pollutant coefficients and limits.
    #[arg(long)]
    ecology: Option<PathBuf>,
}

#[derive(Args)]
struct PlanArgs {
    #[command(flatten)]
    input: InputArgs,

    /// TOML file with the horizon, initial state and logging settings.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    horizon: HorizonOverrides,

    /// Where to write the JSON plan report.
    #[arg(long)]
    output: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn load_inputs(args: &InputArgs) -> anyhow::Result<(EconomyModel, Option<Ecology>)> {
    let economy = load_economy(&args.economy)
        .with_context(|| format!("failed to load economy from {}", args.economy.display()))?;
    let ecology = args
        .ecology
        .as_deref()
        .map(|path: &Path| {
            load_ecology(path)
                .with_context(|| format!("failed to load ecology from {}", path.display()))
        })
        .transpose()?;
    Ok((economy, ecology))
}

fn handle_validate(args: InputArgs) -> anyhow::Result<()> {
    let (economy, ecology) = load_inputs(&args)?;
    println!(
        "Economy: {} periods, {} products, {} sectors",
        economy.periods(),
        economy.products(),
        economy.sectors()
    );
    if let Some(ecology) = ecology {
        if ecology.sectors() != economy.sectors() {
            anyhow::bail!(
                "ecology covers {} sectors, the economy has {}",
                ecology.sectors(),
                economy.sectors()
            );
        }
        println!(
            "Ecology: {} periods, {} pollutants",
            ecology.periods(),
            ecology.pollutant_kinds()
        );
    }
    Ok(())
}

fn handle_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (settings, initial_state, logging) = resolve_settings(&args)?;
    let _guard = init_logger(&logging);

    let (economy, ecology) = load_inputs(&args.input)?;
    let economy = Arc::new(economy);

    let mut controller =
        PlanningHorizonController::new(settings, economy.clone(), Box::new(SimplexSolver::new()))?;
    if let Some(ecology) = ecology {
        controller = controller.with_ecology(Arc::new(ecology))?;
    }
    let job_id = controller.job_id();
    tracing::info!(%job_id, windows = controller.windows().len(), "Planning job created.");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.set_message(format!("Solving {} planning windows...", controller.windows().len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = controller.run(initial_state.surplus.as_deref(), initial_state.export_deficit);
    let plan = match result {
        Ok(plan) => {
            spinner.finish_with_message("Plan complete!");
            plan
        }
        Err(e) => {
            spinner.abandon_with_message("Planning failed.");
            return Err(e.into());
        }
    };

    println!("{}", summary_table(&plan));

    if let Some(output) = &args.output {
        PlanReport {
            job_id,
            generated_at: Utc::now(),
            settings: controller.settings(),
            product_names: economy.product_names(),
            sector_names: economy.sector_names(),
            plan: &plan,
        }
        .write(output)
        .with_context(|| format!("failed to write report to {}", output.display()))?;
        println!("Report written to {}", output.display());
    }
    Ok(())
}

/// Config file values first, then command-line flags on top.
fn resolve_settings(args: &PlanArgs) -> anyhow::Result<(HorizonSettings, InitialState, Logging)> {
    match &args.config {
        Some(path) => {
            let config = load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            let mut horizon = config.horizon;
            args.horizon.apply(&mut horizon);
            horizon.validate()?;
            Ok((horizon, config.initial_state, config.logging))
        }
        None => {
            let horizon = args.horizon.to_settings()?;
            horizon.validate()?;
            Ok((horizon, InitialState::default(), Logging::default()))
        }
    }
}
