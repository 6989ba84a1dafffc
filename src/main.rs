use anyhow::Result;
use clap::Parser;
use dishcovery::cli::{self, CliArgs};
use dishcovery::config::AppConfig;
use dishcovery::engine::{triggering_restrictions, Engine};
use dishcovery::errors::error_logging;
use dishcovery::localization::{self, LocalizationManager};
use dishcovery::observability;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::info;

/// Resolve ingredients given on the command line as one slot pass
fn run_arguments(engine: &Engine, args: &CliArgs) -> dishcovery::slots::SlotPass {
    engine.evaluate_slots(&args.ingredients)
}

/// Read one ingredient per line, running a slot pass after each line.
///
/// A line replaces the trailing slot: the empty slot after an accepted
/// ingredient, or the rejected text being corrected.
fn run_interactive(
    engine: &Engine,
    manager: &LocalizationManager,
    language: &str,
) -> Result<dishcovery::slots::SlotPass> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut pass = engine.evaluate_slots::<&str>(&[]);

    loop {
        write!(
            stdout,
            "{} ",
            manager.get_message_in_language("prompt-ingredient", language, None)
        )?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }

        let mut texts = pass.texts();
        match texts.last_mut() {
            Some(last) => *last = line.trim().to_string(),
            None => texts.push(line.trim().to_string()),
        }
        pass = engine.evaluate_slots(&texts);

        let typed = if pass.appended {
            pass.slots.len().saturating_sub(2)
        } else {
            pass.slots.len().saturating_sub(1)
        };
        if let Some(slot) = pass.slots.get(typed) {
            writeln!(stdout, "  {}", cli::format_slot(slot, manager, language))?;
        }
    }

    Ok(pass)
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Load environment variables from .env file first
    dotenvy::dotenv().ok();
    let started = Instant::now();

    let config = AppConfig::from_env()?;
    config.validate().inspect_err(|e| {
        error_logging::log_config_error(e, "environment", "startup_validation");
    })?;

    let metrics_handle =
        observability::init_observability_with_config(config.observability.clone())?;
    info!("{}", config.summary());

    let engine = Engine::from_config(&config.engine).map_err(|e| {
        error_logging::log_internal_error(&e, "engine", "startup");
        observability::record_error_metrics("engine_init", "startup");
        anyhow::anyhow!("Failed to initialize engine: {}", e)
    })?;
    observability::record_startup_metrics(started.elapsed());

    let manager = localization::create_localization_manager().inspect_err(|e| {
        error_logging::log_internal_error(e, "localization", "startup");
        observability::record_error_metrics("localization_init", "startup");
    })?;
    let language = cli::resolve_language(&args, &config.cli.default_language);

    let pass = if args.ingredients.is_empty() {
        run_interactive(&engine, &manager, &language)?
    } else {
        let pass = run_arguments(&engine, &args);
        for slot in &pass.slots {
            println!("  {}", cli::format_slot(slot, &manager, &language));
        }
        pass
    };

    let ingredients = pass.ingredients();
    info!(
        ingredients = ingredients.len(),
        restrictions = ?args.restrictions,
        "Assessing session"
    );
    let assessment = engine.assess(&ingredients, &args.restrictions);
    info!(
        sufficient = assessment.sufficiency.sufficient,
        ready = assessment.ready,
        triggered = ?triggering_restrictions(&assessment.restrictions.changes),
        "Assessment complete"
    );
    for line in cli::format_assessment(&assessment, &manager, &language) {
        println!("{}", line);
    }

    if args.metrics {
        if let Some(handle) = metrics_handle {
            eprintln!("{}", handle.render());
        }
    }

    Ok(())
}
