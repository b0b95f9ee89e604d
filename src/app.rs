//! Application orchestrator.
//! Loads/merges config, collects sources, initializes logging, installs the
//! interrupt handler, picks the gate, and runs the reorganizer.

use anyhow::{Context, Result, anyhow};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

use sweep_into::cli::{Args, read_sources};
use sweep_into::config::{Config, default_config_path, load_config_from_xml, validate_and_normalize};
use sweep_into::gate::{Confirm, DryRun, Execute, Gate};
use sweep_into::log_sink::{RunLog, TracingLog};
use sweep_into::logging::init_tracing;
use sweep_into::output as out;
use sweep_into::reorg::{self, Plan};

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    if args.print_config {
        print_config_location();
        return Ok(ExitCode::SUCCESS);
    }

    // Defaults < config file < CLI flags.
    let mut cfg = Config::default();
    let mut config_file = None;
    match load_config_from_xml() {
        Ok(Some((path, file_cfg))) => {
            file_cfg.apply(&mut cfg);
            config_file = Some(path);
        }
        Ok(None) => {}
        Err(e) => {
            out::print_error(&e.to_string());
            return Err(e).context("loading config file");
        }
    }
    args.apply_overrides(&mut cfg);

    let stdin_piped = atty::isnt(atty::Stream::Stdin);
    if cfg.sources.is_empty() && stdin_piped {
        cfg.sources = read_sources(io::stdin().lock()).context("reading source paths from stdin")?;
        if cfg.confirm && !cfg.dry_run {
            out::print_warn("Sources were read from stdin; confirmation prompts will see end of input and decline.");
        }
    }
    if cfg.sources.is_empty() {
        out::print_error("No source paths given (pass them as arguments or pipe them on stdin).");
        return Err(anyhow!("no source paths given"));
    }

    let exclusions = validate_and_normalize(&mut cfg).map_err(|e| {
        out::print_error(&e.to_string());
        anyhow::Error::new(e)
    })?;

    let log: Arc<TracingLog> = Arc::new(init_tracing(&cfg).map_err(|e| {
        out::print_error(&e.to_string());
        anyhow::Error::new(e)
    })?);

    {
        // Interrupt: flush what was logged so far, then terminate.
        let log = Arc::clone(&log);
        if let Err(e) = ctrlc::set_handler(move || {
            out::print_warn("Received interrupt; flushing logs and exiting.");
            log.flush();
            std::process::exit(130);
        }) {
            out::print_warn(&format!("Could not install interrupt handler: {e}"));
        }
    }

    debug!("Starting sweep_into: {:?}", args);
    if let Some(path) = &config_file {
        debug!("Loaded config from {}", path.display());
    }

    let plan = Plan {
        child_name: cfg.child_name.clone(),
        exclusions,
        dry_run: cfg.dry_run,
    };

    let summary = {
        let mut gate: Box<dyn Gate + '_> = if cfg.dry_run {
            Box::new(DryRun::new(io::stdout(), &*log as &dyn RunLog))
        } else if cfg.confirm {
            Box::new(Confirm::new(io::stdin().lock(), io::stderr()))
        } else {
            Box::new(Execute)
        };
        reorg::run(&cfg.sources, &plan, &*log, gate.as_mut())
    };

    log.flush();

    let line = format!(
        "Processed {} source paths: {} moved, {} failed items, {} invalid sources, {} destination failures",
        summary.processed,
        summary.moved,
        summary.failed_items,
        summary.invalid_sources,
        summary.destination_failures
    );
    if summary.has_failures() {
        out::print_warn(&line);
        if cfg.log_to_file {
            out::print_info(&format!("Details in {}", cfg.log_file.display()));
        }
    } else {
        out::print_success(&line);
    }

    if cfg.fail_on_error && summary.has_failures() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_config_location() {
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("sweep_into config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults apply.");
            }
        }
        None => out::print_error("Could not determine a config path."),
    }
}
