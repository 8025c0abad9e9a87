//! policy-push CLI
//!
//! Usage: policy-push push <POLICY_GROUP> [POLICYFILE]
//!
//! Exit code is 0 on success and 1 on any failure.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use policy_push::config::{self, Config, ConfigWarning};
use policy_push::domain::ports::PushEventSink;
use policy_push::infrastructure::JsonEventSink;
use policy_push::presentation::{
    build_options, create_push_use_case, render_error, render_other_error, Cli, Commands,
    ConsoleEventSink, OutputFormat, PushArgs,
};
use policy_push::PushError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = OutputFormat::from_json_flag(cli.json);
    let unicode = io::stderr().is_terminal();

    let result = match &cli.command {
        Commands::Push(args) => cmd_push(&cli, args, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, format, unicode);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("policy_push={}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn cmd_push(cli: &Cli, args: &PushArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(cli, args, format)?;
    let options = build_options(config, args)
        .with_context(|| format!("invalid policy group '{}'", args.policy_group))?;

    let events: Arc<dyn PushEventSink> = match format {
        OutputFormat::Json => Arc::new(JsonEventSink::stdout()),
        OutputFormat::Text => Arc::new(ConsoleEventSink::stderr(cli.verbose)),
    };

    let use_case = create_push_use_case(options).with_events(events);
    use_case.run()?;
    Ok(())
}

fn load_config(cli: &Cli, args: &PushArgs, format: OutputFormat) -> Result<Config> {
    let (config, warnings) = match &cli.config {
        Some(path) => {
            let (config, warnings) = config::load_with_warnings(path)?;
            let config = config::with_env_overrides(config, |key| std::env::var(key).ok());
            (config, warnings)
        }
        None => config::load_or_default(Some(args.root.as_path()))?,
    };

    print_config_warnings(&warnings, format);
    Ok(config)
}

fn print_config_warnings(warnings: &[ConfigWarning], format: OutputFormat) {
    for warning in warnings {
        match format {
            OutputFormat::Json => {
                let event = serde_json::json!({
                    "event": "warning",
                    "command": "push",
                    "message": warning.to_string(),
                });
                println!("{}", event);
            }
            OutputFormat::Text => eprintln!("warning: {}", warning),
        }
    }
}

fn report_error(err: &anyhow::Error, format: OutputFormat, unicode: bool) {
    if format == OutputFormat::Json {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let event = serde_json::json!({
            "event": "error",
            "command": "push",
            "message": err.to_string(),
            "causes": causes,
        });
        println!("{}", event);
        return;
    }

    let rendered = match err.downcast_ref::<PushError>() {
        Some(push) => render_error(push, unicode),
        None => render_other_error(err, unicode),
    };
    eprint!("{}", rendered);
}
