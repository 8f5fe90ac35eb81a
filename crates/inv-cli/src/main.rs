use clap::Parser;
use inv_config::GeneralConfig;

mod bootstrap;
mod cli;
mod commands;
mod exit;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("invt error: {error:#}");
        std::process::exit(exit::code_for(&error));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    ui::init(&flags);

    if let cli::Commands::Value(args) = &cli.command {
        init_tracing(&flags, None)?;
        return commands::value::handle(args, &flags);
    }

    let config = bootstrap::load_config(&flags)?;
    init_tracing(&flags, Some(&config.general))?;

    commands::dispatch::dispatch(cli.command, &config, &flags).await
}

fn init_tracing(flags: &cli::GlobalFlags, general: Option<&GeneralConfig>) -> anyhow::Result<()> {
    let level = if flags.quiet {
        "error".to_string()
    } else if flags.verbose {
        "debug".to_string()
    } else {
        general.map_or_else(|| "info".to_string(), GeneralConfig::filter_directive)
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("INVT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
