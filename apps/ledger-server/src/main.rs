use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use library_ledger::api::command::handle_line;
use library_ledger::client::LibraryApi;
use library_ledger::config::LibraryConfig;
use library_ledger::module::MODULE_NAME;
use library_ledger::LibraryLedger;
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Ledger Server - library lending ledger driven by JSON request lines
#[derive(Parser)]
#[command(name = "ledger-server")]
#[command(about = "Ledger Server - library lending ledger driven by JSON request lines")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve requests, one JSON object per line, until end of input
    Run {
        /// Read requests from this file instead of stdin
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Ledger server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run { script: None }) {
        Commands::Run { script } => run_ledger(config, script).await,
        Commands::Check => check_config(config),
    }
}

async fn run_ledger(config: AppConfig, script: Option<PathBuf>) -> Result<()> {
    let ledger_cfg: LibraryConfig = config.module_config(MODULE_NAME)?;
    let ledger = LibraryLedger::init(&ledger_cfg);
    let client = ledger.client();

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match script {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            tracing::info!("Reading requests from {}", path.display());
            Box::new(BufReader::new(file))
        }
        None => {
            tracing::info!("Reading requests from stdin");
            Box::new(BufReader::new(tokio::io::stdin()))
        }
    };

    let handled = serve_lines(client.as_ref(), reader, tokio::io::stdout()).await?;
    tracing::info!("Ledger server finished after {} requests", handled);
    Ok(())
}

/// Answer each non-blank request line with one response line, in order.
async fn serve_lines<R, W>(api: &dyn LibraryApi, reader: R, mut out: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0;

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read request line")?
    {
        let request = line.trim();
        if request.is_empty() {
            continue;
        }

        let response = handle_line(api, request).await;
        out.write_all(response.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
        handled += 1;
    }

    Ok(handled)
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let ledger_cfg: LibraryConfig = config.module_config(MODULE_NAME)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("home_dir: {}", config.server.home_dir);
    match ledger_cfg.max_name_length {
        Some(max) => println!("{MODULE_NAME}.max_name_length: {max}"),
        None => println!("{MODULE_NAME}.max_name_length: unbounded"),
    }

    Ok(())
}
