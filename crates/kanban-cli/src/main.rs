mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "kanban", &mut std::io::stdout());
        return Ok(());
    }

    let mut ctx = match CliContext::load(cli.dir, cli.config).await {
        Ok(ctx) => ctx,
        Err(e) => output::output_error(&format!("{:#}", e)),
    };

    let result = run(&mut ctx, cli.command).await;

    // Flush even when the command failed; earlier actions may still be pending
    let saved = ctx.finish().await;

    match (result, saved) {
        (Ok(data), Ok(report)) => {
            tracing::debug!("Saved {} time(s)", report.saved);
            output::output_success(data);
        }
        (Err(e), _) | (Ok(_), Err(e)) => output::output_error(&format!("{:#}", e)),
    }

    Ok(())
}

async fn run(ctx: &mut CliContext, command: Commands) -> anyhow::Result<Value> {
    match command {
        Commands::Task(task_cmd) => handlers::task::handle(ctx, task_cmd.action),
        Commands::List(args) => handlers::list::handle(ctx, args),
        Commands::Replay => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            handlers::replay::handle(ctx, stdin).await
        }
        Commands::Completions { .. } => anyhow::bail!("completions do not read the board"),
    }
}

fn init_logging() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}
