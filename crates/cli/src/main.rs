use clap::Parser;
use whittle_cli::commands::{Cmd, Command};

/// Whittle CLI
///
/// Whittle shrinks a source artifact that triggers an observable
/// condition (a crash matching a pattern, a postcondition failing, an
/// external verifier rejecting) down to a locally minimal version that
/// still triggers it, by delta-debugging the artifact at rule, line,
/// token-edit and character granularity.
#[derive(Parser)]
#[command(name = "whittle")]
#[command(about = "Whittle: delta-debugging test case reducer")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

/// Runs the Whittle CLI with the provided arguments.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .init();

    let cli = Cli::parse();
    cli.command.execute().await
}
