use clap::Parser;
use jackc::config::CompilerConfig;
use std::path::PathBuf;
use std::process;

/// Compile Jack source to VM instruction text.
#[derive(Debug, Parser)]
#[command(name = "jackc", version, about)]
struct Cli {
    /// A single `.jack` file, or a directory of `.jack` files.
    path: PathBuf,

    /// Emit debug-level tracing to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = CompilerConfig::new().with_trace(cli.verbose);

    match jackc::compile_path(&cli.path, &config) {
        Ok(written) => {
            for path in written {
                tracing::info!(output = %path.display(), "wrote");
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
