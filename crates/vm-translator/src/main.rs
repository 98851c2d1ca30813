use clap::Parser;
use std::path::PathBuf;
use std::process;
use vmtranslate::config::TranslatorConfig;

/// Translate Nand2Tetris VM instruction text to Hack assembly.
#[derive(Debug, Parser)]
#[command(name = "vmtranslate", version, about)]
struct Cli {
    /// A single `.vm` file, or a directory of `.vm` files.
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

    let config = TranslatorConfig::new().with_trace(cli.verbose);

    match vmtranslate::translate_path(&cli.path, &config) {
        Ok(out_path) => {
            tracing::info!(output = %out_path.display(), "wrote");
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
