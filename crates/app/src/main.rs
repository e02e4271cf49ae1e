mod commands;

use clap::Parser;

/// Inspect and edit line-oriented files far larger than memory.
#[derive(Parser, Debug)]
#[command(name = "bigedit")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: commands::Command,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Dedicated worker threads; 0 shares the global pool.
    #[arg(long, default_value_t = 0, global = true)]
    threads: usize,

    /// Lines between line-index checkpoints.
    #[arg(long, default_value_t = editor_core::config::DEFAULT_INDEX_STRIDE, global = true)]
    index_stride: usize,
}

impl Args {
    fn engine_config(&self) -> editor_core::EngineConfig {
        editor_core::EngineConfig::default()
            .with_worker_threads(self.threads)
            .with_index_stride(self.index_stride)
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<std::process::ExitCode> {
    let args = Args::parse();

    init_tracing(args.verbose);

    let config = args.engine_config();
    let stdout = std::io::stdout();
    let found = commands::run(&args.command, config, &mut stdout.lock())?;

    Ok(if found {
        std::process::ExitCode::SUCCESS
    } else {
        std::process::ExitCode::FAILURE
    })
}
