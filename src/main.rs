use anyhow::Result;
use postmap::cli::{Cli, Commands};
use postmap::commands::{self, AnalyzeConfig};

fn main() -> Result<()> {
    let cli = postmap::cli::parse_args();
    init_logging(verbosity_of(&cli));

    match cli.command {
        Commands::Analyze {
            users,
            posts,
            config,
            views,
            format,
            output,
            sequential,
            verbosity: _,
        } => commands::handle_analyze(AnalyzeConfig {
            users,
            posts,
            config,
            views: views.into_iter().map(Into::into).collect(),
            format: format.map(Into::into),
            output,
            sequential,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

// Pure function to read the verbosity flag
fn verbosity_of(cli: &Cli) -> u8 {
    match cli.command {
        Commands::Analyze { verbosity, .. } => verbosity,
        Commands::Init { .. } => 0,
    }
}

// Pure function to map -v counts onto a default log level
fn default_log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

// RUST_LOG, when set, wins over the -v flags
fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(default_log_level(verbosity))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
