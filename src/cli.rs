use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postmap")]
#[command(about = "Join people with their posts and report duplicates, counts and nearest neighbors", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load people and posts, then report the derived views
    Analyze {
        /// People source: URL or path to a JSON array
        #[arg(long, env = "POSTMAP_USERS")]
        users: Option<String>,

        /// Posts source: URL or path to a JSON array
        #[arg(long, env = "POSTMAP_POSTS")]
        posts: Option<String>,

        /// Configuration file (defaults to the nearest .postmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Views to compute (defaults to all)
        #[arg(long = "view", value_enum, value_delimiter = ',')]
        views: Vec<ViewArg>,

        /// Output format (defaults to output.default_format from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file for json/markdown reports (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Download people and posts one after the other
        #[arg(long)]
        sequential: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ViewArg {
    /// People with their posts attached
    Joined,
    /// Posts sharing a title
    Duplicates,
    /// Post count per person
    Counts,
    /// Nearest other person by distance
    Closest,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl From<ViewArg> for crate::analysis::View {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Joined => crate::analysis::View::Joined,
            ViewArg::Duplicates => crate::analysis::View::Duplicates,
            ViewArg::Counts => crate::analysis::View::Counts,
            ViewArg::Closest => crate::analysis::View::Closest,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
