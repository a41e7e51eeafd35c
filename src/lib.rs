// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;

// Re-export commonly used types
pub use crate::core::{
    Address, Dataset, Error, Geo, JoinedPerson, Message, Person, RecordId, Result,
    ValidationError,
};

pub use crate::analysis::{
    analyze, count_posts, count_posts_with, find_closest_pairs, find_closest_users,
    find_duplicate_titles, group_duplicate_titles, haversine_distance, join, AnalysisOptions,
    AnalysisReport, CountFormat, View,
};

pub use crate::config::{load_config, PostmapConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::io::fetch::{DataSource, Fetcher, Sources};
