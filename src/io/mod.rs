pub mod fetch;
pub mod output;

pub use fetch::{parse_messages, parse_people, DataSource, Fetcher, Sources};
pub use output::{create_writer, output_target, OutputFormat, OutputWriter};

use crate::core::{Error, Result, ResultExt};
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(Error::from)
        .context(format!("Failed to write {}", path.display()))
}
