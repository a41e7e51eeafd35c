use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# Postmap Configuration

[sources]
users = "https://jsonplaceholder.typicode.com/users"
posts = "https://jsonplaceholder.typicode.com/posts"

[fetch]
timeout_secs = 30
max_retries = 2
retry_delay_ms = 500
concurrent = true

[output]
default_format = "terminal"
count_template = "{name} wrote {count} posts"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    init_config_at(&config_path, force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn init_config_at(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
