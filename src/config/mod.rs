mod core;
mod loader;

pub use self::core::{
    FetchConfig, OutputConfig, PostmapConfig, SourcesConfig, DEFAULT_POSTS_URL, DEFAULT_USERS_URL,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
