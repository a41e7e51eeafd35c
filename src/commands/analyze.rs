use crate::analysis::{analyze, AnalysisOptions, CountFormat, View};
use crate::config::{load_config, PostmapConfig};
use crate::core::Dataset;
use crate::io::{self, Fetcher, OutputFormat, Sources};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub users: Option<String>,
    pub posts: Option<String>,
    pub config: Option<PathBuf>,
    pub views: Vec<View>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub sequential: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let settings = resolve_settings(&config)?;
    let sources = Sources::from_config(&settings.sources)?;
    let format = resolve_format(config.format, &settings)?;
    let concurrent = settings.fetch.concurrent && !config.sequential;

    let dataset = load_dataset(&settings, &sources, concurrent)?;

    let options = build_options(&config.views, &settings);
    let report = analyze(&dataset, &options).context("Analysis failed")?;
    log::info!(
        "Analyzed {} people and {} posts",
        report.summary.people,
        report.summary.messages
    );

    let target = io::output_target(format, config.output.as_deref());
    let mut writer = io::create_writer(format, target)?;
    writer.write_report(&report)?;

    if let Some(path) = target {
        log::info!("Report written to {}", path.display());
    }
    Ok(())
}

// CLI flags override whatever the config file says
fn resolve_settings(config: &AnalyzeConfig) -> Result<PostmapConfig> {
    let mut settings = load_config(config.config.as_deref())?;
    if let Some(users) = &config.users {
        settings.sources.users = users.clone();
    }
    if let Some(posts) = &config.posts {
        settings.sources.posts = posts.clone();
    }
    Ok(settings)
}

fn resolve_format(requested: Option<OutputFormat>, settings: &PostmapConfig) -> Result<OutputFormat> {
    match requested {
        Some(format) => Ok(format),
        None => settings
            .output
            .default_format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e)),
    }
}

fn build_options(views: &[View], settings: &PostmapConfig) -> AnalysisOptions {
    let options = AnalysisOptions::default()
        .with_count_format(CountFormat::new(settings.output.count_template.clone()));
    if views.is_empty() {
        options
    } else {
        options.with_views(views.iter().copied())
    }
}

fn load_dataset(settings: &PostmapConfig, sources: &Sources, concurrent: bool) -> Result<Dataset> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let fetcher = Fetcher::new(&settings.fetch)?;

    log::debug!(
        "Loading users from {} and posts from {} ({})",
        sources.users,
        sources.posts,
        if concurrent { "concurrently" } else { "sequentially" }
    );
    Ok(runtime.block_on(fetcher.fetch_dataset(sources, concurrent))?)
}
