use crate::analysis::{AnalysisReport, ClosestEntry, DuplicateGroup, PostCount};
use crate::analysis::aggregation::UNKNOWN_NAME;
use crate::core::JoinedPerson;
use colored::*;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "terminal" => Ok(OutputFormat::Terminal),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        if let Some(joined) = &report.joined {
            self.write_joined(joined)?;
        }
        if let Some(counts) = &report.post_counts {
            self.write_counts(counts)?;
        }
        if let Some(groups) = &report.duplicates {
            self.write_duplicates(groups)?;
        }
        if let Some(closest) = &report.closest {
            self.write_closest(closest)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Postmap Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| People | {} |", report.summary.people)?;
        writeln!(self.writer, "| Posts | {} |", report.summary.messages)?;
        writeln!(
            self.writer,
            "| Posts without a known author | {} |",
            report.summary.orphaned_messages
        )?;
        writeln!(
            self.writer,
            "| Posts with a duplicated title | {} |",
            report.summary.duplicate_messages
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_joined(&mut self, joined: &[JoinedPerson]) -> anyhow::Result<()> {
        writeln!(self.writer, "## People and Posts")?;
        writeln!(self.writer)?;
        for entry in joined {
            writeln!(
                self.writer,
                "- **{}** (id {}): {} posts",
                entry.person.display_name().unwrap_or(UNKNOWN_NAME),
                entry.person.id,
                entry.post_count()
            )?;
            for post in &entry.posts {
                writeln!(self.writer, "  - #{} {}", post.id, post.title)?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_counts(&mut self, counts: &[PostCount]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Post Counts")?;
        writeln!(self.writer)?;
        for count in counts {
            writeln!(self.writer, "- {}", count.summary)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_duplicates(&mut self, groups: &[DuplicateGroup]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Duplicate Titles")?;
        writeln!(self.writer)?;
        if groups.is_empty() {
            writeln!(self.writer, "No duplicated titles.")?;
        }
        for group in groups {
            let ids: Vec<String> = group.messages.iter().map(|m| format!("#{}", m.id)).collect();
            writeln!(self.writer, "- \"{}\": {}", group.title, ids.join(", "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_closest(&mut self, closest: &[ClosestEntry]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Nearest Neighbors")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Person | Nearest | Distance (km) |")?;
        writeln!(self.writer, "|--------|---------|---------------|")?;
        for entry in closest {
            writeln!(
                self.writer,
                "| {} | {} | {:.1} |",
                entry.person_name,
                entry.neighbor_name,
                entry.distance_km()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.print_header(report)?;
        if let Some(joined) = &report.joined {
            self.print_joined(joined)?;
        }
        if let Some(counts) = &report.post_counts {
            self.print_counts(counts)?;
        }
        if let Some(groups) = &report.duplicates {
            self.print_duplicates(groups)?;
        }
        if let Some(closest) = &report.closest {
            self.print_closest(closest)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Postmap Report".bold().blue())?;
        writeln!(self.writer, "{}", "==============".blue())?;
        writeln!(
            self.writer,
            "  People: {}  Posts: {}",
            report.summary.people, report.summary.messages
        )?;
        if report.summary.orphaned_messages > 0 {
            writeln!(
                self.writer,
                "  {} posts reference an unknown author",
                report.summary.orphaned_messages.to_string().yellow()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_joined(&mut self, joined: &[JoinedPerson]) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "People and posts:".bold())?;
        for entry in joined {
            writeln!(
                self.writer,
                "  {} ({} posts)",
                entry.person.display_name().unwrap_or(UNKNOWN_NAME).cyan(),
                entry.post_count()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_counts(&mut self, counts: &[PostCount]) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Post counts:".bold())?;
        for count in counts {
            writeln!(self.writer, "  {}", count.summary)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_duplicates(&mut self, groups: &[DuplicateGroup]) -> anyhow::Result<()> {
        if groups.is_empty() {
            writeln!(self.writer, "{} No duplicated titles", "✓".green())?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "{} ({} titles):",
            "Duplicate titles".yellow().bold(),
            groups.len()
        )?;
        for group in groups {
            writeln!(
                self.writer,
                "  \"{}\" x{}",
                group.title,
                group.messages.len().to_string().red()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_closest(&mut self, closest: &[ClosestEntry]) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Nearest neighbors:".bold())?;
        if closest.is_empty() {
            writeln!(self.writer, "  fewer than two people, nothing to pair")?;
        }
        for entry in closest {
            writeln!(
                self.writer,
                "  {} -> {} ({:.1} km)",
                entry.person_name,
                entry.neighbor_name.cyan(),
                entry.distance_km()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Where a report in `format` ends up: terminal reports always go to stdout.
pub fn output_target(format: OutputFormat, output: Option<&Path>) -> Option<&Path> {
    match (format, output) {
        (OutputFormat::Terminal, Some(path)) => {
            log::warn!(
                "Terminal reports are written to stdout; ignoring output file {}",
                path.display()
            );
            None
        }
        _ => output,
    }
}

/// Writer for `format`, targeting `output` or stdout.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output_target(format, output) {
        Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}
