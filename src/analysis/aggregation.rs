use crate::core::{JoinedPerson, RecordId};
use serde::Serialize;

pub const DEFAULT_COUNT_TEMPLATE: &str = "{name} wrote {count} posts";
pub const UNKNOWN_NAME: &str = "unknown";

/// Template for per-person post count summaries.
///
/// `{name}` expands to the person's display name and `{count}` to the number
/// of posts; any other text is copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountFormat {
    template: String,
}

impl Default for CountFormat {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT_TEMPLATE)
    }
}

impl CountFormat {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn render(&self, name: &str, count: usize) -> String {
        let mut rendered = String::with_capacity(self.template.len() + name.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{name}") {
                rendered.push_str(name);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{count}") {
                rendered.push_str(&count.to_string());
                rest = after;
            } else {
                rendered.push('{');
                rest = &tail[1..];
            }
        }

        rendered.push_str(rest);
        rendered
    }
}

/// Structured form of a post count, kept alongside the rendered summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCount {
    pub person_id: RecordId,
    pub name: String,
    pub count: usize,
    pub summary: String,
}

/// One summary line per joined person, using the default template.
pub fn count_posts(joined: &[JoinedPerson]) -> Vec<String> {
    count_posts_with(joined, &CountFormat::default())
}

pub fn count_posts_with(joined: &[JoinedPerson], format: &CountFormat) -> Vec<String> {
    tally_posts(joined, format)
        .into_iter()
        .map(|tally| tally.summary)
        .collect()
}

pub fn tally_posts(joined: &[JoinedPerson], format: &CountFormat) -> Vec<PostCount> {
    joined
        .iter()
        .map(|entry| {
            let name = entry.person.display_name().unwrap_or(UNKNOWN_NAME).to_string();
            let count = entry.post_count();
            PostCount {
                person_id: entry.person.id.clone(),
                summary: format.render(&name, count),
                name,
                count,
            }
        })
        .collect()
}
