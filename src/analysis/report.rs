use super::aggregation::{tally_posts, CountFormat, PostCount, UNKNOWN_NAME};
use super::duplicates::{find_duplicate_titles, group_duplicate_titles, DuplicateGroup};
use super::join::{join, unmatched_messages};
use super::nearest::find_closest_pairs;
use crate::core::{Dataset, JoinedPerson, Person, RecordId, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A derived view that can be requested from [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Joined,
    Duplicates,
    Counts,
    Closest,
}

impl View {
    pub const ALL: [View; 4] = [View::Joined, View::Duplicates, View::Counts, View::Closest];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub views: BTreeSet<View>,
    pub count_format: CountFormat,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            views: View::ALL.into_iter().collect(),
            count_format: CountFormat::default(),
        }
    }
}

impl AnalysisOptions {
    pub fn with_views(mut self, views: impl IntoIterator<Item = View>) -> Self {
        self.views = views.into_iter().collect();
        self
    }

    pub fn with_count_format(mut self, count_format: CountFormat) -> Self {
        self.count_format = count_format;
        self
    }

    pub fn includes(&self, view: View) -> bool {
        self.views.contains(&view)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub people: usize,
    pub messages: usize,
    pub orphaned_messages: usize,
    pub duplicate_messages: usize,
}

/// Owned nearest-neighbor entry, ready for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosestEntry {
    pub person_id: RecordId,
    pub person_name: String,
    pub neighbor_id: RecordId,
    pub neighbor_name: String,
    pub distance_meters: f64,
}

impl ClosestEntry {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined: Option<Vec<JoinedPerson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<Vec<DuplicateGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_counts: Option<Vec<PostCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest: Option<Vec<ClosestEntry>>,
}

/// Run the requested views over a dataset.
///
/// Fails only when the nearest-neighbor view is requested and the people do
/// not carry usable positions.
pub fn analyze(
    dataset: &Dataset,
    options: &AnalysisOptions,
) -> Result<AnalysisReport, ValidationError> {
    let needs_join = options.includes(View::Joined) || options.includes(View::Counts);
    let joined = needs_join.then(|| join(&dataset.people, &dataset.messages));

    let post_counts = options
        .includes(View::Counts)
        .then(|| tally_posts(joined.as_deref().unwrap_or_default(), &options.count_format));

    let duplicates = options
        .includes(View::Duplicates)
        .then(|| group_duplicate_titles(&dataset.messages));

    let closest = if options.includes(View::Closest) {
        Some(closest_entries(&dataset.people)?)
    } else {
        None
    };

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        summary: ReportSummary {
            people: dataset.people.len(),
            messages: dataset.messages.len(),
            orphaned_messages: unmatched_messages(&dataset.people, &dataset.messages).len(),
            duplicate_messages: find_duplicate_titles(&dataset.messages).len(),
        },
        joined: joined.filter(|_| options.includes(View::Joined)),
        duplicates,
        post_counts,
        closest,
    })
}

fn closest_entries(people: &[Person]) -> Result<Vec<ClosestEntry>, ValidationError> {
    Ok(find_closest_pairs(people)?
        .into_iter()
        .map(|pair| ClosestEntry {
            person_id: pair.person.id.clone(),
            person_name: name_of(pair.person),
            neighbor_id: pair.neighbor.id.clone(),
            neighbor_name: name_of(pair.neighbor),
            distance_meters: pair.distance_meters,
        })
        .collect())
}

fn name_of(person: &Person) -> String {
    person.display_name().unwrap_or(UNKNOWN_NAME).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Message;
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                Person::new(1).with_username("Bret").with_position(51.3563, 20.6364),
                Person::new(2).with_username("Antonette").with_position(51.4519, 20.4833),
            ],
            vec![
                Message::new(1, 1, "hello"),
                Message::new(2, 2, "hello"),
                Message::new(3, 1, "bye"),
                Message::new(4, 7, "lost"),
            ],
        )
    }

    #[test]
    fn default_options_produce_every_view() {
        let report = analyze(&dataset(), &AnalysisOptions::default()).unwrap();

        assert_eq!(
            report.summary,
            ReportSummary {
                people: 2,
                messages: 4,
                orphaned_messages: 1,
                duplicate_messages: 2,
            }
        );
        assert_eq!(report.joined.as_ref().map(Vec::len), Some(2));
        assert_eq!(report.duplicates.as_ref().map(Vec::len), Some(1));

        let counts: Vec<usize> = report.post_counts.unwrap().iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![2, 1]);

        let closest = report.closest.unwrap();
        assert_eq!(closest[0].neighbor_name, "Antonette");
        assert_eq!(closest[1].neighbor_id, RecordId::Int(1));
    }

    #[test]
    fn counts_without_joined_view_omit_joined_section() {
        let options = AnalysisOptions::default().with_views([View::Counts]);

        let report = analyze(&dataset(), &options).unwrap();

        assert!(report.joined.is_none());
        assert!(report.post_counts.is_some());
        assert!(report.closest.is_none());
        assert!(report.duplicates.is_none());
    }

    #[test]
    fn closest_view_surfaces_validation_errors() {
        let mut data = dataset();
        data.people.push(Person::new(3));

        let error = analyze(&data, &AnalysisOptions::default()).unwrap_err();

        assert_eq!(
            error,
            ValidationError::MissingPosition {
                id: RecordId::Int(3)
            }
        );
    }

    #[test]
    fn other_views_ignore_missing_positions() {
        let mut data = dataset();
        data.people.push(Person::new(3));
        let options = AnalysisOptions::default().with_views([View::Joined, View::Duplicates]);

        assert!(analyze(&data, &options).is_ok());
    }

    #[test]
    fn report_serializes_without_skipped_sections() {
        let options = AnalysisOptions::default().with_views([View::Duplicates]);
        let report = analyze(&dataset(), &options).unwrap();

        let value = serde_json::to_value(&report).unwrap();

        assert!(value.get("duplicates").is_some());
        assert!(value.get("joined").is_none());
        assert_eq!(value["summary"]["people"], 2);
    }
}
