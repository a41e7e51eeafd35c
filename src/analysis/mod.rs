//! Pure analyses over people and their posts.
//!
//! Nothing here performs I/O or logs. Each function takes fully materialized
//! collections and returns a new derived collection, so all of them are safe
//! to call concurrently.
//!
//! - [`join`] attaches authored posts to every person
//! - [`find_duplicate_titles`] finds posts sharing a title
//! - [`count_posts`] renders per-person post counts
//! - [`find_closest_users`] pairs every person with the nearest other person
//!
//! [`analyze`] composes them into an [`AnalysisReport`].

pub mod aggregation;
pub mod duplicates;
pub mod geo;
pub mod join;
pub mod nearest;
pub mod report;

pub use aggregation::{count_posts, count_posts_with, tally_posts, CountFormat, PostCount};
pub use duplicates::{find_duplicate_titles, group_duplicate_titles, DuplicateGroup};
pub use geo::{haversine_distance, EARTH_RADIUS_METERS};
pub use join::{join, unmatched_messages};
pub use nearest::{find_closest_pairs, find_closest_users, NeighborPair};
pub use report::{analyze, AnalysisOptions, AnalysisReport, ClosestEntry, ReportSummary, View};
