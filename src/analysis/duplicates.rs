use crate::core::Message;
use serde::Serialize;
use std::collections::HashMap;

/// Messages sharing a title with at least one other message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateGroup {
    pub title: String,
    pub messages: Vec<Message>,
}

/// Every message whose title occurs more than once, in input order.
///
/// Titles compare by exact string equality.
pub fn find_duplicate_titles(messages: &[Message]) -> Vec<&Message> {
    let frequencies = title_frequencies(messages);

    messages
        .iter()
        .filter(|message| frequencies.get(message.title.as_str()).copied().unwrap_or(0) > 1)
        .collect()
}

/// Duplicates grouped by title; groups ordered by first occurrence.
pub fn group_duplicate_titles(messages: &[Message]) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for message in find_duplicate_titles(messages) {
        match positions.get(message.title.as_str()) {
            Some(&index) => groups[index].messages.push(message.clone()),
            None => {
                positions.insert(message.title.as_str(), groups.len());
                groups.push(DuplicateGroup {
                    title: message.title.clone(),
                    messages: vec![message.clone()],
                });
            }
        }
    }

    groups
}

fn title_frequencies(messages: &[Message]) -> HashMap<&str, usize> {
    messages.iter().fold(HashMap::new(), |mut counts, message| {
        *counts.entry(message.title.as_str()).or_insert(0) += 1;
        counts
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordId;
    use pretty_assertions::assert_eq;

    fn titled(id: i64, title: &str) -> Message {
        Message::new(id, 1, title)
    }

    fn ids(messages: &[&Message]) -> Vec<RecordId> {
        messages.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn empty_input_has_no_duplicates() {
        assert!(find_duplicate_titles(&[]).is_empty());
        assert!(group_duplicate_titles(&[]).is_empty());
    }

    #[test]
    fn unique_titles_have_no_duplicates() {
        let messages = vec![titled(1, "a"), titled(2, "b"), titled(3, "c")];
        assert!(find_duplicate_titles(&messages).is_empty());
    }

    #[test]
    fn returns_every_duplicate_in_input_order() {
        let messages = vec![
            titled(1, "same"),
            titled(2, "other"),
            titled(3, "again"),
            titled(4, "same"),
            titled(5, "again"),
        ];

        let duplicates = find_duplicate_titles(&messages);

        assert_eq!(
            ids(&duplicates),
            vec![RecordId::Int(1), RecordId::Int(3), RecordId::Int(4), RecordId::Int(5)]
        );
    }

    #[test]
    fn titles_are_compared_exactly() {
        let messages = vec![titled(1, "Title"), titled(2, "title"), titled(3, "Title ")];
        assert!(find_duplicate_titles(&messages).is_empty());
    }

    #[test]
    fn groups_follow_first_occurrence() {
        let messages = vec![
            titled(1, "b"),
            titled(2, "a"),
            titled(3, "a"),
            titled(4, "b"),
            titled(5, "b"),
        ];

        let groups = group_duplicate_titles(&messages);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "b");
        assert_eq!(groups[0].messages.len(), 3);
        assert_eq!(groups[1].title, "a");
        assert_eq!(groups[1].messages[0].id, RecordId::Int(2));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn output_is_exactly_the_repeated_titles(titles in prop::collection::vec("[abc]{1,2}", 0..30)) {
            let messages: Vec<Message> = titles
                .iter()
                .enumerate()
                .map(|(i, title)| Message::new(i as i64, 0, title.as_str()))
                .collect();

            let duplicates = find_duplicate_titles(&messages);

            for message in &messages {
                let occurrences = messages.iter().filter(|m| m.title == message.title).count();
                let reported = duplicates.iter().any(|d| d.id == message.id);
                prop_assert_eq!(reported, occurrences > 1);
            }

            let positions: Vec<usize> = duplicates
                .iter()
                .map(|d| messages.iter().position(|m| m.id == d.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
