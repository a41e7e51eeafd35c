use crate::core::{JoinedPerson, Message, Person, RecordId};

/// Attach to every person the posts they authored.
///
/// People keep their input order and none are dropped; each person's posts
/// keep the order they had in `messages`. Nested scan, O(people × messages).
pub fn join(people: &[Person], messages: &[Message]) -> Vec<JoinedPerson> {
    people
        .iter()
        .map(|person| JoinedPerson::new(person.clone(), authored_by(&person.id, messages)))
        .collect()
}

/// Messages whose author matches none of `people`.
pub fn unmatched_messages<'a>(people: &[Person], messages: &'a [Message]) -> Vec<&'a Message> {
    messages
        .iter()
        .filter(|message| !people.iter().any(|person| person.id == message.user_id))
        .collect()
}

fn authored_by(author: &RecordId, messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .filter(|message| &message.user_id == author)
        .cloned()
        .collect()
}
