use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Canonical record identifier.
///
/// Source data mixes numeric and string identifiers (`1` and `"1"` refer to
/// the same record). Both are normalized here, at the deserialization
/// boundary, so the rest of the crate can rely on exact equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Normalize a textual identifier: decimal integers become `Int`.
    pub fn from_text(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(value) => RecordId::Int(value),
            Err(_) => RecordId::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(value) => write!(f, "{value}"),
            RecordId::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Int(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::from_text(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Int(value) => Ok(RecordId::Int(value)),
            // i64::MAX as f64 rounds up to 2^63, which is already out of range
            RawId::Float(value)
                if value.fract() == 0.0
                    && value >= i64::MIN as f64
                    && value < i64::MAX as f64 =>
            {
                Ok(RecordId::Int(value as i64))
            }
            RawId::Float(value) => Err(D::Error::custom(format!(
                "identifier {value} is not an integer in range"
            ))),
            RawId::Text(value) => Ok(RecordId::from_text(&value)),
        }
    }
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(deserialize_with = "deserialize_degrees")]
    pub lat: f64,
    #[serde(deserialize_with = "deserialize_degrees")]
    pub lng: f64,
}

impl Geo {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within ±90° latitude / ±180° longitude.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }
}

// Coordinates arrive either as JSON numbers or as numeric strings.
fn deserialize_degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDegrees {
        Number(f64),
        Text(String),
    }

    match RawDegrees::deserialize(deserializer)? {
        RawDegrees::Number(value) => Ok(value),
        RawDegrees::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("invalid coordinate {text:?}: {e}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

/// A person record as delivered by the users endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Person {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            username: None,
            email: None,
            address: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, lat: f64, lng: f64) -> Self {
        self.address.get_or_insert_with(Address::default).geo = Some(Geo::new(lat, lng));
        self
    }

    /// Username, falling back to the full name.
    pub fn display_name(&self) -> Option<&str> {
        self.username.as_deref().or(self.name.as_deref())
    }

    pub fn position(&self) -> Option<Geo> {
        self.address.as_ref().and_then(|address| address.geo)
    }
}

/// A post; `user_id` references its author but is not guaranteed to match
/// any known person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: RecordId,
    pub user_id: RecordId,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Message {
    pub fn new(
        id: impl Into<RecordId>,
        user_id: impl Into<RecordId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: title.into(),
            body: String::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A person together with the posts they authored, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedPerson {
    #[serde(flatten)]
    pub person: Person,
    pub posts: Vec<Message>,
}

impl JoinedPerson {
    pub fn new(person: Person, posts: Vec<Message>) -> Self {
        Self { person, posts }
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }
}

/// Both input collections, fully materialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub people: Vec<Person>,
    pub messages: Vec<Message>,
}

impl Dataset {
    pub fn new(people: Vec<Person>, messages: Vec<Message>) -> Self {
        Self { people, messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn numeric_and_string_ids_normalize_to_the_same_value() {
        let from_number: RecordId = serde_json::from_str("7").unwrap();
        let from_string: RecordId = serde_json::from_str("\"7\"").unwrap();
        let padded: RecordId = serde_json::from_str("\" 7 \"").unwrap();

        assert_eq!(from_number, RecordId::Int(7));
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, padded);
    }

    #[test]
    fn non_numeric_string_ids_stay_textual() {
        let id: RecordId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(id, RecordId::Text("abc-1".to_string()));
        assert_eq!(id.to_string(), "abc-1");
    }

    #[test]
    fn integral_float_ids_are_accepted() {
        let id: RecordId = serde_json::from_str("3.0").unwrap();
        assert_eq!(id, RecordId::Int(3));
        assert!(serde_json::from_str::<RecordId>("3.5").is_err());
    }

    #[test]
    fn out_of_range_numeric_ids_are_rejected() {
        assert!(serde_json::from_str::<RecordId>("9223372036854775808").is_err());
        assert!(serde_json::from_str::<RecordId>("1e19").is_err());
        assert_eq!(
            serde_json::from_str::<RecordId>("-9223372036854775808").unwrap(),
            RecordId::Int(i64::MIN)
        );
    }

    #[test]
    fn parses_jsonplaceholder_user() {
        let json = indoc! {r#"
            {
              "id": 1,
              "name": "Leanne Graham",
              "username": "Bret",
              "email": "Sincere@april.biz",
              "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
              },
              "phone": "1-770-736-8031 x56442",
              "website": "hildegard.org"
            }
        "#};

        let person: Person = serde_json::from_str(json).unwrap();

        assert_eq!(person.id, RecordId::Int(1));
        assert_eq!(person.display_name(), Some("Bret"));
        assert_eq!(person.position(), Some(Geo::new(-37.3159, 81.1496)));
    }

    #[test]
    fn person_without_address_has_no_position() {
        let person: Person = serde_json::from_str(r#"{"id": 2, "name": "Ervin"}"#).unwrap();
        assert_eq!(person.position(), None);
        assert_eq!(person.display_name(), Some("Ervin"));
    }

    #[test]
    fn invalid_coordinate_string_is_rejected() {
        let result = serde_json::from_str::<Geo>(r#"{"lat": "north", "lng": 1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn parses_message_with_camel_case_author() {
        let json = r#"{"userId": "1", "id": 1, "title": "sunt aut", "body": "quia"}"#;
        let message: Message = serde_json::from_str(json).unwrap();

        assert_eq!(message.user_id, RecordId::Int(1));
        assert_eq!(message.title, "sunt aut");
    }

    #[test]
    fn joined_person_serializes_flat_with_posts() {
        let joined = JoinedPerson::new(
            Person::new(1).with_username("Bret"),
            vec![Message::new(10, 1, "hello")],
        );

        let value = serde_json::to_value(&joined).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["username"], "Bret");
        assert_eq!(value["posts"][0]["userId"], 1);
    }

    #[test]
    fn geo_validity_checks_ranges() {
        assert!(Geo::new(51.4, 20.6).is_valid());
        assert!(!Geo::new(91.0, 0.0).is_valid());
        assert!(!Geo::new(0.0, -180.5).is_valid());
        assert!(!Geo::new(f64::NAN, 0.0).is_valid());
    }
}
