//! Owned data types exchanged with the review backend.
//!
//! Field names follow the backend's JSON wire format; Rust names are snake_case
//! with `#[serde(rename)]` where the two differ.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Deserializes `null` as `T::default()` instead of failing.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Artwork lists may contain `null` slots; drop them.
fn present_urls<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(de)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

/// One application returned by the search collaborator. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Store identifier. The primary identity of the item when present.
    #[serde(rename = "trackId", default)]
    pub external_id: Option<i64>,
    /// Internal (store) name; second in the identifier fallback chain.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Artwork URLs, largest-first order as delivered.
    #[serde(default, deserialize_with = "present_urls")]
    pub images: Vec<String>,
    /// Aggregate store rating in `[0, 5]`, if the store has one.
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Stable identity of a selectable item.
///
/// Produced by [`crate::controller::selection::derive_item_id`]; every
/// selected item has exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemId {
    /// The backend's numeric `trackId`.
    External(i64),
    /// Derived from the item's internal name.
    Named(String),
    /// Synthetic id; not stable across restarts.
    Surrogate(Uuid),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::External(id) => write!(f, "{id}"),
            ItemId::Named(name) => f.write_str(name),
            ItemId::Surrogate(uuid) => write!(f, "{uuid}"),
        }
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            ItemId::External(id) => ser.serialize_i64(*id),
            other => ser.collect_str(other),
        }
    }
}

/// The item currently open in the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedItem {
    pub id: ItemId,
    pub item: SearchResult,
}

/// Client-held review form state. Never cleared by a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewDraft {
    pub overall_rating: f64,
    pub value_rating: f64,
    pub ad_rating: f64,
    pub effort_rating: f64,
    pub enjoyment_rating: f64,
    pub offer_amount: f64,
    pub comment: String,
}

/// POST `/reviews` body: item identity and descriptive fields plus the draft.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSubmission {
    #[serde(rename = "game_trackId")]
    pub item_id: ItemId,
    pub name: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    /// Last-known aggregate rating; serialised as `null` when absent.
    pub rating: Option<f64>,
    #[serde(flatten)]
    pub draft: ReviewDraft,
}

impl ReviewSubmission {
    /// Combines the selected item's identity with every draft field.
    pub fn new(selected: &SelectedItem, draft: &ReviewDraft) -> Self {
        let item = &selected.item;
        Self {
            item_id: selected.id.clone(),
            name: item.name.clone().unwrap_or_default(),
            title: item.title.clone(),
            description: item.description.clone(),
            images: item.images.clone(),
            rating: item.rating,
            draft: draft.clone(),
        }
    }
}

/// A persisted review as returned by GET `/reviews/{id}`. Immutable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewRecord {
    pub overall_rating: f64,
    pub value_rating: f64,
    pub ad_rating: f64,
    pub effort_rating: f64,
    pub enjoyment_rating: f64,
    pub offer_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    /// Naive UTC ISO-8601 timestamp as written by the backend.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl ReviewRecord {
    /// Renders `created_at` in the local timezone, or the raw text if it does
    /// not parse.
    pub fn created_at_local(&self) -> String {
        chrono::NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| {
                naive
                    .and_utc()
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

/// Login/register form contents. Sent as a form for login, JSON for register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Which credential exchange the auth form performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn label(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_tolerates_nulls() {
        let raw = r#"{
            "trackId": 42,
            "name": "Chess",
            "title": null,
            "description": "Play chess",
            "images": ["a.png", null, "c.png"],
            "rating": null
        }"#;
        let result: SearchResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.external_id, Some(42));
        assert_eq!(result.title, "");
        assert_eq!(result.images, vec!["a.png", "c.png"]);
        assert_eq!(result.rating, None);
    }

    #[test]
    fn submission_flattens_draft_and_keeps_numeric_id() {
        let selected = SelectedItem {
            id: ItemId::External(7),
            item: SearchResult {
                external_id: Some(7),
                name: Some("chess".into()),
                title: "Chess".into(),
                description: "d".into(),
                images: vec!["i.png".into()],
                rating: None,
            },
        };
        let draft = ReviewDraft { overall_rating: 4.5, comment: "fun".into(), ..Default::default() };
        let json = serde_json::to_value(ReviewSubmission::new(&selected, &draft)).unwrap();
        assert_eq!(json["game_trackId"], 7);
        assert_eq!(json["overall_rating"], 4.5);
        assert_eq!(json["comment"], "fun");
        assert!(json["rating"].is_null());
    }

    #[test]
    fn named_id_serialises_as_string() {
        let json = serde_json::to_value(ItemId::Named("chess".into())).unwrap();
        assert_eq!(json, "chess");
    }

    #[test]
    fn unparseable_timestamp_falls_back_to_raw() {
        let record = ReviewRecord {
            overall_rating: 1.0,
            value_rating: 1.0,
            ad_rating: 1.0,
            effort_rating: 1.0,
            enjoyment_rating: 1.0,
            offer_amount: 0.0,
            comment: String::new(),
            created_at: "yesterday".into(),
        };
        assert_eq!(record.created_at_local(), "yesterday");
    }
}
