//! Raw listing records and the bulk collection body.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One raw listing as returned by the upstream API.
///
/// The schema is open: every field is kept as-is so aggregation can pass
/// unknown fields through to the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Listing(Map<String, Value>);

impl Listing {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    /// The listing id rendered as a string. Numeric ids are rendered in decimal.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn has_id(&self, listing_id: &str) -> bool {
        self.id().is_some_and(|id| id == listing_id)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Body of `GET /v1/listings`.
///
/// A body without a `listings` array reads as an empty collection; any other
/// top-level fields are kept so the legacy passthrough can echo them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingsPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub listings: Vec<Listing>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Listing>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Listing>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ListingsPage {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            extra: Map::new(),
        }
    }

    pub fn find(&self, listing_id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.has_id(listing_id))
    }

    pub fn into_listing(self, listing_id: &str) -> Option<Listing> {
        self.listings.into_iter().find(|l| l.has_id(listing_id))
    }
}
