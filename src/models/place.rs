// src/models/place.rs
// DOCUMENTATION: Request/response shapes for place lookups
// PURPOSE: Serialization models for destination photos and categorized search

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use validator::{Validate, ValidationError};

/// Request body for POST /api/destination-photo
#[derive(Debug, Deserialize, Validate)]
pub struct DestinationPhotoRequest {
    /// Destination name as typed by the user
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub destination: String,
}

/// Response body for a resolved destination photo
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DestinationPhotoResponse {
    /// Renderable photo URL (max width 400px)
    pub photo_url: String,
    /// Name of the place the photo belongs to
    pub place_name: String,
    /// Opaque provider reference the URL was built from
    pub photo_reference: String,
}

/// Request body for POST /api/search
/// DOCUMENTATION: `query` is the destination; `interests` drive one search each
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

impl SearchRequest {
    /// Trimmed destination ("" when absent)
    pub fn destination(&self) -> &str {
        self.query.as_deref().unwrap_or("").trim()
    }

    /// Interest labels to search, `["general"]` when none were given
    pub fn search_terms(&self) -> Vec<String> {
        match &self.interests {
            Some(interests) if !interests.is_empty() => interests.clone(),
            _ => vec![GENERAL_INTEREST.to_string()],
        }
    }
}

/// Synthetic interest used when the caller selects none
pub const GENERAL_INTEREST: &str = "general";

/// A place as returned to the front-end
/// DOCUMENTATION: Derived per call from a text search result; every key is
/// always present, absent values serialize as null
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceResult {
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub open_now: Option<bool>,
    pub photo_url: Option<String>,
    pub user_ratings_total: Option<i64>,
    pub price_level: Option<i64>,
}

/// Places grouped by interest label
/// DOCUMENTATION: Serializes as a JSON object whose keys keep the order in
/// which categories were inserted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedResults {
    categories: Vec<(String, Vec<PlaceResult>)>,
}

impl CategorizedResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append places to a category, creating it at the end if it is new.
    /// Names already present in the category are skipped.
    pub fn extend_category(&mut self, label: &str, places: Vec<PlaceResult>) {
        let index = match self.categories.iter().position(|(l, _)| l == label) {
            Some(index) => index,
            None => {
                self.categories.push((label.to_string(), Vec::new()));
                self.categories.len() - 1
            }
        };

        let existing = &mut self.categories[index].1;
        for place in places {
            if !existing.iter().any(|p| p.name == place.name) {
                existing.push(place);
            }
        }
    }

    /// Places for one category
    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&[PlaceResult]> {
        self.categories
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, places)| places.as_slice())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for CategorizedResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (label, places) in &self.categories {
            map.serialize_entry(label, places)?;
        }
        map.end()
    }
}

/// Response body for POST /api/search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: CategorizedResults,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
