//! Core domain types for the content catalog.
//!
//! The catalog holds four collections of content items (movies, songs, books,
//! series) plus the ratings users have given them. Everything lives in memory
//! behind [`ContentStore`], which the scoring crates query through references.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a content item.
///
/// Ids are opaque strings. They are constructed once at the store boundary
/// and compared as whole values everywhere else, so upstream id formats
/// (database object ids, slugs, numeric strings) all behave the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ContentId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Unique identifier for a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for UserId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

// =============================================================================
// Content Types
// =============================================================================

/// The four kinds of content the catalog serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Song,
    Book,
    Series,
}

impl ContentType {
    /// All content types, in collection order.
    pub const ALL: [ContentType; 4] = [
        ContentType::Movie,
        ContentType::Song,
        ContentType::Book,
        ContentType::Series,
    ];

    /// The wire name of this content type ("movie", "song", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Song => "song",
            ContentType::Book => "book",
            ContentType::Series => "series",
        }
    }

    /// The name of the backing collection (and seed file stem).
    pub fn collection_name(&self) -> &'static str {
        match self {
            ContentType::Movie => "movies",
            ContentType::Song => "songs",
            ContentType::Book => "books",
            ContentType::Series => "series",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentType::Movie),
            "song" => Ok(ContentType::Song),
            "book" => Ok(ContentType::Book),
            "series" => Ok(ContentType::Series),
            other => Err(StoreError::UnknownContentType(other.to_string())),
        }
    }
}

// =============================================================================
// Content Items
// =============================================================================

/// A single catalog entry.
///
/// One struct covers all four content types; the creator fields that only
/// apply to some types (`artist`/`album` for songs, `author` for books) are
/// optional and omitted from serialized output when absent. Unknown fields
/// in seed data are ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(rename = "_id")]
    pub id: ContentId,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Mean of all ratings this item has received, maintained upstream.
    #[serde(default)]
    pub average_rating: f64,
    /// Number of ratings this item has received, maintained upstream.
    #[serde(default)]
    pub rating_count: u64,
}

// =============================================================================
// Ratings
// =============================================================================

/// A single rating a user gave to one content item.
///
/// Ratings may reference items missing from the catalog (for example when an
/// item was removed after being rated). The scoring paths tolerate and skip
/// such references rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user_id: UserId,
    pub content_type: ContentType,
    pub content_id: ContentId,
    /// Rating value from 0.0 to 5.0
    pub rating: f64,
}

// =============================================================================
// ContentStore - The Core In-Memory Database
// =============================================================================

/// Main data structure holding all catalog content and ratings.
///
/// Collections are keyed by [`ContentType`] and store items in a `BTreeMap`
/// so iteration order is deterministic (ascending by id). Ratings are
/// indexed by user for the collaborative paths.
#[derive(Debug, Default)]
pub struct ContentStore {
    /// One ordered item collection per content type
    pub(crate) collections: HashMap<ContentType, BTreeMap<ContentId, ContentItem>>,
    /// All ratings made by each user, in insertion order
    pub(crate) user_ratings: BTreeMap<UserId, Vec<Rating>>,
}

impl ContentStore {
    /// Creates a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    // Getters - these return references into the store

    /// Get a single item by content type and id
    pub fn get_item(&self, content_type: ContentType, id: &ContentId) -> Option<&ContentItem> {
        self.collections.get(&content_type)?.get(id)
    }

    /// Iterate all items of a content type, ascending by id.
    ///
    /// Yields nothing if the collection is empty or was never loaded.
    pub fn items(&self, content_type: ContentType) -> impl Iterator<Item = &ContentItem> {
        self.collections
            .get(&content_type)
            .into_iter()
            .flat_map(|collection| collection.values())
    }

    /// Number of items in one collection
    pub fn item_count(&self, content_type: ContentType) -> usize {
        self.collections
            .get(&content_type)
            .map(|collection| collection.len())
            .unwrap_or(0)
    }

    /// Get all ratings made by a user
    ///
    /// Returns an empty slice if the user has no ratings
    pub fn user_ratings(&self, user_id: &UserId) -> &[Rating] {
        self.user_ratings
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate every user that has at least one rating, with their ratings.
    ///
    /// Users are yielded in ascending id order.
    pub fn users_with_ratings(&self) -> impl Iterator<Item = (&UserId, &[Rating])> {
        self.user_ratings
            .iter()
            .map(|(user_id, ratings)| (user_id, ratings.as_slice()))
    }

    /// Iterate every rating in the store
    pub fn all_ratings(&self) -> impl Iterator<Item = &Rating> {
        self.user_ratings.values().flatten()
    }

    // Mutators - used during seed loading and by tests

    /// Insert an item into its collection, replacing any previous entry
    pub fn insert_item(&mut self, content_type: ContentType, item: ContentItem) {
        self.collections
            .entry(content_type)
            .or_default()
            .insert(item.id.clone(), item);
    }

    /// Insert a rating into the per-user index
    pub fn insert_rating(&mut self, rating: Rating) {
        self.user_ratings
            .entry(rating.user_id.clone())
            .or_default()
            .push(rating);
    }

    /// Get counts for logging/validation: (items, users, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_items = self.collections.values().map(|c| c.len()).sum();
        let total_ratings = self.user_ratings.values().map(|v| v.len()).sum();
        (total_items, self.user_ratings.len(), total_ratings)
    }
}
