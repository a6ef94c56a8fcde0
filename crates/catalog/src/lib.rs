//! # Catalog Crate
//!
//! In-memory catalog of content items and user ratings, loaded from JSON
//! seed files.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (ContentItem, Rating, ContentStore)
//! - **seed**: Parse JSON seed files into Rust structs
//! - **store**: Load a full store from a seed directory and validate it
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{ContentStore, ContentType, UserId};
//! use std::path::Path;
//!
//! // Load the entire catalog
//! let store = ContentStore::load_from_dir(Path::new("demos/seed"))?;
//!
//! // Query data
//! let movies: Vec<_> = store.items(ContentType::Movie).collect();
//! let ratings = store.user_ratings(&UserId::new("u1"));
//!
//! println!("{} movies, user u1 rated {} items", movies.len(), ratings.len());
//! ```

// Public modules
pub mod error;
pub mod seed;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Result, StoreError};
pub use types::{ContentId, ContentItem, ContentStore, ContentType, Rating, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(id: &str, title: &str) -> ContentItem {
        ContentItem {
            id: ContentId::new(id),
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
            description: None,
            artist: None,
            album: None,
            author: None,
            average_rating: 4.0,
            rating_count: 10,
        }
    }

    #[test]
    fn test_content_store_creation() {
        let store = ContentStore::new();
        let (items, users, ratings) = store.counts();

        assert_eq!(items, 0);
        assert_eq!(users, 0);
        assert_eq!(ratings, 0);
    }

    #[test]
    fn test_insert_and_get_item() {
        let mut store = ContentStore::new();
        store.insert_item(ContentType::Book, test_item("b1", "Dune"));

        let retrieved = store
            .get_item(ContentType::Book, &ContentId::new("b1"))
            .unwrap();
        assert_eq!(retrieved.title, "Dune");

        // Same id under a different content type is a different item
        assert!(store.get_item(ContentType::Movie, &ContentId::new("b1")).is_none());
    }

    #[test]
    fn test_items_iterate_in_id_order() {
        let mut store = ContentStore::new();
        store.insert_item(ContentType::Movie, test_item("m3", "Third"));
        store.insert_item(ContentType::Movie, test_item("m1", "First"));
        store.insert_item(ContentType::Movie, test_item("m2", "Second"));

        let ids: Vec<&str> = store
            .items(ContentType::Movie)
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_insert_rating() {
        let mut store = ContentStore::new();
        store.insert_rating(Rating {
            user_id: UserId::new("u1"),
            content_type: ContentType::Movie,
            content_id: ContentId::new("m1"),
            rating: 5.0,
        });

        let ratings = store.user_ratings(&UserId::new("u1"));
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].rating, 5.0);
        assert_eq!(ratings[0].content_type, ContentType::Movie);
    }

    #[test]
    fn test_empty_queries() {
        let store = ContentStore::new();

        assert!(store.get_item(ContentType::Song, &ContentId::new("nope")).is_none());
        assert!(store.user_ratings(&UserId::new("nobody")).is_empty());
        assert_eq!(store.items(ContentType::Series).count(), 0);
        assert_eq!(store.item_count(ContentType::Book), 0);
    }

    #[test]
    fn test_content_type_parsing() {
        assert_eq!("movie".parse::<ContentType>().unwrap(), ContentType::Movie);
        assert_eq!("series".parse::<ContentType>().unwrap(), ContentType::Series);
        assert!("podcast".parse::<ContentType>().is_err());
        // Matching is exact; the wire format is lowercase
        assert!("Movie".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_content_type_collection_names() {
        assert_eq!(ContentType::Movie.collection_name(), "movies");
        assert_eq!(ContentType::Series.collection_name(), "series");
        assert_eq!(ContentType::Song.as_str(), "song");
    }
}
