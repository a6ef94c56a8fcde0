//! Rating vectors derived from the catalog.
//!
//! Collaborative filtering compares users across all four content types at
//! once. To do that, every rating is keyed by a namespaced
//! `{content_type}_{content_id}` string so the same id in two collections
//! never collides.

use crate::sparse::SparseVector;
use catalog::{ContentId, ContentStore, ContentType, Rating, UserId};

/// The namespaced key for one rated item
pub fn rating_key(content_type: ContentType, content_id: &ContentId) -> String {
    format!("{}_{}", content_type.as_str(), content_id.as_str())
}

fn vector_from(ratings: &[Rating]) -> SparseVector {
    let mut vector = SparseVector::new();
    for rating in ratings {
        vector.insert(rating_key(rating.content_type, &rating.content_id), rating.rating);
    }
    vector
}

/// The rating vector of one user across all content types
pub fn ratings_of(store: &ContentStore, user_id: &UserId) -> SparseVector {
    vector_from(store.user_ratings(user_id))
}

/// Rating vectors for every user with at least one rating, ascending by
/// user id.
pub fn all_rating_vectors(store: &ContentStore) -> Vec<(UserId, SparseVector)> {
    store
        .users_with_ratings()
        .map(|(user_id, ratings)| (user_id.clone(), vector_from(ratings)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user: &str, content_type: ContentType, id: &str, value: f64) -> Rating {
        Rating {
            user_id: UserId::new(user),
            content_type,
            content_id: ContentId::new(id),
            rating: value,
        }
    }

    #[test]
    fn test_rating_key_namespaces_by_type() {
        let id = ContentId::new("42");
        assert_eq!(rating_key(ContentType::Movie, &id), "movie_42");
        assert_eq!(rating_key(ContentType::Book, &id), "book_42");
    }

    #[test]
    fn test_ratings_of_builds_namespaced_vector() {
        let mut store = ContentStore::new();
        store.insert_rating(rating("u1", ContentType::Movie, "m1", 4.0));
        store.insert_rating(rating("u1", ContentType::Song, "s1", 2.0));
        store.insert_rating(rating("u2", ContentType::Movie, "m1", 5.0));

        let vector = ratings_of(&store, &UserId::new("u1"));
        assert_eq!(vector.len(), 2);
        assert_eq!(vector.get("movie_m1"), Some(4.0));
        assert_eq!(vector.get("song_s1"), Some(2.0));
    }

    #[test]
    fn test_duplicate_rating_keeps_last_value() {
        let mut store = ContentStore::new();
        store.insert_rating(rating("u1", ContentType::Movie, "m1", 2.0));
        store.insert_rating(rating("u1", ContentType::Movie, "m1", 4.5));

        let vector = ratings_of(&store, &UserId::new("u1"));
        assert_eq!(vector.len(), 1);
        assert_eq!(vector.get("movie_m1"), Some(4.5));
    }

    #[test]
    fn test_all_rating_vectors_ordered_by_user() {
        let mut store = ContentStore::new();
        store.insert_rating(rating("zoe", ContentType::Movie, "m1", 3.0));
        store.insert_rating(rating("amy", ContentType::Movie, "m1", 4.0));

        let vectors = all_rating_vectors(&store);
        let users: Vec<&str> = vectors.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(users, vec!["amy", "zoe"]);
    }

    #[test]
    fn test_unknown_user_has_empty_vector() {
        let store = ContentStore::new();
        assert!(ratings_of(&store, &UserId::new("ghost")).is_empty());
    }
}
