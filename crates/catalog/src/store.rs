//! Loading the [`ContentStore`] from seed files.
//!
//! A seed directory holds one JSON file per collection:
//!
//! ```text
//! seed/
//!   movies.json
//!   songs.json
//!   books.json
//!   series.json
//!   ratings.json
//! ```
//!
//! All five files are parsed in parallel, inserted into the store, and the
//! ratings are validated before the store is returned.

use crate::error::{Result, StoreError};
use crate::seed;
use crate::types::{ContentStore, ContentType};
use std::path::Path;
use tracing::info;

impl ContentStore {
    /// Load all collections from a seed directory.
    ///
    /// Every seed file must exist; a missing file is reported as
    /// [`StoreError::SeedNotFound`] with the offending path. Loading is
    /// atomic: any parse or validation failure discards the whole store.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog seed data from {}", data_dir.display());

        let movies_path = data_dir.join("movies.json");
        let songs_path = data_dir.join("songs.json");
        let books_path = data_dir.join("books.json");
        let series_path = data_dir.join("series.json");
        let ratings_path = data_dir.join("ratings.json");

        // Parse all five files in parallel with nested joins
        let ((movies, songs), ((books, series), ratings)) = rayon::join(
            || {
                rayon::join(
                    || seed::read_items(&movies_path),
                    || seed::read_items(&songs_path),
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || seed::read_items(&books_path),
                            || seed::read_items(&series_path),
                        )
                    },
                    || seed::read_ratings(&ratings_path),
                )
            },
        );

        let movies = movies?;
        let songs = songs?;
        let books = books?;
        let series = series?;
        let ratings = ratings?;

        let mut store = ContentStore::new();

        for item in movies {
            store.insert_item(ContentType::Movie, item);
        }
        for item in songs {
            store.insert_item(ContentType::Song, item);
        }
        for item in books {
            store.insert_item(ContentType::Book, item);
        }
        for item in series {
            store.insert_item(ContentType::Series, item);
        }
        for rating in ratings {
            store.insert_rating(rating);
        }

        store.validate()?;

        let (items, users, rating_count) = store.counts();
        info!(
            "Catalog loaded: {} items, {} users, {} ratings",
            items, users, rating_count
        );

        Ok(store)
    }

    /// Validate rating values.
    ///
    /// Every rating must be a finite number between 0.0 and 5.0. Ratings
    /// referencing unknown items are deliberately allowed; the scoring
    /// paths skip them at hydration time.
    pub fn validate(&self) -> Result<()> {
        for ratings in self.user_ratings.values() {
            for rating in ratings {
                if !rating.rating.is_finite() || rating.rating < 0.0 || rating.rating > 5.0 {
                    return Err(StoreError::InvalidValue {
                        field: "rating".to_string(),
                        value: rating.rating.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
