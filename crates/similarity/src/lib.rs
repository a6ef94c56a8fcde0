//! # Similarity Crate
//!
//! Content-based similarity for catalog items: TF-IDF feature vectors and
//! pairwise cosine similarity matrices.
//!
//! ## Main Components
//!
//! - **features**: Turn items into feature text, per content type
//! - **stopwords**: English stop word list shared by the vectorizer
//! - **vectorizer**: TF-IDF vectorization with a capped vocabulary
//! - **matrix**: Symmetric similarity matrices over whole collections
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{ContentStore, ContentType};
//! use similarity::compute_similarity;
//!
//! let store = ContentStore::load_from_dir(Path::new("demos/seed"))?;
//! if let Some(matrix) = compute_similarity(&store, ContentType::Movie, 100) {
//!     let row = matrix.row(0);
//!     println!("{} items, first row: {:?}", matrix.len(), row);
//! }
//! ```

pub mod features;
pub mod matrix;
pub mod stopwords;
pub mod vectorizer;

// Re-export commonly used items for convenience
pub use features::{feature_text, feature_texts};
pub use matrix::{SimilarityMatrix, compute_similarity};
pub use stopwords::{ENGLISH_STOP_WORDS, is_stop_word};
pub use vectorizer::{TfidfVectorizer, VectorizeError};
