//! Feature text assembly per content type.
//!
//! Every item is reduced to a single text document before vectorization.
//! The rules mirror what the catalog knows about each type: all items
//! contribute genres and a description, songs add artist and album, books
//! add the author.

use catalog::{ContentId, ContentItem, ContentStore, ContentType};

/// Assemble the feature text for one item.
///
/// A missing or empty description falls back to the title so every item
/// has at least some text.
pub fn feature_text(content_type: ContentType, item: &ContentItem) -> String {
    let genres = item.genres.join(" ");
    let description = match item.description.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => item.title.as_str(),
    };

    match content_type {
        ContentType::Song => format!(
            "{} {} {} {}",
            genres,
            description,
            item.artist.as_deref().unwrap_or(""),
            item.album.as_deref().unwrap_or("")
        ),
        ContentType::Book => format!(
            "{} {} {}",
            genres,
            description,
            item.author.as_deref().unwrap_or("")
        ),
        _ => format!("{} {}", genres, description),
    }
}

/// Collect `(id, feature text)` pairs for every item of a content type,
/// in the store's deterministic id order.
pub fn feature_texts(
    store: &ContentStore,
    content_type: ContentType,
) -> Vec<(ContentId, String)> {
    store
        .items(content_type)
        .map(|item| (item.id.clone(), feature_text(content_type, item)))
        .collect()
}
