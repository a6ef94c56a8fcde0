//! English stop words for text preprocessing.
//!
//! Stop words are common words ("the", "is", "at") that carry little
//! semantic signal and would otherwise dominate the term frequencies of
//! short feature texts.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Default English stop words (171 common words), based on the NLTK and
/// scikit-learn stop word lists.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // pronouns
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves",
    "you", "your", "yours", "yourself", "yourselves",
    "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    // question words
    "what", "which", "who", "whom", "whose", "why", "when", "where", "how",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around",
    "at", "before", "behind", "below", "beneath", "beside", "between", "beyond",
    "by", "down", "during", "for", "from", "in", "inside", "into", "near",
    "of", "off", "on", "onto", "out", "outside", "over", "through", "throughout",
    "to", "toward", "under", "underneath", "until", "up", "upon",
    "with", "within", "without",
    // conjunctions
    "and", "as", "because", "but", "if", "or", "since", "so",
    "than", "that", "though", "unless", "while",
    // auxiliary verbs
    "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing",
    "would", "should", "could", "ought", "can", "may", "might", "must", "will", "shall",
    // determiners and adverbs
    "all", "any", "both", "each", "every", "few", "more", "most", "much",
    "neither", "no", "none", "not", "one", "other", "same", "several",
    "some", "such", "very", "too", "only", "own", "then", "there",
    "these", "this", "those", "just", "now", "here",
    // frequent verbs and fillers
    "again", "also", "another", "back", "even", "ever",
    "get", "give", "go", "got", "made", "make", "say", "see", "take", "way",
];

/// Check whether a lowercase token is an English stop word
pub fn is_stop_word(token: &str) -> bool {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
        .contains(token)
}
