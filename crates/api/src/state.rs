use std::sync::Arc;

use catalog::ContentStore;
use recommender::Recommender;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Creates application state over a loaded content store
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self {
            recommender: Arc::new(Recommender::new(store)),
        }
    }
}
