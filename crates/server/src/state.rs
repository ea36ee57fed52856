use std::sync::Arc;

use service::article::{ArticleService, SeaOrmArticleRepository};

pub type Articles = ArticleService<SeaOrmArticleRepository>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<Articles>,
}

impl AppState {
    pub fn new(articles: Articles) -> Self {
        Self { articles: Arc::new(articles) }
    }
}
