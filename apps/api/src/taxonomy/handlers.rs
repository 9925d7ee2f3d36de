use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::taxonomy::data::{Category, CategoryTag, CATEGORIES};
use crate::taxonomy::matcher::{self, SearchResult};

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/v1/categories
pub async fn handle_list_categories() -> Json<&'static [Category]> {
    Json(CATEGORIES)
}

/// GET /api/v1/categories/search?q=
pub async fn handle_search(Query(params): Query<SearchQuery>) -> Json<SearchResult> {
    Json(matcher::search(params.q.as_deref().unwrap_or("")))
}

#[derive(Serialize)]
pub struct CategoryTagsResponse {
    pub category: &'static Category,
    pub tags: Vec<&'static CategoryTag>,
}

/// GET /api/v1/categories/:key/tags
pub async fn handle_category_tags(
    Path(key): Path<String>,
) -> Result<Json<CategoryTagsResponse>, AppError> {
    let category = matcher::category_by_key(&key)
        .ok_or_else(|| AppError::NotFound(format!("Category '{key}' not found")))?;
    let tags = matcher::tags_for(&key).unwrap_or_default();
    Ok(Json(CategoryTagsResponse { category, tags }))
}
