//! Handlers for the static character catalog.

use axum::extract::Query;
use axum::Json;
use charpack_core::catalog::{self, Character, CharacterCategory, CATALOG};
use charpack_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// GET /api/characters?category=
pub async fn list(Query(query): Query<CatalogQuery>) -> AppResult<Json<Vec<&'static Character>>> {
    let characters = match query.category.as_deref() {
        None | Some("") | Some("all") => CATALOG.iter().collect(),
        Some(raw) => {
            let category = CharacterCategory::parse(raw).ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid category '{raw}'. Must be one of: anime, games, movies"
                ))
            })?;
            catalog::by_category(category)
        }
    };
    Ok(Json(characters))
}
