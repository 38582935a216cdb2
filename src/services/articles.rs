//! Free-text article resolution: exact match on id/code/reference first, then
//! partial name matching with user-guided disambiguation, plus the broader
//! autocomplete suggestion filter.

use crate::{
    db::DbPool,
    entities::article::{self, Entity as Article},
    errors::ServiceError,
};
use sea_orm::EntityTrait;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Candidates beyond this count are silently dropped from the disambiguation
/// list. Fixed design limit, not configurable.
pub const DISAMBIGUATION_LIMIT: usize = 15;

/// Autocomplete suggestions are capped at the first matches.
pub const SUGGESTION_LIMIT: usize = 10;

/// Read-only projection of an article used by resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ArticleCandidate {
    pub id: i64,
    pub code: String,
    pub reference_code: Option<String>,
    pub name: String,
}

impl From<article::Model> for ArticleCandidate {
    fn from(model: article::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            reference_code: model.reference_code,
            name: model.name,
        }
    }
}

impl ArticleCandidate {
    fn matches_exactly(&self, needle: &str) -> bool {
        self.id.to_string() == needle
            || self.code.to_uppercase() == needle
            || self
                .reference_code
                .as_deref()
                .is_some_and(|reference| reference.to_uppercase() == needle)
    }

    fn name_contains(&self, needle: &str) -> bool {
        self.name.to_uppercase().contains(needle)
    }

    fn any_field_contains(&self, needle: &str) -> bool {
        self.code.to_uppercase().contains(needle)
            || self.name.to_uppercase().contains(needle)
            || self
                .reference_code
                .as_deref()
                .is_some_and(|reference| reference.to_uppercase().contains(needle))
    }
}

/// Outcome of resolving a search term to a single article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    Match { article: ArticleCandidate },
    Ambiguous { candidates: Vec<ArticleCandidate> },
    NotFound,
}

/// Resolves `term` against `candidates`, exact match first. An exact hit on
/// id, code, or reference code short-circuits partial matching entirely.
pub fn resolve_term(term: &str, candidates: &[ArticleCandidate]) -> Resolution {
    let needle = term.trim().to_uppercase();
    if needle.is_empty() {
        return Resolution::NotFound;
    }

    let exact: Vec<&ArticleCandidate> = candidates
        .iter()
        .filter(|c| c.matches_exactly(&needle))
        .collect();
    match exact.len() {
        1 => {
            return Resolution::Match {
                article: exact[0].clone(),
            }
        }
        n if n > 1 => {
            // Duplicate codes: disambiguate over the exact hits rather than
            // widening to name matches
            return Resolution::Ambiguous {
                candidates: exact
                    .into_iter()
                    .take(DISAMBIGUATION_LIMIT)
                    .cloned()
                    .collect(),
            };
        }
        _ => {}
    }

    let partial: Vec<&ArticleCandidate> = candidates
        .iter()
        .filter(|c| c.name_contains(&needle))
        .collect();
    match partial.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Match {
            article: partial[0].clone(),
        },
        _ => Resolution::Ambiguous {
            candidates: partial
                .into_iter()
                .take(DISAMBIGUATION_LIMIT)
                .cloned()
                .collect(),
        },
    }
}

/// As-you-type filter: substring match across code, name, or reference code,
/// capped at the first [`SUGGESTION_LIMIT`] matches.
pub fn suggest_term(term: &str, candidates: &[ArticleCandidate]) -> Vec<ArticleCandidate> {
    let needle = term.trim().to_uppercase();
    if needle.is_empty() {
        return Vec::new();
    }

    candidates
        .iter()
        .filter(|c| c.any_field_contains(&needle))
        .take(SUGGESTION_LIMIT)
        .cloned()
        .collect()
}

/// Catalog-backed wrapper around the pure matching functions.
#[derive(Clone)]
pub struct ArticleService {
    db: Arc<DbPool>,
}

impl ArticleService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<article::Model>, ServiceError> {
        Article::find()
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    async fn candidates(&self) -> Result<Vec<ArticleCandidate>, ServiceError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(ArticleCandidate::from)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, term: &str) -> Result<Resolution, ServiceError> {
        let candidates = self.candidates().await?;
        Ok(resolve_term(term, &candidates))
    }

    #[instrument(skip(self))]
    pub async fn suggest(&self, term: &str) -> Result<Vec<ArticleCandidate>, ServiceError> {
        let candidates = self.candidates().await?;
        Ok(suggest_term(term, &candidates))
    }
}
