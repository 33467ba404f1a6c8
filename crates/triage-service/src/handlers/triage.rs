//! Triage flow handlers.
//!
//! The chatbot walks three phases: keyword search over FAQ text (phase 1),
//! category-driven browsing when the search misses (phase 2), and staff
//! escalation as the terminal fallback (phase 3). Phases 1 and 2 each write
//! one interaction-log row; escalation writes a `NO_ANSWER` row up front and
//! updates that same row to `ESCALATED` once the fallback contact is known.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use triage_core::{
    Category, CategoryId, FallbackContact, FaqHit, FaqSummary, LogId, LogStatus, NewLog, NewUser,
    UserId, UserRole,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Maximum keyword-search hits returned per query.
const SEARCH_LIMIT: i64 = 10;

/// Maximum suggested categories per degradation step.
const SUGGEST_LIMIT: i64 = 5;

/// Maximum alternative categories offered when a category is thin.
const RELATED_LIMIT: i64 = 3;

/// A category with fewer FAQs than this also gets alternatives.
const MIN_CATEGORY_FAQS: usize = 3;

fn require_text(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!(
            "missing or empty '{name}' parameter"
        ))),
    }
}

fn require_user_id(value: Option<String>) -> Result<UserId, ApiError> {
    value
        .ok_or_else(|| ApiError::BadRequest("missing 'userId' parameter".into()))?
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid 'userId' parameter".into()))
}

// ============================================================================
// Phase 1: Keyword Search
// ============================================================================

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// The caller's query text.
    pub query: Option<String>,
    /// The caller's identity, required for logging.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Keyword search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// The query as received.
    pub query: String,
    /// Whether any FAQ matched.
    pub matched: bool,
    /// Ranked hits, best first, at most [`SEARCH_LIMIT`].
    pub matches: Vec<FaqHit>,
    /// Set to `"category-suggestion"` when the caller should fall through
    /// to phase 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<&'static str>,
}

/// Relevance-ranked keyword search over FAQ question/answer text.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = require_text(params.query, "query")?;
    let user_id = require_user_id(params.user_id)?;

    let matches = state.store.search_faqs(&query, SEARCH_LIMIT).await?;

    // Exactly one log row per attempt: the top hit on success, a null row
    // on a miss.
    if let Some(top) = matches.first() {
        state
            .store
            .insert_log(&NewLog {
                user_id: Some(user_id),
                category_id: Some(top.faq.category_id),
                faq_id: Some(top.faq.faq_id),
                query: query.clone(),
                response: Some(top.faq.answer.clone()),
                status: LogStatus::AnsweredPhase1,
            })
            .await?;
    } else {
        state
            .store
            .insert_log(&NewLog {
                user_id: Some(user_id),
                category_id: None,
                faq_id: None,
                query: query.clone(),
                response: None,
                status: LogStatus::FailedPhase1,
            })
            .await?;
    }

    let matched = !matches.is_empty();
    tracing::debug!(%user_id, matched, hits = matches.len(), "Keyword search completed");

    Ok(Json(SearchResponse {
        query,
        matched,
        next_step: (!matched).then_some("category-suggestion"),
        matches,
    }))
}

// ============================================================================
// Phase 2 Support: Category Suggestions
// ============================================================================

/// Query parameters for `GET /suggest`.
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    /// The caller's query text.
    pub query: Option<String>,
}

/// Which step of the degradation chain produced the suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    /// Categories of FAQs whose text matched the query.
    Relevance,
    /// Categories whose name contains the query.
    Name,
    /// The full category list, last resort.
    All,
}

/// Category suggestion response.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    /// The query as received.
    pub query: String,
    /// Which degradation step produced the list.
    pub source: SuggestionSource,
    /// Suggested categories; never empty while any category exists.
    pub categories: Vec<Category>,
}

/// Suggest categories for a query that had no direct FAQ match.
///
/// Three steps, first non-empty wins: categories of relevance-matching
/// FAQs, then name substring matches, then the full list. The caller must
/// always have something to present, so the chain never returns an empty
/// list while the store holds any category. No log row is written here;
/// logging happens once the caller picks a category.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let query = require_text(params.query, "query")?;

    let (source, categories) = {
        let by_relevance = state
            .store
            .categories_for_matching_faqs(&query, SUGGEST_LIMIT)
            .await?;
        if by_relevance.is_empty() {
            let by_name = state.store.categories_by_name(&query, SUGGEST_LIMIT).await?;
            if by_name.is_empty() {
                (SuggestionSource::All, state.store.list_categories().await?)
            } else {
                (SuggestionSource::Name, by_name)
            }
        } else {
            (SuggestionSource::Relevance, by_relevance)
        }
    };

    tracing::debug!(?source, count = categories.len(), "Category suggestions computed");

    Ok(Json(SuggestResponse {
        query,
        source,
        categories,
    }))
}

// ============================================================================
// Phase 2: Category Browsing
// ============================================================================

/// Query parameters for `GET /categories/{id}/faqs`.
#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    /// The caller's query text (logged with the selection).
    pub query: Option<String>,
    /// The caller's identity, required for logging.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Category browsing response.
#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    /// The selected category.
    pub category_id: CategoryId,
    /// FAQs of the category in store order.
    pub faqs: Vec<FaqSummary>,
    /// Up to [`RELATED_LIMIT`] alternative categories; empty when the
    /// selected category holds at least [`MIN_CATEGORY_FAQS`] FAQs.
    pub related_categories: Vec<Category>,
}

/// List a chosen category's FAQs, with sibling categories when thin.
pub async fn browse_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<BrowseResponse>, ApiError> {
    let category_id: CategoryId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid category id".into()))?;
    let query = require_text(params.query, "query")?;
    let user_id = require_user_id(params.user_id)?;

    state
        .store
        .get_category(category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("category not found: {category_id}")))?;

    let faqs = state.store.faqs_in_category(category_id).await?;

    // The first FAQ in store order stands in as "the" answer for logging.
    // Arbitrary, but the dashboard only needs which category was consulted.
    if let Some(first) = faqs.first() {
        state
            .store
            .insert_log(&NewLog {
                user_id: Some(user_id),
                category_id: Some(category_id),
                faq_id: Some(first.faq_id),
                query: query.clone(),
                response: Some(first.answer.clone()),
                status: LogStatus::AnsweredPhase2,
            })
            .await?;
    } else {
        state
            .store
            .insert_log(&NewLog {
                user_id: Some(user_id),
                category_id: Some(category_id),
                faq_id: None,
                query: query.clone(),
                response: None,
                status: LogStatus::FailedPhase2,
            })
            .await?;
    }

    let related_categories = if faqs.len() < MIN_CATEGORY_FAQS {
        state
            .store
            .other_categories(category_id, RELATED_LIMIT)
            .await?
    } else {
        Vec::new()
    };

    Ok(Json(BrowseResponse {
        category_id,
        faqs,
        related_categories,
    }))
}

// ============================================================================
// Phase 3: Staff Escalation
// ============================================================================

/// Request body for `POST /query`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalateRequest {
    /// The caller's identity, when already known.
    pub user_id: Option<UserId>,
    /// The query that went unanswered.
    pub query_text: Option<String>,
    /// The category the caller was browsing, if any.
    pub category_id: Option<CategoryId>,
    /// Caller profile, used when `user_id` is absent.
    pub full_name: Option<String>,
    /// Caller email, used when `user_id` is absent.
    pub user_email: Option<String>,
    /// Caller phone.
    pub user_phone: Option<String>,
    /// Caller role; defaults to `User`.
    pub user_role: Option<String>,
    /// Caller classification.
    pub user_type: Option<String>,
}

/// Escalation response.
#[derive(Debug, Serialize)]
pub struct EscalateResponse {
    /// Human-readable fallback message.
    pub message: String,
    /// The staff contact, real or synthesized.
    pub fallback_contact: FallbackContact,
    /// The interaction-log row recording this escalation.
    pub log_id: LogId,
    /// The resolved caller identity, for the caller to reuse next turn.
    pub user_id: UserId,
}

/// Terminal fallback: resolve the caller, pick a staff contact, record the
/// outcome.
pub async fn escalate(
    State(state): State<Arc<AppState>>,
    Json(mut body): Json<EscalateRequest>,
) -> Result<Json<EscalateResponse>, ApiError> {
    let query_text = require_text(body.query_text.take(), "queryText")?;

    // Blank profile fields count as absent, same as /register.
    let has_profile = [&body.full_name, &body.user_email]
        .iter()
        .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()));
    if body.user_id.is_none() && !has_profile {
        return Err(ApiError::BadRequest(
            "either userId or both fullName and userEmail must be provided".into(),
        ));
    }

    // A logged category must reference a real row.
    if let Some(category_id) = body.category_id {
        state
            .store
            .get_category(category_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("category not found: {category_id}")))?;
    }

    let user_id = resolve_caller(&state, &body).await?;

    // Step 1: record the failed attempt before the contact is known.
    let log_id = state
        .store
        .insert_log(&NewLog {
            user_id: Some(user_id),
            category_id: body.category_id,
            faq_id: None,
            query: query_text,
            response: None,
            status: LogStatus::NoAnswer,
        })
        .await?;

    // Step 2: uniform random Admin, so one staff member does not absorb
    // every escalation. With no staff at all, fall back to the static
    // departmental contact; escalation never errors out for lack of staff.
    let fallback_contact = match state.store.random_admin().await? {
        Some(admin) => FallbackContact::from(&admin),
        None => state.config.helpdesk_contact(),
    };

    let message = format!(
        "No matching FAQs were found. Please contact {} at {}.",
        fallback_contact.full_name, fallback_contact.email
    );

    // Step 3: finalize the same row inserted in step 1.
    state
        .store
        .update_log_outcome(log_id, &message, LogStatus::Escalated)
        .await?;

    tracing::info!(%user_id, %log_id, contact = %fallback_contact.email, "Escalation recorded");

    Ok(Json(EscalateResponse {
        message,
        fallback_contact,
        log_id,
        user_id,
    }))
}

/// Resolve the caller to a user id: explicit id wins, then a lookup by
/// email OR full name (first row in store order), then a lazily created
/// `User`-role record.
async fn resolve_caller(state: &AppState, body: &EscalateRequest) -> Result<UserId, ApiError> {
    if let Some(user_id) = body.user_id {
        return Ok(user_id);
    }

    // Presence checked above.
    let full_name = body.full_name.clone().unwrap_or_default();
    let email = body.user_email.clone().unwrap_or_default();

    if let Some(existing) = state
        .store
        .find_user_by_email_or_name(&email, &full_name)
        .await?
    {
        return Ok(existing.user_id);
    }

    let role = match body.user_role.as_deref() {
        None => UserRole::User,
        Some(s) => {
            UserRole::parse(s).ok_or_else(|| ApiError::BadRequest("invalid 'userRole'".into()))?
        }
    };

    let created = state
        .store
        .insert_user(&NewUser {
            full_name,
            username: None,
            email,
            phone: body.user_phone.clone(),
            password_hash: None,
            role,
            user_type: body.user_type.clone(),
        })
        .await?;

    tracing::debug!(user_id = %created.user_id, "Caller created during escalation");
    Ok(created.user_id)
}
