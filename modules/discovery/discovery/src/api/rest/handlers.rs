//! REST handlers for discovery.
//!
//! Handlers are thin: parse input, call the domain service, map errors to Problem.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use tw_security::SecurityContext;

use super::dto::{
    FavoritesDto, GridPageRequest, ModeRequest, NavigateRequest, OpenSessionRequest,
    SearchParams, SessionDto, TherapistDto, TherapistPageDto,
};
use super::error::ApiResult;
use crate::domain::favorites::ToggleOutcome;
use crate::domain::service::{
    DeepLinkOutcome, FIND_PATH, Service, deep_link_redirect_message,
};
use crate::domain::session::SessionId;

/// Carries the redirect reason to the discovery page.
pub const FLASH_HEADER: &str = "x-flash-message";

/// GET /find/therapists - One refined page of live therapists.
#[tracing::instrument(skip(ctx, svc, params))]
pub async fn search(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<TherapistPageDto>> {
    let (filters, mode, cursor) = params.into_parts()?;
    let page = svc.search(&ctx, &filters, mode, cursor).await?;
    Ok(Json(TherapistPageDto::from(page)))
}

/// GET /find/therapist/{id} - Deep link. Missing or non-live records redirect to `/find`.
#[tracing::instrument(skip(svc))]
pub async fn deep_link(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let e = match svc.get_live_therapist(&id).await {
        Ok(therapist) => return Ok(Json(TherapistDto::from(therapist)).into_response()),
        Err(e) => e,
    };
    let Some(message) = deep_link_redirect_message(&e) else {
        return Err(e.into());
    };
    tracing::info!(therapist_id = %id, error = %e, "deep link redirected");
    let mut response = Redirect::to(FIND_PATH).into_response();
    response
        .headers_mut()
        .insert(FLASH_HEADER, HeaderValue::from_static(message));
    Ok(response)
}

/// GET /find/favorites
pub async fn list_favorites(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<FavoritesDto>> {
    let therapist_ids = svc.list_favorites(&ctx).await?;
    Ok(Json(FavoritesDto { therapist_ids }))
}

/// PUT /find/favorites/{id}
pub async fn add_favorite(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    svc.set_favorite(&ctx, &id, true).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /find/favorites/{id}
pub async fn remove_favorite(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    svc.set_favorite(&ctx, &id, false).await?;
    Ok(StatusCode::NO_CONTENT)
}

// === Sessions ===

/// POST /find/sessions - Open a session and load the first page.
#[tracing::instrument(skip(ctx, svc, req))]
pub async fn open_session(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<OpenSessionRequest>,
) -> ApiResult<(StatusCode, Json<SessionDto>)> {
    let view = svc.open_session(&ctx, req.filters, req.mode).await?;
    Ok((StatusCode::CREATED, Json(SessionDto::from(view))))
}

/// GET /find/sessions/{sid}
pub async fn get_session(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(sid): Path<SessionId>,
) -> ApiResult<Json<SessionDto>> {
    Ok(Json(svc.session_view(&ctx, sid)?.into()))
}

/// DELETE /find/sessions/{sid}
pub async fn close_session(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(sid): Path<SessionId>,
) -> ApiResult<StatusCode> {
    svc.close_session(&ctx, sid)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /find/sessions/{sid}/filters
#[tracing::instrument(skip(ctx, svc, filters))]
pub async fn apply_filters(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(sid): Path<SessionId>,
    Json(filters): Json<discovery_sdk::Filters>,
) -> ApiResult<Json<SessionDto>> {
    Ok(Json(svc.apply_filters(&ctx, sid, filters).await?.into()))
}

/// PUT /find/sessions/{sid}/mode
pub async fn set_mode(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(sid): Path<SessionId>,
    Json(req): Json<ModeRequest>,
) -> ApiResult<Json<SessionDto>> {
    Ok(Json(svc.set_mode(&ctx, sid, req.mode)?.into()))
}

/// PUT /find/sessions/{sid}/grid-page
pub async fn set_grid_page(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(sid): Path<SessionId>,
    Json(req): Json<GridPageRequest>,
) -> ApiResult<Json<SessionDto>> {
    Ok(Json(svc.set_grid_page(&ctx, sid, req.page)?.into()))
}

/// POST /find/sessions/{sid}/navigate
pub async fn navigate(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(sid): Path<SessionId>,
    Json(req): Json<NavigateRequest>,
) -> ApiResult<Json<SessionDto>> {
    let key = req.key()?;
    Ok(Json(svc.navigate(&ctx, sid, key).await?.into()))
}

/// POST /find/sessions/{sid}/more
pub async fn load_more(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(sid): Path<SessionId>,
) -> ApiResult<Json<SessionDto>> {
    Ok(Json(svc.load_more(&ctx, sid).await?.into()))
}

/// GET /find/sessions/{sid}/therapist/{id} - Deep link inside a session.
#[tracing::instrument(skip(ctx, svc))]
pub async fn session_deep_link(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path((sid, id)): Path<(SessionId, String)>,
) -> ApiResult<Json<DeepLinkOutcome>> {
    Ok(Json(svc.open_deep_link(&ctx, sid, &id).await?))
}

/// POST /find/sessions/{sid}/favorites/{id}/toggle
#[tracing::instrument(skip(ctx, svc))]
pub async fn toggle_favorite(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path((sid, id)): Path<(SessionId, String)>,
) -> ApiResult<Json<ToggleOutcome>> {
    Ok(Json(svc.toggle_favorite(&ctx, sid, &id).await?))
}
