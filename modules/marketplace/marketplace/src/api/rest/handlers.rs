//! REST handlers for the marketplace.
//!
//! Role checks for `/dashboard/*` and `/admin/*` run in the section guard;
//! the service repeats them for in-process callers.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Redirect;
use discovery_sdk::{Certification, Therapist};
use marketplace_sdk::{
    Clinic, ClinicPatch, ClinicSpaceListing, FileCandidate, NewCertification, NewInquiry,
    NewSpaceListing, StoredFile, TherapistPatch, UploadKind, UserInquiry,
};
use tw_security::{DashboardRole, SecurityContext};

use super::dto::{
    ClientDashboardDto, FavoriteCardDto, InquiryListParams, InquiryStatusRequest,
    LocaleTableDto, ModerationRequest, VerifyCertificationRequest,
};
use super::error::ApiResult;
use crate::domain::error::DomainError;
use crate::domain::locale::LocaleCatalog;
use crate::domain::service::{AdminOverview, Service};

/// Original file name of an upload; the body carries the raw bytes.
pub const FILE_NAME_HEADER: &str = "x-file-name";

/// GET /dashboard - Send the caller to the dashboard of their highest role.
pub async fn dashboard_home(ctx: SecurityContext) -> ApiResult<Redirect> {
    let Some(home) = ctx.dashboard().map(DashboardRole::home_path) else {
        return Err(DomainError::AuthRequired.into());
    };
    tracing::debug!(home, "dashboard dispatch");
    Ok(Redirect::to(home))
}

// === Client ===

/// GET /dashboard/client
pub async fn client_dashboard(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<ClientDashboardDto>> {
    let favorites = svc.client_favorites(&ctx).await?;
    Ok(Json(ClientDashboardDto {
        favorites: favorites.into_iter().map(FavoriteCardDto::from).collect(),
    }))
}

// === Therapist ===

/// GET /dashboard/therapist - Own profile, created as a draft on first visit.
pub async fn therapist_dashboard(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Therapist>> {
    Ok(Json(svc.ensure_therapist_profile(&ctx).await?))
}

/// PUT /dashboard/therapist/profile
#[tracing::instrument(skip(ctx, svc, patch))]
pub async fn update_therapist_profile(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Json(patch): Json<TherapistPatch>,
) -> ApiResult<Json<Therapist>> {
    Ok(Json(svc.update_therapist_profile(&ctx, patch).await?))
}

/// POST /dashboard/therapist/submit
pub async fn submit_therapist_profile(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Therapist>> {
    Ok(Json(svc.submit_therapist_profile(&ctx).await?))
}

/// POST /dashboard/therapist/certifications
pub async fn add_certification(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<NewCertification>,
) -> ApiResult<(StatusCode, Json<Certification>)> {
    let certification = svc.add_certification(&ctx, req).await?;
    Ok((StatusCode::CREATED, Json(certification)))
}

/// DELETE /dashboard/therapist/certifications/{id}
pub async fn remove_certification(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    svc.remove_certification(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// === Clinic ===

/// GET /dashboard/clinic - Own clinic, created as a draft on first visit.
pub async fn clinic_dashboard(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Clinic>> {
    Ok(Json(svc.ensure_clinic(&ctx).await?))
}

/// PUT /dashboard/clinic/profile
pub async fn update_clinic(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Json(patch): Json<ClinicPatch>,
) -> ApiResult<Json<Clinic>> {
    Ok(Json(svc.update_clinic(&ctx, patch).await?))
}

/// POST /dashboard/clinic/submit
pub async fn submit_clinic(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Clinic>> {
    Ok(Json(svc.submit_clinic(&ctx).await?))
}

/// POST /dashboard/clinic/listings
pub async fn add_space_listing(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<NewSpaceListing>,
) -> ApiResult<(StatusCode, Json<ClinicSpaceListing>)> {
    let listing = svc.add_space_listing(&ctx, req).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// DELETE /dashboard/clinic/listings/{id}
pub async fn remove_space_listing(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    svc.remove_space_listing(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// === Admin ===

/// GET /dashboard/admin
pub async fn admin_dashboard(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<AdminOverview>> {
    Ok(Json(svc.admin_overview(&ctx).await?))
}

/// POST /admin/therapists/{id}/decision
#[tracing::instrument(skip(ctx, svc, req))]
pub async fn moderate_therapist(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    Json(req): Json<ModerationRequest>,
) -> ApiResult<Json<Therapist>> {
    let therapist = svc
        .moderate_therapist(&ctx, &id, req.decision, req.note)
        .await?;
    Ok(Json(therapist))
}

/// POST /admin/therapists/{id}/certifications/{cert_id}/verify
pub async fn verify_certification(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path((id, cert_id)): Path<(String, String)>,
    Json(req): Json<VerifyCertificationRequest>,
) -> ApiResult<Json<Certification>> {
    let certification = svc
        .verify_certification(&ctx, &id, &cert_id, req.verified)
        .await?;
    Ok(Json(certification))
}

/// POST /admin/clinics/{id}/decision
#[tracing::instrument(skip(ctx, svc, req))]
pub async fn moderate_clinic(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    Json(req): Json<ModerationRequest>,
) -> ApiResult<Json<Clinic>> {
    let clinic = svc.moderate_clinic(&ctx, &id, req.decision, req.note).await?;
    Ok(Json(clinic))
}

/// GET /admin/inquiries?status=open
pub async fn list_inquiries(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Query(params): Query<InquiryListParams>,
) -> ApiResult<Json<Vec<UserInquiry>>> {
    let status = params.status()?;
    Ok(Json(svc.list_inquiries(&ctx, status).await?))
}

/// POST /admin/inquiries/{id}/status
pub async fn update_inquiry_status(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    Json(req): Json<InquiryStatusRequest>,
) -> ApiResult<Json<UserInquiry>> {
    let inquiry = svc
        .update_inquiry_status(&ctx, &id, req.status, req.reply)
        .await?;
    Ok(Json(inquiry))
}

// === Public ===

/// POST /inquiries - Contact form; open to anonymous visitors.
pub async fn create_inquiry(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<NewInquiry>,
) -> ApiResult<(StatusCode, Json<UserInquiry>)> {
    let inquiry = svc.create_inquiry(&ctx, req).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// POST /uploads/{kind} - Raw body upload; `Content-Type` and `x-file-name` describe the file.
#[tracing::instrument(skip(ctx, svc, headers, body))]
pub async fn upload_file(
    ctx: SecurityContext,
    Extension(svc): Extension<Arc<Service>>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<StoredFile>)> {
    let kind: UploadKind = kind
        .parse()
        .map_err(|e: String| DomainError::validation("kind", e))?;
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };
    let candidate = FileCandidate {
        file_name: header_value(FILE_NAME_HEADER).unwrap_or_else(|| "upload".to_owned()),
        content_type: header_value(header::CONTENT_TYPE.as_str()).unwrap_or_default(),
        size_bytes: u64::try_from(body.len()).unwrap_or(u64::MAX),
    };

    let stored = svc
        .upload_file(&ctx, kind, candidate, body.to_vec())
        .await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /locales - String table of the default language.
pub async fn default_locale_table(
    Extension(catalog): Extension<Arc<LocaleCatalog>>,
) -> Json<LocaleTableDto> {
    let lang = catalog.default_locale().to_owned();
    Json(LocaleTableDto {
        strings: catalog.table(&lang),
        lang,
    })
}

/// GET /locales/{lang} - Requested language merged over English.
pub async fn locale_table(
    Extension(catalog): Extension<Arc<LocaleCatalog>>,
    Path(lang): Path<String>,
) -> Json<LocaleTableDto> {
    Json(LocaleTableDto {
        strings: catalog.table(&lang),
        lang,
    })
}
