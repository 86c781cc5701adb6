//! Sweet inventory endpoints: list/create/search/retrieve/replace/delete and
//! the staff-only CSV export.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use sweetshop_catalog::visibility::{record_visible, visible_records};
use sweetshop_catalog::{report, SweetDraft, SweetFilter};
use sweetshop_core::{SweetId, ValidationErrors};
use sweetshop_infra::StoreError;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequesterContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sweets).post(create_sweet))
        .route("/search", get(search_sweets))
        .route(
            "/:id",
            get(get_sweet).put(update_sweet).delete(delete_sweet),
        )
}

/// GET /sweets — visible records in name order.
pub async fn list_sweets(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
) -> axum::response::Response {
    let records = match services.sweets.list().await {
        Ok(records) => records,
        Err(e) => return errors::store_error_to_response(e),
    };

    let audience = requester.audience();
    let visible = visible_records(audience, records);
    Json(dto::SweetResponse::list_for_audience(visible, audience)).into_response()
}

/// POST /sweets — staff only.
pub async fn create_sweet(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Json(body): Json<SweetDraft>,
) -> axum::response::Response {
    if !requester.is_staff() {
        return errors::forbidden();
    }

    let fields = match body.validate() {
        Ok(fields) => fields,
        Err(validation_errors) => return errors::validation_response(validation_errors),
    };

    match services.sweets.insert(fields).await {
        Ok(sweet) => (
            StatusCode::CREATED,
            Json(dto::SweetResponse::for_audience(sweet, requester.audience())),
        )
            .into_response(),
        Err(StoreError::Duplicate) => errors::validation_response(duplicate_name()),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /sweets/search — filter engine, then visibility policy.
pub async fn search_sweets(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    let filter = SweetFilter::from_raw(
        params.name.as_deref(),
        params.category.as_deref(),
        params.min_price.as_deref(),
        params.max_price.as_deref(),
    );

    let records = match services.sweets.list().await {
        Ok(records) => records,
        Err(e) => return errors::store_error_to_response(e),
    };

    let audience = requester.audience();
    let visible = visible_records(audience, filter.apply(records));
    Json(dto::SweetResponse::list_for_audience(visible, audience)).into_response()
}

/// GET /sweets/:id — 404 covers both "absent" and "invisible to this role".
pub async fn get_sweet(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let audience = requester.audience();

    match services.sweets.get(SweetId::from_i64(id)).await {
        Ok(Some(sweet)) if record_visible(audience, &sweet) => {
            Json(dto::SweetResponse::for_audience(sweet, audience)).into_response()
        }
        Ok(_) => errors::not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PUT /sweets/:id — staff only, full replace of mutable fields.
pub async fn update_sweet(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Path(id): Path<i64>,
    Json(body): Json<SweetDraft>,
) -> axum::response::Response {
    if !requester.is_staff() {
        return errors::forbidden();
    }

    let fields = match body.validate() {
        Ok(fields) => fields,
        Err(validation_errors) => return errors::validation_response(validation_errors),
    };

    match services.sweets.replace(SweetId::from_i64(id), fields).await {
        Ok(Some(sweet)) => {
            Json(dto::SweetResponse::for_audience(sweet, requester.audience())).into_response()
        }
        Ok(None) => errors::not_found(),
        Err(StoreError::Duplicate) => errors::validation_response(duplicate_name()),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// DELETE /sweets/:id — staff only.
pub async fn delete_sweet(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    if !requester.is_staff() {
        return errors::forbidden();
    }

    match services.sweets.delete(SweetId::from_i64(id)).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /report/export_csv — staff only; every record, availability
/// notwithstanding.
pub async fn export_csv(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
) -> axum::response::Response {
    if !requester.is_staff() {
        return errors::forbidden();
    }

    let records = match services.sweets.list().await {
        Ok(records) => records,
        Err(e) => return errors::store_error_to_response(e),
    };

    match report::export_csv(&records) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"sweets_report.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "csv export failed");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "export_error",
                "csv export failed",
            )
        }
    }
}

fn duplicate_name() -> ValidationErrors {
    ValidationErrors::single("name", "A sweet with this name already exists.")
}
