//! Staff-only reporting pages, server-rendered as plain HTML tables.
//!
//! These are registered as ordinary routes (no routing-table tricks) and sit
//! behind the same bearer middleware as the JSON API. A non-staff requester
//! is bounced to the login prompt rather than 403'd, matching the admin-site
//! convention these pages come from.

use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Router,
};

use sweetshop_catalog::{StockBreakdown, Sweet};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::RequesterContext;

pub fn router() -> Router {
    Router::new()
        .route("/stock_report", get(stock_report))
        .route("/manage_stock", get(manage_stock))
}

/// GET /admin/stock_report — every record, name order, no filtering.
pub async fn stock_report(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
) -> axum::response::Response {
    if !requester.is_staff() {
        return Redirect::to("/auth/login").into_response();
    }

    let records = match services.sweets.list().await {
        Ok(records) => records,
        Err(e) => return errors::store_error_to_response(e),
    };

    let mut body = String::new();
    push_table(&mut body, "All sweets", &records);

    page("Stock Level Report", body).into_response()
}

/// GET /admin/manage_stock — availability partitions plus counts, for quick
/// toggling decisions.
pub async fn manage_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
) -> axum::response::Response {
    if !requester.is_staff() {
        return Redirect::to("/auth/login").into_response();
    }

    let records = match services.sweets.list().await {
        Ok(records) => records,
        Err(e) => return errors::store_error_to_response(e),
    };

    let all = records.clone();
    let breakdown = StockBreakdown::partition(records);

    let mut body = String::new();
    body.push_str(&format!(
        "<p>Total: {} &mdash; Available: {} &mdash; Unavailable: {}</p>\n",
        breakdown.total_count(),
        breakdown.available_count(),
        breakdown.unavailable_count(),
    ));
    push_table(&mut body, "All sweets", &all);
    push_table(&mut body, "Available to customers", &breakdown.available);
    push_table(&mut body, "Hidden from customers", &breakdown.unavailable);

    page("Stock Management Portal", body).into_response()
}

fn page(title: &str, body: String) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html><head><title>{title}</title></head>\n\
         <body><h1>{title}</h1>\n{body}</body></html>\n"
    ))
}

fn push_table(out: &mut String, caption: &str, records: &[Sweet]) {
    out.push_str(&format!(
        "<table><caption>{}</caption>\n\
         <tr><th>name</th><th>category</th><th>price</th>\
         <th>quantity</th><th>stock level</th><th>available</th></tr>\n",
        escape(caption)
    ));
    for sweet in records {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&sweet.name),
            sweet.category.label(),
            sweet.price,
            sweet.quantity,
            sweet.stock_level,
            if sweet.is_available { "yes" } else { "no" },
        ));
    }
    out.push_str("</table>\n");
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_escaped() {
        assert_eq!(escape("Bon<bons> & Co"), "Bon&lt;bons&gt; &amp; Co");
    }
}
