//! HTTP handler functions for the housing map dashboard.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};
use housing_map_dashboard::{html, render_cycle};
use housing_map_filter::apply;
use housing_map_server_models::{ApiError, ApiHealth, ApiRecords, DashboardQuery, QueryError};

use crate::AppState;

type QueryPairs = web::Query<Vec<(String, String)>>;

fn parse_query(params: QueryPairs) -> Result<DashboardQuery, QueryError> {
    DashboardQuery::from_pairs(params.into_inner()).inspect_err(|e| {
        log::warn!("Rejected dashboard query: {e}");
    })
}

/// `GET /`
///
/// Runs one render cycle and returns the HTML dashboard.
pub async fn index(state: web::Data<AppState>, params: QueryPairs) -> HttpResponse {
    match parse_query(params) {
        Ok(query) => {
            let criteria = query.to_criteria(state.dataset);
            let page = render_cycle(state.dataset, &criteria);
            HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(html::render_page(&page))
        }
        Err(e) => HttpResponse::BadRequest()
            .content_type(ContentType::html())
            .body(html::render_error_page(&e.to_string())),
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/dashboard`
///
/// Returns the full render cycle (sidebar, summary and panels) as JSON.
pub async fn dashboard(state: web::Data<AppState>, params: QueryPairs) -> HttpResponse {
    match parse_query(params) {
        Ok(query) => {
            let criteria = query.to_criteria(state.dataset);
            HttpResponse::Ok().json(render_cycle(state.dataset, &criteria))
        }
        Err(e) => HttpResponse::BadRequest().json(ApiError::from(&e)),
    }
}

/// `GET /api/records`
///
/// Returns the filtered records with the dataset size.
pub async fn records(state: web::Data<AppState>, params: QueryPairs) -> HttpResponse {
    match parse_query(params) {
        Ok(query) => {
            let criteria = query.to_criteria(state.dataset);
            let view = apply(state.dataset, &criteria);
            HttpResponse::Ok().json(ApiRecords::new(&view, criteria))
        }
        Err(e) => HttpResponse::BadRequest().json(ApiError::from(&e)),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use housing_map_dataset::{Dataset, SyntheticConfig, synthesize};
    use housing_map_housing_models::IncomeLevel;

    use super::*;
    use crate::configure;

    fn dataset() -> &'static Dataset {
        Box::leak(Box::new(synthesize(&SyntheticConfig::default())))
    }

    macro_rules! app {
        ($dataset:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState { dataset: $dataset }))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = app!(dataset());
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn index_renders_html() {
        let app = app!(dataset());
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("California Housing Data (1990)"));
        assert!(text.contains("out of 1000 records"));
    }

    #[actix_web::test]
    async fn index_rejects_bad_income() {
        let app = app!(dataset());
        let req = test::TestRequest::get().uri("/?income=rich").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn dashboard_json_reflects_query() {
        let dataset = dataset();
        let app = app!(dataset);
        let req = test::TestRequest::get()
            .uri("/api/dashboard?income=medium&min_price=200000")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["criteria"]["incomeLevel"], "medium");
        assert_eq!(body["criteria"]["minPrice"], 200_000);
        assert_eq!(body["sidebar"]["price"]["value"], 200_000);

        let expected = dataset
            .iter()
            .filter(|r| {
                r.median_house_value >= 200_000 && IncomeLevel::Medium.contains(r.median_income)
            })
            .count();
        assert_eq!(
            body["summary"],
            format!("Showing {expected} out of 1000 records")
        );
    }

    #[actix_web::test]
    async fn explicit_empty_selection_gives_warnings() {
        let app = app!(dataset());
        let req = test::TestRequest::get()
            .uri("/api/dashboard?locations=")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["summary"], "Showing 0 out of 1000 records");
        assert_eq!(body["map"]["kind"], "warning");
        assert_eq!(body["histogram"]["kind"], "warning");
        assert_eq!(body["table"]["kind"], "notice");
    }

    #[actix_web::test]
    async fn records_filters_by_location() {
        let dataset = dataset();
        let app = app!(dataset);
        let req = test::TestRequest::get()
            .uri("/api/records?locations=INLAND&locations=NEAR%20OCEAN&income=high")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let records = body["records"].as_array().unwrap();
        assert_eq!(body["total"], 1000);
        assert_eq!(body["count"], records.len());
        assert!(records.iter().all(|r| {
            r["ocean_proximity"] == "INLAND" || r["ocean_proximity"] == "NEAR OCEAN"
        }));
        assert!(records.iter().all(|r| r["median_income"].as_f64().unwrap() >= 4.5));
    }

    #[actix_web::test]
    async fn records_rejects_bad_price() {
        let app = app!(dataset());
        let req = test::TestRequest::get()
            .uri("/api/records?min_price=cheap")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("min_price"));
    }
}
