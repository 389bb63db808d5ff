pub mod drafts;
pub mod health;
pub mod job;
pub mod reports;
pub mod session;
pub mod validation;

use actix_web::web;

/// Register every route of the ledger API
pub fn routes(config: &mut web::ServiceConfig) {
    config
        .configure(health::health_config)
        .configure(session::session_config)
        .configure(job::handlers::job_config)
        .configure(reports::report_config)
        .configure(drafts::draft_config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::job::JobService;
    use crate::auth::AdminSessions;
    use crate::db::{connection::get_connection, migrations::run_migrations};
    use crate::draft::JobDraft;
    use actix_web::{http::StatusCode, test, App};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;

    const PASSWORD: &str = "1234";

    async fn memory_pool() -> SqlitePool {
        let pool = get_connection("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    macro_rules! app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($pool.clone()))
                    .app_data(web::Data::new(JobService::new($pool.clone(), "Test Shop")))
                    .app_data(web::Data::new(AdminSessions::new(PASSWORD)))
                    .app_data(validation::json_config())
                    .configure(routes),
            )
            .await
        };
    }

    macro_rules! bearer {
        ($app:expr) => {{
            let req = test::TestRequest::post()
                .uri("/session")
                .set_json(json!({ "password": PASSWORD }))
                .to_request();
            let login: Value = test::call_and_read_body_json(&$app, req).await;
            format!("Bearer {}", login["token"].as_str().unwrap())
        }};
    }

    fn job_body() -> Value {
        json!({
            "dropoff_date": "2024-03-01",
            "pickup_date": "2024-03-04",
            "customer_name": "Jung",
            "customer_phone": "010 2222 3333",
            "item_type": "pants",
            "work_hem": true,
            "price": 15000,
            "payment_method": "cash"
        })
    }

    #[actix_web::test]
    async fn privileged_routes_require_a_session() {
        let pool = memory_pool().await;
        let app = app!(pool);

        let req = test::TestRequest::post()
            .uri("/jobs")
            .set_json(job_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/jobs")
            .insert_header(("Authorization", "Bearer made-up"))
            .set_json(job_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn wrong_password_is_rejected() {
        let pool = memory_pool().await;
        let app = app!(pool);

        let req = test::TestRequest::post()
            .uri("/session")
            .set_json(json!({ "password": "0000" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn admin_creates_prints_and_collects_a_job() {
        let pool = memory_pool().await;
        let app = app!(pool);

        let req = test::TestRequest::post()
            .uri("/session")
            .set_json(json!({ "password": PASSWORD }))
            .to_request();
        let login: Value = test::call_and_read_body_json(&app, req).await;
        let bearer = format!("Bearer {}", login["token"].as_str().unwrap());

        let req = test::TestRequest::post()
            .uri("/jobs")
            .insert_header(("Authorization", bearer.as_str()))
            .set_json(job_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["job"]["id"].as_i64().unwrap();
        assert_eq!(created["job"]["customer_phone"], "010-2222-3333");
        assert_eq!(created["job"]["printed_count"], 0);

        let req = test::TestRequest::get()
            .uri(&format!("/jobs/{id}/receipt"))
            .insert_header(("Authorization", bearer.as_str()))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Test Shop"));
        assert!(text.contains("Work: hem-length"));
        assert!(text.contains(&format!("No.: #{id}")));

        let req = test::TestRequest::post()
            .uri(&format!("/jobs/{id}/printed"))
            .insert_header(("Authorization", bearer.as_str()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri("/pickups?date=2024-03-04")
            .to_request();
        let pickups: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pickups["jobs"].as_array().unwrap().len(), 1);
        assert_eq!(pickups["totals"]["customer_count"], 1);

        let req = test::TestRequest::post()
            .uri(&format!("/jobs/{id}/picked-up"))
            .insert_header(("Authorization", bearer.as_str()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri("/pickups?date=2024-03-04")
            .to_request();
        let pickups: Value = test::call_and_read_body_json(&app, req).await;
        assert!(pickups["jobs"].as_array().unwrap().is_empty());

        let req = test::TestRequest::get().uri(&format!("/jobs/{id}")).to_request();
        let job: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(job["printed_count"], 1);
        assert_eq!(job["picked_up"], true);
    }

    #[actix_web::test]
    async fn logout_revokes_the_token() {
        let pool = memory_pool().await;
        let app = app!(pool);

        let req = test::TestRequest::post()
            .uri("/session")
            .set_json(json!({ "password": PASSWORD }))
            .to_request();
        let login: Value = test::call_and_read_body_json(&app, req).await;
        let bearer = format!("Bearer {}", login["token"].as_str().unwrap());

        let req = test::TestRequest::delete()
            .uri("/session")
            .insert_header(("Authorization", bearer.as_str()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri("/jobs/1")
            .insert_header(("Authorization", bearer.as_str()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn negative_price_fails_validation() {
        let pool = memory_pool().await;
        let app = app!(pool);
        let sessions_token = {
            let req = test::TestRequest::post()
                .uri("/session")
                .set_json(json!({ "password": PASSWORD }))
                .to_request();
            let login: Value = test::call_and_read_body_json(&app, req).await;
            login["token"].as_str().unwrap().to_string()
        };

        let mut body = job_body();
        body["price"] = json!(-1);
        let req = test::TestRequest::post()
            .uri("/jobs")
            .insert_header(("Authorization", format!("Bearer {sessions_token}")))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_job_is_404_but_anonymous_reads_work() {
        let pool = memory_pool().await;
        let app = app!(pool);

        let req = test::TestRequest::get().uri("/jobs/42").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/jobs?start=2024-03-01&end=2024-03-31")
            .to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["totals"]["job_count"], 0);

        let req = test::TestRequest::get().uri("/reports/monthly").to_request();
        let monthly: Value = test::call_and_read_body_json(&app, req).await;
        assert!(monthly["latest"].is_null());
    }

    #[actix_web::test]
    async fn saving_a_draft_returns_the_job_and_next_form() {
        let pool = memory_pool().await;
        let app = app!(pool);
        let bearer = bearer!(app);

        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut draft = JobDraft::new(today);
        draft.item_type = "shirt".to_string();
        draft.customer_name = "Han".to_string();

        let req = test::TestRequest::post()
            .uri("/drafts/save")
            .insert_header(("Authorization", bearer.as_str()))
            .set_json(json!({ "draft": draft, "same_customer": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let saved: Value = test::read_body_json(resp).await;
        assert_eq!(saved["job"]["item_type"], "shirt");
        assert_eq!(saved["job"]["customer_phone"], "");
        assert_eq!(saved["next_draft"]["customer_name"], "Han");
    }

    #[actix_web::test]
    async fn invalid_draft_is_rejected_with_field_errors() {
        let pool = memory_pool().await;
        let app = app!(pool);
        let bearer = bearer!(app);

        let draft = JobDraft::new(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let req = test::TestRequest::post()
            .uri("/drafts/save")
            .insert_header(("Authorization", bearer.as_str()))
            .set_json(json!({ "draft": draft }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Validation failed");
        assert!(body["fields"]["draft.item_type"]["errors"].is_array());

        let req = test::TestRequest::get().uri("/jobs").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["totals"]["job_count"], 0);
    }

    #[actix_web::test]
    async fn malformed_draft_gets_the_json_error_shape() {
        let pool = memory_pool().await;
        let app = app!(pool);
        let bearer = bearer!(app);

        let req = test::TestRequest::post()
            .uri("/drafts/save")
            .insert_header(("Authorization", bearer.as_str()))
            .set_json(json!({ "draft": { "price": "x" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Request validation failed");
        assert!(body["fields"]["message"].is_string());
    }

    #[actix_web::test]
    async fn price_above_the_ceiling_fails_validation() {
        let pool = memory_pool().await;
        let app = app!(pool);
        let bearer = bearer!(app);

        let mut body = job_body();
        body["price"] = json!(i64::MAX);
        let req = test::TestRequest::post()
            .uri("/jobs")
            .insert_header(("Authorization", bearer.as_str()))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["fields"]["price"]["errors"].is_array());
    }
}
