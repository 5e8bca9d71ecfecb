pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::scan::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Scan API
        .route("/api/v1/scan/pdf", post(handlers::handle_scan_pdf))
        .route("/api/v1/scan/text", post(handlers::handle_scan_text))
        .route("/api/v1/ats", post(handlers::handle_ats))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::{BasicNormalizer, TextExtractor};

    const JOB: &str = "Seeking a Python developer with Django and AWS experience, 3+ years.";
    const RESUME: &str = "Jane Smith\nSkills: Python, Django, AWS\nExperience\nAcme Corp 2021 - present\nEducation\nB.Tech, State University";
    const BOUNDARY: &str = "talentmatch-test-boundary";

    /// Returns the same text for every upload, standing in for PDF parsing.
    struct FixedTextExtractor(&'static str);

    #[async_trait]
    impl TextExtractor for FixedTextExtractor {
        async fn extract_text(&self, _file_name: &str, _bytes: Bytes) -> String {
            self.0.to_string()
        }
    }

    fn app(extracted: &'static str) -> Router {
        build_router(AppState {
            config: Config::default(),
            extractor: Arc::new(FixedTextExtractor(extracted)),
            normalizer: Arc::new(BasicNormalizer),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(fields: &[(&str, &str)], files: &[&str]) -> Request<Body> {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        for file in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{file}\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4 stub\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/api/v1/scan/pdf")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(RESUME)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_scan_text_returns_results_in_order() {
        let request = json_request(
            "/api/v1/scan/text",
            json!({
                "job_description": JOB,
                "resumes": [
                    {"name": "jane", "text": RESUME},
                    {"name": "john", "text": "John Doe\nContact: john@example.com"}
                ],
                "priorities": {"relevance": "Ignore"}
            }),
        );
        let response = app(RESUME).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["name"], "jane");
        assert_eq!(results[0]["skills_score"], 100.0);
        assert_eq!(results[0]["matched_skills_count"], 3);
        assert_eq!(results[1]["name"], "john");
        assert!(body["scan_id"].is_string());
    }

    #[tokio::test]
    async fn test_scan_text_rejects_short_job_description() {
        let request = json_request(
            "/api/v1/scan/text",
            json!({"job_description": "Rust dev", "resumes": [{"name": "a", "text": RESUME}]}),
        );
        let response = app(RESUME).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Job description is too short to analyze");
    }

    #[tokio::test]
    async fn test_scan_text_rejects_unknown_priority() {
        let request = json_request(
            "/api/v1/scan/text",
            json!({
                "job_description": JOB,
                "resumes": [{"name": "a", "text": RESUME}],
                "priorities": {"skills": "Urgent"}
            }),
        );
        let response = app(RESUME).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scan_pdf_uses_file_names() {
        let request = multipart_request(
            &[("job_description", JOB), ("skills_priority", "Critical")],
            &["jane.pdf", "jane-copy.pdf"],
        );
        let response = app(RESUME).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["results"][0]["name"], "jane.pdf");
        assert_eq!(body["results"][1]["name"], "jane-copy.pdf");
        assert_eq!(body["results"][0]["final_score"], body["results"][1]["final_score"]);
    }

    #[tokio::test]
    async fn test_scan_pdf_requires_files() {
        let request = multipart_request(&[("job_description", JOB)], &[]);
        let response = app(RESUME).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "At least one resume PDF is required");
    }

    #[tokio::test]
    async fn test_scan_pdf_rejects_unreadable_file() {
        let request = multipart_request(&[("job_description", JOB)], &["scan.pdf"]);
        let response = app("   ").oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Could not extract text from scan.pdf");
    }

    #[tokio::test]
    async fn test_ats_endpoint_uses_job_description_skills() {
        let request = json_request(
            "/api/v1/ats",
            json!({"resume_text": RESUME, "job_description": JOB}),
        );
        let response = app(RESUME).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["score"].as_f64().unwrap() > 50.0);
        assert_eq!(body["matched_reference_skills"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_ats_endpoint_scores_blank_resume_zero() {
        let request = json_request("/api/v1/ats", json!({"resume_text": ""}));
        let response = app(RESUME).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["score"], 0.0);
    }
}
