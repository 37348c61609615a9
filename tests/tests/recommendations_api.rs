use application::mock_data::mock_recommendations;
use application::RecommendationService;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use presentation::{create_router, AppState};
use serde_json::{json, Value};
use tests::{researcher, MockUpstream, UpstreamScript};
use tower::ServiceExt;

const PROFILE: &str =
    r#"{"major":"Computer Science","keywords":"machine learning","educationLevel":"masters_student"}"#;

async fn post(upstream: &MockUpstream, api_key: Option<&str>, body: &str) -> (StatusCode, Value) {
    let service = RecommendationService::from_config(&upstream.config(api_key));
    let app = create_router(AppState::new(service));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/recommendations")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn computed_similarity_overrides_lower_llm_rate() {
    let upstream = MockUpstream::start(UpstreamScript {
        synthesis: json!([{
            "id": "0000-0002-1825-0097",
            "name": "Program Synthesis Lab",
            "keywords": ["program synthesis", "LLM"],
            "matchRate": 70,
            "memberCount": 14,
            "careerScenario": "AI career scenario pending..."
        }])
        .to_string(),
        ..UpstreamScript::default()
    })
    .await
    .unwrap();

    let (status, body) = post(&upstream, Some("test-key"), PROFILE).await;
    assert_eq!(status, StatusCode::OK);
    let labs = body.as_array().unwrap();
    assert_eq!(labs.len(), 1);
    assert_eq!(labs[0]["matchRate"], 92);
    assert_eq!(labs[0]["similarityScore"], 92.0);
    assert_eq!(
        labs[0]["careerScenario"],
        "Graduates move into applied research roles."
    );

    let recorded = upstream.recorded.lock().unwrap();
    assert_eq!(recorded.searches, vec!["machine learning Computer Science"]);
    assert_eq!(recorded.embeddings.len(), 2);
    assert_eq!(recorded.chat_requests.len(), 2);
    assert_eq!(
        recorded.chat_requests[0]["response_format"]["type"],
        "json_object"
    );
}

#[tokio::test]
async fn wrapped_labs_array_is_accepted() {
    let upstream = MockUpstream::start(UpstreamScript {
        synthesis: json!({ "labs": [
            { "id": "temp-lab-id-1", "name": "Vision Lab", "matchRate": 140, "careerScenario": "Solid placement record." },
            { "id": "temp-lab-id-2", "name": "Speech Lab", "matchRate": -3, "careerScenario": "Growing field." }
        ]})
        .to_string(),
        ..UpstreamScript::default()
    })
    .await
    .unwrap();

    let (status, body) = post(&upstream, Some("test-key"), PROFILE).await;
    assert_eq!(status, StatusCode::OK);
    let rates: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|lab| lab["matchRate"].as_i64().unwrap())
        .collect();
    assert_eq!(rates, vec![100, 0]);
}

#[tokio::test]
async fn unrecognized_llm_object_is_a_server_error() {
    let upstream = MockUpstream::start(UpstreamScript {
        synthesis: r#"{"advice":"study more"}"#.to_string(),
        ..UpstreamScript::default()
    })
    .await
    .unwrap();

    let (status, body) = post(&upstream, Some("test-key"), PROFILE).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "A problem occurred while fetching recommendations."
    );
    let details = body["details"].as_str().unwrap();
    assert!(details.starts_with("Details: "));
    assert!(details.contains("expected array format"));
}

#[tokio::test]
async fn missing_credential_serves_mock_set() {
    let upstream = MockUpstream::start(UpstreamScript::default()).await.unwrap();

    let (status, body) = post(&upstream, None, PROFILE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::to_value(mock_recommendations()).unwrap());

    let recorded = upstream.recorded.lock().unwrap();
    assert_eq!(recorded.searches.len(), 1);
    assert!(recorded.embeddings.is_empty());
    assert!(recorded.chat_requests.is_empty());
}

#[tokio::test]
async fn empty_directory_with_credential_serves_mock_set() {
    let upstream = MockUpstream::start(UpstreamScript {
        researchers: Value::Null,
        ..UpstreamScript::default()
    })
    .await
    .unwrap();

    let (status, body) = post(&upstream, Some("test-key"), PROFILE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "mock-lab-ai-detailed");
}

#[tokio::test]
async fn low_similarity_candidates_fall_back_to_directory_order() {
    let upstream = MockUpstream::start(UpstreamScript {
        researchers: json!([
            researcher("0000-0001-0000-0001", "First Researcher"),
            researcher("0000-0001-0000-0002", "Second Researcher"),
        ]),
        candidate_similarity: 0.05,
        synthesis: json!([{ "id": "0000-0001-0000-0001", "name": "First Lab", "matchRate": 60 }])
            .to_string(),
        ..UpstreamScript::default()
    })
    .await
    .unwrap();

    let (status, body) = post(&upstream, Some("test-key"), PROFILE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["matchRate"], 60);
    assert!(body[0].get("similarityScore").is_none());

    let recorded = upstream.recorded.lock().unwrap();
    let prompt = recorded.chat_requests[0]["messages"][0]["content"]
        .as_str()
        .unwrap();
    assert!(prompt.contains("ORCID ID: 0000-0001-0000-0001\n"));
    assert!(prompt.contains("ORCID ID: 0000-0001-0000-0002\n"));
}

#[tokio::test]
async fn failing_embedding_service_still_answers() {
    let upstream = MockUpstream::start(UpstreamScript {
        researchers: json!([
            researcher("0000-0002-1825-0097", "Ada Lovelace"),
            researcher("0000-0001-0000-0002", "Alan Turing"),
        ]),
        embedding_status: StatusCode::INTERNAL_SERVER_ERROR,
        synthesis: json!([{
            "id": "0000-0002-1825-0097",
            "name": "Program Synthesis Lab",
            "matchRate": 70
        }])
        .to_string(),
        ..UpstreamScript::default()
    })
    .await
    .unwrap();

    let (status, body) = post(&upstream, Some("test-key"), PROFILE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["matchRate"], 70);
    assert!(body[0].get("similarityScore").is_none());
    assert_eq!(
        body[0]["careerScenario"],
        "Graduates move into applied research roles."
    );

    let recorded = upstream.recorded.lock().unwrap();
    assert_eq!(recorded.embeddings.len(), 1);
    let prompt = recorded.chat_requests[0]["messages"][0]["content"]
        .as_str()
        .unwrap();
    assert!(prompt.contains("ORCID ID: 0000-0002-1825-0097\n"));
    assert!(prompt.contains("ORCID ID: 0000-0001-0000-0002\n"));
    assert!(!prompt.contains("computed similarity:"));
}

#[tokio::test]
async fn directory_failure_is_a_server_error() {
    let upstream = MockUpstream::start(UpstreamScript {
        orcid_status: StatusCode::BAD_GATEWAY,
        ..UpstreamScript::default()
    })
    .await
    .unwrap();

    let (status, body) = post(&upstream, Some("test-key"), PROFILE).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn invalid_profile_never_reaches_upstream() {
    let upstream = MockUpstream::start(UpstreamScript::default()).await.unwrap();

    let (status, body) = post(
        &upstream,
        Some("test-key"),
        r#"{"major":"Computer Science","keywords":"   ","educationLevel":"masters_student"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["keywords"][0],
        "Keywords of interest are required."
    );
    assert!(upstream.recorded.lock().unwrap().searches.is_empty());
}
