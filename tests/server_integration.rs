use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{
    mocks::{MockBehavior, MockGenerator},
    test_utils::{body_json, create_app_with, create_fallback_app, json_request},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

mod common;

#[tokio::test]
async fn test_health_without_model() {
    let app = create_fallback_app();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "healthy", "model_loaded": false})
    );
}

#[tokio::test]
async fn test_health_with_loaded_model() {
    let (app, handle) = create_app_with(Arc::new(MockGenerator::echoing("Sure."))).await;
    assert!(handle.is_loaded());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let body = body_json(app.oneshot(request).await.unwrap()).await;

    assert_eq!(body["model_loaded"], true);
}

#[tokio::test]
async fn test_failed_load_keeps_serving() {
    let generator = MockGenerator::echoing("never used").with_load_error("weights not found");
    let (app, handle) = create_app_with(Arc::new(generator)).await;
    assert!(!handle.is_loaded());

    let health = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(health).await["model_loaded"], false);

    let response = app
        .oneshot(json_request("POST", "/chat", &json!({"message": "thanks!"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "response": "You're very welcome! Is there anything else I can help you with today?",
            "confidence": 0.9
        })
    );
}

#[tokio::test]
async fn test_root_reports_service_metadata() {
    let app = create_fallback_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "SmolLM2 AI Chat Service");
    assert_eq!(body["model"], "HuggingFaceTB/SmolLM2-135M");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_chat_stock_fallback() {
    let app = create_fallback_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/chat",
            &json!({
                "message": "is this in stock?",
                "seller_name": "TechHub",
                "product_info": {"name": "RTX 4090", "price": 1599, "stock": 3}
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let text = body["response"].as_str().unwrap();
    assert!(text.contains('3'));
    assert!(text.contains("Would you like to place an order?"));
}

#[tokio::test]
async fn test_chat_uses_model_reply() {
    let generator = Arc::new(MockGenerator::echoing(
        "The RTX 4090 is our fastest card. It handles 4K with ease. Anything else?",
    ));
    let (app, _handle) = create_app_with(generator.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/chat",
            &json!({
                "message": "Is it fast?",
                "seller_name": "TechHub",
                "product_info": {"name": "RTX 4090", "description": "Flagship GPU"},
                "context": {"userId": "abc"}
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "response": "The RTX 4090 is our fastest card. It handles 4K with ease.",
            "confidence": 0.9
        })
    );

    let prompts = generator.get_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].ends_with("Customer: Is it fast?\nTechHub: "));
    assert!(prompts[0].contains("Description: Flagship GPU"));
}

#[tokio::test]
async fn test_chat_generation_error_is_masked() {
    let (app, _handle) = create_app_with(Arc::new(MockGenerator::failing("timeout"))).await;

    let response = app
        .oneshot(json_request("POST", "/chat", &json!({"message": "hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["response"].as_str().unwrap().starts_with("Hello!"));
}

#[tokio::test]
async fn test_handler_fault_is_generic_500() {
    let (app, _handle) = create_app_with(Arc::new(MockGenerator::new(MockBehavior::Panic))).await;

    let response = app
        .oneshot(json_request("POST", "/chat", &json!({"message": "hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "Internal server error"})
    );
}

#[tokio::test]
async fn test_website_helper_fallback_on_checkout() {
    let app = create_fallback_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/website-helper",
            &json!({
                "message": "what do I do here?",
                "page_context": {"currentPage": "/checkout", "pageTitle": "Checkout"},
                "session_id": "helper-session-1"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["response"].as_str().unwrap().starts_with("On the checkout page"));
    assert_eq!(body["confidence"].as_f64().unwrap() as f32, 0.8);
}

#[tokio::test]
async fn test_website_helper_model_reply_is_one_sentence() {
    let generator = Arc::new(MockGenerator::echoing(
        "Open the Products page and use the category filter. Then sort by price.",
    ));
    let (app, _handle) = create_app_with(generator.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/website-helper",
            &json!({"message": "How do I find GPUs?", "page_context": {"currentPage": "/"}}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(
        body["response"],
        "Open the Products page and use the category filter."
    );
    assert!(generator.get_prompts()[0].contains("Page: /\n"));
}

#[tokio::test]
async fn test_chat_missing_message() {
    let app = create_fallback_app();

    let response = app
        .oneshot(json_request("POST", "/chat", &json!({"seller_name": "TechHub"})))
        .await
        .unwrap();

    // Should return 422 Unprocessable Entity for missing required field
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_chat_invalid_json() {
    let app = create_fallback_app();

    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from("invalid json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_content_type_validation() {
    let app = create_fallback_app();

    let request = Request::builder()
        .method("POST")
        .uri("/website-helper")
        .header("content-type", "text/plain")
        .body(Body::from(json!({"message": "hi"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_wrong_http_method() {
    let app = create_fallback_app();

    let response = app
        .oneshot(Request::builder().method("GET").uri("/chat").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_wrong_path() {
    let app = create_fallback_app();

    let response = app
        .oneshot(json_request("POST", "/wrong-path", &json!({"message": "hi"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_requests() {
    let generator = Arc::new(MockGenerator::echoing("We ship worldwide within two days."));
    let (app, _handle) = create_app_with(generator.clone()).await;

    let mut handles = vec![];
    for i in 0..5 {
        let app_clone = app.clone();
        handles.push(tokio::spawn(async move {
            let request = json_request(
                "POST",
                "/chat",
                &json!({"message": format!("Concurrent question {}", i)}),
            );
            app_clone.oneshot(request).await.unwrap()
        }));
    }

    for handle in handles {
        let response = handle.await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["response"],
            "We ship worldwide within two days."
        );
    }
    assert_eq!(generator.get_prompts().len(), 5);
}
