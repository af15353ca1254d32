//! Tests for the request executor

use super::*;
use crate::config::{AuthDescriptor, ClientConfig, Environment};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;

struct StaticToken(&'static str);

#[async_trait]
impl TokenSource for StaticToken {
    async fn fetch_token(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct FailingToken;

#[async_trait]
impl TokenSource for FailingToken {
    async fn fetch_token(&self) -> Result<String> {
        Err(Error::token("token endpoint returned status 500"))
    }
}

fn test_client() -> Client {
    let config = ClientConfig::new(
        AuthDescriptor::new("S1", "C1"),
        Environment::Production,
        "https://shop.example.com/token",
    );
    Client::with_token_source(config, StaticToken("tok_test"))
}

#[tokio::test]
async fn test_classify_401_uses_errors_field() {
    let client = test_client();

    let err = client
        .classify(
            Operation::GetCustomer,
            StatusCode::UNAUTHORIZED,
            json!({"errors": ["unauthorized"]}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unauthorized { .. }));
    assert_eq!(err.error_values(), vec![json!("unauthorized")]);
}

#[tokio::test]
async fn test_classify_401_wins_over_structured_errors() {
    let client = test_client();

    // Both rules match; 401 is checked first.
    let err = client
        .classify(
            Operation::GetCustomer,
            StatusCode::UNAUTHORIZED,
            json!({"errors": ["expired token"]}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unauthorized { .. }));
}

#[tokio::test]
async fn test_classify_structured_errors_any_status() {
    let client = test_client();

    let err = client
        .classify(
            Operation::ListOrders,
            StatusCode::OK,
            json!({"errors": ["quota exceeded"]}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { .. }));
    assert_eq!(err.error_values(), vec![json!("quota exceeded")]);
}

#[tokio::test]
async fn test_classify_422_wraps_whole_body() {
    let client = test_client();

    let err = client
        .classify(
            Operation::CreateSubscription,
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"error": "invalid"}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Fault { status: 422, .. }));
    assert_eq!(err.error_values(), vec![json!({"error": "invalid"})]);
}

#[tokio::test]
async fn test_classify_500_wraps_whole_body() {
    let client = test_client();

    let err = client
        .classify(
            Operation::ListOrders,
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"detail": "boom"}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Fault { status: 500, .. }));
}

#[tokio::test]
async fn test_classify_success_synchronizes() {
    let client = test_client();

    let outcome = client
        .classify(
            Operation::GetSubscription,
            StatusCode::OK,
            json!({
                "data": {
                    "type": "subscription",
                    "id": "1212",
                    "attributes": { "status": "active" }
                }
            }),
        )
        .await
        .unwrap();

    let key = outcome.single().unwrap().clone();
    let store = client.store().await;
    assert_eq!(
        store.get(&key).unwrap().attribute("status"),
        Some(&json!("active"))
    );
}

#[tokio::test]
async fn test_classify_success_non_jsonapi_passes_through() {
    let client = test_client();

    let body = json!({"client_token": "braintree_xyz"});
    let outcome = client
        .classify(Operation::ProcessorClientToken, StatusCode::OK, body.clone())
        .await
        .unwrap();

    assert_eq!(outcome.passthrough(), Some(&body));
}

#[tokio::test]
async fn test_token_failure_is_terminal() {
    let config = ClientConfig::new(
        AuthDescriptor::new("S1", "C1"),
        Environment::Production,
        "https://shop.example.com/token",
    );
    let client = Client::with_token_source(config, FailingToken);

    let err = client.customer().await.unwrap_err();
    assert!(matches!(err, Error::TokenFetch { .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_missing_placeholder_fails_before_any_io() {
    let client = test_client();

    // GetOrder needs order_id; the empty context fails resolution.
    let err = client
        .execute(Operation::GetOrder, None, &RequestContext::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UndefinedPlaceholder { .. }));
}

#[test]
fn test_errors_field_shapes() {
    assert_eq!(
        errors_field(&json!({"errors": ["a", "b"]})),
        vec![json!("a"), json!("b")]
    );
    assert_eq!(errors_field(&json!({"errors": null})), Vec::<Value>::new());
    assert_eq!(errors_field(&json!({})), Vec::<Value>::new());
    assert_eq!(
        errors_field(&json!({"errors": "nope"})),
        vec![json!("nope")]
    );
}

#[test]
fn test_structured_errors_shapes() {
    assert_eq!(
        structured_errors(&json!({"errors": ["a"]})),
        Some(vec![json!("a")])
    );
    // An empty list is not an error signal.
    assert_eq!(structured_errors(&json!({"errors": []})), None);
    assert_eq!(structured_errors(&json!({"errors": null})), None);
    assert_eq!(structured_errors(&json!({"data": []})), None);
}
