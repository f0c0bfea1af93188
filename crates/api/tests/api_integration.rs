//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use ::advice::{InMemoryAdviceService, ShoppingAdvisor};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain::{StatusPolicy, StoreService};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup_with(policy: StatusPolicy, advisor: ShoppingAdvisor) -> Router {
    let state = Arc::new(api::AppState::new(StoreService::seeded(policy), advisor));
    api::create_app(state, get_metrics_handle())
}

fn setup() -> Router {
    setup_with(StatusPolicy::Permissive, ShoppingAdvisor::offline())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn login_as(app: &Router, role: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/session",
        Some(json!({
            "id": format!("user_{role}"),
            "name": format!("Test {role}"),
            "email": format!("{role}@example.com"),
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

fn checkout_body() -> Value {
    json!({
        "address": "Wadajir District, Street 12",
        "city": "Mogadishu",
        "phone": "+252 61 700 0000",
        "payment_method": "EVC",
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();
    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_store_snapshot() {
    let app = setup();
    let (status, json) = send(&app, "GET", "/store", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["catalog"]["products"].as_array().unwrap().len(), 6);
    assert_eq!(json["orders"].as_array().unwrap().len(), 3);
    assert_eq!(json["orders"][0]["id"], "ORD-1709303");
}

#[tokio::test]
async fn test_product_filtering() {
    let app = setup();

    let (_, json) = send(&app, "GET", "/products?category=Fruits%20%26%20Veg", None).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (_, json) = send(&app, "GET", "/products?q=milk", None).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Whole Milk"]);
}

mod catalog_admin {
    use super::*;

    #[tokio::test]
    async fn test_mutations_require_admin() {
        let app = setup();
        let body = json!({"name": "Dates", "price": "4.50", "category": "Pantry"});

        let (status, _) = send(&app, "POST", "/products", Some(body.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        login_as(&app, "user").await;
        let (status, _) = send(&app, "POST", "/products", Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_product_crud() {
        let app = setup();
        login_as(&app, "admin").await;

        let (status, json) = send(
            &app,
            "POST",
            "/products",
            Some(json!({"name": "Dates", "price": 4.5, "category": "Pantry", "stock": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["noop"], false);
        assert_eq!(json["data"]["price"]["cents"], 450);
        let id = json["data"]["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("prod_"));

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/products/{id}"),
            Some(json!({"name": "Medjool Dates", "price": "6.00", "category": "Pantry"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["noop"], false);

        let (_, json) = send(&app, "DELETE", &format!("/products/{id}"), None).await;
        assert_eq!(json["noop"], false);
        let (_, json) = send(&app, "DELETE", &format!("/products/{id}"), None).await;
        assert_eq!(json["noop"], true);
    }

    #[tokio::test]
    async fn test_bad_price_rejected() {
        let app = setup();
        login_as(&app, "admin").await;

        for price in [json!("abc"), json!("1.234"), json!(-2)] {
            let (status, _) = send(
                &app,
                "POST",
                "/products",
                Some(json!({"name": "Dates", "price": price, "category": "Pantry"})),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_deleting_category_shows_in_check() {
        let app = setup();
        login_as(&app, "admin").await;

        let (_, json) = send(&app, "DELETE", "/categories/cat_3", None).await;
        assert_eq!(json["noop"], false);

        let (status, json) = send(&app, "GET", "/catalog/check", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!json["dangling_category_refs"].as_array().unwrap().is_empty());
    }
}

mod cart {
    use super::*;

    #[tokio::test]
    async fn test_cart_flow() {
        let app = setup();

        let (status, json) = send(&app, "POST", "/cart/items", Some(json!({"product_id": "prod_1"}))).await;
        assert_eq!(status, StatusCode::OK);
        send(&app, "POST", "/cart/items", Some(json!({"product_id": "prod_1"}))).await;
        let (_, json2) = send(&app, "POST", "/cart/items", Some(json!({"product_id": "prod_2"}))).await;
        assert!(json2["version"].as_u64().unwrap() > json["version"].as_u64().unwrap());

        let (_, json) = send(&app, "GET", "/cart", None).await;
        assert_eq!(json["total_quantity"], 3);
        assert_eq!(json["subtotal"]["cents"], 620);
        assert_eq!(json["delivery_fee"]["cents"], 500);
        assert_eq!(json["total"]["cents"], 1120);
    }

    #[tokio::test]
    async fn test_quantity_floor_and_noop() {
        let app = setup();
        send(&app, "POST", "/cart/items", Some(json!({"product_id": "prod_3"}))).await;

        let (_, json) = send(&app, "PATCH", "/cart/items/prod_3", Some(json!({"delta": 4}))).await;
        assert_eq!(json["data"]["items"][0]["quantity"], 5);

        let (_, json) = send(&app, "PATCH", "/cart/items/prod_3", Some(json!({"delta": -100}))).await;
        assert_eq!(json["data"]["items"][0]["quantity"], 1);

        let (_, json) = send(&app, "PATCH", "/cart/items/prod_3", Some(json!({"delta": -1}))).await;
        assert_eq!(json["noop"], true);

        let (_, json) = send(&app, "DELETE", "/cart/items/prod_3", None).await;
        assert_eq!(json["noop"], false);
        let (_, json) = send(&app, "DELETE", "/cart/items/prod_3", None).await;
        assert_eq!(json["noop"], true);
    }

    #[tokio::test]
    async fn test_unknown_product_not_found() {
        let app = setup();
        let (status, _) = send(&app, "POST", "/cart/items", Some(json!({"product_id": "nope"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod checkout {
    use super::*;

    #[tokio::test]
    async fn test_checkout_requires_session() {
        let app = setup();
        send(&app, "POST", "/cart/items", Some(json!({"product_id": "prod_1"}))).await;

        let (status, _) = send(&app, "POST", "/checkout", Some(checkout_body())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_checkout_validation() {
        let app = setup();
        login_as(&app, "user").await;

        let (status, _) = send(&app, "POST", "/checkout", Some(checkout_body())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "empty cart");

        send(&app, "POST", "/cart/items", Some(json!({"product_id": "prod_1"}))).await;

        let mut body = checkout_body();
        body["payment_method"] = json!("PayPal");
        let (status, _) = send(&app, "POST", "/checkout", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut body = checkout_body();
        body["phone"] = json!("  ");
        let (status, _) = send(&app, "POST", "/checkout", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_checkout_after_cart_cleared_records_nothing() {
        let app = setup();
        login_as(&app, "user").await;
        send(&app, "POST", "/cart/items", Some(json!({"product_id": "prod_1"}))).await;
        let (_, cleared) = send(&app, "DELETE", "/cart", None).await;
        assert_eq!(cleared["noop"], false);

        let (status, json) = send(&app, "POST", "/checkout", Some(checkout_body())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Cart is empty");

        let (_, orders) = send(&app, "GET", "/orders", None).await;
        assert_eq!(orders.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_checkout_places_order_and_clears_cart() {
        let app = setup();
        login_as(&app, "user").await;
        for id in ["prod_1", "prod_1", "prod_2"] {
            send(&app, "POST", "/cart/items", Some(json!({"product_id": id}))).await;
        }

        let (status, json) = send(&app, "POST", "/checkout", Some(checkout_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        let order = &json["data"];
        assert_eq!(order["total"]["cents"], 1120);
        assert_eq!(order["status"], "pending");
        assert_eq!(order["payment_method"], "EVC");
        assert_eq!(order["user_id"], "user_user");
        assert_eq!(order["items"].as_array().unwrap().len(), 2);
        let order_id = order["id"].as_str().unwrap().to_string();

        let (_, cart) = send(&app, "GET", "/cart", None).await;
        assert_eq!(cart["items"].as_array().unwrap().len(), 0);

        let (_, orders) = send(&app, "GET", "/orders", None).await;
        let orders = orders.as_array().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["id"], order_id.as_str());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/orders/{order_id}/message"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Total: $11.20"));
        assert!(text.contains("Fresh Bananas x2"));
    }
}

mod orders {
    use super::*;

    #[tokio::test]
    async fn test_status_update_requires_admin() {
        let app = setup();
        login_as(&app, "user").await;
        let (status, _) = send(
            &app,
            "PATCH",
            "/orders/ORD-1709302/status",
            Some(json!({"status": "processing"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_status_updates() {
        let app = setup();
        login_as(&app, "admin").await;

        let (status, json) = send(
            &app,
            "PATCH",
            "/orders/ORD-1709302/status",
            Some(json!({"status": "Processing"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "processing");

        let (status, json) = send(
            &app,
            "PATCH",
            "/orders/ORD-X/status",
            Some(json!({"status": "delivered"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["noop"], true);
        assert_eq!(json["data"], Value::Null);

        let (status, _) = send(
            &app,
            "PATCH",
            "/orders/ORD-1709302/status",
            Some(json!({"status": "lost"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, orders) = send(&app, "GET", "/orders", None).await;
        assert_eq!(orders.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_strict_policy_conflict() {
        let app = setup_with(StatusPolicy::Strict, ShoppingAdvisor::offline());
        login_as(&app, "admin").await;

        let (status, json) = send(
            &app,
            "PATCH",
            "/orders/ORD-1709302/status",
            Some(json!({"status": "delivered"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(json["error"].as_str().unwrap().contains("pending"));
    }

    #[tokio::test]
    async fn test_message_hidden_from_other_users() {
        let app = setup();
        login_as(&app, "user").await;
        let (status, _) = send(&app, "GET", "/orders/ORD-1709301/message", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod advice {
    use super::*;

    #[tokio::test]
    async fn test_advice_reply() {
        let service = InMemoryAdviceService::new();
        service.push_reply("Try a banana smoothie with whole milk.");
        let app = setup_with(
            StatusPolicy::Permissive,
            ShoppingAdvisor::new(Arc::new(service.clone())),
        );

        let (status, json) = send(&app, "POST", "/advice", Some(json!({"query": "breakfast?"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "Try a banana smoothie with whole milk.");
        assert!(service.requests()[0].product_digest.contains("Fresh Bananas ($1.50)"));
    }

    #[tokio::test]
    async fn test_offline_advice() {
        let app = setup();
        let (status, json) = send(&app, "POST", "/advice", Some(json!({"query": "hi"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["reply"],
            "Sorry, the AI assistant is currently offline (Missing API Key)."
        );
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let app = setup();
        let (status, _) = send(&app, "POST", "/advice", Some(json!({"query": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

mod admin_views {
    use super::*;

    #[tokio::test]
    async fn test_dashboard() {
        let app = setup();
        let (status, _) = send(&app, "GET", "/dashboard", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        login_as(&app, "admin").await;
        let (status, json) = send(&app, "GET", "/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overview"]["total_orders"], 3);
        assert_eq!(json["overview"]["revenue"]["cents"], 620 + 499 + 2049);
        assert_eq!(json["overview"]["product_count"], 6);

        send(&app, "POST", "/cart/items", Some(json!({"product_id": "prod_6"}))).await;
        send(&app, "POST", "/checkout", Some(checkout_body())).await;

        let (_, json) = send(&app, "GET", "/dashboard", None).await;
        assert_eq!(json["overview"]["total_orders"], 4);
        let top: Vec<&str> = json["top_customers"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["user_id"].as_str())
            .collect();
        assert!(top.contains(&"user_admin"));
    }

    #[tokio::test]
    async fn test_events_since() {
        let app = setup();
        login_as(&app, "admin").await;

        let (status, json) = send(&app, "GET", "/events?since=14", None).await;
        assert_eq!(status, StatusCode::OK);
        let events = json.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event_type"], "UserLoggedIn");
        assert_eq!(events[0]["sequence"], 15);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = setup();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_logout() {
    let app = setup();
    login_as(&app, "user").await;

    let (_, json) = send(&app, "DELETE", "/session", None).await;
    assert_eq!(json["noop"], false);
    let (_, json) = send(&app, "DELETE", "/session", None).await;
    assert_eq!(json["noop"], true);

    let (status, _) = send(&app, "GET", "/orders", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
