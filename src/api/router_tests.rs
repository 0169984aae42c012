//! End-to-end tests of the assembled router against the in-memory store.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::build_app;
use crate::app_state::AppState;
use crate::auth::{PasswordHasher, SessionCookies};
use crate::domain::{Role, UserAdminChanges};
use crate::persistence::MarketStore;
use crate::persistence::memory::MemoryStore;
use crate::persistence::seed::seed_reference_data;

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    body: Value,
}

struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    async fn new() -> Self {
        let store: Arc<dyn MarketStore> = Arc::new(MemoryStore::new());
        if seed_reference_data(store.as_ref()).await.is_err() {
            panic!("seed");
        }
        let (Ok(hasher), Ok(cookies)) = (
            PasswordHasher::new(64),
            SessionCookies::new(b"router-test-key", 3600, false),
        ) else {
            panic!("auth setup");
        };
        let state = AppState::new(store, hasher, cookies);
        let router = build_app(Path::new("no-such-frontend-dir"), Duration::from_secs(5))
            .with_state(state.clone());
        Self { router, state }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let Ok(request) = builder.body(body) else {
            panic!("request");
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});
        let status = response.status();
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().to_string());
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body");
        };
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Reply {
            status,
            cookie,
            body,
        }
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Reply {
        self.send(Method::GET, uri, cookie, None).await
    }

    async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> Reply {
        self.send(Method::POST, uri, cookie, Some(body)).await
    }

    async fn put(&self, uri: &str, cookie: Option<&str>, body: Value) -> Reply {
        self.send(Method::PUT, uri, cookie, Some(body)).await
    }

    /// Registers an account and returns `(id, session cookie)`.
    async fn register(&self, email: &str, role: &str) -> (i64, String) {
        let reply = self
            .post(
                "/api/auth/register",
                None,
                json!({
                    "name": "Test User",
                    "email": email,
                    "phone": "1",
                    "address": "x",
                    "password": "p",
                    "role": role,
                    "business_name": "Scrap Co",
                }),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
        let (Some(id), Some(cookie)) = (reply.body["user"]["id"].as_i64(), reply.cookie) else {
            panic!("registration reply: {}", reply.body);
        };
        (id, cookie)
    }

    /// Registers a customer and promotes it to admin.
    async fn admin(&self) -> String {
        let (id, cookie) = self.register("admin@x.com", "customer").await;
        let promote = UserAdminChanges {
            status: None,
            role: Some(Role::Admin),
        };
        if self.state.accounts.update_user(id, promote).await.is_err() {
            panic!("promote");
        }
        cookie
    }

    async fn create_product(&self, dealer_cookie: &str, name: &str) -> i64 {
        let reply = self
            .post(
                "/api/products",
                Some(dealer_cookie),
                json!({
                    "name": name,
                    "category": "metals",
                    "price": "3800",
                    "description": "Recycled sheets",
                    "stock": 50,
                }),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
        reply.body["product"]["id"].as_i64().unwrap_or_default()
    }
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|r| r["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn register_then_login_returns_same_user() {
    let app = TestApp::new().await;
    let reply = app
        .post(
            "/api/auth/register",
            None,
            json!({"name":"A","email":"a@x.com","phone":"1","address":"x","password":"p","role":"customer"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["user"]["role"], "customer");
    assert_eq!(reply.body["message"], "User registered successfully");
    assert!(reply.body["user"].get("password_hash").is_none());
    let registered_id = reply.body["user"]["id"].as_i64();

    let reply = app
        .post("/api/auth/login", None, json!({"email":"a@x.com","password":"p"}))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["id"].as_i64(), registered_id);
    assert!(reply.cookie.is_some_and(|c| c.starts_with("ecoscrap_session=")));
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_new_row() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    app.register("a@x.com", "customer").await;

    let reply = app
        .post(
            "/api/auth/register",
            None,
            json!({"name":"B","email":"a@x.com","phone":"2","address":"y","password":"q","role":"dealer"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["error"], "Email already registered");

    let users = app.get("/api/admin/users", Some(&admin)).await;
    assert_eq!(users.body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn missing_registration_field_is_named() {
    let app = TestApp::new().await;
    let reply = app
        .post(
            "/api/auth/register",
            None,
            json!({"name":"A","email":"a@x.com","address":"x","password":"p","role":"customer"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "phone is required");
}

#[tokio::test]
async fn blocked_account_cannot_log_in_or_use_old_session() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let (id, session) = app.register("c@x.com", "customer").await;

    let reply = app
        .put(&format!("/api/admin/users/{id}"), Some(&admin), json!({"status":"blocked"}))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["status"], "blocked");

    let reply = app
        .post("/api/auth/login", None, json!({"email":"c@x.com","password":"p"}))
        .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "Account is blocked");
    assert!(reply.cookie.is_none());

    let reply = app.get("/api/auth/profile", Some(&session)).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.register("c@x.com", "customer").await;
    let reply = app
        .post("/api/auth/login", None, json!({"email":"c@x.com","password":"nope"}))
        .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Invalid email or password");

    let reply = app.post("/api/auth/login", None, json!({"email":"c@x.com"})).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Email and password are required");
}

#[tokio::test]
async fn pickup_value_follows_material_rate() {
    let app = TestApp::new().await;
    let (_, customer) = app.register("c@x.com", "customer").await;

    let reply = app
        .post(
            "/api/pickups",
            Some(&customer),
            json!({"material":"Copper","weight":10,"date":"2026-03-01","time":"10:00","address":"x"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["pickup"]["estimated_value"].as_f64(), Some(6500.0));
    assert_eq!(reply.body["pickup"]["status"], "scheduled");
    assert!(reply.body["pickup"]["id"].as_str().is_some_and(|id| id.starts_with("PU")));

    let reply = app
        .post(
            "/api/pickups",
            Some(&customer),
            json!({"material":"Unobtainium","weight":"3","date":"2026-03-01","time":"10:00","address":"x"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["pickup"]["estimated_value"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn calculator_values_known_materials_only() {
    let app = TestApp::new().await;
    let reply = app
        .post("/api/calculate-estimate", None, json!({"material":"Copper","weight":10}))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["estimated_value"].as_f64(), Some(6500.0));
    assert_eq!(reply.body["rate_per_kg"].as_f64(), Some(650.0));

    let reply = app
        .post("/api/calculate-estimate", None, json!({"material":"Gold","weight":1}))
        .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Material rate not found");

    let reply = app
        .post("/api/calculate-estimate", None, json!({"material":"Copper"}))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Material and weight are required");
}

#[tokio::test]
async fn products_start_pending_and_approval_is_idempotent() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let (_, dealer) = app.register("d@x.com", "dealer").await;
    let id = app.create_product(&dealer, "Recycled Steel Sheets").await;

    let anonymous = app.get("/api/products", None).await;
    assert!(names(&anonymous.body).is_empty());

    for _ in 0..2 {
        let reply = app
            .post(&format!("/api/products/{id}/approve"), Some(&admin), json!({}))
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["product"]["status"], "approved");
    }

    let anonymous = app.get("/api/products", None).await;
    assert_eq!(names(&anonymous.body), vec!["Recycled Steel Sheets".to_string()]);

    let reply = app
        .post(&format!("/api/admin/products/{id}/reject"), Some(&admin), json!({}))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["product"]["status"], "rejected");
    assert_eq!(reply.body["message"], "Product rejected successfully");
}

#[tokio::test]
async fn listing_visibility_depends_on_caller() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let (_, dealer) = app.register("d@x.com", "dealer").await;
    let (_, other_dealer) = app.register("e@x.com", "dealer").await;
    let (_, customer) = app.register("c@x.com", "customer").await;

    let approved = app.create_product(&dealer, "Copper Wire Scraps").await;
    app.create_product(&dealer, "Brass Fittings").await;
    app.post(&format!("/api/products/{approved}/approve"), Some(&admin), json!({}))
        .await;

    for cookie in [None, Some(customer.as_str())] {
        let reply = app.get("/api/products?status=pending", cookie).await;
        assert_eq!(names(&reply.body), vec!["Copper Wire Scraps".to_string()]);
        let all_approved = reply.body.as_array().is_some_and(|rows| {
            rows.iter().all(|r| r["status"] == "approved")
        });
        assert!(all_approved);
    }

    let own = app.get("/api/products", Some(&dealer)).await;
    assert_eq!(names(&own.body).len(), 2);
    let foreign = app.get("/api/products", Some(&other_dealer)).await;
    assert_eq!(names(&foreign.body).len(), 1);

    let pending = app.get("/api/products?status=pending", Some(&admin)).await;
    assert_eq!(names(&pending.body), vec!["Brass Fittings".to_string()]);
    let everything = app.get("/api/products?status=all", Some(&admin)).await;
    assert_eq!(names(&everything.body).len(), 2);

    let searched = app.get("/api/products?search=COPPER", None).await;
    assert_eq!(names(&searched.body).len(), 1);
}

#[tokio::test]
async fn role_gates_are_enforced() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let (_, dealer) = app.register("d@x.com", "dealer").await;
    let (_, customer) = app.register("c@x.com", "customer").await;

    let reply = app
        .post(
            "/api/products",
            Some(&customer),
            json!({"name":"X","category":"metals","price":1,"description":"d","stock":1}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "Dealer access required");

    let reply = app
        .post(
            "/api/pickups",
            Some(&dealer),
            json!({"material":"Copper","weight":1,"date":"2026-03-01","time":"10:00","address":"x"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "Customer access required");

    let reply = app
        .post(
            "/api/transactions",
            Some(&dealer),
            json!({"items":[{"id":1}],"amount":10,"payment_method":"upi","address":"x","dealer_email":"d@x.com"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = app.get("/api/admin/users", Some(&customer)).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "Admin access required");

    let reply = app.get("/api/admin/users", Some(&admin)).await;
    assert_eq!(reply.status, StatusCode::OK);

    let reply = app.get("/api/admin/users", None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Authentication required");
}

#[tokio::test]
async fn partial_product_update_leaves_other_fields() {
    let app = TestApp::new().await;
    let (_, dealer) = app.register("d@x.com", "dealer").await;
    let (_, intruder) = app.register("e@x.com", "dealer").await;
    let id = app.create_product(&dealer, "Recycled Steel Sheets").await;

    let reply = app
        .put(&format!("/api/products/{id}"), Some(&dealer), json!({"price": 99}))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    let product = &reply.body["product"];
    assert_eq!(product["price"].as_f64(), Some(99.0));
    assert_eq!(product["name"], "Recycled Steel Sheets");
    assert_eq!(product["category"], "metals");
    assert_eq!(product["description"], "Recycled sheets");
    assert_eq!(product["stock"].as_i64(), Some(50));
    assert_eq!(product["status"], "pending");

    let reply = app
        .put(&format!("/api/products/{id}"), Some(&intruder), json!({"price": 1}))
        .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "Access denied");

    let reply = app
        .put(&format!("/api/products/{id}"), Some(&dealer), json!({"price": 0}))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn orders_are_scoped_and_counted() {
    let app = TestApp::new().await;
    let (_, dealer) = app.register("d@x.com", "dealer").await;
    let (_, customer) = app.register("c@x.com", "customer").await;
    let (_, other_customer) = app.register("o@x.com", "customer").await;

    let reply = app
        .post(
            "/api/transactions",
            Some(&customer),
            json!({"items":[{"id":1,"qty":2}],"amount":"7600","payment_method":"cod","address":"x","dealer_email":"d@x.com"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["transaction"]["status"], "pending");
    assert!(
        reply.body["transaction"]["id"]
            .as_str()
            .is_some_and(|id| id.starts_with("TXN"))
    );

    let reply = app
        .post(
            "/api/transactions",
            Some(&customer),
            json!({"items":[{"id":1}],"amount":10,"payment_method":"upi","address":"x","dealer_email":"ghost@x.com"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let sold = app.get("/api/transactions", Some(&dealer)).await;
    assert_eq!(sold.body.as_array().map(Vec::len), Some(1));
    let unrelated = app.get("/api/transactions", Some(&other_customer)).await;
    assert_eq!(unrelated.body.as_array().map(Vec::len), Some(0));

    let stats = app.get("/api/dashboard/stats", Some(&customer)).await;
    assert_eq!(stats.body["total_orders"].as_i64(), Some(1));
    assert_eq!(stats.body["total_spent"].as_f64(), Some(7600.0));
    let stats = app.get("/api/dashboard/stats", Some(&dealer)).await;
    assert_eq!(stats.body["orders_received"].as_i64(), Some(1));
    assert_eq!(stats.body["total_earnings"].as_f64(), Some(7600.0));
}

#[tokio::test]
async fn pickup_owner_or_admin_may_change_status() {
    let app = TestApp::new().await;
    let (_, customer) = app.register("c@x.com", "customer").await;
    let (_, stranger) = app.register("s@x.com", "customer").await;
    let reply = app
        .post(
            "/api/pickups",
            Some(&customer),
            json!({"material":"Steel","weight":4,"date":"2026-03-01","time":"10:00","address":"x"}),
        )
        .await;
    let id = reply.body["pickup"]["id"].as_str().unwrap_or_default().to_string();

    let reply = app
        .put(&format!("/api/pickups/{id}"), Some(&stranger), json!({"status":"cancelled"}))
        .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = app
        .put(&format!("/api/pickups/{id}"), Some(&customer), json!({"status":"completed"}))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["pickup"]["status"], "completed");

    let reply = app
        .put(&format!("/api/pickups/{id}"), Some(&customer), json!({"status":"lost"}))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let mine = app.get("/api/pickups", Some(&customer)).await;
    assert_eq!(mine.body.as_array().map(Vec::len), Some(1));
    let theirs = app.get("/api/pickups", Some(&stranger)).await;
    assert_eq!(theirs.body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn admin_updates_rates() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let reply = app
        .put(
            "/api/rates",
            Some(&admin),
            json!([{"material":"Copper","ratePerKg":"700","trend":"down"},{"material":"Gold","ratePerKg":9000}]),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["message"], "Rates updated successfully");

    let rates = app.get("/api/rates", None).await;
    let copper = rates
        .body
        .as_array()
        .and_then(|rows| rows.iter().find(|r| r["material"] == "Copper"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(copper["ratePerKg"].as_f64(), Some(700.0));
    assert_eq!(copper["trend"], "down");
    assert_eq!(copper["icon"], "♻️");
    assert_eq!(rates.body.as_array().map(Vec::len), Some(9));
    let has_gold = rates
        .body
        .as_array()
        .is_some_and(|rows| rows.iter().any(|r| r["material"] == "Gold"));
    assert!(!has_gold);

    let tips = app.get("/api/tips?category=Safety", None).await;
    assert_eq!(tips.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn profile_edit_and_logout() {
    let app = TestApp::new().await;
    let (_, session) = app.register("c@x.com", "customer").await;

    let reply = app
        .put("/api/auth/profile", Some(&session), json!({"phone":"555"}))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["phone"], "555");
    assert_eq!(reply.body["user"]["name"], "Test User");

    let reply = app.post("/api/auth/logout", Some(&session), json!({})).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["message"], "Logout successful");

    let reply = app.get("/api/auth/profile", Some(&session)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn change_password_through_the_api() {
    let app = TestApp::new().await;
    let (_, session) = app.register("c@x.com", "customer").await;
    let reply = app
        .post(
            "/api/auth/change-password",
            Some(&session),
            json!({"current_password":"p","new_password":"q","confirm_password":"r"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "New password and confirmation do not match");

    let reply = app
        .post(
            "/api/auth/change-password",
            Some(&session),
            json!({"current_password":"p","new_password":"q","confirm_password":"q"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    let reply = app
        .post("/api/auth/login", None, json!({"email":"c@x.com","password":"q"}))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn tampered_cookie_is_anonymous() {
    let app = TestApp::new().await;
    let (_, session) = app.register("c@x.com", "customer").await;
    let forged = format!("{session}x");
    let reply = app.get("/api/auth/profile", Some(&forged)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_paths_and_bad_json() {
    let app = TestApp::new().await;
    let reply = app.get("/api/nothing-here", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Resource not found");

    let reply = app.get("/missing.css", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = app.get("/health", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "healthy");

    let reply = app
        .send(Method::POST, "/api/auth/login", None, None)
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["error"].is_string());
}

#[tokio::test]
async fn malformed_ids_get_json_not_found() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let (_, dealer) = app.register("d@x.com", "dealer").await;

    let reply = app
        .put("/api/products/abc", Some(&dealer), json!({"price": 5}))
        .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Resource not found");

    let reply = app
        .post("/api/products/1x/approve", Some(&admin), json!({}))
        .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Resource not found");

    let reply = app
        .send(Method::DELETE, "/api/admin/users/not-a-number", Some(&admin), None)
        .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Resource not found");
}

#[tokio::test]
async fn unsupported_methods_get_json_body() {
    let app = TestApp::new().await;
    let reply = app.send(Method::DELETE, "/api/pickups", None, None).await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(reply.body["error"], "Method not allowed");

    let reply = app.send(Method::POST, "/health", None, None).await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(reply.body["error"], "Method not allowed");
}
