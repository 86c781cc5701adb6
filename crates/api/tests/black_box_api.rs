use reqwest::StatusCode;
use serde_json::json;

use sweetshop_api::app::{build_app, services};
use sweetshop_auth::hash_password;
use sweetshop_infra::NewUser;

const JWT_SECRET: &str = "test-secret";
const ADMIN_PASSWORD: &str = "admin-pass-123";
const CUSTOMER_PASSWORD: &str = "customer-pass-123";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod (in-memory stores), bound to an ephemeral port,
    /// pre-seeded with one staff and one customer account.
    async fn spawn() -> Self {
        let app_services = services::in_memory_services(JWT_SECRET);

        seed_account(&app_services, "admin", ADMIN_PASSWORD, true).await;
        seed_account(&app_services, "customer", CUSTOMER_PASSWORD, false).await;

        let app = build_app(app_services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn seed_account(
    app_services: &services::AppServices,
    username: &str,
    password: &str,
    is_staff: bool,
) {
    app_services
        .users
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password(password).unwrap(),
            is_staff,
        })
        .await
        .expect("failed to seed account");
}

async fn login(client: &reqwest::Client, base_url: &str, username: &str, password: &str) -> String {
    let res = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({"username": username, "password": password}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["access"].as_str().expect("access token").to_string()
}

async fn create_sweet(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let res = client
        .post(format!("{base_url}/sweets"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

fn sweet_body(name: &str, category: &str, price: &str, available: bool) -> serde_json::Value {
    json!({
        "name": name,
        "category": category,
        "price": price,
        "quantity": 10,
        "is_available": available,
    })
}

#[tokio::test]
async fn protected_endpoints_require_a_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (method, path) in [
        (reqwest::Method::GET, "/sweets"),
        (reqwest::Method::POST, "/sweets"),
        (reqwest::Method::GET, "/sweets/search"),
        (reqwest::Method::GET, "/sweets/1"),
        (reqwest::Method::PUT, "/sweets/1"),
        (reqwest::Method::DELETE, "/sweets/1"),
        (reqwest::Method::GET, "/report/export_csv"),
    ] {
        let res = client
            .request(method.clone(), format!("{}{}", srv.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{method} {path}");
    }
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn registration_then_login_issues_a_token_pair() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "s3cret-enough",
            "password2": "s3cret-enough",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"username": "alice", "email": "alice@example.com"}));

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({"username": "alice", "password": "s3cret-enough"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let tokens: serde_json::Value = res.json().await.unwrap();
    assert!(tokens["access"].is_string());
    assert!(tokens["refresh"].is_string());
}

#[tokio::test]
async fn mismatched_password_confirmation_creates_no_account() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "one-password",
            "password2": "another-password",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("password").is_some());

    // No account was created: login fails with either password.
    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({"username": "bob", "password": "one-password"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_username_is_a_field_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({
            "username": "customer",
            "email": "again@example.com",
            "password": "whatever-pw",
            "password2": "whatever-pw",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("username").is_some());
}

#[tokio::test]
async fn customers_see_only_available_records_without_the_flag() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;
    let customer = login(&client, &srv.base_url, "customer", CUSTOMER_PASSWORD).await;

    create_sweet(&client, &srv.base_url, &staff, sweet_body("Gummy Bears", "GUMMY", "2.50", true)).await;
    create_sweet(&client, &srv.base_url, &staff, sweet_body("Secret Truffle", "CHOCOLATE", "9.00", false)).await;

    let staff_list: Vec<serde_json::Value> = client
        .get(format!("{}/sweets", srv.base_url))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(staff_list.len(), 2);
    assert!(staff_list.iter().all(|s| s.get("is_available").is_some()));

    let customer_list: Vec<serde_json::Value> = client
        .get(format!("{}/sweets", srv.base_url))
        .bearer_auth(&customer)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(customer_list.len(), 1);
    assert_eq!(customer_list[0]["name"], "Gummy Bears");
    assert_eq!(customer_list[0]["price"], "2.50");
    assert!(customer_list[0].get("is_available").is_none());
}

#[tokio::test]
async fn search_applies_price_window_and_name_filters() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;

    for (name, category, price) in [
        ("Chocolate Bar", "CHOCOLATE", "3.50"),
        ("Fudge Square", "CHOCOLATE", "3.75"),
        ("Gummy Bears", "GUMMY", "4.00"),
        ("Gummy Worms", "GUMMY", "2.25"),
        ("Lollipop Deluxe", "HARD_CANDY", "7.50"),
    ] {
        create_sweet(&client, &srv.base_url, &staff, sweet_body(name, category, price, true)).await;
    }

    let in_window: Vec<serde_json::Value> = client
        .get(format!(
            "{}/sweets/search?min_price=2.00&max_price=5.00",
            srv.base_url
        ))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = in_window.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["Chocolate Bar", "Fudge Square", "Gummy Bears", "Gummy Worms"]
    );

    let gummy: Vec<serde_json::Value> = client
        .get(format!("{}/sweets/search?name=GuMmY", srv.base_url))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = gummy.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Gummy Bears", "Gummy Worms"]);

    // Malformed bound: ignored, not an error.
    let res = client
        .get(format!("{}/sweets/search?min_price=cheap", srv.base_url))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let all: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn customer_delete_is_forbidden_and_leaves_the_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;
    let customer = login(&client, &srv.base_url, "customer", CUSTOMER_PASSWORD).await;

    let created =
        create_sweet(&client, &srv.base_url, &staff, sweet_body("Toffee", "OTHER", "1.00", true)).await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .delete(format!("{}/sweets/{}", srv.base_url, id))
        .bearer_auth(&customer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/sweets/{}", srv.base_url, id))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn staff_delete_removes_the_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;

    let created =
        create_sweet(&client, &srv.base_url, &staff, sweet_body("Toffee", "OTHER", "1.00", true)).await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .delete(format!("{}/sweets/{}", srv.base_url, id))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/sweets/{}", srv.base_url, id))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invisible_record_is_indistinguishable_from_absent() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;
    let customer = login(&client, &srv.base_url, "customer", CUSTOMER_PASSWORD).await;

    let created = create_sweet(
        &client,
        &srv.base_url,
        &staff,
        sweet_body("Secret Truffle", "CHOCOLATE", "9.00", false),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .get(format!("{}/sweets/{}", srv.base_url, id))
        .bearer_auth(&customer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/sweets/{}", srv.base_url, id))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_reports_missing_fields_and_duplicate_names() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;

    let res = client
        .post(format!("{}/sweets", srv.base_url))
        .bearer_auth(&staff)
        .json(&json!({"name": "Nameless Wonder"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("category").is_some());
    assert!(body.get("price").is_some());

    create_sweet(&client, &srv.base_url, &staff, sweet_body("Toffee", "OTHER", "1.00", true)).await;
    let res = client
        .post(format!("{}/sweets", srv.base_url))
        .bearer_auth(&staff)
        .json(&sweet_body("Toffee", "OTHER", "2.00", false))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("name").is_some());
}

#[tokio::test]
async fn malformed_numeric_fields_are_field_errors_not_body_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;

    let res = client
        .post(format!("{}/sweets", srv.base_url))
        .bearer_auth(&staff)
        .json(&json!({
            "name": "Mystery Mix",
            "category": "OTHER",
            "price": "abc",
            "quantity": "lots",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["price"], json!(["A valid number is required."]));
    assert_eq!(body["quantity"], json!(["A valid integer is required."]));
}

#[tokio::test]
async fn update_replaces_all_mutable_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;
    let customer = login(&client, &srv.base_url, "customer", CUSTOMER_PASSWORD).await;

    let created =
        create_sweet(&client, &srv.base_url, &staff, sweet_body("Toffee", "OTHER", "1.00", true)).await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .put(format!("{}/sweets/{}", srv.base_url, id))
        .bearer_auth(&customer)
        .json(&sweet_body("Hijacked", "OTHER", "0.01", true))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .put(format!("{}/sweets/{}", srv.base_url, id))
        .bearer_auth(&staff)
        .json(&sweet_body("Butter Toffee", "CHOCOLATE", "1.75", false))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"].as_i64().unwrap(), id);
    assert_eq!(body["name"], "Butter Toffee");
    assert_eq!(body["category"], "CHOCOLATE");
    assert_eq!(body["price"], "1.75");
    assert_eq!(body["is_available"], false);
}

#[tokio::test]
async fn csv_export_is_staff_only_and_ignores_availability() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;
    let customer = login(&client, &srv.base_url, "customer", CUSTOMER_PASSWORD).await;

    create_sweet(&client, &srv.base_url, &staff, sweet_body("Gummy Bears", "GUMMY", "2.50", true)).await;
    create_sweet(&client, &srv.base_url, &staff, sweet_body("Secret Truffle", "CHOCOLATE", "9.00", false)).await;

    let res = client
        .get(format!("{}/report/export_csv", srv.base_url))
        .bearer_auth(&customer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/report/export_csv", srv.base_url))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/csv");

    let text = res.text().await.unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "name,category,price,quantity");
    assert_eq!(lines.len(), 3);
    assert!(!text.contains("is_available"));
}

#[tokio::test]
async fn admin_pages_are_staff_only() {
    let srv = TestServer::spawn().await;
    // No redirect following: we assert on the redirect itself.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;
    let customer = login(&client, &srv.base_url, "customer", CUSTOMER_PASSWORD).await;

    for path in ["/admin/stock_report", "/admin/manage_stock"] {
        let res = client
            .get(format!("{}{}", srv.base_url, path))
            .bearer_auth(&staff)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        let body = res.text().await.unwrap();
        assert!(body.contains("<table>"), "{path}");

        let res = client
            .get(format!("{}{}", srv.base_url, path))
            .bearer_auth(&customer)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(res.headers()["location"], "/auth/login", "{path}");
    }
}

#[tokio::test]
async fn manage_stock_shows_the_breakdown_counts() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let staff = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;

    create_sweet(&client, &srv.base_url, &staff, sweet_body("Gummy Bears", "GUMMY", "2.50", true)).await;
    create_sweet(&client, &srv.base_url, &staff, sweet_body("Secret Truffle", "CHOCOLATE", "9.00", false)).await;
    create_sweet(&client, &srv.base_url, &staff, sweet_body("Toffee", "OTHER", "1.00", true)).await;

    let body = client
        .get(format!("{}/admin/manage_stock", srv.base_url))
        .bearer_auth(&staff)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Stock Management Portal"));
    assert!(body.contains("Total: 3"));
    assert!(body.contains("Available: 2"));
    assert!(body.contains("Unavailable: 1"));
}
