use api::{AppState, config::ServerConfig, prepare_database};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use common::database::{DatabaseConfig, init_pool};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let config = ServerConfig::default();
    let pool = init_pool(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory pool");
    prepare_database(&pool, &config)
        .await
        .expect("prepare database");
    api::app(AppState::new(pool, config))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, set_cookie, json)
}

async fn register(app: &Router, phone: &str) -> String {
    let (status, cookie, body) = send(
        app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({"name": "Asha", "phone": phone, "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    cookie.expect("session cookie")
}

async fn employee_login(app: &Router) -> String {
    let (status, cookie, _) = send(
        app,
        Method::POST,
        "/api/employee/login",
        None,
        Some(json!({"username": "admin", "password": "admin123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    cookie.expect("employee cookie")
}

#[tokio::test]
async fn test_health_and_seeded_inventory() {
    let app = test_app().await;

    let (status, _, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _, cars) = send(&app, Method::GET, "/api/cars", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cars.as_array().unwrap().len(), 3);

    let (_, _, suvs) = send(&app, Method::GET, "/api/cars?type=suv", None, None).await;
    let suvs = suvs.as_array().unwrap();
    assert_eq!(suvs.len(), 1);
    assert_eq!(suvs[0]["make"], "Hyundai");
    assert_eq!(suvs[0]["type"], "suv");
}

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let app = test_app().await;

    let (status, _, body) = send(&app, Method::GET, "/api/user", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not logged in");

    let cookie = register(&app, "9876543210").await;
    assert!(cookie.starts_with("customer_session="));

    let (status, _, user) = send(&app, Method::GET, "/api/user", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Asha");
    assert_eq!(user["phone"], "9876543210");

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({"name": "Other", "phone": "9876543210", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Phone number already registered");
}

#[tokio::test]
async fn test_login_and_logout() {
    let app = test_app().await;
    register(&app, "9876500000").await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({"phone": "9876500000", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, cookie, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({"phone": "9876500000", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let cookie = cookie.unwrap();

    let (status, _, _) = send(&app, Method::POST, "/api/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&app, Method::GET, "/api/user", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_is_rate_limited() {
    let app = test_app().await;
    register(&app, "9000000001").await;

    let attempt = json!({"phone": "9000000001", "password": "nope-nope"});
    for _ in 0..5 {
        let (status, _, _) =
            send(&app, Method::POST, "/api/login", None, Some(attempt.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, _, _) = send(&app, Method::POST, "/api/login", None, Some(attempt)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_cart_requires_session() {
    let app = test_app().await;

    let (status, _, body) = send(&app, Method::GET, "/api/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Login required");

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/cart/add",
        Some("customer_session=stale-token"),
        Some(json!({"car_id": "car-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cart_add_remove_and_checkout() {
    let app = test_app().await;
    let cookie = register(&app, "9111111111").await;

    for car_id in ["car-1", "car-2", "car-1"] {
        let (status, _, _) = send(
            &app,
            Method::POST,
            "/api/cart/add",
            Some(&cookie),
            Some(json!({"car_id": car_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/cart/add",
        Some(&cookie),
        Some(json!({"car_id": "car-404"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, cart) = send(&app, Method::GET, "/api/cart", Some(&cookie), None).await;
    let ids: Vec<_> = cart
        .as_array()
        .unwrap()
        .iter()
        .map(|car| car["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["car-1", "car-2"]);

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/cart/remove",
        Some(&cookie),
        Some(json!({"car_id": "car-2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) =
        send(&app, Method::POST, "/api/cart/checkout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Checkout successful! Our team will contact you shortly."
    );
    assert_eq!(body["total"], 800000);

    let (_, _, cart) = send(&app, Method::GET, "/api/cart", Some(&cookie), None).await;
    assert!(cart.as_array().unwrap().is_empty());

    let (status, _, body) =
        send(&app, Method::POST, "/api/cart/checkout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cart is empty");

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/cart/add",
        Some(&cookie),
        Some(json!({"car_id": "car-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, _, profile) = send(&app, Method::GET, "/api/profile", Some(&cookie), None).await;
    let orders = profile["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["car_name"], "Toyota Corolla");
}

#[tokio::test]
async fn test_checkout_conflict_when_car_sold_elsewhere() {
    let app = test_app().await;
    let first = register(&app, "9222222222").await;
    let second = register(&app, "9333333333").await;

    for cookie in [&first, &second] {
        send(
            &app,
            Method::POST,
            "/api/cart/add",
            Some(cookie),
            Some(json!({"car_id": "car-3"})),
        )
        .await;
    }

    let (status, _, _) = send(&app, Method::POST, "/api/cart/checkout", Some(&first), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) =
        send(&app, Method::POST, "/api/cart/checkout", Some(&second), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Hyundai Creta is no longer available");
}

#[tokio::test]
async fn test_inquiries_reach_the_back_office() {
    let app = test_app().await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/sell",
        None,
        Some(json!({
            "owner_name": "Ravi",
            "phone": "9444444444",
            "make": "Maruti",
            "model": "Swift",
            "year": 2017,
            "asking_price": 450000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let request_id = body["request_id"].as_str().unwrap().to_string();

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({"name": "Ravi", "email": "not-an-email", "message": "Hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({"name": "Ravi", "email": "ravi@example.com", "message": "Hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let employee = employee_login(&app).await;

    let (status, _, requests) = send(
        &app,
        Method::GET,
        "/api/employee/sell-requests",
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(requests[0]["status"], "pending");

    let (status, _, _) = send(
        &app,
        Method::PUT,
        &format!("/api/employee/sell-requests/{}/status", request_id),
        Some(&employee),
        Some(json!({"status": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, stats) = send(&app, Method::GET, "/api/employee/stats", Some(&employee), None).await;
    assert_eq!(stats["total_cars"], 3);
    assert_eq!(stats["pending_sell_requests"], 0);
    assert_eq!(stats["contacts"], 1);
}

#[tokio::test]
async fn test_employee_routes_require_employee_session() {
    let app = test_app().await;
    let customer = register(&app, "9555555555").await;

    let (status, _, _) = send(&app, Method::GET, "/api/employee/stats", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) =
        send(&app, Method::GET, "/api/employee/stats", Some(&customer), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/employee/login",
        None,
        Some(json!({"username": "admin", "password": "letmein"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_employee_manages_inventory() {
    let app = test_app().await;
    let employee = employee_login(&app).await;

    let (_, _, who) = send(&app, Method::GET, "/api/employee/check", Some(&employee), None).await;
    assert_eq!(who["username"], "admin");

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/employee/cars",
        Some(&employee),
        Some(json!({"make": "Tata", "model": "Nexon", "price": 950000, "type": "suv"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let car_id = body["car"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["car"]["status"], "available");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &format!("/api/employee/cars/{}", car_id),
        Some(&employee),
        Some(json!({"price": 900000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["car"]["price"], 900000);
    assert_eq!(body["car"]["model"], "Nexon");

    let (status, _, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/employee/cars/{}", car_id),
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/employee/cars/{}", car_id),
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, cars) = send(&app, Method::GET, "/api/employee/cars", Some(&employee), None).await;
    assert_eq!(cars.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_employee_directory_is_admin_only() {
    let config = ServerConfig::default();
    let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
    prepare_database(&pool, &config).await.unwrap();
    api::repositories::EmployeeRepository::new(pool.clone())
        .create("ravi", "Ravi Kumar", "secret1")
        .await
        .unwrap();
    let app = api::app(AppState::new(pool, config));

    let admin = employee_login(&app).await;
    let (status, _, employees) =
        send(&app, Method::GET, "/api/employee/employees", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let employees = employees.as_array().unwrap();
    assert_eq!(employees.len(), 2);
    assert!(employees.iter().all(|e| e.get("password_hash").is_none()));
    assert_eq!(employees[1]["name"], "Ravi Kumar");

    let (_, staff, _) = send(
        &app,
        Method::POST,
        "/api/employee/login",
        None,
        Some(json!({"username": "ravi", "password": "secret1"})),
    )
    .await;
    let (status, _, body) = send(
        &app,
        Method::GET,
        "/api/employee/employees",
        staff.as_deref(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin access required");

    let (status, _, _) = send(&app, Method::GET, "/api/employee/employees", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_social_links_saved_by_staff_read_by_anyone() {
    let app = test_app().await;

    let (status, _, links) =
        send(&app, Method::GET, "/api/settings/social-links", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        links,
        json!({"facebook_url": "", "whatsapp_url": "", "instagram_url": ""})
    );

    let links = json!({
        "facebook_url": "https://facebook.com/showroom",
        "instagram_url": "https://instagram.com/showroom"
    });
    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/employee/social-links",
        None,
        Some(links.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let employee = employee_login(&app).await;
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/employee/social-links",
        Some(&employee),
        Some(links),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Social links saved successfully");

    send(
        &app,
        Method::POST,
        "/api/employee/social-links",
        Some(&employee),
        Some(json!({"instagram_url": "https://instagram.com/showroom"})),
    )
    .await;

    let (_, _, links) = send(&app, Method::GET, "/api/settings/social-links", None, None).await;
    assert_eq!(links["facebook_url"], "");
    assert_eq!(links["whatsapp_url"], "");
    assert_eq!(links["instagram_url"], "https://instagram.com/showroom");
}
