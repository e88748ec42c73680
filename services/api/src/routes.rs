//! Showroom API routes
//!
//! Customer-facing endpoints live here; the back office is in
//! [`employee`].

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use common::models::{
    AuthResponse, CartItemRequest, CheckoutResponse, ContactRequest, LoginRequest,
    MessageResponse, Profile, ProfileUser, RegisterRequest, SellRequest, ServiceRequest,
};
use serde_json::json;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult, internal},
    middleware::{
        CUSTOMER_SESSION_COOKIE, customer_session, removal_cookie, resolve_customer,
        session_cookie,
    },
    models::{CarQuery, CurrentCustomer},
    repositories::CheckoutOutcome,
    state::AppState,
    validation,
};

pub mod employee;

/// Create the router for the showroom API
pub fn create_router(state: AppState) -> Router {
    let customer_routes = Router::new()
        .route("/profile", get(get_profile))
        .route("/cart", get(get_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/cart/remove", post(remove_from_cart))
        .route("/cart/checkout", post(checkout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            customer_session,
        ));

    let api = Router::new()
        .route("/cars", get(list_cars))
        .route("/user", get(current_user))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/sell", post(submit_sell_request))
        .route("/service", post(book_service))
        .route("/contact", post(send_contact))
        .route("/settings/social-links", get(social_links))
        .merge(customer_routes)
        .nest("/employee", employee::router(state.clone()));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    common::database::health_check(&state.db_pool).await?;

    Ok(Json(json!({
        "status": "ok",
        "service": "showroom-api"
    })))
}

/// List the inventory, optionally filtered by body type
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<CarQuery>,
) -> ApiResult<impl IntoResponse> {
    let cars = state
        .car_repository
        .list(query.type_filter())
        .await
        .map_err(internal("Failed to list cars"))?;

    Ok(Json(cars))
}

/// Footer links; anything never saved is an empty string
pub async fn social_links(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let links = state
        .settings_repository
        .social_links()
        .await
        .map_err(internal("Failed to load social links"))?;

    Ok(Json(links))
}

/// Current customer, or 401 when there is no live session
pub async fn current_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<impl IntoResponse> {
    let customer = resolve_customer(&state, &jar)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))?;

    Ok(Json(customer.user))
}

/// Register a customer and log them in
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let phone = validation::normalize_phone(&payload.phone);
    let name = payload.name.trim();
    validation::validate_name(name).map_err(ApiError::BadRequest)?;
    validation::validate_phone(&phone).map_err(ApiError::BadRequest)?;
    validation::validate_password(&payload.password).map_err(ApiError::BadRequest)?;

    let existing = state
        .customer_repository
        .find_by_phone(&phone)
        .await
        .map_err(internal("Failed to look up customer"))?;
    if existing.is_some() {
        return Err(ApiError::BadRequest(
            "Phone number already registered".to_string(),
        ));
    }

    let user = state
        .customer_repository
        .create(name, &phone, &payload.password)
        .await
        .map_err(internal("Failed to register customer"))?;

    let token = state
        .customer_sessions
        .create(&user.phone)
        .await
        .map_err(internal("Failed to open customer session"))?;

    info!("Registered customer {}", user.phone);
    Ok((
        jar.add(session_cookie(CUSTOMER_SESSION_COOKIE, token)),
        Json(AuthResponse {
            message: "Registration successful".to_string(),
            user,
        }),
    ))
}

/// Customer login by phone and password
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let phone = validation::normalize_phone(&payload.phone);
    info!("Login attempt for customer: {}", phone);

    let limiter_key = format!("customer:{}", phone);
    let allowed = state
        .login_limiter
        .is_allowed(&limiter_key)
        .await
        .map_err(internal("Rate limiter failure"))?;
    if !allowed {
        return Err(ApiError::TooManyRequests);
    }

    let customer = state
        .customer_repository
        .authenticate(&phone, &payload.password)
        .await
        .map_err(internal("Failed to verify customer credentials"))?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    state.login_limiter.reset(&limiter_key).await;

    let token = state
        .customer_sessions
        .create(&customer.phone)
        .await
        .map_err(internal("Failed to open customer session"))?;

    Ok((
        jar.add(session_cookie(CUSTOMER_SESSION_COOKIE, token)),
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user: customer.user_data(),
        }),
    ))
}

/// End the customer session; succeeds even without one
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<impl IntoResponse> {
    if let Some(cookie) = jar.get(CUSTOMER_SESSION_COOKIE) {
        state
            .customer_sessions
            .delete(cookie.value())
            .await
            .map_err(internal("Failed to delete customer session"))?;
    }

    Ok((
        jar.remove(removal_cookie(CUSTOMER_SESSION_COOKIE)),
        Json(MessageResponse::new("Logged out")),
    ))
}

/// Customer profile with orders, sell requests and service bookings
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
) -> ApiResult<impl IntoResponse> {
    let phone = &customer.user.phone;

    let stored = state
        .customer_repository
        .find_by_phone(phone)
        .await
        .map_err(internal("Failed to load customer"))?
        .ok_or_else(|| ApiError::NotFound("Customer not found".to_string()))?;

    let orders = state
        .sale_repository
        .orders_for(phone)
        .await
        .map_err(internal("Failed to load orders"))?;
    let sell_requests = state
        .inquiry_repository
        .sell_requests_for(phone)
        .await
        .map_err(internal("Failed to load sell requests"))?;
    let services = state
        .inquiry_repository
        .service_bookings_for(phone)
        .await
        .map_err(internal("Failed to load service bookings"))?;

    Ok(Json(Profile {
        user: ProfileUser {
            name: stored.name,
            phone: stored.phone,
            created_at: stored.created_at,
        },
        orders,
        sell_requests,
        services,
    }))
}

/// Cars in the customer's cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
) -> ApiResult<impl IntoResponse> {
    let cars = state
        .cart_repository
        .items(&customer.user.phone)
        .await
        .map_err(internal("Failed to load cart"))?;

    Ok(Json(cars))
}

/// Put an available car in the cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Json(payload): Json<CartItemRequest>,
) -> ApiResult<impl IntoResponse> {
    let car = state
        .car_repository
        .find(&payload.car_id)
        .await
        .map_err(internal("Failed to load car"))?
        .ok_or_else(|| ApiError::NotFound("Car not found".to_string()))?;

    if !car.is_available() {
        return Err(ApiError::Conflict(
            "This car is no longer available".to_string(),
        ));
    }

    state
        .cart_repository
        .add(&customer.user.phone, &car.id)
        .await
        .map_err(internal("Failed to add to cart"))?;

    Ok(Json(MessageResponse::new("Added to cart")))
}

/// Take a car out of the cart
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
    Json(payload): Json<CartItemRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .cart_repository
        .remove(&customer.user.phone, &payload.car_id)
        .await
        .map_err(internal("Failed to remove from cart"))?;

    Ok(Json(MessageResponse::new("Removed from cart")))
}

/// Check out the whole cart
pub async fn checkout(
    State(state): State<AppState>,
    Extension(customer): Extension<CurrentCustomer>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state
        .cart_repository
        .checkout(&customer.user.phone)
        .await
        .map_err(internal("Checkout failed"))?;

    match outcome {
        CheckoutOutcome::Completed { order_ids, total } => Ok(Json(CheckoutResponse {
            message: "Checkout successful! Our team will contact you shortly.".to_string(),
            order_ids,
            total,
        })),
        CheckoutOutcome::EmptyCart => Err(ApiError::BadRequest("Cart is empty".to_string())),
        CheckoutOutcome::Unavailable(name) => Err(ApiError::Conflict(format!(
            "{} is no longer available",
            name
        ))),
    }
}

/// Offer a car to the showroom
pub async fn submit_sell_request(
    State(state): State<AppState>,
    Json(payload): Json<SellRequest>,
) -> ApiResult<impl IntoResponse> {
    let phone = validation::normalize_phone(&payload.phone);
    validation::validate_name(&payload.owner_name).map_err(ApiError::BadRequest)?;
    validation::validate_phone(&phone).map_err(ApiError::BadRequest)?;
    if payload.make.trim().is_empty() || payload.model.trim().is_empty() {
        return Err(ApiError::BadRequest("Make and model are required".to_string()));
    }
    if payload.asking_price < 0 {
        return Err(ApiError::BadRequest(
            "Asking price cannot be negative".to_string(),
        ));
    }

    let request_id = state
        .inquiry_repository
        .create_sell_request(&payload, &phone)
        .await
        .map_err(internal("Failed to store sell request"))?;

    Ok(Json(json!({
        "message": "Sell request submitted successfully",
        "request_id": request_id,
    })))
}

/// Book a workshop slot
pub async fn book_service(
    State(state): State<AppState>,
    Json(payload): Json<ServiceRequest>,
) -> ApiResult<impl IntoResponse> {
    let phone = validation::normalize_phone(&payload.phone);
    validation::validate_name(&payload.owner_name).map_err(ApiError::BadRequest)?;
    validation::validate_phone(&phone).map_err(ApiError::BadRequest)?;

    let service_id = state
        .inquiry_repository
        .create_service_booking(&payload, &phone)
        .await
        .map_err(internal("Failed to store service booking"))?;

    Ok(Json(json!({
        "message": "Service booked",
        "service_id": service_id,
    })))
}

/// Leave a message for the showroom
pub async fn send_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_name(&payload.name).map_err(ApiError::BadRequest)?;
    validation::validate_email(payload.email.trim()).map_err(ApiError::BadRequest)?;
    if payload.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    state
        .inquiry_repository
        .create_contact(&payload)
        .await
        .map_err(internal("Failed to store contact message"))?;

    Ok(Json(MessageResponse::new("Message received")))
}
