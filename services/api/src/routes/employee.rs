//! Back-office routes, mounted under `/api/employee`

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_extra::extract::cookie::CookieJar;
use common::models::{
    CarResponse, CarUpdate, EmployeeAuthResponse, EmployeeLoginRequest, MessageResponse, NewCar,
    SocialLinks, StatusUpdate,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult, internal},
    middleware::{
        EMPLOYEE_SESSION_COOKIE, employee_session, removal_cookie, resolve_employee,
        session_cookie,
    },
    models::CurrentEmployee,
    repositories::employee::ADMIN_USERNAME,
    state::AppState,
    validation,
};

/// Employee login, session check and the protected back-office routes
pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/stats", get(stats))
        .route("/cars", get(list_inventory).post(add_car))
        .route("/cars/:id", put(update_car).delete(delete_car))
        .route("/sales", get(list_sales))
        .route("/sell-requests", get(list_sell_requests))
        .route(
            "/sell-requests/:id/status",
            put(update_sell_request_status),
        )
        .route("/services", get(list_services))
        .route("/services/:id/status", put(update_service_status))
        .route("/contacts", get(list_contacts))
        .route("/employees", get(list_employees))
        .route("/social-links", post(save_social_links))
        .route_layer(middleware::from_fn_with_state(state, employee_session));

    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/check", get(check))
        .merge(protected)
}

/// Employee login by username and password
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<EmployeeLoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password required".to_string(),
        ));
    }

    let limiter_key = format!("employee:{}", username);
    let allowed = state
        .login_limiter
        .is_allowed(&limiter_key)
        .await
        .map_err(internal("Rate limiter failure"))?;
    if !allowed {
        return Err(ApiError::TooManyRequests);
    }

    let employee = state
        .employee_repository
        .authenticate(username, &payload.password)
        .await
        .map_err(internal("Failed to verify employee credentials"))?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    state.login_limiter.reset(&limiter_key).await;

    let token = state
        .employee_sessions
        .create(&employee.username)
        .await
        .map_err(internal("Failed to open employee session"))?;

    info!("Employee {} logged in", employee.username);
    Ok((
        jar.add(session_cookie(EMPLOYEE_SESSION_COOKIE, token)),
        Json(EmployeeAuthResponse {
            message: "Login successful".to_string(),
            employee: employee.employee_data(),
        }),
    ))
}

/// End the employee session
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<impl IntoResponse> {
    if let Some(cookie) = jar.get(EMPLOYEE_SESSION_COOKIE) {
        state
            .employee_sessions
            .delete(cookie.value())
            .await
            .map_err(internal("Failed to delete employee session"))?;
    }

    Ok((
        jar.remove(removal_cookie(EMPLOYEE_SESSION_COOKIE)),
        Json(MessageResponse::new("Logged out")),
    ))
}

/// Who is logged in to the back office
pub async fn check(State(state): State<AppState>, jar: CookieJar) -> ApiResult<impl IntoResponse> {
    let current = resolve_employee(&state, &jar)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    Ok(Json(current.employee))
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let stats = state
        .stats_repository
        .dashboard()
        .await
        .map_err(internal("Failed to compute dashboard stats"))?;

    Ok(Json(stats))
}

pub async fn list_inventory(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let cars = state
        .car_repository
        .list(None)
        .await
        .map_err(internal("Failed to list cars"))?;

    Ok(Json(cars))
}

pub async fn add_car(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentEmployee>,
    Json(payload): Json<NewCar>,
) -> ApiResult<impl IntoResponse> {
    if payload.make.trim().is_empty() || payload.model.trim().is_empty() {
        return Err(ApiError::BadRequest("Make and model are required".to_string()));
    }

    let car = state
        .car_repository
        .create(&payload)
        .await
        .map_err(internal("Failed to add car"))?;

    info!("{} added car {}", current.employee.username, car.id);
    Ok(Json(CarResponse {
        message: "Car added successfully".to_string(),
        car,
    }))
}

pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CarUpdate>,
) -> ApiResult<impl IntoResponse> {
    let car = state
        .car_repository
        .update(&id, &payload)
        .await
        .map_err(internal("Failed to update car"))?
        .ok_or_else(|| ApiError::NotFound("Car not found".to_string()))?;

    Ok(Json(CarResponse {
        message: "Car updated successfully".to_string(),
        car,
    }))
}

pub async fn delete_car(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentEmployee>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state
        .car_repository
        .delete(&id)
        .await
        .map_err(internal("Failed to delete car"))?;

    if !deleted {
        return Err(ApiError::NotFound("Car not found".to_string()));
    }

    info!("{} deleted car {}", current.employee.username, id);
    Ok(Json(MessageResponse::new("Car deleted successfully")))
}

pub async fn list_sales(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let sales = state
        .sale_repository
        .all()
        .await
        .map_err(internal("Failed to list sales"))?;

    Ok(Json(sales))
}

pub async fn list_sell_requests(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let requests = state
        .inquiry_repository
        .sell_requests()
        .await
        .map_err(internal("Failed to list sell requests"))?;

    Ok(Json(requests))
}

pub async fn update_sell_request_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_status(&payload.status).map_err(ApiError::BadRequest)?;

    let updated = state
        .inquiry_repository
        .set_sell_request_status(&id, payload.status.trim())
        .await
        .map_err(internal("Failed to update sell request"))?;

    if !updated {
        return Err(ApiError::NotFound("Request not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Status updated successfully")))
}

pub async fn list_services(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let bookings = state
        .inquiry_repository
        .service_bookings()
        .await
        .map_err(internal("Failed to list service bookings"))?;

    Ok(Json(bookings))
}

pub async fn update_service_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_status(&payload.status).map_err(ApiError::BadRequest)?;

    let updated = state
        .inquiry_repository
        .set_service_status(&id, payload.status.trim())
        .await
        .map_err(internal("Failed to update service booking"))?;

    if !updated {
        return Err(ApiError::NotFound("Service not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Status updated successfully")))
}

pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let contacts = state
        .inquiry_repository
        .contacts()
        .await
        .map_err(internal("Failed to list contacts"))?;

    Ok(Json(contacts))
}

/// Staff directory, admin only
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentEmployee>,
) -> ApiResult<impl IntoResponse> {
    if current.employee.username != ADMIN_USERNAME {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let employees = state
        .employee_repository
        .list()
        .await
        .map_err(internal("Failed to list employees"))?;

    Ok(Json(employees))
}

pub async fn save_social_links(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentEmployee>,
    Json(payload): Json<SocialLinks>,
) -> ApiResult<impl IntoResponse> {
    state
        .settings_repository
        .save_social_links(&payload)
        .await
        .map_err(internal("Failed to save social links"))?;

    info!("{} updated the social links", current.employee.username);
    Ok(Json(MessageResponse::new("Social links saved successfully")))
}
