//! Cookie session middleware for customers and employees

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    error::{ApiError, ApiResult, internal},
    models::{CurrentCustomer, CurrentEmployee},
    state::AppState,
};

/// Cookie carrying the customer session token
pub const CUSTOMER_SESSION_COOKIE: &str = "customer_session";
/// Cookie carrying the employee session token
pub const EMPLOYEE_SESSION_COOKIE: &str = "employee_session";

/// Session cookie for a freshly issued token
pub fn session_cookie(name: &'static str, token: String) -> Cookie<'static> {
    Cookie::build((name, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that makes the browser drop `name`
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// Resolve the customer behind the request's session cookie, if any
pub async fn resolve_customer(
    state: &AppState,
    jar: &CookieJar,
) -> ApiResult<Option<CurrentCustomer>> {
    let Some(token) = jar.get(CUSTOMER_SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return Ok(None);
    };

    let Some(phone) = state
        .customer_sessions
        .find_subject(&token)
        .await
        .map_err(internal("Failed to load customer session"))?
    else {
        return Ok(None);
    };

    let customer = state
        .customer_repository
        .find_by_phone(&phone)
        .await
        .map_err(internal("Failed to load customer"))?;

    Ok(customer.map(|customer| CurrentCustomer {
        token,
        user: customer.user_data(),
    }))
}

/// Resolve the employee behind the request's session cookie, if any
pub async fn resolve_employee(
    state: &AppState,
    jar: &CookieJar,
) -> ApiResult<Option<CurrentEmployee>> {
    let Some(token) = jar.get(EMPLOYEE_SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return Ok(None);
    };

    let Some(username) = state
        .employee_sessions
        .find_subject(&token)
        .await
        .map_err(internal("Failed to load employee session"))?
    else {
        return Ok(None);
    };

    let employee = state
        .employee_repository
        .find(&username)
        .await
        .map_err(internal("Failed to load employee"))?;

    Ok(employee.map(|employee| CurrentEmployee {
        token,
        employee: employee.employee_data(),
    }))
}

/// Reject requests without a live customer session
pub async fn customer_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let customer = resolve_customer(&state, &jar)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Login required".to_string()))?;

    req.extensions_mut().insert(customer);
    Ok(next.run(req).await)
}

/// Reject requests without a live employee session
pub async fn employee_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let employee = resolve_employee(&state, &jar)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    req.extensions_mut().insert(employee);
    Ok(next.run(req).await)
}
