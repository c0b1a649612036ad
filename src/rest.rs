//! REST API layer for StayLink using Axum (exposed on port 11111 by default)
//!
//! Public routes cover login/registration and catalog browsing. Booking and
//! property management sit behind a bearer-token middleware and a role check.
//! OpenAPI docs are served at `/swagger-ui`.

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{authorize, TokenKeys, UserDirectory};
use crate::booking::{confirm_booking, quote, StayQuote};
use crate::catalog::{search_notice, Catalog};
use crate::error::StayError;
use crate::models::{
    AuthPayload, Booking, Hotel, NewProperty, Role, SearchCriteria, User, MAX_GUESTS, MIN_GUESTS,
};
use crate::property::OwnedProperties;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared app state for REST handlers (Arc-wrapped for concurrency)
pub struct AppState {
    catalog: Catalog,
    users: UserDirectory,
    keys: TokenKeys,
    // Owner email (lowercased) -> that owner's listings
    portfolios: RwLock<HashMap<String, OwnedProperties>>,
}

impl AppState {
    pub fn new(catalog: Catalog, users: UserDirectory, keys: TokenKeys) -> Self {
        Self {
            catalog,
            users,
            keys,
            portfolios: RwLock::new(HashMap::new()),
        }
    }
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Password is accepted for form parity but never stored
#[derive(Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Location substring, case-insensitive
    pub location: Option<String>,
    /// Maximum nightly price (50-500)
    pub max_price: Option<f64>,
    /// Guests (1-6)
    pub guests: Option<u8>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub message: String,
    pub criteria: SearchCriteria,
    pub hotels: Vec<Hotel>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteQuery {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct BookingRequest {
    pub hotel_id: u32,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u8>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub message: String,
    pub booking: Booking,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PropertyResponse {
    pub message: String,
    pub property: Hotel,
}

/// Generic REST response (JSON)
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RestResponse {
    pub success: bool,
    pub message: String,
}

impl StayError {
    fn status(&self) -> StatusCode {
        match self {
            StayError::MissingStayDates
            | StayError::MissingPropertyFields
            | StayError::NoHotelSelected => StatusCode::BAD_REQUEST,
            StayError::InvalidCredentials | StayError::LoginRequired | StayError::Token(_) => {
                StatusCode::UNAUTHORIZED
            }
            StayError::AccessDenied(_) => StatusCode::FORBIDDEN,
            StayError::HotelNotFound(_) => StatusCode::NOT_FOUND,
            StayError::DuplicateEmail => StatusCode::CONFLICT,
            StayError::Config(_)
            | StayError::Storage(_)
            | StayError::Json(_)
            | StayError::Hash(_)
            | StayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Bad or expired tokens read the same as no session
            StayError::Token(_) => StayError::LoginRequired.to_string(),
            other if status.is_server_error() => {
                error!(error = %other, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (
            status,
            Json(RestResponse {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StayError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(StayError::LoginRequired)?;

    let claims = state.keys.validate_jwt(token)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        login_handler,
        register_handler,
        search_handler,
        get_hotel_handler,
        quote_handler,
        me_handler,
        create_booking_handler,
        list_properties_handler,
        add_property_handler,
    ),
    components(schemas(
        Hotel,
        User,
        Role,
        SearchCriteria,
        Booking,
        NewProperty,
        StayQuote,
        LoginRequest,
        RegisterRequest,
        SessionResponse,
        SearchResponse,
        BookingRequest,
        BookingResponse,
        PropertyResponse,
        RestResponse,
    )),
    tags((name = "staylink", description = "Hotel search and booking demo API"))
)]
pub struct ApiDoc;

/// Create Axum router with public and token-protected endpoints
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    let auth_routes = Router::new()
        .route("/me", get(me_handler))
        .route("/bookings", post(create_booking_handler))
        .route(
            "/properties",
            get(list_properties_handler).post(add_property_handler),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_handler))
        .route("/login", post(login_handler))
        .route("/register", post(register_handler))
        .route("/hotels", get(search_handler))
        .route("/hotels/:id", get(get_hotel_handler))
        .route("/hotels/:id/quote", get(quote_handler))
        .merge(auth_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

/// Health check handler
#[utoipa::path(get, path = "/health", responses((status = 200, body = RestResponse)))]
async fn health_handler() -> Json<RestResponse> {
    Json(RestResponse {
        success: true,
        message: "StayLink REST API healthy".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, body = SessionResponse),
        (status = 401, body = RestResponse, description = "Invalid email or password")
    )
)]
async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, StayError> {
    let user = state.users.login(&payload.email, &payload.password)?;
    let token = state.keys.create_jwt(&user)?;
    Ok(Json(SessionResponse { token, user }))
}

/// Registration logs the new user straight in
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, body = SessionResponse),
        (status = 409, body = RestResponse, description = "Email already taken")
    )
)]
async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, StayError> {
    let user = state
        .users
        .register(&payload.email, &payload.name, payload.role)?;
    let token = state.keys.create_jwt(&user)?;
    Ok(Json(SessionResponse { token, user }))
}

#[utoipa::path(
    get,
    path = "/hotels",
    params(SearchQuery),
    responses((status = 200, body = SearchResponse))
)]
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let defaults = SearchCriteria::default();
    let criteria = SearchCriteria {
        location: query.location.unwrap_or_default(),
        guests: query.guests.unwrap_or(defaults.guests),
        price_range: query.max_price.unwrap_or(defaults.price_range),
        ..defaults
    }
    .clamped();

    let hotels = state.catalog.search(&criteria);
    info!(
        location = %criteria.location,
        max_price = criteria.price_range,
        found = hotels.len(),
        "hotel search"
    );
    Json(SearchResponse {
        message: search_notice(hotels.len()),
        criteria,
        hotels,
    })
}

#[utoipa::path(
    get,
    path = "/hotels/{id}",
    params(("id" = u32, Path, description = "Hotel id")),
    responses(
        (status = 200, body = Hotel),
        (status = 404, body = RestResponse)
    )
)]
async fn get_hotel_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Hotel>, StayError> {
    state
        .catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or(StayError::HotelNotFound(id))
}

#[utoipa::path(
    get,
    path = "/hotels/{id}/quote",
    params(("id" = u32, Path, description = "Hotel id"), QuoteQuery),
    responses(
        (status = 200, body = StayQuote),
        (status = 404, body = RestResponse)
    )
)]
async fn quote_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<StayQuote>, StayError> {
    let hotel = state.catalog.get(id).ok_or(StayError::HotelNotFound(id))?;
    Ok(Json(quote(hotel, query.check_in, query.check_out)))
}

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, body = User),
        (status = 401, body = RestResponse)
    )
)]
async fn me_handler(Extension(claims): Extension<AuthPayload>) -> Json<User> {
    Json(claims.user())
}

#[utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingRequest,
    responses(
        (status = 200, body = BookingResponse),
        (status = 400, body = RestResponse, description = "Dates missing"),
        (status = 403, body = RestResponse, description = "Not a traveller")
    )
)]
async fn create_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, StayError> {
    let user = claims.user();
    authorize(Some(&user), Some(Role::Traveller))?;

    let hotel = state
        .catalog
        .get(payload.hotel_id)
        .ok_or(StayError::HotelNotFound(payload.hotel_id))?;
    let guests = payload
        .guests
        .unwrap_or(SearchCriteria::default().guests)
        .clamp(MIN_GUESTS, MAX_GUESTS);

    let booking = confirm_booking(hotel, payload.check_in, payload.check_out, guests)?;
    info!(
        user_id = user.id,
        hotel_id = hotel.id,
        nights = booking.nights,
        total = booking.total_price,
        reference = %booking.reference,
        "booking confirmed"
    );
    Ok(Json(BookingResponse {
        message: "Booking confirmed! Check your reservation details.".to_string(),
        booking,
    }))
}

#[utoipa::path(
    get,
    path = "/properties",
    responses(
        (status = 200, body = [Hotel]),
        (status = 403, body = RestResponse, description = "Not a hotel owner")
    )
)]
async fn list_properties_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
) -> Result<Json<Vec<Hotel>>, StayError> {
    authorize(Some(&claims.user()), Some(Role::HotelOwner))?;
    let key = claims.sub.to_lowercase();
    if let Some(owned) = state.portfolios.read().await.get(&key) {
        return Ok(Json(owned.list().to_vec()));
    }
    Ok(Json(OwnedProperties::default().list().to_vec()))
}

#[utoipa::path(
    post,
    path = "/properties",
    request_body = NewProperty,
    responses(
        (status = 200, body = PropertyResponse),
        (status = 400, body = RestResponse, description = "Required fields missing"),
        (status = 403, body = RestResponse, description = "Not a hotel owner")
    )
)]
async fn add_property_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
    Json(payload): Json<NewProperty>,
) -> Result<Json<PropertyResponse>, StayError> {
    authorize(Some(&claims.user()), Some(Role::HotelOwner))?;
    let mut portfolios = state.portfolios.write().await;
    let owned = portfolios.entry(claims.sub.to_lowercase()).or_default();
    let property = owned.add(&payload)?;
    info!(owner = %claims.sub, property_id = property.id, "property listed");
    Ok(Json(PropertyResponse {
        message: "New property added successfully!".to_string(),
        property,
    }))
}
