use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::{
    Json, Router,
    extract::{MatchedPath, Request},
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info_span;

use crate::controllers::user::UserController;
use crate::core::error::{self, ConfigError};
use crate::core::state::AppState;
use crate::credential::postgres::PgCredentialStore;
use crate::credential::store::CredentialStore;
use crate::routes::{auth, balance, expenses, income, savings, summary};
use crate::utils::auth::authorize;

pub(crate) fn routes(state: AppState, cors_origins: &[&str]) -> Result<Router, ConfigError> {
    let gate = middleware::from_fn_with_state(
        state.user_controller.clone(),
        authorize::<PgCredentialStore>,
    );

    let ledger_router: Router = Router::new()
        .route("/expenses", get(expenses::get_all).post(expenses::post))
        .route(
            "/expenses/by_date",
            get(expenses::by_date).post(expenses::by_date_body),
        )
        .route("/expenses/all_category", get(expenses::all_category))
        .route("/expenses/by-category", post(expenses::by_category))
        .route(
            "/expenses/{id}",
            get(expenses::get).put(expenses::put).delete(expenses::delete),
        )
        .route("/income", get(income::get).post(income::post))
        .route("/saving", get(savings::get).post(savings::post))
        .route("/balance", get(balance::get))
        .route("/summary/monthly", get(summary::monthly))
        .route("/summary/monthly/{month}", get(summary::month))
        .route_layer(gate)
        .with_state(state.clone());

    Ok(Router::new()
        .route("/", get(root))
        .merge(auth_routes(state.user_controller))
        .merge(ledger_router)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(HandleErrorLayer::new(error::handle_middleware_errors))
                .buffer(128)
                .rate_limit(10, Duration::from_secs(1))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(cors_layer(cors_origins)?),
        ))
}

/// Registration, login and the identity probe. Generic over the credential
/// store so the whole flow can be driven without a database.
pub(crate) fn auth_routes<S: CredentialStore>(users: UserController<S>) -> Router {
    Router::new()
        .route("/register", post(auth::register::<S>))
        .route("/login", post(auth::login::<S>))
        .route("/token", post(auth::token::<S>))
        .route(
            "/protected",
            get(auth::protected).route_layer(middleware::from_fn_with_state(
                users.clone(),
                authorize::<S>,
            )),
        )
        .with_state(users)
}

async fn root() -> Json<Value> {
    Json(json!({"message": "Welcome to Expense Tracker API!"}))
}

/// An empty origin list allows any origin, without credentials.
fn cors_layer(origins: &[&str]) -> Result<CorsLayer, ConfigError> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        return Ok(layer.allow_origin(cors::Any));
    }

    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true))
}
