use std::sync::Arc;

use axum::{
    handler::Handler,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::TokenCodec;
use crate::database::QueryExecutor;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{authenticate, require_admin, require_logged_in, require_self_or_admin};
use crate::services::{JobService, UserService};

/// Per-process dependencies shared by every request. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub db: Arc<dyn QueryExecutor>,
}

impl AppState {
    pub fn new(codec: TokenCodec, db: Arc<dyn QueryExecutor>) -> Self {
        Self {
            codec: Arc::new(codec),
            db,
        }
    }

    pub fn jobs(&self) -> JobService {
        JobService::new(self.db.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.db.clone())
    }
}

/// Full application router.
///
/// `authenticate` wraps every route so any `require_*` guard layered on a
/// handler always sees the identity (or its absence) first.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/auth/token", post(public::auth::token))
        .route("/auth/register", post(public::auth::register))
        .route("/auth/whoami", get(protected::auth::whoami.layer(from_fn(require_logged_in))))
        .route("/companies/:handle/jobs", get(public::jobs::by_company))
        // Jobs: public reads, admin writes
        .route(
            "/jobs",
            get(public::jobs::list).post(elevated::jobs::create.layer(from_fn(require_admin))),
        )
        .route(
            "/jobs/:id",
            get(public::jobs::get)
                .patch(elevated::jobs::update.layer(from_fn(require_admin)))
                .delete(elevated::jobs::remove.layer(from_fn(require_admin))),
        )
        // Users: admin collection, self-or-admin records
        .route(
            "/users",
            get(elevated::users::list.layer(from_fn(require_admin)))
                .post(elevated::users::create.layer(from_fn(require_admin))),
        )
        .route(
            "/users/:username",
            get(protected::users::get.layer(from_fn(require_self_or_admin)))
                .patch(protected::users::update.layer(from_fn(require_self_or_admin)))
                .delete(protected::users::remove.layer(from_fn(require_self_or_admin))),
        )
        // Global middleware
        .layer(from_fn_with_state(state.clone(), authenticate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
