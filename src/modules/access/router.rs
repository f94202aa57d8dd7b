use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{check_access, get_access_matrix, get_my_access, get_recent_audit};

pub fn init_access_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_my_access))
        .route("/check", post(check_access))
        .route("/matrix", get(get_access_matrix))
        .route("/audit", get(get_recent_audit))
}
