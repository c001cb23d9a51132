use crate::models::responses::StatusResponse;
use crate::AppState;
use axum::{extract::State, response::Json};

pub async fn server_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK".to_string(),
        server_name: state.server_name.to_string(),
    })
}
