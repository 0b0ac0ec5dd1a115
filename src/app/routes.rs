//! HTTP 路由與處理函式

use std::any::Any;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{DefaultBodyLimit, FromRequest, Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use super::state::AppState;
use crate::config::toml_config::DEFAULT_BODY_LIMIT;
use crate::core::{TrackingProvider, TrackingRequest, TrackingResult};
use crate::utils::error::TrackerError;

/// JSON extractor：任何解碼失敗都回 `400 {"error": "Invalid request"}`，
/// 不用 axum 預設的 415/422
///
/// 超過 body 上限時保留 413，同樣以 JSON 回應
pub struct JsonBadRequest<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBadRequest<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBadRequest(value)),
            Err(rejection) => {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    return Err(ApiError::new(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "Payload too large",
                    ));
                }
                tracing::debug!("Rejected /track body: {}", rejection.body_text());
                Err(ApiError::from(TrackerError::InvalidRequest))
            }
        }
    }
}

/// 所有端點共用的錯誤回應格式：`{"error": "<message>"}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            // 細節只寫進日誌
            error!("Error in track request: {}", err);
        }
        Self::new(status, err.public_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);
    ApiError::internal().into_response()
}

/// 建立 router，使用預設的 body 上限 (1MB)
pub fn create_router<P: TrackingProvider + 'static>(state: AppState<P>) -> Router {
    create_router_with_body_limit(state, DEFAULT_BODY_LIMIT)
}

/// 建立 router，自訂 body 上限
///
/// 上限交給 [`DefaultBodyLimit`]，由 extractor 判斷，所以有沒有 Content-Length 都會得到 JSON 的 413
pub fn create_router_with_body_limit<P: TrackingProvider + 'static>(
    state: AppState<P>,
    body_limit: usize,
) -> Router {
    let shared_state = Arc::new(state);
    Router::new()
        .route("/", get(index::<P>))
        .route("/track", post(track::<P>))
        .route("/health", get(health_check))
        .with_state(shared_state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

async fn index<P: TrackingProvider>(State(state): State<Arc<AppState<P>>>) -> Html<String> {
    Html(state.page.clone())
}

/// 存活檢查，不會呼叫追蹤服務
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /track`：正規化 `trackIds`，逐一查詢，依輸入順序回傳
async fn track<P: TrackingProvider>(
    State(state): State<Arc<AppState<P>>>,
    JsonBadRequest(request): JsonBadRequest<TrackingRequest>,
) -> ApiResult<Json<Vec<TrackingResult>>> {
    let results = state.engine.run(&request.track_ids).await?;
    Ok(Json(results))
}
