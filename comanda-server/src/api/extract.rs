//! 路径参数提取器
//!
//! `axum::extract::Path` 的包装: 参数解析失败时返回 [`AppError`] JSON
//! (`InvalidFormat`, 400), 而不是 axum 的纯文本拒绝。

use axum::extract::{FromRequestParts, Path};
use http::request::Parts;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};

/// Path parameters that reject with the API error body
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(uri = %parts.uri, error = %rejection, "Invalid path parameter");
                Err(
                    AppError::with_message(ErrorCode::InvalidFormat, rejection.body_text())
                        .with_detail("path", parts.uri.path()),
                )
            }
        }
    }
}
