use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderValue, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;

const XML_ROOT: &str = "ApiResponse";

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub total: Option<u64>,
}

impl Meta {
    pub fn with_total(total: u64) -> Self {
        Self { total: Some(total) }
    }

    pub fn empty() -> Self {
        Self { total: None }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

/// Body format picked from the request's `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// First recognised media range wins; anything else falls back to JSON.
    pub fn from_accept(accept: &str) -> Self {
        for range in accept.split(',') {
            let media = range.split(';').next().unwrap_or_default().trim();
            match media.to_ascii_lowercase().as_str() {
                "application/json" | "application/*" | "*/*" => return Self::Json,
                "application/xml" | "text/xml" => return Self::Xml,
                _ => {}
            }
        }
        Self::Json
    }
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .map(Self::from_accept)
            .unwrap_or_default())
    }
}

/// `ApiResponse` rendered as JSON or XML depending on the negotiated format.
pub struct Negotiated<T> {
    pub format: ResponseFormat,
    pub body: ApiResponse<T>,
}

impl<T> Negotiated<T> {
    pub fn new(format: ResponseFormat, body: ApiResponse<T>) -> Self {
        Self { format, body }
    }
}

impl<T: Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => Json(self.body).into_response(),
            ResponseFormat::Xml => match quick_xml::se::to_string_with_root(XML_ROOT, &self.body) {
                Ok(xml) => (
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("application/xml; charset=utf-8"),
                    )],
                    xml,
                )
                    .into_response(),
                Err(err) => AppError::Internal(anyhow::anyhow!("xml serialization failed: {err}"))
                    .into_response(),
            },
        }
    }
}
