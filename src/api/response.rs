// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! JSON envelope returned by every router endpoint

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::error::OperationError;
use crate::mikrotik::{OperationResult, ResolutionReport};

/// `{success, message?, data?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Renders an operation result, choosing the HTTP status from the error kind
    pub fn from_result<T: Serialize>(result: OperationResult<T>) -> (StatusCode, Self) {
        match result {
            Ok(ok) => match serde_json::to_value(&ok.data) {
                Ok(data) => (
                    StatusCode::OK,
                    Self {
                        success: true,
                        message: ok.message,
                        data: (!data.is_null()).then_some(data),
                    },
                ),
                Err(e) => {
                    tracing::error!("Failed to serialize operation result: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Self::failure("Failed to serialize router response"),
                    )
                }
            },
            Err(e) => (status_for(&e), Self::failure(e.to_string())),
        }
    }

    pub fn from_report(report: &ResolutionReport) -> (StatusCode, Self) {
        let status = if report.succeeded() {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = Self {
            success: report.succeeded(),
            message: Some(report.message().to_string()),
            data: serde_json::to_value(report).ok(),
        };
        (status, body)
    }
}

fn status_for(err: &OperationError) -> StatusCode {
    if err.is_not_configured() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
