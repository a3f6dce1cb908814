//! Outcome of one upstream call.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Status, content type and raw body as received from the upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// What the upstream answered, split on 2xx.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResult {
    Success(UpstreamReply),
    Failure(UpstreamReply),
}

impl UpstreamResult {
    pub fn new(status: StatusCode, content_type: Option<HeaderValue>, body: Bytes) -> Self {
        let reply = UpstreamReply {
            status,
            content_type,
            body,
        };
        if status.is_success() {
            UpstreamResult::Success(reply)
        } else {
            UpstreamResult::Failure(reply)
        }
    }

    pub fn status(&self) -> StatusCode {
        self.reply().status
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UpstreamResult::Success(_))
    }

    pub fn reply(&self) -> &UpstreamReply {
        match self {
            UpstreamResult::Success(reply) | UpstreamResult::Failure(reply) => reply,
        }
    }

    pub fn into_reply(self) -> UpstreamReply {
        match self {
            UpstreamResult::Success(reply) | UpstreamResult::Failure(reply) => reply,
        }
    }
}

impl IntoResponse for UpstreamResult {
    fn into_response(self) -> Response {
        let reply = self.into_reply();
        let content_type = reply
            .content_type
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));

        let mut response = Response::new(Body::from(reply.body));
        *response.status_mut() = reply.status;
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
        response
    }
}
