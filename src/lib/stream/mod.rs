use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};

/// MIME type a client advertises in `Accept` to opt into partial updates.
pub const TURBO_STREAM_MIME: &str = "text/vnd.turbo-stream.html";

/// Capability check for the partial-update protocol. Decided once per
/// request; there is no per-request fallback retry.
pub fn accepts_turbo_stream(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains(TURBO_STREAM_MIME))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamAction {
    Prepend,
    Replace,
    Remove,
}

impl StreamAction {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamAction::Prepend => "prepend",
            StreamAction::Replace => "replace",
            StreamAction::Remove => "remove",
        }
    }
}

/// One DOM-patch instruction: apply `action` to the element with id `target`,
/// using `template` as the markup where the action takes one.
#[derive(Debug, Clone)]
pub struct StreamPatch {
    pub action: StreamAction,
    pub target: String,
    pub template: Option<String>,
}

impl StreamPatch {
    pub fn prepend(target: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            action: StreamAction::Prepend,
            target: target.into(),
            template: Some(template.into()),
        }
    }

    pub fn replace(target: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            action: StreamAction::Replace,
            target: target.into(),
            template: Some(template.into()),
        }
    }

    pub fn remove(target: impl Into<String>) -> Self {
        Self {
            action: StreamAction::Remove,
            target: target.into(),
            template: None,
        }
    }

    pub fn render(&self) -> String {
        let action = self.action.as_str();
        match &self.template {
            Some(template) => format!(
                "<turbo-stream action=\"{action}\" target=\"{target}\">\
                 <template>{template}</template></turbo-stream>",
                target = self.target,
            ),
            None => format!(
                "<turbo-stream action=\"{action}\" target=\"{target}\"></turbo-stream>",
                target = self.target,
            ),
        }
    }
}

/// Renders a set of patches as one turbo-stream response body.
pub fn stream_response(patches: Vec<StreamPatch>) -> Response {
    let body = patches
        .iter()
        .map(StreamPatch::render)
        .collect::<Vec<_>>()
        .join("\n");
    (
        [(
            header::CONTENT_TYPE,
            format!("{TURBO_STREAM_MIME}; charset=utf-8"),
        )],
        body,
    )
        .into_response()
}
