use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use services::{StoryError, StoryService};
use storybook_core::model::{SessionId, SessionRecord};
use tracing::debug;

use crate::error::AppError;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "storybook_session";

/// One request's view of the visitor's session.
pub struct Visit {
    pub record: SessionRecord,
    started: bool,
}

impl Visit {
    /// Resume the session named by the request cookie, or start a new one.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the session store fails.
    pub async fn open(story: &StoryService, headers: &HeaderMap) -> Result<Self, AppError> {
        let requested = session_cookie(headers);
        let record = story.open_session(requested).await?;
        let started = requested != Some(record.id());
        if started {
            debug!(session = %record.id(), "issuing session cookie");
        }
        Ok(Self { record, started })
    }

    /// Turn an operation outcome into a response, attaching the session
    /// cookie when this visit started a new session.
    pub fn finish<T: IntoResponse>(self, outcome: Result<T, StoryError>) -> Response {
        let mut response = match outcome {
            Ok(body) => body.into_response(),
            Err(err) => AppError::from(err).into_response(),
        };
        if self.started {
            let cookie = format!(
                "{SESSION_COOKIE}={}; HttpOnly; Path=/; SameSite=Lax",
                self.record.id()
            );
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

/// Session id from the `Cookie` header. Malformed ids are ignored.
///
/// Values are read verbatim; quoted cookie values are not supported.
#[must_use]
pub fn session_cookie(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let id = SessionId::new();
        let found = session_cookie(&headers(&format!("theme=dark; {SESSION_COOKIE}={id}")));
        assert_eq!(found, Some(id));
    }

    #[test]
    fn malformed_or_missing_cookie_is_ignored() {
        assert_eq!(session_cookie(&HeaderMap::new()), None);
        assert_eq!(session_cookie(&headers("storybook_session=nope")), None);
        assert_eq!(session_cookie(&headers("other=1")), None);
    }
}
