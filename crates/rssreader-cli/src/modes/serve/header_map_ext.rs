//! HeaderMap extension.

use super::*;

pub trait HeaderMapExt {
    /// Create a HeaderMap with appropriate JSON headers.
    fn json_headers() -> HeaderMap;
}

impl HeaderMapExt for HeaderMap {
    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/json"),
        );
        headers
    }
}
