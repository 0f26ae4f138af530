//! Tests for HTTP request/response types.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_with_method_and_url() {
        let url = url::Url::parse("https://example.com/api").unwrap();
        let req = HttpRequest::new(http::Method::PUT, url.clone());

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url, url);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
        assert!(req.connect_timeout.is_none());
        assert!(req.timeout.is_none());
    }

    #[test]
    fn post_creates_post_request() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let req = HttpRequest::post(url);

        assert_eq!(req.method, http::Method::POST);
    }

    #[test]
    fn with_body_sets_body() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let body = br#"{"id":1}"#.to_vec();
        let req = HttpRequest::post(url).with_body(body.clone());

        assert_eq!(req.body, Some(body));
        assert_eq!(req.body_text(), Some(r#"{"id":1}"#));
    }

    #[test]
    fn body_text_is_none_without_body() {
        let url = url::Url::parse("https://example.com/").unwrap();
        assert_eq!(HttpRequest::post(url).body_text(), None);
    }

    #[test]
    fn with_header_appends_multiple_values_for_same_name() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let req = HttpRequest::post(url)
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/html"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn timeouts_are_set_independently() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let req = HttpRequest::post(url)
            .with_connect_timeout(Some(Duration::from_secs(3)))
            .with_timeout(Some(Duration::from_secs(20)));

        assert_eq!(req.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(req.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn timeouts_can_be_cleared() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let req = HttpRequest::post(url)
            .with_timeout(Some(Duration::from_secs(20)))
            .with_timeout(None);

        assert!(req.timeout.is_none());
    }
}

mod http_response {
    use super::*;

    #[test]
    fn new_creates_response_with_all_fields() {
        let body = b"response body".to_vec();
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), body.clone());

        assert_eq!(resp.status, http::StatusCode::OK);
        assert!(resp.headers.is_empty());
        assert_eq!(resp.body, body);
    }

    #[test]
    fn body_lossy_replaces_invalid_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            vec![b'o', b'k', 0xFF],
        );

        assert_eq!(resp.body_lossy(), "ok\u{FFFD}");
    }

    #[test]
    fn headers_json_is_empty_object_without_headers() {
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![]);
        assert_eq!(resp.headers_json(), "{}");
    }

    #[test]
    fn headers_json_maps_single_values_to_strings() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        let resp = HttpResponse::new(http::StatusCode::OK, headers, vec![]);

        let parsed: serde_json::Value = serde_json::from_str(&resp.headers_json()).unwrap();

        assert_eq!(parsed, serde_json::json!({"content-type": "application/json"}));
    }

    #[test]
    fn headers_json_maps_repeated_values_to_arrays() {
        let mut headers = http::HeaderMap::new();
        headers.append(http::header::SET_COOKIE, http::HeaderValue::from_static("a=1"));
        headers.append(http::header::SET_COOKIE, http::HeaderValue::from_static("b=2"));
        let resp = HttpResponse::new(http::StatusCode::OK, headers, vec![]);

        let parsed: serde_json::Value = serde_json::from_str(&resp.headers_json()).unwrap();

        assert_eq!(parsed, serde_json::json!({"set-cookie": ["a=1", "b=2"]}));
    }
}

mod http_client_trait {
    use super::*;
    use std::sync::Arc;

    struct FixedClient {
        status: http::StatusCode,
    }

    impl HttpClient for FixedClient {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            Ok(HttpResponse::new(self.status, http::HeaderMap::new(), vec![]))
        }
    }

    struct TimeoutClient;

    impl HttpClient for TimeoutClient {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            Err(HttpError::Timeout)
        }
    }

    fn request() -> HttpRequest {
        HttpRequest::post(url::Url::parse("https://example.com/").unwrap())
    }

    #[tokio::test]
    async fn implementations_return_responses() {
        let client = FixedClient {
            status: http::StatusCode::ACCEPTED,
        };

        let resp = client.request(request()).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn implementations_return_errors() {
        let result = TimeoutClient.request(request()).await;
        assert!(matches!(result, Err(HttpError::Timeout)));
    }

    #[tokio::test]
    async fn arc_delegates_to_inner_client() {
        let client = Arc::new(FixedClient {
            status: http::StatusCode::OK,
        });

        let resp = client.request(request()).await.unwrap();

        assert_eq!(resp.status, http::StatusCode::OK);
    }
}

mod http_error {
    use super::*;

    #[test]
    fn timeout_message() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn invalid_url_message() {
        let err = HttpError::InvalidUrl("bad".to_string());
        assert_eq!(err.to_string(), "Invalid URL: bad");
    }

    #[test]
    fn connection_shows_source_message_only() {
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = HttpError::Connection(Box::new(source));

        assert_eq!(err.to_string(), "refused");
        assert!(std::error::Error::source(&err).is_some());
    }
}
