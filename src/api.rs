// API client module: a small blocking HTTP client for the packet service.
// Every call carries the session cookie; the outcome is classified before
// any body is decoded.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{PacketError, Result};
use crate::models::{ErrorBody, Freshman, FreshmanSummary, Packet};

/// Blocking client holding the base URL of the packet server and the
/// session cookie attached to every request.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for the server and token in `config`.
    ///
    /// Redirects are not followed: the server answers unauthenticated
    /// requests with a redirect to its login page.
    ///
    /// # Errors
    ///
    /// Fails if the server address is not a valid URL or the token is not
    /// a valid header value.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = base_url(&config.server)?;
        let client = Client::builder()
            .redirect(Policy::none())
            .default_headers(session_headers(&config.token)?)
            .build()?;
        Ok(ApiClient { client, base_url })
    }

    /// `GET /api/packet/{id}/`
    pub fn packet(&self, id: u64) -> Result<Packet> {
        self.request(Method::GET, &["api", "packet", &id.to_string()])
    }

    /// `GET /api/freshman/{username}/`
    pub fn freshman(&self, username: &str) -> Result<Freshman> {
        self.request(Method::GET, &["api", "freshman", username])
    }

    /// `GET /api/freshmen/{term}/`
    pub fn search(&self, term: &str) -> Result<Vec<FreshmanSummary>> {
        self.request(Method::GET, &["api", "freshmen", term])
    }

    /// `POST /api/packet/{id}/sign/`. An empty success body decodes as `null`.
    pub fn sign(&self, id: u64) -> Result<serde_json::Value> {
        let id = id.to_string();
        let (endpoint, body) = self.execute(Method::POST, &["api", "packet", &id, "sign"])?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        decode(&endpoint, &body)
    }

    /// Send `method` to the path made of `segments` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// `AuthRejected` on a redirect, `Api` on any other non-200 status,
    /// `MalformedResponse` when the body does not decode as `T`.
    pub fn request<T: DeserializeOwned>(&self, method: Method, segments: &[&str]) -> Result<T> {
        let (endpoint, body) = self.execute(method, segments)?;
        decode(&endpoint, &body)
    }

    /// The URL a request to `segments` goes to. Always ends in `/`.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }

    fn execute(&self, method: Method, segments: &[&str]) -> Result<(String, String)> {
        let url = self.url(segments);
        let endpoint = format!("{} {}", method, url.path());
        debug!(%url, %method, "sending request");

        let res = self.client.request(method, url).send()?;
        debug!(status = %res.status(), %endpoint, "received response");

        let body = classify(res)?;
        Ok((endpoint, body))
    }
}

/// Turn a response into its body text, or the error its status stands for.
fn classify(res: Response) -> Result<String> {
    let status = res.status();
    if status.is_redirection() {
        warn!(%status, location = ?res.headers().get(LOCATION), "redirected, session not accepted");
        return Err(PacketError::AuthRejected);
    }
    if status != StatusCode::OK {
        // An unreadable or non-JSON error body still yields the generic failure.
        let description = res.text().ok().and_then(|body| error_description(&body));
        return Err(PacketError::Api { status, description });
    }
    Ok(res.text()?)
}

fn error_description(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.description)
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| PacketError::MalformedResponse {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Parse the configured server, assuming plain `http://` when no scheme is given.
fn base_url(server: &str) -> Result<Url> {
    let server = server.trim();
    let raw = if server.contains("://") {
        server.to_string()
    } else {
        format!("http://{server}")
    };
    let url = Url::parse(&raw).map_err(|e| PacketError::InvalidServer(format!("{server}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(PacketError::InvalidServer(server.to_string()));
    }
    Ok(url)
}

/// Header map carrying the `session` cookie.
fn session_headers(token: &str) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("session={}", token.trim()))
        .map_err(|_| PacketError::InvalidToken)?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PacketOrder;

    fn client(server: &str) -> ApiClient {
        ApiClient::new(&Config {
            token: "abc123".into(),
            server: server.into(),
            order: PacketOrder::Listed,
        })
        .unwrap()
    }

    #[test]
    fn bare_host_gets_http_and_trailing_slash() {
        let api = client("packet.csh.rit.edu");
        assert_eq!(
            api.url(&["api", "packet", "7"]).as_str(),
            "http://packet.csh.rit.edu/api/packet/7/"
        );
    }

    #[test]
    fn explicit_scheme_and_prefix_are_kept() {
        let api = client("https://example.com/packet/");
        assert_eq!(
            api.url(&["api", "freshman", "bob"]).as_str(),
            "https://example.com/packet/api/freshman/bob/"
        );
    }

    #[test]
    fn segments_are_percent_encoded() {
        let api = client("localhost:8000");
        assert_eq!(
            api.url(&["api", "freshmen", "van der/berg"]).as_str(),
            "http://localhost:8000/api/freshmen/van%20der%2Fberg/"
        );
    }

    #[test]
    fn error_description_is_optional() {
        assert_eq!(
            error_description(r#"{"description": "Packet not found"}"#).as_deref(),
            Some("Packet not found")
        );
        assert_eq!(error_description(r#"{"error": 404}"#), None);
        assert_eq!(error_description("<html>Not Found</html>"), None);
        assert_eq!(error_description(r#"{"description": 5}"#), None);
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = session_headers("abc\ndef").unwrap_err();
        assert!(matches!(err, PacketError::InvalidToken));
    }

    #[test]
    fn server_without_host_is_rejected() {
        let err = base_url("mailto:someone").unwrap_err();
        assert!(matches!(err, PacketError::InvalidServer(_)));
    }
}
