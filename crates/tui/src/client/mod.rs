use api_types::environment::EnvironmentDescriptor;
use reqwest::Url;

/// Classified result of one API call attempt. Exactly one variant per
/// completed attempt; callers match exhaustively on all four.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome<T> {
    Success(T),
    Unauthorized,
    ServerError(u16),
    Unreachable,
}

/// HTTP client for the libDrive backend. The server base URL is supplied
/// per call from the resolved credential, since session and persistent
/// scopes may point at different servers.
///
/// `call`-style methods never return an error: every transport or HTTP
/// failure is classified into a `RequestOutcome` variant. No retries happen
/// here; retry is a caller-level decision driven by user choice.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// `GET {server}/api/v1/environment?a={auth}`.
    pub async fn environment(
        &self,
        server: &str,
        auth: &str,
    ) -> RequestOutcome<EnvironmentDescriptor> {
        let Some(url) = build_url(server, "api/v1/environment", "a", auth) else {
            return RequestOutcome::Unreachable;
        };

        match self.get(url).await {
            RequestOutcome::Success(res) => {
                let status = res.status().as_u16();
                match res.json::<EnvironmentDescriptor>().await {
                    Ok(env) => RequestOutcome::Success(env),
                    Err(err) => {
                        // A malformed success body counts as a backend fault.
                        tracing::warn!("environment body decode failed: {err}");
                        RequestOutcome::ServerError(status)
                    }
                }
            }
            RequestOutcome::Unauthorized => RequestOutcome::Unauthorized,
            RequestOutcome::ServerError(code) => RequestOutcome::ServerError(code),
            RequestOutcome::Unreachable => RequestOutcome::Unreachable,
        }
    }

    /// `GET {server}/api/v1/config?secret={secret}`. The success body is
    /// opaque and discarded; only the status classification matters.
    pub async fn validate_config(&self, server: &str, secret: &str) -> RequestOutcome<()> {
        let Some(url) = build_url(server, "api/v1/config", "secret", secret) else {
            return RequestOutcome::Unreachable;
        };

        match self.get(url).await {
            RequestOutcome::Success(_) => RequestOutcome::Success(()),
            RequestOutcome::Unauthorized => RequestOutcome::Unauthorized,
            RequestOutcome::ServerError(code) => RequestOutcome::ServerError(code),
            RequestOutcome::Unreachable => RequestOutcome::Unreachable,
        }
    }

    async fn get(&self, url: Url) -> RequestOutcome<reqwest::Response> {
        match self.http.get(url).send().await {
            Ok(res) => {
                let status = res.status();
                if status.is_success() {
                    RequestOutcome::Success(res)
                } else if status.as_u16() == 401 {
                    RequestOutcome::Unauthorized
                } else {
                    RequestOutcome::ServerError(status.as_u16())
                }
            }
            Err(err) => {
                // No response at all: DNS failure, connection refused,
                // transport timeout.
                tracing::warn!("request failed without a response: {err}");
                RequestOutcome::Unreachable
            }
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Combines the server base with the endpoint path and attaches the single
/// authorization query parameter the endpoint expects. An unparseable server
/// address classifies as unreachable: it is an address problem the user can
/// fix, no request can even be attempted.
fn build_url(server: &str, path: &str, auth_key: &str, auth_value: &str) -> Option<Url> {
    let raw = format!("{}/{path}", server.trim_end_matches('/'));
    let mut url = match Url::parse(&raw) {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!("invalid server address {server:?}: {err}");
            return None;
        }
    };
    url.query_pairs_mut().append_pair(auth_key, auth_value);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_combines_server_and_path() {
        let url = build_url("http://127.0.0.1:9090", "api/v1/environment", "a", "token")
            .expect("valid url");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9090/api/v1/environment?a=token"
        );
    }

    #[test]
    fn build_url_tolerates_trailing_slash() {
        let url =
            build_url("http://host:9090/", "api/v1/config", "secret", "s").expect("valid url");
        assert_eq!(url.as_str(), "http://host:9090/api/v1/config?secret=s");
    }

    #[test]
    fn build_url_escapes_the_credential() {
        let url = build_url("http://host:9090", "api/v1/config", "secret", "a b&c")
            .expect("valid url");
        assert_eq!(url.as_str(), "http://host:9090/api/v1/config?secret=a+b%26c");
    }

    #[test]
    fn build_url_rejects_garbage_addresses() {
        assert!(build_url("not a url", "api/v1/config", "secret", "s").is_none());
    }
}

#[cfg(test)]
mod classification_tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn two_xx_classifies_as_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/config"))
            .and(query_param("secret", "right"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let outcome = Client::new().validate_config(&server.uri(), "right").await;
        assert_eq!(outcome, RequestOutcome::Success(()));
    }

    #[tokio::test]
    async fn four_oh_one_classifies_as_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/config"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let outcome = Client::new().validate_config(&server.uri(), "wrong").await;
        assert_eq!(outcome, RequestOutcome::Unauthorized);
    }

    #[tokio::test]
    async fn other_statuses_classify_as_server_error_with_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/config"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let outcome = Client::new().validate_config(&server.uri(), "s").await;
        assert_eq!(outcome, RequestOutcome::ServerError(503));

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/config"))
            .respond_with(ResponseTemplate::new(418))
            .mount(&server)
            .await;

        let outcome = Client::new().validate_config(&server.uri(), "s").await;
        assert_eq!(outcome, RequestOutcome::ServerError(418));
    }

    #[tokio::test]
    async fn connection_refused_classifies_as_unreachable() {
        // Port 1 is never listening.
        let outcome = Client::new().validate_config("http://127.0.0.1:1", "s").await;
        assert_eq!(outcome, RequestOutcome::Unreachable);
    }

    #[tokio::test]
    async fn environment_success_parses_the_descriptor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/environment"))
            .and(query_param("a", "token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "account_list": { "acc": { "display_name": "Alice" } },
                "category_list": { "cat": { "name": "Movies" } }
            })))
            .mount(&server)
            .await;

        let env = match Client::new().environment(&server.uri(), "token").await {
            RequestOutcome::Success(env) => env,
            other => panic!("expected success, got {other:?}"),
        };
        assert_eq!(env.account_list["acc"].display_name, "Alice");
        assert_eq!(env.category_list["cat"].name, "Movies");
    }

    #[tokio::test]
    async fn environment_with_undecodable_body_is_a_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/environment"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let outcome = Client::new().environment(&server.uri(), "token").await;
        assert_eq!(outcome, RequestOutcome::ServerError(200));
    }
}
