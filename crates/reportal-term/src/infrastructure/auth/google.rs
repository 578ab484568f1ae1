use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::sync::Mutex;
use tokio::time::timeout;
use uuid::Uuid;

const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const OAUTH_SCOPE: &str = "openid email profile";
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("the account {0} is outside the allowed workspace domain")]
    DomainRejected(String),
    #[error("sign-in flow failed: {0}")]
    Flow(String),
    #[error("state returned by the provider does not match this sign-in attempt")]
    StateMismatch,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The signed-in identity, as reported by Google's userinfo endpoint.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub subject: String,
    pub email: String,
}

/// Domain-gated Google sign-in.
///
/// Runs the OAuth authorization-code flow against a short-lived localhost
/// listener: the consent URL is printed for the user to open, the redirect
/// lands on the listener, and the resulting profile is accepted only when its
/// email belongs to the configured workspace domain.
pub struct GoogleAuthGate {
    client_id: String,
    client_secret: String,
    domain: String,
    http: reqwest::Client,
    redirect_port: u16,
    token_url: String,
    userinfo_url: String,
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    email: String,
}

type CallbackSlot = Arc<Mutex<Option<oneshot::Sender<CallbackParams>>>>;

async fn callback_handler(
    State(slot): State<CallbackSlot>,
    Query(params): Query<CallbackParams>,
) -> &'static str {
    if let Some(sender) = slot.lock().await.take() {
        let _ = sender.send(params);
    }

    return "サインインが完了しました。ターミナルに戻ってください。";
}

impl GoogleAuthGate {
    pub fn new(client_id: &str, client_secret: &str, domain: &str, redirect_port: u16) -> Self {
        return GoogleAuthGate {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            domain: domain.to_string(),
            http: reqwest::Client::new(),
            redirect_port,
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        };
    }

    #[cfg(test)]
    fn with_endpoints(mut self, token_url: &str, userinfo_url: &str) -> Self {
        self.token_url = token_url.to_string();
        self.userinfo_url = userinfo_url.to_string();
        return self;
    }

    /// Run the whole flow: print the consent URL, wait for the redirect,
    /// exchange the code, and check the profile against the domain gate.
    pub async fn sign_in(&self) -> Result<AuthSession, AuthError> {
        let state = Uuid::new_v4().simple().to_string();

        println!(
            "ブラウザで以下のURLを開いてサインインしてください:\n\n{}\n",
            self.authorize_url(&state)
        );

        let params = self.wait_for_callback().await?;
        if let Some(error) = params.error {
            return Err(AuthError::Flow(format!("provider returned: {error}")));
        }
        if params.state.as_deref() != Some(&state) {
            return Err(AuthError::StateMismatch);
        }
        let code = params
            .code
            .ok_or_else(|| AuthError::Flow("callback carried no code".to_string()))?;

        let access_token = self.exchange_code(&code).await?;
        let profile = self.fetch_profile(&access_token).await?;

        if !self.email_matches_domain(&profile.email) {
            tracing::warn!(email = %profile.email, "sign-in rejected by domain gate");
            return Err(AuthError::DomainRejected(profile.email));
        }

        tracing::info!(email = %profile.email, "signed in");
        return Ok(AuthSession {
            subject: profile.sub,
            email: profile.email,
        });
    }

    fn redirect_uri(&self) -> String {
        return format!("http://127.0.0.1:{}/callback", self.redirect_port);
    }

    /// The consent URL. `hd` preselects the workspace domain and
    /// `prompt=select_account` forces the account chooser, but neither is a
    /// security boundary; the email check after sign-in is.
    fn authorize_url(&self, state: &str) -> String {
        return format!(
            "{GOOGLE_AUTHORIZE_URL}?client_id={}&redirect_uri={}&response_type=code&scope={}&prompt=select_account&hd={}&state={state}",
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri()),
            urlencoding::encode(OAUTH_SCOPE),
            urlencoding::encode(&self.domain),
        );
    }

    async fn wait_for_callback(&self) -> Result<CallbackParams, AuthError> {
        let (sender, receiver) = oneshot::channel::<CallbackParams>();
        let slot: CallbackSlot = Arc::new(Mutex::new(Some(sender)));

        let router = Router::new()
            .route("/callback", get(callback_handler))
            .with_state(slot);

        let listener = TcpListener::bind(("127.0.0.1", self.redirect_port))
            .await
            .map_err(|err| {
                AuthError::Flow(format!(
                    "could not listen on port {}: {err}",
                    self.redirect_port
                ))
            })?;

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let params = timeout(CALLBACK_TIMEOUT, receiver)
            .await
            .map_err(|_| AuthError::Flow("timed out waiting for the sign-in redirect".to_string()))
            .and_then(|received| {
                received
                    .map_err(|_| AuthError::Flow("redirect listener closed".to_string()))
            });

        server.abort();
        return params;
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("code", code),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
                ("redirect_uri", &self.redirect_uri()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Flow(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await?;
        return Ok(token.access_token);
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<UserInfo, AuthError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Flow(format!(
                "userinfo endpoint returned {}",
                response.status()
            )));
        }

        return Ok(response.json::<UserInfo>().await?);
    }

    fn email_matches_domain(&self, email: &str) -> bool {
        return email.ends_with(&format!("@{}", self.domain));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> GoogleAuthGate {
        return GoogleAuthGate::new("client-id", "client-secret", "growth-force.co.jp", 8765);
    }

    #[test]
    fn test_domain_gate_matches_full_domain_only() {
        let gate = gate();

        assert!(gate.email_matches_domain("taro@growth-force.co.jp"));
        assert!(!gate.email_matches_domain("taro@gmail.com"));
        // A superstring domain must not slip through.
        assert!(!gate.email_matches_domain("taro@evil-growth-force.co.jp.attacker.com"));
        assert!(!gate.email_matches_domain("growth-force.co.jp"));
    }

    #[test]
    fn test_authorize_url_carries_the_flow_parameters() {
        let url = gate().authorize_url("state123");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8765%2Fcallback"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("prompt=select_account"));
        assert!(url.contains("hd=growth-force.co.jp"));
        assert!(url.contains("state=state123"));
    }

    #[tokio::test]
    async fn test_exchange_code_posts_the_grant() {
        let mut server = mockito::Server::new_async().await;
        let token_mock = server
            .mock("POST", "/token")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("code".to_string(), "abc".to_string()),
                mockito::Matcher::UrlEncoded(
                    "grant_type".to_string(),
                    "authorization_code".to_string(),
                ),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token": "token-1"}"#)
            .create_async()
            .await;

        let gate = gate().with_endpoints(&format!("{}/token", server.url()), &server.url());
        let access_token = gate.exchange_code("abc").await.unwrap();

        assert_eq!(access_token, "token-1");
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_profile_uses_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let userinfo_mock = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer token-1")
            .with_status(200)
            .with_body(r#"{"sub": "sub-1", "email": "taro@growth-force.co.jp"}"#)
            .create_async()
            .await;

        let gate = gate().with_endpoints(&server.url(), &format!("{}/userinfo", server.url()));
        let profile = gate.fetch_profile("token-1").await.unwrap();

        assert_eq!(profile.sub, "sub-1");
        assert_eq!(profile.email, "taro@growth-force.co.jp");
        userinfo_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_token_exchange_is_a_flow_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let gate = gate().with_endpoints(&format!("{}/token", server.url()), &server.url());

        match gate.exchange_code("expired").await {
            Err(AuthError::Flow(message)) => assert!(message.contains("400")),
            other => panic!("expected flow error, got {other:?}"),
        }
    }
}
