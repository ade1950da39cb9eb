//! OAuth2 installed-app authorization and the local token cache.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, Utc};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::OAuthConfig;
use crate::error::{DriveError, Result};
use crate::models::{TokenErrorResponse, TokenResponse};

/// State parameter sent with the authorization URL.
const AUTH_STATE: &str = "state-token";

/// Tokens this close to expiry are treated as expired.
const EXPIRY_DELTA_SECS: i64 = 10;

/// Access and refresh token pair, as cached in `token.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    fn from_response(response: TokenResponse) -> Self {
        let expiry = response
            .expires_in
            .filter(|secs| *secs > 0)
            .map(|secs| Utc::now() + Duration::seconds(secs));

        Self {
            access_token: response.access_token,
            token_type: response.token_type.unwrap_or_else(default_token_type),
            refresh_token: response.refresh_token,
            expiry,
        }
    }

    /// Whether the access token has expired. Tokens without an expiry never do.
    pub fn is_expired(&self) -> bool {
        // Some writers store "no expiry" as the zero timestamp 0001-01-01.
        match self.expiry.filter(|t| t.year() > 1) {
            Some(expiry) => expiry <= Utc::now() + Duration::seconds(EXPIRY_DELTA_SECS),
            None => false,
        }
    }
}

/// File-backed token cache.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached token.
    ///
    /// Returns [`DriveError::TokenNotFound`] when the file is missing,
    /// unreadable or not a valid token.
    pub fn load(&self) -> Result<Token> {
        let not_found = || DriveError::TokenNotFound(self.path.display().to_string());

        let content = fs::read_to_string(&self.path).map_err(|e| {
            tracing::debug!("cannot read token cache {}: {}", self.path.display(), e);
            not_found()
        })?;

        serde_json::from_str(&content).map_err(|e| {
            tracing::debug!("cannot decode token cache {}: {}", self.path.display(), e);
            not_found()
        })
    }

    /// Write the token, creating or truncating the cache file.
    pub fn save(&self, token: &Token) -> Result<()> {
        tracing::info!("Saving credential file to: {}", self.path.display());

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        let json = serde_json::to_string(token)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }
}

/// Source of an authorization code for a consent URL.
#[async_trait]
pub trait AuthCodeSource: Send + Sync {
    async fn obtain_code(&self, auth_url: &str) -> Result<String>;
}

/// Prints the consent URL and reads the code from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

#[async_trait]
impl AuthCodeSource for ConsolePrompt {
    async fn obtain_code(&self, auth_url: &str) -> Result<String> {
        println!(
            "Go to the following link in your browser then type the authorization code:\n{}",
            auth_url
        );

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;

        let code = line.trim();
        if code.is_empty() {
            return Err(DriveError::AuthorizationError(
                "no authorization code entered".to_string(),
            ));
        }
        Ok(code.to_string())
    }
}

/// Talks to the OAuth2 endpoints of a client configuration.
#[derive(Clone)]
pub struct Authenticator {
    config: OAuthConfig,
    http: Client,
}

impl Authenticator {
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Consent page URL requesting offline access.
    pub fn authorization_url(&self) -> Result<Url> {
        let scope = self.config.scopes.join(" ");
        Url::parse_with_params(
            &self.config.auth_uri,
            &[
                ("access_type", "offline"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("state", AUTH_STATE),
            ],
        )
        .map_err(|e| DriveError::InvalidConfig(format!("auth_uri: {}", e)))
    }

    /// Exchange an authorization code for a token.
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        self.request_token(&params)
            .await
            .map_err(|e| match e {
                DriveError::TokenRefreshError(msg) => DriveError::AuthorizationError(msg),
                other => other,
            })
    }

    /// Obtain a fresh access token. The refresh token is carried over when
    /// the endpoint does not issue a new one.
    pub async fn refresh(&self, token: &Token) -> Result<Token> {
        let refresh_token = token.refresh_token.as_deref().ok_or_else(|| {
            DriveError::TokenRefreshError("token has expired and has no refresh token".to_string())
        })?;

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let mut fresh = self.request_token(&params).await?;
        if fresh.refresh_token.is_none() {
            fresh.refresh_token = Some(refresh_token.to_string());
        }
        Ok(fresh)
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<Token> {
        let response = self
            .http
            .post(&self.config.token_uri)
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(desc) => format!("{}: {}", err.error, desc),
                    None => err.error,
                },
                Err(_) => body,
            };
            return Err(DriveError::TokenRefreshError(format!(
                "Status {}: {}",
                status, message
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(Token::from_response(token_response))
    }
}

/// Run the consent flow once: build the URL, obtain a code, exchange it.
pub async fn acquire_via_interactive_flow(
    auth: &Authenticator,
    source: &dyn AuthCodeSource,
) -> Result<Token> {
    let url = auth.authorization_url()?;
    let code = source.obtain_code(url.as_str()).await?;
    auth.exchange_code(&code).await
}

/// Load the cached token, or authorize interactively and cache the result.
pub async fn obtain_token(
    store: &TokenStore,
    auth: &Authenticator,
    source: &dyn AuthCodeSource,
) -> Result<Token> {
    match store.load() {
        Ok(token) => Ok(token),
        Err(DriveError::TokenNotFound(path)) => {
            tracing::info!("No usable token at {}, starting authorization", path);
            let token = acquire_via_interactive_flow(auth, source).await?;
            store.save(&token)?;
            Ok(token)
        }
        Err(e) => Err(e),
    }
}
