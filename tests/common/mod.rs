//! Shared fixtures for integration tests.

#![allow(dead_code)]

use drive_export::{Authenticator, DriveClient, OAuthConfig, Token};

pub const ACCESS_TOKEN: &str = "test-access-token";

pub fn oauth_config(server_url: &str) -> OAuthConfig {
    OAuthConfig {
        client_id: "client-1.apps.googleusercontent.com".to_string(),
        client_secret: "client-secret".to_string(),
        auth_uri: format!("{}/auth", server_url),
        token_uri: format!("{}/token", server_url),
        redirect_uri: "urn:ietf:wg:oauth:2.0:oob".to_string(),
        scopes: vec!["https://www.googleapis.com/auth/drive".to_string()],
    }
}

pub fn token(access_token: &str) -> Token {
    Token {
        access_token: access_token.to_string(),
        token_type: "Bearer".to_string(),
        refresh_token: None,
        expiry: None,
    }
}

/// Client talking to a mock server for both the API and the token endpoint.
pub fn client(server_url: &str) -> DriveClient {
    DriveClient::new(
        Authenticator::new(oauth_config(server_url)),
        token(ACCESS_TOKEN),
    )
    .with_base_url(server_url)
}

pub fn bearer(access_token: &str) -> String {
    format!("Bearer {}", access_token)
}
