//! Client configuration and the fixed export categories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DriveError, Result};
use crate::export::ExportMode;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_SVG: &str = "image/svg+xml";
pub const MIME_FOLDER: &str = "application/vnd.google-apps.folder";
pub const MIME_FORM: &str = "application/vnd.google-apps.form";

/// Read-only metadata scope.
pub const SCOPE_DRIVE_METADATA_READONLY: &str =
    "https://www.googleapis.com/auth/drive.metadata.readonly";
/// Full Drive scope, required by export.
pub const SCOPE_DRIVE: &str = "https://www.googleapis.com/auth/drive";

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Out-of-band redirect: the consent page shows the code to paste back.
const DEFAULT_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// OAuth2 client settings loaded from `credentials.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

/// Google client secret file. Desktop clients use `installed`, others `web`.
#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

#[derive(Debug, Deserialize)]
struct ClientSecret {
    client_id: String,
    client_secret: String,
    auth_uri: Option<String>,
    token_uri: Option<String>,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

impl OAuthConfig {
    /// Load a client secret file, requesting the given scopes.
    pub fn from_file<P: AsRef<Path>>(path: P, scopes: &[&str]) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content, scopes)
    }

    /// Parse client secret JSON.
    pub fn from_json(content: &str, scopes: &[&str]) -> Result<Self> {
        let file: ClientSecretFile = serde_json::from_str(content)?;
        let secret = file.installed.or(file.web).ok_or_else(|| {
            DriveError::InvalidConfig("expected an \"installed\" or \"web\" client".to_string())
        })?;

        if secret.client_id.is_empty() {
            return Err(DriveError::InvalidConfig("empty client_id".to_string()));
        }

        Ok(Self {
            client_id: secret.client_id,
            client_secret: secret.client_secret,
            auth_uri: secret.auth_uri.unwrap_or_else(|| DEFAULT_AUTH_URI.to_string()),
            token_uri: secret.token_uri.unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            redirect_uri: secret
                .redirect_uris
                .into_iter()
                .next()
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// A folder exported on each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Slides,
    Programs,
    Images,
}

impl Category {
    /// All categories in execution order.
    pub const ALL: [Category; 3] = [Category::Slides, Category::Programs, Category::Images];

    pub fn default_folder_id(self) -> &'static str {
        match self {
            Category::Slides => "0B-VJpOQeezDjZktuTnlEMEpGMUU",
            Category::Programs => "1ZaPoNf2RhMxonGKhGBgTBSTJ0ZxnQs82",
            Category::Images => "1JiVDJ62v_x8yf2GdadSjwLKPkng2nFtL",
        }
    }

    /// Target directory relative to the home directory.
    pub fn target_subpath(self) -> &'static str {
        match self {
            Category::Slides => "src/k8s-school-www/content/pdf",
            Category::Programs | Category::Images => "src/k8s-school-www/static/images",
        }
    }

    pub fn mode(self) -> ExportMode {
        match self {
            Category::Slides | Category::Programs => ExportMode::Pdf,
            Category::Images => ExportMode::Svg,
        }
    }

    pub fn target_dir(self, home: &Path) -> PathBuf {
        home.join(self.target_subpath())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Slides => "slides",
            Category::Programs => "programs",
            Category::Images => "images",
        };
        f.write_str(name)
    }
}

/// One folder to export: where to read from, where to write, which format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub category: Category,
    pub folder_id: String,
    pub target_dir: PathBuf,
    pub mode: ExportMode,
}

impl ExportJob {
    /// Job for a category using its default folder and target under `home`.
    pub fn for_category(category: Category, home: &Path) -> Self {
        Self {
            category,
            folder_id: category.default_folder_id().to_string(),
            target_dir: category.target_dir(home),
            mode: category.mode(),
        }
    }

    pub fn with_folder_id(mut self, folder_id: String) -> Self {
        self.folder_id = folder_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCOPES: &[&str] = &[SCOPE_DRIVE_METADATA_READONLY, SCOPE_DRIVE];

    #[test]
    fn test_installed_client_from_json() {
        let json = r#"{
            "installed": {
                "client_id": "123.apps.googleusercontent.com",
                "client_secret": "s3cret",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token",
                "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob", "http://localhost"]
            }
        }"#;

        let config = OAuthConfig::from_json(json, SCOPES).unwrap();
        assert_eq!(config.client_id, "123.apps.googleusercontent.com");
        assert_eq!(config.client_secret, "s3cret");
        assert_eq!(config.redirect_uri, "urn:ietf:wg:oauth:2.0:oob");
        assert_eq!(config.scopes.len(), 2);
    }

    #[test]
    fn test_web_client_uses_defaults() {
        let json = r#"{"web": {"client_id": "abc", "client_secret": "def"}}"#;

        let config = OAuthConfig::from_json(json, SCOPES).unwrap();
        assert_eq!(config.auth_uri, DEFAULT_AUTH_URI);
        assert_eq!(config.token_uri, DEFAULT_TOKEN_URI);
        assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    }

    #[test]
    fn test_missing_client_section() {
        let err = OAuthConfig::from_json(r#"{"other": {}}"#, SCOPES).unwrap_err();
        assert!(matches!(err, DriveError::InvalidConfig(_)));
    }

    #[test]
    fn test_category_modes() {
        assert_eq!(Category::Slides.mode(), ExportMode::Pdf);
        assert_eq!(Category::Programs.mode(), ExportMode::Pdf);
        assert_eq!(Category::Images.mode(), ExportMode::Svg);
    }

    #[test]
    fn test_job_target_dir_under_home() {
        let job = ExportJob::for_category(Category::Slides, Path::new("/home/alice"));
        assert_eq!(
            job.target_dir,
            PathBuf::from("/home/alice/src/k8s-school-www/content/pdf")
        );
        assert_eq!(job.folder_id, "0B-VJpOQeezDjZktuTnlEMEpGMUU");

        let job = job.with_folder_id("override".to_string());
        assert_eq!(job.folder_id, "override");
    }
}
