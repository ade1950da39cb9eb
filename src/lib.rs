//! drive_export - Export Google Drive folders to local PDF and SVG files.
//!
//! This library provides functionality to:
//! - Authorize against Google Drive and cache the token locally
//! - List the files of a folder
//! - Export native documents to PDF or SVG, or download PDFs as-is
//! - Render a markdown index of the exported files
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use drive_export::auth::{obtain_token, ConsolePrompt, TokenStore};
//! use drive_export::config::{OAuthConfig, SCOPE_DRIVE};
//! use drive_export::{Authenticator, DriveClient, ExportMode, Exporter};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = OAuthConfig::from_file("credentials.json", &[SCOPE_DRIVE])?;
//!     let auth = Authenticator::new(config);
//!     let token = obtain_token(&TokenStore::new("token.json"), &auth, &ConsolePrompt).await?;
//!     let client = DriveClient::new(auth, token);
//!
//!     let written = Exporter::new(&client)
//!         .export_folder("folder-id", Path::new("out"), ExportMode::Pdf)
//!         .await?;
//!     println!("{}", drive_export::index::render(&written, "/pdf"));
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod exporter;
pub mod index;
pub mod models;
pub mod url_parser;
pub mod writer;

// Re-exports for convenience
pub use auth::{Authenticator, Token, TokenStore};
pub use client::DriveClient;
pub use config::{Category, ExportJob, OAuthConfig};
pub use error::{DriveError, Result};
pub use export::ExportMode;
pub use exporter::Exporter;
pub use models::FileRecord;
pub use url_parser::extract_folder_id;
