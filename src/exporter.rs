//! Sequential driver: list, fetch and write every file of each job.

use std::path::Path;

use crate::client::DriveClient;
use crate::config::ExportJob;
use crate::error::Result;
use crate::export::{self, ExportMode};
use crate::models::format_size;
use crate::writer::{target_path, write_file};

/// Runs export jobs against one client.
pub struct Exporter<'a> {
    client: &'a DriveClient,
}

impl<'a> Exporter<'a> {
    pub fn new(client: &'a DriveClient) -> Self {
        Self { client }
    }

    /// Export every file under `folder_id` into `target_dir`.
    ///
    /// Returns the names of the files written, in processing order. The first
    /// error stops the folder; files written before it stay on disk.
    pub async fn export_folder(
        &self,
        folder_id: &str,
        target_dir: &Path,
        mode: ExportMode,
    ) -> Result<Vec<String>> {
        let files = self.client.list_files(folder_id).await?;
        let mut written = Vec::with_capacity(files.len());

        for record in &files {
            let folder_name = match record.parent() {
                Some(parent) => self.client.folder_name(parent).await?,
                None => "-".to_string(),
            };
            tracing::info!(
                "FileID={}, Filename={}, FolderName={} MimeType={}",
                record.id,
                record.name,
                folder_name,
                record.mime_type
            );

            let Some(fetched) = export::fetch(self.client, record, mode).await? else {
                continue;
            };

            let path = target_path(target_dir, &fetched.output_name)?;
            let n = write_file(&path, &fetched.bytes).await?;
            tracing::info!("wrote {} bytes ({}) to {}", n, format_size(n), path.display());
            written.push(fetched.output_name);
        }

        Ok(written)
    }

    /// Run jobs one after another, stopping at the first error.
    pub async fn run(&self, jobs: &[ExportJob]) -> Result<Vec<String>> {
        let mut written = Vec::new();
        for job in jobs {
            tracing::info!(
                "Exporting {} folder {} to {}",
                job.category,
                job.folder_id,
                job.target_dir.display()
            );
            let names = self
                .export_folder(&job.folder_id, &job.target_dir, job.mode)
                .await?;
            tracing::info!("{}: {} file(s) written", job.category, names.len());
            written.extend(names);
        }
        Ok(written)
    }
}
