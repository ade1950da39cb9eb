//! Per-file decision between skipping, direct download and server-side
//! conversion.

use crate::client::DriveClient;
use crate::config::{MIME_FORM, MIME_PDF, MIME_SVG};
use crate::error::Result;
use crate::models::FileRecord;

/// Target format of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Pdf,
    Svg,
}

impl ExportMode {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportMode::Pdf => MIME_PDF,
            ExportMode::Svg => MIME_SVG,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportMode::Pdf => "pdf",
            ExportMode::Svg => "svg",
        }
    }
}

/// What to do with one listed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing sensible to render; log and move on.
    Skip,
    /// Already in the target format.
    Download { output_name: String },
    /// Convert on the server to `mime_type`.
    Export {
        mime_type: &'static str,
        output_name: String,
    },
}

impl Action {
    pub fn output_name(&self) -> Option<&str> {
        match self {
            Action::Skip => None,
            Action::Download { output_name } | Action::Export { output_name, .. } => {
                Some(output_name.as_str())
            }
        }
    }
}

/// Bytes ready to be written, and the file name to write them under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub output_name: String,
}

/// Decide how `record` is handled in `mode`.
pub fn plan(record: &FileRecord, mode: ExportMode) -> Action {
    if record.mime_type == MIME_FORM {
        return Action::Skip;
    }

    let name = local_name(&record.name);
    match mode {
        ExportMode::Pdf if record.mime_type == MIME_PDF => Action::Download { output_name: name },
        _ => Action::Export {
            mime_type: mode.mime_type(),
            output_name: format!("{}.{}", name, mode.extension()),
        },
    }
}

/// Drive names may contain path separators; they become `_` locally.
fn local_name(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// Fetch the content for `record`, or `None` if it is skipped.
pub async fn fetch(
    client: &DriveClient,
    record: &FileRecord,
    mode: ExportMode,
) -> Result<Option<Fetched>> {
    let (bytes, output_name) = match plan(record, mode) {
        Action::Skip => {
            tracing::info!(
                "Excluding filename={}, MimeType={}",
                record.name,
                record.mime_type
            );
            return Ok(None);
        }
        Action::Download { output_name } => (client.download(&record.id).await?, output_name),
        Action::Export {
            mime_type,
            output_name,
        } => (client.export(&record.id, mime_type).await?, output_name),
    };

    Ok(Some(Fetched { bytes, output_name }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, mime_type: &str) -> FileRecord {
        FileRecord {
            id: format!("id-{}", name),
            name: name.to_string(),
            parents: vec!["folder".to_string()],
            mime_type: mime_type.to_string(),
        }
    }

    #[test]
    fn test_form_is_skipped_in_every_mode() {
        let form = record("Survey", MIME_FORM);
        assert_eq!(plan(&form, ExportMode::Pdf), Action::Skip);
        assert_eq!(plan(&form, ExportMode::Svg), Action::Skip);
        assert_eq!(plan(&form, ExportMode::Pdf).output_name(), None);
    }

    #[test]
    fn test_pdf_is_downloaded_unchanged() {
        let pdf = record("handout.pdf", MIME_PDF);
        assert_eq!(
            plan(&pdf, ExportMode::Pdf),
            Action::Download {
                output_name: "handout.pdf".to_string()
            }
        );
    }

    #[test]
    fn test_native_documents_exported_to_pdf() {
        for mime in [
            "application/vnd.google-apps.presentation",
            "application/vnd.google-apps.document",
            "application/vnd.google-apps.spreadsheet",
        ] {
            let doc = record("Intro", mime);
            assert_eq!(
                plan(&doc, ExportMode::Pdf),
                Action::Export {
                    mime_type: MIME_PDF,
                    output_name: "Intro.pdf".to_string()
                }
            );
        }
    }

    #[test]
    fn test_separators_in_names_are_replaced() {
        let pdf = record("/etc/cron.d/job", MIME_PDF);
        assert_eq!(plan(&pdf, ExportMode::Pdf).output_name(), Some("_etc_cron.d_job"));

        let doc = record("..\\..\\notes", "application/vnd.google-apps.document");
        assert_eq!(plan(&doc, ExportMode::Pdf).output_name(), Some(".._.._notes.pdf"));
    }

    #[test]
    fn test_svg_mode_exports_everything_but_forms() {
        let drawing = record("architecture", "application/vnd.google-apps.drawing");
        assert_eq!(
            plan(&drawing, ExportMode::Svg).output_name(),
            Some("architecture.svg")
        );

        // PDFs get no special treatment in SVG mode.
        let pdf = record("handout.pdf", MIME_PDF);
        assert_eq!(
            plan(&pdf, ExportMode::Svg),
            Action::Export {
                mime_type: MIME_SVG,
                output_name: "handout.pdf.svg".to_string()
            }
        );
    }
}
