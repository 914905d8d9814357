use std::sync::mpsc::Sender;

use thiserror::Error;

use crate::domain::auth::AuthState;
use crate::events::ProductCreated;
use crate::forms::import_export::{
    ImportSummary, RowOutcome, TEMPLATE_HEADERS, parse_bulk_import,
};

use super::auth::check_session;
use super::{ServiceError, ServiceResult};

/// Terminal result of a bulk import that parsed successfully.
///
/// Skipped rows are only counted; they are never reported individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// `count` creation events were dispatched.
    Imported { count: usize, summary: ImportSummary },
    /// Every data row was skipped; nothing was dispatched.
    NoValidRows { summary: ImportSummary },
}

impl ImportOutcome {
    /// Number of products queued for creation.
    pub fn imported(&self) -> usize {
        match self {
            ImportOutcome::Imported { count, .. } => *count,
            ImportOutcome::NoValidRows { .. } => 0,
        }
    }

    pub fn summary(&self) -> &ImportSummary {
        match self {
            ImportOutcome::Imported { summary, .. } | ImportOutcome::NoValidRows { summary } => {
                summary
            }
        }
    }
}

/// Parse an uploaded CSV and dispatch one [`ProductCreated`] per accepted row,
/// in file order.
///
/// A file-level parse failure dispatches nothing.
pub fn import_products(
    bytes: &[u8],
    session: &AuthState,
    events: &Sender<ProductCreated>,
) -> ServiceResult<ImportOutcome> {
    check_session(session)?;

    let parsed = parse_bulk_import(bytes).map_err(|e| {
        log::warn!("Rejected import file: {e}");
        ServiceError::Import(e)
    })?;
    let summary = parsed.summary();

    let mut count = 0;
    for row in parsed.rows {
        match row.outcome {
            RowOutcome::Accepted(product) => {
                if events.send(ProductCreated(product)).is_err() {
                    log::error!("Product event channel closed after {count} rows");
                    return Err(ServiceError::Internal);
                }
                count += 1;
            }
            RowOutcome::Skipped(reason) => {
                log::debug!("Skipping import row {}: {reason}", row.row_number);
            }
        }
    }

    if count == 0 {
        log::warn!("Import contained no valid rows");
        return Ok(ImportOutcome::NoValidRows { summary });
    }

    log::info!("Queued {count} products from import");
    Ok(ImportOutcome::Imported { count, summary })
}

#[derive(Debug, Clone)]
pub struct DownloadFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to render csv")]
    CsvRender,
}

/// The header-only CSV template offered for download.
pub fn download_template() -> Result<DownloadFile, DownloadError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(TEMPLATE_HEADERS)
        .map_err(|_| DownloadError::CsvRender)?;
    let bytes = writer.into_inner().map_err(|_| DownloadError::CsvRender)?;
    Ok(DownloadFile {
        file_name: "product_import_template.csv".to_string(),
        content_type: "text/csv; charset=utf-8",
        bytes,
    })
}
