use std::path::{Path, PathBuf};

use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::summary::STUDENT_COLUMN;

/// Load failure with a stable machine-readable code, mapped straight onto the
/// IPC error envelope by the handlers.
#[derive(Debug, Clone, Serialize)]
pub struct AnchorError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AnchorError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: &str,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorFormat {
    Xls,
    Xlsx,
}

/// Only the two anchor export formats are accepted; anything else is rejected
/// before any file IO happens.
pub fn supported_format(path: &Path) -> Option<AnchorFormat> {
    let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
    match ext.as_str() {
        "xls" => Some(AnchorFormat::Xls),
        "xlsx" => Some(AnchorFormat::Xlsx),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct AnchorRow {
    pub student: String,
    /// One trimmed cell per header column; `None` for blank cells.
    pub cells: Vec<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct AnchorTable {
    pub headers: Vec<String>,
    pub rows: Vec<AnchorRow>,
}

impl AnchorTable {
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn record_count(&self) -> usize {
        self.rows.len()
    }
}

/// The loaded dataset plus the metadata the frontend shows in the upload
/// banner. Replaced wholesale on every load; nothing is persisted.
pub struct LoadedAnchor {
    pub dataset_id: String,
    pub source_path: PathBuf,
    pub fingerprint: String,
    pub loaded_at: String,
    pub table: AnchorTable,
}

pub fn load_anchor(path: &Path) -> Result<LoadedAnchor, AnchorError> {
    let table = load_anchor_workbook(path)?;
    let fingerprint = fingerprint_file(path)
        .map_err(|e| AnchorError::new("workbook_read_failed", e.to_string()))?;
    Ok(LoadedAnchor {
        dataset_id: Uuid::new_v4().to_string(),
        source_path: path.to_path_buf(),
        fingerprint,
        loaded_at: Utc::now().to_rfc3339(),
        table,
    })
}

pub fn load_anchor_workbook(path: &Path) -> Result<AnchorTable, AnchorError> {
    if supported_format(path).is_none() {
        return Err(AnchorError::with_details(
            "unsupported_format",
            "only .xls and .xlsx anchor files are supported",
            json!({ "path": path.to_string_lossy() }),
        ));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| {
        AnchorError::with_details(
            "workbook_read_failed",
            e.to_string(),
            json!({ "path": path.to_string_lossy() }),
        )
    })?;

    let range = match workbook.worksheet_range_at(0) {
        None => {
            return Err(AnchorError::new(
                "empty_workbook",
                "workbook has no worksheets",
            ))
        }
        Some(Err(e)) => return Err(AnchorError::new("workbook_read_failed", e.to_string())),
        Some(Ok(r)) => r,
    };

    table_from_range(&range)
}

fn table_from_range(range: &calamine::Range<Data>) -> Result<AnchorTable, AnchorError> {
    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Err(AnchorError::new(
            "empty_workbook",
            "workbook has no header row",
        ));
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|c| cell_text(c).unwrap_or_default())
        .collect();

    let Some(student_col) = headers.iter().position(|h| h == STUDENT_COLUMN) else {
        return Err(AnchorError::with_details(
            "missing_student_column",
            format!(
                "anchor file is missing the required '{}' column",
                STUDENT_COLUMN
            ),
            json!({ "headers": headers }),
        ));
    };

    let mut rows: Vec<AnchorRow> = Vec::new();
    for raw in rows_iter {
        let mut cells: Vec<Option<String>> = Vec::with_capacity(headers.len());
        for i in 0..headers.len() {
            cells.push(raw.get(i).and_then(cell_text));
        }
        // Rows without a student name are noise (blank padding, stray totals).
        let Some(student) = cells.get(student_col).cloned().flatten() else {
            continue;
        };
        rows.push(AnchorRow { student, cells });
    }

    Ok(AnchorTable { headers, rows })
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn fingerprint_file(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.to_string_lossy()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
