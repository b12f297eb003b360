//! Serialized forms of an audit record for download.

use crate::domain::model::AuditRecord;
use crate::utils::error::{AuditError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const SUPPORTED_FORMATS: &[&str] = &["json", "csv"];

pub fn to_json(record: &AuditRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// One row per evaluated clause, in document order.
pub fn to_csv(record: &AuditRecord) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "audit_id",
        "number",
        "clause",
        "obligation",
        "risk",
        "risk_triggers",
        "ambiguous",
        "ambiguity_terms",
        "category",
        "similarity_score",
        "similarity_flag",
    ])?;

    let audit_id = record.audit_id.to_string();
    for clause in &record.clauses {
        let score = clause
            .similarity_score
            .map(|s| format!("{:.2}", s))
            .unwrap_or_default();
        writer.write_record([
            audit_id.as_str(),
            clause.number.as_deref().unwrap_or(""),
            clause.clause.as_str(),
            clause.obligation.as_str(),
            clause.risk.as_str(),
            clause.risk_triggers.join("; ").as_str(),
            if clause.ambiguous { "true" } else { "false" },
            clause.ambiguity_terms.join("; ").as_str(),
            clause.category.map(|c| c.as_str()).unwrap_or(""),
            score.as_str(),
            clause.similarity_flag.map(|f| f.as_str()).unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AuditError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| AuditError::service("csv export", e.to_string()))
}

pub fn render(record: &AuditRecord, format: &str) -> Result<String> {
    match format {
        "json" => to_json(record),
        "csv" => to_csv(record),
        other => Err(AuditError::InvalidConfigValueError {
            field: "output.formats".to_string(),
            value: other.to_string(),
            reason: format!("Supported formats: {}", SUPPORTED_FORMATS.join(", ")),
        }),
    }
}

/// Zip every requested format into one archive.
pub fn bundle(record: &AuditRecord, formats: &[String]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for format in formats {
        let content = render(record, format)?;
        zip.start_file::<_, ()>(format!("legal_audit_report.{}", format), FileOptions::default())?;
        zip.write_all(content.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
