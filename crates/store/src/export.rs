use shared_types::{AppError, LegalCase, LegalCaseExport};
use std::io::Write;
use std::path::Path;

/// Flatten one assembled case into its export shape.
pub fn export_case(case: &LegalCase) -> LegalCaseExport {
    case.clone().into()
}

/// Serialize a batch of cases as a pretty-printed JSON array to any
/// destination. One object per case; exactly one subtype-keyed extension
/// sub-object per non-Other case.
pub fn write_json<W: Write>(cases: &[LegalCase], writer: W) -> Result<(), AppError> {
    let exports: Vec<LegalCaseExport> = cases.iter().map(export_case).collect();
    serde_json::to_writer_pretty(writer, &exports)
        .map_err(|e| AppError::internal(format!("JSON export failed: {e}")))
}

/// Export a batch of cases to a file, creating or truncating it.
pub fn write_json_file(cases: &[LegalCase], path: &Path) -> Result<(), AppError> {
    let file = std::fs::File::create(path)
        .map_err(|e| AppError::internal(format!("Cannot write {}: {e}", path.display())))?;
    write_json(cases, std::io::BufWriter::new(file))
}
