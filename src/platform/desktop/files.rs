use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rfd::FileDialog;
use tracing::info;

use crate::platform::desktop::paths::default_export_dir;
use crate::usecase::services::export_service::ExportFile;

pub fn pick_csv_file() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file()
}

pub fn write_export(path: &Path, file: &ExportFile) -> Result<()> {
    std::fs::write(path, &file.bytes)
        .with_context(|| format!("failed to write export: {}", path.display()))?;
    info!(path = %path.display(), bytes = file.bytes.len(), "saved export");
    Ok(())
}

/// Asks where to save `file`. `Ok(None)` when the dialog is cancelled.
pub fn save_export(file: &ExportFile) -> Result<Option<PathBuf>> {
    let mut dialog = FileDialog::new().set_file_name(file.file_name);
    if let Some(dir) = default_export_dir() {
        dialog = dialog.set_directory(dir);
    }
    let Some(path) = dialog.save_file() else {
        return Ok(None);
    };
    write_export(&path, file)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn write_export_stores_bytes() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        let temp_dir = std::env::temp_dir().join(format!("csv-viewer-export-{nanos}"));
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        let path = temp_dir.join("filtered_data.csv");
        let file = ExportFile {
            file_name: "filtered_data.csv",
            bytes: b"a\n\"1\"".to_vec(),
        };

        write_export(&path, &file).expect("export should be written");

        assert_eq!(fs::read(&path).expect("should read export"), file.bytes);
        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }
}
