use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use dioxus::document;
use tracing::warn;

use crate::infra::share::token::token_from_link;
use crate::usecase::services::export_service::ExportFile;

// Native dialogs only exist in the desktop build; other targets paste CSV text instead.
pub fn pick_csv_file() -> Option<PathBuf> {
    None
}

pub fn save_export(file: &ExportFile) -> Result<Option<PathBuf>> {
    bail!("saving {} needs the desktop build", file.file_name)
}

/// The page URL, when it carries a `state` parameter.
pub async fn startup_link() -> Option<String> {
    let href = match document::eval("return window.location.href;").join::<String>().await {
        Ok(href) => href,
        Err(err) => {
            warn!(?err, "could not read page location");
            return None;
        }
    };
    (href.contains('?') && token_from_link(&href).is_some()).then_some(href)
}

pub async fn sleep(duration: Duration) {
    let script = format!(
        "await new Promise(resolve => setTimeout(resolve, {})); return true;",
        duration.as_millis()
    );
    if let Err(err) = document::eval(&script).join::<bool>().await {
        warn!(?err, "timer failed");
    }
}
