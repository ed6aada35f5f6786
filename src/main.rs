mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;


#[cfg(feature = "desktop")]
fn main() {
    use dioxus::desktop::{Config, WindowBuilder};

    dioxus::logger::initialize_default();

    let config = config::ViewerConfig::from_env();
    let mut desktop =
        Config::new().with_window(WindowBuilder::new().with_title(config.window_title.clone()));
    match platform::desktop::paths::default_webview_data_dir() {
        Ok(webview_data_dir) => desktop = desktop.with_data_directory(webview_data_dir),
        Err(err) => tracing::warn!("{err:#}; falling back to the default webview data directory"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop)
        .launch(app::App);
}

#[cfg(not(feature = "desktop"))]
fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(app::App);
}
