#[cfg(feature = "desktop")]
pub mod desktop;

#[cfg(feature = "desktop")]
pub use desktop::files::{pick_csv_file, save_export};
#[cfg(feature = "desktop")]
pub use desktop::runtime::{sleep, startup_link};

#[cfg(not(feature = "desktop"))]
mod fallback;

#[cfg(not(feature = "desktop"))]
pub use fallback::{pick_csv_file, save_export, sleep, startup_link};
