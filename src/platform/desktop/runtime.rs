use std::time::Duration;

/// First command-line argument, taken as a shared link or bare token.
pub async fn startup_link() -> Option<String> {
    std::env::args().nth(1).filter(|arg| !arg.trim().is_empty())
}

pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
