use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Process-wide client for model provider calls. Cloning only bumps an `Arc`.
static PROVIDER_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("notes-backend/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("[AI] Falling back to default HTTP client: {}", e);
            Client::new()
        })
});

pub fn shared_client() -> &'static Client {
    &PROVIDER_CLIENT
}
