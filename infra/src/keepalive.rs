//! Periodic GET against a public URL so free-tier hosts do not idle the
//! instance.

use std::time::Duration;

use lg_shared::KeepAliveConfig;
use tokio::task::JoinHandle;

/// Start the keep-alive loop; `None` when no URL is configured
pub fn spawn_keep_alive(config: &KeepAliveConfig) -> Option<JoinHandle<()>> {
    let url = config.url.clone().filter(|u| !u.trim().is_empty())?;
    let period = Duration::from_secs(config.interval_secs.max(1));

    let client = match reqwest::Client::builder().timeout(Duration::from_secs(30)).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "keep-alive disabled: could not build HTTP client");
            return None;
        }
    };

    tracing::info!(%url, interval_secs = period.as_secs(), "keep-alive enabled");
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately; skip it
        ticker.tick().await;
        loop {
            ticker.tick().await;
            ping(&client, &url).await;
        }
    }))
}

async fn ping(client: &reqwest::Client, url: &str) {
    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            tracing::debug!(%url, status = %response.status(), "keep-alive ping");
        }
        Ok(response) => {
            tracing::warn!(%url, status = %response.status(), "keep-alive ping returned an error status");
        }
        Err(e) => {
            tracing::warn!(%url, error = %e, "keep-alive ping failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_without_url() {
        let config = KeepAliveConfig {
            url: None,
            interval_secs: 840,
        };
        assert!(spawn_keep_alive(&config).is_none());

        let config = KeepAliveConfig {
            url: Some("  ".into()),
            interval_secs: 840,
        };
        assert!(spawn_keep_alive(&config).is_none());
    }

    #[tokio::test]
    async fn test_spawns_with_url() {
        let config = KeepAliveConfig {
            url: Some("http://127.0.0.1:9/health".into()),
            interval_secs: 3600,
        };
        let handle = spawn_keep_alive(&config).unwrap();
        assert!(!handle.is_finished());
        handle.abort();
    }
}
