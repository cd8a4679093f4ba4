use reqwest::blocking::Client;
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

const USER_AGENT: &str = concat!("journaldeck/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug, Deserialize)]
pub struct RepoStats {
    pub stargazers_count: u64,
    pub forks_count: u64,
}

impl RepoStats {
    pub fn badge(&self) -> String {
        format!("★ {} · ⑂ {}", self.stargazers_count, self.forks_count)
    }
}

/// Kicks off one best-effort fetch of the repo's public stats on a
/// background thread. The result (or `None` on any failure) arrives on
/// the returned channel; nothing ever blocks the draw loop on this.
pub fn spawn_stats_fetch(slug: &str) -> Receiver<Option<RepoStats>> {
    let (tx, rx) = mpsc::channel();
    let url = format!("https://api.github.com/repos/{slug}");
    thread::spawn(move || {
        let _ = tx.send(fetch_stats(&url).ok());
    });
    rx
}

fn fetch_stats(url: &str) -> Result<RepoStats, String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| e.to_string())?;

    let response = client
        .get(url)
        .header("Accept", "application/vnd.github+json")
        .send()
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!("unexpected status {}", response.status()));
    }

    let body = response.text().map_err(|e| e.to_string())?;
    serde_json::from_str(&body).map_err(|e| e.to_string())
}
