use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK},
    StatusCode,
};
use serde::Deserialize;

use super::ChangeLister;
use crate::error::Error;

const DEFAULT_API_URL: &str = "https://api.github.com";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Lists changed files through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubLister {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct FilesPage {
    #[serde(default)]
    files: Vec<ChangedFile>,
}

#[derive(Debug, Deserialize)]
struct ChangedFile {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GithubLister {
    /// Create a lister for the public API, or for a GitHub Enterprise server.
    pub fn new(token: &str, server: Option<&str>) -> Result<Self, Error> {
        let api_url = match server {
            Some(server) => format!("{}/api/v3", server.trim_end_matches('/')),
            None => DEFAULT_API_URL.to_owned(),
        };

        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::InvalidToken)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client, api_url })
    }

    /// Collect the file names of every page starting at `url`.
    async fn files(&self, url: String) -> Result<Vec<String>, Error> {
        let mut files = Vec::new();
        let mut next = Some(url);
        while let Some(url) = next.take() {
            let response = self.client.get(&url).send().await?;
            if let Some(remaining) = response
                .headers()
                .get(RATE_LIMIT_REMAINING)
                .and_then(|value| value.to_str().ok())
            {
                tracing::debug!("token API calls per hour remaining: {remaining}");
            }

            let status = response.status();
            if !status.is_success() {
                let body = response.bytes().await?;
                return Err(provider_error(status, &body));
            }

            next = next_page(response.headers());
            let page = response.json::<FilesPage>().await?;
            files.extend(page.files.into_iter().map(|file| file.filename));
        }
        Ok(files)
    }
}

impl ChangeLister for GithubLister {
    async fn list_all(&self, repo: &str, revision: &str) -> Result<Vec<String>, Error> {
        self.files(format!("{}/repos/{repo}/commits/{revision}", self.api_url))
            .await
    }

    async fn list_changed(
        &self,
        repo: &str,
        before: &str,
        after: &str,
    ) -> Result<Vec<String>, Error> {
        self.files(format!(
            "{}/repos/{repo}/compare/{before}...{after}",
            self.api_url
        ))
        .await
    }
}

fn provider_error(status: StatusCode, body: &[u8]) -> Error {
    let message = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(body) => body.message,
        Err(_) if body.is_empty() => status.canonical_reason().unwrap_or_default().to_owned(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    };
    Error::Provider { status, message }
}

/// Find the `rel="next"` target of a `Link` header.
fn next_page(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        params
            .split(';')
            .any(|param| param.trim() == r#"rel="next""#)
            .then(|| {
                target
                    .trim()
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .to_owned()
            })
    })
}
