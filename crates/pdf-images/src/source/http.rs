//! Images fetched over HTTP(S)

use super::{ImageSource, SourceError, SourceImage, decode_blocking};
use std::time::Duration;

/// An image behind a URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ImageSource for HttpSource {
    fn label(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<SourceImage, SourceError> {
        let url = reqwest::Url::parse(&self.url)
            .map_err(|e| SourceError::InvalidUrl(format!("{} ({})", self.url, e)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        log::debug!("Fetched {} bytes from {}", bytes.len(), self.url);
        decode_blocking(bytes.to_vec(), self.label()).await
    }
}

/// Build the client shared by all remote sources of one conversion.
///
/// No retries are attempted; a request that exceeds `timeout` fails.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Split text into URLs, one per line, ignoring blank lines.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
