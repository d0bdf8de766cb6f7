use cuesheet::source::{self, RawTable, SheetReader, export_url};
use futures_util::StreamExt;
use reqwest::{StatusCode, header::ACCEPT_ENCODING};
use thiserror::Error;
use tracing::info;

/// Largest export we are willing to buffer. Real cue sheets are a few kilobytes.
const MAX_EXPORT_BYTES: usize = 4 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Response is not success: {0}")]
    Status(StatusCode),
    #[error("Export is larger than {0} bytes")]
    TooLarge(usize),
    #[error("Export could not be read: {0}")]
    Source(#[from] source::Error),
}

/// Downloads the CSV export behind a shared sheet link.
pub async fn fetch_table(
    client: &reqwest::Client,
    reader: &SheetReader,
    sheet_url: &str,
) -> Result<RawTable, FetchError> {
    let url = export_url(sheet_url);
    info!("Fetching {url}");
    let response = client
        .get(&url)
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let mut body: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > MAX_EXPORT_BYTES {
            return Err(FetchError::TooLarge(MAX_EXPORT_BYTES));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(reader.read_bytes(&body)?)
}
