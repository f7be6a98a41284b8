//! Download of a word list over HTTP

use crate::{
    progress::{ProgressReport, Work},
    Result,
};
use anyhow::Context;
use async_compression::tokio::bufread::GzipDecoder;
use futures::stream::StreamExt;
use reqwest::Response;
use std::{
    io::{self, ErrorKind},
    path::Path,
};
use tokio::{
    fs::File,
    io::AsyncWriteExt,
};
use tokio_util::io::StreamReader;

/// Download the word list at `url` into the file at `dest`
///
/// Word lists whose URL ends in `.gz` are decompressed on the fly. Returns the
/// number of bytes that were written to `dest`.
pub async fn download(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    report: &ProgressReport,
) -> Result<u64> {
    // Start the download
    let context = || format!("initiating download of {url}");
    let response = client
        .get(url)
        .send()
        .await
        .and_then(Response::error_for_status)
        .with_context(context)?;
    log::debug!(
        "Downloading {url} ({} bytes announced)",
        response
            .content_length()
            .map_or_else(|| "unknown".to_string(), |len| len.to_string())
    );
    let bytes = report.add("Downloading word list", Work::Bytes(response.content_length()));

    // Turn the body into an async reader
    let tracker = bytes.clone();
    let mut body = StreamReader::new(Box::pin(response.bytes_stream().map(move |res| {
        res
            // Track how many input bytes have been downloaded so far
            .inspect(|bytes_block| tracker.make_progress(bytes_block.len() as u64))
            // Translate reqwest errors into I/O errors
            .map_err(|e| io::Error::new(ErrorKind::Other, Box::new(e)))
    })));

    // Write the (possibly decompressed) body to disk
    let mut file = File::create(dest)
        .await
        .with_context(|| format!("creating {}", dest.display()))?;
    let context = || format!("fetching {url} into {}", dest.display());
    let written = if is_gzipped(url) {
        let mut words = GzipDecoder::new(body);
        tokio::io::copy(&mut words, &mut file).await
    } else {
        tokio::io::copy(&mut body, &mut file).await
    }
    .with_context(context)?;
    file.flush().await.with_context(context)?;
    file.sync_all().await.with_context(context)?;
    bytes.finish();
    log::info!("Downloaded {url} into {} ({written} bytes)", dest.display());
    Ok(written)
}

/// Truth that the resource at `url` is a gzip-compressed file
fn is_gzipped(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.ends_with(".gz")
}

/// Serve a single canned HTTP response on localhost, for tests
///
/// Returns the base URL of the server, e.g. `http://127.0.0.1:12345`.
#[cfg(test)]
pub(crate) async fn serve_once(status: &str, body: Vec<u8>) -> String {
    use tokio::{io::AsyncReadExt, net::TcpListener};
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let header = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let len = socket.read(&mut buf).await.unwrap();
            if len == 0 {
                break;
            }
            request.extend_from_slice(&buf[..len]);
        }
        socket.write_all(header.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{address}")
}
