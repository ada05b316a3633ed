//! Chunked download of work order PDFs over HTTP

use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;

use crate::error::{Error, Result};

/// REST route serving the chunked work order PDF.
pub const WORKORDERS_ROUTE: &str = "wp-json/traxs/v1/workorders";

/// Response header carrying the total number of chunks.
///
/// Only the first response is consulted. A missing or unparsable value
/// defaults to 1, which silently truncates multi-chunk output if the
/// server misbehaves.
pub const CHUNK_TOTAL_HEADER: &str = "X-Traxs-Chunk-Total";

/// Options for the chunked download
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Base site URL, without trailing slash
    pub base_url: String,
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password
    pub password: String,
    /// Value sent as the `chunk_size` query parameter
    pub chunk_size: u32,
}

/// Ordered temp files holding the fetched chunks.
///
/// The files live in the system temp directory and are removed either by
/// [`cleanup`](ChunkFiles::cleanup) after a successful merge, or by `Drop`
/// if an error unwinds past the guard.
#[derive(Debug)]
pub struct ChunkFiles {
    paths: Vec<PathBuf>,
}

impl ChunkFiles {
    fn new() -> Self {
        ChunkFiles { paths: Vec::new() }
    }

    /// Chunk file paths in ascending chunk order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of chunk files fetched
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no chunk files were fetched
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Delete every chunk file, reporting the first failure
    pub fn cleanup(mut self) -> Result<()> {
        for path in self.paths.drain(..) {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

impl Drop for ChunkFiles {
    fn drop(&mut self) {
        for path in &self.paths {
            let _ = fs::remove_file(path);
        }
    }
}

/// Download every chunk of the work order PDF into temp files
///
/// Issues sequential GET requests with `chunk` values `0..total`, where
/// `total` is read from the [`CHUNK_TOTAL_HEADER`] of the first response.
/// Each response body is streamed to its own temp file. Any transport or
/// HTTP-status error aborts immediately; there are no retries.
pub fn download_chunks(options: &FetchOptions) -> Result<ChunkFiles> {
    let client = Client::new();
    let url = format!("{}/{}", options.base_url, WORKORDERS_ROUTE);

    let mut chunks = ChunkFiles::new();
    let mut chunk: u32 = 0;
    let mut total: Option<u32> = None;

    loop {
        let response = client
            .get(&url)
            .query(&[("chunk", chunk), ("chunk_size", options.chunk_size)])
            .basic_auth(&options.username, Some(&options.password))
            .send()?;
        let mut response = response.error_for_status()?;

        // Only the first response's header counts; defaulting lives in
        // read_chunk_total.
        let total = *total.get_or_insert_with(|| read_chunk_total(&response));

        chunks.paths.push(write_chunk_file(&mut response, chunk)?);

        chunk += 1;
        if chunk >= total {
            break;
        }
    }

    Ok(chunks)
}

/// Read the total chunk count from a response, defaulting to 1
fn read_chunk_total(response: &reqwest::blocking::Response) -> u32 {
    response
        .headers()
        .get(CHUNK_TOTAL_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(1)
}

/// Stream a response body into a new uniquely-named temp file
fn write_chunk_file(
    response: &mut reqwest::blocking::Response,
    chunk: u32,
) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("traxs-workorders-")
        .suffix(&format!(".chunk{}.pdf", chunk))
        .tempfile()?;

    response.copy_to(file.as_file_mut())?;

    // Keep the file past the handle's lifetime; ChunkFiles owns removal.
    let (_file, path) = file.keep().map_err(|e| Error::Io(e.error))?;
    Ok(path)
}

/// Strip trailing slashes from a user-supplied base URL
pub fn normalize_base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}
