//! Streams archive files to disk, one request at a time.

use std::{
    fmt,
    fs::{self, File},
    io::Write,
    path::Path,
    time::Duration,
};

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::{Client, StatusCode};
use tracing::{error, info, warn};

use crate::archive::DownloadJob;
use crate::error::{FetchError, FetchErrorKind};

/// Builds the client for a batch. `timeout` bounds connecting and each wait
/// for body data, not the whole transfer. `None` means no timeout.
pub fn make_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.connect_timeout(timeout).read_timeout(timeout);
    }
    builder.build()
}

/// Creates `path` and its parents if missing. Returns true when something was created.
pub fn ensure_dir(path: &Path) -> std::io::Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path)?;
    info!("Created directory: {}", path.display());

    Ok(true)
}

/// Downloads `url` to `file_path`, overwriting it, and returns the number of bytes written.
///
/// Nothing is written unless the server answers with a success status. A failure
/// part way through the body leaves the truncated file in place.
pub async fn fetch_to_file(client: &Client, url: &str, file_path: &Path) -> Result<u64, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound {
            url: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let io_error = |source| FetchError::Io {
        path: file_path.to_path_buf(),
        source,
    };

    let mut file = File::create(file_path).map_err(io_error)?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| FetchError::from_reqwest(url, e))?;
        file.write_all(&chunk).map_err(io_error)?;
        written += chunk.len() as u64;
    }
    file.flush().map_err(io_error)?;

    Ok(written)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// Outcome counts for a batch of downloads.
pub struct BatchReport {
    pub downloaded: usize,
    pub not_found: usize,
    pub failed: usize,
    pub bytes: u64,
}

impl BatchReport {
    pub fn record(&mut self, result: &Result<u64, FetchError>) {
        match result {
            Ok(bytes) => {
                self.downloaded += 1;
                self.bytes += bytes;
            }
            Err(e) if e.kind() == FetchErrorKind::NotFound => self.not_found += 1,
            Err(_) => self.failed += 1,
        }
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.downloaded += other.downloaded;
        self.not_found += other.not_found;
        self.failed += other.failed;
        self.bytes += other.bytes;
    }

    pub fn total(&self) -> usize {
        self.downloaded + self.not_found + self.failed
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} downloaded, {} not found, {} failed ({} bytes)",
            self.total(),
            self.downloaded,
            self.not_found,
            self.failed,
            self.bytes
        )
    }
}

/// Fetches each job in order. Failures are logged and skipped.
pub async fn fetch_all(client: &Client, jobs: &[DownloadJob], progress_bar: &ProgressBar) -> BatchReport {
    let mut report = BatchReport::default();

    for job in jobs {
        info!("Attempting to download: {}", job.url);
        let result = fetch_to_file(client, &job.url, &job.path).await;
        log_outcome(job, &result);
        report.record(&result);
        progress_bar.inc(1);
    }

    report
}

fn log_outcome(job: &DownloadJob, result: &Result<u64, FetchError>) {
    match result {
        Ok(bytes) => info!("Successfully downloaded: {} ({} bytes)", job.path.display(), bytes),
        Err(e) => match e.kind() {
            FetchErrorKind::NotFound => warn!("File not found (404): {}. Skipping.", job.url),
            FetchErrorKind::HttpError { status } => error!(status, "{}", e),
            FetchErrorKind::TransportError => error!("{}: {}", e, error_source(e)),
            FetchErrorKind::Unknown => {
                error!("An unexpected error occurred for {}: {}: {}", job.url, e, error_source(e))
            }
        },
    }
}

fn error_source(e: &FetchError) -> String {
    std::error::Error::source(e)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{closed_port_url, serve, serve_trickle};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn job(base: &str, name: &str, dir: &Path) -> DownloadJob {
        DownloadJob {
            url: format!("{}/{}", base, name),
            path: dir.join(name),
        }
    }

    #[tokio::test]
    async fn should_write_body_to_file() {
        let server = serve(vec![("/a.csv", 200, b"date,tavg\n2020-01-01,30.5\n".to_vec())]).await;
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.csv");
        let client = make_client(Some(Duration::from_secs(5))).unwrap();

        let written = fetch_to_file(&client, &server.url("/a.csv"), &path).await.unwrap();

        assert_eq!(written, 26);
        assert_eq!(fs::read_to_string(&path).unwrap(), "date,tavg\n2020-01-01,30.5\n");
    }

    #[tokio::test]
    async fn should_overwrite_existing_file() {
        let server = serve(vec![("/a.csv", 200, b"new".to_vec())]).await;
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.csv");
        fs::write(&path, "old content that is longer").unwrap();
        let client = make_client(None).unwrap();

        fetch_to_file(&client, &server.url("/a.csv"), &path).await.unwrap();
        fetch_to_file(&client, &server.url("/a.csv"), &path).await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn should_finish_slow_download_that_keeps_sending() {
        let server = serve_trickle("/slow.nc", b"abcd".to_vec(), Duration::from_millis(300)).await;
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slow.nc");
        let client = make_client(Some(Duration::from_millis(800))).unwrap();

        let written = fetch_to_file(&client, &server.url("/slow.nc"), &path).await.unwrap();

        assert_eq!(written, 4);
        assert_eq!(fs::read(&path).unwrap(), b"abcd".to_vec());
    }

    #[tokio::test]
    async fn should_time_out_stalled_download() {
        let server = serve_trickle("/stalled.nc", b"ab".to_vec(), Duration::from_millis(1500)).await;
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stalled.nc");
        let client = make_client(Some(Duration::from_millis(300))).unwrap();

        let err = fetch_to_file(&client, &server.url("/stalled.nc"), &path)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::TransportError);
    }

    #[tokio::test]
    async fn should_classify_not_found() {
        let server = serve(vec![]).await;
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.csv");
        let client = make_client(None).unwrap();

        let err = fetch_to_file(&client, &server.url("/missing.csv"), &path)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn should_classify_server_error() {
        let server = serve(vec![("/a.csv", 503, Vec::new())]).await;
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.csv");
        let client = make_client(None).unwrap();

        let err = fetch_to_file(&client, &server.url("/a.csv"), &path)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::HttpError { status: 503 });
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn should_classify_refused_connection() {
        let url = closed_port_url("/a.csv").await;
        let temp_dir = TempDir::new().unwrap();
        let client = make_client(Some(Duration::from_secs(5))).unwrap();

        let err = fetch_to_file(&client, &url, &temp_dir.path().join("a.csv"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::TransportError);
    }

    #[tokio::test]
    async fn should_classify_unwritable_path() {
        let server = serve(vec![("/a.csv", 200, b"x".to_vec())]).await;
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no-such-dir").join("a.csv");
        let client = make_client(None).unwrap();

        let err = fetch_to_file(&client, &server.url("/a.csv"), &path)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::Unknown);
    }

    #[tokio::test]
    async fn should_continue_after_not_found() {
        let server = serve(vec![
            ("/1.csv", 200, b"one".to_vec()),
            ("/3.csv", 200, b"three".to_vec()),
            ("/4.csv", 500, Vec::new()),
        ])
        .await;
        let temp_dir = TempDir::new().unwrap();
        let base = server.url("");
        let jobs: Vec<DownloadJob> = ["1.csv", "2.csv", "3.csv", "4.csv"]
            .iter()
            .map(|name| job(&base, name, temp_dir.path()))
            .collect();
        let client = make_client(None).unwrap();

        let report = fetch_all(&client, &jobs, &ProgressBar::hidden()).await;

        assert_eq!(
            report,
            BatchReport {
                downloaded: 2,
                not_found: 1,
                failed: 1,
                bytes: 8,
            }
        );
        assert!(temp_dir.path().join("3.csv").exists());
        assert!(!temp_dir.path().join("2.csv").exists());
    }

    #[test]
    fn should_create_directory_once() {
        let temp_dir = TempDir::new().unwrap();
        let path: PathBuf = temp_dir.path().join("a").join("b");

        assert!(ensure_dir(&path).unwrap());
        assert!(!ensure_dir(&path).unwrap());
        assert!(path.is_dir());
    }

    #[test]
    fn should_merge_reports() {
        let mut report = BatchReport {
            downloaded: 1,
            not_found: 2,
            failed: 0,
            bytes: 10,
        };
        report.merge(BatchReport {
            downloaded: 3,
            not_found: 0,
            failed: 1,
            bytes: 5,
        });

        assert_eq!(report.total(), 7);
        assert_eq!(
            report.to_string(),
            "7 files: 4 downloaded, 2 not found, 1 failed (15 bytes)"
        );
    }
}
