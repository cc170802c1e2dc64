//! Shared test helpers for creating ImageDownloader instances in tests.

use crate::config::Config;
use crate::downloader::ImageDownloader;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::MockServer;

/// Page size used by test downloaders (small so paging is cheap to exercise)
pub(crate) const TEST_BATCH_SIZE: usize = 5;

/// Test config pointing both APIs at `server` and both destinations into `temp_dir`
pub(crate) fn test_config(server: &MockServer, temp_dir: &tempfile::TempDir) -> Config {
    let mut config = Config::with_api_key("test-key");
    config.api.search_endpoint = format!("{}/images/search", server.uri());
    config.api.visual_search_endpoint = format!("{}/images/visualsearch", server.uri());
    config.api.batch_size = TEST_BATCH_SIZE;
    config.download.destination_dir = temp_dir.path().join("downloads");
    config.download.similar_destination_dir = temp_dir.path().join("similar");
    config.download.download_timeout = Duration::from_secs(1);
    config.download.count = 10;
    config
}

/// Helper to create a test ImageDownloader against `server`.
/// Returns the downloader and the tempdir (which must be kept alive).
pub(crate) fn create_test_downloader(
    server: &MockServer,
    customize: impl FnOnce(&mut Config),
) -> (ImageDownloader, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let mut config = test_config(server, &temp_dir);
    customize(&mut config);
    let downloader = ImageDownloader::new(config).unwrap();
    (downloader, temp_dir)
}

/// Small opaque PNG
pub(crate) fn png_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(3, 2, Rgba([20, 120, 220, 255]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// JSON search page listing `urls`
pub(crate) fn search_page(urls: &[String], total: u64) -> serde_json::Value {
    let value: Vec<_> = urls
        .iter()
        .map(|u| serde_json::json!({ "contentUrl": u }))
        .collect();
    serde_json::json!({ "totalEstimatedMatches": total, "value": value })
}

/// Sorted file names in `dir`
pub(crate) fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
