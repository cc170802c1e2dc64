//! Mock API responses and image payloads

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Encode a small test image in `format`
pub fn image_bytes(format: ImageFormat, with_alpha: bool) -> Vec<u8> {
    let alpha = if with_alpha { 96 } else { 255 };
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(6, 4, Rgba([240, 80, 10, alpha])));
    let img = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("failed to encode fixture");
    out.into_inner()
}

/// Search response body listing `urls`
pub fn search_body(urls: &[String], total: u64) -> serde_json::Value {
    let value: Vec<_> = urls
        .iter()
        .map(|u| serde_json::json!({ "contentUrl": u, "name": "fixture" }))
        .collect();
    serde_json::json!({
        "_type": "Images",
        "totalEstimatedMatches": total,
        "value": value
    })
}

/// Serve `urls` as consecutive pages of `page_size`, the first without an offset
pub async fn mount_search_pages(server: &MockServer, urls: &[String], page_size: usize, total: u64) {
    for (page, chunk) in urls.chunks(page_size.max(1)).enumerate() {
        let mock = Mock::given(method("GET")).and(path("/v7.0/images/search"));
        let mock = if page == 0 {
            mock.and(query_param_is_missing("offset"))
        } else {
            mock.and(query_param("offset", (page * page_size).to_string()))
        };
        mock.respond_with(ResponseTemplate::new(200).set_body_json(search_body(chunk, total)))
            .mount(server)
            .await;
    }
}

/// Serve `bytes` at `route`
pub async fn mount_bytes(server: &MockServer, route: &str, bytes: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(route.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
        .mount(server)
        .await;
}

/// Sorted file names in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("failed to read dir")
        .map(|entry| {
            entry
                .expect("failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
