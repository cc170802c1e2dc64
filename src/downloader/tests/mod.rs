use super::test_helpers::*;
use crate::error::SkipReason;
use crate::types::{FetchOutcome, ImageType};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};


/// Serve `png_bytes()` at `route`
async fn mount_image(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(png_bytes()),
        )
        .mount(server)
        .await;
}

/// Image URLs `/img/{stem}{i}.jpg` for `range` on `server`
fn image_urls(server: &MockServer, stem: &str, range: std::ops::Range<usize>) -> Vec<String> {
    range
        .map(|i| format!("{}/img/{stem}{i}.jpg", server.uri()))
        .collect()
}
