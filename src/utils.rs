//! Utility functions for deriving local filenames from image URLs

use crate::types::ImageType;

/// Maximum number of characters kept from the URL basename
const MAX_BASENAME_CHARS: usize = 30;

/// Characters that cut a URL extension short (query-string or fragment leakage)
const EXTENSION_TERMINATORS: [char; 4] = ['?', ':', '&', '!'];

/// Fallback basename for URLs without a usable path segment
const FALLBACK_BASENAME: &str = "image";

/// Derive a filesystem-safe base filename (with extension) from an image URL
///
/// The basename is the last non-empty path segment up to its first `.`, cut to
/// 30 characters. When the segment carries an extension it is reused, trimmed at
/// the first `?`, `:`, `&` or `!` and lower-cased; otherwise the category decides
/// (`.png` for transparent, `.gif` for animated GIFs, `.jpg` for everything else).
///
/// The result depends only on its inputs, so the same URL and category always
/// resolve to the same name. Callers prefix it with a positional index to keep
/// names unique within a query (see [`indexed_file_name`]).
///
/// # Examples
///
/// ```
/// use image_search_dl::utils::resolve_name;
/// use image_search_dl::ImageType;
///
/// assert_eq!(resolve_name("https://example.com/a/cat.JPG?w=200", ImageType::Photo), "cat.jpg");
/// assert_eq!(resolve_name("https://example.com/a/cat", ImageType::Transparent), "cat.png");
/// ```
pub fn resolve_name(url: &str, category: ImageType) -> String {
    let segment = last_path_segment(url);

    let base: String = segment
        .split('.')
        .next()
        .unwrap_or_default()
        .chars()
        .take(MAX_BASENAME_CHARS)
        .map(sanitize_char)
        .collect();
    let base = if base.is_empty() {
        FALLBACK_BASENAME.to_string()
    } else {
        base
    };

    let extension = match suffix(&segment) {
        Some(raw) => {
            let trimmed = raw
                .split(EXTENSION_TERMINATORS)
                .next()
                .unwrap_or_default()
                .to_lowercase();
            if trimmed.len() > 1 {
                trimmed.chars().map(sanitize_char).collect()
            } else {
                category.default_extension().to_string()
            }
        }
        None => category.default_extension().to_string(),
    };

    format!("{base}{extension}")
}

/// Filename for the image at `index` of a query: `{index}._{resolved name}`
pub fn indexed_file_name(index: usize, url: &str, category: ImageType) -> String {
    format!("{}._{}", index, resolve_name(url, category))
}

/// Last non-empty path segment of `url`, percent-decoded
///
/// Query string and fragment are excluded when the URL parses; unparseable input
/// falls back to splitting the raw string on `/`. A segment that does not decode to
/// UTF-8 is kept encoded.
fn last_path_segment(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url.trim()) {
        let segment = parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .unwrap_or_default();
        return urlencoding::decode(segment)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| segment.to_string());
    }

    url.trim()
        .split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .unwrap_or_default()
        .to_string()
}

/// Extension of a file name including the leading dot
///
/// Mirrors the usual path convention: a leading dot (hidden file) or a trailing
/// dot does not count as an extension.
fn suffix(name: &str) -> Option<&str> {
    let idx = name.rfind('.')?;
    if idx == 0 || idx + 1 == name.len() {
        return None;
    }
    Some(&name[idx..])
}

fn sanitize_char(c: char) -> char {
    match c {
        '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
        c if c.is_control() => '_',
        c => c,
    }
}
