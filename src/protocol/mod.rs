use std::fs;
use std::path::Path;

use tauri::http::{header, HeaderValue, Request, Response, StatusCode};

use crate::scope_path;

pub mod listing;
pub mod mime;

pub const SCHEME: &str = "snapshot";
pub const HOST: &str = "local";

/// URL the report window is navigated to on startup.
pub fn initial_url(entry_file: &str) -> String {
    format!("{SCHEME}://{HOST}/{}", urlencoding::encode(entry_file))
}

pub fn handle(data_dir: &Path, request: &Request<Vec<u8>>) -> Response<Vec<u8>> {
    serve(data_dir, request.uri().path())
}

/// Resolves a percent-encoded request path against the data directory and
/// answers with the file bytes, a directory listing, or a 404. Reads the
/// filesystem on every call so the page always sees freshly edited CSVs.
pub fn serve(data_dir: &Path, uri_path: &str) -> Response<Vec<u8>> {
    let decoded = match urlencoding::decode(uri_path) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => return not_found(uri_path),
    };

    let Some(fs_path) = scope_path::resolve_under(data_dir, &decoded) else {
        log::debug!("request escapes data dir: {decoded}");
        return not_found(&decoded);
    };

    let Ok(metadata) = fs::metadata(&fs_path) else {
        log::debug!("not found: {decoded}");
        return not_found(&decoded);
    };

    if metadata.is_dir() {
        let display_path = if decoded.is_empty() { "/" } else { decoded.as_str() };
        match listing::render(&fs_path, display_path) {
            Ok(html) => listing_response(html),
            Err(err) => {
                log::warn!("failed to list {}: {err}", fs_path.display());
                not_found(&decoded)
            }
        }
    } else {
        match fs::read(&fs_path) {
            Ok(bytes) => file_response(bytes, mime::from_path(&fs_path)),
            Err(err) => {
                log::warn!("failed to read {}: {err}", fs_path.display());
                not_found(&decoded)
            }
        }
    }
}

fn file_response(bytes: Vec<u8>, content_type: &'static str) -> Response<Vec<u8>> {
    let mut response = Response::new(bytes);
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    // the page re-fetches CSVs after every save
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

fn listing_response(html: String) -> Response<Vec<u8>> {
    let mut response = Response::new(html.into_bytes());
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

pub fn not_found(request_path: &str) -> Response<Vec<u8>> {
    let mut response = Response::new(format!("Not found: {request_path}").into_bytes());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
