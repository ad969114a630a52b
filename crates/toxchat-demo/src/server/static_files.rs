use axum::{
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "static"]
struct WebAssets;

/// Serve the embedded chat page and its assets
pub async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Try exact path first
    if let Some(content) = <WebAssets as Embed>::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.into_owned(),
        )
            .into_response();
    }

    // Serve the chat page for any unmatched route
    if let Some(content) = <WebAssets as Embed>::get("index.html") {
        return Html(String::from_utf8_lossy(&content.data).to_string()).into_response();
    }

    Html(FALLBACK_HTML.to_string()).into_response()
}

const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>toxchat</title>
</head>
<body>
    <h1>toxchat</h1>
    <p>The embedded chat page is missing from this build. The API is still
    available under <code>/api</code>.</p>
</body>
</html>
"#;
