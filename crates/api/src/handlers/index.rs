//! Landing page listing the available endpoints.

use axum::response::Html;

const INDEX_HTML: &str = r#"<!doctype html>
<html>
  <head>
    <title>Overlay API</title>
    <style>
      body { font-family: sans-serif; text-align: center; margin-top: 40px; }
      ul { list-style-type: none; padding: 0; }
      li { margin: 10px 0; }
    </style>
  </head>
  <body>
    <h1>Overlay API is running</h1>
    <p>Available endpoints:</p>
    <ul>
      <li><a href="/api/health">/api/health</a></li>
      <li><a href="/api/overlays">/api/overlays</a></li>
      <li><a href="/streams/index.m3u8">/streams/index.m3u8</a></li>
      <li><a href="/debug/streams">/debug/streams</a></li>
    </ul>
  </body>
</html>
"#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
