//! Built front-end (`frontend/dist`) served as an SPA: unknown paths fall back to `index.html`.

use std::path::Path;

use axum::response::Html;
use tower_http::services::{ServeDir, ServeFile};

pub fn frontend_available(dist: &Path) -> bool {
    dist.join("index.html").is_file()
}

pub fn spa_service(dist: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")))
}

/// Placeholder page when no front-end build is present.
pub async fn console_page() -> Html<&'static str> {
    Html(CONSOLE_HTML)
}

const CONSOLE_HTML: &str = r#"<!doctype html>
<html lang="de">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>HeroRank API</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    button { margin: 4px 8px 4px 0; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>HeroRank API</h1>
  <p>No front-end build found. Build it into <code>frontend/dist</code> or use the endpoints directly.</p>
  <div class="card">
    <button data-path="/api/health">GET /api/health</button>
    <button data-path="/api/stats">GET /api/stats</button>
    <button data-path="/api/rankings?limit=10">GET /api/rankings</button>
    <button data-path="/api/battles">GET /api/battles</button>
  </div>
  <pre id="output">Ready.</pre>
  <script>
    const output = document.getElementById('output');
    document.querySelectorAll('button[data-path]').forEach(btn => {
      btn.addEventListener('click', async () => {
        output.textContent = 'Loading…';
        const response = await fetch(btn.dataset.path);
        output.textContent = 'HTTP ' + response.status + '\n' + await response.text();
      });
    });
  </script>
</body>
</html>
"#;
