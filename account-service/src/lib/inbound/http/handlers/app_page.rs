use axum::response::Html;

/// Shell page for the search client. The client reads the identity from
/// `/api/session` itself, so nothing user-controlled is rendered here.
const APP_SHELL: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Movie Search</title>
  </head>
  <body>
    <div id="app"></div>
    <script src="/app.js"></script>
  </body>
</html>
"#;

pub async fn app_page() -> Html<&'static str> {
    Html(APP_SHELL)
}
