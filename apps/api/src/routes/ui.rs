use axum::response::Html;

/// GET /
/// Serves the single-page upload UI. The page is pure presentation: it posts
/// the file to /api/extract and the text to /api/analyze, and keeps the
/// feedback-reveal toggle as local page state.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
