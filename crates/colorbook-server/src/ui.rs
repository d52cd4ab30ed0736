use axum::response::Html;

/// Browser composer page
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
