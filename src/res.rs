use axum::{debug_handler, response::IntoResponse};

use crate::Markdown;

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

#[debug_handler]
pub async fn landing() -> impl IntoResponse {
    Markdown(include_res!(str, "/pages/index.md"))
}

#[debug_handler]
pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use crate::render_markdown;

    #[test]
    fn landing_page_lists_events() {
        let html = render_markdown(include_res!(str, "/pages/index.md"));
        assert!(html.contains("<table>"));
        assert!(html.contains("join_private_chat"));
    }
}
