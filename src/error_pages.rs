//! The pages shown when a request cannot be served.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The fallback handler for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Something's missing.",
            "Sorry, we can't find that page.",
        ),
    )
        .into_response()
}

/// A 500 page with a short description of what went wrong and how to fix it.
///
/// The default is a generic message for errors whose details should stay in
/// the server logs.
pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_view("Internal Server Error", "500", self.description, self.fix),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        error_pages::{InternalServerError, get_404_not_found},
        test_utils::{assert_valid_html, parse_html_document},
    };

    #[tokio::test]
    async fn not_found_page() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let header = Selector::parse("h1").unwrap();
        let header = html.select(&header).next().unwrap();
        assert_eq!(header.text().collect::<String>().trim(), "404");
    }

    #[tokio::test]
    async fn internal_server_error_shows_fix() {
        let response = InternalServerError {
            description: "Broken",
            fix: "Restart the server",
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        let paragraphs: Vec<String> = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(paragraphs, ["Broken", "Restart the server"]);
    }
}
