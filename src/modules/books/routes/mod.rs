//! HTTP handlers for the Books module.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use books_http::error::{AppError, ErrorBody};
use utoipa::OpenApi;

use super::models::{Book, BookList};
use super::service::{BookDataService, ServiceError};

const LISTS_FAILURE: &str = "Failed to retrieve books list";
const LIST_CODE_FAILURE: &str = "Failed to retrieve book by list code";

/// OpenAPI document for the Books routes
#[derive(OpenApi)]
#[openapi(
    paths(list_book_lists, books_by_list_code),
    components(schemas(BookList, Book)),
    tags((name = "Books", description = "Operations related to books"))
)]
pub struct BooksApi;

/// Routes relative to the module mount point
pub fn router(service: Arc<BookDataService>) -> Router {
    Router::new()
        .route("/", get(list_book_lists))
        .route("/{listCode}", get(books_by_list_code))
        .with_state(service)
}

/// Get a list of available book lists from NY Times.
#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    responses(
        (status = 200, description = "A list of book lists.", body = Vec<BookList>),
        (status = 500, description = "Upstream failure.", body = ErrorBody,
            example = json!({"error": "Failed to retrieve books list"}))
    )
)]
async fn list_book_lists(
    State(service): State<Arc<BookDataService>>,
) -> Result<Json<Vec<BookList>>, AppError> {
    let lists = service
        .get_book_lists()
        .await
        .map_err(upstream_failure(LISTS_FAILURE))?;

    Ok(Json(lists))
}

/// Get books from Google Books based on the provided NY Times list code.
///
/// The list code is used as a free-text search term, so an unknown code
/// returns unrelated matches or an empty array rather than 404.
#[utoipa::path(
    get,
    path = "/books/{listCode}",
    tag = "Books",
    params(("listCode" = String, Path, description = "NY Times list code.")),
    responses(
        (status = 200, description = "A list of books.", body = Vec<Book>),
        (status = 500, description = "Upstream failure.", body = ErrorBody,
            example = json!({"error": "Failed to retrieve book by list code"}))
    )
)]
async fn books_by_list_code(
    State(service): State<Arc<BookDataService>>,
    Path(list_code): Path<String>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = service
        .get_books_by_list_code(&list_code)
        .await
        .map_err(upstream_failure(LIST_CODE_FAILURE))?;

    Ok(Json(books))
}

fn upstream_failure(message: &'static str) -> impl FnOnce(ServiceError) -> AppError {
    move |err| {
        tracing::warn!(provider = %err.upstream().provider(), "upstream provider call failed");
        AppError::internal(message, err)
    }
}
