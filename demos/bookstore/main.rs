//! Bookstore example serving a paginated HAL collection
//!
//! ```text
//! cargo run --example bookstore
//! curl 'http://127.0.0.1:3000/books?page=2'
//! ```

use axum::{
    Router,
    extract::{Query, State},
    http::Uri,
    routing::get,
};
use this_hal::prelude::*;
use tracing_subscriber::EnvFilter;

const ITEMS_PER_PAGE: usize = 2;

#[derive(Debug, Clone, Serialize)]
struct Book {
    id: u32,
    title: String,
    author: String,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<usize>,
}

#[derive(Clone)]
struct AppState {
    normalizer: Arc<CollectionNormalizer>,
    books: Arc<Vec<Book>>,
}

async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    uri: Uri,
) -> std::result::Result<HalJson<Value>, HalError> {
    let page = query.page.unwrap_or(1).max(1);
    let items: Vec<Book> = state
        .books
        .iter()
        .skip((page - 1) * ITEMS_PER_PAGE)
        .take(ITEMS_PER_PAGE)
        .cloned()
        .collect();

    let collection = ResourceCollection::paginated(
        items,
        page as f64,
        ITEMS_PER_PAGE as f64,
        state.books.len() as f64,
    );
    let context = SerializationContext::new("App::Entity::Book").with_request_uri(uri.to_string());

    let document = state.normalizer.normalize(&collection, FORMAT, &context)?;
    Ok(HalJson(document))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/bookstore/hal.yaml");
    let config = Arc::new(HalConfig::from_yaml_file(config_path)?);

    let normalizer = CollectionNormalizer::from_config(config)?.with_item_normalizer::<Book>(
        HalItemNormalizer::new(|book: &Book| format!("/books/{}", book.id)),
    );

    let books = [
        ("The Hobbit", "J. R. R. Tolkien"),
        ("Dune", "Frank Herbert"),
        ("Solaris", "Stanisław Lem"),
        ("Hyperion", "Dan Simmons"),
        ("Neuromancer", "William Gibson"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((title, author), id)| Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
    })
    .collect();

    let state = AppState {
        normalizer: Arc::new(normalizer),
        books: Arc::new(books),
    };

    let app = Router::new()
        .route("/books", get(list_books))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
