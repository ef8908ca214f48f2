//! End-to-end tests for HAL collection normalization

use serde_json::json;
use this_hal::prelude::*;

#[derive(Debug, Clone, Serialize)]
struct Book {
    id: u32,
    title: String,
}

const BOOKSTORE: &str = r#"
resources:
  - class: App::Entity::Book
    subresources:
      - property: reviews
        resource_class: App::Entity::BookReview
        collection: true
  - class: App::Entity::BookReview
    item_operations:
      - name: get
"#;

fn normalizer() -> CollectionNormalizer {
    let config = HalConfig::from_yaml_str(BOOKSTORE).unwrap();
    CollectionNormalizer::from_config(Arc::new(config))
        .unwrap()
        .with_item_normalizer::<Book>(HalItemNormalizer::new(|book: &Book| {
            format!("/books/{}", book.id)
        }))
}

fn books(ids: &[u32]) -> Vec<Book> {
    ids.iter()
        .map(|&id| Book {
            id,
            title: format!("Book {}", id),
        })
        .collect()
}

fn book_context(request_uri: &str) -> SerializationContext {
    SerializationContext::new("App::Entity::Book").with_request_uri(request_uri)
}

#[test]
fn test_middle_page_of_paginated_collection() {
    let collection = ResourceCollection::paginated(books(&[3, 4]), 2., 2., 5.);

    let document = normalizer()
        .normalize(&collection, FORMAT, &book_context("/books?page=2"))
        .unwrap();

    assert_eq!(
        document,
        json!({
            "_links": {
                "self": {"href": "/books?page=2"},
                "first": {"href": "/books?page=1"},
                "last": {"href": "/books?page=3"},
                "prev": {"href": "/books?page=1"},
                "next": {"href": "/books?page=3"},
                "book": {"href": "/books/{id}", "templated": true},
                "book_review": {"href": "/books/{id}/reviews", "templated": true},
                "item": [{"href": "/books/3"}, {"href": "/books/4"}]
            },
            "_embedded": {"item": [
                {"_links": {"self": {"href": "/books/3"}}, "id": 3, "title": "Book 3"},
                {"_links": {"self": {"href": "/books/4"}}, "id": 4, "title": "Book 4"}
            ]},
            "totalItems": 5,
            "itemsPerPage": 2
        })
    );
}

#[test]
fn test_second_of_three_pages_with_three_items() {
    let collection = ResourceCollection::paginated(books(&[3, 4, 5]), 2., 2., 5.);

    let document = normalizer()
        .normalize(&collection, FORMAT, &book_context("/books?page=2"))
        .unwrap();

    let links = &document["_links"];
    assert_eq!(links["self"]["href"], "/books?page=2");
    assert_eq!(links["first"]["href"], "/books?page=1");
    assert_eq!(links["last"]["href"], "/books?page=3");
    assert_eq!(links["prev"]["href"], "/books?page=1");
    assert_eq!(links["next"]["href"], "/books?page=3");
    assert_eq!(
        links["item"],
        json!([{"href": "/books/3"}, {"href": "/books/4"}, {"href": "/books/5"}])
    );
    assert_eq!(document["_embedded"]["item"].as_array().unwrap().len(), 3);
    assert_eq!(document["totalItems"], 5);
    assert_eq!(document["itemsPerPage"], 2);
}

#[test]
fn test_links_are_ordered() {
    let collection = ResourceCollection::paginated(books(&[3, 4]), 2., 2., 5.);

    let document = normalizer()
        .normalize(&collection, FORMAT, &book_context("/books?page=2"))
        .unwrap();

    let relations: Vec<_> = document["_links"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(
        relations,
        vec!["self", "first", "last", "prev", "next", "book", "book_review", "item"]
    );

    let keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["_links", "_embedded", "totalItems", "itemsPerPage"]);
}

#[test]
fn test_three_item_collection_keeps_order() {
    let collection = ResourceCollection::paginated(books(&[9, 2, 5]), 2., 3., 6.);

    let document = normalizer()
        .normalize_document(&collection, FORMAT, &book_context("/books?page=2"))
        .unwrap();

    let embedded = document.embedded.unwrap();
    let ids: Vec<_> = embedded.item.iter().map(|i| i["id"].clone()).collect();
    assert_eq!(ids, vec![json!(9), json!(2), json!(5)]);

    assert_eq!(
        document.links["item"],
        LinkValue::Many(vec![
            Link::new("/books/9"),
            Link::new("/books/2"),
            Link::new("/books/5"),
        ])
    );
    assert!(!document.links.contains_key("next"));
}

#[test]
fn test_unpaginated_collection_only_self() {
    let collection = ResourceCollection::from_items(books(&[1, 2, 3]));

    let document = normalizer()
        .normalize_document(&collection, FORMAT, &book_context("/books?page=4&sort=title"))
        .unwrap();

    let relations: Vec<_> = document.links.keys().map(String::as_str).collect();
    assert_eq!(relations, vec!["self", "book", "book_review", "item"]);
    assert_eq!(
        document.links["self"],
        LinkValue::One(Link::new("/books?sort=title"))
    );
    assert_eq!(document.total_items, Some(3));
    assert_eq!(document.items_per_page, None);
}

#[test]
fn test_first_page_has_no_prev() {
    let collection = ResourceCollection::paginated(books(&[1, 2]), 1., 2., 5.);

    let document = normalizer()
        .normalize_document(&collection, FORMAT, &book_context("/books"))
        .unwrap();

    assert!(document.links.contains_key("first"));
    assert!(document.links.contains_key("last"));
    assert!(!document.links.contains_key("prev"));
    assert_eq!(
        document.links["next"],
        LinkValue::One(Link::new("/books?page=2"))
    );
}

#[test]
fn test_open_ended_pagination() {
    let full_page = ResourceCollection::partial(books(&[5, 6]), 3., 2.);
    let document = normalizer()
        .normalize_document(&full_page, FORMAT, &book_context("/books?page=3"))
        .unwrap();

    assert!(!document.links.contains_key("first"));
    assert!(!document.links.contains_key("last"));
    assert_eq!(
        document.links["next"],
        LinkValue::One(Link::new("/books?page=4"))
    );
    assert_eq!(document.total_items, None);
    assert_eq!(document.items_per_page, Some(2));

    let short_page = ResourceCollection::partial(books(&[7]), 4., 2.);
    let document = normalizer()
        .normalize_document(&short_page, FORMAT, &book_context("/books?page=4"))
        .unwrap();

    assert!(!document.links.contains_key("next"));
    assert_eq!(
        document.links["prev"],
        LinkValue::One(Link::new("/books?page=3"))
    );
}

#[test]
fn test_request_uri_defaults_to_root() {
    let collection = ResourceCollection::paginated(books(&[1]), 1., 1., 2.);

    let document = normalizer()
        .normalize_document(
            &collection,
            FORMAT,
            &SerializationContext::new("App::Entity::Book"),
        )
        .unwrap();

    assert_eq!(document.links["self"], LinkValue::One(Link::new("/?page=1")));
    assert_eq!(document.links["last"], LinkValue::One(Link::new("/?page=2")));
}

#[test]
fn test_context_map_from_http_layer() {
    let context: SerializationContext = serde_json::from_value(json!({
        "request_uri": "/books?page=3",
        "resource_class": "App::Entity::Book"
    }))
    .unwrap();
    let collection = ResourceCollection::paginated(books(&[5]), 3., 2., 5.);

    let document = normalizer()
        .normalize_document(&collection, FORMAT, &context)
        .unwrap();

    assert!(!document.links.contains_key("next"));
    assert_eq!(document.links["prev"], LinkValue::One(Link::new("/books?page=2")));
}

#[test]
fn test_subresource_collection_context() {
    let review_normalizer = |id: &u32, _: &str, _: &SerializationContext| -> Result<Value> {
        Ok(json!({"_links": {"self": {"href": format!("/book_reviews/{}", id)}}, "id": id}))
    };
    let normalizer = normalizer().with_item_normalizer::<u32>(review_normalizer);

    let document = normalizer
        .normalize_document(
            &ResourceCollection::from_items(vec![1u32]),
            FORMAT,
            &SerializationContext::new("App::Entity::BookReview")
                .with_request_uri("/books/1/reviews"),
        )
        .unwrap();

    let relations: Vec<_> = document.links.keys().map(String::as_str).collect();
    assert_eq!(relations, vec!["self", "book_review", "item"]);
    assert_eq!(
        document.links["book_review"],
        LinkValue::One(Link::templated("/book_reviews/{id}"))
    );
}

#[test]
fn test_failing_item_aborts_collection() {
    let normalizer = normalizer().with_item_normalizer::<u32>(
        |id: &u32, _: &str, _: &SerializationContext| -> Result<Value> {
            anyhow::ensure!(*id != 2, "review {} is corrupted", id);
            Ok(json!({"_links": {"self": {"href": format!("/book_reviews/{}", id)}}}))
        },
    );

    let err = normalizer
        .normalize(
            &ResourceCollection::from_items(vec![1u32, 2, 3]),
            FORMAT,
            &SerializationContext::new("App::Entity::BookReview"),
        )
        .unwrap_err();

    assert_eq!(err.error_code(), "NORMALIZATION_FAILED");
    assert!(err.to_string().contains("review 2 is corrupted"));
}

#[test]
fn test_malformed_request_uri() {
    let err = normalizer()
        .normalize(
            &ResourceCollection::from_items(books(&[1])),
            FORMAT,
            &book_context("http://[::1/books"),
        )
        .unwrap_err();

    assert!(matches!(err, HalError::MalformedIri { .. }));
}
