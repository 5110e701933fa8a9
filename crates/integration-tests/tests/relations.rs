//! Integration tests for products, posts, comments and orders.
//!
//! Covers validation on the non-user models and population of references.

#![allow(clippy::unwrap_used)]

use doc_records_core::models::{NewComment, NewOrder, NewPost, NewProduct};
use doc_records_core::{FieldError, PostId, ProductId, RecordId, UserId};
use doc_records_integration_tests::{new_post, new_product, new_user};
use doc_records_store::{
    CommentRepository, MemoryStore, OrderRepository, PostRepository, ProductRepository,
    RepositoryError, UserRepository,
};
use rust_decimal::Decimal;

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_product_negative_price_rejected() {
    let store = MemoryStore::new();
    let products = ProductRepository::new(&store);

    let err = products
        .insert(NewProduct {
            price: Some(Decimal::new(-1, 2)),
            ..new_product("Hammer", 0)
        })
        .await
        .unwrap_err();

    let RepositoryError::Validation(validation) = err else {
        panic!("expected validation error, got {err}");
    };
    assert!(validation.has_path("price"));
    assert!(matches!(validation.errors.first(), Some(FieldError::Min { .. })));
    assert_eq!(store.count("products").await, 0);
}

#[tokio::test]
async fn test_product_zero_price_accepted() {
    let store = MemoryStore::new();
    let products = ProductRepository::new(&store);

    let product = products.insert(new_product("Sticker", 0)).await.unwrap();
    assert_eq!(product.price.amount(), Decimal::ZERO);
}

#[tokio::test]
async fn test_product_missing_fields_reported_together() {
    let store = MemoryStore::new();
    let products = ProductRepository::new(&store);

    let err = products.insert(NewProduct::default()).await.unwrap_err();
    let RepositoryError::Validation(validation) = err else {
        panic!("expected validation error, got {err}");
    };
    assert!(validation.has_path("name"));
    assert!(validation.has_path("category"));
    assert!(validation.has_path("price"));
}

#[tokio::test]
async fn test_product_price_round_trips_through_store() {
    let store = MemoryStore::new();
    let products = ProductRepository::new(&store);

    let product = products.insert(new_product("Hammer", 1999)).await.unwrap();
    let stored = products.find_by_id(product.id).await.unwrap().unwrap();
    assert_eq!(stored.price.to_string(), "19.99");
}

// =============================================================================
// Posts and comments
// =============================================================================

#[tokio::test]
async fn test_post_populates_author() {
    let store = MemoryStore::new();
    let users = UserRepository::new(&store);
    let posts = PostRepository::new(&store);

    let author = users.insert(new_user("writer")).await.unwrap();
    let post = posts
        .insert(NewPost {
            author: Some(author.id),
            ..new_post("Hello")
        })
        .await
        .unwrap();

    let populated = posts.find_with_author(post.id).await.unwrap().unwrap();
    assert_eq!(populated.post, post);
    assert_eq!(populated.author, Some(author));
}

#[tokio::test]
async fn test_post_dangling_author_is_none() {
    let store = MemoryStore::new();
    let posts = PostRepository::new(&store);

    let post = posts
        .insert(NewPost {
            author: Some(UserId::generate()),
            ..new_post("Orphan")
        })
        .await
        .unwrap();

    let populated = posts.find_with_author(post.id).await.unwrap().unwrap();
    assert!(populated.author.is_none());
}

#[tokio::test]
async fn test_post_requires_title_and_content() {
    let store = MemoryStore::new();
    let posts = PostRepository::new(&store);

    let err = posts.insert(NewPost::default()).await.unwrap_err();
    assert!(err.is_validation());
    assert!(posts.find_with_author(PostId::generate()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_comment_populates_post() {
    let store = MemoryStore::new();
    let posts = PostRepository::new(&store);
    let comments = CommentRepository::new(&store);

    let post = posts.insert(new_post("Hello")).await.unwrap();
    let comment = comments
        .insert(NewComment {
            content: "Nice post".to_owned(),
            post: Some(post.id),
        })
        .await
        .unwrap();

    let populated = comments.find_with_post(comment.id).await.unwrap().unwrap();
    assert_eq!(populated.post, Some(post));

    let err = comments
        .insert(NewComment::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Path `content` is required."));
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_order_populates_products_in_order() {
    let store = MemoryStore::new();
    let products = ProductRepository::new(&store);
    let orders = OrderRepository::new(&store);

    let hammer = products.insert(new_product("Hammer", 1999)).await.unwrap();
    let nails = products.insert(new_product("Nails", 499)).await.unwrap();

    let order = orders
        .insert(NewOrder {
            products: vec![nails.id, hammer.id, nails.id],
            total: Some(Decimal::new(2997, 2)),
        })
        .await
        .unwrap();

    let populated = orders.find_with_products(order.id).await.unwrap().unwrap();
    assert_eq!(populated.products, vec![nails.clone(), hammer, nails]);
}

#[tokio::test]
async fn test_order_skips_missing_products() {
    let store = MemoryStore::new();
    let products = ProductRepository::new(&store);
    let orders = OrderRepository::new(&store);

    let hammer = products.insert(new_product("Hammer", 1999)).await.unwrap();
    let order = orders
        .insert(NewOrder {
            products: vec![hammer.id, ProductId::generate()],
            total: Some(Decimal::new(1999, 2)),
        })
        .await
        .unwrap();

    let populated = orders.find_with_products(order.id).await.unwrap().unwrap();
    assert_eq!(populated.order.products.len(), 2);
    assert_eq!(populated.products, vec![hammer]);
}

#[tokio::test]
async fn test_order_total_required_but_unbounded() {
    let store = MemoryStore::new();
    let orders = OrderRepository::new(&store);

    let err = orders.insert(NewOrder::default()).await.unwrap_err();
    let RepositoryError::Validation(validation) = err else {
        panic!("expected validation error, got {err}");
    };
    assert_eq!(validation.errors, vec![FieldError::Required { path: "total" }]);

    let refund = orders
        .insert(NewOrder {
            products: Vec::new(),
            total: Some(Decimal::new(-5, 0)),
        })
        .await
        .unwrap();
    let stored = orders.find_by_id(refund.id).await.unwrap().unwrap();
    assert_eq!(stored.total, Decimal::new(-5, 0));

    let empty = orders
        .insert(NewOrder {
            products: Vec::new(),
            total: Some(Decimal::ZERO),
        })
        .await
        .unwrap();
    let populated = orders.find_with_products(empty.id).await.unwrap().unwrap();
    assert!(populated.products.is_empty());
}
