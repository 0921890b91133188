//! Addresses, uploads and blog interactions.

#![allow(clippy::unwrap_used)]

use edumall_client::api::Page;
use edumall_client::{Upload, hooks};
use edumall_core::schema::blog::{CreateBlogComment, CreateBlogReact};
use edumall_core::schema::shipping::CreateShippingInfo;
use edumall_core::{BlogId, DeliveryInfoId};
use edumall_integration_tests::fixtures::HOME_ADDRESS;
use edumall_integration_tests::{MockBackend, routes};

#[tokio::test]
async fn test_address_mutations_refetch_list() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;
    assert_eq!(hooks::shipping::use_shipping_infos(&state).await.unwrap().data.len(), 1);

    let created = hooks::shipping::use_create_shipping_info(
        &state,
        &CreateShippingInfo {
            name: "Nguyễn Thị Lan".to_string(),
            phone: "+84901234567".to_string(),
            address: "1 Đinh Tiên Hoàng, TP.HCM".to_string(),
            tag: "Công ty".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.data.tag, "Công ty");
    assert_eq!(hooks::shipping::use_shipping_infos(&state).await.unwrap().data.len(), 2);

    hooks::shipping::use_delete_shipping_info(&state, &DeliveryInfoId::new(HOME_ADDRESS))
        .await
        .unwrap();
    let addresses = hooks::shipping::use_shipping_infos(&state).await.unwrap();
    assert_eq!(addresses.data.len(), 1);
    assert_eq!(addresses.data[0].id, created.data.id);
    assert_eq!(backend.hits(routes::SHIPPING_INFOS), 3);
}

#[tokio::test]
async fn test_upload_image_and_file() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;

    let image = hooks::upload::use_upload_image(
        &state,
        Upload {
            file_name: "avatar.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        },
    )
    .await
    .unwrap();
    assert_eq!(image.data.url, "https://cdn.edumall.vn/image/avatar.png");

    let file = hooks::upload::use_upload_file(
        &state,
        Upload {
            file_name: "bai-tap.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.7".to_vec(),
        },
    )
    .await
    .unwrap();
    assert!(file.data.key.starts_with("file/"));
    assert_eq!(backend.hits(routes::UPLOAD_FILE), 1);
}

#[tokio::test]
async fn test_comment_refetches_comment_pages() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;
    let blog = BlogId::new("b1");

    let before = hooks::blog::use_blog_comments(&state, &blog, Page::default())
        .await
        .unwrap();
    assert_eq!(before.data.len(), 1);

    hooks::blog::use_create_blog_comment(
        &state,
        &CreateBlogComment {
            blog_id: blog.clone(),
            content: "Cảm ơn tác giả".to_string(),
        },
    )
    .await
    .unwrap();

    let after = hooks::blog::use_blog_comments(&state, &blog, Page::default())
        .await
        .unwrap();
    assert_eq!(after.data.len(), 2);
    assert_eq!(after.data[0].content, "Cảm ơn tác giả");
    assert_eq!(backend.hits(routes::BLOG_COMMENTS), 2);
}

#[tokio::test]
async fn test_reaction_refetches_post_and_lists() {
    let backend = MockBackend::start().await;
    let state = backend.signed_in().await;
    let blog = BlogId::new("b1");

    let detail = hooks::blog::use_blog(&state, &blog).await.unwrap();
    assert!(!detail.data.is_reacted);
    hooks::blog::use_blogs(&state, None, Page::default()).await.unwrap();

    let reaction = hooks::blog::use_react_blog(&state, &CreateBlogReact { blog_id: blog.clone() })
        .await
        .unwrap();
    assert!(reaction.data.is_reacted);
    assert_eq!(reaction.data.react_count, 4);

    let detail = hooks::blog::use_blog(&state, &blog).await.unwrap();
    assert!(detail.data.is_reacted);
    assert_eq!(detail.data.blog.react_count, 4);
    hooks::blog::use_blogs(&state, None, Page::default()).await.unwrap();

    assert_eq!(backend.hits(routes::BLOG), 2);
    assert_eq!(backend.hits(routes::BLOGS), 2);
}
