//! Route handlers of the mock backend.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use edumall_core::schema::auth::{LoginRequest, LoginResult, RefreshCheck, RefreshTokenRequest, RegisterRequest, User};
use edumall_core::schema::blog::{
    Author, BlogComment, BlogDetail, BlogReaction, CreateBlogComment, CreateBlogReact,
};
use edumall_core::schema::cart::UpdateCartItemQuantity;
use edumall_core::schema::order::{CreateOrder, Order};
use edumall_core::schema::shipping::{CreateShippingInfo, ShippingAddress};
use edumall_core::schema::upload::UploadedFile;
use edumall_core::{
    CommentId, DataResponse, DeliveryInfoId, DeliveryMethod, Email, MessageResponse, OrderId,
    OrderStatus, PageResponse, Pagination, Role, UserId, Vnd,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::fixtures::{self, ACCESS_TOKEN, PASSWORD, REFRESH_TOKEN, REFRESHED_ACCESS_TOKEN, USERNAME};
use crate::{Mock, routes};

type Reply = Result<Response, Response>;

const NOW: &str = "2024-05-02T10:00:00Z";

fn ok<T: Serialize>(data: T) -> Response {
    Json(DataResponse {
        data,
        message: None,
    })
    .into_response()
}

fn message(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn not_found() -> Response {
    message(StatusCode::NOT_FOUND, "Không tìm thấy")
}

/// Record the request; reject it unless it carries an issued token.
fn authorize(mock: &Mock, route: &'static str, headers: &HeaderMap, query: Option<String>) -> Result<(), Response> {
    mock.record(route, headers, query);
    if mock.is_authorized(headers) {
        Ok(())
    } else {
        Err(message(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

fn params(raw: Option<&str>) -> HashMap<String, String> {
    url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes())
        .into_owned()
        .collect()
}

fn number(params: &HashMap<String, String>, key: &str, default: u32) -> u32 {
    params
        .get(key)
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

fn paginate<T: Clone>(items: &[T], params: &HashMap<String, String>) -> PageResponse<T> {
    let page_size = number(params, "page_size", 10);
    let page_index = number(params, "page_index", 1);
    let size = usize::try_from(page_size).unwrap_or(usize::MAX);
    let start = usize::try_from(page_index - 1).unwrap_or(usize::MAX).saturating_mul(size);

    PageResponse {
        data: items.iter().skip(start).take(size).cloned().collect(),
        pagination: Pagination {
            page_index,
            page_size,
            total_items: u64::try_from(items.len()).unwrap_or(u64::MAX),
            total_pages: u32::try_from(items.len().div_ceil(size)).unwrap_or(u32::MAX),
        },
    }
}

fn matches_keyword(title: &str, params: &HashMap<String, String>) -> bool {
    params
        .get("keyword")
        .is_none_or(|k| title.to_lowercase().contains(&k.to_lowercase()))
}

fn current_author() -> Author {
    let user = fixtures::user();
    Author {
        id: user.id,
        username: user.username,
        avatar: None,
    }
}

// =============================================================================
// Auth
// =============================================================================

pub(crate) async fn login(State(mock): State<Mock>, headers: HeaderMap, Json(body): Json<LoginRequest>) -> Reply {
    mock.record(routes::LOGIN, &headers, None);
    if body.username != USERNAME || body.password != PASSWORD {
        return Err(message(StatusCode::UNAUTHORIZED, "Sai tên đăng nhập hoặc mật khẩu"));
    }
    mock.issue_token(ACCESS_TOKEN);
    Ok(ok(LoginResult {
        user: fixtures::user(),
        token: fixtures::credentials(ACCESS_TOKEN),
    }))
}

pub(crate) async fn refresh_token(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<RefreshTokenRequest>,
) -> Reply {
    mock.record(routes::REFRESH_TOKEN, &headers, None);
    if body.refresh_token != REFRESH_TOKEN {
        return Err(message(StatusCode::UNAUTHORIZED, "Refresh token không hợp lệ"));
    }
    mock.issue_token(REFRESHED_ACCESS_TOKEN);
    Ok(ok(fixtures::credentials(REFRESHED_ACCESS_TOKEN)))
}

pub(crate) async fn check_refresh(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<RefreshTokenRequest>,
) -> Response {
    mock.record(routes::CHECK_REFRESH, &headers, None);
    ok(RefreshCheck {
        is_valid: body.refresh_token == REFRESH_TOKEN,
    })
}

pub(crate) async fn register(State(mock): State<Mock>, headers: HeaderMap, Json(body): Json<RegisterRequest>) -> Reply {
    mock.record(routes::REGISTER, &headers, None);
    if body.username == USERNAME {
        return Err(message(StatusCode::CONFLICT, "Tên đăng nhập đã tồn tại"));
    }
    let email = Email::parse(&body.email)
        .map_err(|e| message(StatusCode::BAD_REQUEST, &e.to_string()))?;
    Ok(ok(User {
        id: UserId::new(Uuid::new_v4().to_string()),
        username: body.username,
        email,
        role: Role::Customer,
    }))
}

// =============================================================================
// Blog
// =============================================================================

pub(crate) async fn blogs(State(mock): State<Mock>, headers: HeaderMap, RawQuery(query): RawQuery) -> Response {
    let params = params(query.as_deref());
    mock.record(routes::BLOGS, &headers, query);
    let data = mock.data().read().await;
    let found: Vec<_> = data
        .blogs
        .iter()
        .filter(|b| matches_keyword(&b.title, &params))
        .cloned()
        .collect();
    Json(paginate(&found, &params)).into_response()
}

pub(crate) async fn blog(State(mock): State<Mock>, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    authorize(&mock, routes::BLOG, &headers, None)?;
    let data = mock.data().read().await;
    let blog = data
        .blogs
        .iter()
        .find(|b| b.id.as_str() == id)
        .ok_or_else(not_found)?;
    Ok(ok(BlogDetail {
        blog: blog.clone(),
        content: format!("# {}\n\nNội dung bài viết.", blog.title),
        is_reacted: data.reacted.contains(&blog.id),
    }))
}

pub(crate) async fn blog_comments(
    State(mock): State<Mock>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    Path(id): Path<String>,
) -> Response {
    let params = params(query.as_deref());
    mock.record(routes::BLOG_COMMENTS, &headers, query);
    let data = mock.data().read().await;
    let found: Vec<_> = data
        .comments
        .iter()
        .filter(|c| c.blog_id.as_str() == id)
        .cloned()
        .collect();
    Json(paginate(&found, &params)).into_response()
}

pub(crate) async fn create_blog_comment(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<CreateBlogComment>,
) -> Reply {
    authorize(&mock, routes::CREATE_BLOG_COMMENT, &headers, None)?;
    let mut data = mock.data().write().await;
    let blog = data
        .blogs
        .iter_mut()
        .find(|b| b.id == body.blog_id)
        .ok_or_else(not_found)?;
    blog.comment_count += 1;

    let comment = BlogComment {
        id: CommentId::new(Uuid::new_v4().to_string()),
        blog_id: body.blog_id,
        content: body.content,
        user: current_author(),
        created_at: NOW.to_string(),
    };
    data.comments.insert(0, comment.clone());
    Ok(ok(comment))
}

pub(crate) async fn react_blog(State(mock): State<Mock>, headers: HeaderMap, Json(body): Json<CreateBlogReact>) -> Reply {
    authorize(&mock, routes::REACT_BLOG, &headers, None)?;
    let mut data = mock.data().write().await;
    let is_reacted = if data.reacted.remove(&body.blog_id) {
        false
    } else {
        data.reacted.insert(body.blog_id.clone());
        true
    };
    let blog = data
        .blogs
        .iter_mut()
        .find(|b| b.id == body.blog_id)
        .ok_or_else(not_found)?;
    blog.react_count = if is_reacted {
        blog.react_count + 1
    } else {
        blog.react_count.saturating_sub(1)
    };

    Ok(ok(BlogReaction {
        blog_id: body.blog_id,
        is_reacted,
        react_count: blog.react_count,
    }))
}

// =============================================================================
// Cart & orders
// =============================================================================

pub(crate) async fn cart(State(mock): State<Mock>, headers: HeaderMap) -> Reply {
    authorize(&mock, routes::CART, &headers, None)?;
    mock.simulate_latency().await;
    Ok(ok(mock.data().read().await.cart()))
}

pub(crate) async fn update_cart_item(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<UpdateCartItemQuantity>,
) -> Reply {
    authorize(&mock, routes::UPDATE_CART, &headers, None)?;
    let mut data = mock.data().write().await;
    let line = data
        .cart
        .iter_mut()
        .find(|d| d.id == body.cart_detail_id)
        .ok_or_else(not_found)?;
    line.quantity = body.quantity;
    line.total_price = line.unit_price.times(body.quantity);
    Ok(ok(line.clone()))
}

pub(crate) async fn delete_cart_item(State(mock): State<Mock>, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    authorize(&mock, routes::DELETE_CART_ITEM, &headers, None)?;
    let mut data = mock.data().write().await;
    let before = data.cart.len();
    data.cart.retain(|d| d.id.as_str() != id);
    if data.cart.len() == before {
        return Err(not_found());
    }
    Ok(message(StatusCode::OK, "Đã xoá sản phẩm khỏi giỏ hàng"))
}

pub(crate) async fn create_order(State(mock): State<Mock>, headers: HeaderMap, Json(body): Json<CreateOrder>) -> Reply {
    authorize(&mock, routes::CREATE_ORDER, &headers, None)?;
    let mut data = mock.data().write().await;
    if !data.addresses.iter().any(|a| a.id == body.delivery_info_id) {
        return Err(not_found());
    }
    if !body
        .array_cart_detail_ids
        .iter()
        .all(|id| data.cart.iter().any(|d| &d.id == id))
    {
        return Err(message(StatusCode::BAD_REQUEST, "Sản phẩm không có trong giỏ hàng"));
    }

    let total: i64 = data
        .cart
        .iter()
        .filter(|d| body.array_cart_detail_ids.contains(&d.id))
        .map(|d| d.total_price.amount())
        .sum();
    data.cart
        .retain(|d| !body.array_cart_detail_ids.contains(&d.id));

    Ok(ok(Order {
        id: OrderId::new(Uuid::new_v4().to_string()),
        status: OrderStatus::Pending,
        total_price: Vnd::new(total),
        shipping_fee: match body.deli_method {
            DeliveryMethod::Standard => Vnd::new(30_000),
            DeliveryMethod::Express => Vnd::new(50_000),
        },
        deli_method: body.deli_method,
        created_at: NOW.to_string(),
    }))
}

// =============================================================================
// Catalog
// =============================================================================

pub(crate) async fn courses(State(mock): State<Mock>, headers: HeaderMap, RawQuery(query): RawQuery) -> Reply {
    let params = params(query.as_deref());
    authorize(&mock, routes::COURSES, &headers, query)?;
    mock.simulate_latency().await;
    let data = mock.data().read().await;
    let found: Vec<_> = data
        .courses
        .iter()
        .filter(|c| matches_keyword(&c.title, &params))
        .cloned()
        .collect();
    Ok(Json(paginate(&found, &params)).into_response())
}

pub(crate) async fn events(State(mock): State<Mock>, headers: HeaderMap, RawQuery(query): RawQuery) -> Response {
    let params = params(query.as_deref());
    mock.record(routes::EVENTS, &headers, query);
    mock.simulate_latency().await;
    let data = mock.data().read().await;
    let events: Vec<_> = data.events.iter().map(|e| e.event.clone()).collect();
    Json(paginate(&events, &params)).into_response()
}

pub(crate) async fn event(State(mock): State<Mock>, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    authorize(&mock, routes::EVENT, &headers, None)?;
    let data = mock.data().read().await;
    data.events
        .iter()
        .find(|e| e.event.id.as_str() == id)
        .map(|e| ok(e.clone()))
        .ok_or_else(not_found)
}

pub(crate) async fn products(State(mock): State<Mock>, headers: HeaderMap) -> Reply {
    authorize(&mock, routes::PRODUCTS, &headers, None)?;
    Ok(ok(mock.data().read().await.products.clone()))
}

pub(crate) async fn product_reviews(State(mock): State<Mock>, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    authorize(&mock, routes::PRODUCT_REVIEWS, &headers, None)?;
    let data = mock.data().read().await;
    let reviews: Vec<_> = data
        .reviews
        .iter()
        .filter(|r| r.product_id.as_str() == id)
        .cloned()
        .collect();
    Ok(ok(reviews))
}

// =============================================================================
// Notifications
// =============================================================================

pub(crate) async fn notifications(State(mock): State<Mock>, headers: HeaderMap) -> Reply {
    authorize(&mock, routes::NOTIFICATIONS, &headers, None)?;
    if mock.malformed_notifications() {
        return Ok(Json(json!({
            "data": [
                {"id": "n0", "title": "A", "content": "a", "isRead": false, "createdAt": NOW},
                {"id": "n1", "title": "B", "content": "b", "isRead": "yes", "createdAt": NOW}
            ]
        }))
        .into_response());
    }
    Ok(ok(mock.data().read().await.notifications.clone()))
}

// =============================================================================
// Uploads
// =============================================================================

async fn upload(mock: &Mock, route: &'static str, bucket: &str, headers: &HeaderMap, mut multipart: Multipart) -> Reply {
    authorize(mock, route, headers, None)?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| message(StatusCode::BAD_REQUEST, &e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| message(StatusCode::BAD_REQUEST, &e.to_string()))?;
        if bytes.is_empty() {
            return Err(message(StatusCode::BAD_REQUEST, "Tệp rỗng"));
        }
        return Ok(ok(UploadedFile {
            url: format!("https://cdn.edumall.vn/{bucket}/{file_name}"),
            key: format!("{bucket}/{}-{file_name}", Uuid::new_v4()),
        }));
    }
    Err(message(StatusCode::BAD_REQUEST, "Thiếu trường file"))
}

pub(crate) async fn upload_image(State(mock): State<Mock>, headers: HeaderMap, multipart: Multipart) -> Reply {
    upload(&mock, routes::UPLOAD_IMAGE, "image", &headers, multipart).await
}

pub(crate) async fn upload_file(State(mock): State<Mock>, headers: HeaderMap, multipart: Multipart) -> Reply {
    upload(&mock, routes::UPLOAD_FILE, "file", &headers, multipart).await
}

// =============================================================================
// Delivery infos
// =============================================================================

pub(crate) async fn shipping_infos(State(mock): State<Mock>, headers: HeaderMap) -> Reply {
    authorize(&mock, routes::SHIPPING_INFOS, &headers, None)?;
    Ok(ok(mock.data().read().await.addresses.clone()))
}

pub(crate) async fn create_shipping_info(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Json(body): Json<CreateShippingInfo>,
) -> Reply {
    authorize(&mock, routes::CREATE_SHIPPING_INFO, &headers, None)?;
    let address = ShippingAddress {
        id: DeliveryInfoId::new(Uuid::new_v4().to_string()),
        name: body.name,
        phone: body.phone,
        address: body.address,
        tag: body.tag,
        user_id: fixtures::user().id,
    };
    mock.data().write().await.addresses.push(address.clone());
    Ok(ok(address))
}

pub(crate) async fn delete_shipping_info(State(mock): State<Mock>, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    authorize(&mock, routes::DELETE_SHIPPING_INFO, &headers, None)?;
    let mut data = mock.data().write().await;
    let before = data.addresses.len();
    data.addresses.retain(|a| a.id.as_str() != id);
    if data.addresses.len() == before {
        return Err(not_found());
    }
    Ok(message(StatusCode::OK, "Đã xoá địa chỉ"))
}
