//! Seed data served by the mock backend.

use std::collections::HashSet;

use edumall_core::schema::auth::{Credentials, User};
use edumall_core::schema::blog::{Author, Blog, BlogComment};
use edumall_core::schema::cart::{Cart, CartDetail};
use edumall_core::schema::course::Course;
use edumall_core::schema::event::{Event, EventDetail};
use edumall_core::schema::notification::Notification;
use edumall_core::schema::product::{Product, ProductReview};
use edumall_core::schema::shipping::ShippingAddress;
use edumall_core::{
    BlogId, CartDetailId, CartId, CommentId, CourseId, DeliveryInfoId, Email, EventId,
    NotificationId, ProductId, ReviewId, Role, UserId, Vnd,
};

pub const USERNAME: &str = "lan";
pub const PASSWORD: &str = "matkhau123";
pub const ACCESS_TOKEN: &str = "access-lan";
pub const REFRESHED_ACCESS_TOKEN: &str = "access-lan-2";
pub const REFRESH_TOKEN: &str = "refresh-lan";

/// Cart line seeded for the fixture user.
pub const BOOK_LINE: &str = "cd-book";
/// Second seeded cart line.
pub const COURSE_LINE: &str = "cd-course";
/// Address seeded for the fixture user.
pub const HOME_ADDRESS: &str = "addr-home";

const CREATED_AT: &str = "2024-05-01T08:00:00Z";

#[must_use]
pub fn user() -> User {
    User {
        id: UserId::new("u1"),
        username: USERNAME.to_string(),
        email: Email::parse("lan@edumall.vn").expect("fixture email is valid"),
        role: Role::Customer,
    }
}

#[must_use]
pub fn credentials(access_token: &str) -> Credentials {
    Credentials {
        access_token: access_token.to_string(),
        expires_access: "2030-01-01T00:00:00Z".to_string(),
        refresh_token: REFRESH_TOKEN.to_string(),
        expires_refresh: "2030-02-01T00:00:00Z".to_string(),
    }
}

#[must_use]
pub fn author() -> Author {
    Author {
        id: UserId::new("u2"),
        username: "minh".to_string(),
        avatar: None,
    }
}

fn blog(id: &str, title: &str) -> Blog {
    Blog {
        id: BlogId::new(id),
        title: title.to_string(),
        thumbnail: format!("https://cdn.edumall.vn/blogs/{id}.jpg"),
        summary: format!("Tóm tắt: {title}"),
        author: author(),
        react_count: 3,
        comment_count: 0,
        created_at: CREATED_AT.to_string(),
    }
}

fn cart_line(id: &str, name: &str, unit_price: i64, quantity: u32) -> CartDetail {
    let unit_price = Vnd::new(unit_price);
    CartDetail {
        id: CartDetailId::new(id),
        product_id: None,
        course_id: None,
        combo_id: None,
        name: name.to_string(),
        image: None,
        quantity,
        unit_price,
        total_price: unit_price.times(quantity),
    }
}

/// Mutable state behind the mock endpoints.
#[derive(Debug, Clone)]
pub struct MockData {
    pub blogs: Vec<Blog>,
    pub comments: Vec<BlogComment>,
    pub reacted: HashSet<BlogId>,
    pub cart: Vec<CartDetail>,
    pub courses: Vec<Course>,
    pub events: Vec<EventDetail>,
    pub notifications: Vec<Notification>,
    pub products: Vec<Product>,
    pub reviews: Vec<ProductReview>,
    pub addresses: Vec<ShippingAddress>,
}

impl MockData {
    #[must_use]
    pub fn seed() -> Self {
        let mut book = cart_line(BOOK_LINE, "Sách Rust cơ bản", 150_000, 1);
        book.product_id = Some(ProductId::new("p1"));
        let mut course = cart_line(COURSE_LINE, "Lập trình Rust", 499_000, 1);
        course.course_id = Some(CourseId::new("c1"));

        Self {
            blogs: vec![
                blog("b1", "Học Rust trong 30 ngày"),
                blog("b2", "Mẹo ôn thi IELTS"),
                blog("b3", "Rust & WebAssembly"),
            ],
            comments: vec![BlogComment {
                id: CommentId::new("cm1"),
                blog_id: BlogId::new("b1"),
                content: "Bài viết hay!".to_string(),
                user: author(),
                created_at: CREATED_AT.to_string(),
            }],
            reacted: HashSet::new(),
            cart: vec![book, course],
            courses: vec![
                Course {
                    id: CourseId::new("c1"),
                    title: "Lập trình Rust".to_string(),
                    thumbnail: "https://cdn.edumall.vn/courses/c1.jpg".to_string(),
                    instructor: "Trần Minh".to_string(),
                    price: Vnd::new(799_000),
                    sale_price: Some(Vnd::new(499_000)),
                    duration: "12h30p".to_string(),
                    lesson_count: 48,
                    rating: Some(4.8),
                    is_bought: false,
                },
                Course {
                    id: CourseId::new("c2"),
                    title: "Tiếng Anh giao tiếp".to_string(),
                    thumbnail: "https://cdn.edumall.vn/courses/c2.jpg".to_string(),
                    instructor: "Lê Hoa".to_string(),
                    price: Vnd::new(399_000),
                    sale_price: None,
                    duration: "0h45p".to_string(),
                    lesson_count: 6,
                    rating: None,
                    is_bought: true,
                },
            ],
            events: vec![EventDetail {
                event: Event {
                    id: EventId::new("ev1"),
                    title: "Rust Meetup Hà Nội".to_string(),
                    thumbnail: "https://cdn.edumall.vn/events/ev1.jpg".to_string(),
                    location: "Hà Nội".to_string(),
                    start_time: "2024-06-01T09:00:00Z".to_string(),
                    end_time: "2024-06-01T12:00:00Z".to_string(),
                },
                description: "Gặp gỡ cộng đồng Rust".to_string(),
                organizer: "Edumall".to_string(),
                registered_count: 80,
                capacity: Some(100),
            }],
            notifications: [false, true, false]
                .into_iter()
                .enumerate()
                .map(|(i, is_read)| Notification {
                    id: NotificationId::new(format!("n{i}")),
                    title: format!("Thông báo {i}"),
                    content: "Đơn hàng của bạn đã được xác nhận".to_string(),
                    is_read,
                    created_at: CREATED_AT.to_string(),
                })
                .collect(),
            products: vec![
                Product {
                    id: ProductId::new("p1"),
                    name: "Sách Rust cơ bản".to_string(),
                    images: vec!["https://cdn.edumall.vn/products/p1.jpg".to_string()],
                    price: Vnd::new(150_000),
                    sale_price: None,
                    quantity: 12,
                    sold_count: 40,
                    category: Some("Sách".to_string()),
                    rating: Some(4.5),
                },
                Product {
                    id: ProductId::new("p2"),
                    name: "Bút bi Edumall".to_string(),
                    images: Vec::new(),
                    price: Vnd::new(10_000),
                    sale_price: Some(Vnd::new(8_000)),
                    quantity: 0,
                    sold_count: 500,
                    category: None,
                    rating: None,
                },
            ],
            reviews: vec![ProductReview {
                id: ReviewId::new("r1"),
                product_id: ProductId::new("p1"),
                rating: 5,
                content: "Sách dễ hiểu".to_string(),
                user: author(),
                created_at: CREATED_AT.to_string(),
            }],
            addresses: vec![ShippingAddress {
                id: DeliveryInfoId::new(HOME_ADDRESS),
                name: "Nguyễn Thị Lan".to_string(),
                phone: "0901234567".to_string(),
                address: "12 Lý Thường Kiệt, Hà Nội".to_string(),
                tag: "Nhà".to_string(),
                user_id: UserId::new("u1"),
            }],
        }
    }

    /// The cart as the backend reports it, totals included.
    #[must_use]
    pub fn cart(&self) -> Cart {
        Cart {
            id: CartId::new("cart-u1"),
            total_quantity: self.cart.iter().map(|d| d.quantity).sum(),
            total_price: Vnd::new(self.cart.iter().map(|d| d.total_price.amount()).sum()),
            cart_details: self.cart.clone(),
        }
    }
}
