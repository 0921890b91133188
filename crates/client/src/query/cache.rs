//! Cached value types.

use std::sync::Arc;

use edumall_core::schema::blog::{Blog, BlogComment, BlogDetail};
use edumall_core::schema::cart::Cart;
use edumall_core::schema::course::Course;
use edumall_core::schema::event::{Event, EventDetail};
use edumall_core::schema::notification::Notification;
use edumall_core::schema::product::{Product, ProductReview};
use edumall_core::schema::shipping::ShippingAddress;
use edumall_core::{DataResponse, PageResponse};

/// A response type that can live in the query cache.
pub trait Cacheable: Send + Sync + Sized + 'static {
    fn into_cache(value: Arc<Self>) -> CacheValue;

    /// `None` when the entry holds a different type.
    fn from_cache(value: CacheValue) -> Option<Arc<Self>>;
}

macro_rules! cache_values {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        /// Cached value types.
        #[derive(Debug, Clone)]
        pub enum CacheValue {
            $($variant(Arc<$ty>),)*
        }

        $(
            impl Cacheable for $ty {
                fn into_cache(value: Arc<Self>) -> CacheValue {
                    CacheValue::$variant(value)
                }

                fn from_cache(value: CacheValue) -> Option<Arc<Self>> {
                    match value {
                        CacheValue::$variant(value) => Some(value),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*
    };
}

cache_values! {
    Blogs => PageResponse<Blog>,
    Blog => DataResponse<BlogDetail>,
    BlogComments => PageResponse<BlogComment>,
    Cart => DataResponse<Cart>,
    Courses => PageResponse<Course>,
    Events => PageResponse<Event>,
    Event => DataResponse<EventDetail>,
    Notifications => DataResponse<Vec<Notification>>,
    Products => DataResponse<Vec<Product>>,
    ProductReviews => DataResponse<Vec<ProductReview>>,
    ShippingInfos => DataResponse<Vec<ShippingAddress>>,
}
