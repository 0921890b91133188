//! Structured cache keys.

use std::fmt;

/// Resource tag of a cache key. Mutations invalidate by resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Blogs,
    Blog,
    BlogComments,
    Cart,
    Courses,
    Events,
    Event,
    Notifications,
    Products,
    ProductReviews,
    ShippingInfos,
}

impl Resource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blogs => "blogs",
            Self::Blog => "blog",
            Self::BlogComments => "blog-comments",
            Self::Cart => "carts",
            Self::Courses => "courses",
            Self::Events => "events",
            Self::Event => "event",
            Self::Notifications => "notifications",
            Self::Products => "products",
            Self::ProductReviews => "product-reviews",
            Self::ShippingInfos => "shipping-infos",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parameter value in a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Absent,
    Int(u64),
    Text(String),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("-"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<u32> for KeyValue {
    fn from(n: u32) -> Self {
        Self::Int(u64::from(n))
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for KeyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Self>> From<Option<T>> for KeyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Resource tag plus an ordered parameter record.
///
/// Two keys are equal only when the resource, the parameter names and their
/// order all match, so `blogs[page_index=1]` and `events[page_index=1]` never
/// share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub params: Vec<(&'static str, KeyValue)>,
}

impl QueryKey {
    #[must_use]
    pub const fn new(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    /// Append a parameter.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<KeyValue>) -> Self {
        self.params.push((name, value.into()));
        self
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource.as_str())?;
        if self.params.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("]")
    }
}
