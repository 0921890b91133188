//! Course catalog.

use serde::{Deserialize, Serialize};

use crate::format::format_duration;
use crate::types::{CourseId, Vnd};

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub thumbnail: String,
    pub instructor: String,
    pub price: Vnd,
    pub sale_price: Option<Vnd>,
    /// Compact duration such as `2h30p`.
    pub duration: String,
    pub lesson_count: u32,
    pub rating: Option<f64>,
    pub is_bought: bool,
}

impl Course {
    /// Price the buyer pays right now.
    #[must_use]
    pub fn effective_price(&self) -> Vnd {
        self.sale_price.unwrap_or(self.price)
    }

    /// Duration formatted for display.
    #[must_use]
    pub fn display_duration(&self) -> String {
        format_duration(&self.duration)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::{PageResponse, parse};

    const PAGE: &str = r#"{
        "data": [{
            "id": "k1",
            "title": "Lập trình Rust cơ bản",
            "thumbnail": "https://cdn.edumall.vn/k1.png",
            "instructor": "Trần Minh",
            "price": 799000,
            "salePrice": 499000,
            "duration": "2h30p",
            "lessonCount": 24,
            "rating": 4.8,
            "isBought": false,
            "tags": ["rust"]
        }],
        "pagination": {"pageIndex": 1, "pageSize": 10, "totalItems": 1, "totalPages": 1}
    }"#;

    #[test]
    fn test_course_page_parses() {
        let page: PageResponse<Course> = parse(PAGE).unwrap();
        let course = page.data.first().unwrap();
        assert_eq!(course.effective_price(), Vnd::new(499_000));
        assert_eq!(course.display_duration(), "2 giờ 30 phút");
    }

    #[test]
    fn test_missing_is_bought_fails() {
        let body = PAGE.replace(r#""isBought": false,"#, "");
        let err = parse::<PageResponse<Course>>(&body).unwrap_err();
        assert!(err.message.contains("isBought"));
    }
}
