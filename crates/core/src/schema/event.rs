//! Events (workshops, webinars, meetups).

use serde::{Deserialize, Serialize};

use crate::types::EventId;

/// Event as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub thumbnail: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
}

/// Full event page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub description: String,
    pub organizer: String,
    pub registered_count: u32,
    pub capacity: Option<u32>,
}

impl EventDetail {
    /// Whether seats remain. Events without a capacity never fill up.
    #[must_use]
    pub fn has_seats(&self) -> bool {
        self.capacity.is_none_or(|cap| self.registered_count < cap)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::parse_value;

    #[test]
    fn test_event_detail_round_trips_declared_fields() {
        let value = serde_json::json!({
            "id": "e1",
            "title": "Rust Meetup Hà Nội",
            "thumbnail": "https://cdn.edumall.vn/e1.png",
            "location": "Hà Nội",
            "startTime": "2024-06-01T09:00:00+07:00",
            "endTime": "2024-06-01T12:00:00+07:00",
            "description": "Chia sẻ kinh nghiệm",
            "organizer": "Edumall",
            "registeredCount": 80,
            "capacity": 80
        });
        let detail: EventDetail = parse_value(value.clone()).unwrap();
        assert!(!detail.has_seats());
        assert_eq!(serde_json::to_value(&detail).unwrap(), value);
    }
}
