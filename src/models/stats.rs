use super::Event;
use serde::{Deserialize, Serialize};

/// Reply of `GET /api/stats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub active_events: u64,
    pub photos_count: u64,
    pub moderation_queue: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: i64,
    pub description: String,
    pub timestamp: String,
}

/// Newest events first, as activity entries
pub fn recent_activity(events: &[Event], limit: usize) -> Vec<Activity> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
        .into_iter()
        .take(limit)
        .map(|event| Activity {
            id: event.id,
            description: format!("Event \"{}\" created", event.name),
            timestamp: event.created_at.clone().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_tolerate_missing_fields() {
        let stats: DashboardStats = serde_json::from_str(r#"{"activeEvents":3}"#).unwrap();
        assert_eq!(stats.active_events, 3);
        assert_eq!(stats.photos_count, 0);
    }

    #[test]
    fn test_recent_activity_newest_first() {
        let event = |id, name: &str, created: &str| Event {
            id,
            name: name.to_string(),
            created_at: Some(created.to_string()),
            ..Event::default()
        };
        let events = vec![
            event(1, "Gala", "2025-01-01T10:00:00Z"),
            event(2, "Wedding", "2025-03-01T10:00:00Z"),
            event(3, "Picnic", "2025-02-01T10:00:00Z"),
        ];
        let activity = recent_activity(&events, 2);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].description, "Event \"Wedding\" created");
        assert_eq!(activity[1].id, 3);
    }
}
