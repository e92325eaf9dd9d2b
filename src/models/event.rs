use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    #[default]
    Standard,
    Premium,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Standard => "standard",
            PackageType::Premium => "premium",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PackageType::Standard => "📦",
            PackageType::Premium => "👑",
        }
    }

    /// Parses a `?package=` query value
    pub fn from_query(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "standard" => Some(PackageType::Standard),
            "premium" => Some(PackageType::Premium),
            _ => None,
        }
    }
}

/// Event lifecycle as reported by the backend. Unknown values are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Upcoming,
    Pending,
    Cancelled,
    #[serde(untagged)]
    Other(String),
}

impl EventStatus {
    pub fn label(&self) -> &str {
        match self {
            EventStatus::Active => "Active",
            EventStatus::Paused => "Paused",
            EventStatus::Completed => "Completed",
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Pending => "Pending",
            EventStatus::Cancelled => "Cancelled",
            EventStatus::Other(s) => s,
        }
    }

    /// Badge colors (background, foreground)
    pub fn badge_colors(&self) -> (&'static str, &'static str) {
        match self {
            EventStatus::Active => ("#dcfce7", "#166534"),
            EventStatus::Upcoming => ("#dbeafe", "#1e40af"),
            EventStatus::Paused | EventStatus::Pending => ("#fef9c3", "#854d0e"),
            EventStatus::Cancelled => ("#fee2e2", "#991b1b"),
            EventStatus::Completed | EventStatus::Other(_) => ("#f3f4f6", "#1f2937"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GalleryType {
    Public,
    #[default]
    Private,
}

impl GalleryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryType::Public => "public",
            GalleryType::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub login_code: Option<String>,
    pub folder_name: Option<String>,
    pub package_type: PackageType,
    pub status: EventStatus,
    pub photo_count: u32,
    pub max_photos: Option<u32>,
    pub gallery_type: GalleryType,
    pub gallery_features: Vec<String>,
    /// Opaque image reference (URL or data URL)
    pub qr_code: Option<String>,
    pub access_link: Option<String>,
    pub price: Option<serde_json::Value>,
    pub user_email: Option<String>,
    pub created_at: Option<String>,
    pub allow_guest_uploads: Option<bool>,
    pub moderation_enabled: Option<bool>,
}

impl Event {
    /// The date part of `eventDate` (`YYYY-MM-DD`)
    pub fn display_date(&self) -> String {
        match self.event_date.as_deref() {
            Some(date) => match chrono::DateTime::parse_from_rfc3339(date) {
                Ok(dt) => dt.format("%Y-%m-%d").to_string(),
                Err(_) => date.chars().take(10).collect(),
            },
            None => "-".to_string(),
        }
    }

    /// "{count}/{max} photos" or "{count} photos" when unlimited
    pub fn photo_banner(&self) -> String {
        match self.max_photos {
            Some(max) => format!("{}/{} photos", self.photo_count, max),
            None => format!("{} photos", self.photo_count),
        }
    }

    pub fn price_label(&self) -> Option<String> {
        match self.price.as_ref()? {
            serde_json::Value::String(s) => Some(format!("${}", s)),
            serde_json::Value::Number(n) => Some(format!("${}", n)),
            _ => None,
        }
    }

    pub fn qr_ready(&self) -> bool {
        self.qr_code.as_deref().is_some_and(|qr| !qr.is_empty())
    }

    /// The server-provided link, or the camera page for the login code
    pub fn share_link(&self, public_origin: &str) -> Option<String> {
        if let Some(link) = self.access_link.as_deref().filter(|l| !l.is_empty()) {
            if link.starts_with('/') {
                return Some(format!("{}{}", public_origin, link));
            }
            return Some(link.to_string());
        }
        self.login_code
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|code| format!("{}/camera/{}", public_origin, code))
    }
}

/// Reply of `GET /api/camera/{code}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EventAccess {
    pub event_id: Option<i64>,
    pub event_name: Option<String>,
    pub access_granted: bool,
    pub remaining_photos: Option<i64>,
    pub message: Option<String>,
}

/// Body of `POST /api/events`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub event_date: String,
    pub expected_guests: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    pub package_type: PackageType,
}

/// Body of `POST /api/events/direct`, sent by the registration flow and by
/// the admin dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectEvent {
    pub name: String,
    pub description: String,
    pub event_date: String,
    pub package_type: PackageType,
    pub folder_name: String,
    pub user_id: i64,
    pub gallery_type: GalleryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// Reply of `POST /api/events/direct`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DirectEventReply {
    pub event: Event,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tolerates_sparse_json() {
        let event: Event = serde_json::from_str(
            r#"{"id": 3, "name": "Birthday", "status": "archived", "unknownField": 1}"#,
        )
        .unwrap();
        assert_eq!(event.photo_count, 0);
        assert_eq!(event.gallery_type, GalleryType::Private);
        assert_eq!(event.status, EventStatus::Other("archived".to_string()));
        assert_eq!(event.status.label(), "archived");
    }

    #[test]
    fn test_event_from_admin_listing() {
        let event: Event = serde_json::from_str(
            r#"{
                "id": 1, "name": "Wedding: Sarah & John", "loginCode": "WEDDING1",
                "packageType": "premium", "status": "active", "photoCount": 12,
                "eventDate": "2025-06-15T18:00:00.000Z", "price": "75",
                "qrCode": "data:image/png;base64,AAAA"
            }"#,
        )
        .unwrap();
        assert_eq!(event.package_type, PackageType::Premium);
        assert_eq!(event.display_date(), "2025-06-15");
        assert_eq!(event.price_label().as_deref(), Some("$75"));
        assert!(event.qr_ready());
    }

    #[test]
    fn test_share_link_fallback() {
        let mut event = Event {
            login_code: Some("CONF2025".to_string()),
            ..Event::default()
        };
        assert_eq!(
            event.share_link("https://vipix.app").as_deref(),
            Some("https://vipix.app/camera/CONF2025")
        );
        event.access_link = Some("/camera/OTHER".to_string());
        assert_eq!(
            event.share_link("https://vipix.app").as_deref(),
            Some("https://vipix.app/camera/OTHER")
        );
    }

    #[test]
    fn test_photo_banner() {
        let event = Event {
            photo_count: 4,
            max_photos: Some(100),
            ..Event::default()
        };
        assert_eq!(event.photo_banner(), "4/100 photos");
    }

    #[test]
    fn test_new_event_omits_empty_optionals() {
        let body = NewEvent {
            name: "Gala".to_string(),
            description: None,
            event_date: "2025-09-01".to_string(),
            expected_guests: "26-50".to_string(),
            login_code: None,
            folder_name: None,
            package_type: PackageType::Premium,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["packageType"], "premium");
        assert_eq!(json["expectedGuests"], "26-50");
        assert!(json.get("loginCode").is_none());
    }
}
