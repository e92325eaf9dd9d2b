//! Transient notifications (toasts).

use std::time::Duration;

/// How long a toast stays on screen
pub const DISPLAY_TIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub variant: Variant,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a toast and returns its id
    pub fn push(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        variant: Variant,
    ) -> u64 {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            title: title.into(),
            description,
            variant,
        };
        match variant {
            Variant::Destructive => log::warn!("{}", notification.title),
            Variant::Default => log::info!("{}", notification.title),
        }
        self.items.push(notification);
        self.next_id
    }

    pub fn success(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(title, Some(description.into()), Variant::Default)
    }

    pub fn error(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(title, Some(description.into()), Variant::Destructive)
    }

    pub fn info(&mut self, title: impl Into<String>) -> u64 {
        self.push(title, None, Variant::Default)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_removes_only_target() {
        let mut n = Notifications::new();
        let a = n.success("Event created successfully", "Ready for photos");
        let b = n.error("Failed to create event", "Try again");
        n.dismiss(a);
        assert_eq!(n.items().len(), 1);
        assert_eq!(n.items()[0].id, b);
        assert_eq!(n.items()[0].variant, Variant::Destructive);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut n = Notifications::new();
        let a = n.info("Flash enabled");
        n.dismiss(a);
        let b = n.info("Flash disabled");
        assert_ne!(a, b);
    }
}
