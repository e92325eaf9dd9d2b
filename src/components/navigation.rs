use crate::routes::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

const ACTIVE: &str = "padding: 8px 14px; border: none; border-radius: 8px; cursor: pointer; font-size: 14px; background: #7c3aed; color: #ffffff;";
const INACTIVE: &str = "padding: 8px 14px; border: none; border-radius: 8px; cursor: pointer; font-size: 14px; background: transparent; color: #4b5563;";

fn is_active(current: &Screen, target: &Screen) -> bool {
    match target {
        Screen::Camera { .. } => matches!(current, Screen::Camera { .. }),
        Screen::Dashboard => matches!(current, Screen::Dashboard | Screen::Landing),
        Screen::Admin => matches!(
            current,
            Screen::Admin | Screen::AdminQrGallery | Screen::AdminLogin
        ),
        other => current == other,
    }
}

#[component]
pub fn NavigationBar(current_screen: Screen, on_navigate: EventHandler<Screen>) -> Element {
    let items: Vec<(Screen, &str, &str, String)> = [
        (Screen::Dashboard, "📊", t!("nav-dashboard")),
        (Screen::Camera { code: None }, "📷", t!("nav-camera")),
        (Screen::Events, "📅", t!("nav-events")),
        (Screen::Storage, "⚙", t!("nav-storage")),
        (Screen::Admin, "🛡", t!("nav-admin")),
    ]
    .into_iter()
    .map(|(screen, icon, label)| {
        let style = if is_active(&current_screen, &screen) { ACTIVE } else { INACTIVE };
        (screen, icon, style, format!("{} {}", icon, label))
    })
    .collect();

    rsx! {
        nav { style: "display: flex; align-items: center; justify-content: space-between; padding: 10px 20px; background: #ffffff; border-bottom: 1px solid #e5e7eb;",
            button {
                style: "border: none; background: none; font-size: 20px; font-weight: 700; color: #7c3aed; cursor: pointer;",
                onclick: move |_| on_navigate.call(Screen::Landing),
                "VIPix"
            }
            div { style: "display: flex; gap: 6px;",
                for (screen , icon , style , label) in items {
                    button {
                        key: "{icon}",
                        style: "{style}",
                        onclick: move |_| on_navigate.call(screen.clone()),
                        "{label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_item_active_on_admin_screens() {
        assert!(is_active(&Screen::AdminQrGallery, &Screen::Admin));
        assert!(is_active(&Screen::Admin, &Screen::Admin));
        assert!(!is_active(&Screen::Events, &Screen::Admin));
        assert!(is_active(&Screen::Camera { code: Some("A".to_string()) }, &Screen::Camera { code: None }));
    }
}
