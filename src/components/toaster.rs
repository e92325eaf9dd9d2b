use crate::notifications::{Notifications, Variant, DISPLAY_TIME};
use dioxus::prelude::*;

/// Renders the notification stack and expires each entry
#[component]
pub fn Toaster() -> Element {
    let mut notifications = use_context::<Signal<Notifications>>();
    let items = notifications.read().items().to_vec();

    rsx! {
        div { style: "position: fixed; bottom: 20px; right: 20px; display: flex; flex-direction: column; gap: 8px; z-index: 1000; max-width: 360px;",
            for item in items {
                Toast {
                    key: "{item.id}",
                    id: item.id,
                    title: item.title.clone(),
                    description: item.description.clone(),
                    destructive: item.variant == Variant::Destructive,
                    on_dismiss: move |id| notifications.write().dismiss(id),
                }
            }
        }
    }
}

#[component]
fn Toast(
    id: u64,
    title: String,
    description: Option<String>,
    destructive: bool,
    on_dismiss: EventHandler<u64>,
) -> Element {
    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(DISPLAY_TIME).await;
            on_dismiss.call(id);
        });
    });

    let style = if destructive {
        "padding: 14px 16px; border-radius: 8px; background: #dc2626; color: #ffffff; box-shadow: 0 4px 12px rgba(0,0,0,0.15);"
    } else {
        "padding: 14px 16px; border-radius: 8px; background: #ffffff; color: #111827; border: 1px solid #e5e7eb; box-shadow: 0 4px 12px rgba(0,0,0,0.15);"
    };

    rsx! {
        div { style: "{style}",
            div { style: "display: flex; justify-content: space-between; gap: 12px;",
                strong { "{title}" }
                button {
                    style: "border: none; background: none; color: inherit; cursor: pointer;",
                    onclick: move |_| on_dismiss.call(id),
                    "✕"
                }
            }
            if let Some(text) = description {
                p { style: "margin: 4px 0 0 0; font-size: 14px; opacity: 0.9;", "{text}" }
            }
        }
    }
}
