use crate::routes::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn NotFoundScreen(path: String, on_navigate: EventHandler<Screen>) -> Element {
    rsx! {
        div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 16px;",
            div { class: "card", style: "max-width: 420px; padding: 32px; text-align: center;",
                h1 { style: "margin: 0; font-size: 48px;", "404" }
                p { style: "color: #6b7280;", {t!("not-found-message")} }
                p { style: "font-family: monospace; color: #9ca3af;", "{path}" }
                button {
                    class: "btn-primary",
                    style: "padding: 12px 24px;",
                    onclick: move |_| on_navigate.call(Screen::Landing),
                    {t!("not-found-home")}
                }
            }
        }
    }
}
