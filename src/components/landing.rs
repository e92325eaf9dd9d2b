use crate::models::package::CATALOG;
use crate::routes::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn LandingScreen(on_navigate: EventHandler<Screen>) -> Element {
    let highlights = [
        ("☁", "Unlimited Storage", "Store thousands of photos across multiple cloud providers"),
        ("🤖", "AI Moderation", "Automatic content filtering and quality enhancement"),
        ("💬", "Priority Support", "24/7 dedicated support for your events"),
    ];

    rsx! {
        div { style: "min-height: 100vh; background: linear-gradient(135deg, #f5f3ff, #eff6ff);",
            header { style: "display: flex; justify-content: space-between; align-items: center; padding: 16px 24px;",
                h1 { style: "margin: 0; font-size: 24px; color: #111827;", "VIPix" }
                div { style: "display: flex; gap: 8px;",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_navigate.call(Screen::Login),
                        {t!("action-sign-in")}
                    }
                    button {
                        class: "btn-primary",
                        onclick: move |_| on_navigate.call(Screen::Packages),
                        {t!("action-get-started")}
                    }
                }
            }

            section { style: "max-width: 960px; margin: 0 auto; padding: 48px 24px;",
                h1 { style: "font-size: 48px; margin: 0; color: #111827;", "Capture, Store, Share" }
                h1 { style: "font-size: 48px; margin: 0 0 16px 0;",
                    "with "
                    span { style: "color: #7c3aed;", "VIPix" }
                }
                p { style: "font-size: 20px; color: #4b5563; max-width: 560px;",
                    "The ultimate cloud storage solution for your event photos. Connect directly to Google Drive, Dropbox, or use our secure cloud storage."
                }
                div { style: "display: flex; gap: 12px; margin-top: 24px;",
                    button {
                        class: "btn-primary",
                        style: "padding: 14px 24px; font-size: 16px;",
                        onclick: move |_| on_navigate.call(Screen::Packages),
                        {t!("action-create-event")}
                    }
                    button {
                        class: "btn-secondary",
                        style: "padding: 14px 24px; font-size: 16px;",
                        onclick: move |_| on_navigate.call(Screen::CameraAccess),
                        {t!("action-join-event")}
                    }
                }
            }

            section { style: "background: #7c3aed; color: #ffffff; padding: 48px 24px;",
                div { style: "max-width: 960px; margin: 0 auto; display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 24px;",
                    for (icon , title , text) in highlights {
                        div { key: "{title}",
                            div { style: "font-size: 32px;", "{icon}" }
                            h3 { style: "margin: 8px 0;", "{title}" }
                            p { style: "margin: 0; color: #ede9fe;", "{text}" }
                        }
                    }
                }
            }

            section { style: "max-width: 960px; margin: 0 auto; padding: 48px 24px; display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 24px;",
                for pkg in CATALOG.iter() {
                    div {
                        key: "{pkg.name}",
                        class: "card",
                        style: if pkg.popular { "padding: 24px; border: 2px solid #7c3aed;" } else { "padding: 24px;" },
                        h3 { style: "margin: 0;", "{pkg.kind.icon()} {pkg.name}" }
                        p { style: "color: #4b5563;", "{pkg.description}" }
                        p { style: "font-size: 32px; font-weight: 700; margin: 8px 0;", "${pkg.price_usd}" }
                    }
                }
            }

            footer { style: "text-align: center; padding: 24px; color: #6b7280; font-size: 14px;",
                "© 2024 VIPix. All rights reserved."
            }
        }
    }
}
