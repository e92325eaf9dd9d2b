use crate::cache::use_query;
use crate::models::StorageProvider;
use crate::services::event_service;
use dioxus::prelude::*;
use dioxus_i18n::t;

/// Read-only view of the configured storage providers
#[component]
pub fn StorageScreen() -> Element {
    let providers = use_query::<Vec<StorageProvider>>(event_service::STORAGE_SETTINGS_PATH.to_string());
    let list = providers.data.clone().unwrap_or_default();

    rsx! {
        div { style: "padding: 16px; padding-bottom: 90px; max-width: 720px; margin: 0 auto;",
            h1 { style: "margin: 0 0 16px 0; font-size: 24px;", {t!("storage-title")} }
            if let Some(err) = providers.error.clone() {
                p { style: "color: #dc2626;", "Could not load storage settings: {err}" }
            }
            if providers.loading && list.is_empty() {
                p { style: "color: #6b7280;", "Loading..." }
            }
            for provider in list {
                div { key: "{provider.id}", class: "card", style: "padding: 16px; margin-bottom: 12px; display: flex; align-items: center; gap: 12px;",
                    div { style: "font-size: 28px;", "{provider.icon()}" }
                    div { style: "flex: 1;",
                        div { style: "display: flex; gap: 8px; align-items: center;",
                            strong { "{provider.display_name()}" }
                            if provider.is_default {
                                span { style: "font-size: 11px; padding: 2px 8px; border-radius: 999px; background: #ede9fe; color: #6d28d9;", "Default" }
                            }
                        }
                        p { style: "margin: 2px 0 0 0; color: #6b7280; font-size: 13px;",
                            "{provider.storage_used} · {provider.file_count} files"
                        }
                    }
                    span {
                        style: if provider.is_enabled { "color: #16a34a; font-size: 13px;" } else { "color: #9ca3af; font-size: 13px;" },
                        if provider.is_enabled { "{provider.status_label()}" } else { "Disabled" }
                    }
                }
            }
        }
    }
}
