use crate::models::package::CATALOG;
use crate::models::Package;
use crate::routes::Screen;
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn PackagesScreen(on_navigate: EventHandler<Screen>) -> Element {
    let steps = [
        ("1", "Choose Package", "Select the package that fits your event size and needs"),
        ("2", "Create Event", "Set up your event and get a unique QR code for guests"),
        ("3", "Share & Capture", "Guests scan QR code and start taking amazing photos"),
    ];

    rsx! {
        div { style: "min-height: 100vh; background: linear-gradient(135deg, #f5f3ff, #eff6ff); padding: 40px 20px;",
            div { style: "max-width: 960px; margin: 0 auto;",
                h1 { style: "text-align: center; font-size: 40px; margin-bottom: 8px;", {t!("packages-title")} }
                p { style: "text-align: center; color: #4b5563; margin-bottom: 32px;", {t!("packages-subtitle")} }

                div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 24px;",
                    for pkg in CATALOG.iter() {
                        PackageCard {
                            key: "{pkg.name}",
                            package: pkg.clone(),
                            on_select: move |p: Package| {
                                on_navigate.call(Screen::Register {
                                    package: Some(p.kind.as_str().to_string()),
                                })
                            },
                        }
                    }
                }

                div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 16px; margin-top: 40px;",
                    for (num , title , text) in steps {
                        div { key: "{num}", class: "card", style: "padding: 16px; text-align: center;",
                            div { style: "width: 36px; height: 36px; margin: 0 auto 8px auto; border-radius: 50%; background: #7c3aed; color: #fff; line-height: 36px; font-weight: 700;",
                                "{num}"
                            }
                            h4 { style: "margin: 0 0 4px 0;", "{title}" }
                            p { style: "margin: 0; color: #4b5563; font-size: 14px;", "{text}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PackageCard(package: Package, on_select: EventHandler<Package>) -> Element {
    let border = if package.popular {
        "border: 2px solid #7c3aed;"
    } else {
        "border: 1px solid #e5e7eb;"
    };

    rsx! {
        div { class: "card", style: "padding: 24px; position: relative; {border}",
            if package.popular {
                span { style: "position: absolute; top: -12px; left: 50%; transform: translateX(-50%); background: #7c3aed; color: #fff; padding: 2px 12px; border-radius: 999px; font-size: 12px;",
                    {t!("packages-popular")}
                }
            }
            h2 { style: "margin: 0;", "{package.kind.icon()} {package.name}" }
            p { style: "color: #4b5563;", "{package.description}" }
            p { style: "font-size: 36px; font-weight: 700; margin: 8px 0;",
                "${package.price_usd}"
                span { style: "font-size: 14px; font-weight: 400; color: #6b7280;", " per event" }
            }
            h4 { "What's Included:" }
            ul { style: "padding-left: 20px; color: #374151;",
                for feature in package.features.iter() {
                    li { key: "{feature}", "{feature}" }
                }
            }
            h4 { "Ideal For:" }
            div { style: "display: flex; flex-wrap: wrap; gap: 6px; margin-bottom: 16px;",
                for item in package.ideal_for.iter() {
                    span { key: "{item}", style: "background: #f3f4f6; padding: 2px 8px; border-radius: 999px; font-size: 12px;", "{item}" }
                }
            }
            button {
                class: "btn-primary",
                style: "width: 100%; padding: 12px;",
                onclick: {
                    let package = package.clone();
                    move |_| on_select.call(package.clone())
                },
                "Choose {package.name}"
            }
        }
    }
}
