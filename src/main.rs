use dioxus::prelude::*;

mod cache;
mod components;
mod config;
mod database;
mod error;
mod filesystem;
mod forms;
mod i18n;
mod models;
mod notifications;
mod routes;
mod services;

use cache::{QueryCache, QueryClient};
use components::{
    AdminLoginScreen, AdminQrGalleryScreen, AdminScreen, CameraAccessScreen, CameraScreen,
    DashboardScreen, EventCameraScreen, EventsScreen, LandingScreen, LoginScreen, NavigationBar,
    NotFoundScreen, PackagesScreen, RegisterScreen, StorageScreen, Toaster,
};
use config::AppConfig;
use dioxus_i18n::prelude::use_init_i18n;
use notifications::Notifications;
use routes::Screen;
use services::{session_service, ApiClient, Session};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("vipix"),
    );

    #[cfg(not(target_os = "android"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}

/// Sessions stored by earlier runs; a broken store starts signed out
fn restore_session() -> Session {
    match database::init_database().and_then(|conn| session_service::load_session(&conn)) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Could not restore session: {}", e);
            Session::default()
        }
    }
}

/// Mirrors in-app navigation into the webview history
fn push_history(screen: &Screen) {
    let script = format!("history.pushState(null, \"\", {:?});", screen.path());
    let _ = document::eval(&script);
}

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_init_i18n(i18n::init_i18n);

    let config = use_context_provider(AppConfig::load);
    use_context_provider(|| ApiClient::new(config.api_base_url.clone()));
    let cache = use_signal(QueryCache::new);
    let epoch = use_signal(|| 0u64);
    use_context_provider(|| QueryClient::new(cache, epoch));
    use_context_provider(|| Signal::new(Notifications::new()));
    let session = use_context_provider(|| Signal::new(restore_session()));

    let mut current_screen = use_signal(|| Screen::Landing);
    let navigate = move |screen: Screen| {
        log::debug!("Navigating to {}", screen.path());
        push_history(&screen);
        current_screen.set(screen);
    };

    // Start at the launch URL, then follow back/forward
    use_future(move || async move {
        let mut location = document::eval(
            r#"const here = () => [window.location.pathname, window.location.search];
dioxus.send(here());
window.addEventListener("popstate", () => dioxus.send(here()));"#,
        );
        loop {
            match location.recv::<(String, String)>().await {
                Ok((pathname, search)) => {
                    let screen = Screen::from_location(&pathname, &search);
                    log::debug!("Location {}{} opens {:?}", pathname, search, screen);
                    current_screen.set(screen);
                }
                Err(e) => {
                    log::warn!("Could not read the webview location: {:?}", e);
                    break;
                }
            }
        }
    });

    let screen = current_screen().guard(&session.read());
    let show_navigation = screen.shows_navigation();

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",

            div { style: "flex: 1; overflow-y: auto;",
                match screen.clone() {
                    Screen::Landing => rsx! {
                        LandingScreen { on_navigate: navigate }
                    },
                    Screen::Packages => rsx! {
                        PackagesScreen { on_navigate: navigate }
                    },
                    Screen::Register { package } => rsx! {
                        RegisterScreen { package, on_navigate: navigate }
                    },
                    Screen::Login => rsx! {
                        LoginScreen { on_navigate: navigate }
                    },
                    Screen::Dashboard => rsx! {
                        DashboardScreen { on_navigate: navigate }
                    },
                    Screen::Camera { code } => rsx! {
                        CameraScreen { code, on_navigate: navigate }
                    },
                    Screen::EventCamera(code) => rsx! {
                        EventCameraScreen { code, on_navigate: navigate }
                    },
                    Screen::CameraAccess => rsx! {
                        CameraAccessScreen { on_navigate: navigate }
                    },
                    Screen::Events => rsx! {
                        EventsScreen { on_navigate: navigate }
                    },
                    Screen::Storage => rsx! {
                        StorageScreen {}
                    },
                    Screen::Admin => rsx! {
                        AdminScreen { on_navigate: navigate }
                    },
                    Screen::AdminLogin => rsx! {
                        AdminLoginScreen { on_navigate: navigate }
                    },
                    Screen::AdminQrGallery => rsx! {
                        AdminQrGalleryScreen { on_navigate: navigate }
                    },
                    Screen::NotFound(path) => rsx! {
                        NotFoundScreen { path, on_navigate: navigate }
                    },
                }
            }

            if show_navigation {
                NavigationBar { current_screen: screen.clone(), on_navigate: navigate }
            }

            Toaster {}
        }
    }
}
