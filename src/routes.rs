use crate::services::Session;

/// One screen per route
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Landing,
    Packages,
    Register { package: Option<String> },
    Login,
    Dashboard,
    /// Code entry with optional prefilled code (`/camera?code=`)
    Camera { code: Option<String> },
    /// Camera bound to an event login code
    EventCamera(String),
    CameraAccess,
    Events,
    Storage,
    Admin,
    AdminLogin,
    AdminQrGallery,
    NotFound(String),
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

impl Screen {
    /// Maps a URL path (with optional query) to a screen
    pub fn from_path(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Screen::Landing,
            ["packages"] => Screen::Packages,
            ["register"] => Screen::Register {
                package: query_param(query, "package"),
            },
            ["login"] => Screen::Login,
            ["dashboard"] => Screen::Dashboard,
            ["camera"] => Screen::Camera {
                code: query_param(query, "code"),
            },
            ["camera", code] => Screen::EventCamera(code.to_string()),
            ["event-camera"] => Screen::CameraAccess,
            ["events"] => Screen::Events,
            ["storage"] => Screen::Storage,
            ["admin"] => Screen::Admin,
            ["admin-login"] => Screen::AdminLogin,
            ["admin", "qr-gallery"] => Screen::AdminQrGallery,
            _ => Screen::NotFound(path.to_string()),
        }
    }

    /// Screen for the webview location at launch (`location.pathname` and
    /// `location.search`). Bundled builds load an index document, which is
    /// the landing page.
    pub fn from_location(pathname: &str, search: &str) -> Self {
        let pathname = match pathname {
            "" | "/index.html" => "/",
            other => other,
        };
        Screen::from_path(&format!("{}{}", pathname, search))
    }

    pub fn path(&self) -> String {
        match self {
            Screen::Landing => "/".to_string(),
            Screen::Packages => "/packages".to_string(),
            Screen::Register { package: Some(p) } => format!("/register?package={}", p),
            Screen::Register { package: None } => "/register".to_string(),
            Screen::Login => "/login".to_string(),
            Screen::Dashboard => "/dashboard".to_string(),
            Screen::Camera { code: Some(c) } => format!("/camera?code={}", c),
            Screen::Camera { code: None } => "/camera".to_string(),
            Screen::EventCamera(code) => format!("/camera/{}", code),
            Screen::CameraAccess => "/event-camera".to_string(),
            Screen::Events => "/events".to_string(),
            Screen::Storage => "/storage".to_string(),
            Screen::Admin => "/admin".to_string(),
            Screen::AdminLogin => "/admin-login".to_string(),
            Screen::AdminQrGallery => "/admin/qr-gallery".to_string(),
            Screen::NotFound(path) => path.clone(),
        }
    }

    /// Organizer and admin screens carry the navigation bar
    pub fn shows_navigation(&self) -> bool {
        matches!(
            self,
            Screen::Dashboard
                | Screen::Camera { .. }
                | Screen::Events
                | Screen::Storage
                | Screen::Admin
                | Screen::AdminQrGallery
        )
    }

    /// Admin screens fall back to the admin login without a session
    pub fn guard(self, session: &Session) -> Self {
        match self {
            Screen::Admin | Screen::AdminQrGallery if !session.is_admin() => {
                log::info!("No admin session, redirecting to login");
                Screen::AdminLogin
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vipix_auth::{AdminSession, AdminUser};

    #[test]
    fn test_route_table() {
        assert_eq!(Screen::from_path("/"), Screen::Landing);
        assert_eq!(
            Screen::from_path("/camera/WEDDING1"),
            Screen::EventCamera("WEDDING1".to_string())
        );
        assert_eq!(Screen::from_path("/camera"), Screen::Camera { code: None });
        assert_eq!(
            Screen::from_path("/camera?code=BDAY30"),
            Screen::Camera {
                code: Some("BDAY30".to_string())
            }
        );
        assert_eq!(Screen::from_path("/event-camera"), Screen::CameraAccess);
        assert_eq!(Screen::from_path("/admin/qr-gallery"), Screen::AdminQrGallery);
        assert_eq!(
            Screen::from_path("/register?package=premium"),
            Screen::Register {
                package: Some("premium".to_string())
            }
        );
        assert_eq!(
            Screen::from_path("/photos/1"),
            Screen::NotFound("/photos/1".to_string())
        );
    }

    #[test]
    fn test_paths_parse_back() {
        for screen in [
            Screen::Packages,
            Screen::EventCamera("CONF2025".to_string()),
            Screen::Register {
                package: Some("standard".to_string()),
            },
            Screen::AdminLogin,
        ] {
            assert_eq!(Screen::from_path(&screen.path()), screen);
        }
    }

    #[test]
    fn test_launch_location() {
        assert_eq!(
            Screen::from_location("/camera/WEDDING1", ""),
            Screen::EventCamera("WEDDING1".to_string())
        );
        assert_eq!(
            Screen::from_location("/camera", "?code=BDAY30"),
            Screen::Camera {
                code: Some("BDAY30".to_string())
            }
        );
        assert_eq!(Screen::from_location("/index.html", ""), Screen::Landing);
        assert_eq!(Screen::from_location("", ""), Screen::Landing);
        assert_eq!(
            Screen::from_location("/nope", ""),
            Screen::NotFound("/nope".to_string())
        );
    }

    #[test]
    fn test_navigation_bar_screens() {
        assert!(Screen::Dashboard.shows_navigation());
        assert!(Screen::Admin.shows_navigation());
        assert!(Screen::AdminQrGallery.shows_navigation());
        assert!(!Screen::AdminLogin.shows_navigation());
        assert!(!Screen::EventCamera("X".to_string()).shows_navigation());
        assert!(!Screen::Landing.shows_navigation());
    }

    #[test]
    fn test_admin_guard() {
        let anonymous = Session::default();
        assert_eq!(Screen::Admin.guard(&anonymous), Screen::AdminLogin);
        assert_eq!(Screen::Events.guard(&anonymous), Screen::Events);

        let admin = Session {
            admin: Some(AdminSession {
                session_id: "s".to_string(),
                user: AdminUser {
                    id: 1,
                    username: "root".to_string(),
                    email: String::new(),
                },
            }),
            user: None,
        };
        assert_eq!(Screen::AdminQrGallery.guard(&admin), Screen::AdminQrGallery);
    }
}
