pub mod admin;
pub mod admin_login;
pub mod admin_qr_gallery;
pub mod camera;
pub mod camera_access;
pub mod checkout_form;
pub mod create_event_modal;
pub mod dashboard;
pub mod event_camera;
pub mod events;
pub mod landing;
pub mod login;
pub mod navigation;
pub mod not_found;
pub mod packages;
pub mod qr_modal;
pub mod register;
pub mod storage;
pub mod toaster;

pub use admin::AdminScreen;
pub use admin_login::AdminLoginScreen;
pub use admin_qr_gallery::AdminQrGalleryScreen;
pub use camera::CameraScreen;
pub use camera_access::CameraAccessScreen;
pub use dashboard::DashboardScreen;
pub use event_camera::EventCameraScreen;
pub use events::EventsScreen;
pub use landing::LandingScreen;
pub use login::LoginScreen;
pub use navigation::NavigationBar;
pub use not_found::NotFoundScreen;
pub use packages::PackagesScreen;
pub use register::RegisterScreen;
pub use storage::StorageScreen;
pub use toaster::Toaster;
