pub mod admin;
pub mod event;
pub mod package;
pub mod payment;
pub mod photo;
pub mod qr_code;
pub mod stats;
pub mod storage;

pub use admin::{AdminStats, PaymentRecord, UserAccount};
pub use event::{
    DirectEvent, DirectEventReply, Event, EventAccess, EventStatus, GalleryType, NewEvent,
    PackageType,
};
pub use package::Package;
pub use payment::{PaymentIntentReply, PaymentIntentRequest, PaymentOutcome};
pub use photo::Photo;
pub use qr_code::{AssignQrRequest, GenerateBatchRequest, QrBatchReply, QrCodeItem, QrGalleryStats};
pub use stats::{recent_activity, Activity, DashboardStats};
pub use storage::StorageProvider;
