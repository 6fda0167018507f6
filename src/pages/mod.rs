pub mod auth_callback;
pub mod purchases;
pub mod stats;
pub mod summary;
pub mod uploader;

pub use auth_callback::AuthCallbackPage;
pub use purchases::PurchasesPage;
pub use stats::StatsPage;
pub use summary::SummaryPage;
pub use uploader::UploaderPage;
