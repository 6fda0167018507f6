pub mod auth_bar;
pub mod auth_required;
pub mod icons;

pub use auth_bar::AuthBar;
pub use auth_required::AuthGate;
