mod google;

pub use google::AuthError;
pub use google::AuthSession;
pub use google::GoogleAuthGate;
