pub mod authenticated;
pub mod spinwheel_client;

pub use authenticated::AuthenticatedClient;
pub use spinwheel_client::SpinwheelClient;
