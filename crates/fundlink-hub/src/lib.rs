pub mod engine;
pub mod error;
pub mod hub;

pub use engine::Engine;
pub use error::HubError;
pub use hub::Hub;
