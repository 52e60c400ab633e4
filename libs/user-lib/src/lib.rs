pub mod entities;
pub mod errors_service;
pub mod mapper;
pub mod provider;
pub mod user_service;

pub use entities::*;
pub use errors_service::*;
pub use user_service::*;
