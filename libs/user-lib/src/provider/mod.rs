pub mod errors;
pub mod models;
pub mod traits;

pub use errors::IdentityProviderError;
pub use models::{
    GroupRepresentation, NewProviderUser, ProviderCredential, ProviderUser, RoleRepresentation,
};
pub use traits::IdentityProviderTrait;
