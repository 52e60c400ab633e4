use crate::entities::UserResponse;
use crate::provider::models::{GroupRepresentation, ProviderUser, RoleRepresentation};

/// Builds the response DTO from a provider profile and its memberships.
/// Role and group order is kept as the provider returned it.
pub fn to_user_response(
    user: &ProviderUser,
    roles: &[RoleRepresentation],
    groups: &[GroupRepresentation],
) -> UserResponse {
    UserResponse {
        first_name: user.first_name.clone().unwrap_or_default(),
        last_name: user.last_name.clone().unwrap_or_default(),
        email: user.email.clone().unwrap_or_default(),
        roles: roles.iter().map(|r| r.name.clone()).collect(),
        groups: groups.iter().map(|g| g.name.clone()).collect(),
    }
}
