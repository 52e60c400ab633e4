use cucumber::given;
use std::sync::Arc;

use user_lib::provider::models::{GroupRepresentation, RoleRepresentation};
use user_lib::provider::traits::IdentityProviderTrait;
use user_lib::user_service::UserService;

use crate::support::in_memory_provider::InMemoryProvider;
use crate::support::world::TestWorld;

#[given(expr = "an empty identity provider realm {string}")]
pub async fn empty_realm(world: &mut TestWorld, realm: String) {
    let provider = Arc::new(InMemoryProvider::default());
    world.service = Some(UserService::new(provider.clone(), realm.clone()));
    world.provider = provider;
    world.realm = realm;
}

#[given(expr = "a registered user {string} with email {string}")]
pub async fn registered_user(world: &mut TestWorld, username: String, email: String) {
    world
        .service()
        .create_user(&TestWorld::request(&username, &email))
        .await
        .expect("setup user should be created");

    let found = world
        .provider
        .search_users_by_username(&world.realm, &username)
        .await
        .expect("search should succeed");
    let user = found
        .into_iter()
        .find(|u| u.username == username)
        .expect("created user should be discoverable");
    world.registered_user_id = Some(user.id);
}

#[given("the user has the realm roles:")]
pub async fn user_has_roles(world: &mut TestWorld, step: &cucumber::gherkin::Step) {
    let user_id = world.registered_user_id.clone().expect("user should be registered");
    if let Some(table) = &step.table {
        let roles = table
            .rows
            .iter()
            .skip(1)
            .filter_map(|row| row.first())
            .map(RoleRepresentation::named)
            .collect();
        world.provider.assign_roles(&world.realm, &user_id, roles);
    }
}

#[given("the user belongs to the groups:")]
pub async fn user_in_groups(world: &mut TestWorld, step: &cucumber::gherkin::Step) {
    let user_id = world.registered_user_id.clone().expect("user should be registered");
    if let Some(table) = &step.table {
        let groups = table
            .rows
            .iter()
            .skip(1)
            .filter_map(|row| row.first())
            .map(GroupRepresentation::named)
            .collect();
        world.provider.join_groups(&world.realm, &user_id, groups);
    }
}

#[given("the identity provider is unreachable")]
pub async fn provider_unreachable(world: &mut TestWorld) {
    world.provider.set_unreachable(true);
}
