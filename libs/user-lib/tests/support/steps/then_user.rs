use cucumber::then;

use user_lib::provider::traits::IdentityProviderTrait;

use crate::support::world::TestWorld;

#[then("the user creation should succeed")]
pub async fn creation_succeeded(world: &mut TestWorld) {
    let result = world.create_result.as_ref().expect("create should have run");
    assert!(result.is_ok(), "unexpected error: {result:?}");
}

#[then(expr = "the user creation should fail with status {int}")]
pub async fn creation_failed(world: &mut TestWorld, status: u16) {
    let result = world.create_result.as_ref().expect("create should have run");
    let err = result.as_ref().expect_err("create should have failed");
    assert_eq!(err.status().as_u16(), status);
}

#[then(expr = "searching for {string} should find a user with email {string}")]
pub async fn user_discoverable(world: &mut TestWorld, username: String, email: String) {
    let users = world
        .provider
        .search_users_by_username(&world.realm, &username)
        .await
        .expect("search should succeed");

    assert!(!users.is_empty(), "user should exist after creation");
    assert_eq!(users[0].username, username);
    assert_eq!(users[0].email.as_deref(), Some(email.as_str()));
}

#[then(expr = "the lookup should fail with status {int}")]
pub async fn lookup_failed(world: &mut TestWorld, status: u16) {
    let result = world.lookup_result.as_ref().expect("lookup should have run");
    let err = result.as_ref().expect_err("lookup should have failed");
    assert!(!err.to_string().is_empty());
    assert_eq!(err.status().as_u16(), status);
}

#[then(expr = "the lookup should return email {string}")]
pub async fn lookup_email(world: &mut TestWorld, email: String) {
    let result = world.lookup_result.as_ref().expect("lookup should have run");
    let user = result.as_ref().expect("lookup should succeed");
    assert_eq!(user.email, email);
    assert_eq!(user.first_name, "Integration");
    assert_eq!(user.last_name, "Tester");
}

fn split(list: &str) -> Vec<String> {
    list.split(',').map(|s| s.trim().to_string()).collect()
}

#[then(expr = "the returned roles should be {string}")]
pub async fn returned_roles(world: &mut TestWorld, roles: String) {
    let user = world
        .lookup_result
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .expect("lookup should succeed");
    assert_eq!(user.roles, split(&roles));
}

#[then(expr = "the returned groups should be {string}")]
pub async fn returned_groups(world: &mut TestWorld, groups: String) {
    let user = world
        .lookup_result
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .expect("lookup should succeed");
    assert_eq!(user.groups, split(&groups));
}
