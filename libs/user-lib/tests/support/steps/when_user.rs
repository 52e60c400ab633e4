use cucumber::when;
use uuid::Uuid;

use crate::support::world::TestWorld;

#[when(expr = "I create a user {string} with email {string}")]
pub async fn create_user(world: &mut TestWorld, username: String, email: String) {
    let request = TestWorld::request(&username, &email);
    world.create_result = Some(world.service().create_user(&request).await);
}

#[when("I look up a user with a random id")]
pub async fn look_up_random(world: &mut TestWorld) {
    world.lookup_result = Some(world.service().get_user_by_id(Uuid::new_v4()).await);
}

#[when("I look up the registered user by id")]
pub async fn look_up_registered(world: &mut TestWorld) {
    let user_id = world
        .registered_user_id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("registered user should have a uuid id");
    world.lookup_result = Some(world.service().get_user_by_id(user_id).await);
}
