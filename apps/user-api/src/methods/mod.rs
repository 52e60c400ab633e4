pub mod create_user;
pub mod get_user_by_id;
pub mod health_check;
pub mod hello;
pub mod routes;
