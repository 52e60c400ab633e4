pub mod in_memory_provider;
pub mod steps;
pub mod world;
