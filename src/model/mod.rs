//! Model
//! Plain data shared by the registry, the logger adapter and the config loader.
//! Nothing in here locks or logs.
pub mod config;
pub mod timer;
