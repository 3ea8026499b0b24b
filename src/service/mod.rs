pub mod appointment;
pub mod auth;
pub mod crypto;
pub mod log;
pub mod notification;
pub mod signup;
pub mod user;
