// Domain services

pub mod validator;

pub use validator::*;
