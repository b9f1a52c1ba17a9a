//! Identity service adapters implementing the `UserValidator` port.

mod http_user_validator;

pub use http_user_validator::HttpUserValidator;
