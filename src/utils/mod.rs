pub mod error;
pub mod handler;
pub mod response;
pub mod validation;
