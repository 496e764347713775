//! HTTP request handlers for the ApplyCRM web server

pub mod health;
pub mod pages;
pub mod portal;

pub use health::*;
pub use pages::*;
pub use portal::*;
