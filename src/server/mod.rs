//! Server module for exposing HAL documents over HTTP

pub mod response;

pub use response::{HAL_CONTENT_TYPE, HalJson};
