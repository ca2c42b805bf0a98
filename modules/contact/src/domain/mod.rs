pub mod error;
pub mod model;
pub mod ports;
pub mod service;
pub mod template;
