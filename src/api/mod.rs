// fil-wallet-core/src/api/mod.rs

pub mod api;

pub use api::*;
