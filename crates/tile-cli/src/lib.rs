//! Terminal shell around `tile-engine`: TOML configuration and the
//! line-oriented play session. No game rules live here.

pub mod config;
pub mod session;
