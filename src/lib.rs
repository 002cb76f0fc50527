#![forbid(unsafe_code)]

pub mod classify;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod lookup;
pub mod normalize;
pub mod page;
pub mod server;
