#![allow(async_fn_in_trait)]

pub mod config;
pub mod default_colors;
pub mod traits;
pub mod types;
