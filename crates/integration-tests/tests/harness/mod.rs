#![allow(dead_code)]

pub mod config;
pub mod mock_replicate;
pub mod server;
