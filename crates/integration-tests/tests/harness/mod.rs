#![allow(dead_code)]

pub mod config;
pub mod mock_embeddings;
pub mod mock_speech;
pub mod server;
