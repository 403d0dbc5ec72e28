//! CLI 명령어 구현

pub mod auth;
pub mod casos;
pub mod config;
pub mod delitos;
pub mod output;
pub mod report;
