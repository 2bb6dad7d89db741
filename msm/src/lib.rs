//! MSM is a library and CLI for managing Minecraft server files, it resolves the
//! Mojang version manifest and downloads server files for any listed version. See
//! msm-cli for the reference command line frontend.

mod http;
mod tokio;

pub mod download;
pub mod manifest;
pub mod server;
