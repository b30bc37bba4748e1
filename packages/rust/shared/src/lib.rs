//! Shared types, error model, and configuration for TibiaDex.
//!
//! This crate is the foundation depended on by all other TibiaDex crates.
//! It provides:
//! - [`TibiaDexError`], the unified error type
//! - Domain types ([`CharacterRecord`] and its parts)
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputConfig, ParserConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{Result, TibiaDexError};
pub use types::{
    AccountInfo, Achievement, Badge, CharacterRecord, CharacterTitle, DeathEvent,
    GuildMembership, House, Identity, KillParticipant, OnlineStatus, OtherCharacterRef,
};
