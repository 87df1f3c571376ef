//! Configuration module for rivera
//!
//! This module handles:
//! - User-level configuration (~/.config/rivera/config.toml)
//! - Branch color palette parsing

mod palette;
mod user_config;

pub use palette::{parse_palette, DEFAULT_BRANCH_COLORS};
pub use user_config::{DisplayConfig, UserConfig, DEFAULT_DATE_FORMAT, DEFAULT_HASH_LENGTH};
