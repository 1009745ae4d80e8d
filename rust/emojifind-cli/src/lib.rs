//! Emoji Find build tools
//!
//! - `cli.rs` - Command-line arguments
//! - `assets.rs` - Input and asset file layout
//! - `commands.rs` - `prepare`, `index` and `search`
//! - `describe.rs` - Description generation through a chat completion API

pub mod assets;
pub mod cli;
pub mod commands;
pub mod describe;
