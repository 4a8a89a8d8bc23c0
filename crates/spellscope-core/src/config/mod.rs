//! Tool configuration and settings persistence helpers.
//!
//! `spellscope.toml` describes the workspace (folder roots, settings file
//! locations) and the built-in default scope. Editor settings themselves are
//! JSON documents read and written whole by [`json_file`].

pub mod json_file;
pub mod parser;
pub mod paths;
pub mod schema;

pub use parser::{parse_tool_config, parse_tool_config_str};
pub use schema::ToolConfig;
