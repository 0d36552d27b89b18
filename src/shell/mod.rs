//! External command execution and executable lookup.

pub mod command;
pub mod mock;
pub mod path;

pub use command::{capture, execute, CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use mock::ScriptedRunner;
pub use path::{is_executable, parse_system_path, resolve_tool_path};
