//! Typed configuration resolution.
//!
//! Each declared variable is resolved from three sources, highest precedence first:
//! 1. **Environment** - the process environment (or an explicit [`EnvSnapshot`])
//! 2. **Env files** - `KEY=VALUE` files, later files overriding earlier ones
//! 3. **Defaults** - declared in the options, used only for optional variables
//!
//! The winning raw value is coerced by the variable's type through a
//! [`Coercions`] table. Required variables without a value fail the load with
//! one error naming all of them.
//!
//! ## Example
//! ```no_run
//! use envspec::config::{self, Options, ValueType, VariableSpec};
//!
//! let options = Options::new()
//!     .with(VariableSpec::new("PORT").with_type(ValueType::Integer).with_default(8080))
//!     .with(VariableSpec::new("DATABASE_URL").with_type(ValueType::Url).required());
//! config::load(options, [".env", ".env.development"])?;
//! let port = config::get("PORT")?;
//! # Ok::<(), envspec::ConfigError>(())
//! ```

mod coerce;
mod env_file;
mod layout;
mod loader;
mod options;
mod resolve;
mod symbol;
mod table;
mod types;

pub use coerce::{CoercionFn, Coercions, parse_leading_integer};
pub use env_file::{EnvFileMap, parse_line, parse_str, read_env_file, read_env_files};
pub use layout::{
    DEFAULT_ENVIRONMENT, ENVIRONMENT_ENV_VAR, OPTIONS_FILE, ProjectLayout, ROOT_ENV_VAR,
};
pub use loader::{EnvSnapshot, Loader, current, get, is_loaded, load, load_with};
pub use options::{Options, OptionsSource};
pub use resolve::{EMPTY_DEFAULT, ResolvedValue, Source};
pub use symbol::Symbol;
pub use table::ConfigTable;
pub use types::{RawValue, Value, ValueType, VariableSpec};
