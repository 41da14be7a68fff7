//! Core identity resolution logic for gitpersona

pub mod config;
pub mod config_paths;
pub mod invocation;
pub mod profile;

pub use config::{ConfigError, ConfigSource, ProbeSettings, WrapperConfig};
pub use invocation::{rewrite_arguments, InvocationRequest, Rewrite, TRANSPORT_ENV_VAR};
pub use profile::{IdentityProfile, ProfileSet};
