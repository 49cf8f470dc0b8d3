pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const BINARY_NAME: &str = env!("CARGO_BIN_NAME");
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const VERBOSE_LOG_FILTER: &str = "claudrock_core=debug,claudrock=debug,info";
