//! Default parameter names and env keys.

/// Default name of the hash query parameter.
pub const DEFAULT_HASH_PARAMETER: &str = "_hash";
/// Default name of the expiry timestamp query parameter.
pub const DEFAULT_TIMESTAMP_PARAMETER: &str = "_timestamp";

// Env values used by Config::from_env
/// Env key of the signing secret.
pub const URISIGN_SECRET: &str = "URISIGN_SECRET";
/// Env key of the hash parameter name.
pub const URISIGN_HASH_PARAMETER: &str = "URISIGN_HASH_PARAMETER";
/// Env key of the timestamp parameter name.
pub const URISIGN_TIMESTAMP_PARAMETER: &str = "URISIGN_TIMESTAMP_PARAMETER";
