//! Centralized constants for credential sizes, markers, and defaults.

/// Salt length in bytes (rendered as twice as many hex characters).
pub const DEFAULT_SALT_SIZE: usize = 16;

/// Random bytes behind a generated password.
pub const GENERATED_PASSWORD_BYTES: usize = 32;

/// Password argument that requests an interactive prompt.
pub const PROMPT_SENTINEL: &str = "-";

/// Marker prefix of the append-style (`rpcauth=`) dialect.
pub const RPCAUTH_MARKER: &str = "rpcauth";

/// Comment line written before an appended `rpcauth=` entry.
pub const RPCAUTH_COMMENT: &str = "#rpcauth";

/// Marker prefix of the section-anchored (rippled) dialect.
pub const RIPPLED_MARKER: &str = "password";

/// Sections that receive `password=`/`user=` lines in rippled.conf.
pub const RIPPLED_ANCHORS: &[&str] = &["[port_rpc_admin_local]", "[port_ws_admin_local]"];

/// Default target file for the append-style dialect.
pub const DEFAULT_RPCAUTH_CONF: &str = "bitcoin.conf";

/// Default target file for the section-anchored dialect.
pub const DEFAULT_RIPPLED_CONF: &str = "rippled.conf";

/// Characters that would break `user:salt$digest` or `user=<name>`.
pub const FORBIDDEN_USERNAME_CHARS: &[char] = &[':', '$', '='];

/// Tag used when forwarding audit lines to journald.
pub const JOURNALD_TAG: &str = "node-rpcauth";

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "node-rpcauth.toml";
