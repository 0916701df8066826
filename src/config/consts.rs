/// Pause after a source cycle that yielded nothing (milliseconds)
pub const DEFAULT_IDLE_BACKOFF_MS: u64 = 5;
/// How long `shutdown()` waits for execution contexts to exit (milliseconds)
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 2_000;
/// Poll interval while waiting for contexts during shutdown (milliseconds)
pub const SHUTDOWN_POLL_INTERVAL_MS: u64 = 10;
/// File that marks a directory on the module path as a part
pub const MANIFEST_FILE: &str = "part.yaml";
