/// Fixed names and locations shared by the CLI, settings and rewriter.

// Feed defaults
pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/AceDylan/clash-speedtest/main/youtube_cn.txt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Target configuration
pub const DEFAULT_CONFIG_PATH: &str = "cfg/Custom_Clash.ini";
pub const DEFAULT_SETTINGS_FILE: &str = "clash_group_sync.toml";

// Config line layout
pub const GROUP_KEY: &str = "custom_proxy_group=";
pub const FIELD_DELIMITER: char = '`';
pub const PATTERN_FIELD_INDEX: usize = 2;
pub const MIN_REGION_FIELDS: usize = 4;

// Flagged-node group
pub const FLAGGED_GROUP_LABEL: &str = "🔙 送中节点";
pub const FLAGGED_GROUP_METHOD: &str = "url-test";
pub const PROBE_URL: &str = "https://www.gstatic.com/generate_204";

// Environment overrides
pub const ENV_FEED_URL: &str = "CLASH_GROUP_SYNC_FEED_URL";
pub const ENV_TIMEOUT_SECS: &str = "CLASH_GROUP_SYNC_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "CLASH_GROUP_SYNC_LOG_DIR";
