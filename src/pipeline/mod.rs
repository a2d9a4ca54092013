// Sync pipeline stages: parse, classify, pattern, rewrite

pub mod classify;
pub mod parse;
pub mod pattern;
pub mod rewrite;

// Re-export the stage entry points
pub use classify::{classify_nodes, ClassifiedNodes};
pub use parse::{parse_node_names, parse_node_records};
pub use pattern::{build_exclusion_pattern, build_regex_pattern, escape_regex};
pub use rewrite::{rewrite_flagged_group, rewrite_region_groups, ConfigLine, RegionRewrite};
