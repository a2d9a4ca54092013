use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::constants::{
    FIELD_DELIMITER, FLAGGED_GROUP_LABEL, FLAGGED_GROUP_METHOD, GROUP_KEY, MIN_REGION_FIELDS,
    PATTERN_FIELD_INDEX, PROBE_URL,
};
use crate::domain::Region;
use crate::error::{Result, SyncError};
use crate::pipeline::classify::ClassifiedNodes;
use crate::pipeline::pattern::build_exclusion_pattern;

/// Matches the flagged group line, capturing the fragments before and after
/// its pattern field.
static FLAGGED_GROUP_LINE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"({key}{label}`{method}`)[^`\n]*(`{url}`\d+)",
        key = regex::escape(GROUP_KEY),
        label = regex::escape(FLAGGED_GROUP_LABEL),
        method = regex::escape(FLAGGED_GROUP_METHOD),
        url = regex::escape(PROBE_URL),
    );
    Regex::new(&pattern).expect("flagged group pattern is built from escaped constants")
});

/// A backtick-delimited `custom_proxy_group` line split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLine {
    fields: Vec<String>,
}

impl ConfigLine {
    pub fn parse(line: &str) -> Self {
        Self {
            fields: line.split(FIELD_DELIMITER).map(str::to_string).collect(),
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn pattern(&self) -> Option<&str> {
        self.fields.get(PATTERN_FIELD_INDEX).map(String::as_str)
    }

    /// Replace the pattern field; lines with fewer than four fields are rejected.
    pub fn set_pattern(&mut self, label: &str, pattern: &str) -> Result<()> {
        if self.fields.len() < MIN_REGION_FIELDS {
            return Err(SyncError::MalformedRegionLine {
                label: label.to_string(),
                fields: self.fields.len(),
                expected: MIN_REGION_FIELDS,
            });
        }
        self.fields[PATTERN_FIELD_INDEX] = pattern.to_string();
        Ok(())
    }

    pub fn render(&self) -> String {
        self.fields.join(&FIELD_DELIMITER.to_string())
    }
}

/// Replace the pattern of the flagged-node group, keeping the label, method,
/// probe URL and interval byte-identical.
///
/// Fails with `PatternNotFound` when no such line exists.
pub fn rewrite_flagged_group(content: &str, pattern: &str) -> Result<String> {
    let mut matches = 0usize;
    let rewritten = FLAGGED_GROUP_LINE.replace_all(content, |caps: &Captures| {
        matches += 1;
        format!("{}{}{}", &caps[1], pattern, &caps[2])
    });

    if matches == 0 {
        return Err(SyncError::PatternNotFound {
            group: FLAGGED_GROUP_LABEL.to_string(),
        });
    }
    debug!("Rewrote {} flagged group line(s)", matches);
    Ok(rewritten.into_owned())
}

/// Outcome of the region pass.
#[derive(Debug, Default)]
pub struct RegionRewrite {
    pub content: String,
    pub updated: Vec<Region>,
    /// Non-fatal problems; each one skipped a region.
    pub skipped: Vec<SyncError>,
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Point every region that has flagged nodes at an exclusion pattern.
///
/// Only the first line carrying a region's label is touched. Regions without
/// flagged nodes and all other lines are left as they are.
pub fn rewrite_region_groups(content: &str, classified: &ClassifiedNodes) -> RegionRewrite {
    let mut lines: Vec<(String, &str)> = content
        .split_inclusive('\n')
        .map(|line| {
            let (body, ending) = split_line_ending(line);
            (body.to_string(), ending)
        })
        .collect();

    let mut updated = Vec::new();
    let mut skipped = Vec::new();

    for (region, excluded) in classified.regions() {
        let prefix = region.line_prefix();
        let Some(index) = lines.iter().position(|(body, _)| body.starts_with(&prefix)) else {
            warn!(region = region.id(), "No group line for {}, skipping", region.label());
            skipped.push(SyncError::MissingRegionLine {
                label: region.label().to_string(),
            });
            continue;
        };

        let mut line = ConfigLine::parse(&lines[index].0);
        let pattern = build_exclusion_pattern(excluded, region.primary_keyword());
        match line.set_pattern(region.label(), &pattern) {
            Ok(()) => {
                debug!(region = region.id(), excluded = excluded.len(), "Updated region line");
                lines[index].0 = line.render();
                updated.push(region);
            }
            Err(e) => {
                warn!(region = region.id(), "{}", e);
                skipped.push(e);
            }
        }
    }

    let content = lines
        .iter()
        .map(|(body, ending)| format!("{}{}", body, ending))
        .collect();

    RegionRewrite {
        content,
        updated,
        skipped,
    }
}
