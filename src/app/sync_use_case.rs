use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::app::ports::FeedFetcher;
use crate::constants::FIELD_DELIMITER;
use crate::domain::Region;
use crate::error::{Result, SyncError};
use crate::infra::files::{read_text, write_text};
use crate::pipeline::{
    build_regex_pattern, classify_nodes, parse_node_names, rewrite_flagged_group,
    rewrite_region_groups, ClassifiedNodes,
};

/// Where the node feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Remote { url: String, timeout: Duration },
    Local(PathBuf),
}

impl FeedSource {
    pub fn describe(&self) -> String {
        match self {
            FeedSource::Remote { url, .. } => url.clone(),
            FeedSource::Local(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub source: FeedSource,
    pub config_path: PathBuf,
    pub dry_run: bool,
}

/// New configuration content computed from a feed, before anything is written.
#[derive(Debug)]
pub struct SyncPlan {
    pub names: Vec<String>,
    pub classified: ClassifiedNodes,
    pub inclusion_pattern: String,
    pub content: String,
    pub updated_regions: Vec<Region>,
    pub skipped_regions: Vec<SyncError>,
}

impl SyncPlan {
    /// Parse, classify and rewrite. Nothing here touches the filesystem.
    ///
    /// Names containing a backtick are dropped before either pass runs.
    pub fn build(feed_text: &str, config_content: &str) -> Result<Self> {
        let names: Vec<String> = parse_node_names(feed_text)
            .into_iter()
            .filter(|name| {
                // A delimiter inside a pattern field would split the config line
                let usable = !name.contains(FIELD_DELIMITER);
                if !usable {
                    warn!(node = %name, "Dropping node name containing the field delimiter");
                }
                usable
            })
            .collect();
        if names.is_empty() {
            return Err(SyncError::EmptyFeed);
        }

        let classified = classify_nodes(&names);
        let inclusion_pattern = build_regex_pattern(&names);

        let flagged = rewrite_flagged_group(config_content, &inclusion_pattern)?;
        let regions = rewrite_region_groups(&flagged, &classified);

        Ok(Self {
            names,
            classified,
            inclusion_pattern,
            content: regions.content,
            updated_regions: regions.updated,
            skipped_regions: regions.skipped,
        })
    }
}

/// Result of a sync run
#[derive(Debug)]
pub struct SyncReport {
    pub config_path: PathBuf,
    pub plan: SyncPlan,
    /// The new content differs from what was on disk.
    pub changed: bool,
    pub written: bool,
}

pub struct SyncUseCase {
    fetcher: Box<dyn FeedFetcher>,
}

impl SyncUseCase {
    pub fn new(fetcher: Box<dyn FeedFetcher>) -> Self {
        Self { fetcher }
    }

    #[instrument(skip(self, source), fields(source = %source.describe()))]
    pub fn read_feed(&self, source: &FeedSource) -> Result<String> {
        match source {
            FeedSource::Remote { url, timeout } => self.fetcher.fetch(url, *timeout),
            FeedSource::Local(path) => read_text(path),
        }
    }

    /// Fetch, transform and write the configuration at most once.
    ///
    /// Any error before the write leaves the file untouched.
    #[instrument(skip(self, options), fields(config = %options.config_path.display()))]
    pub fn run(&self, options: &SyncOptions) -> Result<SyncReport> {
        let feed_text = self.read_feed(&options.source)?;
        let original = read_text(&options.config_path)?;

        let plan = SyncPlan::build(&feed_text, &original)?;
        info!(
            flagged = plan.names.len(),
            assigned = plan.classified.assigned_count(),
            regions_updated = plan.updated_regions.len(),
            "Built new configuration"
        );
        if !plan.skipped_regions.is_empty() {
            warn!(skipped = plan.skipped_regions.len(), "Some region groups were not updated");
        }

        let changed = plan.content != original;
        let written = if !changed {
            info!("Configuration already up to date");
            false
        } else if options.dry_run {
            info!("Dry run, not writing configuration");
            false
        } else {
            write_text(&options.config_path, &plan.content)?;
            info!("Configuration written");
            true
        };

        Ok(SyncReport {
            config_path: options.config_path.clone(),
            plan,
            changed,
            written,
        })
    }
}
