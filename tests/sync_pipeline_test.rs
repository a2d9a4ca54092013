use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

use clash_group_sync::app::ports::FeedFetcher;
use clash_group_sync::app::sync_use_case::{FeedSource, SyncOptions, SyncUseCase};
use clash_group_sync::domain::Region;
use clash_group_sync::error::SyncError;

const FIXTURE_CONFIG: &str = include_str!("fixtures/Custom_Clash.ini");
const FIXTURE_FEED: &str = include_str!("fixtures/youtube_cn.txt");

struct StaticFeed(&'static str);

impl FeedFetcher for StaticFeed {
    fn fetch(&self, _url: &str, _timeout: Duration) -> clash_group_sync::error::Result<String> {
        Ok(self.0.to_string())
    }
}

struct FailingFeed;

impl FeedFetcher for FailingFeed {
    fn fetch(&self, url: &str, _timeout: Duration) -> clash_group_sync::error::Result<String> {
        Err(SyncError::HttpStatus {
            url: url.to_string(),
            status: 503,
        })
    }
}

fn workspace(feed: &str) -> Result<(TempDir, PathBuf, PathBuf)> {
    let dir = tempdir()?;
    let config_path = dir.path().join("Custom_Clash.ini");
    let feed_path = dir.path().join("youtube_cn.txt");
    fs::write(&config_path, FIXTURE_CONFIG)?;
    fs::write(&feed_path, feed)?;
    Ok((dir, config_path, feed_path))
}

fn remote_options(config_path: &Path) -> SyncOptions {
    SyncOptions {
        source: FeedSource::Remote {
            url: "https://example.com/youtube_cn.txt".to_string(),
            timeout: Duration::from_secs(1),
        },
        config_path: config_path.to_path_buf(),
        dry_run: false,
    }
}

#[test]
fn test_full_sync_rewrites_flagged_and_region_groups() -> Result<()> {
    let (_dir, config_path, _) = workspace(FIXTURE_FEED)?;
    let use_case = SyncUseCase::new(Box::new(StaticFeed(FIXTURE_FEED)));

    let report = use_case.run(&remote_options(&config_path))?;
    assert!(report.written);
    assert_eq!(report.plan.names.len(), 5);
    assert_eq!(
        report.plan.updated_regions,
        vec![Region::HongKong, Region::UnitedStates]
    );
    assert_eq!(report.plan.classified.unassigned(), ["random-relay"]);

    let content = fs::read_to_string(&config_path)?;
    assert!(content.contains(
        r"custom_proxy_group=🔙 送中节点`url-test`(🇭🇰 香港 01 \(IPLC\)|HK\-Node\-2|🇺🇸 美国 洛杉矶 x1\.5|us\-west\-2|random\-relay)`https://www.gstatic.com/generate_204`300"
    ));
    assert!(content.contains(
        r"custom_proxy_group=🇭🇰 香港节点`url-test`^(?!.*(🇭🇰 香港 01 \(IPLC\)|HK\-Node\-2)).*(?i)港`https://www.gstatic.com/generate_204`300,,50"
    ));
    assert!(content.contains(
        r"custom_proxy_group=🇺🇸 美国节点`url-test`^(?!.*(🇺🇸 美国 洛杉矶 x1\.5|us\-west\-2)).*(?i)美国`https://www.gstatic.com/generate_204`300,,150"
    ));

    // Untouched groups keep their original patterns
    assert!(content.contains("custom_proxy_group=🇯🇵 日本节点`url-test`(日本|川日|"));
    assert!(content.contains("custom_proxy_group=🇸🇬 狮城节点`url-test`(新加坡|坡|狮城|SG|Singapore)`"));
    assert_eq!(content.lines().count(), FIXTURE_CONFIG.lines().count());
    Ok(())
}

#[test]
fn test_second_run_is_idempotent() -> Result<()> {
    let (_dir, config_path, feed_path) = workspace(FIXTURE_FEED)?;
    let use_case = SyncUseCase::new(Box::new(FailingFeed));
    let options = SyncOptions {
        source: FeedSource::Local(feed_path),
        config_path: config_path.clone(),
        dry_run: false,
    };

    let first = use_case.run(&options)?;
    assert!(first.written);
    let after_first = fs::read(&config_path)?;

    let second = use_case.run(&options)?;
    assert!(!second.changed);
    assert!(!second.written);
    assert_eq!(fs::read(&config_path)?, after_first);
    Ok(())
}

#[test]
fn test_fetch_failure_leaves_config_untouched() -> Result<()> {
    let (_dir, config_path, _) = workspace(FIXTURE_FEED)?;
    let use_case = SyncUseCase::new(Box::new(FailingFeed));

    let err = use_case.run(&remote_options(&config_path)).unwrap_err();
    assert!(matches!(err, SyncError::HttpStatus { status: 503, .. }));
    assert_eq!(fs::read_to_string(&config_path)?, FIXTURE_CONFIG);
    Ok(())
}

#[test]
fn test_missing_local_feed_is_file_not_found() -> Result<()> {
    let (dir, config_path, _) = workspace(FIXTURE_FEED)?;
    let use_case = SyncUseCase::new(Box::new(FailingFeed));
    let options = SyncOptions {
        source: FeedSource::Local(dir.path().join("absent.txt")),
        config_path: config_path.clone(),
        dry_run: false,
    };

    let err = use_case.run(&options).unwrap_err();
    assert!(matches!(err, SyncError::FileNotFound { .. }));
    assert_eq!(fs::read_to_string(&config_path)?, FIXTURE_CONFIG);
    Ok(())
}

#[test]
fn test_missing_flagged_group_performs_no_write() -> Result<()> {
    let (_dir, config_path, _) = workspace(FIXTURE_FEED)?;
    let without_flagged: String = FIXTURE_CONFIG
        .lines()
        .filter(|line| !line.contains("🔙 送中节点"))
        .map(|line| format!("{}\n", line))
        .collect();
    fs::write(&config_path, &without_flagged)?;

    let use_case = SyncUseCase::new(Box::new(StaticFeed(FIXTURE_FEED)));
    let err = use_case.run(&remote_options(&config_path)).unwrap_err();
    assert!(matches!(err, SyncError::PatternNotFound { .. }));
    assert_eq!(fs::read_to_string(&config_path)?, without_flagged);
    Ok(())
}

#[test]
fn test_malformed_region_line_is_skipped() -> Result<()> {
    let (_dir, config_path, _) = workspace(FIXTURE_FEED)?;
    let broken = FIXTURE_CONFIG.replace(
        "custom_proxy_group=🇭🇰 香港节点`url-test`(港|HK|hk|Hong Kong|HongKong|hongkong)`https://www.gstatic.com/generate_204`300,,50",
        "custom_proxy_group=🇭🇰 香港节点`url-test`(港|HK)",
    );
    fs::write(&config_path, &broken)?;

    let use_case = SyncUseCase::new(Box::new(StaticFeed(FIXTURE_FEED)));
    let report = use_case.run(&remote_options(&config_path))?;

    assert!(report.written);
    assert_eq!(report.plan.updated_regions, vec![Region::UnitedStates]);
    assert_eq!(report.plan.skipped_regions.len(), 1);
    assert!(matches!(
        report.plan.skipped_regions[0],
        SyncError::MalformedRegionLine { fields: 3, .. }
    ));

    let content = fs::read_to_string(&config_path)?;
    assert!(content.contains("custom_proxy_group=🇭🇰 香港节点`url-test`(港|HK)\n"));
    Ok(())
}

#[test]
fn test_binary_exits_with_status_one_on_empty_feed() -> Result<()> {
    let (_dir, config_path, feed_path) = workspace("节点名称\t延迟\n")?;

    let status = Command::new(env!("CARGO_BIN_EXE_clash_group_sync"))
        .arg("--source")
        .arg(&feed_path)
        .arg("--config")
        .arg(&config_path)
        .status()?;

    assert_eq!(status.code(), Some(1));
    assert_eq!(fs::read_to_string(&config_path)?, FIXTURE_CONFIG);
    Ok(())
}

#[test]
fn test_binary_updates_config_from_local_feed() -> Result<()> {
    let (_dir, config_path, feed_path) = workspace(FIXTURE_FEED)?;

    let output = Command::new(env!("CARGO_BIN_EXE_clash_group_sync"))
        .arg("--source")
        .arg(&feed_path)
        .arg("--config")
        .arg(&config_path)
        .arg("--quiet")
        .output()?;

    assert!(output.status.success());
    let content = fs::read_to_string(&config_path)?;
    assert!(content.contains(r"`url-test`(🇭🇰 香港 01 \(IPLC\)|"));
    Ok(())
}

#[test]
fn test_binary_writes_json_log_file_when_log_dir_set() -> Result<()> {
    let (dir, config_path, feed_path) = workspace(FIXTURE_FEED)?;
    let log_dir = dir.path().join("logs");

    let output = Command::new(env!("CARGO_BIN_EXE_clash_group_sync"))
        .env("CLASH_GROUP_SYNC_LOG_DIR", &log_dir)
        .arg("--source")
        .arg(&feed_path)
        .arg("--config")
        .arg(&config_path)
        .output()?;

    assert!(output.status.success());
    let logs: Vec<_> = fs::read_dir(&log_dir)?.collect::<std::io::Result<_>>()?;
    assert!(!logs.is_empty());
    Ok(())
}

#[test]
fn test_binary_warns_when_log_dir_cannot_be_created() -> Result<()> {
    let (dir, config_path, feed_path) = workspace(FIXTURE_FEED)?;
    // A regular file stands where the directory should go
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, "")?;

    let output = Command::new(env!("CARGO_BIN_EXE_clash_group_sync"))
        .env("CLASH_GROUP_SYNC_LOG_DIR", blocker.join("logs"))
        .env_remove("RUST_LOG")
        .arg("--source")
        .arg(&feed_path)
        .arg("--config")
        .arg(&config_path)
        .output()?;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File logging disabled"), "stderr: {}", stderr);
    Ok(())
}
