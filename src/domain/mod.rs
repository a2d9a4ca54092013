// Domain data shapes shared by the pipeline stages

use std::fmt;

use crate::constants::{FIELD_DELIMITER, GROUP_KEY};

/// One node listed in the feed. Only the display name is used downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub name: String,
}

impl NodeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The region groups maintained in the proxy configuration.
///
/// Declaration order is the classification order: a node is assigned to the
/// first region whose keywords it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    HongKong,
    Japan,
    Singapore,
    UnitedStates,
}

/// Static description of a region group.
///
/// Classification uses every keyword, but a rewritten region line selects on
/// the primary keyword alone (`(?i)港`, `(?i)美国`, ...). Once a region has
/// been rewritten its group no longer picks up nodes named only in Latin
/// script, such as `HK-Node-9`, which the hand-written `(港|HK|...)` pattern
/// used to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRule {
    pub id: &'static str,
    pub label: &'static str,
    /// Lower-case substrings; the first one is the group's primary keyword.
    pub keywords: &'static [&'static str],
}

const HONG_KONG: RegionRule = RegionRule {
    id: "hk",
    label: "🇭🇰 香港节点",
    keywords: &["港", "hk", "hong kong", "hongkong"],
};

const JAPAN: RegionRule = RegionRule {
    id: "jp",
    label: "🇯🇵 日本节点",
    keywords: &["日本", "jp", "japan", "东京", "大阪"],
};

const SINGAPORE: RegionRule = RegionRule {
    id: "sg",
    label: "🇸🇬 狮城节点",
    keywords: &["新加坡", "sg", "singapore", "狮城"],
};

const UNITED_STATES: RegionRule = RegionRule {
    id: "us",
    label: "🇺🇸 美国节点",
    keywords: &["美国", "us", "united states", "洛杉矶", "硅谷"],
};

impl Region {
    pub const ALL: [Region; 4] = [
        Region::HongKong,
        Region::Japan,
        Region::Singapore,
        Region::UnitedStates,
    ];

    pub fn rule(self) -> &'static RegionRule {
        match self {
            Region::HongKong => &HONG_KONG,
            Region::Japan => &JAPAN,
            Region::Singapore => &SINGAPORE,
            Region::UnitedStates => &UNITED_STATES,
        }
    }

    pub fn id(self) -> &'static str {
        self.rule().id
    }

    pub fn label(self) -> &'static str {
        self.rule().label
    }

    pub fn keywords(self) -> &'static [&'static str] {
        self.rule().keywords
    }

    pub fn primary_keyword(self) -> &'static str {
        self.rule().keywords[0]
    }

    /// `custom_proxy_group=<label>` followed by the field delimiter.
    pub fn line_prefix(self) -> String {
        format!("{}{}{}", GROUP_KEY, self.label(), FIELD_DELIMITER)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
