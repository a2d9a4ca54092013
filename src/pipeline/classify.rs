use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::Region;

/// Flagged names split by region, in feed order within each region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedNodes {
    by_region: BTreeMap<Region, Vec<String>>,
    unassigned: Vec<String>,
}

impl ClassifiedNodes {
    /// Names assigned to `region`; empty when none matched.
    pub fn get(&self, region: Region) -> &[String] {
        self.by_region
            .get(&region)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn unassigned(&self) -> &[String] {
        &self.unassigned
    }

    /// Regions with at least one name, in declaration order.
    pub fn regions(&self) -> impl Iterator<Item = (Region, &[String])> {
        self.by_region
            .iter()
            .filter(|(_, names)| !names.is_empty())
            .map(|(region, names)| (*region, names.as_slice()))
    }

    pub fn assigned_count(&self) -> usize {
        self.by_region.values().map(Vec::len).sum()
    }
}

/// First region (in declaration order) whose keywords appear in `name`, ignoring case.
pub fn region_for(name: &str) -> Option<Region> {
    let lowered = name.to_lowercase();
    Region::ALL.into_iter().find(|region| {
        region
            .keywords()
            .iter()
            .any(|keyword| lowered.contains(keyword))
    })
}

pub fn classify_nodes<S: AsRef<str>>(names: &[S]) -> ClassifiedNodes {
    let mut classified = ClassifiedNodes::default();

    for name in names {
        let name = name.as_ref();
        match region_for(name) {
            Some(region) => {
                debug!(node = %name, region = region.id(), "Classified node");
                classified
                    .by_region
                    .entry(region)
                    .or_default()
                    .push(name.to_string());
            }
            None => classified.unassigned.push(name.to_string()),
        }
    }

    classified
}
