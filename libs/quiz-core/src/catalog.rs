//! Catalog loading from the generated JSON assets.
//!
//! # Format
//! Items:
//! ```json
//! { "countries": [
//!     { "active": true, "names": ["Czechia", "Czech Republic"],
//!       "alternativeNames": ["Bohemia"], "bounding": [[0, 0], [1, 1]], "geometry": [] }
//! ] }
//! ```
//! Groups:
//! ```json
//! { "regions": [ { "name": "europe", "displayName": "Europe", "countries": ["Czechia"] } ],
//!   "lists":   [ { "name": "all", "displayName": "All countries", "countries": ["Czechia"] } ] }
//! ```
//! Geometry fields are not read. Entries that cannot be asked are dropped with
//! a warning instead of failing the whole load.

use crate::error::{QuizError, Result};
use crate::types::Item;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

#[derive(Debug, Deserialize)]
struct ItemFile {
    countries: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    alternative_names: Vec<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
struct GroupFile {
    #[serde(default)]
    regions: Vec<RawGroup>,
    #[serde(default)]
    lists: Vec<RawGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGroup {
    name: String,
    display_name: String,
    #[serde(default)]
    countries: Vec<String>,
}

/// A named subset of the catalog (a region or a difficulty list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub name: String,
    pub display_name: String,
    /// Item ids, in file order.
    pub members: Vec<String>,
}

/// Validated items plus the region and list groupings over them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
    order: Vec<String>,
    regions: Vec<Group>,
    lists: Vec<Group>,
}

impl Catalog {
    /// Parse both assets.
    pub fn from_json(items_json: &str, groups_json: &str) -> Result<Self> {
        let items = parse_items(items_json)?;
        let groups: GroupFile = serde_json::from_str(groups_json)?;
        Ok(Self::build(items, groups))
    }

    /// Catalog with every item in a single region and list named `all`.
    pub fn from_items(items: Vec<Item>) -> Self {
        let ids: Vec<String> = items.iter().map(|item| item.id().to_string()).collect();
        let all = |display_name: &str| RawGroup {
            name: "all".to_string(),
            display_name: display_name.to_string(),
            countries: ids.clone(),
        };
        let groups = GroupFile {
            regions: vec![all("World")],
            lists: vec![all("All")],
        };
        Self::build(items, groups)
    }

    fn build(items: Vec<Item>, groups: GroupFile) -> Self {
        let mut catalog = Self::default();
        for item in items {
            let id = item.id().to_string();
            if catalog.items.contains_key(&id) {
                warn!(item = %id, "duplicate item, keeping the first");
                continue;
            }
            catalog.order.push(id.clone());
            catalog.items.insert(id, item);
        }

        catalog.regions = catalog.resolve_groups(groups.regions, "region");
        catalog.lists = catalog.resolve_groups(groups.lists, "list");
        catalog
    }

    fn resolve_groups(&self, raw: Vec<RawGroup>, kind: &str) -> Vec<Group> {
        raw.into_iter()
            .filter_map(|group| {
                let mut seen = HashSet::new();
                let members: Vec<String> = group
                    .countries
                    .into_iter()
                    .filter(|id| {
                        if !self.items.contains_key(id) {
                            warn!(item = %id, group = %group.name, kind, "missing item in group");
                            return false;
                        }
                        seen.insert(id.clone())
                    })
                    .collect();

                if members.is_empty() {
                    warn!(group = %group.name, kind, "group has no askable items, dropping");
                    return None;
                }
                Some(Group {
                    name: group.name,
                    display_name: group.display_name,
                    members,
                })
            })
            .collect()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// All items in file order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn regions(&self) -> &[Group] {
        &self.regions
    }

    pub fn lists(&self) -> &[Group] {
        &self.lists
    }

    /// Items of `region` that also belong to `list`, in region order.
    pub fn select(&self, region: &str, list: &str) -> Result<Vec<Item>> {
        let region = self
            .regions
            .iter()
            .find(|g| g.name == region)
            .ok_or_else(|| QuizError::UnknownRegion(region.to_string()))?;
        let list: HashSet<&str> = self
            .lists
            .iter()
            .find(|g| g.name == list)
            .ok_or_else(|| QuizError::UnknownList(list.to_string()))?
            .members
            .iter()
            .map(String::as_str)
            .collect();

        Ok(region
            .members
            .iter()
            .filter(|id| list.contains(id.as_str()))
            .filter_map(|id| self.items.get(id).cloned())
            .collect())
    }
}

/// Parse the item asset into askable items.
///
/// Inactive entries are skipped. Entries without a usable accepted name are
/// rejected with a warning.
pub fn parse_items(content: &str) -> Result<Vec<Item>> {
    let file: ItemFile = serde_json::from_str(content)?;
    let mut items = Vec::with_capacity(file.countries.len());

    for (index, raw) in file.countries.into_iter().enumerate() {
        if !raw.active {
            continue;
        }
        if raw.names.is_empty() {
            warn!(entry = index, "item has no accepted names, skipping");
            continue;
        }
        let names: Vec<String> = raw.names.iter().map(|n| n.trim().to_string()).collect();
        if names.iter().any(String::is_empty) {
            warn!(entry = index, names = ?raw.names, "item has a blank name, skipping");
            continue;
        }
        let aliases = raw
            .alternative_names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        items.push(Item::new(names, aliases));
    }

    Ok(items)
}
