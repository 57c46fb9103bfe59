use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Edges of the demo tree, every node except the root has exactly one parent
const SAMPLE_EDGES: [(u32, u32); 14] = [
    (0, 1),
    (0, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 6),
    (2, 7),
    (2, 8),
    (7, 9),
    (7, 10),
    (7, 11),
    (7, 12),
    (12, 13),
    (13, 14),
];

pub const SAMPLE_ROOT: &str = "0";

/// Declared dependencies of each entity
///
/// Stands in for runtime introspection: the table is handed to the graph
/// builder as its introspector.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest(HashMap<String, Vec<String>>);

impl Manifest {
    /// Parse a RON map of entity name to dependency names
    pub fn parse(text: &str) -> Result<Self> {
        ron::from_str(text).context("parsing manifest")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        Self::parse(&text)
    }

    /// The fifteen node tree used when no manifest is given
    pub fn sample() -> Self {
        let mut table: HashMap<String, Vec<String>> = HashMap::new();
        for (from, to) in SAMPLE_EDGES {
            table.entry(from.to_string()).or_default().push(to.to_string());
        }
        Self(table)
    }

    /// Every entity named by the manifest, as a key or as a dependency
    pub fn entities(&self) -> HashSet<String> {
        self.0
            .iter()
            .flat_map(|(entity, deps)| std::iter::once(entity).chain(deps))
            .cloned()
            .collect()
    }

    pub fn into_table(self) -> HashMap<String, HashSet<String>> {
        self.0
            .into_iter()
            .map(|(entity, deps)| (entity, deps.into_iter().collect()))
            .collect()
    }
}
