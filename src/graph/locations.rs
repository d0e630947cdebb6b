// Location hierarchy
//
// Owns every location record and two lookup indexes built once at load:
// slug -> record and parent slug -> children. Lookups never fail loudly;
// a miss is `None` or an empty list.

use crate::data::{Location, LocationType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Deepest hierarchy chain the data may contain
pub const MAX_DEPTH: usize = 7;

/// Read-only location hierarchy
#[derive(Debug, Default)]
pub struct LocationGraph {
    /// Records in load order
    locations: Vec<Location>,
    /// First occurrence of each slug
    by_slug: HashMap<String, usize>,
    /// Children per parent slug; `None` groups the roots
    children: HashMap<Option<String>, Vec<usize>>,
    /// Slugs seen more than once during load
    duplicates: Vec<String>,
}

impl LocationGraph {
    /// Build the graph and its indexes
    pub fn new(locations: Vec<Location>) -> Self {
        let mut by_slug = HashMap::with_capacity(locations.len());
        let mut children: HashMap<Option<String>, Vec<usize>> = HashMap::new();
        let mut duplicates = Vec::new();

        for (idx, location) in locations.iter().enumerate() {
            if by_slug.contains_key(&location.slug) {
                duplicates.push(location.slug.clone());
                continue;
            }
            by_slug.insert(location.slug.clone(), idx);
            children
                .entry(location.parent_slug.clone())
                .or_default()
                .push(idx);
        }

        Self {
            locations,
            by_slug,
            children,
            duplicates,
        }
    }

    /// Look up a location by slug
    pub fn get(&self, slug: &str) -> Option<&Location> {
        self.by_slug.get(slug).map(|&idx| &self.locations[idx])
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// Direct children in load order
    pub fn children(&self, slug: &str) -> Vec<&Location> {
        self.group(Some(slug))
    }

    /// Locations without a parent, in load order
    pub fn roots(&self) -> Vec<&Location> {
        self.group(None)
    }

    fn group(&self, parent: Option<&str>) -> Vec<&Location> {
        self.children
            .get(&parent.map(str::to_string))
            .map(|ids| ids.iter().map(|&idx| &self.locations[idx]).collect())
            .unwrap_or_default()
    }

    /// Ancestor chain, root first, excluding the location itself.
    ///
    /// Walks parent pointers and stops at a dangling parent, a revisited
    /// slug, or after `MAX_DEPTH` steps, so it terminates on corrupt data.
    pub fn ancestors(&self, slug: &str) -> Vec<&Location> {
        let mut chain = Vec::new();
        let Some(start) = self.get(slug) else {
            return chain;
        };

        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(start.slug.as_str());

        let mut parent = start.parent_slug.as_deref();
        while let Some(parent_slug) = parent {
            if chain.len() >= MAX_DEPTH || !seen.insert(parent_slug) {
                break;
            }
            let Some(node) = self.get(parent_slug) else {
                break;
            };
            chain.push(node);
            parent = node.parent_slug.as_deref();
        }

        chain.reverse();
        chain
    }

    /// Number of ancestors above the location
    pub fn depth(&self, slug: &str) -> usize {
        self.ancestors(slug).len()
    }

    /// Locations sharing the parent, excluding the location itself.
    ///
    /// Ordered by priority descending, then slug ascending, capped at `limit`.
    /// Roots are siblings of each other.
    pub fn siblings(&self, slug: &str, limit: usize) -> Vec<&Location> {
        let Some(location) = self.get(slug) else {
            return Vec::new();
        };

        let mut siblings: Vec<&Location> = self
            .group(location.parent_slug.as_deref())
            .into_iter()
            .filter(|l| l.slug != location.slug)
            .collect();
        siblings.sort_by(|a, b| by_priority(a, b));
        siblings.truncate(limit);
        siblings
    }

    /// Other locations with coordinates, nearest first, capped at `limit`
    pub fn nearest(&self, slug: &str, limit: usize) -> Vec<&Location> {
        let Some(origin) = self.get(slug).and_then(|l| l.coordinates) else {
            return Vec::new();
        };

        let mut ranked: Vec<(f64, &Location)> = self
            .all()
            .filter(|l| l.slug != slug)
            .filter_map(|l| l.coordinates.map(|c| (origin.distance_km(&c), l)))
            .collect();
        ranked.sort_by(|a, b| {
            a.0.total_cmp(&b.0).then_with(|| a.1.slug.cmp(&b.1.slug))
        });
        ranked.into_iter().take(limit).map(|(_, l)| l).collect()
    }

    /// All locations of one tier, in load order
    pub fn by_type(&self, kind: LocationType) -> Vec<&Location> {
        self.all().filter(|l| l.kind == kind).collect()
    }

    /// Iterate unique locations in load order
    pub fn all(&self) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .enumerate()
            .filter(|(idx, l)| self.by_slug.get(&l.slug) == Some(idx))
            .map(|(_, l)| l)
    }

    /// Number of unique locations
    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }

    /// Slugs that appeared more than once in the source data
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Aggregate counts
    pub fn stats(&self) -> LocationStats {
        let mut by_type = BTreeMap::new();
        let mut max_depth = 0;
        for location in self.all() {
            *by_type.entry(location.kind).or_insert(0) += 1;
            max_depth = max_depth.max(self.depth(&location.slug));
        }

        LocationStats {
            total: self.len(),
            roots: self.roots().len(),
            by_type,
            max_depth,
        }
    }
}

/// Priority descending, then slug ascending
pub(crate) fn by_priority(a: &Location, b: &Location) -> Ordering {
    b.priority.cmp(&a.priority).then_with(|| a.slug.cmp(&b.slug))
}

/// Aggregate counts over the hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationStats {
    pub total: usize,
    pub roots: usize,
    pub by_type: BTreeMap<LocationType, usize>,
    pub max_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use LocationType::*;

    fn loc(slug: &str, kind: LocationType, parent: Option<&str>, priority: u8) -> Location {
        Location::new(slug, slug, kind, parent).with_priority(priority)
    }

    fn sample() -> LocationGraph {
        LocationGraph::new(vec![
            loc("berlin", Bundesland, None, 10),
            loc("bayern", Bundesland, None, 10),
            loc("berlin-mitte", Stadtbezirk, Some("berlin"), 8),
            loc("berlin-pankow", Stadtbezirk, Some("berlin"), 6),
            loc("berlin-spandau", Stadtbezirk, Some("berlin"), 8),
            loc("wedding", Stadtteil, Some("berlin-mitte"), 4),
        ])
    }

    #[test]
    fn test_empty_graph() {
        let graph = LocationGraph::new(Vec::new());
        assert!(graph.is_empty());
        assert!(graph.get("berlin").is_none());
        assert!(graph.ancestors("berlin").is_empty());
        assert!(graph.siblings("berlin", 5).is_empty());
    }

    #[test]
    fn test_get_missing_is_none() {
        let graph = sample();
        assert!(graph.get("hamburg").is_none());
        assert!(graph.children("hamburg").is_empty());
    }

    #[test]
    fn test_ancestors_root_first() {
        let graph = sample();
        let chain: Vec<&str> = graph.ancestors("wedding").iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(chain, vec!["berlin", "berlin-mitte"]);
        assert!(graph.ancestors("berlin").is_empty());
        assert_eq!(graph.depth("wedding"), 2);
    }

    #[test]
    fn test_ancestors_stops_on_cycle() {
        let graph = LocationGraph::new(vec![
            loc("a", Gemeinde, Some("b"), 5),
            loc("b", Gemeinde, Some("c"), 5),
            loc("c", Gemeinde, Some("a"), 5),
        ]);
        let chain: Vec<&str> = graph.ancestors("a").iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(chain, vec!["c", "b"]);
    }

    #[test]
    fn test_ancestors_stops_on_dangling_parent() {
        let graph = LocationGraph::new(vec![
            loc("kreis", Landkreis, Some("missing"), 5),
            loc("dorf", Gemeinde, Some("kreis"), 5),
        ]);
        let chain: Vec<&str> = graph.ancestors("dorf").iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(chain, vec!["kreis"]);
    }

    #[test]
    fn test_ancestors_bounded_by_max_depth() {
        let mut locations = vec![loc("n0", Bundesland, None, 5)];
        for i in 1..12 {
            let parent = format!("n{}", i - 1);
            locations.push(loc(&format!("n{}", i), Gemeinde, Some(&parent), 5));
        }
        let graph = LocationGraph::new(locations);
        assert_eq!(graph.ancestors("n11").len(), MAX_DEPTH);
    }

    #[test]
    fn test_children_in_load_order() {
        let graph = sample();
        let children: Vec<&str> = graph.children("berlin").iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(children, vec!["berlin-mitte", "berlin-pankow", "berlin-spandau"]);
    }

    #[test]
    fn test_siblings_ordering_and_limit() {
        let graph = sample();
        let siblings: Vec<&str> = graph
            .siblings("berlin-pankow", 10)
            .iter()
            .map(|l| l.slug.as_str())
            .collect();
        assert_eq!(siblings, vec!["berlin-mitte", "berlin-spandau"]);

        let capped = graph.siblings("berlin-mitte", 1);
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].slug, "berlin-spandau");
    }

    #[test]
    fn test_root_siblings() {
        let graph = sample();
        let siblings = graph.siblings("berlin", 5);
        assert_eq!(siblings.len(), 1);
        assert_eq!(siblings[0].slug, "bayern");
    }

    #[test]
    fn test_duplicates_first_wins() {
        let graph = LocationGraph::new(vec![
            loc("berlin", Bundesland, None, 10),
            loc("berlin", Gemeinde, Some("x"), 1),
        ]);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get("berlin").unwrap().kind, Bundesland);
        assert_eq!(graph.duplicates(), &["berlin".to_string()]);
        assert_eq!(graph.all().count(), 1);
    }

    #[test]
    fn test_nearest() {
        let graph = LocationGraph::new(vec![
            loc("berlin", Bundesland, None, 10).with_coordinates(52.52, 13.405),
            loc("potsdam", KreisfreieStadt, None, 8).with_coordinates(52.39, 13.065),
            loc("muenchen", KreisfreieStadt, None, 10).with_coordinates(48.137, 11.575),
            loc("nowhere", Gemeinde, None, 1),
        ]);
        let near: Vec<&str> = graph.nearest("berlin", 5).iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(near, vec!["potsdam", "muenchen"]);
        assert!(graph.nearest("nowhere", 5).is_empty());
    }

    #[test]
    fn test_nearest_tolerates_nan_distances() {
        let mut locations = vec![
            loc("berlin", Bundesland, None, 10).with_coordinates(52.52, 13.405),
            loc("potsdam", KreisfreieStadt, None, 8).with_coordinates(52.39, 13.065),
            loc("antipode", Gemeinde, None, 1).with_coordinates(-52.52, -166.595),
        ];
        for i in 0..30 {
            locations.push(loc(&format!("kaputt-{}", i), Gemeinde, None, 1).with_coordinates(f64::NAN, 13.0));
        }
        let graph = LocationGraph::new(locations);

        let near: Vec<&str> = graph.nearest("berlin", 40).iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(near.len(), 32);
        assert!(near.contains(&"potsdam"));
        assert_eq!(graph.nearest("berlin", 40).len(), near.len());
    }

    #[test]
    fn test_by_type_and_stats() {
        let graph = sample();
        assert_eq!(graph.by_type(Stadtbezirk).len(), 3);
        assert!(graph.by_type(Landkreis).is_empty());

        let stats = graph.stats();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.roots, 2);
        assert_eq!(stats.by_type.get(&Bundesland), Some(&2));
        assert_eq!(stats.max_depth, 2);
    }
}
