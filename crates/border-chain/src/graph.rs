//! Border adjacency graph

use country_data::{BorderTable, ContinentFilter, Country, CountryTable};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use tracing::{debug, info};

/// How one-sided border entries are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdjacencyPolicy {
    /// `a` borders `b` only if `a`'s own list names `b`
    #[default]
    AsListed,
    /// `a` borders `b` if either list names the other
    Symmetric,
}

/// Directed graph of countries linked by land borders.
///
/// Node order follows the country table. Neighbour codes without a country
/// record never become nodes or edges.
#[derive(Debug, Clone)]
pub struct BorderGraph<'a> {
    graph: DiGraph<&'a Country, ()>,
    node_index: HashMap<String, NodeIndex>,
    policy: AdjacencyPolicy,
}

impl<'a> BorderGraph<'a> {
    pub fn build(
        countries: &'a CountryTable,
        borders: &BorderTable,
        policy: AdjacencyPolicy,
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut node_index = HashMap::new();

        for country in countries.iter() {
            let idx = graph.add_node(country);
            node_index.insert(country.code.clone(), idx);
        }

        let mut dropped = 0;
        for (code, neighbours) in borders.iter() {
            let Some(&from) = node_index.get(code) else {
                dropped += neighbours.len();
                continue;
            };
            for neighbour in neighbours {
                let Some(&to) = node_index.get(neighbour) else {
                    dropped += 1;
                    continue;
                };
                if from == to {
                    continue;
                }
                graph.update_edge(from, to, ());
                if policy == AdjacencyPolicy::Symmetric {
                    graph.update_edge(to, from, ());
                }
            }
        }

        if dropped > 0 {
            debug!("Dropped {} border entries naming unknown countries", dropped);
        }
        info!(
            "Border graph: {} countries, {} directed borders ({:?})",
            graph.node_count(),
            graph.edge_count(),
            policy
        );

        Self {
            graph,
            node_index,
            policy,
        }
    }

    pub fn policy(&self) -> AdjacencyPolicy {
        self.policy
    }

    pub fn country(&self, code: &str) -> Option<&'a Country> {
        self.node_index
            .get(&code.to_lowercase())
            .map(|&idx| self.graph[idx])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.node_index.contains_key(&code.to_lowercase())
    }

    /// Countries in table order
    pub fn countries(&self) -> impl Iterator<Item = &'a Country> + '_ {
        self.graph.node_indices().map(move |idx| self.graph[idx])
    }

    /// Does `from` border `to` under this graph's policy?
    pub fn are_adjacent(&self, from: &str, to: &str) -> bool {
        match (
            self.node_index.get(&from.to_lowercase()),
            self.node_index.get(&to.to_lowercase()),
        ) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Neighbours of `code`, sorted by name
    pub fn neighbours(&self, code: &str) -> Vec<&'a Country> {
        let Some(&idx) = self.node_index.get(&code.to_lowercase()) else {
            return Vec::new();
        };
        let mut out: Vec<&'a Country> = self.graph.neighbors(idx).map(|n| self.graph[n]).collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    pub fn country_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn border_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Codes of the countries a continent filter lets into play
    pub fn eligible(&self, filter: ContinentFilter) -> BTreeSet<String> {
        self.countries()
            .filter(|c| filter.matches(c))
            .map(|c| c.code.clone())
            .collect()
    }

    /// Eligible countries with at least one neighbour that is also eligible,
    /// in table order
    pub fn trail_eligible(&self, eligible: &BTreeSet<String>) -> Vec<&'a Country> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                eligible.contains(&self.graph[idx].code)
                    && self
                        .graph
                        .neighbors(idx)
                        .any(|n| eligible.contains(&self.graph[n].code))
            })
            .map(|idx| self.graph[idx])
            .collect()
    }

    /// Fewest-hop route from `start` to `end` through eligible countries,
    /// both ends included. `None` when unreachable.
    pub fn shortest_trail(
        &self,
        start: &str,
        end: &str,
        eligible: &BTreeSet<String>,
    ) -> Option<Vec<&'a Country>> {
        let &from = self.node_index.get(&start.to_lowercase())?;
        let &to = self.node_index.get(&end.to_lowercase())?;

        let mut came_from: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut seen: HashSet<NodeIndex> = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);

        while let Some(idx) = queue.pop_front() {
            if idx == to {
                let mut path = vec![self.graph[to]];
                let mut cur = to;
                while let Some(&prev) = came_from.get(&cur) {
                    path.push(self.graph[prev]);
                    cur = prev;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.graph.neighbors(idx) {
                if eligible.contains(&self.graph[next].code) && seen.insert(next) {
                    came_from.insert(next, idx);
                    queue.push_back(next);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_data::{Continent, GeoPoint};

    fn country(code: &str, name: &str) -> Country {
        Country::new(code, name, "Cap", GeoPoint::new(0.0, 0.0), Continent::Europe, name)
    }

    fn small_table() -> CountryTable {
        let mut table = CountryTable::new();
        for (code, name) in [("aa", "Alpha"), ("bb", "Bravo"), ("cc", "Charlie"), ("dd", "Delta")] {
            table.insert(country(code, name)).unwrap();
        }
        table
    }

    fn one_sided_borders() -> BorderTable {
        let mut borders = BorderTable::new();
        borders.insert("aa", &["bb", "zz"]);
        borders.insert("bb", &["cc"]);
        borders.insert("cc", &["bb"]);
        borders
    }

    #[test]
    fn test_unknown_codes_dropped() {
        let table = small_table();
        let graph = BorderGraph::build(&table, &one_sided_borders(), AdjacencyPolicy::AsListed);
        assert_eq!(graph.country_count(), 4);
        assert_eq!(graph.border_count(), 3);
        assert!(!graph.contains("zz"));
    }

    #[test]
    fn test_as_listed_is_directed() {
        let table = small_table();
        let graph = BorderGraph::build(&table, &one_sided_borders(), AdjacencyPolicy::AsListed);
        assert!(graph.are_adjacent("aa", "bb"));
        assert!(!graph.are_adjacent("bb", "aa"));
        assert!(graph.are_adjacent("BB", "cc"));
    }

    #[test]
    fn test_symmetric_policy() {
        let table = small_table();
        let graph = BorderGraph::build(&table, &one_sided_borders(), AdjacencyPolicy::Symmetric);
        assert!(graph.are_adjacent("bb", "aa"));
        // bb<->cc listed both ways; no duplicate edges
        assert_eq!(graph.border_count(), 4);
    }

    #[test]
    fn test_builtin_one_sided_entry() {
        let table = CountryTable::with_defaults();
        let borders = BorderTable::with_defaults();
        let listed = BorderGraph::build(&table, &borders, AdjacencyPolicy::AsListed);
        let symmetric = BorderGraph::build(&table, &borders, AdjacencyPolicy::Symmetric);

        assert!(listed.are_adjacent("fr", "gb"));
        assert!(!listed.are_adjacent("gb", "fr"));
        assert!(symmetric.are_adjacent("gb", "fr"));
    }

    #[test]
    fn test_trail_eligible_needs_eligible_neighbour() {
        let table = small_table();
        let graph = BorderGraph::build(&table, &one_sided_borders(), AdjacencyPolicy::AsListed);

        let all = graph.eligible(ContinentFilter::All);
        let codes: Vec<_> = graph.trail_eligible(&all).iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["aa", "bb", "cc"]);

        let without_bb: BTreeSet<String> =
            ["aa", "cc", "dd"].iter().map(|s| s.to_string()).collect();
        assert!(graph.trail_eligible(&without_bb).is_empty());
    }

    #[test]
    fn test_eligible_by_continent() {
        let table = CountryTable::with_defaults();
        let borders = BorderTable::with_defaults();
        let graph = BorderGraph::build(&table, &borders, AdjacencyPolicy::AsListed);
        let oceania = graph.eligible(ContinentFilter::Only(Continent::Oceania));
        assert_eq!(oceania.len(), 1);
        assert!(graph.trail_eligible(&oceania).is_empty());
    }

    #[test]
    fn test_shortest_trail() {
        let table = CountryTable::with_defaults();
        let borders = BorderTable::with_defaults();
        let graph = BorderGraph::build(&table, &borders, AdjacencyPolicy::AsListed);
        let all = graph.eligible(ContinentFilter::All);

        let path = graph.shortest_trail("pt", "de", &all).unwrap();
        let codes: Vec<_> = path.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["pt", "es", "fr", "de"]);

        assert_eq!(graph.shortest_trail("fr", "fr", &all).unwrap().len(), 1);
        assert!(graph.shortest_trail("fr", "au", &all).is_none());
        assert!(graph.shortest_trail("fr", "zz", &all).is_none());
    }

    #[test]
    fn test_neighbours_sorted_by_name() {
        let table = CountryTable::with_defaults();
        let borders = BorderTable::with_defaults();
        let graph = BorderGraph::build(&table, &borders, AdjacencyPolicy::AsListed);
        let names: Vec<_> = graph.neighbours("pt").iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Spain"]);
        assert!(graph.neighbours("zz").is_empty());
    }
}
