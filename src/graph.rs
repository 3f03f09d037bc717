//! Undirected weighted graph with BFS components, Prim's MST and Dijkstra.

use crate::error::GraphError;
use core::fmt;
use hashbrown::{HashMap, HashSet};
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub v1: u32,
    pub v2: u32,
    pub weight: u32,
}

impl Edge {
    pub fn new(v1: u32, v2: u32, weight: u32) -> Self {
        Self { v1, v2, weight }
    }

    /// The endpoint opposite `v`.
    #[inline]
    pub fn other(&self, v: u32) -> u32 {
        if self.v1 == v {
            self.v2
        } else {
            self.v1
        }
    }

    #[inline]
    pub fn touches(&self, v: u32) -> bool {
        self.v1 == v || self.v2 == v
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.v1, self.v2, self.weight)
    }
}

/// Adjacency-list graph. Each edge is recorded in both endpoints' lists and
/// the vertex list is kept sorted.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<u32>,
    adj: HashMap<u32, Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `v`; a vertex already present is left as is.
    pub fn add_vertex(&mut self, v: u32) {
        if let Err(pos) = self.vertices.binary_search(&v) {
            self.vertices.insert(pos, v);
            self.adj.insert(v, Vec::new());
        }
    }

    pub fn add_edge(&mut self, v1: u32, v2: u32, weight: u32) -> Result<(), GraphError> {
        for v in [v1, v2] {
            if !self.contains_vertex(v) {
                return Err(GraphError::UnknownVertex(v));
            }
        }
        self.link(Edge::new(v1, v2, weight));
        Ok(())
    }

    // Endpoints must already be present. A self-loop is listed once.
    fn link(&mut self, e: Edge) {
        if let Some(list) = self.adj.get_mut(&e.v1) {
            list.push(e);
        }
        if e.v2 != e.v1 {
            if let Some(list) = self.adj.get_mut(&e.v2) {
                list.push(e);
            }
        }
    }

    pub fn contains_vertex(&self, v: u32) -> bool {
        self.adj.contains_key(&v)
    }

    /// Vertices in ascending order.
    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    /// Edges incident to `v` in insertion order; empty for unknown vertices.
    pub fn adj_list(&self, v: u32) -> &[Edge] {
        self.adj.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every edge once, in ascending order of the lower-numbered endpoint.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.vertices.iter().flat_map(move |&v| {
            self.adj_list(v)
                .iter()
                .filter(move |e| e.v1.min(e.v2) == v)
        })
    }

    pub fn total_weight(&self) -> u64 {
        self.edges().map(|e| u64::from(e.weight)).sum()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vs: Vec<String> = self.vertices.iter().map(u32::to_string).collect();
        writeln!(f, "V = {{ {} }}", vs.join(", "))?;
        writeln!(f, "Adj Lists")?;
        for &v in &self.vertices {
            let es: Vec<String> = self.adj_list(v).iter().map(Edge::to_string).collect();
            writeln!(f, "{v}: [{}]", es.join(", "))?;
        }
        Ok(())
    }
}

/// Component number (starting at 1) for every vertex, via BFS seeded in
/// ascending vertex order.
pub fn connected_components(g: &Graph) -> BTreeMap<u32, usize> {
    let mut comp = BTreeMap::new();
    let mut visited: HashSet<u32> = HashSet::with_capacity(g.vertices().len());
    let mut count = 0;
    let mut queue = VecDeque::new();

    for &start in g.vertices() {
        if !visited.insert(start) {
            continue;
        }
        count += 1;
        queue.push_back(start);
        while let Some(cur) = queue.pop_front() {
            comp.insert(cur, count);
            for e in g.adj_list(cur) {
                let n = e.other(cur);
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
    }
    debug!(components = count, vertices = comp.len(), "computed connected components");
    comp
}

/// Lightest edge with exactly one visited endpoint; the first found wins ties.
pub fn min_frontier_edge(g: &Graph, visited: &HashSet<u32>) -> Option<Edge> {
    let mut best: Option<Edge> = None;
    for &v in g.vertices() {
        if !visited.contains(&v) {
            continue;
        }
        for e in g.adj_list(v) {
            let frontier = visited.contains(&e.v1) != visited.contains(&e.v2);
            if frontier && best.map_or(true, |b| e.weight < b.weight) {
                best = Some(*e);
            }
        }
    }
    best
}

/// Prim's algorithm from `start`. The result carries every vertex of `g`;
/// vertices unreachable from `start` stay isolated.
pub fn minimum_spanning_tree(g: &Graph, start: u32) -> Graph {
    let mut mst = Graph::new();
    for &v in g.vertices() {
        mst.add_vertex(v);
    }
    let mut visited = HashSet::new();
    if g.contains_vertex(start) {
        visited.insert(start);
    }
    while visited.len() < g.vertices().len() {
        let Some(e) = min_frontier_edge(g, &visited) else {
            break;
        };
        mst.link(e);
        visited.insert(e.v1);
        visited.insert(e.v2);
    }
    debug!(start, weight = mst.total_weight(), "built minimum spanning tree");
    mst
}

/// Result of a single-source shortest path search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPaths {
    start: u32,
    dist: BTreeMap<u32, Option<u64>>,
    previous: BTreeMap<u32, Option<u32>>,
}

impl ShortestPaths {
    pub fn start(&self) -> u32 {
        self.start
    }

    /// `None` when `v` is unreachable or unknown.
    pub fn distance(&self, v: u32) -> Option<u64> {
        self.dist.get(&v).copied().flatten()
    }

    pub fn previous(&self, v: u32) -> Option<u32> {
        self.previous.get(&v).copied().flatten()
    }

    /// Vertices from the start to `v`, inclusive.
    pub fn path_to(&self, v: u32) -> Option<Vec<u32>> {
        self.distance(v)?;
        let mut path = vec![v];
        let mut cur = v;
        while let Some(p) = self.previous(cur) {
            path.push(p);
            cur = p;
        }
        path.reverse();
        Some(path)
    }
}

impl fmt::Display for ShortestPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shortest Path Data")?;
        writeln!(f, "Starting Vertex : {}", self.start)?;
        writeln!(f)?;
        writeln!(f, "Vertex\tDist")?;
        for (v, d) in &self.dist {
            match d {
                Some(d) => writeln!(f, "{v}\t{d}")?,
                None => writeln!(f, "{v}\t∞")?,
            }
        }
        writeln!(f)?;
        writeln!(f, "Vertex\tPrevious")?;
        for (v, p) in &self.previous {
            match p {
                Some(p) => writeln!(f, "{v}\t{p}")?,
                None => writeln!(f, "{v}\t-1")?,
            }
        }
        Ok(())
    }
}

/// Unvisited vertex with the smallest known distance; earlier vertices win ties.
pub fn min_dist_vertex(unvisited: &[u32], dist: &BTreeMap<u32, Option<u64>>) -> Option<u32> {
    let mut best: Option<(u32, u64)> = None;
    for &v in unvisited {
        if let Some(Some(d)) = dist.get(&v) {
            if best.map_or(true, |(_, bd)| *d < bd) {
                best = Some((v, *d));
            }
        }
    }
    best.map(|(v, _)| v)
}

/// Dijkstra from `start` using a linear minimum scan over unvisited vertices.
pub fn shortest_path(g: &Graph, start: u32) -> ShortestPaths {
    let mut dist: BTreeMap<u32, Option<u64>> = g.vertices().iter().map(|&v| (v, None)).collect();
    let mut previous: BTreeMap<u32, Option<u32>> =
        g.vertices().iter().map(|&v| (v, None)).collect();
    let mut unvisited: Vec<u32> = g.vertices().to_vec();

    if let Some(d) = dist.get_mut(&start) {
        *d = Some(0);
    }

    while let Some(cur) = min_dist_vertex(&unvisited, &dist) {
        unvisited.retain(|&v| v != cur);
        let Some(Some(base)) = dist.get(&cur).copied() else {
            break;
        };
        for e in g.adj_list(cur) {
            let n = e.other(cur);
            if !unvisited.contains(&n) {
                continue;
            }
            let candidate = base.saturating_add(u64::from(e.weight));
            let slot = dist.entry(n).or_insert(None);
            if slot.map_or(true, |d| candidate < d) {
                *slot = Some(candidate);
                previous.insert(n, Some(cur));
            }
        }
    }
    debug!(
        start,
        unreachable = unvisited.len(),
        "computed shortest paths"
    );
    ShortestPaths {
        start,
        dist,
        previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components_graph() -> Graph {
        let mut g = Graph::new();
        for v in 0..=9 {
            g.add_vertex(v);
        }
        for (a, b, w) in [
            (0, 2, 2),
            (1, 3, 1),
            (2, 5, 6),
            (3, 6, 1),
            (4, 5, 2),
            (4, 7, 2),
            (5, 8, 1),
            (6, 9, 1),
        ] {
            g.add_edge(a, b, w).unwrap();
        }
        g
    }

    fn weighted_graph() -> Graph {
        let mut g = Graph::new();
        for v in 0..=9 {
            g.add_vertex(v);
        }
        for (a, b, w) in [
            (0, 1, 1),
            (0, 2, 15),
            (0, 4, 4),
            (1, 3, 5),
            (2, 4, 1),
            (2, 6, 6),
            (3, 5, 5),
            (3, 6, 1),
            (4, 7, 2),
            (5, 7, 1),
            (5, 8, 8),
            (6, 9, 1),
            (7, 8, 1),
            (8, 9, 1),
        ] {
            g.add_edge(a, b, w).unwrap();
        }
        g
    }

    #[test]
    fn add_vertex_sorted_and_deduplicated() {
        let mut g = Graph::new();
        for v in [5, 1, 3, 1, 5] {
            g.add_vertex(v);
        }
        assert_eq!(g.vertices(), [1u32, 3, 5]);
        assert!(g.adj_list(3).is_empty());
        assert!(g.adj_list(42).is_empty());
    }

    #[test]
    fn add_edge_requires_both_vertices() {
        let mut g = Graph::new();
        g.add_vertex(0);
        assert_eq!(g.add_edge(0, 7, 1), Err(GraphError::UnknownVertex(7)));
        assert_eq!(g.add_edge(9, 0, 1), Err(GraphError::UnknownVertex(9)));
        g.add_vertex(7);
        g.add_edge(0, 7, 3).unwrap();
        assert_eq!(g.adj_list(0), [Edge::new(0, 7, 3)]);
        assert_eq!(g.adj_list(7), [Edge::new(0, 7, 3)]);
        assert_eq!(g.edges().count(), 1);
    }

    #[test]
    fn components_numbered_in_vertex_order() {
        let comp = connected_components(&components_graph());
        let expected: BTreeMap<u32, usize> = [
            (0, 1),
            (1, 2),
            (2, 1),
            (3, 2),
            (4, 1),
            (5, 1),
            (6, 2),
            (7, 1),
            (8, 1),
            (9, 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(comp, expected);
        assert!(connected_components(&Graph::new()).is_empty());
    }

    #[test]
    fn frontier_edge_is_lightest_crossing() {
        let g = weighted_graph();
        let mut visited = HashSet::new();
        assert_eq!(min_frontier_edge(&g, &visited), None);
        visited.insert(0);
        assert_eq!(min_frontier_edge(&g, &visited), Some(Edge::new(0, 1, 1)));
        visited.insert(1);
        assert_eq!(min_frontier_edge(&g, &visited), Some(Edge::new(0, 4, 4)));
    }

    /// Invariant: the MST spans every reachable vertex with n-1 edges of
    /// minimum total weight.
    #[test]
    fn mst_weight_and_shape() {
        let g = weighted_graph();
        let mst = minimum_spanning_tree(&g, 0);
        assert_eq!(mst.vertices(), g.vertices());
        assert_eq!(mst.edges().count(), 9);
        assert_eq!(mst.total_weight(), 13);
        let comp = connected_components(&mst);
        assert!(comp.values().all(|&c| c == 1));
    }

    #[test]
    fn mst_leaves_unreachable_vertices_isolated() {
        let mst = minimum_spanning_tree(&components_graph(), 0);
        assert_eq!(mst.edges().count(), 5);
        assert!(mst.adj_list(1).is_empty());
        let missing_start = minimum_spanning_tree(&components_graph(), 100);
        assert_eq!(missing_start.edges().count(), 0);
    }

    #[test]
    fn dijkstra_distances_and_paths() {
        let sp = shortest_path(&weighted_graph(), 0);
        let dists: Vec<Option<u64>> = (0..=9).map(|v| sp.distance(v)).collect();
        assert_eq!(
            dists,
            [0u64, 1, 5, 6, 4, 7, 7, 6, 7, 8].map(Some).to_vec()
        );
        assert_eq!(sp.previous(0), None);
        assert_eq!(sp.previous(2), Some(4));
        assert_eq!(sp.path_to(9), Some(vec![0, 1, 3, 6, 9]));
        assert_eq!(sp.path_to(0), Some(vec![0]));
    }

    #[test]
    fn dijkstra_unreachable_stays_none() {
        let sp = shortest_path(&components_graph(), 0);
        assert_eq!(sp.distance(8), Some(9));
        assert_eq!(sp.distance(1), None);
        assert_eq!(sp.previous(1), None);
        assert_eq!(sp.path_to(1), None);
        let report = sp.to_string();
        assert!(report.starts_with("Shortest Path Data\nStarting Vertex : 0\n"));
        assert!(report.contains("1\t∞\n"));
        assert!(report.contains("1\t-1\n"));
    }

    #[test]
    fn display_lists_adjacency() {
        let mut g = Graph::new();
        g.add_vertex(1);
        g.add_vertex(0);
        g.add_edge(0, 1, 4).unwrap();
        assert_eq!(
            g.to_string(),
            "V = { 0, 1 }\nAdj Lists\n0: [(0, 1, 4)]\n1: [(0, 1, 4)]\n"
        );
    }
}
