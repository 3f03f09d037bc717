//! Step-by-step Dijkstra over a bare undirected edge list.
//!
//! Unlike [`crate::graph::shortest_path`], no adjacency lists are built: each
//! visit scans the whole edge list. The distance/previous tables are
//! snapshotted after initialization and after every visited vertex.

use crate::graph::Edge;
use core::fmt;
use tracing::trace;

/// Tables as they stood after one step, aligned with the trace's vertex list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    /// `None` for the initialization snapshot.
    pub visited: Option<u32>,
    pub dist: Vec<Option<u64>>,
    pub previous: Vec<Option<u32>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DijkstraTrace {
    start: u32,
    vertices: Vec<u32>,
    steps: Vec<TraceStep>,
}

impl DijkstraTrace {
    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Order in which vertices were visited.
    pub fn visit_order(&self) -> Vec<u32> {
        self.steps.iter().filter_map(|s| s.visited).collect()
    }

    /// The last snapshot (the final tables).
    pub fn last_step(&self) -> Option<&TraceStep> {
        self.steps.last()
    }
}

/// Run Dijkstra from `start`, recording every step.
///
/// Among unvisited vertices with equal smallest distance the one listed last
/// is chosen. The run ends once every remaining vertex is unreachable.
pub fn trace_dijkstra(vertices: &[u32], edges: &[Edge], start: u32) -> DijkstraTrace {
    let mut dist: Vec<Option<u64>> = vertices
        .iter()
        .map(|&v| (v == start).then_some(0))
        .collect();
    let mut previous: Vec<Option<u32>> = vec![None; vertices.len()];
    let mut unvisited: Vec<usize> = (0..vertices.len()).collect();
    let mut steps = vec![TraceStep {
        visited: None,
        dist: dist.clone(),
        previous: previous.clone(),
    }];

    loop {
        let mut pick: Option<(usize, u64)> = None;
        for (pos, &i) in unvisited.iter().enumerate() {
            if let Some(d) = dist[i] {
                if pick.map_or(true, |(_, best)| d <= best) {
                    pick = Some((pos, d));
                }
            }
        }
        let Some((pos, base)) = pick else {
            break;
        };
        let cur_idx = unvisited.remove(pos);
        let cur = vertices[cur_idx];

        for e in edges.iter().filter(|e| e.touches(cur)) {
            let n = e.other(cur);
            let Some(n_idx) = unvisited.iter().copied().find(|&i| vertices[i] == n) else {
                continue;
            };
            let candidate = base.saturating_add(u64::from(e.weight));
            if dist[n_idx].map_or(true, |d| candidate < d) {
                dist[n_idx] = Some(candidate);
                previous[n_idx] = Some(cur);
            }
        }

        trace!(vertex = cur, distance = base, "visited vertex");
        steps.push(TraceStep {
            visited: Some(cur),
            dist: dist.clone(),
            previous: previous.clone(),
        });
    }

    DijkstraTrace {
        start,
        vertices: vertices.to_vec(),
        steps,
    }
}

const RULE: &str = "+--------+----------+----------+";

fn write_table(f: &mut fmt::Formatter<'_>, vertices: &[u32], step: &TraceStep) -> fmt::Result {
    writeln!(f, "{RULE}")?;
    writeln!(f, "| Vertex | Distance | Previous |")?;
    writeln!(f, "{RULE}")?;
    for (i, v) in vertices.iter().enumerate() {
        let d = step.dist[i].map_or_else(|| "∞".to_string(), |d| d.to_string());
        let p = step.previous[i].map_or_else(|| "-1".to_string(), |p| p.to_string());
        writeln!(f, "|   {v}    | {d:<8} |    {p}     |")?;
    }
    writeln!(f, "{RULE}")
}

impl fmt::Display for DijkstraTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Starting Vertex: {}", self.start)?;
        writeln!(f)?;
        for step in &self.steps {
            match step.visited {
                None => writeln!(f, "Initialization:")?,
                Some(v) => writeln!(f, "After Visiting Vertex {v}:")?,
            }
            write_table(f, &self.vertices, step)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
