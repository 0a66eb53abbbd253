use std::collections::HashSet;

use glam::IVec2;

use crate::world_core::random::SeededRandom;

const JITTER_MIN: f64 = 0.8;
const JITTER_SPAN: f64 = 0.4;
const EXTRA_EDGE_RATIO: f64 = 0.2;
const EXTRA_EDGE_MAX_WEIGHT: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathLink {
    pub from: IVec2,
    pub to: IVec2,
}

/// Prim's minimum spanning tree over a dense graph of `count` vertices.
///
/// Returns `(in_tree, added)` index pairs in the order vertices join the tree.
/// Ties resolve to the lowest vertex index. Shared by the world path graph and
/// the settlement path network.
pub fn prim_mst<F>(count: usize, start: usize, weight: F) -> Vec<(usize, usize)>
where
    F: Fn(usize, usize) -> f64,
{
    if count < 2 || start >= count {
        return Vec::new();
    }

    let mut in_tree = vec![false; count];
    let mut best_cost = vec![f64::INFINITY; count];
    let mut best_parent = vec![start; count];
    in_tree[start] = true;
    for v in 0..count {
        if v != start {
            best_cost[v] = weight(start, v);
        }
    }

    let mut edges = Vec::with_capacity(count - 1);
    for _ in 1..count {
        let mut next: Option<usize> = None;
        for v in 0..count {
            if in_tree[v] {
                continue;
            }
            match next {
                Some(n) if best_cost[v] >= best_cost[n] => {}
                _ => next = Some(v),
            }
        }
        let Some(v) = next else { break };

        in_tree[v] = true;
        edges.push((best_parent[v], v));
        for u in 0..count {
            if !in_tree[u] {
                let w = weight(v, u);
                if w < best_cost[u] {
                    best_cost[u] = w;
                    best_parent[u] = v;
                }
            }
        }
    }

    edges
}

/// Connects every point with a jittered MST rooted at `points[0]`, then adds
/// `floor(n * 0.2)` short bonus edges for alternate routes. The bonus edges are
/// additive only, so the graph stays connected.
pub fn generate_paths(points: &[IVec2], random: &mut SeededRandom) -> Vec<PathLink> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut weights = vec![0.0f64; n * n];
    let mut candidates: Vec<(usize, usize, f64)> = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let distance = points[i].as_dvec2().distance(points[j].as_dvec2());
            let w = distance * (JITTER_MIN + random.next() * JITTER_SPAN);
            weights[i * n + j] = w;
            weights[j * n + i] = w;
            candidates.push((i, j, w));
        }
    }

    let tree = prim_mst(n, 0, |a, b| weights[a * n + b]);
    let mut existing: HashSet<(usize, usize)> = tree
        .iter()
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect();
    let mut links: Vec<PathLink> = tree
        .iter()
        .map(|&(a, b)| PathLink {
            from: points[a],
            to: points[b],
        })
        .collect();

    candidates.sort_by(|a, b| a.2.total_cmp(&b.2));
    let shuffled = random.shuffle(&candidates);
    let extra_count = (n as f64 * EXTRA_EDGE_RATIO).floor() as usize;
    let mut added = 0;
    for (i, j, w) in shuffled {
        if added >= extra_count {
            break;
        }
        if w >= EXTRA_EDGE_MAX_WEIGHT || !existing.insert((i, j)) {
            continue;
        }
        links.push(PathLink {
            from: points[i],
            to: points[j],
        });
        added += 1;
    }

    links
}
