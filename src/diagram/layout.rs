//! Layered layout for flowcharts
//!
//! Nodes are assigned to ranks by longest path (back edges reversed), ordered
//! within a rank by a single barycenter pass that keeps subgraph members
//! adjacent, then placed on a cell grid. Edges are routed as orthogonal
//! polylines through the channel in front of the destination rank.
//! `BT` and `RL` are laid out as `TB`/`LR` and mirrored.

use super::parser::{FlowDirection, Flowchart, NodeShape};
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

/// Gap between ranks in top-bottom layouts (rows)
const RANK_GAP: i64 = 3;
/// Rank gap when an incoming edge carries a label
const LABELLED_RANK_GAP: i64 = 4;
/// Gap between nodes inside a top-bottom rank (columns)
const NODE_GAP_TB: i64 = 4;
/// Minimum gap between left-right columns
const MIN_COLUMN_GAP: i64 = 6;
/// Gap between nodes stacked in a left-right column (rows)
const NODE_GAP_LR: i64 = 2;

/// Rectangle in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CellRect {
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Whether two rectangles share at least one cell
    #[cfg(test)]
    pub fn intersects(&self, other: &CellRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Routed edge: orthogonal polyline from just outside the source box to
/// the cell just outside the destination box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRoute {
    pub edge: usize,
    pub points: Vec<(usize, usize)>,
    pub label: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterFrame {
    pub subgraph: usize,
    pub rect: CellRect,
}

/// Result of laying out a flowchart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLayout {
    pub width: usize,
    pub height: usize,
    /// Indexed by node
    pub boxes: Vec<CellRect>,
    pub routes: Vec<EdgeRoute>,
    pub clusters: Vec<ClusterFrame>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Signed working geometry (normalized at the end)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

struct Route {
    edge: usize,
    points: Vec<(i64, i64)>,
    label: Option<(i64, i64)>,
}

struct ClusterRect {
    subgraph: usize,
    rect: Rect,
}

/// Display width of a node's widest label line plus its border and padding
pub fn node_size(lines: &[String], shape: NodeShape) -> (usize, usize) {
    let text_width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let extra = match shape {
        NodeShape::Diamond | NodeShape::Hexagon | NodeShape::Circle => 6,
        _ => 4,
    };
    (text_width + extra, lines.len() + 2)
}

/// Lay out a parsed flowchart on a cell grid
pub fn layout_flowchart(chart: &Flowchart) -> DiagramLayout {
    let node_count = chart.nodes.len();
    let reversed = find_back_edges(chart);
    let ranks = assign_ranks(chart, &reversed);
    let rank_count = ranks.iter().copied().max().map_or(0, |r| r + 1);
    let order = order_ranks(chart, &ranks, &reversed, rank_count);

    let sizes: Vec<(i64, i64)> = chart
        .nodes
        .iter()
        .map(|n| {
            let (w, h) = node_size(&n.label, n.shape);
            (w as i64, h as i64)
        })
        .collect();

    let label_width = |edge: usize| -> i64 {
        chart.edges[edge]
            .label
            .as_ref()
            .map_or(0, |l| l.width() as i64)
    };

    let horizontal = chart.direction.is_horizontal();
    let mut boxes = vec![Rect { x: 0, y: 0, w: 0, h: 0 }; node_count];
    let mut routes = Vec::new();

    if horizontal {
        // Columns advance left to right
        let max_label = (0..chart.edges.len()).map(label_width).max().unwrap_or(0);
        let gap = MIN_COLUMN_GAP.max(max_label + 5);

        let column_widths: Vec<i64> = order
            .iter()
            .map(|rank| rank.iter().map(|&n| sizes[n].0).max().unwrap_or(0))
            .collect();
        let column_heights: Vec<i64> = order
            .iter()
            .map(|rank| {
                let total: i64 = rank.iter().map(|&n| sizes[n].1).sum();
                total + NODE_GAP_LR * (rank.len() as i64 - 1).max(0)
            })
            .collect();
        let max_height = column_heights.iter().copied().max().unwrap_or(0);

        let mut column_x = vec![0i64; rank_count];
        for r in 1..rank_count {
            column_x[r] = column_x[r - 1] + column_widths[r - 1] + gap;
        }

        for (r, rank) in order.iter().enumerate() {
            let mut y = (max_height - column_heights[r]) / 2;
            for &n in rank {
                boxes[n] = Rect { x: column_x[r], y, w: sizes[n].0, h: sizes[n].1 };
                y += sizes[n].1 + NODE_GAP_LR;
            }
        }

        let mut back_lane = 0i64;
        for (idx, edge) in chart.edges.iter().enumerate() {
            if edge.from == edge.to {
                continue;
            }
            let src = boxes[edge.from];
            let dst = boxes[edge.to];
            if reversed[idx] {
                // Underneath everything, entering the destination from below
                let lane = max_height + 1 + 2 * back_lane;
                back_lane += 1;
                let sx = src.x + src.w / 2;
                let dx = dst.x + dst.w / 2;
                routes.push(Route {
                    edge: idx,
                    points: vec![(sx, src.y + src.h), (sx, lane), (dx, lane), (dx, dst.y + dst.h)],
                    label: edge.label.as_ref().map(|_| (dx.min(sx) + 2, lane)),
                });
            } else {
                let sy = src.y + src.h / 2;
                let dy = dst.y + dst.h / 2;
                let mid = column_x[ranks[edge.to]] - gap + 1;
                routes.push(Route {
                    edge: idx,
                    points: vec![(src.x + src.w, sy), (mid, sy), (mid, dy), (dst.x - 1, dy)],
                    label: edge.label.as_ref().map(|_| (mid + 2, dy)),
                });
            }
        }
    } else {
        // Rows advance top to bottom
        let mut gaps = vec![RANK_GAP; rank_count];
        for (idx, edge) in chart.edges.iter().enumerate() {
            if !reversed[idx] && edge.label.is_some() && edge.from != edge.to {
                gaps[ranks[edge.to]] = LABELLED_RANK_GAP;
            }
        }

        let rank_heights: Vec<i64> = order
            .iter()
            .map(|rank| rank.iter().map(|&n| sizes[n].1).max().unwrap_or(0))
            .collect();
        let rank_widths: Vec<i64> = order
            .iter()
            .map(|rank| {
                let total: i64 = rank.iter().map(|&n| sizes[n].0).sum();
                total + NODE_GAP_TB * (rank.len() as i64 - 1).max(0)
            })
            .collect();
        let max_width = rank_widths.iter().copied().max().unwrap_or(0);

        let mut rank_y = vec![0i64; rank_count];
        for r in 1..rank_count {
            rank_y[r] = rank_y[r - 1] + rank_heights[r - 1] + gaps[r];
        }

        for (r, rank) in order.iter().enumerate() {
            let mut x = (max_width - rank_widths[r]) / 2;
            for &n in rank {
                boxes[n] = Rect { x, y: rank_y[r], w: sizes[n].0, h: sizes[n].1 };
                x += sizes[n].0 + NODE_GAP_TB;
            }
        }

        let mut back_lane = 0i64;
        for (idx, edge) in chart.edges.iter().enumerate() {
            if edge.from == edge.to {
                continue;
            }
            let src = boxes[edge.from];
            let dst = boxes[edge.to];
            if reversed[idx] {
                // Right of everything, entering the destination from the right
                let lane = max_width + 1 + 2 * back_lane;
                back_lane += 1;
                let sy = src.y + src.h / 2;
                let dy = dst.y + dst.h / 2;
                routes.push(Route {
                    edge: idx,
                    points: vec![(src.x + src.w, sy), (lane, sy), (lane, dy), (dst.x + dst.w, dy)],
                    label: edge.label.as_ref().map(|_| (lane + 2, (sy + dy) / 2)),
                });
            } else {
                let sx = src.x + src.w / 2;
                let dx = dst.x + dst.w / 2;
                let dst_rank = ranks[edge.to];
                let channel_top = rank_y[dst_rank] - gaps[dst_rank];
                let mid = channel_top + 1;
                routes.push(Route {
                    edge: idx,
                    points: vec![(sx, src.y + src.h), (sx, mid), (dx, mid), (dx, dst.y - 1)],
                    label: edge.label.as_ref().map(|_| (dx + 2, mid + 1)),
                });
            }
        }
    }

    let mut clusters = cluster_rects(chart, &boxes);

    // Mirror for bottom-top and right-left
    match chart.direction {
        FlowDirection::BottomTop => {
            let extent = extent_of(&boxes, &routes, &clusters, |r| (r.y, r.y + r.h), |p| p.1);
            mirror(&mut boxes, &mut routes, &mut clusters, extent, false, chart);
        }
        FlowDirection::RightLeft => {
            let extent = extent_of(&boxes, &routes, &clusters, |r| (r.x, r.x + r.w), |p| p.0);
            mirror(&mut boxes, &mut routes, &mut clusters, extent, true, chart);
        }
        _ => {}
    }

    normalize(chart, boxes, routes, clusters)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Ranking
// ═══════════════════════════════════════════════════════════════════════════════

/// Mark edges that close a cycle, visiting nodes and edges in declaration order
fn find_back_edges(chart: &Flowchart) -> Vec<bool> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); chart.nodes.len()];
    for (idx, edge) in chart.edges.iter().enumerate() {
        outgoing[edge.from].push(idx);
    }

    let mut marks = vec![Mark::Unvisited; chart.nodes.len()];
    let mut reversed = vec![false; chart.edges.len()];

    for root in 0..chart.nodes.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        // Iterative DFS: (node, next outgoing edge position)
        let mut stack = vec![(root, 0usize)];
        marks[root] = Mark::OnStack;

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            if let Some(&edge) = outgoing[node].get(top.1) {
                top.1 += 1;
                let target = chart.edges[edge].to;
                match marks[target] {
                    Mark::Unvisited => {
                        marks[target] = Mark::OnStack;
                        stack.push((target, 0));
                    }
                    Mark::OnStack => reversed[edge] = true,
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                stack.pop();
            }
        }
    }

    reversed
}

/// Longest-path ranks over the acyclic orientation of the graph
fn assign_ranks(chart: &Flowchart, reversed: &[bool]) -> Vec<usize> {
    let n = chart.nodes.len();
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut indegree = vec![0usize; n];

    for (idx, edge) in chart.edges.iter().enumerate() {
        if edge.from == edge.to {
            continue;
        }
        let (from, to) = if reversed[idx] {
            (edge.to, edge.from)
        } else {
            (edge.from, edge.to)
        };
        successors[from].push(to);
        indegree[to] += 1;
    }

    let mut ranks = vec![0usize; n];
    let mut queue: Vec<usize> = (0..n).filter(|&v| indegree[v] == 0).collect();
    let mut head = 0;
    while head < queue.len() {
        let v = queue[head];
        head += 1;
        for &s in &successors[v] {
            ranks[s] = ranks[s].max(ranks[v] + 1);
            indegree[s] -= 1;
            if indegree[s] == 0 {
                queue.push(s);
            }
        }
    }

    ranks
}

/// Order nodes inside each rank
fn order_ranks(
    chart: &Flowchart,
    ranks: &[usize],
    reversed: &[bool],
    rank_count: usize,
) -> Vec<Vec<usize>> {
    let mut order: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
    for (node, &rank) in ranks.iter().enumerate() {
        order[rank].push(node);
    }

    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); chart.nodes.len()];
    for (idx, edge) in chart.edges.iter().enumerate() {
        if edge.from == edge.to {
            continue;
        }
        if reversed[idx] {
            predecessors[edge.from].push(edge.to);
        } else {
            predecessors[edge.to].push(edge.from);
        }
    }

    let mut position: HashMap<usize, f64> = HashMap::new();
    if let Some(first) = order.first_mut() {
        let declared: HashMap<usize, f64> = first
            .iter()
            .enumerate()
            .map(|(pos, &node)| (node, pos as f64))
            .collect();
        group_by_cluster(chart, first, &declared);
        for (pos, &node) in first.iter().enumerate() {
            position.insert(node, pos as f64);
        }
    }

    for r in 1..rank_count {
        let mut barycenters: HashMap<usize, f64> = HashMap::new();
        for (pos, &node) in order[r].iter().enumerate() {
            let placed: Vec<f64> = predecessors[node]
                .iter()
                .filter_map(|p| position.get(p).copied())
                .collect();
            let value = if placed.is_empty() {
                pos as f64
            } else {
                placed.iter().sum::<f64>() / placed.len() as f64
            };
            barycenters.insert(node, value);
        }
        order[r].sort_by(|a, b| barycenters[a].total_cmp(&barycenters[b]));
        group_by_cluster(chart, &mut order[r], &barycenters);
        for (pos, &node) in order[r].iter().enumerate() {
            position.insert(node, pos as f64);
        }
    }

    order
}

/// Stable regrouping so nodes sharing an outermost subgraph sit together
fn group_by_cluster(chart: &Flowchart, rank: &mut [usize], weight: &HashMap<usize, f64>) {
    let key = |node: usize| -> Option<usize> { chart.subgraph_chain(node).last().copied() };

    let mut group_weight: HashMap<Option<usize>, f64> = HashMap::new();
    for (pos, &node) in rank.iter().enumerate() {
        let w = weight.get(&node).copied().unwrap_or(pos as f64);
        if let Some(group) = key(node) {
            let entry = group_weight.entry(Some(group)).or_insert(w);
            *entry = entry.min(w);
        }
    }

    let original: HashMap<usize, usize> = rank.iter().enumerate().map(|(p, &n)| (n, p)).collect();
    rank.sort_by(|&a, &b| {
        let weight_of = |node: usize| match key(node) {
            Some(group) => group_weight[&Some(group)],
            None => weight.get(&node).copied().unwrap_or(original[&node] as f64),
        };
        weight_of(a)
            .total_cmp(&weight_of(b))
            .then_with(|| key(a).cmp(&key(b)))
            .then_with(|| original[&a].cmp(&original[&b]))
    });
}

// ═══════════════════════════════════════════════════════════════════════════════
// Clusters, mirroring and normalization
// ═══════════════════════════════════════════════════════════════════════════════

fn cluster_rects(chart: &Flowchart, boxes: &[Rect]) -> Vec<ClusterRect> {
    // Nesting depth below each subgraph, so outer frames enclose inner ones
    let mut inner_depth = vec![0i64; chart.subgraphs.len()];
    for idx in 0..chart.subgraphs.len() {
        let mut depth = 0;
        let mut current = chart.subgraphs[idx].parent;
        while let Some(parent) = current {
            depth += 1;
            inner_depth[parent] = inner_depth[parent].max(depth);
            current = chart.subgraphs[parent].parent;
        }
    }

    let mut frames = Vec::new();
    for sub_idx in 0..chart.subgraphs.len() {
        let members: Vec<&Rect> = (0..chart.nodes.len())
            .filter(|&n| chart.subgraph_chain(n).contains(&sub_idx))
            .map(|n| &boxes[n])
            .collect();
        if members.is_empty() {
            continue;
        }

        let pad = 1 + inner_depth[sub_idx];
        let min_x = members.iter().map(|r| r.x).min().unwrap_or(0) - pad;
        let min_y = members.iter().map(|r| r.y).min().unwrap_or(0) - pad - 1;
        let max_x = members.iter().map(|r| r.x + r.w).max().unwrap_or(0) + pad;
        let max_y = members.iter().map(|r| r.y + r.h).max().unwrap_or(0) + pad;

        let title_width = chart.subgraphs[sub_idx].title.width() as i64 + 4;
        let width = (max_x - min_x).max(title_width);

        frames.push(ClusterRect {
            subgraph: sub_idx,
            rect: Rect { x: min_x, y: min_y, w: width, h: max_y - min_y },
        });
    }
    frames
}

/// Lowest and highest coordinate along one axis
fn extent_of(
    boxes: &[Rect],
    routes: &[Route],
    clusters: &[ClusterRect],
    span: impl Fn(&Rect) -> (i64, i64),
    coord: impl Fn(&(i64, i64)) -> i64,
) -> i64 {
    let mut max = 0;
    for r in boxes.iter().chain(clusters.iter().map(|c| &c.rect)) {
        max = max.max(span(r).1);
    }
    for route in routes {
        for p in &route.points {
            max = max.max(coord(p) + 1);
        }
    }
    max
}

fn mirror(
    boxes: &mut [Rect],
    routes: &mut [Route],
    clusters: &mut [ClusterRect],
    extent: i64,
    horizontal: bool,
    chart: &Flowchart,
) {
    let flip_rect = |r: &mut Rect| {
        if horizontal {
            r.x = extent - r.x - r.w;
        } else {
            r.y = extent - r.y - r.h;
        }
    };
    for r in boxes.iter_mut() {
        flip_rect(r);
    }
    for c in clusters.iter_mut() {
        flip_rect(&mut c.rect);
    }
    for route in routes.iter_mut() {
        for p in route.points.iter_mut() {
            if horizontal {
                p.0 = extent - 1 - p.0;
            } else {
                p.1 = extent - 1 - p.1;
            }
        }
        let label_len = chart.edges[route.edge]
            .label
            .as_ref()
            .map_or(0, |l| l.width() as i64);
        if let Some(label) = route.label.as_mut() {
            if horizontal {
                label.0 = extent - label.0 - label_len;
            } else {
                label.1 = extent - 1 - label.1;
            }
        }
    }
}

fn normalize(
    chart: &Flowchart,
    boxes: Vec<Rect>,
    routes: Vec<Route>,
    clusters: Vec<ClusterRect>,
) -> DiagramLayout {
    let mut min_x = i64::MAX;
    let mut min_y = i64::MAX;
    let mut max_x = i64::MIN;
    let mut max_y = i64::MIN;

    let mut include = |x0: i64, y0: i64, x1: i64, y1: i64| {
        min_x = min_x.min(x0);
        min_y = min_y.min(y0);
        max_x = max_x.max(x1);
        max_y = max_y.max(y1);
    };

    for r in boxes.iter().chain(clusters.iter().map(|c| &c.rect)) {
        include(r.x, r.y, r.x + r.w, r.y + r.h);
    }
    for route in &routes {
        for &(x, y) in &route.points {
            include(x, y, x + 1, y + 1);
        }
        if let Some((x, y)) = route.label {
            let len = chart.edges[route.edge]
                .label
                .as_ref()
                .map_or(0, |l| l.width() as i64);
            include(x, y, x + len, y + 1);
        }
    }

    if min_x == i64::MAX {
        return DiagramLayout {
            width: 0,
            height: 0,
            boxes: Vec::new(),
            routes: Vec::new(),
            clusters: Vec::new(),
        };
    }

    let to_cell = |r: &Rect| CellRect {
        x: (r.x - min_x) as usize,
        y: (r.y - min_y) as usize,
        width: r.w.max(0) as usize,
        height: r.h.max(0) as usize,
    };

    DiagramLayout {
        width: (max_x - min_x) as usize,
        height: (max_y - min_y) as usize,
        boxes: boxes.iter().map(to_cell).collect(),
        routes: routes
            .into_iter()
            .map(|route| EdgeRoute {
                edge: route.edge,
                points: route
                    .points
                    .iter()
                    .map(|&(x, y)| ((x - min_x) as usize, (y - min_y) as usize))
                    .collect(),
                label: route
                    .label
                    .map(|(x, y)| ((x - min_x) as usize, (y - min_y) as usize)),
            })
            .collect(),
        clusters: clusters
            .iter()
            .map(|c| ClusterFrame {
                subgraph: c.subgraph,
                rect: to_cell(&c.rect),
            })
            .collect(),
    }
}
