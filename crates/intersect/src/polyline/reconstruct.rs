//! Rebuild ordered polylines from an unordered segment soup.
//!
//! Segments live in an arena addressed by their input index, with a `used` flag
//! per segment. A hash grid keyed on quantized endpoint coordinates narrows the
//! search for a connecting endpoint; the exact Euclidean distance decides.
//!
//! Chaining is greedy and order-dependent. Seeds are taken in input order, and
//! at a junction the closest unused endpoint wins. Exact distance ties go to the
//! first candidate met while scanning the 3x3x3 neighbour cells with dx, dy and
//! dz each running from -1 to 1; within a cell, ascending segment index, start
//! endpoint before end endpoint.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, instrument, warn};

use super::Polyline;
use crate::geometry::line::Line;
use crate::geometry::point::Point3d;

type CellKey = (i64, i64, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Start,
    End,
}

/// One endpoint of one segment in the arena.
#[derive(Debug, Clone, Copy)]
struct EndpointRef {
    segment: usize,
    end: End,
}

impl EndpointRef {
    fn point(&self, segments: &[Line]) -> Point3d {
        let seg = &segments[self.segment];
        match self.end {
            End::Start => seg.start,
            End::End => seg.end,
        }
    }

    /// The opposite endpoint of the same segment.
    fn far_point(&self, segments: &[Line]) -> Point3d {
        let seg = &segments[self.segment];
        match self.end {
            End::Start => seg.end,
            End::End => seg.start,
        }
    }
}

/// Broad-phase spatial hash over segment endpoints, cell size = tolerance.
struct EndpointGrid {
    tol: f64,
    cells: HashMap<CellKey, Vec<EndpointRef>>,
}

impl EndpointGrid {
    fn build(segments: &[Line], used: &[bool], tol: f64) -> Self {
        let mut grid = Self {
            tol,
            cells: HashMap::new(),
        };
        for (segment, seg) in segments.iter().enumerate() {
            if used[segment] {
                continue;
            }
            for (end, p) in [(End::Start, seg.start), (End::End, seg.end)] {
                grid.cells
                    .entry(grid.key(&p))
                    .or_default()
                    .push(EndpointRef { segment, end });
            }
        }
        grid
    }

    /// Float-to-int casts saturate, so far-out coordinates share the edge cells.
    fn key(&self, p: &Point3d) -> CellKey {
        (
            (p.x / self.tol).round() as i64,
            (p.y / self.tol).round() as i64,
            (p.z / self.tol).round() as i64,
        )
    }

    /// Closest endpoint of an unused segment strictly within tolerance of `p`.
    fn nearest_unused(&self, p: &Point3d, segments: &[Line], used: &[bool]) -> Option<EndpointRef> {
        let (cx, cy, cz) = self.key(p);
        let mut best: Option<(f64, EndpointRef)> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = (cx.saturating_add(dx), cy.saturating_add(dy), cz.saturating_add(dz));
                    let Some(bucket) = self.cells.get(&cell) else {
                        continue;
                    };
                    for candidate in bucket {
                        if used[candidate.segment] {
                            continue;
                        }
                        let dist = candidate.point(segments).distance_to(p);
                        if dist < self.tol && best.map_or(true, |(d, _)| dist < d) {
                            best = Some((dist, *candidate));
                        }
                    }
                }
            }
        }

        best.map(|(_, r)| r)
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Tail,
    Head,
}

/// Reconstruct open and closed polylines from an unordered set of segments.
///
/// Zero-length segments (endpoints tolerance-equal) are discarded. A non-finite
/// or non-positive tolerance is malformed input: it is logged and yields no
/// polylines.
#[instrument(skip_all, fields(segments = segments.len()))]
pub fn reconstruct_polylines(segments: &[Line], tol: f64) -> Vec<Polyline> {
    if !(tol.is_finite() && tol > 0.0) {
        warn!(tol, "invalid tolerance for polyline reconstruction");
        return Vec::new();
    }

    let mut used: Vec<bool> = segments.iter().map(|s| s.is_degenerate(tol)).collect();
    let grid = EndpointGrid::build(segments, &used, tol);

    let mut polylines = Vec::new();
    for seed in 0..segments.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        polylines.push(grow_chain(seed, segments, &grid, &mut used, tol));
    }

    debug!(
        polylines = polylines.len(),
        closed = polylines.iter().filter(|p| p.is_closed).count(),
        "polyline reconstruction complete"
    );
    polylines
}

fn grow_chain(
    seed: usize,
    segments: &[Line],
    grid: &EndpointGrid,
    used: &mut [bool],
    tol: f64,
) -> Polyline {
    let seg = &segments[seed];
    let mut chain: VecDeque<Point3d> = VecDeque::from([seg.start, seg.end]);

    let mut closed = extend(&mut chain, Side::Tail, segments, grid, used, tol);
    if !closed {
        closed = extend(&mut chain, Side::Head, segments, grid, used, tol);
    }

    if !closed && chain.len() > 2 && chain[0].approx_eq(&chain[chain.len() - 1], tol) {
        closed = true;
        chain.pop_back();
    }

    Polyline::new(chain.into(), closed)
}

/// Walk from one end of the chain until no connection remains or the loop closes.
/// Returns `true` if the chain closed on itself.
fn extend(
    chain: &mut VecDeque<Point3d>,
    side: Side,
    segments: &[Line],
    grid: &EndpointGrid,
    used: &mut [bool],
    tol: f64,
) -> bool {
    loop {
        let (tip, opposite) = match side {
            Side::Tail => (chain[chain.len() - 1], chain[0]),
            Side::Head => (chain[0], chain[chain.len() - 1]),
        };

        let Some(hit) = grid.nearest_unused(&tip, segments, used) else {
            return false;
        };
        used[hit.segment] = true;

        let far = hit.far_point(segments);
        if far.approx_eq(&opposite, tol) {
            return true;
        }
        // Both ends of a just-over-tolerance segment can sit on the tip.
        if far.approx_eq(&tip, tol) {
            continue;
        }

        match side {
            Side::Tail => chain.push_back(far),
            Side::Head => chain.push_front(far),
        }
    }
}
