// Incremental beeswarm placement.
//
// Points arrive sorted by value and all start on the midline. Each point is
// moved sideways only as far as the already-placed points force it to.
// Deterministic: no randomness, no iteration budgets.

use super::candidates::{find_neighbors, generate_candidates};
use crate::error::PlacementExhausted;
use crate::geometry::Point;

/// Place `origin` (value-sorted, swarm frame, shared midline) without overlaps.
///
/// The midline is the categorical coordinate of the first point. Only the
/// categorical coordinate of each point changes; values are left untouched.
pub fn build_swarm(origin: &[Point], d: f64) -> Result<Vec<Point>, PlacementExhausted> {
    let Some(&first) = origin.first() else {
        return Ok(Vec::new());
    };
    let midline = first.x;

    let mut swarm = Vec::with_capacity(origin.len());
    swarm.push(first);

    for &point in &origin[1..] {
        let neighbors = find_neighbors(point, &swarm, d);
        let candidates = generate_candidates(point, &neighbors, d, midline);
        let placed = first_non_overlapping(&candidates, &neighbors, d)
            .ok_or(PlacementExhausted { placed: swarm.len() })?;
        swarm.push(placed);
    }

    Ok(swarm)
}

/// Categorical offsets from a zero midline for already-sorted values.
pub fn swarm_offsets(sorted_values: &[f64], d: f64) -> Result<Vec<f64>, PlacementExhausted> {
    let origin: Vec<Point> = sorted_values.iter().map(|&v| Point::new(0.0, v)).collect();
    Ok(build_swarm(&origin, d)?.into_iter().map(|p| p.x).collect())
}

/// First candidate that clears every neighbor, not just the one it was built from.
fn first_non_overlapping(candidates: &[Point], neighbors: &[Point], d: f64) -> Option<Point> {
    if neighbors.is_empty() {
        return candidates.first().copied();
    }
    let d_sq = d * d;
    candidates
        .iter()
        .find(|c| neighbors.iter().all(|n| c.dist_sq(n) >= d_sq))
        .copied()
}
