// Candidate generation for swarm placement.
//
// A point can only collide with already-placed points whose value lies within
// one diameter of its own. For each such neighbor there are exactly two
// categorical offsets at which the point just touches it; those are the
// candidates, tried from the midline outward.

use crate::geometry::Point;

/// Safety margin applied to the touching offset so rounding never reports a
/// false overlap against the neighbor that generated the candidate.
const CLEARANCE: f64 = 1.05;

/// Collect the swarm points that could overlap `point`.
///
/// `swarm` must be sorted by value and hold only values <= `point.y`. The scan
/// runs backward and stops at the first point one diameter or more away, so
/// the result is ordered nearest first.
pub fn find_neighbors(point: Point, swarm: &[Point], d: f64) -> Vec<Point> {
    swarm
        .iter()
        .rev()
        .take_while(|p| (point.y - p.y).abs() < d)
        .copied()
        .collect()
}

/// Candidate positions for `point`, most central first.
///
/// The unperturbed position comes first in generation order; each neighbor then
/// contributes its left and right touching positions, alternating which side is
/// pushed first so the swarm doesn't lean to one side. The final order is a
/// stable sort on distance from `midline`.
pub fn generate_candidates(point: Point, neighbors: &[Point], d: f64, midline: f64) -> Vec<Point> {
    let mut candidates = Vec::with_capacity(1 + 2 * neighbors.len());
    candidates.push(point);

    let mut left_first = true;
    for n in neighbors {
        let dy = point.y - n.y;
        let dx = (d * d - dy * dy).sqrt() * CLEARANCE;
        let left = Point::new(n.x - dx, point.y);
        let right = Point::new(n.x + dx, point.y);
        if left_first {
            candidates.push(left);
            candidates.push(right);
        } else {
            candidates.push(right);
            candidates.push(left);
        }
        left_first = !left_first;
    }

    candidates.sort_by(|a, b| (a.x - midline).abs().total_cmp(&(b.x - midline).abs()));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_stop_at_first_distant_point() {
        let swarm = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(0.0, 9.5),
            Point::new(0.0, 9.8),
        ];
        let n = find_neighbors(Point::new(0.0, 10.0), &swarm, 1.0);
        // Nearest first
        assert_eq!(n, vec![Point::new(0.0, 9.8), Point::new(0.0, 9.5)]);
    }

    #[test]
    fn test_neighbors_exclude_exactly_one_diameter() {
        let swarm = vec![Point::new(0.0, 9.0)];
        assert!(find_neighbors(Point::new(0.0, 10.0), &swarm, 1.0).is_empty());
    }

    #[test]
    fn test_neighbors_empty_swarm() {
        assert!(find_neighbors(Point::new(0.0, 0.0), &[], 1.0).is_empty());
    }

    #[test]
    fn test_candidates_without_neighbors() {
        let p = Point::new(3.0, 1.0);
        assert_eq!(generate_candidates(p, &[], 1.0, 3.0), vec![p]);
    }

    #[test]
    fn test_candidates_single_neighbor_same_value() {
        let p = Point::new(0.0, 0.0);
        let c = generate_candidates(p, &[Point::new(0.0, 0.0)], 1.0, 0.0);

        assert_eq!(c.len(), 3);
        assert_eq!(c[0], p);
        // Left comes first on a tie in centrality
        assert!((c[1].x + 1.05).abs() < 1e-12);
        assert!((c[2].x - 1.05).abs() < 1e-12);
        // Candidates keep the point's own value
        assert!(c.iter().all(|q| q.y == 0.0));
    }

    #[test]
    fn test_candidates_alternate_sides() {
        let p = Point::new(0.0, 0.0);
        let neighbors = [Point::new(-1.05, 0.0), Point::new(0.0, 0.0)];
        let c = generate_candidates(p, &neighbors, 1.0, 0.0);

        // Generation order: p, -2.1, 0.0 (from the first, left first),
        // 1.05, -1.05 (from the second, right first). Stable sort keeps ties.
        let xs: Vec<f64> = c.iter().map(|q| (q.x * 100.0).round() / 100.0).collect();
        assert_eq!(xs, vec![0.0, 0.0, 1.05, -1.05, -2.1]);
    }

    #[test]
    fn test_candidate_offset_shrinks_with_value_gap() {
        let p = Point::new(0.0, 0.6);
        let c = generate_candidates(p, &[Point::new(0.0, 0.0)], 1.0, 0.0);
        // sqrt(1 - 0.36) = 0.8, times the clearance margin
        assert!((c[1].x + 0.84).abs() < 1e-12);
        assert!((c[2].x - 0.84).abs() < 1e-12);
    }
}
