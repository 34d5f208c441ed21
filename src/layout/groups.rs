// Group planning: which records swarm together, where each swarm is centered,
// and how wide a band it may occupy.
//
// Category i is centered at categorical coordinate i. With dodging, each hue
// level gets its own evenly spaced sub-band inside the category slot.

use std::cmp::Ordering;

use indexmap::IndexSet;

use super::{GroupKey, LayoutConfig};
use crate::input::DataPoint;

/// Fraction of a dodged sub-band a swarm may use; leaves a hairline between bands.
const NESTED_WIDTH_FACTOR: f64 = 0.98;

/// One swarm to build.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    pub key: GroupKey,
    /// Categorical coordinate of the midline, in data units.
    pub center: f64,
    /// Full width of the allotted band, in data units.
    pub width: f64,
    /// Input indices, sorted by value (stable on ties).
    pub members: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupPlan {
    pub groups: Vec<GroupSpec>,
    /// Input indices that belong to no group.
    pub skipped: Vec<usize>,
}

pub fn plan_groups(points: &[DataPoint], cfg: &LayoutConfig) -> GroupPlan {
    let value_scale = cfg.value_scale();
    let categories = category_order(points, cfg);
    let placeable = |p: &DataPoint| {
        fits_in_pixels(p.value, value_scale) && categories.contains(p.category.as_str())
    };
    let hues = hue_levels(points, cfg, placeable);
    let dodge = cfg.dodge && !hues.is_empty();

    // Groups are laid out category-major so the index of (i, j) is i * per + j.
    let per_category = if dodge { hues.len() } else { 1 };
    let offsets = hue_offsets(hues.len(), cfg.slot_width, cfg.dodge_offset_scale);
    let band = if dodge { nested_width(hues.len(), cfg.slot_width) } else { cfg.slot_width };

    let mut groups = Vec::with_capacity(categories.len() * per_category);
    for (i, category) in categories.iter().enumerate() {
        if dodge {
            for (j, hue) in hues.iter().enumerate() {
                groups.push(GroupSpec {
                    key: GroupKey::new(category.clone(), Some(hue.clone())),
                    center: i as f64 + offsets[j],
                    width: band,
                    members: Vec::new(),
                });
            }
        } else {
            groups.push(GroupSpec {
                key: GroupKey::new(category.clone(), None),
                center: i as f64,
                width: band,
                members: Vec::new(),
            });
        }
    }

    let mut skipped = Vec::new();
    for (idx, p) in points.iter().enumerate() {
        let Some(slot) = assign(p, &categories, &hues, dodge, value_scale) else {
            skipped.push(idx);
            continue;
        };
        groups[slot.0 * per_category + slot.1].members.push(idx);
    }

    for g in &mut groups {
        g.members.sort_by(|&a, &b| {
            points[a].value.partial_cmp(&points[b].value).unwrap_or(Ordering::Equal)
        });
    }

    if !skipped.is_empty() {
        tracing::warn!(
            count = skipped.len(),
            "records skipped: value not representable in pixels, unknown category or hue"
        );
    }

    GroupPlan { groups, skipped }
}

/// A value can be swarmed only if it stays finite once scaled to pixels;
/// an infinite coordinate would hide every neighbor from the overlap scan.
fn fits_in_pixels(value: f64, value_scale: f64) -> bool {
    value.is_finite() && (value * value_scale).is_finite()
}

/// (category index, hue index) for a record, or None if it can't be placed.
fn assign(
    p: &DataPoint,
    categories: &IndexSet<String>,
    hues: &IndexSet<String>,
    dodge: bool,
    value_scale: f64,
) -> Option<(usize, usize)> {
    if !fits_in_pixels(p.value, value_scale) {
        return None;
    }
    let i = categories.get_index_of(p.category.as_str())?;
    if !dodge {
        // Without sub-bands the whole category is one swarm, hue or not.
        return Some((i, 0));
    }
    let j = hues.get_index_of(p.sub_category.as_deref()?)?;
    Some((i, j))
}

/// Explicit order if given, else order of first appearance.
fn category_order(points: &[DataPoint], cfg: &LayoutConfig) -> IndexSet<String> {
    match &cfg.order {
        Some(order) => order.iter().cloned().collect(),
        None => points.iter().map(|p| p.category.clone()).collect(),
    }
}

/// Explicit hue order if given, else first appearance among placeable records.
fn hue_levels(
    points: &[DataPoint],
    cfg: &LayoutConfig,
    placeable: impl Fn(&DataPoint) -> bool,
) -> IndexSet<String> {
    match &cfg.hue_order {
        Some(order) => order.iter().cloned().collect(),
        None => points
            .iter()
            .filter(|p| placeable(*p))
            .filter_map(|p| p.sub_category.clone())
            .collect(),
    }
}

/// Center offsets of `n` evenly spaced sub-bands inside a slot, symmetric
/// around zero and multiplied by `scale`.
pub fn hue_offsets(n: usize, slot_width: f64, scale: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let each = slot_width / n as f64;
    let half_span = (slot_width - each) / 2.0;
    (0..n).map(|j| (j as f64 * each - half_span) * scale).collect()
}

/// Width a single dodged sub-band may occupy.
pub fn nested_width(n: usize, slot_width: f64) -> f64 {
    if n == 0 {
        return slot_width;
    }
    slot_width / n as f64 * NESTED_WIDTH_FACTOR
}

/// Clamp a categorical coordinate into `[center - width/2, center + width/2]`.
/// Returns the new coordinate and whether it moved.
pub fn clamp_to_gutter(x: f64, center: f64, width: f64) -> (f64, bool) {
    let half = width / 2.0;
    let low = center - half;
    let high = center + half;
    if x < low {
        (low, true)
    } else if x > high {
        (high, true)
    } else {
        (x, false)
    }
}
