// Swarm layout for categorical data.
//
// Goals:
// - Deterministic: no randomness, no time budgets
// - No overlap between markers of the same group (in pixel space)
// - Values never move; only the categorical coordinate is adjusted
// - Groups are independent and may be laid out in parallel
//
// Submodules:
// - candidates: neighbor scan + candidate positions
// - swarm: incremental placement of one group
// - groups: category/hue partition, dodge offsets, gutters
//
// Output:
// - SwarmLayout with one PlacedPoint per placed record, in input order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlacementExhausted, Result, SwarmError};
use crate::geometry::{Orientation, Point, marker_diameter};
use crate::input::DataPoint;
use crate::render::AxisTransform;

pub mod candidates;
pub mod groups;
pub mod swarm;

use groups::{GroupSpec, clamp_to_gutter, plan_groups};
use swarm::build_swarm;

/// Identifies one swarm: a category, optionally narrowed to a hue level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupKey {
    pub category: String,
    pub sub_category: Option<String>,
}

impl GroupKey {
    pub fn new(category: String, sub_category: Option<String>) -> Self {
        Self { category, sub_category }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_category {
            Some(sub) => write!(f, "{}/{}", self.category, sub),
            None => write!(f, "{}", self.category),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Marker diameter in points (1/72 inch). The pixel diameter is
    /// `(marker_size + stroke) * dpi / 72`; callers that already measure
    /// markers in pixels should set `dpi` to 72 so sizes pass through unscaled.
    pub marker_size: f64,
    /// Marker edge width in points, scaled like `marker_size`. None means a
    /// tenth of the marker size.
    pub stroke_width: Option<f64>,
    /// Output resolution. Defaults to 100; 72 makes one point one pixel.
    pub dpi: f64,
    /// Pixels per category slot.
    pub category_pixels_per_unit: f64,
    /// Pixels per value unit. Defaults to the category scale.
    pub value_pixels_per_unit: Option<f64>,
    /// Width of a category slot in categorical units.
    pub slot_width: f64,
    /// Split each category into one band per hue level.
    pub dodge: bool,
    /// Multiplier on dodged band offsets; below 1 pulls bands toward the center.
    pub dodge_offset_scale: f64,
    pub orientation: Orientation,
    /// Explicit category order. Unlisted categories are skipped.
    pub order: Option<Vec<String>>,
    /// Explicit hue order. Unlisted hue levels are skipped.
    pub hue_order: Option<Vec<String>>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            marker_size: 5.0,
            stroke_width: Some(0.0),
            dpi: 100.0,
            category_pixels_per_unit: 100.0,
            value_pixels_per_unit: None,
            slot_width: 0.8,
            dodge: false,
            dodge_offset_scale: 1.0,
            orientation: Orientation::Vertical,
            order: None,
            hue_order: None,
        }
    }
}

impl LayoutConfig {
    pub fn stroke(&self) -> f64 {
        self.stroke_width.unwrap_or(self.marker_size / 10.0)
    }

    pub fn value_scale(&self) -> f64 {
        self.value_pixels_per_unit.unwrap_or(self.category_pixels_per_unit)
    }

    /// Minimum pixel distance between two marker centers.
    pub fn diameter(&self) -> f64 {
        marker_diameter(self.marker_size, self.stroke(), self.dpi)
    }

    pub fn transform(&self) -> AxisTransform {
        AxisTransform {
            orientation: self.orientation,
            category_pixels_per_unit: self.category_pixels_per_unit,
            value_pixels_per_unit: self.value_scale(),
        }
    }

    /// Reject anything that would make the swarm math meaningless.
    pub fn validate(&self) -> Result<()> {
        positive("marker_size", self.marker_size)?;
        let stroke = self.stroke();
        if !stroke.is_finite() || stroke < 0.0 {
            return Err(invalid("stroke_width", format!("must be finite and >= 0, got {stroke}")));
        }
        positive("dpi", self.dpi)?;
        positive("category_pixels_per_unit", self.category_pixels_per_unit)?;
        positive("value_pixels_per_unit", self.value_scale())?;
        positive("slot_width", self.slot_width)?;
        positive("dodge_offset_scale", self.dodge_offset_scale)?;
        // Each factor can be finite while the product overflows.
        positive("marker_size", self.diameter())?;
        if self.order.as_ref().is_some_and(Vec::is_empty) {
            return Err(invalid("order", "must not be empty".to_string()));
        }
        if self.hue_order.as_ref().is_some_and(Vec::is_empty) {
            return Err(invalid("hue_order", "must not be empty".to_string()));
        }
        Ok(())
    }
}

fn positive(field: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and > 0, got {v}")))
    }
}

fn invalid(field: &'static str, reason: String) -> SwarmError {
    SwarmError::InvalidConfiguration { field, reason }
}

/// A record after layout. `x`/`y` are display coordinates in data units; the
/// value coordinate is the input value, bit for bit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedPoint {
    /// Position of the record in the input.
    pub index: usize,
    pub value: f64,
    pub category: String,
    pub sub_category: Option<String>,
    pub x: f64,
    pub y: f64,
    /// Moved back inside the group's band; may overlap its neighbors.
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub center: f64,
    pub width: f64,
    pub count: usize,
    pub clamped: usize,
}

#[derive(Debug)]
pub struct SwarmLayout {
    /// Placed records in input order. Skipped records are absent.
    pub points: Vec<PlacedPoint>,
    /// One entry per planned group, empty ones included.
    pub groups: Vec<GroupSummary>,
    /// Input indices that were not placed.
    pub skipped: Vec<usize>,
    /// Per-group failures. The affected points sit unjittered on their midline.
    pub errors: Vec<SwarmError>,
}

struct GroupOutcome {
    summary: GroupSummary,
    placed: Vec<PlacedPoint>,
    error: Option<SwarmError>,
}

/// Lay out every record of `points`.
///
/// Configuration problems fail the whole call before any work is done.
/// Placement failures are confined to their group and reported in
/// `SwarmLayout::errors`.
pub fn layout_swarm(points: &[DataPoint], cfg: &LayoutConfig) -> Result<SwarmLayout> {
    cfg.validate()?;

    let plan = plan_groups(points, cfg);
    let transform = cfg.transform();
    let d = cfg.diameter();

    tracing::debug!(
        records = points.len(),
        groups = plan.groups.len(),
        diameter = d,
        "laying out swarm"
    );

    let outcomes = run_groups(&plan.groups, points, &transform, d);
    Ok(merge_outcomes(outcomes, plan.skipped))
}

/// Collect per-group results in plan order; points go back to input order.
fn merge_outcomes(outcomes: Vec<GroupOutcome>, skipped: Vec<usize>) -> SwarmLayout {
    let mut placed = Vec::new();
    let mut summaries = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::new();
    for outcome in outcomes {
        placed.extend(outcome.placed);
        summaries.push(outcome.summary);
        errors.extend(outcome.error);
    }
    placed.sort_by_key(|p| p.index);

    SwarmLayout { points: placed, groups: summaries, skipped, errors }
}

#[cfg(feature = "parallel")]
fn run_groups(
    groups: &[GroupSpec],
    points: &[DataPoint],
    transform: &AxisTransform,
    d: f64,
) -> Vec<GroupOutcome> {
    use rayon::prelude::*;

    groups
        .par_iter()
        .map(|g| place_group(g, points, transform, d))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_groups(
    groups: &[GroupSpec],
    points: &[DataPoint],
    transform: &AxisTransform,
    d: f64,
) -> Vec<GroupOutcome> {
    groups.iter().map(|g| place_group(g, points, transform, d)).collect()
}

fn place_group(
    slot: &GroupSpec,
    points: &[DataPoint],
    transform: &AxisTransform,
    d: f64,
) -> GroupOutcome {
    let origin: Vec<Point> = slot
        .members
        .iter()
        .map(|&i| transform.to_swarm(slot.center, points[i].value))
        .collect();

    // Non-finite pixel coordinates defeat the neighbor scan (inf - inf is NaN),
    // so such a group is failed rather than silently overlapped.
    if origin.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return fallback_outcome(slot, points, transform.orientation, PlacementExhausted { placed: 0 });
    }

    match build_swarm(&origin, d) {
        Ok(swarm) => {
            let categories = swarm.iter().map(|p| transform.category_from_swarm(*p)).collect();
            finish_group(slot, points, transform.orientation, categories, None)
        }
        Err(e) => fallback_outcome(slot, points, transform.orientation, e),
    }
}

/// A group whose swarm could not be built: points stay unjittered on the
/// midline and the failure is reported with the group key.
fn fallback_outcome(
    slot: &GroupSpec,
    points: &[DataPoint],
    orientation: Orientation,
    e: PlacementExhausted,
) -> GroupOutcome {
    tracing::error!(group = %slot.key, placed = e.placed, "swarm placement exhausted");
    let categories = vec![slot.center; slot.members.len()];
    finish_group(slot, points, orientation, categories, Some(e.in_group(slot.key.clone())))
}

/// Clamp categorical coordinates (data units, one per member) into the band,
/// build the placed points and summarize.
fn finish_group(
    slot: &GroupSpec,
    points: &[DataPoint],
    orientation: Orientation,
    categories: Vec<f64>,
    error: Option<SwarmError>,
) -> GroupOutcome {
    let mut clamped_count = 0;
    let placed: Vec<PlacedPoint> = slot
        .members
        .iter()
        .zip(categories)
        .map(|(&idx, category)| {
            let record = &points[idx];
            let (category, clamped) = clamp_to_gutter(category, slot.center, slot.width);
            if clamped {
                clamped_count += 1;
            }
            let display = orientation.compose(category, record.value);
            PlacedPoint {
                index: idx,
                value: record.value,
                category: record.category.clone(),
                sub_category: record.sub_category.clone(),
                x: display.x,
                y: display.y,
                clamped,
            }
        })
        .collect();

    if clamped_count > 0 {
        tracing::warn!(
            group = %slot.key,
            clamped = clamped_count,
            total = placed.len(),
            "points clamped into gutter; markers may overlap"
        );
    }

    GroupOutcome {
        summary: GroupSummary {
            key: slot.key.clone(),
            center: slot.center,
            width: slot.width,
            count: placed.len(),
            clamped: clamped_count,
        },
        placed,
        error,
    }
}
