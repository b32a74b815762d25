use log::debug;

use super::config::RecognizerConfig;
use super::error::{Error, Result};
use super::*;

// Straight pieces used to measure each smoothing curve
const CURVE_STEPS: usize = 16;

/// Size and length of a finished stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeMetrics {
    pub width: f32,
    pub height: f32,
    pub length: f32,
}

impl StrokeMetrics {
    fn measure(points: &[Point]) -> StrokeMetrics {
        let mut left = f32::MAX;
        let mut right = f32::MIN;
        let mut top = f32::MAX;
        let mut bottom = f32::MIN;
        for pt in points {
            left = left.min(pt.x);
            right = right.max(pt.x);
            top = top.min(pt.y);
            bottom = bottom.max(pt.y);
        }
        StrokeMetrics {
            width: right - left,
            height: bottom - top,
            length: smoothed_length(points),
        }
    }

    /// Path length over bounding box footprint
    pub fn clear_ratio(&self) -> f32 {
        let footprint = self.width + self.height;
        if footprint <= 0.0 {
            return 0.0;
        }
        self.length / footprint
    }

    pub fn is_clear_gesture(&self, threshold: f32) -> bool {
        self.clear_ratio() > threshold
    }
}

fn midpoint(a: Point, b: Point) -> Point {
    Point {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

// Length of a quadratic curve from a to b with control point c
fn curve_length(a: Point, c: Point, b: Point) -> f32 {
    let mut length = 0.0;
    let mut prev = a;
    for step in 1..=CURVE_STEPS {
        let t = step as f32 / CURVE_STEPS as f32;
        let u = 1.0 - t;
        let pt = Point {
            x: u * u * a.x + 2.0 * u * t * c.x + t * t * b.x,
            y: u * u * a.y + 2.0 * u * t * c.y + t * t * b.y,
        };
        length += prev.dist(pt);
        prev = pt;
    }
    length
}

// Length of the path the pen draws through the samples: a line to the first
// midpoint, one curve per inner sample (the sample is the control point, the
// neighbouring midpoints are the ends), and a line to the last sample.
fn smoothed_length(points: &[Point]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut start = midpoint(points[0], points[1]);
    let mut length = points[0].dist(start);
    for w in points[1..].windows(2) {
        let end = midpoint(w[0], w[1]);
        length += curve_length(start, w[0], end);
        start = end;
    }
    length + start.dist(points[points.len() - 1])
}

/// A validated stroke: at least two points and a non-zero length
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    metrics: StrokeMetrics,
}

impl Stroke {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn metrics(&self) -> StrokeMetrics {
        self.metrics
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStroke {
    pub stroke: Stroke,
    pub is_clear_gesture: bool,
}

/// Validates and measures a finished polyline.
///
/// Samples that moved less than the touch tolerance on both axes are dropped.
/// The length is measured along the midpoint-smoothed path through the kept
/// samples, so sampling noise does not inflate it; the points themselves are
/// left as sampled.
/// A tap (zero length after that) becomes a one-unit vertical line centered
/// on the tap, so later stages always see a real segment.
pub fn normalize(points: &[Point], config: &RecognizerConfig) -> Result<NormalizedStroke> {
    let first = match points.first() {
        Some(pt) => *pt,
        None => return Err(Error::EmptyStroke),
    };

    let mut kept: Vec<Point> = Vec::with_capacity(points.len());
    kept.push(first);
    for pt in &points[1..] {
        let last = kept[kept.len() - 1];
        let dx = (pt.x - last.x).abs();
        let dy = (pt.y - last.y).abs();
        if dx >= config.touch_tolerance || dy >= config.touch_tolerance {
            kept.push(*pt);
        }
    }
    // Identical consecutive samples survive a zero tolerance but carry no length
    kept.dedup();

    let mut metrics = StrokeMetrics::measure(&kept);
    if metrics.length == 0.0 {
        let center = kept[0];
        kept = vec![
            Point { x: center.x, y: center.y - 0.5 },
            Point { x: center.x, y: center.y + 0.5 },
        ];
        metrics = StrokeMetrics::measure(&kept);
        debug!("tap at ({}, {}) synthesized into unit segment", center.x, center.y);
    }

    let is_clear_gesture = metrics.is_clear_gesture(config.clear_ratio_threshold);
    debug!(
        "stroke: {} of {} samples kept, ratio {:.3}, clear {}",
        kept.len(),
        points.len(),
        metrics.clear_ratio(),
        is_clear_gesture
    );
    Ok(NormalizedStroke {
        stroke: Stroke { points: kept, metrics },
        is_clear_gesture,
    })
}
