use log::trace;

use super::config::RecognizerConfig;
use super::entities::*;
use super::language::Language;
use super::normalizer::Stroke;
use super::*;

const MAX_LOCAL_LENGTH_RATIO: f32 = 1.1;
const MAX_RUNNING_LENGTH_RATIO: f32 = 1.09;

// A straight run between two pivots, before classification
#[derive(Debug, Clone, Copy)]
struct Run {
    direction: f32,
    length: f32,
}

/// Decomposes a normalized stroke into classified segments, in drawing order.
pub fn extract(stroke: &Stroke, language: Language, config: &RecognizerConfig) -> Vec<Segment> {
    let points = stroke.points();
    let metrics = stroke.metrics();
    let first = points[0];
    let last = points[points.len() - 1];

    // Taps and tiny flicks carry no usable direction
    if metrics.length < config.dot_max_length {
        return vec![Segment {
            code: dot_code(language),
            direction: dir(first, last),
            length: metrics.length,
        }];
    }

    let pivot_indexes = get_pivot_indexes(points, config.min_segment_length);
    let runs = filter_runs(
        build_runs(points, &pivot_indexes),
        metrics.length * config.min_segment_fraction,
    );
    let segments = merge_segments(runs.iter().map(|run| classify(run, language)).collect());
    trace!(
        "pivots {:?} -> codes {:?}",
        pivot_indexes,
        segments.iter().map(|s| s.code).collect::<Vec<u8>>()
    );
    segments
}

fn dot_code(language: Language) -> u8 {
    match language {
        Language::Latin => LatinCode::Dot.code(),
        Language::Chinese => StrokeShape::Dian.code(),
    }
}

fn classify(run: &Run, language: Language) -> Segment {
    let direction = Direction::from_angle(run.direction);
    let code = match language {
        Language::Latin => LatinCode::Line(direction).code(),
        Language::Chinese => StrokeShape::from_direction(direction).code(),
    };
    Segment {
        code,
        direction: run.direction,
        length: run.length,
    }
}

// Gets direction, in radians, from point a to b
// 0 is to the right, PI / 2 is up, etc.
fn dir(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dir = dy.atan2(dx);
    std::f32::consts::PI - dir
}

// Calculates indexes of pivot points in a stroke
fn get_pivot_indexes(points: &[Point], min_segment_length: f32) -> Vec<usize> {
    // One item for each point: true if it's a pivot
    let mut markers = vec![false; points.len()];

    let mut prev_pt_ix = 0;
    let mut first_pt_ix = 0;
    let mut pivot_pt_ix = 1;

    // The first point of a stroke is always a pivot point.
    markers[0] = true;

    // local_length is the distance covered by the latest three points. If it is
    // noticeably longer than the chord between the first and last of them, there
    // is a corner at the middle one.
    let mut local_length = points[first_pt_ix].dist(points[pivot_pt_ix]);

    // running_length is the distance covered since the start of the current run.
    // If it grows noticeably longer than the chord from the run's start, a gradual
    // curve has turned into a new run.
    let mut running_length = local_length;

    for (i, &next_point) in points.iter().enumerate().skip(2) {
        let pivot_length = points[pivot_pt_ix].dist(next_point);
        local_length += pivot_length;
        running_length += pivot_length;

        let dist_from_previous = points[prev_pt_ix].dist(next_point);
        let dist_from_first = points[first_pt_ix].dist(next_point);
        if local_length > MAX_LOCAL_LENGTH_RATIO * dist_from_previous
            || running_length > MAX_RUNNING_LENGTH_RATIO * dist_from_first
        {
            // Two pivots this close are sampling jitter around a single corner
            if markers[prev_pt_ix]
                && points[prev_pt_ix].dist(points[pivot_pt_ix]) < min_segment_length
            {
                markers[prev_pt_ix] = false;
            }
            markers[pivot_pt_ix] = true;
            running_length = pivot_length;
            first_pt_ix = pivot_pt_ix;
        }
        local_length = pivot_length;
        prev_pt_ix = pivot_pt_ix;
        pivot_pt_ix = i;
    }

    // The last point is always a pivot
    markers[pivot_pt_ix] = true;
    // Pen lift often leaves a tiny tail; drop the pivot before it unless that
    // would leave the stroke with a single pivot.
    if prev_pt_ix != 0
        && markers[prev_pt_ix]
        && points[prev_pt_ix].dist(points[pivot_pt_ix]) < min_segment_length
    {
        markers[prev_pt_ix] = false;
    }

    markers
        .iter()
        .enumerate()
        .filter_map(|(ix, &marked)| if marked { Some(ix) } else { None })
        .collect()
}

fn build_runs(points: &[Point], pivot_indexes: &[usize]) -> Vec<Run> {
    pivot_indexes
        .windows(2)
        .map(|w| Run {
            direction: dir(points[w[0]], points[w[1]]),
            length: points[w[0]].dist(points[w[1]]),
        })
        .collect()
}

// Drops runs too short to be intended; the longest run always survives
fn filter_runs(runs: Vec<Run>, min_length: f32) -> Vec<Run> {
    let longest = runs
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (ix, run)| match best {
            Some((_, len)) if len >= run.length => best,
            _ => Some((ix, run.length)),
        })
        .map(|(ix, _)| ix);
    runs.into_iter()
        .enumerate()
        .filter(|(ix, run)| Some(*ix) == longest || run.length >= min_length)
        .map(|(_, run)| run)
        .collect()
}

// Adjacent segments with the same code are one visual segment
fn merge_segments(segments: Vec<Segment>) -> Vec<Segment> {
    let mut res: Vec<Segment> = Vec::with_capacity(segments.len());
    for seg in segments {
        match res.last_mut() {
            Some(prev) if prev.code == seg.code => {
                if seg.length > prev.length {
                    prev.direction = seg.direction;
                }
                prev.length += seg.length;
            }
            _ => res.push(seg),
        }
    }
    res
}
