//! Street-curve builder.
//!
//! Builds one centripetal Catmull-Rom curve per directed connection:
//! `[pre(s,d), srcCut, dstCut, post(s,d)]`, where `pre`/`post` are "phantom"
//! control points chosen so the curve enters/leaves each intersection as
//! straight as the local topology allows, and `srcCut`/`dstCut` are where
//! the straight probe-to-probe segment crosses the intersection-area
//! boundary circles at each end.

use std::collections::HashMap;

use dt_core::{Point2, Point3, PopulationProbe, ProbeConnection, ProbeConnectionFlow, ProbeIndex};
use dt_curves::CatmulRomCurve3;

use crate::intersection_area::IntersectionArea;
use crate::{NetworkError, NetworkResult};

/// Tolerance factor applied to the segment length for the line-circle
/// intersection test, so two roots within `1e-6 * segment_length` of each
/// other are treated as the same (tangent) intersection.
const INTERSECTION_TOLERANCE_FACTOR: f64 = 1e-6;

fn location(probes: &[PopulationProbe], idx: ProbeIndex) -> Point3 {
    probes[idx.index()].location
}

/// Negative cosine of the angle `v_a, v_b` make at a common source —
/// maximized by pairs that continue nearly straight through `s`.
fn dissimilarity(probes: &[PopulationProbe], s: ProbeIndex, a: ProbeIndex, b: ProbeIndex) -> f64 {
    let src = location(probes, s);
    let va = location(probes, a) - src;
    let vb = location(probes, b) - src;
    -va.dot(vb) / (va.norm() * vb.norm())
}

fn mirror_control_point(probes: &[PopulationProbe], s: ProbeIndex, target: ProbeIndex) -> Point3 {
    let src = location(probes, s);
    let dir = location(probes, target) - src;
    src - dir
}

/// Collect every probe's outgoing neighborhood `O(s)` from the connection
/// set, in ascending probe-index order for determinism.
fn collect_out_edges(connection_flows: &[ProbeConnectionFlow]) -> HashMap<ProbeIndex, Vec<ProbeIndex>> {
    let mut out_edges: HashMap<ProbeIndex, Vec<ProbeIndex>> = HashMap::new();
    for flow in connection_flows {
        let entry = out_edges.entry(flow.src_idx()).or_default();
        if !entry.contains(&flow.dst_idx()) {
            entry.push(flow.dst_idx());
        }
    }
    for targets in out_edges.values_mut() {
        targets.sort_by_key(|idx| idx.0);
    }
    out_edges
}

/// Pairing policy by `|O(s)|`.
fn external_control_points_for(
    probes: &[PopulationProbe],
    s: ProbeIndex,
    targets: &[ProbeIndex],
) -> HashMap<ProbeIndex, Point3> {
    match targets.len() {
        0 => HashMap::new(),
        1 => {
            let out = targets[0];
            HashMap::from([(out, mirror_control_point(probes, s, out))])
        }
        2 => {
            let (a, b) = (targets[0], targets[1]);
            HashMap::from([(a, location(probes, b)), (b, location(probes, a))])
        }
        3 => {
            let pairings = [
                ((targets[0], targets[1]), targets[2]),
                ((targets[0], targets[2]), targets[1]),
                ((targets[1], targets[2]), targets[0]),
            ];

            let mut best = pairings[0];
            let mut best_score = f64::NEG_INFINITY;
            for &((a, b), leftover) in &pairings {
                let score = dissimilarity(probes, s, a, b);
                if score >= best_score {
                    best_score = score;
                    best = ((a, b), leftover);
                }
            }

            let ((a, b), leftover) = best;
            HashMap::from([
                (a, location(probes, b)),
                (b, location(probes, a)),
                (leftover, mirror_control_point(probes, s, leftover)),
            ])
        }
        4 => {
            let pairings = [
                ((targets[0], targets[1]), (targets[2], targets[3])),
                ((targets[0], targets[2]), (targets[1], targets[3])),
                ((targets[0], targets[3]), (targets[1], targets[2])),
            ];

            let mut best = pairings[0];
            let mut best_score = f64::NEG_INFINITY;
            for &((a, b), (c, d)) in &pairings {
                let score = dissimilarity(probes, s, a, b) + dissimilarity(probes, s, c, d);
                if score >= best_score {
                    best_score = score;
                    best = ((a, b), (c, d));
                }
            }

            let ((a, b), (c, d)) = best;
            HashMap::from([
                (a, location(probes, b)),
                (b, location(probes, a)),
                (c, location(probes, d)),
                (d, location(probes, c)),
            ])
        }
        _ => {
            // Greedy, asymmetric pairing: for
            // each target, independently pick the partner maximizing
            // dissimilarity. Unlike the original reference, this indexes
            // candidates by their actual probe index rather than by loop
            // position, so every target is compared against every other
            // *target*, not against its own position in the list.
            let mut result = HashMap::with_capacity(targets.len());
            for &target in targets {
                let mut best_partner = None;
                let mut best_score = f64::NEG_INFINITY;
                for &candidate in targets {
                    if candidate == target {
                        continue;
                    }
                    let score = dissimilarity(probes, s, target, candidate);
                    if score >= best_score {
                        best_score = score;
                        best_partner = Some(candidate);
                    }
                }
                if let Some(partner) = best_partner {
                    result.insert(target, location(probes, partner));
                }
            }
            result
        }
    }
}

fn compute_external_control_points(
    out_edges: &HashMap<ProbeIndex, Vec<ProbeIndex>>,
    probes: &[PopulationProbe],
) -> HashMap<ProbeIndex, HashMap<ProbeIndex, Point3>> {
    out_edges
        .iter()
        .map(|(&s, targets)| (s, external_control_points_for(probes, s, targets)))
        .collect()
}

/// Real roots (as segment parameters `t`) of the line `p1 + t(p2-p1)`
/// intersecting the circle centered at `center` with radius `radius`.
fn line_circle_roots(p1: Point2, p2: Point2, center: Point2, radius: f64) -> Vec<f64> {
    let d = p2 - p1;
    let f = p1 - center;

    let a = d.dot(d);
    if a <= 0.0 {
        return vec![];
    }
    let b = 2.0 * f.dot(d);
    let c = f.dot(f) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return vec![];
    }
    let sqrt_disc = discriminant.sqrt();
    vec![(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)]
}

/// The unique intersection of segment `p1-p2` with the circle
/// `(center, radius)`, within `[0,1]` up to a tolerance relative to the
/// segment length. Zero or two (non-coincident) roots in range
/// is a fatal precondition violation.
fn unique_segment_circle_intersection(
    p1: Point2,
    p2: Point2,
    center: Point2,
    radius: f64,
) -> NetworkResult<Point2> {
    let segment_length = p1.distance(p2);
    let eps = INTERSECTION_TOLERANCE_FACTOR.max(1e-12);

    let roots = line_circle_roots(p1, p2, center, radius);
    let mut in_range: Vec<f64> = roots
        .into_iter()
        .filter(|&t| t >= -eps && t <= 1.0 + eps)
        .map(|t| t.clamp(0.0, 1.0))
        .collect();
    in_range.sort_by(|a, b| a.partial_cmp(b).unwrap());

    // Tangent hits produce two numerically-equal roots; collapse them.
    let merge_eps = (eps * 10.0).max(1e-9);
    let mut unique: Vec<f64> = Vec::new();
    for t in in_range {
        if unique.last().is_none_or(|&last| (t - last).abs() > merge_eps * segment_length.max(1.0)) {
            unique.push(t);
        }
    }

    match unique.as_slice() {
        [t] => Ok(p1.lerp(p2, *t)),
        [] => Err(NetworkError::PreconditionViolated(format!(
            "segment ({:?}, {:?}) does not intersect circle at {:?} r={radius}",
            p1, p2, center
        ))),
        _ => Err(NetworkError::PreconditionViolated(format!(
            "segment ({:?}, {:?}) intersects circle at {:?} r={radius} more than once",
            p1, p2, center
        ))),
    }
}

/// Build a street curve for every directed connection in `connection_flows`.
pub fn build_street_curves(
    probes: &[PopulationProbe],
    intersection_areas: &[IntersectionArea],
    connection_flows: &[ProbeConnectionFlow],
) -> NetworkResult<HashMap<ProbeConnection, CatmulRomCurve3>> {
    let out_edges = collect_out_edges(connection_flows);
    let external_control_points = compute_external_control_points(&out_edges, probes);

    let mut result = HashMap::with_capacity(connection_flows.len());
    for flow in connection_flows {
        let s = flow.src_idx();
        let d = flow.dst_idx();

        let pre = external_control_points
            .get(&s)
            .and_then(|m| m.get(&d))
            .copied()
            .unwrap_or_else(|| mirror_control_point(probes, s, d));
        // `post(s,d) = pre(d,s)`: requires `d` to have an outgoing
        // connection back to `s`. When it doesn't (a pure one-way link with
        // no reverse edge), fall back to the same mirror rule `d` would use
        // if it had no other neighbors — see DESIGN.md.
        let post = external_control_points
            .get(&d)
            .and_then(|m| m.get(&s))
            .copied()
            .unwrap_or_else(|| mirror_control_point(probes, d, s));

        let src_location = location(probes, s).to_2d();
        let dst_location = location(probes, d).to_2d();

        let src_area = &intersection_areas[s.index()];
        let dst_area = &intersection_areas[d.index()];

        let src_cut_2d =
            unique_segment_circle_intersection(src_location, dst_location, src_area.center, src_area.radius)?;
        let dst_cut_2d =
            unique_segment_circle_intersection(src_location, dst_location, dst_area.center, dst_area.radius)?;

        let src_cut = src_cut_2d.to_3d(location(probes, s).z);
        let dst_cut = dst_cut_2d.to_3d(location(probes, d).z);

        let curve = CatmulRomCurve3::new(pre, src_cut, dst_cut, post);
        result.insert(ProbeConnection::new(s, d), curve);
    }

    Ok(result)
}
