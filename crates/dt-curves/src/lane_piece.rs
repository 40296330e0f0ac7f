//! `LanePiece` — a constant-width polyline with a spatial index for
//! nearest-segment queries.
//!
//! A lane piece is the flattened, densely-sampled form of a
//! [`CatmulRomCurve3`](crate::CatmulRomCurve3): a sequence of points along the
//! lane's centerline plus a constant lane width. It answers three questions
//! cheaply: how far along the lane is a given location, how far is that
//! location from the centerline, and which segment of the polyline a probe
//! location projects onto.

use rstar::{RTree, RTreeObject, PointDistance, AABB};

use dt_core::Point3;

use crate::{CurveError, CurveResult};

/// A polyline vertex, indexed for 2-D nearest-neighbor queries. The lane
/// piece's index is built over (x, y) only — elevation never participates in
/// nearest-vertex search, matching how the curve's planar footprint is what
/// determines which segment a probe belongs to.
#[derive(Clone, Copy, Debug)]
struct VertexEntry {
    xy: [f64; 2],
    index: usize,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.xy)
    }
}

impl PointDistance for VertexEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.xy[0] - point[0];
        let dy = self.xy[1] - point[1];
        dx * dx + dy * dy
    }
}

/// The result of projecting a location onto the nearest segment of a lane
/// piece.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentProjection {
    /// Index of the segment's start vertex; the segment runs
    /// `points[segment]..points[segment + 1]`.
    pub segment: usize,
    /// Projection parameter along the segment, clamped to `[0, 1]`.
    pub t: f64,
    /// The projected point itself.
    pub point: Point3,
    /// Euclidean distance from the query location to `point`.
    pub distance: f64,
}

/// A constant-width polyline plus the machinery to query distance-along and
/// distance-from a densely sampled lane centerline.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanePiece {
    points: Vec<Point3>,
    width: f64,
    /// `prefix[i]` is the arc length from `points[0]` to `points[i]`.
    prefix: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: IndexCache,
}

/// The R-tree is rebuilt lazily and not serialized — it is pure derived
/// state from `points`.
#[derive(Clone, Debug, Default)]
struct IndexCache(Option<RTree<VertexEntry>>);

impl LanePiece {
    /// Build a lane piece from an ordered polyline and a constant width.
    /// `points` must have at least two vertices.
    pub fn new(points: Vec<Point3>, width: f64) -> CurveResult<Self> {
        if points.len() < 2 {
            return Err(CurveError::PreconditionViolated(
                "lane piece requires at least 2 points".to_string(),
            ));
        }
        if width <= 0.0 {
            return Err(CurveError::InvalidArgument(format!(
                "lane width must be positive, got {width}"
            )));
        }

        let mut prefix = vec![0.0; points.len()];
        for i in 1..points.len() {
            prefix[i] = prefix[i - 1] + points[i].distance(points[i - 1]);
        }

        let mut piece = Self {
            points,
            width,
            prefix,
            index: IndexCache::default(),
        };
        piece.build_index();
        Ok(piece)
    }

    fn build_index(&mut self) {
        let entries: Vec<VertexEntry> = self
            .points
            .iter()
            .enumerate()
            .map(|(index, p)| VertexEntry {
                xy: [p.x, p.y],
                index,
            })
            .collect();
        self.index = IndexCache(Some(RTree::bulk_load(entries)));
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Total centerline length.
    pub fn length(&self) -> f64 {
        *self.prefix.last().unwrap()
    }

    fn nearest_vertex(&self, location: Point3) -> usize {
        let tree = self
            .index
            .0
            .as_ref()
            .expect("index built in LanePiece::new");
        tree.nearest_neighbor(&[location.x, location.y])
            .expect("non-empty lane piece")
            .index
    }

    /// Project `location` onto the candidate segment `[a, a+1]`, clamping the
    /// parameter to `[0, 1]` (the projection can fall outside the segment if
    /// `location` overshoots past an endpoint).
    fn project_onto_segment(&self, a: usize, location: Point3) -> SegmentProjection {
        let p0 = self.points[a];
        let p1 = self.points[a + 1];
        let dir = p1 - p0;
        let len2 = dir.dot(dir);

        let t = if len2 <= 0.0 {
            0.0
        } else {
            ((location - p0).dot(dir) / len2).clamp(0.0, 1.0)
        };

        let point = p0.lerp(p1, t);
        SegmentProjection {
            segment: a,
            t,
            point,
            distance: point.distance(location),
        }
    }

    /// Find the segment of the polyline nearest to `location`.
    ///
    /// Five cases, driven by where the nearest vertex falls:
    /// 1. Single-segment lane piece (two points) — only one candidate.
    /// 2. Nearest vertex is the first point — only the segment after it.
    /// 3. Nearest vertex is the last point — only the segment before it.
    /// 4. Nearest vertex is interior — compare the segment before and after,
    ///    keep the closer projection.
    /// 5. Nearest vertex is interior and both segments tie — keep the one
    ///    with the smaller index (deterministic tie-break).
    pub fn find_segment(&self, location: Point3) -> CurveResult<SegmentProjection> {
        if self.points.len() < 2 {
            return Err(CurveError::EmptyLanePiece);
        }

        if self.points.len() == 2 {
            return Ok(self.project_onto_segment(0, location));
        }

        let nearest = self.nearest_vertex(location);
        let last = self.points.len() - 1;

        if nearest == 0 {
            return Ok(self.project_onto_segment(0, location));
        }
        if nearest == last {
            return Ok(self.project_onto_segment(last - 1, location));
        }

        let before = self.project_onto_segment(nearest - 1, location);
        let after = self.project_onto_segment(nearest, location);
        if after.distance < before.distance {
            Ok(after)
        } else {
            Ok(before)
        }
    }

    /// Arc length from the start of the lane piece to `location`'s nearest
    /// projection.
    pub fn length_from_start_to_location(&self, location: Point3) -> CurveResult<f64> {
        let proj = self.find_segment(location)?;
        let seg_len = self.points[proj.segment + 1].distance(self.points[proj.segment]);
        Ok(self.prefix[proj.segment] + proj.t * seg_len)
    }

    /// Arc length from `location`'s nearest projection to the end of the
    /// lane piece.
    pub fn length_from_location_to_end(&self, location: Point3) -> CurveResult<f64> {
        Ok(self.length() - self.length_from_start_to_location(location)?)
    }

    /// Perpendicular (Euclidean) distance from `location` to the lane
    /// centerline.
    pub fn distance_to_location(&self, location: Point3) -> CurveResult<f64> {
        Ok(self.find_segment(location)?.distance)
    }
}
