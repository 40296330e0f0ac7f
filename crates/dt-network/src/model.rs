//! Traffic-way / street / intersection intermediate representation.
//!
//! Adjacency between lanes is stored as indices into `TrafficWay::lanes`,
//! not as direct references, to avoid a cyclic ownership graph.

use dt_core::{LaneCurveIndex, LaneIndex, Point3};
use dt_curves::CatmulRomCurve3;

/// A half-open arc-length interval `[start, stop]` along a curve's
/// centripetal parameter `t`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcInterval {
    pub start: f64,
    pub stop: f64,
}

/// Lane-boundary marking styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkingType {
    SolidYellow,
    SolidWhite,
    DashedWhite,
}

/// One marking segment along a lane-boundary curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficMarking {
    pub arc_interval: ArcInterval,
    pub marking_type: MarkingType,
}

/// A lane-boundary curve plus its markings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkedCurve {
    pub curve: CatmulRomCurve3,
    pub markings: Vec<TrafficMarking>,
}

/// One travel lane, bounded by two marked curves and carrying its
/// lane-change windows and neighbor-lane indices.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficLane {
    pub left_curve_index: LaneCurveIndex,
    pub right_curve_index: LaneCurveIndex,
    pub left_lane_change_windows: Vec<ArcInterval>,
    pub left_adjacent_lane_indices: Vec<LaneIndex>,
    pub right_lane_change_windows: Vec<ArcInterval>,
    pub right_adjacent_lane_indices: Vec<LaneIndex>,
}

/// All lanes of traffic in one direction between two probes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficWay {
    /// `"{src}_{dst}"` — unique within a generation run.
    pub id: String,
    /// The undeviated centerline curve this way's boundaries were offset
    /// from.
    pub leftmost_curve: CatmulRomCurve3,
    /// `N + 1` lane-boundary curves, leftmost (index 0) to rightmost.
    pub marked_curves: Vec<MarkedCurve>,
    /// `N` lanes, one per `(marked_curves[i], marked_curves[i+1])` pair.
    pub lanes: Vec<TrafficLane>,
    pub entrance_lane_indices: Vec<LaneIndex>,
    pub exit_lane_indices: Vec<LaneIndex>,
    pub flow_percentile: f64,
}

impl TrafficWay {
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }
}

/// The bidirectional pairing of two traffic ways between the same probe
/// pair. A one-way street has exactly one traffic way.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Street {
    pub center_curve: CatmulRomCurve3,
    pub traffic_ways: Vec<TrafficWay>,
}

/// One inbound-lane-to-outbound-way routing assignment at an intersection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficConnection {
    pub inbound_traffic_way_id: String,
    pub inbound_lane_number: u32,
    pub outbound_traffic_way_id: String,
}

/// The intersection at one probe: its center and every
/// inbound-lane-to-outbound routing the generator assigned.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    pub center: Point3,
    pub connections: Vec<TrafficConnection>,
}
