use std::collections::BTreeMap;

use serde::Serialize;

/// Radius coordinates of the sweep line, fixed at plot initialization.
pub const SWEEP_RADII: [f64; 2] = [0.0, 100.0];

/// One radar echo: the distance seen at a whole-degree angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarSample {
    pub angle: i64,
    pub distance: f64,
}

impl RadarSample {
    pub const fn new(angle: i64, distance: f64) -> Self {
        Self { angle, distance }
    }
}

/// Latest distance per angle, accumulated for the whole session.
///
/// Repeated angles overwrite the previous distance. Entries are never
/// removed, and iteration is always in ascending angle order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarAggregate {
    readings: BTreeMap<i64, f64>,
}

impl RadarAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `sample`, returning the distance it replaced.
    pub fn record(&mut self, sample: RadarSample) -> Option<f64> {
        self.readings.insert(sample.angle, sample.distance)
    }

    pub fn distance_at(&self, angle: i64) -> Option<f64> {
        self.readings.get(&angle).copied()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self) -> RadarSnapshot {
        let (angles, distances) = self
            .readings
            .iter()
            .map(|(angle, distance)| (*angle as f64, *distance))
            .unzip();
        RadarSnapshot { angles, distances }
    }
}

/// Point cloud ready for plotting: parallel, angle-sorted sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadarSnapshot {
    pub angles: Vec<f64>,
    pub distances: Vec<f64>,
}

impl RadarSnapshot {
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Two-point segment from the center to the edge at the current angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepLine {
    pub r: [f64; 2],
    pub theta: [f64; 2],
}

impl SweepLine {
    #[allow(clippy::cast_precision_loss)]
    pub fn at(angle: i64) -> Self {
        let theta = angle as f64;
        Self {
            r: SWEEP_RADII,
            theta: [theta, theta],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RadarAggregate, RadarSample, SweepLine, SWEEP_RADII};

    #[test]
    fn snapshot_is_sorted_and_last_write_wins() {
        let mut aggregate = RadarAggregate::new();
        aggregate.record(RadarSample::new(45, 30.0));
        aggregate.record(RadarSample::new(10, 80.0));
        let replaced = aggregate.record(RadarSample::new(45, 50.0));

        assert_eq!(replaced, Some(30.0));
        let snapshot = aggregate.snapshot();
        assert_eq!(snapshot.angles, vec![10.0, 45.0]);
        assert_eq!(snapshot.distances, vec![80.0, 50.0]);
    }

    #[test]
    fn negative_and_wide_angles_sort_numerically() {
        let mut aggregate = RadarAggregate::new();
        for angle in [180, -5, 9, 100, 0] {
            aggregate.record(RadarSample::new(angle, 1.0));
        }
        assert_eq!(
            aggregate.snapshot().angles,
            vec![-5.0, 0.0, 9.0, 100.0, 180.0]
        );
    }

    #[test]
    fn sweep_line_spans_both_radii() {
        let sweep = SweepLine::at(135);
        assert_eq!(sweep.r, SWEEP_RADII);
        assert_eq!(sweep.theta, [135.0, 135.0]);
    }
}
