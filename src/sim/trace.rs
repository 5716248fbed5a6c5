//! Trailing path of the launch point, capped by total length

use std::collections::VecDeque;

use glam::Vec2;

/// Bounded polyline of recent positions (oldest first)
#[derive(Debug, Clone, Default)]
pub struct Trace {
    points: VecDeque<Vec2>,
    length: f32,
    max_length: f32,
}

impl Trace {
    pub fn new(max_length: f32) -> Self {
        Self {
            points: VecDeque::new(),
            length: 0.0,
            max_length,
        }
    }

    pub fn set_max_length(&mut self, max_length: f32) {
        self.max_length = max_length;
        self.trim();
    }

    /// Drop the path and start a new one at `at` (used after teleports)
    pub fn restart(&mut self, at: Vec2) {
        self.points.clear();
        self.points.push_back(at);
        self.length = 0.0;
    }

    /// Extend the path to `p`, trimming the oldest segments
    pub fn push(&mut self, p: Vec2) {
        if let Some(&last) = self.points.back() {
            self.length += (p - last).length();
        }
        self.points.push_back(p);
        self.trim();
    }

    fn trim(&mut self) {
        while self.length > self.max_length && self.points.len() >= 2 {
            let p0 = self.points[0];
            let p1 = self.points[1];
            let segment = (p1 - p0).length();
            if self.length - segment >= self.max_length {
                self.points.pop_front();
                self.length -= segment;
            } else {
                // Cut into the oldest segment
                let excess = self.length - self.max_length;
                self.points[0] = p0.lerp(p1, excess / segment);
                self.length = self.max_length;
            }
        }
        if self.points.len() < 2 {
            self.length = 0.0;
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total polyline length
    pub fn length(&self) -> f32 {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trims_oldest() {
        let mut trace = Trace::new(10.0);
        trace.restart(Vec2::ZERO);
        trace.push(Vec2::new(6.0, 0.0));
        trace.push(Vec2::new(12.0, 0.0));
        assert!((trace.length() - 10.0).abs() < 1e-5);
        let first = *trace.points().next().unwrap();
        assert!((first - Vec2::new(2.0, 0.0)).length() < 1e-5);
        assert_eq!(trace.len(), 3);

        trace.push(Vec2::new(24.0, 0.0));
        assert_eq!(trace.len(), 2);
        assert!((trace.length() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_restart_forgets_path() {
        let mut trace = Trace::new(100.0);
        trace.restart(Vec2::ZERO);
        trace.push(Vec2::new(3.0, 4.0));
        trace.restart(Vec2::new(50.0, 50.0));
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.length(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_length_never_exceeds_cap(
            steps in prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0), 1..64),
            cap in 1.0f32..500.0,
        ) {
            let mut trace = Trace::new(cap);
            let mut p = Vec2::ZERO;
            trace.restart(p);
            for (dx, dy) in steps {
                p += Vec2::new(dx, dy);
                trace.push(p);
                prop_assert!(trace.length() <= cap + 1e-3);
            }
        }
    }
}
