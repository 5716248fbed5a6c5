//! Distance helpers shared by physics and hit-testing
//!
//! Physics feeds scaled (meter) vectors through these; hit-testing uses raw
//! pixel vectors.

use glam::Vec2;

/// Vector from `b` to `a`
#[inline]
pub fn distance_vector(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

/// Euclidean length of a difference vector
#[inline]
pub fn magnitude(d: Vec2) -> f32 {
    (d.x * d.x + d.y * d.y).sqrt()
}

/// Scale a difference vector (unit conversion)
#[inline]
pub fn scale(d: Vec2, factor: f32) -> Vec2 {
    d * factor
}

/// Distance between two positions
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    magnitude(distance_vector(a, b))
}

/// True when `p` lies strictly inside the circle
#[inline]
pub fn within(p: Vec2, center: Vec2, radius: f32) -> bool {
    distance(p, center) < radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_vector_points_from_b_to_a() {
        let d = distance_vector(Vec2::new(4.0, 6.0), Vec2::new(1.0, 2.0));
        assert_eq!(d, Vec2::new(3.0, 4.0));
        assert!((magnitude(d) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale() {
        let d = scale(Vec2::new(3.0, -4.0), 2.5);
        assert_eq!(d, Vec2::new(7.5, -10.0));
    }

    #[test]
    fn test_within_is_strict() {
        let c = Vec2::new(10.0, 10.0);
        assert!(within(Vec2::new(12.0, 10.0), c, 3.0));
        assert!(!within(Vec2::new(13.0, 10.0), c, 3.0));
    }
}
