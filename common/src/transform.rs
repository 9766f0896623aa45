//! 2D affine transforms for placing hands.
//!
//! Replaces a mutable save/rotate/restore canvas stack with plain values: each
//! hand gets the full transform it is drawn with, and the baseline is simply
//! [`Transform::IDENTITY`], so nothing can accumulate across frames.
//!
//! Mapping: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.

use micromath::F32;

use crate::geometry::PointF;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Clockwise rotation (on a y-down screen) by `degrees` about `pivot`.
    pub fn rotation_about(
        degrees: f32,
        pivot: PointF,
    ) -> Self {
        let radians = F32(degrees.to_radians());
        let (sin, cos) = (radians.sin().0, radians.cos().0);
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: pivot.x - cos * pivot.x + sin * pivot.y,
            f: pivot.y - sin * pivot.x - cos * pivot.y,
        }
    }

    /// `self` applied after `local`: the result maps `p` to `self.apply(local.apply(p))`.
    ///
    /// Matches how a canvas concatenates a new rotation onto its current matrix.
    pub fn concat(
        &self,
        local: &Self,
    ) -> Self {
        Self {
            a: self.a * local.a + self.c * local.b,
            b: self.b * local.a + self.d * local.b,
            c: self.a * local.c + self.c * local.d,
            d: self.b * local.c + self.d * local.d,
            e: self.a * local.e + self.c * local.f + self.e,
            f: self.b * local.e + self.d * local.f + self.f,
        }
    }

    /// Rotate the current frame by `degrees` about `pivot`.
    #[inline]
    pub fn then_rotate(
        &self,
        degrees: f32,
        pivot: PointF,
    ) -> Self {
        self.concat(&Self::rotation_about(degrees, pivot))
    }

    pub fn apply(
        &self,
        point: PointF,
    ) -> PointF {
        PointF::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }
}

impl Default for Transform {
    fn default() -> Self { Self::IDENTITY }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_near(
        actual: PointF,
        expected: PointF,
    ) {
        assert!(
            (actual.x - expected.x).abs() < 0.5 && (actual.y - expected.y).abs() < 0.5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_identity_is_noop() {
        let p = PointF::new(12.5, -3.0);
        assert_eq!(Transform::IDENTITY.apply(p), p);
    }

    #[test]
    fn test_pivot_is_fixed() {
        let pivot = PointF::new(100.0, 100.0);
        let t = Transform::rotation_about(137.0, pivot);
        assert_point_near(t.apply(pivot), pivot);
    }

    #[test]
    fn test_quarter_turn_is_clockwise_on_screen() {
        let pivot = PointF::new(100.0, 100.0);
        let t = Transform::rotation_about(90.0, pivot);
        // Twelve o'clock goes to three o'clock
        assert_point_near(t.apply(PointF::new(100.0, 50.0)), PointF::new(150.0, 100.0));
    }

    #[test]
    fn test_relative_rotation_equals_absolute() {
        let pivot = PointF::new(100.0, 100.0);
        let tip = PointF::new(100.0, 25.0);

        let hour = Transform::IDENTITY.then_rotate(304.5, pivot);
        let minute = hour.then_rotate(54.0 - 304.5, pivot);
        let absolute = Transform::rotation_about(54.0, pivot);

        assert_point_near(minute.apply(tip), absolute.apply(tip));
    }
}
