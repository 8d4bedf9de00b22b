//! Per-entity modifiers hooked into the integrator stages
//!
//! Acceleration modifiers run before velocity integration, velocity
//! modifiers before location integration, post-move modifiers last.

use std::fmt;
use std::sync::Arc;

use crate::core::error::{Result, SimError};
use crate::core::geometry::Vec2;
use crate::domain::entity::{Attributes, Tags};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Acceleration,
    Velocity,
    PostMove,
}

/// Caller-supplied hook for behaviour the built-in modifiers don't cover
pub type ModifierFn = Arc<dyn Fn(&mut Attributes) + Send + Sync>;

#[derive(Clone)]
pub enum Modifier {
    /// Adds a fixed vector to acceleration every tick
    ConstantAcceleration(Vec2),
    /// Pushes away from the line through `point` with the given normal,
    /// `strength / distance`; nothing behind the line.
    Repulsor { point: Vec2, normal: Vec2, strength: f32 },
    /// Horizontal friction, ground coefficient while GROUNDED
    Friction { ground: f32, air: f32 },
    /// Per-axis |v| cap
    SpeedLimit(Vec2),
    /// Keeps location.y at or above the given line (y grows down)
    GroundLimit(f32),
    ClampLocation { min: Vec2, max: Vec2 },
    /// Wraps the location around the [min, max) box
    WarpLocation { min: Vec2, max: Vec2 },
    Custom { stage: Stage, apply: ModifierFn },
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstantAcceleration(a) => f.debug_tuple("ConstantAcceleration").field(a).finish(),
            Self::Repulsor { point, normal, strength } => f
                .debug_struct("Repulsor")
                .field("point", point)
                .field("normal", normal)
                .field("strength", strength)
                .finish(),
            Self::Friction { ground, air } => {
                f.debug_struct("Friction").field("ground", ground).field("air", air).finish()
            }
            Self::SpeedLimit(limit) => f.debug_tuple("SpeedLimit").field(limit).finish(),
            Self::GroundLimit(y) => f.debug_tuple("GroundLimit").field(y).finish(),
            Self::ClampLocation { min, max } => {
                f.debug_struct("ClampLocation").field("min", min).field("max", max).finish()
            }
            Self::WarpLocation { min, max } => {
                f.debug_struct("WarpLocation").field("min", min).field("max", max).finish()
            }
            Self::Custom { stage, .. } => f.debug_struct("Custom").field("stage", stage).finish_non_exhaustive(),
        }
    }
}

impl Modifier {
    pub fn repulsor(point: Vec2, normal: Vec2, strength: f32) -> Self {
        Self::Repulsor { point, normal: normal.normalize(), strength }
    }

    pub fn custom(stage: Stage, apply: impl Fn(&mut Attributes) + Send + Sync + 'static) -> Self {
        Self::Custom { stage, apply: Arc::new(apply) }
    }

    /// Reject parameters the stage cannot apply, e.g. a negative speed
    /// cap or a box with min > max.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: &str| Err(SimError::InvalidConfig(format!("{self:?}: {msg}")));
        let ordered = |min: &Vec2, max: &Vec2| min.x <= max.x && min.y <= max.y;
        match self {
            Self::ConstantAcceleration(a) if !a.is_finite() => bad("acceleration must be finite"),
            Self::Repulsor { point, normal, strength }
                if !point.is_finite() || !normal.is_finite() || !strength.is_finite() =>
            {
                bad("repulsor must be finite")
            }
            Self::Friction { ground, air } if !(*ground >= 0.0) || !(*air >= 0.0) => {
                bad("friction must be non-negative")
            }
            Self::SpeedLimit(limit) if !(limit.x >= 0.0) || !(limit.y >= 0.0) => {
                bad("speed limit must be non-negative")
            }
            Self::GroundLimit(y) if !y.is_finite() => bad("ground line must be finite"),
            Self::ClampLocation { min, max } | Self::WarpLocation { min, max } if !ordered(min, max) => {
                bad("min must not exceed max")
            }
            _ => Ok(()),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::ConstantAcceleration(_) | Self::Repulsor { .. } => Stage::Acceleration,
            Self::Friction { .. } | Self::SpeedLimit(_) => Stage::Velocity,
            Self::GroundLimit(_) | Self::ClampLocation { .. } | Self::WarpLocation { .. } => Stage::PostMove,
            Self::Custom { stage, .. } => *stage,
        }
    }

    pub fn apply(&self, attrs: &mut Attributes) {
        match self {
            Self::ConstantAcceleration(a) => attrs.acceleration += *a,
            Self::Repulsor { point, normal, strength } => {
                let d = normal.dot(attrs.location - *point);
                if d > 0.0 {
                    attrs.acceleration += *normal * (strength / d);
                }
            }
            Self::Friction { ground, air } => {
                let coefficient = if attrs.was_grounded { *ground } else { *air };
                apply_friction(&mut attrs.velocity.x, coefficient);
            }
            Self::SpeedLimit(limit) => apply_speed_limit(&mut attrs.velocity, *limit),
            Self::GroundLimit(ground) => {
                let dist = ground - attrs.location.y;
                if dist <= 0.0 {
                    attrs.location.y += dist;
                    attrs.tags.insert(Tags::GROUNDED);
                }
            }
            Self::ClampLocation { min, max } => {
                attrs.location.x = attrs.location.x.max(min.x).min(max.x);
                attrs.location.y = attrs.location.y.max(min.y).min(max.y);
            }
            Self::WarpLocation { min, max } => {
                for axis in 0..2 {
                    let v = attrs.location[axis];
                    if v < min[axis] {
                        attrs.location[axis] = max[axis] - min[axis] + v;
                    } else if v >= max[axis] {
                        attrs.location[axis] = min[axis] + v - max[axis];
                    }
                }
            }
            Self::Custom { apply, .. } => apply(attrs),
        }
    }
}

/// Reduce |v| by `coefficient`, stopping at zero instead of flipping sign.
#[inline]
pub fn apply_friction(v: &mut f32, coefficient: f32) {
    if v.abs() > coefficient {
        *v -= coefficient * v.signum();
    } else {
        *v = 0.0;
    }
}

#[inline]
pub fn apply_speed_limit(v: &mut Vec2, limit: Vec2) {
    v.x = v.x.max(-limit.x).min(limit.x);
    v.y = v.y.max(-limit.y).min(limit.y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friction_never_overshoots_zero() {
        let mut v = 0.3;
        apply_friction(&mut v, 0.5);
        assert_eq!(v, 0.0);

        let mut v = -2.0;
        apply_friction(&mut v, 0.5);
        assert_eq!(v, -1.5);
    }

    #[test]
    fn speed_limit_clamps_each_axis() {
        let mut v = Vec2::new(-25.0, 3.0);
        apply_speed_limit(&mut v, Vec2::new(10.0, 2.0));
        assert_eq!(v, Vec2::new(-10.0, 2.0));
    }

    #[test]
    fn malformed_limits_do_not_panic_when_applied() {
        let mut v = Vec2::new(3.0, -4.0);
        apply_speed_limit(&mut v, Vec2::new(-1.0, f32::NAN));
        assert!(v.is_finite());

        let clamp = Modifier::ClampLocation { min: Vec2::new(10.0, 10.0), max: Vec2::new(0.0, 0.0) };
        let mut attrs = Attributes::new("a").at(5.0, 5.0);
        clamp.apply(&mut attrs);
        assert!(attrs.location.is_finite());
    }

    #[test]
    fn validate_rejects_inverted_and_negative_parameters() {
        assert!(Modifier::SpeedLimit(Vec2::new(-1.0, 5.0)).validate().is_err());
        assert!(Modifier::SpeedLimit(Vec2::new(f32::NAN, 5.0)).validate().is_err());
        assert!(Modifier::Friction { ground: -0.1, air: 0.0 }.validate().is_err());
        assert!(Modifier::ClampLocation { min: Vec2::new(10.0, 0.0), max: Vec2::new(0.0, 5.0) }
            .validate()
            .is_err());
        assert!(Modifier::WarpLocation { min: Vec2::zero(), max: Vec2::new(5.0, -1.0) }.validate().is_err());
        assert!(Modifier::GroundLimit(f32::INFINITY).validate().is_err());

        assert!(Modifier::SpeedLimit(Vec2::new(0.0, 5.0)).validate().is_ok());
        assert!(Modifier::ClampLocation { min: Vec2::zero(), max: Vec2::zero() }.validate().is_ok());
        assert!(Modifier::custom(Stage::PostMove, |_| {}).validate().is_ok());
    }

    #[test]
    fn friction_uses_previous_grounding() {
        let mut attrs = Attributes::new("a").with_velocity(4.0, 0.0);
        let friction = Modifier::Friction { ground: 1.0, air: 0.25 };

        friction.apply(&mut attrs);
        assert_eq!(attrs.velocity.x, 3.75);

        attrs.was_grounded = true;
        friction.apply(&mut attrs);
        assert_eq!(attrs.velocity.x, 2.75);
    }

    #[test]
    fn repulsor_only_acts_in_front_of_the_line() {
        let wall = Modifier::repulsor(Vec2::zero(), Vec2::new(0.0, -2.0), 10.0);
        let mut above = Attributes::new("above").at(0.0, -5.0);
        let mut below = Attributes::new("below").at(0.0, 5.0);
        wall.apply(&mut above);
        wall.apply(&mut below);

        assert_eq!(above.acceleration, Vec2::new(0.0, -2.0));
        assert_eq!(below.acceleration, Vec2::zero());
    }

    #[test]
    fn ground_limit_grounds_when_clamping() {
        let limit = Modifier::GroundLimit(100.0);
        let mut attrs = Attributes::new("a").at(0.0, 104.0);
        limit.apply(&mut attrs);
        assert_eq!(attrs.location.y, 100.0);
        assert!(attrs.is_grounded());
        assert_eq!(limit.stage(), Stage::PostMove);
    }

    #[test]
    fn warp_wraps_both_ways() {
        let warp = Modifier::WarpLocation { min: Vec2::new(0.0, 0.0), max: Vec2::new(100.0, 50.0) };
        let mut attrs = Attributes::new("a").at(-5.0, 55.0);
        warp.apply(&mut attrs);
        assert_eq!(attrs.location, Vec2::new(95.0, 5.0));
    }

    #[test]
    fn custom_modifier_reports_its_stage() {
        let m = Modifier::custom(Stage::Velocity, |a| a.velocity.y = 0.0);
        let mut attrs = Attributes::new("a").with_velocity(1.0, 9.0);
        m.apply(&mut attrs);
        assert_eq!(attrs.velocity.y, 0.0);
        assert!(format!("{m:?}").starts_with("Custom"));
    }
}
