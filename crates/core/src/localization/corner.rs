//! Corner estimation
//!
//! Each distance is compared with the half-field threshold to decide which
//! walls the robot is close to. The resulting flags are matched against an
//! ordered rule table; the first rule that matches picks the corner.
//!
//! The front sensor is not trusted yet: its flag is always false
//! ([`FRONT_SENSING_ENABLED`]), which keeps the two front-corner rules
//! dormant at their place in the table.

use crate::parameters::FieldParams;
use crate::sensing::WallDistances;

use super::pose::Pose;

/// Front wall adjacency is ignored until the front sensor is validated.
pub const FRONT_SENSING_ENABLED: bool = false;

/// Starting-position hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    LeftFront,
    RightFront,
    LeftBack,
    RightBack,
    /// No rule matched; pose is left at the motion controller's default
    Unresolved,
}

/// Wall adjacency flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CornerFlags {
    pub left: bool,
    pub right: bool,
    pub front: bool,
    pub back: bool,
}

impl CornerFlags {
    /// Compare each distance with the half-field threshold.
    ///
    /// NaN and oversized readings compare false and leave the flag unset.
    pub fn from_walls(walls: &WallDistances, half_field_in: f32) -> Self {
        Self {
            left: walls.left < half_field_in,
            right: walls.right < half_field_in,
            front: FRONT_SENSING_ENABLED && walls.front < half_field_in,
            back: walls.back < half_field_in,
        }
    }
}

/// One entry of the corner rule table
#[derive(Clone, Copy)]
pub struct CornerRule {
    pub corner: Corner,
    pub matches: fn(&CornerFlags) -> bool,
}

impl core::fmt::Debug for CornerRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CornerRule")
            .field("corner", &self.corner)
            .finish()
    }
}

fn left_front(f: &CornerFlags) -> bool {
    f.left && f.front
}

fn right_front(f: &CornerFlags) -> bool {
    f.right && f.front
}

fn left_back(f: &CornerFlags) -> bool {
    f.left && f.back
}

fn right_back(f: &CornerFlags) -> bool {
    f.right && f.back
}

/// Corner rules in evaluation order
pub const CORNER_RULES: [CornerRule; 4] = [
    CornerRule {
        corner: Corner::LeftFront,
        matches: left_front,
    },
    CornerRule {
        corner: Corner::RightFront,
        matches: right_front,
    },
    CornerRule {
        corner: Corner::LeftBack,
        matches: left_back,
    },
    CornerRule {
        corner: Corner::RightBack,
        matches: right_back,
    },
];

/// First matching corner, or `Unresolved`
pub fn classify(flags: &CornerFlags) -> Corner {
    CORNER_RULES
        .iter()
        .find(|rule| (rule.matches)(flags))
        .map(|rule| rule.corner)
        .unwrap_or(Corner::Unresolved)
}

impl Corner {
    /// Starting pose for this corner, `None` when unresolved
    pub fn initial_pose(&self, walls: &WallDistances, half_field_in: f32) -> Option<Pose> {
        let half = half_field_in;
        match self {
            Corner::LeftFront => Some(Pose::new(-half + walls.front, -half + walls.left, 270.0)),
            Corner::RightFront => Some(Pose::new(-half + walls.front, half - walls.right, 270.0)),
            Corner::LeftBack => Some(Pose::new(-half + walls.left, -half + walls.back, 0.0)),
            Corner::RightBack => Some(Pose::new(-half + walls.right, half - walls.back, 180.0)),
            Corner::Unresolved => None,
        }
    }

    /// True for the corners that have a scripted maneuver
    pub fn has_maneuver(&self) -> bool {
        matches!(self, Corner::LeftBack | Corner::RightBack)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Corner::LeftFront => "LeftFront",
            Corner::RightFront => "RightFront",
            Corner::LeftBack => "LeftBack",
            Corner::RightBack => "RightBack",
            Corner::Unresolved => "Unresolved",
        }
    }
}

/// Full output of one estimation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerEstimate {
    pub walls: WallDistances,
    pub flags: CornerFlags,
    pub corner: Corner,
    pub pose: Option<Pose>,
}

/// Classify the corner and compute the starting pose
pub fn estimate(walls: &WallDistances, field: &FieldParams) -> CornerEstimate {
    let half = field.half_field_in();
    let flags = CornerFlags::from_walls(walls, half);
    let corner = classify(&flags);

    CornerEstimate {
        walls: *walls,
        flags,
        corner,
        pose: corner.initial_pose(walls, half),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAR: f32 = 100.0;

    fn walls(left: f32, right: f32, front: f32, back: f32) -> WallDistances {
        WallDistances {
            left,
            right,
            front,
            back,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_flags_threshold_is_strict() {
        let flags = CornerFlags::from_walls(&walls(69.9, 70.0, 10.0, 70.1), 70.0);
        assert!(flags.left);
        assert!(!flags.right);
        assert!(!flags.back);
    }

    #[test]
    fn test_front_flag_always_false() {
        for front in [0.0, 5.0, 69.0, 70.0, 500.0] {
            let flags = CornerFlags::from_walls(&walls(10.0, 10.0, front, 10.0), 70.0);
            assert!(!flags.front);
        }
    }

    #[test]
    fn test_left_back_corner() {
        let result = estimate(&walls(65.0, FAR, FAR, 60.0), &FieldParams::default());
        assert_eq!(result.corner, Corner::LeftBack);
        let pose = result.pose.unwrap();
        assert!(approx(pose.x, -5.0));
        assert!(approx(pose.y, -10.0));
        assert_eq!(pose.heading, 0.0);
    }

    #[test]
    fn test_right_back_corner() {
        let result = estimate(&walls(FAR, 65.0, FAR, 60.0), &FieldParams::default());
        assert_eq!(result.corner, Corner::RightBack);
        let pose = result.pose.unwrap();
        assert!(approx(pose.x, -5.0));
        assert!(approx(pose.y, 10.0));
        assert_eq!(pose.heading, 180.0);
    }

    #[test]
    fn test_right_back_is_mirror_of_left_back() {
        let field = FieldParams::default();
        for (side, back) in [(10.0, 12.0), (30.5, 6.25), (69.0, 1.0)] {
            let left = estimate(&walls(side, FAR, FAR, back), &field).pose.unwrap();
            let right = estimate(&walls(FAR, side, FAR, back), &field).pose.unwrap();
            assert!(approx(right.x, left.x));
            assert!(approx(right.y, -left.y));
            assert_eq!(right.heading, 180.0);
            assert_eq!(left.mirrored(), right);
        }
    }

    #[test]
    fn test_left_wins_when_both_sides_close() {
        let result = estimate(&walls(20.0, 20.0, FAR, 20.0), &FieldParams::default());
        assert_eq!(result.corner, Corner::LeftBack);
    }

    #[test]
    fn test_unresolved_without_back() {
        let result = estimate(&walls(20.0, FAR, 20.0, FAR), &FieldParams::default());
        assert_eq!(result.corner, Corner::Unresolved);
        assert!(result.pose.is_none());
    }

    #[test]
    fn test_out_of_range_readings_unresolved() {
        let result = estimate(&walls(400.0, 400.0, 400.0, 400.0), &FieldParams::default());
        assert_eq!(result.corner, Corner::Unresolved);

        let result = estimate(&walls(f32::NAN, f32::NAN, 5.0, 5.0), &FieldParams::default());
        assert_eq!(result.corner, Corner::Unresolved);
    }

    #[test]
    fn test_front_rules_precede_back_rules() {
        // Dormant while front sensing is off, but the table order is fixed
        let flags = CornerFlags {
            left: true,
            right: false,
            front: true,
            back: true,
        };
        assert_eq!(classify(&flags), Corner::LeftFront);

        let flags = CornerFlags {
            left: false,
            right: true,
            front: true,
            back: true,
        };
        assert_eq!(classify(&flags), Corner::RightFront);
    }

    #[test]
    fn test_front_corner_poses() {
        let w = walls(12.0, 14.0, 8.0, FAR);
        let lf = Corner::LeftFront.initial_pose(&w, 70.0).unwrap();
        assert!(approx(lf.x, -62.0));
        assert!(approx(lf.y, -58.0));
        assert_eq!(lf.heading, 270.0);

        let rf = Corner::RightFront.initial_pose(&w, 70.0).unwrap();
        assert!(approx(rf.x, -62.0));
        assert!(approx(rf.y, 56.0));
        assert_eq!(rf.heading, 270.0);
    }

    #[test]
    fn test_rule_table_order() {
        let order: [Corner; 4] = [
            CORNER_RULES[0].corner,
            CORNER_RULES[1].corner,
            CORNER_RULES[2].corner,
            CORNER_RULES[3].corner,
        ];
        assert_eq!(
            order,
            [
                Corner::LeftFront,
                Corner::RightFront,
                Corner::LeftBack,
                Corner::RightBack
            ]
        );
    }

    #[test]
    fn test_only_back_corners_have_maneuvers() {
        assert!(Corner::LeftBack.has_maneuver());
        assert!(Corner::RightBack.has_maneuver());
        assert!(!Corner::LeftFront.has_maneuver());
        assert!(!Corner::Unresolved.has_maneuver());
    }
}
