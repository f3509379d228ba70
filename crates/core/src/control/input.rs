//! Controller and sensor inputs for one tick

use bitflags::bitflags;

use crate::sensing::RawDistances;

bitflags! {
    /// Digital controller buttons, one bit per function
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u16 {
        /// Toggle reversed driving
        const REVERSE_DRIVE = 1 << 0;
        /// Run both intakes outwards (held)
        const INTAKE_OUT = 1 << 1;
        /// Run both intakes inwards (held)
        const INTAKE_IN = 1 << 2;
        /// Toggle both grab pneumatics
        const GRAB = 1 << 3;
        /// Toggle the intake lift pneumatic
        const INTAKE_LIFT = 1 << 4;
        /// Start the lower-lift macro
        const LIFT_LOWER = 1 << 5;
        /// Start the raise-lift macro
        const LIFT_RAISE = 1 << 6;
        /// Toggle ring sorting
        const SORT = 1 << 7;
        /// Toggle the redirect pneumatic
        const REDIRECT = 1 << 8;
    }
}

/// Rising-edge detector for [`Buttons`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdges {
    previous: Buttons,
}

impl ButtonEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buttons pressed this tick that were not held on the previous tick
    pub fn update(&mut self, held: Buttons) -> Buttons {
        let pressed = held & !self.previous;
        self.previous = held;
        pressed
    }
}

/// Controller state sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    /// Left stick vertical (-127..=127)
    pub forward: i16,
    /// Left stick horizontal (-127..=127)
    pub turn: i16,
    /// Right stick vertical, manual lift velocity
    pub lift: i16,
    /// Buttons currently held
    pub buttons: Buttons,
}

/// Sensor readings sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    pub distances: RawDistances,
    /// Raw sort sensor reading (mm)
    pub sort_mm: f32,
    /// Lift encoder position (ticks)
    pub lift_position: f32,
    pub imu_calibrating: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_fire_once_per_press() {
        let mut edges = ButtonEdges::new();
        assert_eq!(edges.update(Buttons::GRAB), Buttons::GRAB);
        assert_eq!(edges.update(Buttons::GRAB), Buttons::empty());
        assert_eq!(edges.update(Buttons::empty()), Buttons::empty());
        assert_eq!(edges.update(Buttons::GRAB), Buttons::GRAB);
    }

    #[test]
    fn test_edges_are_per_button() {
        let mut edges = ButtonEdges::new();
        edges.update(Buttons::INTAKE_IN);
        let pressed = edges.update(Buttons::INTAKE_IN | Buttons::SORT);
        assert_eq!(pressed, Buttons::SORT);
    }
}
