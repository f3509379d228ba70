//! Manual-operation tick

use crate::actuator::{ActuatorError, Actuators, BrakeMode, IntakeMotor, Pneumatic};
use crate::parameters::RobotParams;
use crate::sensing::{sort_distance_in, DistanceReport, DistanceTelemetry};

use super::ejection::{EjectionChain, EjectionState};
use super::input::{ButtonEdges, Buttons, ControllerInput, SensorSnapshot};
use super::lift_macro::{LiftCommand, LiftMacroSequencer, MacroState};
use super::session::SessionState;

/// Outcome of one tick, for logging by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub macro_state: MacroState,
    /// Lift macros that ended this tick
    pub macros_finished: u8,
    pub ejection_state: EjectionState,
    pub telemetry: Option<DistanceReport>,
}

/// Commanded pneumatic outputs, in [`Pneumatic::ALL`] order
type PneumaticOutputs = [bool; 4];

/// Manual operation state and loop body
#[derive(Debug, Clone)]
pub struct OperatorControl {
    params: RobotParams,
    session: SessionState,
    edges: ButtonEdges,
    lift_macro: LiftMacroSequencer,
    ejection: EjectionChain,
    telemetry: DistanceTelemetry,
    /// Pneumatic state last written to the actuators
    applied: PneumaticOutputs,
}

impl OperatorControl {
    pub fn new(params: RobotParams, now_ms: u64) -> Self {
        Self {
            params,
            session: SessionState::new(),
            edges: ButtonEdges::new(),
            lift_macro: LiftMacroSequencer::new(params.lift),
            ejection: EjectionChain::new(params.ejection),
            telemetry: DistanceTelemetry::new(params.operator.telemetry_period_ms, now_ms),
            applied: [false; 4],
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Put the actuators in their start-of-match state.
    ///
    /// Intakes coast, the lift holds position and every pneumatic is
    /// retracted.
    pub fn initialize(&mut self, actuators: &mut dyn Actuators) -> Result<(), ActuatorError> {
        actuators.set_brake_modes(BrakeMode::Coast, BrakeMode::Hold)?;
        for output in Pneumatic::ALL {
            actuators.set_pneumatic(output, false)?;
        }
        self.applied = [false; 4];
        Ok(())
    }

    /// Run one iteration of manual operation.
    pub fn tick(
        &mut self,
        now_ms: u64,
        input: &ControllerInput,
        sensors: &SensorSnapshot,
        actuators: &mut dyn Actuators,
    ) -> Result<TickReport, ActuatorError> {
        let pressed = self.edges.update(input.buttons);
        let session = &mut self.session;

        if pressed.contains(Buttons::REVERSE_DRIVE) {
            session.drive_reversed = !session.drive_reversed;
        }
        if pressed.contains(Buttons::GRAB) {
            session.grab_extended = !session.grab_extended;
        }
        if pressed.contains(Buttons::INTAKE_LIFT) {
            session.intake_lift_raised = !session.intake_lift_raised;
        }
        if pressed.contains(Buttons::SORT) {
            session.sort_enabled = !session.sort_enabled;
        }

        let lift_command = self.lift_macro.update(
            pressed.contains(Buttons::LIFT_RAISE),
            pressed.contains(Buttons::LIFT_LOWER),
            sensors.lift_position,
            now_ms,
            session,
        );

        let sort_in = sort_distance_in(sensors.sort_mm, &self.params.distance);
        let eject_command = self.ejection.update(sort_in, now_ms, session);

        // An active lift macro owns the redirect
        if pressed.contains(Buttons::REDIRECT) && !self.lift_macro.is_active() {
            session.redirect_extended = !session.redirect_extended;
        }

        // Drive
        let forward = if session.drive_reversed {
            input.forward.saturating_neg()
        } else {
            input.forward
        };
        actuators.arcade(forward, input.turn)?;

        // Intakes
        if !session.upper_intake_override {
            let velocity = self.params.operator.intake_velocity;
            let rpm = if input.buttons.contains(Buttons::INTAKE_OUT) {
                -velocity
            } else if input.buttons.contains(Buttons::INTAKE_IN) {
                velocity
            } else {
                0
            };
            actuators.set_intake_velocity(IntakeMotor::Upper, rpm)?;
            actuators.set_intake_velocity(IntakeMotor::Lower, rpm)?;
        }
        if let Some(rpm) = eject_command {
            actuators.set_intake_velocity(IntakeMotor::Upper, rpm)?;
        }

        // Lift
        match lift_command {
            Some(LiftCommand::Velocity(rpm)) => actuators.set_lift_velocity(rpm)?,
            Some(LiftCommand::Brake) => actuators.brake_lift()?,
            None if !session.lift_manual_disabled => {
                if input.lift != 0 {
                    actuators.set_lift_velocity(input.lift)?;
                } else {
                    actuators.brake_lift()?;
                }
            }
            None => {}
        }

        self.apply_pneumatics(actuators)?;

        let telemetry = self.telemetry.sample(
            now_ms,
            sensors.imu_calibrating,
            &sensors.distances,
            &self.params.distance,
        );

        Ok(TickReport {
            macro_state: self.lift_macro.state(),
            macros_finished: self.lift_macro.finished(),
            ejection_state: self.ejection.state(),
            telemetry,
        })
    }

    fn commanded(&self) -> PneumaticOutputs {
        let s = &self.session;
        // Pneumatic::ALL order: grab left, grab right, intake lift, redirect
        [
            s.grab_extended,
            s.grab_extended,
            s.intake_lift_raised,
            s.redirect_extended,
        ]
    }

    fn apply_pneumatics(&mut self, actuators: &mut dyn Actuators) -> Result<(), ActuatorError> {
        let commanded = self.commanded();
        for (i, output) in Pneumatic::ALL.iter().enumerate() {
            if commanded[i] != self.applied[i] {
                actuators.set_pneumatic(*output, commanded[i])?;
                self.applied[i] = commanded[i];
            }
        }
        Ok(())
    }
}
