//! Simulation runner
//!
//! Runs a scenario end to end: the optional autonomous routine in lockstep
//! on a blocking task, then manual operation on a tokio interval. A
//! separate task logs the robot pose from a shared snapshot on its own
//! period.

use std::time::Duration;

use corner_pilot_core::control::{EjectionState, MacroState, OperatorControl};
use corner_pilot_core::localization::CornerEstimate;
use corner_pilot_core::maneuver::PlaybackReport;
use corner_pilot_core::parameters::RobotParams;
use corner_pilot_core::routine::{run_autonomous, AutonomousReport};
use corner_pilot_core::traits::TimeSource;
use corner_pilot_core::Pose;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::clock::SimClock;
use crate::error::SimulatorError;
use crate::motion::SimMotion;
use crate::robot::{SharedRobot, SimRobot};
use crate::scenario::Scenario;

/// State published to the telemetry task after every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub sim_time_ms: u64,
    pub pose: Pose,
    pub lift_position: f32,
    pub macro_state: MacroState,
    pub ejection_state: EjectionState,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub scenario: String,
    /// Corner estimate, if the autonomous routine ran
    pub estimate: Option<CornerEstimate>,
    pub playback: Option<PlaybackReport>,
    /// Manual-operation ticks executed
    pub ticks: u64,
    pub sim_time_ms: u64,
    /// True pose at the end of the run
    pub final_pose: Pose,
    pub lift_position: f32,
    pub macros_completed: u32,
    pub ejections: u32,
    pub distance_reports: u32,
    /// Pose lines written by the telemetry task
    pub pose_logs: u32,
}

/// Run a scenario to completion.
pub async fn run(scenario: &Scenario, params: RobotParams) -> Result<RunSummary, SimulatorError> {
    params.validate()?;
    scenario.validate()?;

    let config = scenario.sim.clone();
    let tick_ms = config.tick_ms;
    let mut robot = SharedRobot::new(SimRobot::new(
        config.clone(),
        &params,
        scenario.placement.pose(),
    ));
    let clock = SimClock::new();

    log::info!(
        "scenario '{}': placed at ({:.1}, {:.1}, {:.1})",
        scenario.name,
        scenario.placement.x,
        scenario.placement.y,
        scenario.placement.heading
    );

    let idle = (MacroState::Idle, EjectionState::Idle);
    let (snapshot_tx, snapshot_rx) = watch::channel(snapshot(&robot, &clock, idle.0, idle.1));
    let telemetry = tokio::spawn(log_poses(
        snapshot_rx,
        Duration::from_millis(config.telemetry_ms),
    ));

    let autonomous = if scenario.autonomous {
        let report = {
            let robot = robot.clone();
            let clock = clock.clone();
            let config = config.clone();
            tokio::task::spawn_blocking(move || -> Result<AutonomousReport, SimulatorError> {
                let raw = robot.lock().sensors(clock.now_ms()).distances;
                let mut motion = SimMotion::new(robot.clone(), clock, &config);
                let mut actuators = robot;
                Ok(run_autonomous(&raw, &params, &mut motion, &mut actuators)?)
            })
            .await??
        };
        log_autonomous(&report, clock.now_ms());
        snapshot_tx.send_replace(snapshot(&robot, &clock, idle.0, idle.1));
        Some(report)
    } else {
        None
    };

    let mut control = OperatorControl::new(params, clock.now_ms());
    control.initialize(&mut robot)?;

    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let start_ms = clock.now_ms();
    let mut ticks = 0u64;
    let mut macros_completed = 0u32;
    let mut ejections = 0u32;
    let mut distance_reports = 0u32;
    let mut last_macro = MacroState::Idle;
    let mut last_ejection = EjectionState::Idle;

    while clock.now_ms() - start_ms < scenario.duration_ms {
        interval.tick().await;

        let now_ms = clock.now_ms();
        let phase_ms = now_ms - start_ms;
        let input = scenario.input_at(phase_ms);
        let sensors = {
            let mut r = robot.lock();
            r.set_ring_present(scenario.ring_present(phase_ms));
            r.sensors(now_ms)
        };

        let report = control.tick(now_ms, &input, &sensors, &mut robot)?;

        if report.macros_finished > 0 {
            macros_completed += u32::from(report.macros_finished);
            log::info!(
                "t={} lift macro finished at {:.0} ticks",
                phase_ms,
                sensors.lift_position
            );
        }
        if report.macro_state != last_macro {
            if report.macro_state != MacroState::Idle {
                log::info!("t={} lift macro {:?} armed", phase_ms, report.macro_state);
            }
            last_macro = report.macro_state;
        }
        if report.ejection_state != last_ejection {
            if report.ejection_state == EjectionState::Stage2Active {
                ejections += 1;
            }
            log::debug!("t={} ejection {:?}", phase_ms, report.ejection_state);
            last_ejection = report.ejection_state;
        }
        if let Some(distances) = report.telemetry {
            distance_reports += 1;
            let w = distances.walls;
            log::trace!(
                "t={} walls L {:.2} R {:.2} F {:.2} B {:.2}",
                phase_ms,
                w.left,
                w.right,
                w.front,
                w.back
            );
        }

        robot.lock().step(tick_ms);
        clock.advance(tick_ms);
        ticks += 1;
        snapshot_tx.send_replace(snapshot(
            &robot,
            &clock,
            report.macro_state,
            report.ejection_state,
        ));
    }

    drop(snapshot_tx);
    let pose_logs = telemetry.await?;

    let (final_pose, lift_position) = {
        let r = robot.lock();
        (r.pose(), r.lift_position())
    };
    let summary = RunSummary {
        scenario: scenario.name.clone(),
        estimate: autonomous.as_ref().map(|a| a.estimate),
        playback: autonomous.and_then(|a| a.playback),
        ticks,
        sim_time_ms: clock.now_ms(),
        final_pose,
        lift_position,
        macros_completed,
        ejections,
        distance_reports,
        pose_logs,
    };
    log::info!(
        "finished after {} ms: pose ({:.1}, {:.1}, {:.1}), {} macros, {} ejections",
        summary.sim_time_ms,
        final_pose.x,
        final_pose.y,
        final_pose.heading,
        macros_completed,
        ejections
    );
    Ok(summary)
}

fn snapshot(
    robot: &SharedRobot,
    clock: &SimClock,
    macro_state: MacroState,
    ejection_state: EjectionState,
) -> Snapshot {
    let r = robot.lock();
    Snapshot {
        sim_time_ms: clock.now_ms(),
        pose: r.pose(),
        lift_position: r.lift_position(),
        macro_state,
        ejection_state,
    }
}

fn log_autonomous(report: &AutonomousReport, now_ms: u64) {
    let estimate = &report.estimate;
    let w = estimate.walls;
    log::info!(
        "walls L {:.2} R {:.2} F {:.2} B {:.2} -> {}",
        w.left,
        w.right,
        w.front,
        w.back,
        estimate.corner.name()
    );
    match estimate.pose {
        Some(pose) => log::info!(
            "initial pose ({:.1}, {:.1}, {:.1})",
            pose.x,
            pose.y,
            pose.heading
        ),
        None => log::warn!("corner unresolved, autonomous skipped"),
    }
    if let Some(playback) = &report.playback {
        if playback.is_clean() {
            log::info!(
                "script finished: {} steps in {} ms",
                playback.steps_run,
                now_ms
            );
        } else {
            log::warn!(
                "script finished: {} steps in {} ms, {} waits timed out at steps {:?}",
                playback.steps_run,
                now_ms,
                playback.timeout_count,
                playback.timed_out
            );
        }
    }
}

/// Log the latest snapshot every `period` until the sender is dropped.
async fn log_poses(mut rx: watch::Receiver<Snapshot>, period: Duration) -> u32 {
    let mut interval = tokio::time::interval(period);
    let mut logged = 0;
    loop {
        interval.tick().await;
        if rx.has_changed().is_err() {
            break;
        }
        let s = *rx.borrow_and_update();
        log::info!(
            "t={} pose ({:.1}, {:.1}, {:.1}) lift {:.0} {:?}/{:?}",
            s.sim_time_ms,
            s.pose.x,
            s.pose.y,
            s.pose.heading,
            s.lift_position,
            s.macro_state,
            s.ejection_state
        );
        logged += 1;
    }
    logged
}
