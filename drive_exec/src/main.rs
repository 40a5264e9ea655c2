//! Main driving control executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Input feed latching (pose, speed, paths, objects)
//!         - Control cycle processing:
//!             - Object projection
//!             - Pure pursuit steering
//!             - Velocity planning (first cycle) and ACC target speed
//!             - Longitudinal PID
//!         - Command output
//!
//! The middleware transport is not part of this executable: inputs come from
//! a scenario file and the emitted commands drive a trivial kinematic
//! integrator, so the full control stack can be exercised without the
//! external simulator attached.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, trace, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use drive_lib::{ctrl_cycle::CtrlCycle, data_store::DataStore, scenario::Scenario};
use util::{
    logger::{logger_init, LevelFilter},
    maths::lin_map,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 1.0 / 30.0;

/// Maximum acceleration of the integrator at full throttle (or full brake).
///
/// Units: meters/second^2
const MAX_ACCEL_MS2: f64 = 4.0;

/// Maximum wheel angle of the integrator at full steering demand.
///
/// Units: radians
const MAX_STEER_RAD: f64 = 0.7;

/// Wheelbase used by the integrator's bicycle model.
///
/// Units: meters
const WHEELBASE_M: f64 = 2.6;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("drive_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("ADC Driving Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD SCENARIO ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // The single argument is the path to the scenario to run
    if args.len() != 2 {
        return Err(eyre!(
            "Expected path to scenario file as only argument, found {} arguments",
            args.len() - 1
        ));
    }

    info!("Loading scenario from \"{}\"", &args[1]);

    let scenario = Scenario::load(&args[1]).wrap_err("Failed to load scenario")?;

    info!(
        "Scenario lasts {:.02} s, global path has {} points, {} objects\n",
        scenario.duration_s,
        scenario.global_path.get_num_points(),
        scenario.objects.len()
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut ctrl_cycle = CtrlCycle::init().wrap_err("Failed to initialise CtrlCycle")?;

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut ds = DataStore::default();
    let mut profile_saved = false;

    // Integrator state
    let mut pose = scenario.start_pose;
    let mut speed_ms = scenario.start_speed_ms;

    let num_cycles = (scenario.duration_s / CYCLE_PERIOD_S).ceil() as u128;

    while ds.num_cycles < num_cycles {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start();

        // ---- DATA INPUT ----

        // Latch the input feeds. The global path is delivered exactly once.
        if ds.global_path.is_none() {
            ds.global_path = Some(scenario.global_path.clone());
        }

        ds.ego_pose = Some(pose);
        ds.ego_speed_ms = Some(speed_ms);
        ds.local_path = Some(scenario.local_path_at(&pose.position_m));
        ds.objects = Some(scenario.objects.clone());

        // ---- CONTROL ALGORITHM PROCESSING ----

        let cmd = ctrl_cycle.step(&mut ds);

        // Dump the velocity profile on its first availability
        if !profile_saved {
            if let Some(ref profile) = ds.vel_profile {
                session.save("vel_profile.json", profile);
                profile_saved = true;
            }
        }

        // ---- COMMAND OUTPUT ----

        // The actuator interface is the integrator: move the ego according
        // to the emitted command. A skipped cycle moves nothing.
        if let Some(cmd) = cmd {
            trace!(
                "cmd: steering {:+.3}, throttle {:.3}, brake {:.3}",
                cmd.steering,
                cmd.throttle,
                cmd.brake
            );

            let accel_ms2 = (cmd.throttle - cmd.brake) * MAX_ACCEL_MS2;
            speed_ms = (speed_ms + accel_ms2 * CYCLE_PERIOD_S).max(0.0);

            let steer_rad = lin_map(
                (-1.0, 1.0),
                (-MAX_STEER_RAD, MAX_STEER_RAD),
                cmd.steering,
            );

            pose.heading_rad += speed_ms * steer_rad.tan() / WHEELBASE_M * CYCLE_PERIOD_S;
            let forward = pose.forward();
            pose.position_m += speed_ms * CYCLE_PERIOD_S * forward;
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64()
                        - Duration::from_secs_f64(CYCLE_PERIOD_S).as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!(
        "End of scenario: ego at ({:.2}, {:.2}) m doing {:.2} m/s",
        pose.position_m[0], pose.position_m[1], speed_ms
    );
    info!("End of execution");

    Ok(())
}
