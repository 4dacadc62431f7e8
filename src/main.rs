//! Port Pilot headless runner
//!
//! Runs the simulation with the autopilot at the nominal frame rate and logs
//! the outcome. Usage: `port-pilot [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use env_logger::Env;
    use port_pilot::audio::SilentBackend;
    use port_pilot::consts::NOMINAL_DT;
    use port_pilot::sim::{GameEvent, GamePhase};
    use port_pilot::{Game, Settings};

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    let seconds: f32 = match args.next().map(|s| s.parse()) {
        Some(Ok(s)) => s,
        Some(Err(e)) => {
            log::warn!("Invalid duration: {} - using 60s", e);
            60.0
        }
        None => 60.0,
    };

    log::info!(
        "Port Pilot (headless) - {} control, {:?} collisions, {:?} scoring",
        settings.rules.control.as_str(),
        settings.rules.collision,
        settings.rules.scoring
    );

    let mut game = Game::new(&settings, Box::new(SilentBackend));
    game.set_autopilot(true);
    game.start();

    let frames = (seconds.max(0.0) / NOMINAL_DT).ceil() as u64;
    for _ in 0..frames {
        for event in game.update(NOMINAL_DT) {
            match event {
                GameEvent::Delivered {
                    boat,
                    color,
                    units,
                    points,
                    ..
                } => log::info!("{:?} unloaded {} {:?} (+{})", boat, units, color, points),
                GameEvent::Collision { a, b, .. } => log::info!("{:?} hit {:?}", a, b),
                _ => {}
            }
        }
        if game.state().session.phase == GamePhase::GameOver {
            break;
        }
    }

    let state = game.state();
    let stats = &state.session.stats;
    log::info!(
        "Finished after {:.1}s: score {}, best {}",
        state.time,
        state.session.score,
        state.session.best_score
    );
    log::info!(
        "{} deliveries, {} units (red {}, yellow {}, mixed {}), {} collisions",
        stats.deliveries,
        stats.units,
        stats.red_units,
        stats.yellow_units,
        stats.mixed_units,
        stats.collisions
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Game` directly
}
