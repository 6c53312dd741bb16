use log::*;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;
use timelog::logger::LogLogger;
use timelog::registry::TimerRegistry;

// usage: timelog [config.ini]
fn main() -> Result<(), timelog::error::Error> {
    // provide logging format
    timelog::logger::log_init();
    let config = match std::env::args().nth(1) {
        Some(filename) => timelog::config::from_file(&filename)?,
        None => Default::default(),
    };
    info!("{config:#?}");
    let logger = Arc::new(LogLogger::new(config.log_target.clone()));
    let timers = TimerRegistry::from_config(&config, Some(logger));

    let (started, run_key) = timelog::timer_start!(timers);
    if !started {
        warn!("timer [{run_key:?}] was not started");
    }
    let keys: Vec<String> = (1..=5).map(|i| i.to_string()).collect();
    for key in keys.iter() {
        timers.start(key);
        sleep(Duration::from_millis(200));
    }
    timers.log_summary();

    timers.reset(&keys[0]);
    timers.start(&keys[0]);
    timers.stop(&keys[0]);
    timers.stop_and_remove(&keys[1]);
    timers.restart(&keys[2]);
    timers.stop(&keys[2]);
    timers.stop(&keys[3]);
    timers.stop(&keys[4]);
    timers.stop(&run_key);
    info!("timers left: {:?}", timers.list_keys());
    Ok(())
}
