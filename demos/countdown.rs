use std::env;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, TimeZone};
use miqat::{Clock, FixedLocality, PrayerBoard, Resolver, ResolverConfig};
use tracing_subscriber::EnvFilter;

/// Wall clock replayed from a fixed starting instant, so the bundled
/// dataset always has a record for "today".
struct ReplayClock {
    start: DateTime<Local>,
    origin: Instant,
}

impl Clock for ReplayClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed()).unwrap_or_default();
        self.start + elapsed
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match env::args().nth(1) {
        Some(path) => ResolverConfig::from_file(&path).unwrap_or_else(|err| {
            eprintln!("{err}; using defaults");
            ResolverConfig::default()
        }),
        None => ResolverConfig::default(),
    };
    let dataset = config
        .dataset
        .clone()
        .unwrap_or_else(|| "data/prayer_times.json".into());

    let resolver = Resolver::load_or_degraded(dataset, config);
    for locality in resolver.dataset().localities() {
        println!("Covered: {locality}");
    }

    let clock = ReplayClock {
        start: Local.with_ymd_and_hms(2024, 5, 6, 13, 13, 57).unwrap(),
        origin: Instant::now(),
    };
    let board = PrayerBoard::new(resolver, FixedLocality::new("Ontario", "Toronto"), clock);

    for _ in 0..5 {
        let state = board.refresh();
        println!("{:<10} {}", state.label, state.countdown);
        thread::sleep(Duration::from_secs(1));
    }
}
