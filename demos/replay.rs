use anyhow::Context;
use parkwatch::{Frame, MonitorConfig, Monitoring, Observation, ParkingMonitor};

use std::collections::BTreeMap;
use std::io::BufRead;

/// Replays a tracker trace through the monitor and prints per-frame counts.
/// Each line of the trace is `frame_no id cx cy [confirmed]`, whitespace
/// separated; `confirmed` defaults to 1.
fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: replay <trace-file>")?;

    let file = std::fs::File::open(&path)?;

    let mut frames: BTreeMap<u64, Vec<Observation>> = BTreeMap::new();

    for line in std::io::BufReader::new(file).lines() {
        let line = line?;
        let mut it = line.split_whitespace();

        let (frame_no, id, cx, cy) = match (it.next(), it.next(), it.next(), it.next()) {
            (Some(f), Some(id), Some(cx), Some(cy)) => (f, id, cx, cy),
            _ => continue,
        };

        let confirmed = it.next().map(|x| x != "0").unwrap_or(true);

        frames.entry(frame_no.parse()?).or_default().push(Observation::new(
            id.parse()?,
            cx.parse()?,
            cy.parse()?,
            confirmed,
        ));
    }

    let mut monitor = ParkingMonitor::new(MonitorConfig::default())?;

    for (frame_no, observations) in frames {
        let summary = monitor.process(&Frame::new(observations), &path);

        println!(
            "frame {}: {} confirmed, {} parked",
            frame_no, summary.confirmed_count, summary.parked_count
        );
    }

    for track in monitor.tracks(&path).iter() {
        println!(
            "  track {} at ({:.1}, {:.1}): {:?}, mean speed {:.2}",
            track.track_id, track.position.0, track.position.1, track.state, track.mean_speed
        );
    }

    Ok(())
}
