//! Offline replay of recorded controller IMU logs through the orientation filter.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

use crate::config::FilterConfig;
use crate::filters::complementary::OrientationFilter;
use crate::types::{ImuSample, Vector3};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: f64,
    pub controller: String,
    pub gyro: Vector3,
    pub accel: Vector3,
}

impl Reading {
    pub fn sample(&self) -> ImuSample {
        ImuSample::new(self.timestamp, self.gyro, self.accel)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReplayLog {
    pub readings: Vec<Reading>,
}

/// Load a JSON log, gunzipping it first if the path ends in `.gz`.
pub fn load_log(path: &Path) -> anyhow::Result<ReplayLog> {
    let file = File::open(path)?;
    if path.extension().map(|e| e == "gz").unwrap_or(false) {
        parse_log(GzDecoder::new(file))
    } else {
        parse_log(file)
    }
}

pub fn parse_log<R: Read>(reader: R) -> anyhow::Result<ReplayLog> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControllerSummary {
    pub controller: String,
    pub estimate: Option<Vector3>,
    pub samples: u64,
    pub skipped: u64,
    pub degenerate_updates: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReplayReport {
    pub controllers: Vec<ControllerSummary>,
}

#[derive(Debug)]
struct ControllerTrack {
    filter: OrientationFilter,
    last_timestamp: Option<f64>,
    samples: u64,
    skipped: u64,
}

/// One independent orientation filter per controller id.
#[derive(Debug)]
pub struct ControllerBank {
    config: FilterConfig,
    tracks: BTreeMap<String, ControllerTrack>,
}

impl ControllerBank {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            tracks: BTreeMap::new(),
        }
    }

    /// Feed a sample to its controller's filter.
    ///
    /// Returns `None` when the sample was dropped: non-finite or degenerate
    /// sensor data, or a timestamp not after the controller's previous sample.
    pub fn process(&mut self, controller: &str, sample: &ImuSample) -> Option<Vector3> {
        let config = self.config;
        let track = self
            .tracks
            .entry(controller.to_string())
            .or_insert_with(|| ControllerTrack {
                filter: OrientationFilter::with_config(config),
                last_timestamp: None,
                samples: 0,
                skipped: 0,
            });

        if let Err(e) = sample.validate() {
            log::warn!("[{controller}] dropping sample at t={}: {e}", sample.timestamp);
            track.skipped += 1;
            return None;
        }

        let dt = match track.last_timestamp {
            Some(last) if sample.timestamp <= last => {
                log::warn!(
                    "[{controller}] dropping out-of-order sample t={} <= {last}",
                    sample.timestamp
                );
                track.skipped += 1;
                return None;
            }
            Some(last) => sample.timestamp - last,
            None => 0.0,
        };

        track.last_timestamp = Some(sample.timestamp);
        track.samples += 1;
        Some(track.filter.update_sample(sample, dt))
    }

    pub fn estimate(&self, controller: &str) -> Option<Vector3> {
        self.tracks.get(controller).and_then(|t| t.filter.estimate())
    }

    pub fn controller_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn report(&self) -> ReplayReport {
        let controllers = self
            .tracks
            .iter()
            .map(|(id, track)| ControllerSummary {
                controller: id.clone(),
                estimate: track.filter.estimate(),
                samples: track.samples,
                skipped: track.skipped,
                degenerate_updates: track.filter.get_state().degenerate_updates,
            })
            .collect();
        ReplayReport { controllers }
    }
}

pub fn replay_log(log: &ReplayLog, config: FilterConfig) -> ReplayReport {
    let mut bank = ControllerBank::new(config);
    for reading in &log.readings {
        bank.process(&reading.controller, &reading.sample());
    }
    log::info!(
        "replayed {} readings across {} controllers",
        log.readings.len(),
        bank.controller_count()
    );
    bank.report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reading(controller: &str, timestamp: f64, accel: Vector3) -> Reading {
        Reading {
            timestamp,
            controller: controller.to_string(),
            gyro: Vector3::ZERO,
            accel,
        }
    }

    #[test]
    fn test_controllers_tracked_independently() {
        let log = ReplayLog {
            readings: vec![
                reading("a", 0.0, Vector3::new(0.0, 0.0, 1.0)),
                reading("b", 0.0, Vector3::new(0.0, -1.0, 0.0)),
                reading("a", 0.01, Vector3::new(0.0, 0.0, 1.0)),
                reading("b", 0.01, Vector3::new(0.0, -1.0, 0.0)),
            ],
        };
        let report = replay_log(&log, FilterConfig::default());
        assert_eq!(report.controllers.len(), 2);

        let a = &report.controllers[0];
        assert_eq!(a.controller, "a");
        assert_eq!(a.samples, 2);
        let estimate = a.estimate.unwrap();
        assert_abs_diff_eq!(estimate.z, 1.0, epsilon = 1e-12);

        let b = &report.controllers[1];
        assert_eq!(b.estimate.unwrap().y, -1.0);
        assert_eq!(b.degenerate_updates, 1);
    }

    #[test]
    fn test_skips_invalid_and_out_of_order() {
        let mut bank = ControllerBank::new(FilterConfig::default());
        let up = Vector3::new(0.0, 0.0, 1.0);
        assert!(bank.process("a", &ImuSample::new(1.0, Vector3::ZERO, up)).is_some());
        assert!(bank
            .process("a", &ImuSample::new(2.0, Vector3::ZERO, Vector3::ZERO))
            .is_none());
        assert!(bank.process("a", &ImuSample::new(0.5, Vector3::ZERO, up)).is_none());
        assert!(bank.process("a", &ImuSample::new(1.5, Vector3::ZERO, up)).is_some());

        let report = bank.report();
        assert_eq!(report.controllers[0].samples, 2);
        assert_eq!(report.controllers[0].skipped, 2);
    }

    #[test]
    fn test_skips_duplicate_timestamp() {
        let mut bank = ControllerBank::new(FilterConfig::default());
        let sample = ImuSample::new(1.0, Vector3::ZERO, Vector3::new(0.0, 0.0, 1.0));
        assert!(bank.process("a", &sample).is_some());
        assert!(bank.process("a", &sample).is_none());

        let report = bank.report();
        assert_eq!(report.controllers[0].samples, 1);
        assert_eq!(report.controllers[0].skipped, 1);
    }

    #[test]
    fn test_non_finite_gyro_does_not_poison_estimate() {
        let mut bank = ControllerBank::new(FilterConfig::default());
        let up = Vector3::new(0.0, 0.0, 1.0);
        assert!(bank.process("a", &ImuSample::new(0.0, Vector3::ZERO, up)).is_some());
        assert!(bank
            .process("a", &ImuSample::new(0.01, Vector3::new(f64::NAN, 0.0, 0.0), up))
            .is_none());
        assert!(bank
            .process("a", &ImuSample::new(f64::INFINITY, Vector3::ZERO, up))
            .is_none());

        for i in 1..=100 {
            bank.process("a", &ImuSample::new(0.01 * i as f64, Vector3::ZERO, up));
        }
        let estimate = bank.estimate("a").unwrap();
        assert!(estimate.x.is_finite() && estimate.y.is_finite() && estimate.z.is_finite());
        assert_abs_diff_eq!(estimate.z, 1.0, epsilon = 1e-9);

        let report = bank.report();
        assert_eq!(report.controllers[0].samples, 101);
        assert_eq!(report.controllers[0].skipped, 2);
    }

    #[test]
    fn test_parse_log_json() {
        let json = r#"{"readings":[
            {"timestamp":0.0,"controller":"00:06:f7:aa:bb:cc","gyro":{"x":0,"y":0,"z":0},"accel":{"x":0,"y":0,"z":2}}
        ]}"#;
        let log = parse_log(json.as_bytes()).unwrap();
        assert_eq!(log.readings.len(), 1);
        assert_eq!(log.readings[0].accel, Vector3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_empty_log() {
        let report = replay_log(&ReplayLog::default(), FilterConfig::default());
        assert!(report.controllers.is_empty());
    }
}
