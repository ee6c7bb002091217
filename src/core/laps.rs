//! # Lap Recorder
//!
//! Ordered log of displayed times captured on demand. Insertion order is
//! preserved and duplicates are allowed (two laps within one tick read the
//! same display). The zero time is never recorded.

use log::debug;

use crate::core::format::ZERO_TIME;

#[derive(Debug, Default, Clone)]
pub struct LapRecorder {
    laps: Vec<String>,
}

impl LapRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `time` unless it is the zero time. Returns whether a lap was added.
    pub fn record(&mut self, time: &str) -> bool {
        if time == ZERO_TIME {
            debug!("Lap suppressed: stopwatch shows zero");
            return false;
        }
        self.laps.push(time.to_string());
        true
    }

    pub fn clear(&mut self) {
        if !self.laps.is_empty() {
            debug!("Clearing {} laps", self.laps.len());
        }
        self.laps.clear();
    }

    pub fn laps(&self) -> &[String] {
        &self.laps
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_time_is_not_recorded() {
        let mut recorder = LapRecorder::new();
        assert!(!recorder.record(ZERO_TIME));
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_records_in_order_with_duplicates() {
        let mut recorder = LapRecorder::new();
        assert!(recorder.record("00:00:01.100"));
        assert!(recorder.record("00:00:01.100"));
        assert!(recorder.record("00:00:02.300"));

        assert_eq!(
            recorder.laps(),
            ["00:00:01.100", "00:00:01.100", "00:00:02.300"]
        );
        assert_eq!(recorder.len(), 3);
    }

    #[test]
    fn test_clear_empties() {
        let mut recorder = LapRecorder::new();
        recorder.record("00:00:05.000");
        recorder.clear();
        assert!(recorder.is_empty());
        assert!(recorder.laps().is_empty());

        // Clearing an empty recorder is fine
        recorder.clear();
        assert!(recorder.is_empty());
    }
}
