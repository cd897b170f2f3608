//! Derived fields: time, distance and acceleration.
//!
//! [`DerivedState`] is the accumulator of a single sequential fold over the
//! decoded entries. It only advances for entries that are retained.

use crate::config::SamplePeriod;
use crate::entry::LogEntry;
use crate::error::DeriveError;
use serde::{Deserialize, Serialize};

pub const TIME_FIELD: &str = "time";
pub const DISTANCE_FIELD: &str = "distance";
pub const SPEED_FIELD: &str = "speed";
pub const ACCELERATION_FIELD: &str = "acceleration";

/// What to do with an entry whose predecessor has no speed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AccelerationGaps {
    /// Drop the entry. Every following entry with a speed is dropped too,
    /// until an entry without a speed is retained.
    #[default]
    Drop,
    /// Keep the entry and leave out `acceleration`.
    Omit,
}

/// Formats a derived value the way table cells expect (`%8.3f`).
pub fn fixed(value: f64) -> String {
    format!("{:8.3}", value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Predecessor {
    None,
    WithoutSpeed,
    Speed(f64),
}

/// Running counters threaded through one tabulation.
#[derive(Debug, Clone)]
pub struct DerivedState {
    period: SamplePeriod,
    index: u64,
    distance: f64,
    previous: Predecessor,
}

impl DerivedState {
    pub fn new(period: SamplePeriod) -> Self {
        Self {
            period,
            index: 0,
            distance: 0.0,
            previous: Predecessor::None,
        }
    }

    /// Number of entries retained so far.
    pub fn retained(&self) -> u64 {
        self.index
    }

    /// Distance accumulated so far, in speed units times seconds.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Adds `time`, and for entries with a speed `distance` and
    /// `acceleration`, to `entry`.
    ///
    /// On error the entry must be discarded. The distance total may already
    /// have advanced for a [`DeriveError::MissingPreviousSpeed`] drop; the
    /// retained index has not.
    pub fn apply(&mut self, entry: &mut LogEntry, gaps: AccelerationGaps) -> Result<(), DeriveError> {
        let period = self.period.as_secs_f64();
        entry.insert(TIME_FIELD, fixed(self.index as f64 * period));

        let speed = match entry.get(SPEED_FIELD) {
            None => None,
            Some(raw) => Some(raw.trim().parse::<f64>().map_err(|_| DeriveError::InvalidSpeed {
                value: raw.to_string(),
            })?),
        };

        if let Some(speed) = speed {
            entry.insert(DISTANCE_FIELD, fixed(self.distance));
            self.distance += period * speed;

            match (self.previous, gaps) {
                (Predecessor::None, _) => {}
                (Predecessor::Speed(previous), _) => {
                    entry.insert(ACCELERATION_FIELD, fixed((speed - previous) / period));
                }
                (Predecessor::WithoutSpeed, AccelerationGaps::Drop) => {
                    return Err(DeriveError::MissingPreviousSpeed);
                }
                (Predecessor::WithoutSpeed, AccelerationGaps::Omit) => {}
            }
        }

        self.previous = match speed {
            Some(speed) => Predecessor::Speed(speed),
            None => Predecessor::WithoutSpeed,
        };
        self.index += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(millis: u64) -> DerivedState {
        DerivedState::new(SamplePeriod::from_millis(millis).unwrap())
    }

    fn with_speed(speed: &str) -> LogEntry {
        [(SPEED_FIELD, speed)].into_iter().collect()
    }

    #[test]
    fn time_follows_retained_index() {
        let mut s = state(1000);
        let times: Vec<String> = (0..3)
            .map(|_| {
                let mut e = LogEntry::new();
                s.apply(&mut e, AccelerationGaps::Drop).unwrap();
                e.get(TIME_FIELD).unwrap().to_string()
            })
            .collect();
        assert_eq!(times, vec!["   0.000", "   1.000", "   2.000"]);
    }

    #[test]
    fn distance_is_total_before_this_entry() {
        let mut s = state(500);
        let mut first = with_speed("10");
        let mut second = with_speed("10");
        s.apply(&mut first, AccelerationGaps::Drop).unwrap();
        s.apply(&mut second, AccelerationGaps::Drop).unwrap();
        assert_eq!(first.get(DISTANCE_FIELD), Some("   0.000"));
        assert_eq!(second.get(DISTANCE_FIELD), Some("   5.000"));
        assert_eq!(s.distance(), 10.0);
    }

    #[test]
    fn acceleration_from_previous_speed() {
        let mut s = state(1000);
        let mut first = with_speed("10.000");
        let mut second = with_speed("12.000");
        s.apply(&mut first, AccelerationGaps::Drop).unwrap();
        s.apply(&mut second, AccelerationGaps::Drop).unwrap();
        assert!(!first.contains(ACCELERATION_FIELD));
        assert_eq!(second.get(ACCELERATION_FIELD), Some("   2.000"));
    }

    #[test]
    fn entry_without_speed_gets_time_only() {
        let mut s = state(1000);
        let mut e: LogEntry = [("rpm", "800")].into_iter().collect();
        s.apply(&mut e, AccelerationGaps::Drop).unwrap();
        assert_eq!(e.names().collect::<Vec<_>>(), vec!["rpm", "time"]);
    }

    #[test]
    fn invalid_speed_leaves_state_alone() {
        let mut s = state(1000);
        let err = s
            .apply(&mut with_speed("fast"), AccelerationGaps::Drop)
            .unwrap_err();
        assert_eq!(
            err,
            DeriveError::InvalidSpeed {
                value: "fast".to_string()
            }
        );
        assert_eq!(s.retained(), 0);
        assert_eq!(s.distance(), 0.0);
    }

    mod gaps {
        use super::*;

        #[test]
        fn drop_poisons_following_speed_entries() {
            let mut s = state(1000);
            s.apply(&mut with_speed("1"), AccelerationGaps::Drop).unwrap();
            s.apply(&mut LogEntry::new(), AccelerationGaps::Drop).unwrap();

            for _ in 0..2 {
                assert_eq!(
                    s.apply(&mut with_speed("2"), AccelerationGaps::Drop),
                    Err(DeriveError::MissingPreviousSpeed)
                );
            }
            assert_eq!(s.retained(), 2);
            // The dropped entries still advanced the distance.
            assert_eq!(s.distance(), 5.0);

            s.apply(&mut LogEntry::new(), AccelerationGaps::Drop).unwrap();
            assert_eq!(
                s.apply(&mut with_speed("3"), AccelerationGaps::Drop),
                Err(DeriveError::MissingPreviousSpeed)
            );
        }

        #[test]
        fn omit_keeps_entry_without_acceleration() {
            let mut s = state(1000);
            s.apply(&mut LogEntry::new(), AccelerationGaps::Omit).unwrap();

            let mut second = with_speed("4");
            s.apply(&mut second, AccelerationGaps::Omit).unwrap();
            assert!(!second.contains(ACCELERATION_FIELD));
            assert_eq!(second.get(DISTANCE_FIELD), Some("   0.000"));

            let mut third = with_speed("6");
            s.apply(&mut third, AccelerationGaps::Omit).unwrap();
            assert_eq!(third.get(ACCELERATION_FIELD), Some("   2.000"));
            assert_eq!(s.retained(), 3);
        }
    }
}
