use chrono::{Local, NaiveDateTime, Timelike};

/// Source of wall-clock time for `get_time`.
pub(crate) trait Clock: Send + Sync {
    /// Current local time, without an offset.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local clock.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// ISO-8601 local timestamp, e.g. `2024-11-05T09:30:00.000042`.
///
/// The microsecond fraction is left out when it is zero.
pub(crate) fn iso_timestamp(time: NaiveDateTime) -> String {
    let micros = time.nanosecond() / 1_000;
    let seconds = time.format("%Y-%m-%dT%H:%M:%S");
    if micros == 0 {
        seconds.to_string()
    } else {
        format!("{}.{:06}", seconds, micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_iso_timestamp_format() {
        let time = NaiveDate::from_ymd_opt(2024, 11, 5)
            .unwrap()
            .and_hms_micro_opt(9, 30, 1, 42)
            .unwrap();
        assert_eq!(iso_timestamp(time), "2024-11-05T09:30:01.000042");
    }

    #[test]
    fn test_iso_timestamp_whole_second_has_no_fraction() {
        let time = NaiveDate::from_ymd_opt(2024, 11, 5)
            .unwrap()
            .and_hms_opt(9, 30, 1)
            .unwrap();
        assert_eq!(iso_timestamp(time), "2024-11-05T09:30:01");
    }

    #[test]
    fn test_fixed_clock_is_stable() {
        let time = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let clock = FixedClock(time);
        assert_eq!(clock.now(), clock.now());
    }
}
