use crate::utils::error::{MccError, Result};
use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The parts of the day in cinema local time.
///
/// Every window is start-inclusive and end-exclusive. `VeryLate` wraps past
/// midnight, and `Unknown` is a zero-length sentinel rather than a real window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayPart {
    Morning,
    Matinee,
    Prime,
    Late,
    VeryLate,
    Unknown,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    // 所有呼叫點都是合法的常數時間
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl DayPart {
    pub const ALL: [DayPart; 6] = [
        DayPart::Morning,
        DayPart::Matinee,
        DayPart::Prime,
        DayPart::Late,
        DayPart::VeryLate,
        DayPart::Unknown,
    ];

    /// The real windows, in lookup order. Together they cover the whole day.
    pub const CLASSIFIED: [DayPart; 5] = [
        DayPart::Morning,
        DayPart::Matinee,
        DayPart::Prime,
        DayPart::Late,
        DayPart::VeryLate,
    ];

    fn bounds(self) -> ((u32, u32), (u32, u32)) {
        match self {
            DayPart::Morning => ((6, 0), (11, 0)),
            DayPart::Matinee => ((11, 0), (17, 0)),
            DayPart::Prime => ((17, 0), (20, 30)),
            DayPart::Late => ((20, 30), (23, 30)),
            DayPart::VeryLate => ((23, 30), (6, 0)),
            DayPart::Unknown => ((0, 0), (0, 0)),
        }
    }

    pub fn start_time(self) -> NaiveTime {
        let (hour, minute) = self.bounds().0;
        hm(hour, minute)
    }

    pub fn end_time(self) -> NaiveTime {
        let (hour, minute) = self.bounds().1;
        hm(hour, minute)
    }

    pub fn is_unknown(self) -> bool {
        self == DayPart::Unknown
    }

    pub fn is_wraparound(self) -> bool {
        self.end_time() < self.start_time()
    }

    pub fn contains(self, time: NaiveTime) -> bool {
        if self.is_unknown() {
            return false;
        }

        let (start, end) = (self.start_time(), self.end_time());
        if self.is_wraparound() {
            time >= start || time < end
        } else {
            start <= time && time < end
        }
    }

    pub fn duration(self) -> Duration {
        let span = self.end_time() - self.start_time();
        if self.is_wraparound() {
            Duration::days(1) + span
        } else {
            span
        }
    }

    /// 將時間歸類到所屬的時段，沒有符合的時段時回傳 `Unknown`
    pub fn classify(time: NaiveTime) -> DayPart {
        Self::CLASSIFIED
            .into_iter()
            .find(|part| part.contains(time))
            .unwrap_or(DayPart::Unknown)
    }

    /// Classifies the wall-clock time of `at` in its own time zone.
    pub fn classify_at<Tz: TimeZone>(at: &DateTime<Tz>) -> DayPart {
        Self::classify(at.time())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayPart::Morning => "MORNING",
            DayPart::Matinee => "MATINEE",
            DayPart::Prime => "PRIME",
            DayPart::Late => "LATE",
            DayPart::VeryLate => "VERY_LATE",
            DayPart::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DayPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayPart {
    type Err = MccError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        DayPart::ALL
            .into_iter()
            .find(|part| part.as_str() == normalized)
            .ok_or_else(|| MccError::UnknownDayPart {
                value: s.to_string(),
            })
    }
}

/// 解析 `HH:MM` 或 `HH:MM:SS`
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| MccError::InvalidTimeOfDay {
            value: value.to_string(),
        })
}
