use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::errors::SlotError;

/// Day of the week as stored in `recurring_days` (`"MONDAY"` ... `"SUNDAY"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = SlotError;

    /// Accepts the stored upper-case names in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| SlotError::Validation(format!("Unknown weekday: {:?}", s)))
    }
}

/// The set of weekdays a recurrence repeats on.
///
/// Backed by an ordered set, so `[WEDNESDAY, MONDAY]` and `[MONDAY, WEDNESDAY]`
/// compare, hash and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdaySet(BTreeSet<DayOfWeek>);

impl WeekdaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses stored weekday names, failing on the first unknown one.
    pub fn parse<I, S>(names: I) -> Result<Self, SlotError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| name.as_ref().parse::<DayOfWeek>())
            .collect()
    }

    pub fn contains(&self, day: impl Into<DayOfWeek>) -> bool {
        self.0.contains(&day.into())
    }

    pub fn insert(&mut self, day: impl Into<DayOfWeek>) -> bool {
        self.0.insert(day.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.0.iter().copied()
    }

    /// Names in canonical (Monday-first) order, as persisted.
    pub fn to_names(&self) -> Vec<String> {
        self.iter().map(|day| day.as_str().to_string()).collect()
    }
}

impl FromIterator<DayOfWeek> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = DayOfWeek>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|day| day.as_str()).collect();
        write!(f, "[{}]", names.join(","))
    }
}
