use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{BitAnd, BitOr},
};
use strum::{EnumIter, EnumProperty, IntoEnumIterator};

/// A day of the portal's week, which starts on Saturday
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumProperty,
)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Weekday {
    #[strum(props(display = "Saturday"))]
    Saturday = 0,
    #[strum(props(display = "Sunday"))]
    Sunday = 1,
    #[strum(props(display = "Monday"))]
    Monday = 2,
    #[strum(props(display = "Tuesday"))]
    Tuesday = 3,
    #[strum(props(display = "Wednesday"))]
    Wednesday = 4,
    #[strum(props(display = "Thursday"))]
    Thursday = 5,
    #[strum(props(display = "Friday"))]
    Friday = 6,
}

impl Weekday {
    /// Index of the day, 0 = Saturday .. 6 = Friday
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Looks a day up by index
    ///
    /// # Returns
    /// `None` unless `index` is within 0-6
    pub fn from_index(index: i64) -> Option<Self> {
        Self::iter().find(|day| i64::from(day.index()) == index)
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.index()
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(i64::from(index)).ok_or_else(|| format!("day index {index} is not 0-6"))
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.get_str("display").unwrap_or_default())
    }
}

/// The set of weekdays a course occupies, one bit per day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: Self = DaySet(0);

    pub fn of(day: Weekday) -> Self {
        DaySet(1 << day.index())
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.intersects(Self::of(day))
    }

    /// Whether the two sets share at least one day
    pub fn intersects(self, other: Self) -> bool {
        !(self & other).is_empty()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, day| set | Self::of(day))
    }
}

impl BitOr for DaySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        DaySet(self.0 | rhs.0)
    }
}

impl BitAnd for DaySet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        DaySet(self.0 & rhs.0)
    }
}
