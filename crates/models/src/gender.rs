use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{EnumIter, EnumProperty, IntoEnumIterator};

/// A student's gender as recorded on their account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumProperty, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[strum(props(display = "male", portal = "مرد"))]
    Male,
    #[strum(props(display = "female", portal = "زن"))]
    Female,
}

/// Which students a course section admits
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumProperty, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum GenderRestriction {
    #[default]
    #[strum(props(display = "mixed", portal = "مختلط"))]
    Mixed,
    #[strum(props(display = "male", portal = "مرد"))]
    Male,
    #[strum(props(display = "female", portal = "زن"))]
    Female,
}

impl GenderRestriction {
    /// Whether a student of `gender` may enroll
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            Self::Mixed => true,
            Self::Male => gender == Gender::Male,
            Self::Female => gender == Gender::Female,
        }
    }
}

/// Shared parse for the English names and the portal's Persian labels
fn parse_variant<T>(text: &str) -> Result<T, String>
where
    T: IntoEnumIterator + EnumProperty,
{
    let text = text.trim();
    T::iter()
        .find(|v| {
            v.get_str("display")
                .is_some_and(|name| name.eq_ignore_ascii_case(text))
                || v.get_str("portal") == Some(text)
        })
        .ok_or_else(|| format!("unknown gender '{text}'"))
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s)
    }
}

impl FromStr for GenderRestriction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s)
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.get_str("display").unwrap_or_default())
    }
}

impl Display for GenderRestriction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.get_str("display").unwrap_or_default())
    }
}
