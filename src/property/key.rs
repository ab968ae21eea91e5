//! Typed attribute keys

use std::fmt;
use std::str::FromStr;

use crate::error::LifeError;

/// The five allocatable traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trait {
    /// 颜值 (Charm)
    Chr,
    /// 智力 (Intelligence)
    Int,
    /// 体质 (Strength)
    Str,
    /// 家境 (Wealth)
    Mny,
    /// 快乐 (Spirit)
    Spr,
}

impl Trait {
    pub const ALL: [Trait; 5] = [Trait::Chr, Trait::Int, Trait::Str, Trait::Mny, Trait::Spr];

    pub fn key(self) -> &'static str {
        match self {
            Trait::Chr => "CHR",
            Trait::Int => "INT",
            Trait::Str => "STR",
            Trait::Mny => "MNY",
            Trait::Spr => "SPR",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Any attribute a condition may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Trait(Trait),
    /// Current age
    Age,
    /// Vitality; the life ends once it drops below 1
    Lif,
    /// Generation counter, bumped on every restart
    Tms,
    /// Triggered talent ids
    Tlt,
    /// Triggered event ids
    Evt,
}

impl Property {
    pub fn key(self) -> &'static str {
        match self {
            Property::Trait(t) => t.key(),
            Property::Age => "AGE",
            Property::Lif => "LIF",
            Property::Tms => "TMS",
            Property::Tlt => "TLT",
            Property::Evt => "EVT",
        }
    }
}

impl FromStr for Property {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            b"CHR" => Ok(Property::Trait(Trait::Chr)),
            b"INT" => Ok(Property::Trait(Trait::Int)),
            b"STR" => Ok(Property::Trait(Trait::Str)),
            b"MNY" => Ok(Property::Trait(Trait::Mny)),
            b"SPR" => Ok(Property::Trait(Trait::Spr)),
            b"AGE" => Ok(Property::Age),
            b"LIF" => Ok(Property::Lif),
            b"TMS" => Ok(Property::Tms),
            b"TLT" => Ok(Property::Tlt),
            b"EVT" => Ok(Property::Evt),
            _ => Err(LifeError::UnknownProperty(s.to_string())),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
