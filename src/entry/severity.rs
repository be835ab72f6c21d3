use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The OpenTelemetry severity number of an entry, `0..=24`.
///
/// Each level spans four numbers (`INFO` is 9 through 12); `0` means the
/// severity was never set.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const DEFAULT: Severity = Severity(0);
    pub const TRACE: Severity = Severity(1);
    pub const DEBUG: Severity = Severity(5);
    pub const INFO: Severity = Severity(9);
    pub const WARN: Severity = Severity(13);
    pub const ERROR: Severity = Severity(17);
    pub const FATAL: Severity = Severity(21);

    const MAX: u8 = 24;

    const NAMES: [(&'static str, Severity); 7] = [
        ("default", Severity::DEFAULT),
        ("trace", Severity::TRACE),
        ("debug", Severity::DEBUG),
        ("info", Severity::INFO),
        ("warn", Severity::WARN),
        ("error", Severity::ERROR),
        ("fatal", Severity::FATAL),
    ];

    pub fn from_number(number: i64) -> Option<Self> {
        u8::try_from(number)
            .ok()
            .filter(|number| *number <= Self::MAX)
            .map(Severity)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// The name of the level this severity falls in.
    pub const fn level_name(self) -> &'static str {
        match self.0 {
            0 => "default",
            1..=4 => "trace",
            5..=8 => "debug",
            9..=12 => "info",
            13..=16 => "warn",
            17..=20 => "error",
            _ => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = (self.0 + 3) % 4;
        if self.0 == 0 || offset == 0 {
            f.write_str(self.level_name())
        } else {
            write!(f, "{}{}", self.level_name(), offset + 1)
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Accepts a level name with an optional step `1..=4`, as printed by
    /// `Display` (`info`, `info2`, ..., `info4`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let (name, step) = match lower.char_indices().last() {
            Some((at, digit @ '1'..='4')) if at > 0 => (&lower[..at], digit as u8 - b'1'),
            _ => (lower.as_str(), 0),
        };
        Self::NAMES
            .iter()
            .find(|(level, severity)| {
                *level == name && (step == 0 || *severity != Severity::DEFAULT)
            })
            .map(|(_, severity)| Severity(severity.0 + step))
            .ok_or_else(|| format!("Invalid severity: {}", s))
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Severity::from_number(i64::from(number))
            .ok_or_else(|| format!("Severity number {} is out of range 0..=24", number))
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}
