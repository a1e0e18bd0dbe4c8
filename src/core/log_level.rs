//! Severity levels and the process-wide level name registry
//!
//! A [`LogLevel`] is just a numeric rank. Its display name lives in a global
//! registry shared by every logger in the process, so registering a name for
//! a rank changes how that rank renders everywhere.

use parking_lot::RwLock;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogLevel(u32);

impl LogLevel {
    pub const DEBUG: LogLevel = LogLevel(10);
    pub const USER: LogLevel = LogLevel(15);
    pub const INFO: LogLevel = LogLevel(30);
    pub const ALERT: LogLevel = LogLevel(35);
    pub const WARNING: LogLevel = LogLevel(40);
    pub const ERROR: LogLevel = LogLevel(70);
    pub const CRITICAL: LogLevel = LogLevel(80);
    pub const EXCEPTION: LogLevel = LogLevel(90);

    /// The canonical levels, lowest rank first.
    pub const ALL: [LogLevel; 8] = [
        LogLevel::DEBUG,
        LogLevel::USER,
        LogLevel::INFO,
        LogLevel::ALERT,
        LogLevel::WARNING,
        LogLevel::ERROR,
        LogLevel::CRITICAL,
        LogLevel::EXCEPTION,
    ];

    pub const fn from_rank(rank: u32) -> Self {
        LogLevel(rank)
    }

    pub const fn rank(&self) -> u32 {
        self.0
    }

    /// Display name as currently registered for this rank.
    pub fn name(&self) -> String {
        level_name(self.0)
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::DEBUG
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Accepts a registered level name (any case) or a bare rank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(rank) = trimmed.parse::<u32>() {
            return Ok(LogLevel(rank));
        }
        level_for_name(trimmed).ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RankOrName {
            Rank(u32),
            Name(String),
        }

        match RankOrName::deserialize(deserializer)? {
            RankOrName::Rank(rank) => Ok(LogLevel(rank)),
            RankOrName::Name(name) => name.parse().map_err(<D::Error as serde::de::Error>::custom),
        }
    }
}

const DEFAULT_LEVEL_NAMES: [(u32, &str); 8] = [
    (10, "DEBUG"),
    (15, "USER"),
    (30, "INFO"),
    (35, "ALERT"),
    (40, "WARNING"),
    (70, "ERROR"),
    (80, "CRITICAL"),
    (90, "EXCEPTION"),
];

fn registry() -> &'static RwLock<HashMap<u32, String>> {
    static REGISTRY: OnceLock<RwLock<HashMap<u32, String>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let defaults = DEFAULT_LEVEL_NAMES
            .iter()
            .map(|(rank, name)| (*rank, name.to_string()))
            .collect();
        RwLock::new(defaults)
    })
}

/// Associate `name` with `rank` for the rest of the process.
///
/// The last registration for a rank wins. Registering the same pair twice
/// is a no-op.
pub fn register_level(rank: u32, name: impl Into<String>) {
    let name = name.into();
    let mut names = registry().write();
    if names.get(&rank) != Some(&name) {
        names.insert(rank, name);
    }
}

/// Install the eight canonical level names.
///
/// The names are installed exactly once, the first time the registry is
/// touched. Later calls do nothing, so names set through [`register_level`]
/// are never reverted.
pub fn register_default_levels() {
    registry();
}

/// Registered name for `rank`, or `"Level <rank>"` if none was registered.
pub fn level_name(rank: u32) -> String {
    registry()
        .read()
        .get(&rank)
        .cloned()
        .unwrap_or_else(|| format!("Level {}", rank))
}

/// Reverse lookup, case-insensitive. With duplicate names the lowest rank
/// is returned.
pub fn level_for_name(name: &str) -> Option<LogLevel> {
    registry()
        .read()
        .iter()
        .filter(|(_, registered)| registered.eq_ignore_ascii_case(name))
        .map(|(rank, _)| LogLevel(*rank))
        .min()
}
