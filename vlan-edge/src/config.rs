//! VLAN configuration of the tap port and of its clients.
//!
//! The tap holds one [`VlanConfig`] for the whole port; each client gets a
//! copy with its own PVID via [`VlanConfig::with_pvid`]. Both are snapshots
//! taken at session start and never change while frames are processed.
//!
//! [`VlanOptions`] is the user-facing surface: two keys, `vlan.mode` and
//! `vlan.pvid`, that validate into an optional [`VlanConfig`].

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::vlan::tci::VID_MAX;

/// PVID used when none is configured.
pub const DEFAULT_PVID: u16 = 1;

const MODE_DISABLED: &str = "disabled";

/// Errors raised while building a VLAN configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `vlan.mode` is not one of the known modes.
    #[error("unknown vlan mode")]
    UnknownMode,

    /// `vlan.pvid` is not a decimal integer.
    #[error("vlan pvid is not an integer")]
    InvalidPvid,

    /// `vlan.pvid` does not fit in the 12-bit VID field.
    #[error("vlan pvid {0} is out of range 0..=4095")]
    PvidOutOfRange(u16),

    /// The option key is not a VLAN option.
    #[error("unknown vlan option")]
    UnknownKey,

    /// VLAN tagging was requested but the `tagging` feature is off.
    #[error("vlan tagging support is not compiled in")]
    TaggingUnavailable,
}

/// Which frames the tap port accepts, and so how frames are tagged on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VlanMode {
    /// Only untagged and priority-tagged frames; VLAN-tagged frames are
    /// dropped.
    #[cfg_attr(feature = "serde", serde(alias = "untagged"))]
    OnlyUntaggedOrPriority,
    /// Only VLAN-tagged frames; untagged frames are dropped.
    #[cfg_attr(feature = "serde", serde(alias = "tagged"))]
    OnlyTagged,
    /// Both; untagged frames belong to the PVID.
    All,
}

impl VlanMode {
    /// The kebab-case name of the mode.
    pub const fn as_str(&self) -> &'static str {
        match self {
            VlanMode::OnlyUntaggedOrPriority => "only-untagged-or-priority",
            VlanMode::OnlyTagged => "only-tagged",
            VlanMode::All => "all",
        }
    }
}

impl fmt::Display for VlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VlanMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "only-untagged-or-priority" | "untagged" => Ok(VlanMode::OnlyUntaggedOrPriority),
            "only-tagged" | "tagged" => Ok(VlanMode::OnlyTagged),
            "all" => Ok(VlanMode::All),
            _ => Err(ConfigError::UnknownMode),
        }
    }
}

fn parse_mode_setting(s: &str) -> Result<Option<VlanMode>, ConfigError> {
    if s == MODE_DISABLED {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

fn check_pvid(pvid: u16) -> Result<u16, ConfigError> {
    if pvid > VID_MAX {
        return Err(ConfigError::PvidOutOfRange(pvid));
    }
    Ok(pvid)
}

/// A validated `(mode, pvid)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawVlanConfig"))]
pub struct VlanConfig {
    mode: VlanMode,
    pvid: u16,
}

// Deserialized form, checked by `VlanConfig::new`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawVlanConfig {
    mode: VlanMode,
    pvid: u16,
}

#[cfg(feature = "serde")]
impl TryFrom<RawVlanConfig> for VlanConfig {
    type Error = ConfigError;

    fn try_from(raw: RawVlanConfig) -> Result<Self, Self::Error> {
        VlanConfig::new(raw.mode, raw.pvid)
    }
}

impl VlanConfig {
    /// Build a configuration, rejecting a PVID above 4095.
    pub fn new(mode: VlanMode, pvid: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            mode,
            pvid: check_pvid(pvid)?,
        })
    }

    /// The accepted frame shapes.
    #[inline]
    pub const fn mode(&self) -> VlanMode {
        self.mode
    }

    /// The port VLAN identifier. 0 means the port has no native VLAN.
    #[inline]
    pub const fn pvid(&self) -> u16 {
        self.pvid
    }

    /// The same mode with another PVID, for a client whose PVID is
    /// overridden by its session.
    pub fn with_pvid(&self, pvid: u16) -> Result<Self, ConfigError> {
        Self::new(self.mode, pvid)
    }
}

/// Unvalidated VLAN options as read from a config source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VlanOptions {
    /// `None` when VLAN tagging is disabled.
    #[cfg_attr(feature = "serde", serde(with = "mode_setting"))]
    pub mode: Option<VlanMode>,
    /// The port VLAN identifier.
    pub pvid: u16,
}

impl Default for VlanOptions {
    fn default() -> Self {
        VlanOptions {
            mode: None,
            pvid: DEFAULT_PVID,
        }
    }
}

impl VlanOptions {
    /// Apply one `key = value` option.
    ///
    /// Known keys are `vlan.mode` (`disabled`, `only-untagged-or-priority`,
    /// `only-tagged` or `all`) and `vlan.pvid`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "vlan.mode" => self.mode = parse_mode_setting(value.trim())?,
            "vlan.pvid" => {
                let pvid = value
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPvid)?;
                self.pvid = check_pvid(pvid)?;
            }
            _ => return Err(ConfigError::UnknownKey),
        }
        Ok(())
    }

    /// Validate the options into the tap configuration, `None` when VLAN
    /// tagging is disabled.
    pub fn validate(&self) -> Result<Option<VlanConfig>, ConfigError> {
        let pvid = check_pvid(self.pvid)?;
        match self.mode {
            None => Ok(None),
            Some(_) if !cfg!(feature = "tagging") => Err(ConfigError::TaggingUnavailable),
            Some(mode) => {
                tracing::debug!(mode = mode.as_str(), pvid, "vlan tagging enabled");
                Ok(Some(VlanConfig { mode, pvid }))
            }
        }
    }
}

#[cfg(feature = "serde")]
mod mode_setting {
    use core::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::{parse_mode_setting, VlanMode, MODE_DISABLED};

    pub(super) fn serialize<S: Serializer>(
        mode: &Option<VlanMode>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(mode.map_or(MODE_DISABLED, |m| m.as_str()))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<VlanMode>, D::Error> {
        struct ModeVisitor;

        impl<'de> Visitor<'de> for ModeVisitor {
            type Value = Option<VlanMode>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a vlan mode or \"disabled\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                parse_mode_setting(v).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(ModeVisitor)
    }
}
