//! Health banding for group members.

use crate::{Result, WingmanError};
use std::fmt;
use wingman_types::Character;

/// Coarse hit point bucket used to colour a member on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthBand {
    /// Exactly one hit point left; the game's "knocked out" state.
    Zeroed,
    Critical,
    Wounded,
    Healthy,
}

impl HealthBand {
    /// Band a classified member by current over maximum hit points.
    ///
    /// A member with no hit points left never appears in a roster listing, so
    /// `current <= 0` is reported as [`WingmanError::InvalidHealth`].
    pub fn of(member: &Character) -> Result<Self> {
        let hp = member.hp;
        if hp.current <= 0 {
            return Err(WingmanError::InvalidHealth {
                name: member.name.clone(),
                current: hp.current,
            });
        }
        if hp.current == 1 {
            return Ok(HealthBand::Zeroed);
        }

        let ratio = hp.ratio().unwrap_or(1.0);
        Ok(if ratio <= 0.25 {
            HealthBand::Critical
        } else if ratio <= 0.5 {
            HealthBand::Wounded
        } else {
            HealthBand::Healthy
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthBand::Zeroed => "zeroed",
            HealthBand::Critical => "critical",
            HealthBand::Wounded => "wounded",
            HealthBand::Healthy => "healthy",
        }
    }
}

impl fmt::Display for HealthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
