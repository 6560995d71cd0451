//! Donation policy configuration.

use serde::{Deserialize, Serialize};

/// Donation lifecycle policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationConfig {
    /// Cooldown in days before a donor can receive new requests after a
    /// completed donation.
    #[serde(default = "default_cooldown_days")]
    pub cooldown_days: u32,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            cooldown_days: default_cooldown_days(),
        }
    }
}

fn default_cooldown_days() -> u32 {
    90
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cooldown() {
        assert_eq!(DonationConfig::default().cooldown_days, 90);
    }
}
