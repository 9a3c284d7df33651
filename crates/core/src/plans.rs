//! Static subscription plan / entitlement table.
//!
//! Plans are configuration, not state: a plain mapping from plan id to a
//! feature struct, defined once in code with no runtime mutation surface.
//! Billing and session-limiting logic elsewhere consume these values; this
//! module only answers "what does plan X entitle you to".

use serde::Serialize;

/// Plan id for the free tier.
pub const PLAN_FREE: &str = "free";

/// Plan id for the paid tier.
pub const PLAN_PRO: &str = "pro";

/// Which characters a plan may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterTier {
    /// Free-tier characters only.
    Free,
    /// Free and premium characters.
    Premium,
}

/// The feature bundle attached to a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanFeatures {
    /// Plan identifier (`"free"` or `"pro"`).
    pub id: &'static str,
    /// Human-readable plan name.
    pub name: &'static str,
    /// Whether conversations carry long-term memory.
    pub memory: bool,
    /// Session duration ceiling in milliseconds.
    pub ms_limit: u64,
    /// Character catalogue visibility.
    pub characters: CharacterTier,
    /// Whether custom voice cloning is available.
    pub voice_cloning: bool,
}

/// Free tier: 30-minute sessions, free characters only.
pub const FREE_FEATURES: PlanFeatures = PlanFeatures {
    id: PLAN_FREE,
    name: "Free",
    memory: false,
    ms_limit: 30 * 60 * 1000,
    characters: CharacterTier::Free,
    voice_cloning: false,
};

/// Pro tier: 15-hour sessions, full catalogue, memory and voice cloning.
pub const PRO_FEATURES: PlanFeatures = PlanFeatures {
    id: PLAN_PRO,
    name: "Pro",
    memory: true,
    ms_limit: 15 * 60 * 60 * 1000,
    characters: CharacterTier::Premium,
    voice_cloning: true,
};

/// Look up the feature bundle for a plan id.
///
/// Returns `None` for unknown ids; callers decide whether that is a 404 or
/// a fallback to [`FREE_FEATURES`].
pub fn get_features(plan_id: &str) -> Option<&'static PlanFeatures> {
    match plan_id {
        PLAN_FREE => Some(&FREE_FEATURES),
        PLAN_PRO => Some(&PRO_FEATURES),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_lookup() {
        let features = get_features("free").unwrap();
        assert_eq!(features.id, PLAN_FREE);
        assert!(!features.memory);
        assert!(!features.voice_cloning);
        assert_eq!(features.characters, CharacterTier::Free);
    }

    #[test]
    fn pro_plan_lookup() {
        let features = get_features("pro").unwrap();
        assert!(features.memory);
        assert!(features.voice_cloning);
        assert_eq!(features.characters, CharacterTier::Premium);
    }

    #[test]
    fn free_session_ceiling_is_thirty_minutes() {
        assert_eq!(FREE_FEATURES.ms_limit, 1_800_000);
    }

    #[test]
    fn pro_session_ceiling_is_fifteen_hours() {
        assert_eq!(PRO_FEATURES.ms_limit, 54_000_000);
    }

    #[test]
    fn unknown_plan_returns_none() {
        assert!(get_features("enterprise").is_none());
        assert!(get_features("").is_none());
        assert!(get_features("FREE").is_none());
    }
}
