//! Character pack lifecycle, generation settings and request validation.
//!
//! A pack moves strictly forward through
//! `pending -> generating -> {completed | failed}`. The helpers here are the
//! single source of truth for which transitions are legal; the repository
//! layer uses [`PackStatus::predecessors`] to guard its UPDATE statements.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a character pack, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackStatus {
    Pending,
    Generating,
    Completed,
    Failed,
}

impl PackStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [PackStatus; 4] = [
        PackStatus::Pending,
        PackStatus::Generating,
        PackStatus::Completed,
        PackStatus::Failed,
    ];

    /// The database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            PackStatus::Pending => "pending",
            PackStatus::Generating => "generating",
            PackStatus::Completed => "completed",
            PackStatus::Failed => "failed",
        }
    }

    /// `completed` and `failed` are final; nothing follows them.
    pub fn is_terminal(self) -> bool {
        matches!(self, PackStatus::Completed | PackStatus::Failed)
    }

    /// Whether moving from `self` to `next` is a legal forward transition.
    pub fn can_transition_to(self, next: PackStatus) -> bool {
        matches!(
            (self, next),
            (PackStatus::Pending, PackStatus::Generating)
                | (PackStatus::Generating, PackStatus::Completed)
                | (PackStatus::Generating, PackStatus::Failed)
        )
    }

    /// Statuses from which `self` may be entered.
    pub fn predecessors(self) -> Vec<PackStatus> {
        PackStatus::ALL
            .into_iter()
            .filter(|from| from.can_transition_to(self))
            .collect()
    }
}

impl fmt::Display for PackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown pack status '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Settings constants
// ---------------------------------------------------------------------------

pub const STYLE_ANIME: &str = "anime";
pub const STYLE_REALISTIC: &str = "realistic";
pub const STYLE_CHIBI: &str = "chibi";
pub const STYLE_CYBERPUNK: &str = "cyberpunk";

/// All valid art styles.
pub const VALID_STYLES: &[&str] = &[STYLE_ANIME, STYLE_REALISTIC, STYLE_CHIBI, STYLE_CYBERPUNK];

/// All valid poses.
pub const VALID_POSES: &[&str] = &["standing", "action", "sitting", "portrait"];

/// All valid backgrounds.
pub const VALID_BACKGROUNDS: &[&str] = &["transparent", "city", "nature", "abstract"];

pub const DEFAULT_STYLE: &str = STYLE_ANIME;
pub const DEFAULT_POSE: &str = "standing";
pub const DEFAULT_BACKGROUND: &str = "transparent";
pub const DEFAULT_IMAGES_PER_CHARACTER: i32 = 4;
pub const MIN_IMAGES_PER_CHARACTER: i32 = 1;
pub const MAX_IMAGES_PER_CHARACTER: i32 = 6;
pub const DEFAULT_QUALITY_STEPS: i32 = 20;
pub const MIN_QUALITY_STEPS: i32 = 10;
pub const MAX_QUALITY_STEPS: i32 = 50;

/// Maximum length for a pack display name in characters.
pub const MAX_PACK_NAME_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User-chosen generation settings stored on the pack as JSON.
///
/// Every field has a default so a stored `{}` (or a partially filled object)
/// still deserializes. `quality` is collected and stored but the image
/// request always uses [`crate::generation::GENERATION_STEPS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackSettings {
    pub style: String,
    pub pose: String,
    pub background: String,
    pub images_per_character: i32,
    pub quality: i32,
}

impl Default for PackSettings {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_string(),
            pose: DEFAULT_POSE.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            images_per_character: DEFAULT_IMAGES_PER_CHARACTER,
            quality: DEFAULT_QUALITY_STEPS,
        }
    }
}

impl PackSettings {
    /// Style to use for prompts, falling back to the default when blank.
    pub fn style_or_default(&self) -> &str {
        let style = self.style.trim();
        if style.is_empty() {
            DEFAULT_STYLE
        } else {
            style
        }
    }

    /// Number of images to request per character, falling back to the
    /// default when the stored value is not positive.
    pub fn image_count(&self) -> u32 {
        u32::try_from(self.images_per_character)
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_IMAGES_PER_CHARACTER as u32)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

fn validate_range(field: &str, value: i32, min: i32, max: i32) -> Result<(), CoreError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be between {min} and {max} (got {value})"
        )))
    }
}

/// Validate every settings field against its allowed values.
pub fn validate_settings(settings: &PackSettings) -> Result<(), CoreError> {
    validate_one_of("style", &settings.style, VALID_STYLES)?;
    validate_one_of("pose", &settings.pose, VALID_POSES)?;
    validate_one_of("background", &settings.background, VALID_BACKGROUNDS)?;
    validate_range(
        "imagesPerCharacter",
        settings.images_per_character,
        MIN_IMAGES_PER_CHARACTER,
        MAX_IMAGES_PER_CHARACTER,
    )?;
    validate_range(
        "quality",
        settings.quality,
        MIN_QUALITY_STEPS,
        MAX_QUALITY_STEPS,
    )
}

/// Validate a pack display name: non-blank and within length limit.
pub fn validate_pack_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Pack name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_PACK_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Pack name exceeds maximum length of {MAX_PACK_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the selected character list: non-empty, no blank or repeated
/// identifiers.
///
/// Identifiers missing from the catalog are accepted; the pipeline falls
/// back to a generic prompt for them.
pub fn validate_characters(characters: &[String]) -> Result<(), CoreError> {
    if characters.is_empty() {
        return Err(CoreError::Validation(
            "At least one character must be selected".to_string(),
        ));
    }
    if characters.iter().any(|c| c.trim().is_empty()) {
        return Err(CoreError::Validation(
            "Character identifiers must not be blank".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(characters.len());
    if let Some(dup) = characters.iter().find(|c| !seen.insert(c.as_str())) {
        return Err(CoreError::Validation(format!(
            "Character '{dup}' is selected more than once"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Status transitions --

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(PackStatus::Pending.can_transition_to(PackStatus::Generating));
        assert!(PackStatus::Generating.can_transition_to(PackStatus::Completed));
        assert!(PackStatus::Generating.can_transition_to(PackStatus::Failed));
    }

    #[test]
    fn terminal_statuses_have_no_successors() {
        for next in PackStatus::ALL {
            assert!(!PackStatus::Completed.can_transition_to(next));
            assert!(!PackStatus::Failed.can_transition_to(next));
        }
    }

    #[test]
    fn backwards_and_skipping_transitions_are_rejected() {
        assert!(!PackStatus::Generating.can_transition_to(PackStatus::Pending));
        assert!(!PackStatus::Pending.can_transition_to(PackStatus::Completed));
        assert!(!PackStatus::Pending.can_transition_to(PackStatus::Failed));
        assert!(!PackStatus::Generating.can_transition_to(PackStatus::Generating));
    }

    #[test]
    fn predecessors_of_completed_is_only_generating() {
        assert_eq!(
            PackStatus::Completed.predecessors(),
            vec![PackStatus::Generating]
        );
        assert!(PackStatus::Pending.predecessors().is_empty());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in PackStatus::ALL {
            assert_eq!(status.as_str().parse::<PackStatus>().unwrap(), status);
        }
        assert!("done".parse::<PackStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_value(PackStatus::Generating).unwrap();
        assert_eq!(json, "generating");
    }

    // -- Settings --

    #[test]
    fn empty_settings_object_uses_defaults() {
        let settings: PackSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, PackSettings::default());
        assert_eq!(settings.style, "anime");
        assert_eq!(settings.image_count(), 4);
    }

    #[test]
    fn partial_settings_keep_given_fields() {
        let settings: PackSettings =
            serde_json::from_str(r#"{"style":"chibi","imagesPerCharacter":2}"#).unwrap();
        assert_eq!(settings.style, "chibi");
        assert_eq!(settings.images_per_character, 2);
        assert_eq!(settings.quality, DEFAULT_QUALITY_STEPS);
    }

    #[test]
    fn blank_style_falls_back_to_default() {
        let settings = PackSettings {
            style: "  ".to_string(),
            ..PackSettings::default()
        };
        assert_eq!(settings.style_or_default(), "anime");
    }

    #[test]
    fn non_positive_image_count_falls_back_to_default() {
        let settings = PackSettings {
            images_per_character: 0,
            ..PackSettings::default()
        };
        assert_eq!(settings.image_count(), 4);
    }

    #[test]
    fn default_settings_are_valid() {
        assert!(validate_settings(&PackSettings::default()).is_ok());
    }

    #[test]
    fn unknown_style_is_rejected() {
        let settings = PackSettings {
            style: "watercolor".to_string(),
            ..PackSettings::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("style"));
    }

    #[test]
    fn image_count_out_of_range_is_rejected() {
        for count in [0, 7] {
            let settings = PackSettings {
                images_per_character: count,
                ..PackSettings::default()
            };
            assert!(validate_settings(&settings).is_err());
        }
    }

    #[test]
    fn quality_out_of_range_is_rejected() {
        let settings = PackSettings {
            quality: 60,
            ..PackSettings::default()
        };
        assert!(validate_settings(&settings).is_err());
    }

    // -- Request validation --

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_pack_name("   ").is_err());
        assert!(validate_pack_name("Heroes").is_ok());
    }

    #[test]
    fn overlong_name_is_rejected() {
        let name = "x".repeat(MAX_PACK_NAME_LENGTH + 1);
        assert!(validate_pack_name(&name).is_err());
    }

    #[test]
    fn empty_character_list_is_rejected() {
        assert!(validate_characters(&[]).is_err());
    }

    #[test]
    fn blank_character_id_is_rejected() {
        let characters = vec!["mario".to_string(), " ".to_string()];
        assert!(validate_characters(&characters).is_err());
    }

    #[test]
    fn repeated_character_id_is_rejected() {
        let characters = vec!["mario".to_string(), "link".to_string(), "mario".to_string()];
        let err = validate_characters(&characters).unwrap_err();
        assert!(err.to_string().contains("mario"));
    }

    #[test]
    fn unknown_character_ids_are_accepted() {
        let characters = vec!["someone-new".to_string()];
        assert!(validate_characters(&characters).is_ok());
    }
}
