//! Validation rules for the command resource.
//!
//! A command is a single how-to snippet: a required name plus optional
//! description and platform. The validators return field-level
//! [`Violation`]s so callers can collect all failures before rejecting.

use crate::error::Violation;

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Maximum length for a command name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for a command description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum length for a platform label.
pub const MAX_PLATFORM_LEN: usize = 100;

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate a command name: non-empty and within length limit.
pub fn validate_name(name: &str) -> Result<(), Violation> {
    if name.trim().is_empty() {
        return Err(Violation::new("name", "name must not be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(Violation::new(
            "name",
            format!("name too long: {} chars (max {MAX_NAME_LEN})", name.len()),
        ));
    }
    Ok(())
}

/// Validate an optional description against the length limit.
pub fn validate_description(description: Option<&str>) -> Result<(), Violation> {
    if let Some(description) = description {
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(Violation::new(
                "description",
                format!(
                    "description too long: {} chars (max {MAX_DESCRIPTION_LEN})",
                    description.len()
                ),
            ));
        }
    }
    Ok(())
}

/// Validate an optional platform label against the length limit.
pub fn validate_platform(platform: Option<&str>) -> Result<(), Violation> {
    if let Some(platform) = platform {
        if platform.len() > MAX_PLATFORM_LEN {
            return Err(Violation::new(
                "platform",
                format!(
                    "platform too long: {} chars (max {MAX_PLATFORM_LEN})",
                    platform.len()
                ),
            ));
        }
    }
    Ok(())
}
