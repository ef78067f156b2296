// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length of a pool or participant name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Validates a pool name.
///
/// Surrounding whitespace is ignored for the emptiness check; callers are
/// expected to store the trimmed value.
///
/// # Arguments
///
/// * `name` - The proposed pool name
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty after trimming
/// - The name is longer than [`MAX_NAME_LENGTH`] characters
pub fn validate_pool_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidPoolName(String::from(
            "Pool name cannot be empty",
        )));
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidPoolName(format!(
            "Pool name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validates a participant's display name.
///
/// # Arguments
///
/// * `name` - The proposed participant name
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty after trimming
/// - The name is longer than [`MAX_NAME_LENGTH`] characters
pub fn validate_participant_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidParticipantName(String::from(
            "Participant name cannot be empty",
        )));
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidParticipantName(format!(
            "Participant name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(())
}
