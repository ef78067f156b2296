// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use secret_draw_domain::{DrawOptions, GroupId, ParticipantId};

/// A command represents user intent as data only.
///
/// Commands are the only way to request changes to a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rename the pool.
    RenamePool {
        /// The new display name.
        name: String,
    },
    /// Create a new, empty group in the pool.
    CreateGroup,
    /// Add a participant to one of the pool's groups.
    AddParticipant {
        /// The identifier for the new participant.
        participant_id: ParticipantId,
        /// The group to add the participant to.
        group_id: GroupId,
        /// The participant's display name.
        name: String,
    },
    /// Move a participant to another group of the same pool.
    MoveParticipant {
        /// The participant to move.
        participant_id: ParticipantId,
        /// The destination group.
        group_id: GroupId,
    },
    /// Remove a participant from the pool.
    RemoveParticipant {
        /// The participant to remove.
        participant_id: ParticipantId,
    },
    /// Remove a group and every participant in it.
    RemoveGroup {
        /// The group to remove.
        group_id: GroupId,
    },
    /// Perform the draw, assigning every participant a recipient.
    Draw {
        /// Search budget and fallback behavior of the draw engine.
        options: DrawOptions,
    },
}

impl Command {
    /// Returns `true` for commands that change the pool's roster.
    ///
    /// Structural commands are rejected once a pool has been drawn.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::CreateGroup
                | Self::AddParticipant { .. }
                | Self::MoveParticipant { .. }
                | Self::RemoveParticipant { .. }
                | Self::RemoveGroup { .. }
        )
    }
}
