// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use secret_draw_domain::{GroupId, Participant, PoolId};
use serde::{Deserialize, Serialize};

/// A participant as seen on their own page: who they are and whom they give to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    /// The participant, including their assigned recipient identifier.
    pub participant: Participant,
    /// The pool the participant belongs to.
    pub pool_id: PoolId,
    /// The pool's display name.
    pub pool_name: String,
    /// The display name of the assigned recipient, once drawn.
    pub recipient_name: Option<String>,
}

/// What storage assigned while persisting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistTransitionResult {
    /// The identifier of a newly created group, for `GroupCreated` events.
    pub group_id: Option<GroupId>,
    /// Number of rows written.
    pub rows_affected: usize,
}
