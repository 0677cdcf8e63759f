/*!
 * List Types
 * Lifecycle state shared by the container and its tests
 */

use serde::Serialize;

/// Container lifecycle.
///
/// Construction performs initialization, so there is no observable
/// uninitialized state; `Destroyed` is terminal and every operation in it
/// fails with an invalid-argument condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LifecycleState {
    /// Initialized and accepting operations.
    Ready = 0,
    /// Torn down; all further operations are rejected.
    Destroyed = 1,
}

impl LifecycleState {
    pub(super) fn from_u8(raw: u8) -> Self {
        if raw == LifecycleState::Ready as u8 {
            LifecycleState::Ready
        } else {
            LifecycleState::Destroyed
        }
    }
}
