//! Savings goals.

use serde::{Deserialize, Serialize};

/// A savings goal.
///
/// `progress` is recomputed on every mutation and capped at 100.
/// `saved` itself is never capped, so paying in past the target stays
/// visible in the amounts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Per-user id, assigned `max(id) + 1` so a deleted goal's id is
    /// never handed out again.
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub target: f64,
    #[serde(default)]
    pub saved: f64,
    /// "YYYY-MM-DD".
    pub deadline: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub progress: f64,
}

/// Derived goal classification, from progress and deadline proximity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Completed,
    Overdue,
    Urgent,
    GoodProgress,
    Active,
}

impl GoalStatus {
    /// Display rank used on the goals page: urgent work first,
    /// completed goals last.
    pub fn rank(self) -> u8 {
        match self {
            Self::Overdue => 1,
            Self::Urgent => 2,
            Self::Active | Self::GoodProgress => 3,
            Self::Completed => 4,
        }
    }
}

/// Input for [`Engine::add_goal`].
///
/// [`Engine::add_goal`]: crate::Engine::add_goal
#[derive(Clone, Debug)]
pub struct NewGoal {
    pub name: String,
    pub description: String,
    pub target: f64,
    pub saved: f64,
    /// "YYYY-MM-DD"; today when absent.
    pub deadline: Option<String>,
}

/// Full-replace input for [`Engine::update_goal`].
///
/// [`Engine::update_goal`]: crate::Engine::update_goal
#[derive(Clone, Debug)]
pub struct GoalUpdate {
    pub name: String,
    pub description: String,
    pub target: f64,
    pub saved: f64,
    pub deadline: String,
}
