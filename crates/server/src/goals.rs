//! Savings goals API endpoints

use api_types::goal::{
    GoalCreated, GoalDeposit, GoalDeposited, GoalNew, GoalStatus as ApiStatus, GoalUpdate,
    GoalView, GoalsResponse,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use engine::reports;

use crate::{ServerError, server::ServerState};

fn map_status(status: engine::GoalStatus) -> ApiStatus {
    match status {
        engine::GoalStatus::Completed => ApiStatus::Completed,
        engine::GoalStatus::Overdue => ApiStatus::Overdue,
        engine::GoalStatus::Urgent => ApiStatus::Urgent,
        engine::GoalStatus::GoodProgress => ApiStatus::GoodProgress,
        engine::GoalStatus::Active => ApiStatus::Active,
    }
}

fn view(goal: &engine::Goal, today: NaiveDate) -> GoalView {
    GoalView {
        id: goal.id,
        name: goal.name.clone(),
        description: goal.description.clone(),
        target: goal.target,
        saved: goal.saved,
        deadline: goal.deadline.clone(),
        created_date: goal.created_date.clone(),
        progress: goal.progress,
        status: map_status(reports::goal_status(goal, today)),
    }
}

/// The goals page: urgent work first, completed goals last.
pub async fn list(
    Extension(user): Extension<engine::User>,
) -> Result<Json<GoalsResponse>, ServerError> {
    let today = chrono::Local::now().date_naive();
    let totals = reports::goal_totals(&user.goals);

    let mut goals = user.goals;
    goals.sort_by(|a, b| {
        let rank_a = reports::goal_status(a, today).rank();
        let rank_b = reports::goal_status(b, today).rank();
        rank_a.cmp(&rank_b).then_with(|| a.deadline.cmp(&b.deadline))
    });

    Ok(Json(GoalsResponse {
        goals: goals.iter().map(|g| view(g, today)).collect(),
        total_target: totals.target,
        total_saved: totals.saved,
    }))
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<(StatusCode, Json<GoalCreated>), ServerError> {
    let stored = state.engine.add_goal(
        user.id,
        engine::NewGoal {
            name: payload.name,
            description: payload.description,
            target: payload.target,
            saved: payload.saved,
            deadline: payload.deadline,
        },
    )?;

    Ok((StatusCode::CREATED, Json(GoalCreated { id: stored.id })))
}

pub async fn update(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(goal_id): Path<u32>,
    Json(payload): Json<GoalUpdate>,
) -> Result<Json<GoalView>, ServerError> {
    let stored = state.engine.update_goal(
        user.id,
        goal_id,
        engine::GoalUpdate {
            name: payload.name,
            description: payload.description,
            target: payload.target,
            saved: payload.saved,
            deadline: payload.deadline,
        },
    )?;

    Ok(Json(view(&stored, chrono::Local::now().date_naive())))
}

/// Pays money into a goal. Saved is allowed past the target; the
/// progress figure is capped at 100.
pub async fn deposit(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(goal_id): Path<u32>,
    Json(payload): Json<GoalDeposit>,
) -> Result<Json<GoalDeposited>, ServerError> {
    let stored = state.engine.deposit_to_goal(user.id, goal_id, payload.amount)?;

    Ok(Json(GoalDeposited {
        saved: stored.saved,
        progress: stored.progress,
    }))
}

pub async fn remove(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Path(goal_id): Path<u32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_goal(user.id, goal_id)?;
    Ok(StatusCode::NO_CONTENT)
}
