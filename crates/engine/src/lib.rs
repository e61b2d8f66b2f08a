//! Core of the finance tracker: the file-backed store, the domain
//! model and the aggregation functions.
//!
//! The [`Engine`] holds nothing but the path of the shared JSON
//! document. Every operation is an independent load → mutate → save
//! pass over the whole file; there is deliberately no lock and no
//! shared in-memory state, so concurrent writers race exactly the way
//! the store format always has (last write wins).

pub use error::EngineError;
pub use goals::{Goal, GoalStatus, GoalUpdate, NewGoal};
pub use investments::{Investment, NewInvestment};
pub use store::{Categories, RiskProfile, StoreData};
pub use transactions::{NewTransaction, Transaction, TransactionKind};
pub use users::{User, UserData, UserInfo, hash_password};

use std::path::{Path, PathBuf};

mod error;
pub mod export;
mod goals;
mod investments;
pub mod reports;
mod store;
mod transactions;
mod users;

type ResultEngine<T> = Result<T, EngineError>;

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Handle on the shared data file.
#[derive(Clone, Debug)]
pub struct Engine {
    data_file: PathBuf,
}

impl Engine {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Writes the default dataset if the data file does not exist yet.
    pub fn bootstrap(&self) -> ResultEngine<()> {
        if !self.data_file.exists() {
            tracing::info!("creating data file {}", self.data_file.display());
            self.save(&StoreData::default())?;
        }
        Ok(())
    }

    fn load(&self) -> StoreData {
        store::load(&self.data_file)
    }

    fn save(&self, data: &StoreData) -> ResultEngine<()> {
        store::save(&self.data_file, data)
    }

    /// Loads, hands the user record to `apply`, and rewrites the file.
    fn with_user<T>(
        &self,
        user_id: u32,
        apply: impl FnOnce(&mut User) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let mut data = self.load();
        let user = data
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {user_id}")))?;
        let out = apply(user)?;
        self.save(&data)?;
        Ok(out)
    }

    /// Creates a new user with the moderate risk profile and empty
    /// lists. Usernames are unique; ids are assigned `len + 1` and
    /// never reused (users cannot be deleted).
    pub fn register(&self, username: &str, password: &str, email: &str) -> ResultEngine<User> {
        let username = username.trim();
        if username.chars().count() < 3 {
            return Err(EngineError::InvalidInput(
                "username must be at least 3 characters".to_string(),
            ));
        }
        if password.chars().count() < 4 {
            return Err(EngineError::InvalidInput(
                "password must be at least 4 characters".to_string(),
            ));
        }

        let mut data = self.load();
        if data.users.iter().any(|u| u.username == username) {
            return Err(EngineError::ExistingKey(username.to_string()));
        }

        let user = User {
            id: data.users.len() as u32 + 1,
            username: username.to_string(),
            password_hash: hash_password(password),
            email: email.trim().to_string(),
            created_at: today(),
            risk_profile: 2,
            transactions: Vec::new(),
            investments: Vec::new(),
            goals: Vec::new(),
        };
        data.users.push(user.clone());
        self.save(&data)?;
        tracing::info!("created user {} (id {})", user.username, user.id);
        Ok(user)
    }

    /// Checks a username/password pair against the stored digests.
    pub fn authenticate(&self, username: &str, password: &str) -> ResultEngine<User> {
        let hash = hash_password(password);
        self.load()
            .users
            .into_iter()
            .find(|u| u.username == username && u.password_hash == hash)
            .ok_or(EngineError::InvalidCredentials)
    }

    pub fn user(&self, user_id: u32) -> ResultEngine<User> {
        self.load()
            .users
            .into_iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {user_id}")))
    }

    /// Per-user snapshot: own lists plus the shared reference data.
    pub fn user_data(&self, user_id: u32) -> ResultEngine<UserData> {
        let data = self.load();
        let user = data
            .users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {user_id}")))?;

        Ok(UserData {
            transactions: user.transactions.clone(),
            investments: user.investments.clone(),
            goals: user.goals.clone(),
            categories: data.categories.clone(),
            investment_types: data.investment_types.clone(),
            risk_profiles: data.risk_profiles.clone(),
            user_info: UserInfo {
                id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
                risk_profile: user.risk_profile,
            },
        })
    }

    /// Records a transaction. Expense amounts are stored negative no
    /// matter how they were submitted.
    pub fn add_transaction(&self, user_id: u32, new: NewTransaction) -> ResultEngine<Transaction> {
        self.with_user(user_id, |user| {
            let amount = match new.kind {
                TransactionKind::Expense => -new.amount.abs(),
                TransactionKind::Income => new.amount,
            };
            let transaction = Transaction {
                id: user.transactions.len() as u32 + 1,
                date: new.date.unwrap_or_else(today),
                kind: new.kind,
                amount,
                description: new.description,
                category: new.category,
            };
            user.transactions.push(transaction.clone());
            Ok(transaction)
        })
    }

    /// The user's transactions in stored order.
    pub fn transactions(&self, user_id: u32) -> ResultEngine<Vec<Transaction>> {
        Ok(self.user(user_id)?.transactions)
    }

    /// Records an investment. A missing current value defaults to the
    /// purchase cost.
    pub fn add_investment(&self, user_id: u32, new: NewInvestment) -> ResultEngine<Investment> {
        self.with_user(user_id, |user| {
            let investment = Investment {
                id: user.investments.len() as u32 + 1,
                name: new.name,
                kind: new.kind,
                amount: new.amount,
                current_value: Some(new.current_value.unwrap_or(new.amount)),
                purchase_date: new.purchase_date.unwrap_or_else(today),
                expected_return: new.expected_return,
                notes: new.notes,
                added_date: today(),
            };
            user.investments.push(investment.clone());
            Ok(investment)
        })
    }

    pub fn investments(&self, user_id: u32) -> ResultEngine<Vec<Investment>> {
        Ok(self.user(user_id)?.investments)
    }

    /// Creates a goal. Ids are `max(id) + 1` so deleting a goal never
    /// frees its id for reuse.
    pub fn add_goal(&self, user_id: u32, new: NewGoal) -> ResultEngine<Goal> {
        self.with_user(user_id, |user| {
            let id = user.goals.iter().map(|g| g.id).max().unwrap_or(0) + 1;
            let mut goal = Goal {
                id,
                name: new.name,
                description: new.description,
                target: new.target,
                saved: new.saved,
                deadline: new.deadline.unwrap_or_else(today),
                created_date: today(),
                progress: 0.0,
            };
            goal.progress = reports::goal_progress(&goal);
            user.goals.push(goal.clone());
            Ok(goal)
        })
    }

    pub fn goals(&self, user_id: u32) -> ResultEngine<Vec<Goal>> {
        Ok(self.user(user_id)?.goals)
    }

    /// Replaces a goal's editable fields and recomputes its progress.
    pub fn update_goal(&self, user_id: u32, goal_id: u32, update: GoalUpdate) -> ResultEngine<Goal> {
        self.with_user(user_id, |user| {
            let goal = user
                .goals
                .iter_mut()
                .find(|g| g.id == goal_id)
                .ok_or_else(|| EngineError::KeyNotFound(format!("goal {goal_id}")))?;
            goal.name = update.name;
            goal.description = update.description;
            goal.target = update.target;
            goal.saved = update.saved;
            goal.deadline = update.deadline;
            goal.progress = reports::goal_progress(goal);
            Ok(goal.clone())
        })
    }

    /// Adds money to a goal. `saved` is not capped at the target
    /// (over-saving stays visible); the progress field is.
    pub fn deposit_to_goal(&self, user_id: u32, goal_id: u32, amount: f64) -> ResultEngine<Goal> {
        self.with_user(user_id, |user| {
            let goal = user
                .goals
                .iter_mut()
                .find(|g| g.id == goal_id)
                .ok_or_else(|| EngineError::KeyNotFound(format!("goal {goal_id}")))?;
            goal.saved += amount;
            goal.progress = reports::goal_progress(goal);
            Ok(goal.clone())
        })
    }

    /// Removes a goal. The only hard delete in the system.
    pub fn delete_goal(&self, user_id: u32, goal_id: u32) -> ResultEngine<()> {
        self.with_user(user_id, |user| {
            let before = user.goals.len();
            user.goals.retain(|g| g.id != goal_id);
            if user.goals.len() == before {
                return Err(EngineError::KeyNotFound(format!("goal {goal_id}")));
            }
            Ok(())
        })
    }

    /// Regenerates the default dataset, keeping only the current
    /// user's identity (with empty lists) in place of the demo user.
    pub fn reset(&self, user_id: u32) -> ResultEngine<()> {
        let current = self.user(user_id)?;
        let mut data = StoreData::default();
        if let Some(slot) = data.users.iter_mut().find(|u| u.username == "demo") {
            *slot = User {
                id: current.id,
                username: current.username.clone(),
                password_hash: current.password_hash,
                email: current.email,
                created_at: current.created_at,
                risk_profile: current.risk_profile,
                transactions: Vec::new(),
                investments: Vec::new(),
                goals: Vec::new(),
            };
        }
        self.save(&data)?;
        tracing::info!("store reset by user {}", current.username);
        Ok(())
    }
}
