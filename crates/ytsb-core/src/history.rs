use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use tokio::sync::Mutex;

use crate::domain::UserId;

/// Per-user capacity of the recent-query log.
pub const HISTORY_CAPACITY: usize = 10;

type UserLog = Arc<Mutex<VecDeque<String>>>;

/// In-memory, per-user log of recent search queries.
///
/// Lives for the process lifetime. Each user's log is bounded and evicts the
/// oldest entry first; the number of users is not bounded.
///
/// The map lock is only held to look up or insert a user's log. Appends lock
/// that user's log alone, so different users never wait on each other.
#[derive(Debug)]
pub struct HistoryStore {
    capacity: usize,
    users: Mutex<HashMap<UserId, UserLog>>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            users: Mutex::new(HashMap::new()),
        }
    }

    async fn log_for(&self, user: UserId) -> UserLog {
        self.users.lock().await.entry(user).or_default().clone()
    }

    /// Create an empty log for `user` if none exists yet.
    pub async fn ensure(&self, user: UserId) {
        self.log_for(user).await;
    }

    /// Append `query` and trim to capacity in one critical section.
    pub async fn append(&self, user: UserId, query: &str) {
        let log = self.log_for(user).await;
        let mut log = log.lock().await;
        log.push_back(query.to_string());
        while log.len() > self.capacity {
            log.pop_front();
        }
    }

    /// Snapshot of `user`'s log, oldest first.
    pub async fn recent(&self, user: UserId) -> Vec<String> {
        let log = self.users.lock().await.get(&user).cloned();
        match log {
            Some(log) => log.lock().await.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub async fn user_count(&self) -> usize {
        self.users.lock().await.len()
    }
}
