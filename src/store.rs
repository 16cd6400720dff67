use crate::errors::ActionError;
use crate::models::{HistoryEntry, ServiceRecord, StateSnapshot};
use chrono::NaiveTime;
use std::collections::{BTreeSet, VecDeque};

pub const DEFAULT_INITIAL_COINS: u64 = 100;
pub const DEFAULT_CALL_COST: u64 = 20;
pub const DEFAULT_COPY_REWARD: u64 = 1;

const HISTORY_TIME_FORMAT: &str = "%I:%M:%S %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeMode {
    /// +1 when a card becomes liked, -1 when it is un-liked.
    #[default]
    Toggle,
    /// Every click counts +1; the liked set still toggles.
    CountEvery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyMode {
    /// No gate; `copy_credits` counts the copies performed.
    #[default]
    Counted,
    /// Each copy spends one credit and earns `reward` coins.
    Gated { reward: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub like_mode: LikeMode,
    pub copy_mode: CopyMode,
    pub history_order: HistoryOrder,
    pub initial_coins: u64,
    pub call_cost: u64,
    pub initial_copy_credits: u64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            like_mode: LikeMode::default(),
            copy_mode: CopyMode::default(),
            history_order: HistoryOrder::default(),
            initial_coins: DEFAULT_INITIAL_COINS,
            call_cost: DEFAULT_CALL_COST,
            initial_copy_credits: 0,
        }
    }
}

/// Page-wide counters, liked set and call history.
#[derive(Debug, Clone)]
pub struct InteractionState {
    policy: Policy,
    liked_ids: BTreeSet<String>,
    appreciation: u64,
    coins: u64,
    copy_credits: u64,
    history: VecDeque<HistoryEntry>,
}

impl InteractionState {
    pub fn new(policy: Policy) -> Self {
        Self {
            liked_ids: BTreeSet::new(),
            appreciation: 0,
            coins: policy.initial_coins,
            copy_credits: policy.initial_copy_credits,
            history: VecDeque::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn appreciation(&self) -> u64 {
        self.appreciation
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn copy_credits(&self) -> u64 {
        self.copy_credits
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked_ids.contains(id)
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Toggles `id` in the liked set and returns whether it is now liked.
    pub fn toggle_like(&mut self, id: &str) -> bool {
        let liked = if self.liked_ids.remove(id) {
            false
        } else {
            self.liked_ids.insert(id.to_string());
            true
        };

        match self.policy.like_mode {
            LikeMode::Toggle if liked => self.appreciation = self.appreciation.saturating_add(1),
            LikeMode::Toggle => self.appreciation = self.appreciation.saturating_sub(1),
            LikeMode::CountEvery => self.appreciation = self.appreciation.saturating_add(1),
        }

        liked
    }

    pub fn ensure_copy_allowed(&self) -> Result<(), ActionError> {
        match self.policy.copy_mode {
            CopyMode::Gated { .. } if self.copy_credits == 0 => Err(ActionError::NoCredits),
            _ => Ok(()),
        }
    }

    /// Applies the counter changes of a copy whose clipboard write already succeeded.
    pub fn commit_copy(&mut self) -> Result<(), ActionError> {
        self.ensure_copy_allowed()?;
        match self.policy.copy_mode {
            CopyMode::Counted => self.copy_credits = self.copy_credits.saturating_add(1),
            CopyMode::Gated { reward } => {
                self.copy_credits -= 1;
                self.coins = self.coins.saturating_add(reward);
            }
        }
        Ok(())
    }

    pub fn call(&mut self, record: &ServiceRecord, now: NaiveTime) -> Result<HistoryEntry, ActionError> {
        let cost = self.policy.call_cost;
        if self.coins < cost {
            return Err(ActionError::InsufficientFunds {
                balance: self.coins,
                cost,
            });
        }
        self.coins -= cost;

        let entry = HistoryEntry {
            service_name: record.name.clone(),
            service_number: record.number.clone(),
            time: now.format(HISTORY_TIME_FORMAT).to_string(),
        };
        match self.policy.history_order {
            HistoryOrder::NewestFirst => self.history.push_front(entry.clone()),
            HistoryOrder::OldestFirst => self.history.push_back(entry.clone()),
        }
        Ok(entry)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            appreciation: self.appreciation,
            coins: self.coins,
            copy_credits: self.copy_credits,
            liked_ids: self.liked_ids.iter().cloned().collect(),
            history: self.history.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IconRef;

    fn record(id: &str, name: &str, number: &str) -> ServiceRecord {
        ServiceRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: name.to_string(),
            number: number.to_string(),
            category: "All".to_string(),
            icon: IconRef {
                class: "fa-phone".to_string(),
                bg_color: String::new(),
                color: String::new(),
            },
        }
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 30, 5).unwrap()
    }

    #[test]
    fn like_toggles_membership_and_count() {
        let mut state = InteractionState::new(Policy::default());

        assert!(state.toggle_like("a"));
        assert_eq!(state.appreciation(), 1);
        assert!(state.is_liked("a"));

        assert!(!state.toggle_like("a"));
        assert_eq!(state.appreciation(), 0);
        assert!(!state.is_liked("a"));
    }

    #[test]
    fn like_parity_matches_click_count() {
        let mut state = InteractionState::new(Policy::default());
        for clicks in 1..=7u64 {
            state.toggle_like("a");
            assert_eq!(state.is_liked("a"), clicks % 2 == 1);
            assert_eq!(state.appreciation(), clicks % 2);
        }
    }

    #[test]
    fn each_distinct_like_counts_once() {
        let mut state = InteractionState::new(Policy::default());
        for id in ["a", "b", "c", "d"] {
            state.toggle_like(id);
        }
        assert_eq!(state.appreciation(), 4);
        assert_eq!(state.snapshot().liked_ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn count_every_mode_never_decrements() {
        let policy = Policy {
            like_mode: LikeMode::CountEvery,
            ..Policy::default()
        };
        let mut state = InteractionState::new(policy);
        state.toggle_like("a");
        state.toggle_like("a");
        state.toggle_like("a");
        assert_eq!(state.appreciation(), 3);
        assert!(state.is_liked("a"));
    }

    #[test]
    fn counted_copies_are_never_gated() {
        let mut state = InteractionState::new(Policy::default());
        for _ in 0..3 {
            state.ensure_copy_allowed().unwrap();
            state.commit_copy().unwrap();
        }
        assert_eq!(state.copy_credits(), 3);
        assert_eq!(state.coins(), DEFAULT_INITIAL_COINS);
    }

    #[test]
    fn gated_copies_spend_credits_then_fail() {
        let policy = Policy {
            copy_mode: CopyMode::Gated { reward: 5 },
            initial_copy_credits: 2,
            ..Policy::default()
        };
        let mut state = InteractionState::new(policy);

        state.commit_copy().unwrap();
        state.commit_copy().unwrap();
        assert_eq!(state.copy_credits(), 0);
        assert_eq!(state.coins(), DEFAULT_INITIAL_COINS + 10);

        assert_eq!(state.commit_copy(), Err(ActionError::NoCredits));
        assert_eq!(state.ensure_copy_allowed(), Err(ActionError::NoCredits));
        assert_eq!(state.copy_credits(), 0);
        assert_eq!(state.coins(), DEFAULT_INITIAL_COINS + 10);
    }

    #[test]
    fn calls_debit_until_balance_runs_out() {
        let policy = Policy {
            initial_coins: 50,
            call_cost: 20,
            ..Policy::default()
        };
        let mut state = InteractionState::new(policy);
        let police = record("a", "Police", "999");

        state.call(&police, noon()).unwrap();
        state.call(&police, noon()).unwrap();
        assert_eq!(state.coins(), 10);

        let err = state.call(&police, noon()).unwrap_err();
        assert_eq!(err, ActionError::InsufficientFunds { balance: 10, cost: 20 });
        assert_eq!(state.coins(), 10);
        assert_eq!(state.history().count(), 2);
    }

    #[test]
    fn exact_balance_allows_one_call() {
        let policy = Policy {
            initial_coins: 20,
            call_cost: 20,
            ..Policy::default()
        };
        let mut state = InteractionState::new(policy);
        let police = record("a", "Police", "999");

        let entry = state.call(&police, noon()).unwrap();
        assert_eq!(entry.service_name, "Police");
        assert_eq!(entry.service_number, "999");
        assert_eq!(entry.time, "12:30:05 PM");
        assert_eq!(state.coins(), 0);

        assert!(state.call(&police, noon()).is_err());
        assert_eq!(state.history().count(), 1);
    }

    #[test]
    fn history_time_uses_twelve_hour_clock() {
        let mut state = InteractionState::new(Policy::default());
        let morning = NaiveTime::from_hms_opt(9, 5, 7).unwrap();
        let entry = state.call(&record("a", "Police", "999"), morning).unwrap();
        assert_eq!(entry.time, "09:05:07 AM");
    }

    #[test]
    fn history_order_follows_policy() {
        let fire = record("f", "Fire", "998");
        let police = record("p", "Police", "999");

        let mut newest_first = InteractionState::new(Policy::default());
        newest_first.call(&police, noon()).unwrap();
        newest_first.call(&fire, noon()).unwrap();
        let names: Vec<_> = newest_first.history().map(|e| e.service_name.as_str()).collect();
        assert_eq!(names, ["Fire", "Police"]);

        let mut oldest_first = InteractionState::new(Policy {
            history_order: HistoryOrder::OldestFirst,
            ..Policy::default()
        });
        oldest_first.call(&police, noon()).unwrap();
        oldest_first.call(&fire, noon()).unwrap();
        let names: Vec<_> = oldest_first.history().map(|e| e.service_name.as_str()).collect();
        assert_eq!(names, ["Police", "Fire"]);
    }

    #[test]
    fn clear_history_leaves_counters_alone() {
        let mut state = InteractionState::new(Policy::default());
        let police = record("a", "Police", "999");
        state.toggle_like("a");
        state.call(&police, noon()).unwrap();
        state.call(&police, noon()).unwrap();

        state.clear_history();
        assert_eq!(state.history().count(), 0);
        assert_eq!(state.appreciation(), 1);
        assert_eq!(state.coins(), DEFAULT_INITIAL_COINS - 2 * DEFAULT_CALL_COST);

        state.clear_history();
        assert!(state.snapshot().history.is_empty());
    }
}
