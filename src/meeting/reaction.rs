use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Going,
    Maybe,
}

/// Who reacted to a shared item.
///
/// A user id appears at most once and in at most one of the two lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(rename = "peopleGoCount", default)]
    pub people_go: Vec<String>,
    #[serde(rename = "peopleMaybeGoCount", default)]
    pub people_maybe_go: Vec<String>,
}

impl Reaction {
    /// Record `user_id` under `kind`, moving it out of the other list.
    /// Applying the same reaction twice changes nothing.
    pub fn set(&mut self, user_id: &str, kind: ReactionKind) {
        if self.kind_of(user_id) == Some(kind) && self.occurrences(user_id) == 1 {
            return;
        }
        self.clear(user_id);
        match kind {
            ReactionKind::Going => self.people_go.push(user_id.to_string()),
            ReactionKind::Maybe => self.people_maybe_go.push(user_id.to_string()),
        }
    }

    /// Remove `user_id` from both lists.
    pub fn clear(&mut self, user_id: &str) {
        self.people_go.retain(|id| id != user_id);
        self.people_maybe_go.retain(|id| id != user_id);
    }

    pub fn kind_of(&self, user_id: &str) -> Option<ReactionKind> {
        if self.people_go.iter().any(|id| id == user_id) {
            Some(ReactionKind::Going)
        } else if self.people_maybe_go.iter().any(|id| id == user_id) {
            Some(ReactionKind::Maybe)
        } else {
            None
        }
    }

    pub fn going_count(&self) -> usize {
        self.people_go.len()
    }

    pub fn maybe_count(&self) -> usize {
        self.people_maybe_go.len()
    }

    fn occurrences(&self, user_id: &str) -> usize {
        self.people_go
            .iter()
            .chain(&self.people_maybe_go)
            .filter(|id| *id == user_id)
            .count()
    }
}
