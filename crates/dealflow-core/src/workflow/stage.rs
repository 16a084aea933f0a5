//! Workflow stages.

use std::fmt;

use serde::Serialize;

/// The four ordered stages of an investor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Profiling = 0,
    Discovery = 1,
    Detail = 2,
    Conversation = 3,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Profiling,
        Stage::Discovery,
        Stage::Detail,
        Stage::Conversation,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Short label shown by step indicators.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Profiling => "Profile",
            Stage::Discovery => "Discover",
            Stage::Detail => "Detail",
            Stage::Conversation => "Chat",
        }
    }

    pub fn next(self) -> Option<Stage> {
        Stage::ALL.get(self.index() as usize + 1).copied()
    }

    pub fn previous(self) -> Option<Stage> {
        (self.index() as usize)
            .checked_sub(1)
            .and_then(|i| Stage::ALL.get(i).copied())
    }

    /// Whether moving from `self` to `to` is a single step (or no move).
    pub fn is_adjacent(self, to: Stage) -> bool {
        self.index().abs_diff(to.index()) <= 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Profiling => "profiling",
            Stage::Discovery => "discovery",
            Stage::Detail => "detail",
            Stage::Conversation => "conversation",
        };
        f.write_str(name)
    }
}
