use crate::{
    config::DEFAULT_DENOMINATIONS,
    i18n::Language,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Role {
    #[default]
    Player,
    Admin,
}

/// The amount a player is about to stake, picked from a fixed set of denominations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BetSelection {
    denominations: Vec<u64>,
    index: usize,
}

impl Default for BetSelection {
    fn default() -> Self {
        Self::new(DEFAULT_DENOMINATIONS.to_vec())
    }
}

impl BetSelection {
    /// Empty or zero-only sets fall back to the default denominations.
    pub fn new(denominations: Vec<u64>) -> Self {
        let denominations: Vec<u64> =
            denominations.into_iter().filter(|amount| *amount > 0).collect();
        let denominations = if denominations.is_empty() {
            DEFAULT_DENOMINATIONS.to_vec()
        } else {
            denominations
        };
        Self {
            denominations,
            index: 0,
        }
    }

    pub fn amount(&self) -> u64 {
        self.denominations[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn denominations(&self) -> &[u64] {
        &self.denominations
    }

    /// Selects the denomination at `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.denominations.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.denominations.len();
    }

    pub fn prev(&mut self) {
        let len = self.denominations.len();
        self.index = (self.index + len - 1) % len;
    }
}

/// Per-player state that lives for the whole app run and is handed to whoever needs it.
#[derive(Clone, Debug)]
pub struct Session {
    pub player: String,
    pub role: Role,
    pub language: Language,
    pub selection: BetSelection,
}

impl Session {
    pub fn new(
        player: impl Into<String>,
        role: Role,
        language: Language,
        denominations: Vec<u64>,
    ) -> Self {
        Self {
            player: player.into(),
            role,
            language,
            selection: BetSelection::new(denominations),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
    }
}
