use crate::round::Direction;

/// Per-round stake totals for each side of the market.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BetLedger {
    up: u64,
    down: u64,
}

impl BetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, direction: Direction, amount: u64) {
        let side = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        *side = side.saturating_add(amount);
    }

    pub fn stake(&self, direction: Direction) -> u64 {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    pub fn up(&self) -> u64 {
        self.up
    }

    pub fn down(&self) -> u64 {
        self.down
    }

    pub fn total(&self) -> u64 {
        self.up.saturating_add(self.down)
    }
}
