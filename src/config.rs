use crate::{
    history::DEFAULT_HISTORY_CAPACITY,
    round::PhaseDurations,
};
use color_eyre::eyre::{
    Result,
    WrapErr,
    eyre,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fs,
    path::Path,
    time::Duration,
};

pub const DEFAULT_DENOMINATIONS: [u64; 4] = [10, 20, 50, 100];

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub betting_secs: u32,
    /// Shown while the market animates; never counted down.
    pub resolving_secs: u32,
    pub result_secs: u32,
    pub tick_ms: u64,
    pub animation_steps: u32,
    pub animation_step_ms: u64,
    pub history_capacity: usize,
    pub denominations: Vec<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            betting_secs: 10,
            resolving_secs: 5,
            result_secs: 3,
            tick_ms: 1_000,
            animation_steps: 10,
            animation_step_ms: 200,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            denominations: DEFAULT_DENOMINATIONS.to_vec(),
        }
    }
}

impl GameConfig {
    /// Reads a JSON config file, falling back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading game config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("parsing game config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.betting_secs == 0 {
            return Err(eyre!("betting_secs must be at least 1"));
        }
        if self.result_secs == 0 {
            return Err(eyre!("result_secs must be at least 1"));
        }
        if self.tick_ms == 0 || self.animation_step_ms == 0 {
            return Err(eyre!("tick_ms and animation_step_ms must be positive"));
        }
        if self.animation_steps == 0 {
            return Err(eyre!("animation_steps must be at least 1"));
        }
        if self.history_capacity == 0 {
            return Err(eyre!("history_capacity must be at least 1"));
        }
        if self.denominations.is_empty() {
            return Err(eyre!("at least one bet denomination is required"));
        }
        if self.denominations.contains(&0) {
            return Err(eyre!("bet denominations must be positive"));
        }
        if self.denominations.windows(2).any(|w| w[0] >= w[1]) {
            return Err(eyre!(
                "bet denominations must be strictly increasing, got {:?}",
                self.denominations
            ));
        }
        Ok(())
    }

    pub fn durations(&self) -> PhaseDurations {
        PhaseDurations {
            betting_secs: self.betting_secs,
            resolving_secs: self.resolving_secs,
            result_secs: self.result_secs,
            animation_steps: self.animation_steps,
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn animation_period(&self) -> Duration {
        Duration::from_millis(self.animation_step_ms)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;
    use std::io::Write;

    #[test]
    fn default__matches_round_timings() {
        // given
        let config = GameConfig::default();

        // when
        let durations = config.durations();

        // then
        assert_eq!(PhaseDurations::default(), durations);
        assert_eq!(Duration::from_secs(1), config.tick_period());
        assert_eq!(Duration::from_millis(200), config.animation_period());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load__partial_file_keeps_remaining_defaults() {
        // given
        let path = std::env::temp_dir().join(format!(
            "share-vegam-config-{}.json",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "betting_secs": 15, "denominations": [5, 25] }}"#).unwrap();

        // when
        let config = GameConfig::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        // then
        let expected = GameConfig {
            betting_secs: 15,
            denominations: vec![5, 25],
            ..GameConfig::default()
        };
        assert_eq!(expected, config);
    }

    #[test]
    fn load__missing_file_is_an_error() {
        // given
        let path = Path::new("/definitely/not/here/share-vegam.json");

        // when
        let result = GameConfig::load(Some(path));

        // then
        assert!(result.is_err());
    }

    #[test]
    fn validate__rejects_zero_betting_window() {
        // given
        let config = GameConfig {
            betting_secs: 0,
            ..GameConfig::default()
        };

        // when
        let result = config.validate();

        // then
        assert!(result.is_err());
    }

    #[test]
    fn validate__rejects_unordered_denominations() {
        // given
        let config = GameConfig {
            denominations: vec![10, 50, 20],
            ..GameConfig::default()
        };

        // when
        let result = config.validate();

        // then
        assert!(result.is_err());
    }

    #[test]
    fn validate__rejects_zero_denomination() {
        // given
        let config = GameConfig {
            denominations: vec![0, 10],
            ..GameConfig::default()
        };

        // when
        let result = config.validate();

        // then
        assert!(result.is_err());
    }
}
