//! TOML configuration.
//!
//! ```toml
//! min_presence = 0.5
//! max_hands = 1
//! rotate_180 = false
//! rules = ["thumbs_up"]
//! ```
//!
//! Every field is optional and falls back to the value shown above.

use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    frame::{FrameClassifier, FrameOptions},
    gesture::{rules, Classifier},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hands whose presence score is below this value are not classified.
    pub min_presence: f32,
    /// Maximum number of hands classified per frame.
    pub max_hands: usize,
    /// Rotate landmarks by 180° before classification.
    pub rotate_180: bool,
    /// Names of the gesture rules to evaluate, in priority order.
    pub rules: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_presence: FrameOptions::DEFAULT_MIN_PRESENCE,
            max_hands: FrameOptions::DEFAULT_MAX_HANDS,
            rotate_180: false,
            rules: vec!["thumbs_up".to_string()],
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file `{}`", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file `{}`", path.display()))?;
        log::debug!("loaded config from `{}`: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("failed to write config file `{}`", path.display()))?;
        Ok(())
    }

    /// Parses and validates a configuration.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks value ranges and rule names.
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.min_presence) {
            return Err(Error::InvalidConfig(format!(
                "`min_presence` must be between 0.0 and 1.0, got {}",
                self.min_presence
            )));
        }
        self.classifier().map(drop)
    }

    /// Builds a [`Classifier`] evaluating the configured rules in order.
    pub fn classifier(&self) -> Result<Classifier, Error> {
        let rules = self
            .rules
            .iter()
            .map(|name| rules::by_name(name).ok_or_else(|| Error::UnknownRule(name.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Classifier::new(rules))
    }

    pub fn frame_options(&self) -> FrameOptions {
        FrameOptions {
            min_presence: self.min_presence,
            max_hands: self.max_hands,
            rotate_180: self.rotate_180,
        }
    }

    pub fn frame_classifier(&self) -> Result<FrameClassifier, Error> {
        Ok(FrameClassifier::new(self.classifier()?, self.frame_options()))
    }
}
