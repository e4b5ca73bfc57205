//! Rule-based gesture classification.
//!
//! A [`Classifier`] holds an ordered list of [`Rule`]s. Each rule pairs a [`Gesture`] label with
//! a predicate over a [`HandLandmarks`] set. Classification evaluates the rules in order and
//! returns the label of the first rule that matches, or [`Gesture::UNKNOWN`] if none does.
//!
//! The default classifier only recognizes [`Gesture::THUMBS_UP`]. More rules are available in
//! [`rules`] and can be added with [`Classifier::with_rule`] or through the configuration file.
//!
//! Classification is pure: a [`Classifier`] is immutable after construction and can be shared
//! between threads freely.

pub mod rules;

use std::fmt;

use once_cell::sync::Lazy;

use crate::{
    error::Error,
    landmark::{HandLandmarks, Keypoint},
};

pub use rules::Rule;

/// A gesture label, as displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gesture(&'static str);

impl Gesture {
    /// Returned when no rule matches.
    pub const UNKNOWN: Self = Self("Unknown");

    pub const THUMBS_UP: Self = Self("Thumbs Up");
    pub const FIST: Self = Self("Fist");
    pub const OPEN_PALM: Self = Self("Open Palm");
    pub const POINTING: Self = Self("Pointing");
    pub const PEACE: Self = Self("Peace");

    /// Creates a custom gesture label.
    pub const fn new(label: &'static str) -> Self {
        Self(label)
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for Gesture {
    fn as_ref(&self) -> &str {
        self.0
    }
}

/// Maps hand landmarks to [`Gesture`]s by evaluating an ordered list of [`Rule`]s.
///
/// When several rules match the same hand, the one that was added first wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

/// The default [`Classifier`] only recognizes [`Gesture::THUMBS_UP`].
impl Default for Classifier {
    fn default() -> Self {
        Self::new([rules::THUMBS_UP])
    }
}

impl Classifier {
    /// Creates a classifier that evaluates `rules` in iteration order.
    pub fn new<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Appends `rule` to the end of the rule list, giving it the lowest priority.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the rules of this classifier in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classifies an unchecked list of hand keypoints.
    ///
    /// Returns [`Error::InvalidLandmarkCount`] if `landmarks` does not contain exactly
    /// [`NUM_LANDMARKS`](crate::landmark::NUM_LANDMARKS) keypoints. Any well-formed input yields a
    /// [`Gesture`], falling back to [`Gesture::UNKNOWN`].
    pub fn classify(&self, landmarks: &[Keypoint]) -> Result<Gesture, Error> {
        let hand = HandLandmarks::from_slice(landmarks)?;
        Ok(self.classify_hand(&hand))
    }

    /// Classifies a validated hand landmark set.
    pub fn classify_hand(&self, hand: &HandLandmarks) -> Gesture {
        match self.rules.iter().find(|rule| rule.matches(hand)) {
            Some(rule) => {
                log::trace!("rule matched: {}", rule.gesture());
                rule.gesture()
            }
            None => Gesture::UNKNOWN,
        }
    }
}

/// Classifies `landmarks` with the default [`Classifier`].
pub fn classify(landmarks: &[Keypoint]) -> Result<Gesture, Error> {
    static DEFAULT: Lazy<Classifier> = Lazy::new(Classifier::default);

    DEFAULT.classify(landmarks)
}
