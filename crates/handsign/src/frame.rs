//! Classification of every hand detected in a video frame.

use std::fmt;

use itertools::Itertools;

use crate::{
    gesture::{Classifier, Gesture},
    hand::{Confidence, Handedness, RawHand},
};

/// Options controlling which detected hands are classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOptions {
    /// Hands with a lower presence score are ignored.
    pub min_presence: f32,
    /// Maximum number of hands to classify per frame, in detector order.
    pub max_hands: usize,
    /// Rotates landmarks by 180° before classification, for cameras mounted upside down.
    pub rotate_180: bool,
}

impl FrameOptions {
    pub const DEFAULT_MIN_PRESENCE: f32 = 0.5;
    pub const DEFAULT_MAX_HANDS: usize = 1;
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            min_presence: Self::DEFAULT_MIN_PRESENCE,
            max_hands: Self::DEFAULT_MAX_HANDS,
            rotate_180: false,
        }
    }
}

/// Applies a [`Classifier`] to all hands found in a frame.
#[derive(Debug, Clone, Default)]
pub struct FrameClassifier {
    classifier: Classifier,
    options: FrameOptions,
}

impl FrameClassifier {
    pub fn new(classifier: Classifier, options: FrameOptions) -> Self {
        Self {
            classifier,
            options,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn options(&self) -> &FrameOptions {
        &self.options
    }

    /// Classifies the hands of one frame.
    ///
    /// Hands with too low a presence score are dropped first, then at most
    /// [`FrameOptions::max_hands`] of the remaining hands are considered, in detector order. A
    /// hand with a malformed landmark set still occupies one of those slots; it is skipped and
    /// counted in [`FrameResult::skipped`] without affecting the other hands.
    pub fn classify_frame(&self, hands: &[RawHand]) -> FrameResult {
        let min_presence = self.options.min_presence;
        let present = hands.iter().enumerate().filter(|(i, raw)| {
            let keep = raw.confidence() >= min_presence;
            if !keep {
                log::trace!(
                    "ignoring hand #{i} with presence {:.2} < {min_presence:.2}",
                    raw.confidence(),
                );
            }
            keep
        });

        let mut result = FrameResult::default();
        let mut considered = 0;
        for (i, raw) in present {
            if considered == self.options.max_hands {
                log::trace!(
                    "more than {} hands present, ignoring hand #{i} and later",
                    self.options.max_hands
                );
                break;
            }
            considered += 1;

            let mut hand = match raw.validate() {
                Ok(hand) => hand,
                Err(e) => {
                    log::warn!("skipping hand #{i}: {e}");
                    result.skipped += 1;
                    continue;
                }
            };
            if self.options.rotate_180 {
                *hand.landmarks_mut() = hand.landmarks().rotate_180();
            }

            let gesture = self.classifier.classify_hand(hand.landmarks());
            result.hands.push(ClassifiedHand {
                handedness: hand.handedness(),
                presence: hand.presence(),
                gesture,
            });
        }

        result
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedHand {
    pub handedness: Handedness,
    pub presence: f32,
    pub gesture: Gesture,
}

/// Gestures recognized in a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameResult {
    /// Classified hands, in detector order.
    pub hands: Vec<ClassifiedHand>,
    /// Number of hands that were dropped because their landmark set was malformed.
    pub skipped: usize,
}

impl FrameResult {
    /// Returns the label to draw onto the frame.
    ///
    /// This is the gesture of the last classified hand, or an empty string if no hand was
    /// classified.
    pub fn overlay_label(&self) -> &'static str {
        self.hands.last().map_or("", |hand| hand.gesture.as_str())
    }

    pub fn gestures(&self) -> impl Iterator<Item = Gesture> + '_ {
        self.hands.iter().map(|hand| hand.gesture)
    }
}

/// Lists all classified hands as `R:Thumbs Up, L:Unknown`.
impl fmt::Display for FrameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hands = self
            .hands
            .iter()
            .map(|hand| format!("{}:{}", hand.handedness.as_str(), hand.gesture))
            .join(", ");
        f.write_str(&hands)
    }
}
