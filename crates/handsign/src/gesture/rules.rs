//! Gesture rules and the built-in rule catalog.
//!
//! All rules compare Y coordinates only. Since image Y points down, a fingertip is *extended*
//! when it lies strictly above the joint two positions below it (see
//! [`Finger::fold_reference`]) and *folded* when it lies strictly below. A tip level with its
//! reference joint is neither.

use std::fmt;

use crate::landmark::{Finger, HandLandmarks};

use super::Gesture;

/// A named gesture: a [`Gesture`] label and the predicate that recognizes it.
#[derive(Clone, Copy)]
pub struct Rule {
    gesture: Gesture,
    predicate: fn(&HandLandmarks) -> bool,
}

impl Rule {
    pub const fn new(gesture: Gesture, predicate: fn(&HandLandmarks) -> bool) -> Self {
        Self { gesture, predicate }
    }

    #[inline]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    #[inline]
    pub fn matches(&self, hand: &HandLandmarks) -> bool {
        (self.predicate)(hand)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.gesture.as_str()).finish()
    }
}

pub const THUMBS_UP: Rule = Rule::new(Gesture::THUMBS_UP, thumbs_up);
pub const FIST: Rule = Rule::new(Gesture::FIST, fist);
pub const OPEN_PALM: Rule = Rule::new(Gesture::OPEN_PALM, open_palm);
pub const POINTING: Rule = Rule::new(Gesture::POINTING, pointing);
pub const PEACE: Rule = Rule::new(Gesture::PEACE, peace);

/// All built-in rules, by configuration name.
pub const CATALOG: &[(&str, Rule)] = &[
    ("thumbs_up", THUMBS_UP),
    ("fist", FIST),
    ("open_palm", OPEN_PALM),
    ("pointing", POINTING),
    ("peace", PEACE),
];

/// Looks up a built-in rule by its configuration name.
pub fn by_name(name: &str) -> Option<Rule> {
    CATALOG
        .iter()
        .find(|(rule_name, _)| *rule_name == name)
        .map(|(_, rule)| *rule)
}

/// Returns the configuration names of all built-in rules.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(name, _)| *name)
}

#[inline]
pub fn is_extended(hand: &HandLandmarks, finger: Finger) -> bool {
    hand[finger.tip()].y() < hand[finger.fold_reference()].y()
}

#[inline]
pub fn is_folded(hand: &HandLandmarks, finger: Finger) -> bool {
    hand[finger.tip()].y() > hand[finger.fold_reference()].y()
}

fn all_folded(hand: &HandLandmarks, fingers: &[Finger]) -> bool {
    fingers.iter().all(|f| is_folded(hand, *f))
}

/// Thumb raised, all other fingers folded.
pub fn thumbs_up(hand: &HandLandmarks) -> bool {
    is_extended(hand, Finger::Thumb) && all_folded(hand, &Finger::FINGERS)
}

/// All fingers folded, thumb not raised.
pub fn fist(hand: &HandLandmarks) -> bool {
    !is_extended(hand, Finger::Thumb) && all_folded(hand, &Finger::FINGERS)
}

pub fn open_palm(hand: &HandLandmarks) -> bool {
    is_extended(hand, Finger::Thumb)
        && Finger::FINGERS.iter().all(|f| is_extended(hand, *f))
}

/// Index finger extended, middle, ring and pinky folded. The thumb is ignored.
pub fn pointing(hand: &HandLandmarks) -> bool {
    is_extended(hand, Finger::Index)
        && all_folded(hand, &[Finger::Middle, Finger::Ring, Finger::Pinky])
}

/// Index and middle finger extended, ring and pinky folded. The thumb is ignored.
pub fn peace(hand: &HandLandmarks) -> bool {
    is_extended(hand, Finger::Index)
        && is_extended(hand, Finger::Middle)
        && all_folded(hand, &[Finger::Ring, Finger::Pinky])
}
