//! Per-hand output of a hand landmark detector.

use crate::{
    error::Error,
    landmark::{HandLandmarks, Keypoint},
};

/// Trait for detector results that carry a confidence value.
///
/// By convention, the value is in range 0.0 to 1.0, with anything above 0.5 indicating that the
/// detected object is probably really there.
pub trait Confidence {
    fn confidence(&self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Interprets the raw handedness score of a landmark network.
    ///
    /// Scores above 0.5 indicate a right hand.
    pub fn from_score(raw: f32) -> Self {
        if raw > 0.5 {
            Handedness::Right
        } else {
            Handedness::Left
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "L",
            Handedness::Right => "R",
        }
    }
}

/// Unvalidated detector output for a single hand.
///
/// This is what a landmark network (or a recording of one) delivers before the keypoint count has
/// been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHand {
    pub keypoints: Vec<Keypoint>,
    pub presence: f32,
    pub raw_handedness: f32,
}

impl RawHand {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self {
            keypoints,
            presence: 1.0,
            raw_handedness: 0.0,
        }
    }

    pub fn with_presence(self, presence: f32) -> Self {
        Self { presence, ..self }
    }

    pub fn with_handedness(self, raw_handedness: f32) -> Self {
        Self {
            raw_handedness,
            ..self
        }
    }

    /// Checks the keypoint count and turns this into a [`HandEstimate`].
    pub fn validate(&self) -> Result<HandEstimate, Error> {
        let landmarks = HandLandmarks::from_slice(&self.keypoints)?;
        Ok(HandEstimate::new(
            landmarks,
            self.presence,
            self.raw_handedness,
        ))
    }
}

impl Confidence for RawHand {
    fn confidence(&self) -> f32 {
        self.presence
    }
}

/// A validated hand: 21 landmarks plus the detector's presence and handedness scores.
#[derive(Debug, Clone, PartialEq)]
pub struct HandEstimate {
    landmarks: HandLandmarks,
    presence: f32,
    raw_handedness: f32,
}

impl HandEstimate {
    pub fn new(landmarks: HandLandmarks, presence: f32, raw_handedness: f32) -> Self {
        Self {
            landmarks,
            presence,
            raw_handedness,
        }
    }

    pub fn landmarks(&self) -> &HandLandmarks {
        &self.landmarks
    }

    pub fn landmarks_mut(&mut self) -> &mut HandLandmarks {
        &mut self.landmarks
    }

    /// Returns the presence flag, indicating the confidence of whether a hand was in the input
    /// image.
    ///
    /// The value is between 0.0 and 1.0, with higher values indicating higher confidence that a
    /// hand was present.
    pub fn presence(&self) -> f32 {
        self.presence
    }

    /// Returns the estimated handedness of the hand.
    ///
    /// This assumes that the camera image was passed to the detector as-is, and should only be
    /// relied on when `presence` is over some threshold.
    pub fn handedness(&self) -> Handedness {
        Handedness::from_score(self.raw_handedness)
    }
}

impl Confidence for HandEstimate {
    fn confidence(&self) -> f32 {
        self.presence()
    }
}

#[cfg(test)]
mod tests {
    use crate::landmark::NUM_LANDMARKS;

    use super::*;

    #[test]
    fn handedness_threshold() {
        assert_eq!(Handedness::from_score(0.0), Handedness::Left);
        assert_eq!(Handedness::from_score(0.5), Handedness::Left);
        assert_eq!(Handedness::from_score(0.51), Handedness::Right);
    }

    #[test]
    fn validate() {
        let raw = RawHand::new(vec![Keypoint::default(); NUM_LANDMARKS])
            .with_presence(0.9)
            .with_handedness(0.8);
        let hand = raw.validate().unwrap();
        assert_eq!(hand.presence(), 0.9);
        assert_eq!(hand.confidence(), 0.9);
        assert_eq!(hand.handedness(), Handedness::Right);

        let short = RawHand::new(vec![Keypoint::default(); 5]);
        assert_eq!(
            short.validate(),
            Err(Error::InvalidLandmarkCount { count: 5 })
        );
    }
}
