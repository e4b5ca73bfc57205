//! Hand landmark keypoints and joint names.

use std::ops::Index;

use nalgebra::{Point2, Rotation2, Vector2};

use crate::error::Error;

/// The number of keypoints in a [`HandLandmarks`] set.
pub const NUM_LANDMARKS: usize = 21;

type Position = [f32; 3];

/// A single keypoint in normalized image coordinates.
///
/// X and Y are in range 0.0 to 1.0 for points inside the image, with Y pointing down. Z is a
/// relative depth estimate.
#[derive(Debug, Default, PartialEq, PartialOrd, Clone, Copy)]
pub struct Keypoint {
    pos: Position,
}

impl Keypoint {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { pos: [x, y, z] }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.pos[2]
    }
}

impl From<Position> for Keypoint {
    fn from([x, y, z]: Position) -> Self {
        Self::new(x, y, z)
    }
}

/// The 21-point skeleton of one detected hand.
///
/// A [`HandLandmarks`] value always holds exactly [`NUM_LANDMARKS`] keypoints, indexed according to
/// [`LandmarkIdx`]. Construction from unchecked data fails with
/// [`Error::InvalidLandmarkCount`] if the number of keypoints is wrong.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks {
    points: [Keypoint; NUM_LANDMARKS],
}

impl HandLandmarks {
    pub fn new(points: [Keypoint; NUM_LANDMARKS]) -> Self {
        Self { points }
    }

    /// Creates a landmark set from a slice of keypoints ordered by [`LandmarkIdx`].
    pub fn from_slice(points: &[Keypoint]) -> Result<Self, Error> {
        let points = <[Keypoint; NUM_LANDMARKS]>::try_from(points).map_err(|_| {
            Error::InvalidLandmarkCount {
                count: points.len(),
            }
        })?;
        Ok(Self { points })
    }

    /// Creates a landmark set from a flat array of `x, y, z` triples.
    ///
    /// This is the layout used by the output tensors of hand landmark networks (63 values for one
    /// hand).
    pub fn from_flat(coords: &[f32]) -> Result<Self, Error> {
        if coords.len() != NUM_LANDMARKS * 3 {
            return Err(Error::InvalidLandmarkCount {
                count: coords.len() / 3,
            });
        }

        let points = std::array::from_fn(|i| {
            Keypoint::new(coords[i * 3], coords[i * 3 + 1], coords[i * 3 + 2])
        });
        Ok(Self { points })
    }

    #[inline]
    pub fn get(&self, idx: LandmarkIdx) -> Keypoint {
        self.points[idx as usize]
    }

    pub fn as_slice(&self) -> &[Keypoint] {
        &self.points
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Keypoint> + Clone + '_ {
        self.points.iter().copied()
    }

    pub fn map_positions(&mut self, mut f: impl FnMut(Position) -> Position) {
        for point in &mut self.points {
            point.pos = f(point.pos);
        }
    }

    /// Returns the landmarks as they would be detected in an image rotated by 180°.
    pub fn rotate_180(mut self) -> Self {
        self.map_positions(|[x, y, z]| [1.0 - x, 1.0 - y, z]);
        self
    }

    /// Returns the landmarks as they would be detected in a horizontally mirrored image.
    pub fn flip_horizontal(mut self) -> Self {
        self.map_positions(|[x, y, z]| [1.0 - x, y, z]);
        self
    }

    /// Returns an iterator over the landmarks that surround the palm.
    pub fn palm_landmarks(&self) -> impl Iterator<Item = Keypoint> + '_ {
        PALM_LANDMARKS.iter().map(|lm| self.get(*lm))
    }

    /// Computes the center position of the hand's palm by averaging the landmarks around it.
    pub fn palm_center(&self) -> Position {
        let mut pos = [0.0; 3];
        let mut count = 0;
        for lm in self.palm_landmarks() {
            let [x, y, z] = lm.position();
            pos[0] += x;
            pos[1] += y;
            pos[2] += z;
            count += 1;
        }

        pos.map(|c| c / count as f32)
    }

    /// Computes the clockwise rotation of the palm compared to an upright position.
    ///
    /// A rotation of 0° means that fingers are pointed upwards.
    pub fn rotation_radians(&self) -> f32 {
        let mcp = self.get(LandmarkIdx::MiddleFingerMcp);
        let finger = Point2::new(mcp.x(), mcp.y());
        let wrist = self.get(LandmarkIdx::Wrist);
        let wrist = Point2::new(wrist.x(), wrist.y());

        let rel = wrist - finger;
        Rotation2::rotation_between(&Vector2::y(), &rel).angle()
    }
}

impl TryFrom<&[Keypoint]> for HandLandmarks {
    type Error = Error;

    fn try_from(points: &[Keypoint]) -> Result<Self, Error> {
        Self::from_slice(points)
    }
}

impl TryFrom<Vec<Keypoint>> for HandLandmarks {
    type Error = Error;

    fn try_from(points: Vec<Keypoint>) -> Result<Self, Error> {
        Self::from_slice(&points)
    }
}

impl Index<LandmarkIdx> for HandLandmarks {
    type Output = Keypoint;

    fn index(&self, idx: LandmarkIdx) -> &Keypoint {
        &self.points[idx as usize]
    }
}

impl Index<usize> for HandLandmarks {
    type Output = Keypoint;

    fn index(&self, idx: usize) -> &Keypoint {
        &self.points[idx]
    }
}

/// Names for the hand pose landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl From<LandmarkIdx> for usize {
    #[inline]
    fn from(idx: LandmarkIdx) -> usize {
        idx as usize
    }
}

const PALM_LANDMARKS: &[LandmarkIdx] = {
    use LandmarkIdx::*;
    &[
        Wrist,
        ThumbCmc,
        IndexFingerMcp,
        MiddleFingerMcp,
        RingFingerMcp,
        PinkyMcp,
    ]
};

/// The five digits of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers except the thumb.
    pub const FINGERS: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn tip(self) -> LandmarkIdx {
        match self {
            Finger::Thumb => LandmarkIdx::ThumbTip,
            Finger::Index => LandmarkIdx::IndexFingerTip,
            Finger::Middle => LandmarkIdx::MiddleFingerTip,
            Finger::Ring => LandmarkIdx::RingFingerTip,
            Finger::Pinky => LandmarkIdx::PinkyTip,
        }
    }

    pub fn mcp(self) -> LandmarkIdx {
        match self {
            Finger::Thumb => LandmarkIdx::ThumbMcp,
            Finger::Index => LandmarkIdx::IndexFingerMcp,
            Finger::Middle => LandmarkIdx::MiddleFingerMcp,
            Finger::Ring => LandmarkIdx::RingFingerMcp,
            Finger::Pinky => LandmarkIdx::PinkyMcp,
        }
    }

    /// The joint two positions below the fingertip.
    ///
    /// Gesture rules compare each fingertip against this joint to tell whether the finger is
    /// extended or folded. For the thumb this is the MCP joint, for the other fingers the PIP
    /// joint.
    pub fn fold_reference(self) -> LandmarkIdx {
        match self {
            Finger::Thumb => LandmarkIdx::ThumbMcp,
            Finger::Index => LandmarkIdx::IndexFingerPip,
            Finger::Middle => LandmarkIdx::MiddleFingerPip,
            Finger::Ring => LandmarkIdx::RingFingerPip,
            Finger::Pinky => LandmarkIdx::PinkyPip,
        }
    }
}
