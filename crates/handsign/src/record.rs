//! Landmark recordings in JSON lines format.
//!
//! Each line holds one frame with the hands a landmark detector found in it:
//!
//! ```json
//! {"hands":[{"landmarks":[[0.5,0.9,0.0],[0.45,0.8,-0.01],...],"presence":0.97,"handedness":0.12}]}
//! ```
//!
//! `presence` defaults to 1.0 and `handedness` to 0.0. Blank lines are ignored.

use std::io::{BufRead, Write};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{hand::RawHand, landmark::Keypoint};

/// One recorded frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// 1-based line number in the recording, or 0 if the frame was not read from a file.
    pub line: usize,
    pub hands: Vec<RawHand>,
}

#[derive(Serialize, Deserialize)]
struct FrameRecord {
    #[serde(default)]
    hands: Vec<HandRecord>,
}

#[derive(Serialize, Deserialize)]
struct HandRecord {
    landmarks: Vec<[f32; 3]>,
    #[serde(default = "default_presence")]
    presence: f32,
    #[serde(default)]
    handedness: f32,
}

fn default_presence() -> f32 {
    1.0
}

impl From<HandRecord> for RawHand {
    fn from(rec: HandRecord) -> Self {
        RawHand::new(rec.landmarks.into_iter().map(Keypoint::from).collect())
            .with_presence(rec.presence)
            .with_handedness(rec.handedness)
    }
}

impl From<&RawHand> for HandRecord {
    fn from(hand: &RawHand) -> Self {
        Self {
            landmarks: hand.keypoints.iter().map(|kp| kp.position()).collect(),
            presence: hand.presence,
            handedness: hand.raw_handedness,
        }
    }
}

/// Parses a single line of a recording.
pub fn parse_frame(line: &str) -> anyhow::Result<Frame> {
    let record: FrameRecord = serde_json::from_str(line)?;
    Ok(Frame {
        line: 0,
        hands: record.hands.into_iter().map(RawHand::from).collect(),
    })
}

/// Returns an iterator over all frames in a recording.
///
/// Errors carry the offending line number. Iteration may continue past a malformed line.
pub fn read_frames<R: BufRead>(reader: R) -> impl Iterator<Item = anyhow::Result<Frame>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line_no = i + 1;
            let line = match line.with_context(|| format!("failed to read line {line_no}")) {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            if line.trim().is_empty() {
                return None;
            }

            Some(
                parse_frame(&line)
                    .map(|frame| Frame {
                        line: line_no,
                        ..frame
                    })
                    .with_context(|| format!("malformed frame on line {line_no}")),
            )
        })
}

/// Appends `hands` as a single line to a recording.
pub fn write_frame<W: Write>(mut writer: W, hands: &[RawHand]) -> anyhow::Result<()> {
    let record = FrameRecord {
        hands: hands.iter().map(HandRecord::from).collect(),
    };
    serde_json::to_writer(&mut writer, &record)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::landmark::NUM_LANDMARKS;

    use super::*;

    #[test]
    fn defaults() {
        let frame = parse_frame(r#"{"hands":[{"landmarks":[[0.1,0.2,0.3]]}]}"#).unwrap();
        assert_eq!(frame.hands.len(), 1);
        let hand = &frame.hands[0];
        assert_eq!(hand.keypoints, [Keypoint::new(0.1, 0.2, 0.3)]);
        assert_eq!(hand.presence, 1.0);
        assert_eq!(hand.raw_handedness, 0.0);

        assert!(parse_frame("{}").unwrap().hands.is_empty());
    }

    #[test]
    fn line_numbers() {
        let input = "{\"hands\":[]}\n\n   \nnot json\n{\"hands\":[]}\n";
        let frames: Vec<_> = read_frames(Cursor::new(input)).collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].as_ref().unwrap().line, 1);

        let err = frames[1].as_ref().unwrap_err();
        assert!(err.to_string().contains("line 4"), "{err}");

        assert_eq!(frames[2].as_ref().unwrap().line, 5);
    }

    #[test]
    fn write_then_read() {
        let hand = RawHand::new(vec![Keypoint::new(0.25, 0.5, -0.125); NUM_LANDMARKS])
            .with_presence(0.75)
            .with_handedness(0.875);

        let mut buf = Vec::new();
        write_frame(&mut buf, &[hand.clone()]).unwrap();
        write_frame(&mut buf, &[]).unwrap();

        let frames = read_frames(Cursor::new(buf))
            .collect::<anyhow::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].hands, [hand]);
        assert!(frames[1].hands.is_empty());
    }
}
