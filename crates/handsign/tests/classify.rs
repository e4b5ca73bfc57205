use std::io::Cursor;

use rayon::prelude::*;

use handsign::{
    config::Config,
    gesture::{classify, Classifier, Gesture},
    hand::RawHand,
    landmark::{HandLandmarks, Keypoint, LandmarkIdx, NUM_LANDMARKS},
    record, Error,
};

/// Flat network output for a hand showing a thumbs up.
fn thumbs_up_tensor() -> Vec<f32> {
    let mut ys = [0.5; NUM_LANDMARKS];
    ys[LandmarkIdx::ThumbMcp as usize] = 0.30;
    ys[LandmarkIdx::ThumbTip as usize] = 0.10;
    for tip in [8, 12, 16, 20] {
        ys[tip] = 0.65;
    }
    ys.iter().flat_map(|&y| [0.5, y, 0.0]).collect()
}

fn keypoints(tensor: &[f32]) -> Vec<Keypoint> {
    tensor
        .chunks(3)
        .map(|c| Keypoint::new(c[0], c[1], c[2]))
        .collect()
}

#[test]
fn scenarios() {
    let base = keypoints(&thumbs_up_tensor());
    assert_eq!(classify(&base), Ok(Gesture::THUMBS_UP));

    // Thumb tip below its MCP.
    let mut b = base.clone();
    b[4] = Keypoint::new(0.5, 0.40, 0.0);
    assert_eq!(classify(&b), Ok(Gesture::UNKNOWN));

    // Index finger extended.
    let mut c = base.clone();
    c[8] = Keypoint::new(0.5, 0.2, 0.0);
    assert_eq!(classify(&c), Ok(Gesture::UNKNOWN));

    // All points equal.
    let d = vec![Keypoint::new(0.42, 0.42, 0.42); NUM_LANDMARKS];
    assert_eq!(classify(&d), Ok(Gesture::UNKNOWN));

    assert_eq!(
        classify(&base[..NUM_LANDMARKS - 1]),
        Err(Error::InvalidLandmarkCount { count: 20 })
    );
}

#[test]
fn from_network_output() {
    let hand = HandLandmarks::from_flat(&thumbs_up_tensor()).unwrap();
    assert_eq!(Classifier::default().classify_hand(&hand), Gesture::THUMBS_UP);
}

#[test]
fn parallel_classification() {
    let classifier = Classifier::default();
    let thumbs_up = keypoints(&thumbs_up_tensor());
    let neutral = vec![Keypoint::default(); NUM_LANDMARKS];

    let results: Vec<_> = (0..10_000)
        .into_par_iter()
        .map(|i| {
            let points = if i % 2 == 0 { &thumbs_up } else { &neutral };
            classifier.classify(points)
        })
        .collect();

    for (i, res) in results.into_iter().enumerate() {
        let expected = if i % 2 == 0 {
            Gesture::THUMBS_UP
        } else {
            Gesture::UNKNOWN
        };
        assert_eq!(res, Ok(expected));
    }
}

#[test]
fn replay_recording() {
    let thumbs_up = keypoints(&thumbs_up_tensor());
    let mut recording = Vec::new();
    record::write_frame(&mut recording, &[RawHand::new(thumbs_up.clone())]).unwrap();
    record::write_frame(&mut recording, &[]).unwrap();
    record::write_frame(
        &mut recording,
        &[RawHand::new(thumbs_up[..10].to_vec()), RawHand::new(thumbs_up)],
    )
    .unwrap();

    let config = Config::from_toml_str("max_hands = 2").unwrap();
    let classifier = config.frame_classifier().unwrap();

    let results: Vec<_> = record::read_frames(Cursor::new(recording))
        .map(|frame| classifier.classify_frame(&frame.unwrap().hands))
        .collect();

    let labels: Vec<_> = results.iter().map(|r| r.overlay_label()).collect();
    assert_eq!(labels, ["Thumbs Up", "", "Thumbs Up"]);
    assert_eq!(results[2].skipped, 1);
}
