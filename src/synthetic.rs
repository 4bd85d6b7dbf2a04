//! Synthetic hand skeletons for demos and tests.

use crate::types::{Finger, HandPose, Joint, JointFrame};

/// Builds a fully tracked frame whose geometry extracts to `pose` under the
/// default thresholds.
///
/// The hand points along +y from a forearm wrist at the origin. A pose with
/// `thumb_touching_index` places the thumb tip against the index tip, where
/// the thumb reads as flexed.
pub fn frame_for(pose: HandPose) -> JointFrame {
    let mut frame = JointFrame::untracked()
        .with(Joint::ForearmWrist, [0.0, 0.0, 0.0])
        .with(Joint::Wrist, [0.0, 0.01, 0.0])
        .with(Joint::ForearmArm, [0.0, -0.2, 0.0]);

    let fingers = [
        (-0.03, Joint::IndexFingerKnuckle, Joint::IndexFingerTip, Finger::Index),
        (-0.01, Joint::MiddleFingerKnuckle, Joint::MiddleFingerTip, Finger::Middle),
        (0.01, Joint::RingFingerKnuckle, Joint::RingFingerTip, Finger::Ring),
        (0.03, Joint::LittleFingerKnuckle, Joint::LittleFingerTip, Finger::Little),
    ];
    for (x, knuckle, tip, finger) in fingers {
        frame.set(knuckle, [x, 0.09, 0.0]);
        let tip_pos = if pose.is_extended(finger) {
            [x, 0.17, 0.0]
        } else {
            // curled in, closer to the wrist than the knuckle
            [x, 0.06, 0.03]
        };
        frame.set(tip, tip_pos);
    }

    frame.set(Joint::ThumbKnuckle, [-0.04, 0.04, 0.0]);
    let thumb_tip = if pose.thumb_touching_index() {
        let index_tip = frame
            .position(Joint::IndexFingerTip)
            .unwrap_or([-0.03, 0.06, 0.03]);
        [index_tip[0] + 0.01, index_tip[1], index_tip[2]]
    } else if pose.is_extended(Finger::Thumb) {
        [-0.08, 0.08, 0.0]
    } else {
        // across the palm
        [0.01, 0.05, 0.03]
    };
    frame.set(Joint::ThumbTip, thumb_tip);

    frame
}

/// Ring finger up with a thumb-index pinch. No built-in letter uses it, so
/// it serves as the in-between shape when spelling.
pub fn transition_pose() -> HandPose {
    HandPose::flexed()
        .with_extended(Finger::Ring)
        .with_thumb_touching_index()
}

/// Copy of `frame` with every position shifted by `offset`.
pub fn translated(frame: &JointFrame, offset: [f32; 3]) -> JointFrame {
    frame
        .tracked_joints()
        .map(|(joint, p)| (joint, [p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::{
        catalog::LetterCatalog,
        matcher::PoseMatcher,
        pose::PoseExtractor,
        recognizer::LetterRecognizer,
        types::{Handedness, Letter},
    };

    #[test]
    fn translation_keeps_the_pose() {
        let extractor = PoseExtractor::default();
        let pose = HandPose::new([true, false, false, false, true], false);
        let moved = translated(&frame_for(pose), [0.4, 1.2, -0.3]);
        assert_eq!(extractor.extract_pose(&moved), pose);
        assert_eq!(moved.tracked_joints().count(), frame_for(pose).tracked_joints().count());
    }

    #[test]
    fn transition_pose_matches_no_builtin_letter() {
        for catalog in [LetterCatalog::standard(), LetterCatalog::basic()] {
            let catalog = catalog.expect("valid catalog");
            let pose = PoseExtractor::default().extract_pose(&frame_for(transition_pose()));
            assert_eq!(pose, transition_pose());
            assert_eq!(PoseMatcher::new(&catalog).match_pose(&pose), None);
        }
    }

    #[test]
    fn repeated_letter_confirms_twice_across_transition() {
        let base = Instant::now();
        let mut recognizer = LetterRecognizer::standard().expect("standard recognizer");
        let l = LetterCatalog::standard()
            .expect("standard catalog")
            .template(Letter::L)
            .map(frame_for)
            .unwrap_or_default();
        let transition = frame_for(transition_pose());

        let mut spelled = Vec::new();
        let mut shown = None;
        let mut ms = 0u64;
        for (frame, length) in [(&l, 1_500), (&transition, 150), (&l, 1_500)] {
            let end = ms + length;
            while ms < end {
                let now = base + Duration::from_millis(ms);
                let confirmed = recognizer.update(Handedness::Right, frame, now);
                if confirmed != shown {
                    spelled.extend(confirmed);
                    shown = confirmed;
                }
                ms += 30;
            }
        }
        assert_eq!(spelled, vec![Letter::L, Letter::L]);
    }
}
