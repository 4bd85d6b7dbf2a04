use serde::{Deserialize, Serialize};

use crate::types::{Finger, HandPose, Joint, JointFrame, Position};

/// Joint every finger extension is measured against.
pub const PALM_REFERENCE: Joint = Joint::ForearmWrist;

const FINGER_JOINTS: [(Finger, Joint, Joint); 4] = [
    (Finger::Index, Joint::IndexFingerTip, Joint::IndexFingerKnuckle),
    (Finger::Middle, Joint::MiddleFingerTip, Joint::MiddleFingerKnuckle),
    (Finger::Ring, Joint::RingFingerTip, Joint::RingFingerKnuckle),
    (Finger::Little, Joint::LittleFingerTip, Joint::LittleFingerKnuckle),
];

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PoseThresholds {
    /// Meters the tip must reach past the knuckle, measured from the palm.
    pub extension_margin: f32,
    /// Minimum cosine between the wrist-to-knuckle and wrist-to-tip thumb directions.
    pub thumb_alignment: f32,
    /// Meters below which two joints count as touching.
    pub touch_distance: f32,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        Self {
            extension_margin: 0.01,
            thumb_alignment: 0.85,
            touch_distance: 0.025,
        }
    }
}

/// Turns a joint frame into a [`HandPose`] with fixed geometric rules.
///
/// Every check treats a missing joint as "not extended" / "not touching", so
/// a hand with no tracked joints extracts to [`HandPose::flexed`].
#[derive(Clone, Debug, Default)]
pub struct PoseExtractor {
    thresholds: PoseThresholds,
}

impl PoseExtractor {
    pub fn new(thresholds: PoseThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &PoseThresholds {
        &self.thresholds
    }

    pub fn is_finger_extended(
        &self,
        tip: Joint,
        knuckle: Joint,
        palm: Joint,
        frame: &JointFrame,
    ) -> bool {
        let (Some(tip), Some(knuckle), Some(palm)) = (
            frame.position(tip),
            frame.position(knuckle),
            frame.position(palm),
        ) else {
            return false;
        };

        distance3(tip, palm) > distance3(knuckle, palm) + self.thresholds.extension_margin
    }

    pub fn is_thumb_extended(&self, frame: &JointFrame) -> bool {
        let (Some(tip), Some(knuckle), Some(wrist)) = (
            frame.position(Joint::ThumbTip),
            frame.position(Joint::ThumbKnuckle),
            frame.position(PALM_REFERENCE),
        ) else {
            return false;
        };

        let knuckle_dir = normalize(sub(knuckle, wrist));
        let tip_dir = normalize(sub(tip, wrist));

        dot(knuckle_dir, tip_dir) > self.thresholds.thumb_alignment
    }

    pub fn are_touching(&self, a: Joint, b: Joint, frame: &JointFrame) -> bool {
        match (frame.position(a), frame.position(b)) {
            (Some(pa), Some(pb)) => distance3(pa, pb) < self.thresholds.touch_distance,
            _ => false,
        }
    }

    pub fn extract_pose(&self, frame: &JointFrame) -> HandPose {
        let mut pose = HandPose::flexed();
        if self.is_thumb_extended(frame) {
            pose = pose.with_extended(Finger::Thumb);
        }
        for (finger, tip, knuckle) in FINGER_JOINTS {
            if self.is_finger_extended(tip, knuckle, PALM_REFERENCE, frame) {
                pose = pose.with_extended(finger);
            }
        }
        if self.are_touching(Joint::ThumbTip, Joint::IndexFingerTip, frame) {
            pose = pose.with_thumb_touching_index();
        }
        pose
    }
}

fn sub(a: Position, b: Position) -> Position {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn distance3(a: Position, b: Position) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

fn dot(a: Position, b: Position) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: Position) -> Position {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len < 1e-5 {
        [0.0, 0.0, 0.0]
    } else {
        [v[0] / len, v[1] / len, v[2] / len]
    }
}
