use std::{fmt, time::Instant};

use serde::{Deserialize, Serialize};

/// World-space joint position in meters.
pub type Position = [f32; 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Little,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Joint {
    Wrist,
    ThumbKnuckle,
    ThumbIntermediateBase,
    ThumbIntermediateTip,
    ThumbTip,
    IndexFingerMetacarpal,
    IndexFingerKnuckle,
    IndexFingerIntermediateBase,
    IndexFingerIntermediateTip,
    IndexFingerTip,
    MiddleFingerMetacarpal,
    MiddleFingerKnuckle,
    MiddleFingerIntermediateBase,
    MiddleFingerIntermediateTip,
    MiddleFingerTip,
    RingFingerMetacarpal,
    RingFingerKnuckle,
    RingFingerIntermediateBase,
    RingFingerIntermediateTip,
    RingFingerTip,
    LittleFingerMetacarpal,
    LittleFingerKnuckle,
    LittleFingerIntermediateBase,
    LittleFingerIntermediateTip,
    LittleFingerTip,
    ForearmWrist,
    ForearmArm,
}

impl Joint {
    pub const COUNT: usize = 27;

    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::Wrist,
        Joint::ThumbKnuckle,
        Joint::ThumbIntermediateBase,
        Joint::ThumbIntermediateTip,
        Joint::ThumbTip,
        Joint::IndexFingerMetacarpal,
        Joint::IndexFingerKnuckle,
        Joint::IndexFingerIntermediateBase,
        Joint::IndexFingerIntermediateTip,
        Joint::IndexFingerTip,
        Joint::MiddleFingerMetacarpal,
        Joint::MiddleFingerKnuckle,
        Joint::MiddleFingerIntermediateBase,
        Joint::MiddleFingerIntermediateTip,
        Joint::MiddleFingerTip,
        Joint::RingFingerMetacarpal,
        Joint::RingFingerKnuckle,
        Joint::RingFingerIntermediateBase,
        Joint::RingFingerIntermediateTip,
        Joint::RingFingerTip,
        Joint::LittleFingerMetacarpal,
        Joint::LittleFingerKnuckle,
        Joint::LittleFingerIntermediateBase,
        Joint::LittleFingerIntermediateTip,
        Joint::LittleFingerTip,
        Joint::ForearmWrist,
        Joint::ForearmArm,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Positions of every named joint of one hand for a single tick.
///
/// A joint that is not currently tracked is `None`; lookups never assume a
/// joint is present.
#[derive(Clone, Debug, PartialEq)]
pub struct JointFrame {
    positions: [Option<Position>; Joint::COUNT],
}

impl JointFrame {
    pub fn untracked() -> Self {
        Self {
            positions: [None; Joint::COUNT],
        }
    }

    pub fn position(&self, joint: Joint) -> Option<Position> {
        self.positions[joint.index()]
    }

    pub fn set(&mut self, joint: Joint, position: Position) {
        self.positions[joint.index()] = Some(position);
    }

    pub fn clear(&mut self, joint: Joint) {
        self.positions[joint.index()] = None;
    }

    pub fn with(mut self, joint: Joint, position: Position) -> Self {
        self.set(joint, position);
        self
    }

    /// True when at least one joint has a position.
    pub fn is_tracked(&self) -> bool {
        self.positions.iter().any(Option::is_some)
    }

    pub fn tracked_joints(&self) -> impl Iterator<Item = (Joint, Position)> + '_ {
        Joint::ALL
            .iter()
            .filter_map(|&joint| self.position(joint).map(|p| (joint, p)))
    }
}

impl Default for JointFrame {
    fn default() -> Self {
        Self::untracked()
    }
}

impl FromIterator<(Joint, Position)> for JointFrame {
    fn from_iter<I: IntoIterator<Item = (Joint, Position)>>(iter: I) -> Self {
        let mut frame = JointFrame::untracked();
        for (joint, position) in iter {
            frame.set(joint, position);
        }
        frame
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub const BOTH: [Handedness; 2] = [Handedness::Left, Handedness::Right];

    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// One tick of hand-tracking input.
#[derive(Clone, Debug)]
pub struct HandFrames {
    pub left: JointFrame,
    pub right: JointFrame,
    pub timestamp: Instant,
}

impl HandFrames {
    pub fn get(&self, hand: Handedness) -> &JointFrame {
        match hand {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }
}

/// Discrete finger-pose descriptor of one hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HandPose {
    extended: [bool; 5],
    thumb_touching_index: bool,
}

impl HandPose {
    pub fn new(extended: [bool; 5], thumb_touching_index: bool) -> Self {
        Self {
            extended,
            thumb_touching_index,
        }
    }

    /// Every finger flexed, thumb not touching the index finger.
    pub fn flexed() -> Self {
        Self::default()
    }

    pub fn with_extended(mut self, finger: Finger) -> Self {
        self.extended[finger.index()] = true;
        self
    }

    pub fn with_thumb_touching_index(mut self) -> Self {
        self.thumb_touching_index = true;
        self
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.extended[finger.index()]
    }

    pub fn thumb_touching_index(&self) -> bool {
        self.thumb_touching_index
    }

    pub fn extended_fingers(&self) -> impl Iterator<Item = Finger> + '_ {
        Finger::ALL
            .into_iter()
            .filter(|&finger| self.is_extended(finger))
    }
}

impl fmt::Display for HandPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finger in Finger::ALL {
            f.write_str(if self.is_extended(finger) { "|" } else { "." })?;
        }
        if self.thumb_touching_index {
            f.write_str(" o")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Letter {
    A,
    B,
    D,
    E,
    F,
    I,
    L,
    U,
    W,
    Y,
}

impl Letter {
    pub const ALL: [Letter; 10] = [
        Letter::A,
        Letter::B,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::I,
        Letter::L,
        Letter::U,
        Letter::W,
        Letter::Y,
    ];

    pub fn from_char(c: char) -> Option<Letter> {
        let c = c.to_ascii_uppercase();
        Letter::ALL.into_iter().find(|letter| letter.as_char() == c)
    }

    pub fn as_char(&self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::I => 'I',
            Letter::L => 'L',
            Letter::U => 'U',
            Letter::W => 'W',
            Letter::Y => 'Y',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Confirmed letter per hand for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecognizedLetters {
    pub left: Option<Letter>,
    pub right: Option<Letter>,
}

impl RecognizedLetters {
    pub fn get(&self, hand: Handedness) -> Option<Letter> {
        match hand {
            Handedness::Left => self.left,
            Handedness::Right => self.right,
        }
    }

    pub(crate) fn set(&mut self, hand: Handedness, letter: Option<Letter>) {
        match hand {
            Handedness::Left => self.left = letter,
            Handedness::Right => self.right = letter,
        }
    }
}
