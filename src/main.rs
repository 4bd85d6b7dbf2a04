use std::{
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use crossbeam_channel::bounded;
use sign_letters::{
    HandFrames, JointFrame, Letter, PoseMatcher, RecognizedLetters, RecognizerConfig,
    start_recognizer, synthetic,
};

const TICK: Duration = Duration::from_millis(30);
const HOLD_PER_LETTER: Duration = Duration::from_millis(1_500);
const TRANSITION: Duration = Duration::from_millis(150);

/// Replays a spelled word through the recognizer with synthetic right-hand
/// frames and prints each letter as it is confirmed.
///
/// Usage: `sign-letters [WORD] [CONFIG.toml]`
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let word = args.next().unwrap_or_else(|| "BADLY".to_string());
    let config = match args.next().map(PathBuf::from) {
        Some(path) => RecognizerConfig::load(&path)?,
        None => RecognizerConfig::default(),
    };

    let letters = word
        .chars()
        .map(|c| Letter::from_char(c).ok_or_else(|| anyhow!("no static sign for {c:?}")))
        .collect::<Result<Vec<_>>>()?;

    let recognizer = config.build_recognizer()?;
    let templates = letters
        .iter()
        .map(|&letter| {
            recognizer
                .catalog()
                .template(letter)
                .map(synthetic::frame_for)
                .with_context(|| format!("letter {letter} is not in the configured catalog"))
        })
        .collect::<Result<Vec<_>>>()?;

    // Between letters the hand passes through a shape that matches nothing,
    // so a repeated letter is held and confirmed twice.
    let transition_pose = synthetic::transition_pose();
    if let Some(letter) = PoseMatcher::new(recognizer.catalog()).match_pose(&transition_pose) {
        log::warn!("transition pose matches {letter}; repeated letters may merge");
    }
    let transition = synthetic::frame_for(transition_pose);

    let (frame_tx, frame_rx) = bounded(1);
    let (result_tx, result_rx) = bounded(8);
    let worker = start_recognizer(recognizer, frame_rx, result_tx);

    let feeder = thread::spawn(move || {
        for (i, frame) in templates.iter().enumerate() {
            let phases = [(&transition, TRANSITION), (frame, HOLD_PER_LETTER)];
            for (shape, length) in phases {
                let started = Instant::now();
                while started.elapsed() < length {
                    // Drift the hand slowly; translation does not change the pose.
                    let drift = started.elapsed().as_secs_f32() * 0.02;
                    let frames = HandFrames {
                        left: JointFrame::untracked(),
                        right: synthetic::translated(shape, [drift, 0.0, i as f32 * 0.01]),
                        timestamp: Instant::now(),
                    };
                    if frame_tx.send(frames).is_err() {
                        return;
                    }
                    thread::sleep(TICK);
                }
            }
        }
    });

    println!("spelling {word} at {} ms per tick", TICK.as_millis());
    let mut shown = RecognizedLetters::default();
    let mut spelled = String::new();
    for tick in result_rx.iter() {
        if tick.right != shown.right {
            if let Some(letter) = tick.right {
                println!("right hand: {letter}");
                spelled.push(letter.as_char());
            }
        }
        shown = tick;
    }

    feeder
        .join()
        .map_err(|_| anyhow!("frame feeder panicked"))?;
    worker
        .join()
        .map_err(|_| anyhow!("recognizer worker panicked"))?;

    println!("recognized: {spelled}");
    Ok(())
}
