use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::{
    recognizer::LetterRecognizer,
    types::{HandFrames, RecognizedLetters},
};

/// Runs `recognizer` on its own thread until `frame_rx` disconnects.
///
/// The worker is the only owner of the recognizer and its hold filters.
/// Every queued tick goes through the filters in order, since a single
/// interrupting tick resets a hold; only the newest result is published, and
/// it is dropped when the consumer is not keeping up.
pub fn start_recognizer(
    recognizer: LetterRecognizer,
    frame_rx: Receiver<HandFrames>,
    result_tx: Sender<RecognizedLetters>,
) -> thread::JoinHandle<()> {
    log::info!(
        "starting letter recognizer with {} templates",
        recognizer.catalog().len()
    );

    thread::spawn(move || run_worker_loop(recognizer, frame_rx, result_tx))
}

fn run_worker_loop(
    mut recognizer: LetterRecognizer,
    frame_rx: Receiver<HandFrames>,
    result_tx: Sender<RecognizedLetters>,
) {
    while let Some(letters) = process_pending_frames(&mut recognizer, &frame_rx) {
        if result_tx.try_send(letters).is_err() {
            log::trace!("result queue full, dropping tick");
        }
    }
    log::info!("frame source closed, letter recognizer stopping");
}

/// Blocks for the next tick, then feeds it and every tick already queued
/// behind it to `recognizer`. Returns the result of the newest one.
fn process_pending_frames(
    recognizer: &mut LetterRecognizer,
    frame_rx: &Receiver<HandFrames>,
) -> Option<RecognizedLetters> {
    let frames = frame_rx.recv().ok()?;
    let mut letters = recognizer.update_hands(&frames);
    let mut backlog = 0usize;
    for frames in frame_rx.try_iter() {
        letters = recognizer.update_hands(&frames);
        backlog += 1;
    }
    if backlog > 0 {
        log::trace!("caught up on {backlog} queued ticks");
    }
    Some(letters)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crossbeam_channel::{bounded, unbounded};

    use super::*;
    use crate::{
        catalog::LetterCatalog,
        synthetic::frame_for,
        types::{Finger, HandPose, JointFrame, Letter},
    };

    #[test]
    fn worker_confirms_held_letter_and_stops_on_disconnect() {
        let (frame_tx, frame_rx) = bounded(1);
        let (result_tx, result_rx) = unbounded();
        let recognizer = LetterRecognizer::standard().expect("standard recognizer");
        let handle = start_recognizer(recognizer, frame_rx, result_tx);

        let base = Instant::now();
        let catalog = LetterCatalog::standard().expect("standard catalog");
        let a = catalog.template(Letter::A);
        let left = a.map(frame_for).unwrap_or_default();

        let mut last = RecognizedLetters::default();
        for ms in [0u64, 500, 1_000, 1_100] {
            frame_tx
                .send(HandFrames {
                    left: left.clone(),
                    right: JointFrame::untracked(),
                    timestamp: base + Duration::from_millis(ms),
                })
                .expect("worker alive");
            last = result_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("result for tick");
        }

        assert_eq!(last.left, Some(Letter::A));
        // The untracked right hand collapses to the flexed pose, held since t=0.
        assert_eq!(last.right, Some(Letter::E));

        drop(frame_tx);
        handle.join().expect("worker thread");
    }

    fn tick(base: Instant, ms: u64, right: JointFrame) -> HandFrames {
        HandFrames {
            left: JointFrame::untracked(),
            right,
            timestamp: base + Duration::from_millis(ms),
        }
    }

    #[test]
    fn queued_interruption_still_resets_hold() {
        let catalog = LetterCatalog::standard().expect("standard catalog");
        let a = catalog.template(Letter::A).map(frame_for).unwrap_or_default();
        // Ring finger alone with a pinch matches no letter.
        let junk = frame_for(
            HandPose::flexed()
                .with_extended(Finger::Ring)
                .with_thumb_touching_index(),
        );

        let mut recognizer = LetterRecognizer::standard().expect("standard recognizer");
        let (frame_tx, frame_rx) = unbounded();
        let base = Instant::now();

        frame_tx.send(tick(base, 0, a.clone())).expect("queue");
        let first = process_pending_frames(&mut recognizer, &frame_rx).expect("first tick");
        assert_eq!(first.right, None);

        for (ms, frame) in [(950, junk), (1_000, a.clone()), (1_100, a)] {
            frame_tx.send(tick(base, ms, frame)).expect("queue");
        }
        let latest = process_pending_frames(&mut recognizer, &frame_rx).expect("batch");
        assert_eq!(latest.right, None);
        assert!(frame_rx.is_empty());
    }

    #[test]
    fn batch_reports_newest_tick() {
        let catalog = LetterCatalog::standard().expect("standard catalog");
        let l = catalog.template(Letter::L).map(frame_for).unwrap_or_default();

        let mut recognizer = LetterRecognizer::standard().expect("standard recognizer");
        let (frame_tx, frame_rx) = unbounded();
        let base = Instant::now();
        for ms in [0u64, 400, 800, 1_000] {
            frame_tx.send(tick(base, ms, l.clone())).expect("queue");
        }

        let latest = process_pending_frames(&mut recognizer, &frame_rx).expect("batch");
        assert_eq!(latest.right, Some(Letter::L));
        // The untracked left hand reads as E, held since t=0.
        assert_eq!(latest.left, Some(Letter::E));
    }
}
