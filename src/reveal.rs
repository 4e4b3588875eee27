//! Step-by-step reveal of a computed path.
//!
//! The path is computed once, up front. A [Reveal] then hands out growing prefixes of it, one
//! cell per frame; the caller decides the cadence (see [REVEAL_DELAY](crate::REVEAL_DELAY)).
//! Editing the grid while a reveal runs should cancel it through its [CancelHandle].
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use grid_util::point::Point;

/// Shared flag that stops a [Reveal]. Clones refer to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// One frame of a reveal: the first `step + 1` cells of the path.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealFrame {
    pub step: usize,
    pub visible: Vec<Point>,
}

impl RevealFrame {
    /// The cell added in this frame.
    pub fn current(&self) -> Option<Point> {
        self.visible.last().copied()
    }
}

#[derive(Debug)]
pub struct Reveal {
    path: Vec<Point>,
    next_step: usize,
    cancel: CancelHandle,
}

impl Reveal {
    pub fn new(path: Vec<Point>) -> Reveal {
        Reveal {
            path,
            next_step: 0,
            cancel: CancelHandle::default(),
        }
    }

    /// The full path being revealed.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// True once every frame has been handed out or the reveal was cancelled.
    pub fn is_finished(&self) -> bool {
        self.is_cancelled() || self.next_step >= self.path.len()
    }

    /// Sleeps `delay` before each frame. Meant for terminal front ends that block on the reveal.
    pub fn paced(self, delay: Duration) -> impl Iterator<Item = RevealFrame> {
        self.map(move |frame| {
            thread::sleep(delay);
            frame
        })
    }
}

impl Iterator for Reveal {
    type Item = RevealFrame;

    fn next(&mut self) -> Option<RevealFrame> {
        if self.is_finished() {
            return None;
        }
        let step = self.next_step;
        self.next_step += 1;
        Some(RevealFrame {
            step,
            visible: self.path[..=step].to_vec(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_cancelled() {
            (0, Some(0))
        } else {
            // A cancellation may cut the reveal short at any point.
            (0, Some(self.path.len() - self.next_step))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell;

    fn diagonal() -> Vec<Point> {
        vec![cell(0, 0), cell(1, 1), cell(2, 2)]
    }

    #[test]
    fn frames_grow_by_one() {
        let frames: Vec<RevealFrame> = Reveal::new(diagonal()).collect();
        assert_eq!(frames.len(), 3);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.step, i);
            assert_eq!(frame.visible, diagonal()[..=i].to_vec());
        }
        assert_eq!(frames[2].current(), Some(cell(2, 2)));
    }

    #[test]
    fn cancel_stops_reveal() {
        let mut reveal = Reveal::new(diagonal());
        let handle = reveal.cancel_handle();
        assert!(reveal.next().is_some());
        handle.cancel();
        assert!(reveal.is_finished());
        assert!(reveal.next().is_none());
        assert_eq!(reveal.size_hint(), (0, Some(0)));
        assert_eq!(reveal.path().len(), 3);
    }

    #[test]
    fn empty_path_has_no_frames() {
        let mut reveal = Reveal::new(Vec::new());
        assert!(reveal.is_finished());
        assert!(reveal.next().is_none());
    }

    #[test]
    fn paced_yields_all_frames() {
        let frames: Vec<RevealFrame> = Reveal::new(diagonal())
            .paced(Duration::from_millis(1))
            .collect();
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn handle_cancels_across_threads() {
        let reveal = Reveal::new(diagonal());
        let handle = reveal.cancel_handle();
        thread::spawn(move || handle.cancel()).join().unwrap();
        assert!(reveal.is_cancelled());
    }
}
