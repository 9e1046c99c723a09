//! Platform abstraction layer
//!
//! The simulation consumes abstract input events. A host (window, terminal,
//! test script) turns its own input into `InputEvent`s once per frame.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One input event, already mapped from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Relative horizontal pointer movement in pixels
    PointerMotion(i32),
    /// Mouse button or main action key
    Primary,
    Pause,
    /// Escape / back
    Cancel,
    /// Open the leaderboard from the start screen
    ShowRanking,
    /// A typed character (name entry)
    Text(char),
    Backspace,
    Confirm,
}

/// Produces the events for one frame
pub trait InputSource {
    /// Events for the next frame; `None` once the source is exhausted
    fn poll(&mut self) -> Option<Vec<InputEvent>>;
}

/// Replays a fixed list of frames
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `count` frames with no input
    pub fn idle(mut self, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_with(Vec::new).take(count));
        self
    }

    /// Append a single frame
    pub fn then(mut self, events: Vec<InputEvent>) -> Self {
        self.frames.push_back(events);
        self
    }

    /// Append one frame per character of `name`
    pub fn typed(mut self, name: &str) -> Self {
        self.frames
            .extend(name.chars().map(|c| vec![InputEvent::Text(c)]));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<Vec<InputEvent>> {
        self.frames.pop_front()
    }
}

/// Sum of all pointer motion in a frame
pub fn pointer_delta(events: &[InputEvent]) -> i32 {
    events
        .iter()
        .map(|e| match e {
            InputEvent::PointerMotion(dx) => *dx,
            _ => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_replays_in_order() {
        let mut input = ScriptedInput::default()
            .then(vec![InputEvent::Primary])
            .idle(2)
            .typed("ab");
        assert_eq!(input.remaining(), 5);
        assert_eq!(input.poll(), Some(vec![InputEvent::Primary]));
        assert_eq!(input.poll(), Some(vec![]));
        assert_eq!(input.poll(), Some(vec![]));
        assert_eq!(input.poll(), Some(vec![InputEvent::Text('a')]));
        assert_eq!(input.poll(), Some(vec![InputEvent::Text('b')]));
        assert_eq!(input.poll(), None);
    }

    #[test]
    fn test_pointer_delta_sums_motion() {
        let events = [
            InputEvent::PointerMotion(5),
            InputEvent::Pause,
            InputEvent::PointerMotion(-12),
        ];
        assert_eq!(pointer_delta(&events), -7);
    }
}
