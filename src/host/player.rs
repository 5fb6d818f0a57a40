//! Clock-driven system player
//!
//! Keeps the now-playing queue, position and rate the way the host player
//! would, measuring position against a monotonic clock. No audio is decoded.

use std::time::Instant;

use tokio::sync::mpsc;

use super::{PlayerEvent, PlayerEventChannel, RepeatMode, SystemPlayer};
use crate::model::{PlaybackState, Track};

pub struct ClockPlayer {
    queue: Vec<Track>,
    index: Option<usize>,
    position: f64,
    last_update: Instant,
    rate: f32,
    state: PlaybackState,
    shuffle: bool,
    repeat: RepeatMode,
    events: mpsc::UnboundedSender<PlayerEvent>,
    receiver: Option<PlayerEventChannel>,
}

impl Default for ClockPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPlayer {
    pub fn new() -> Self {
        let (events, receiver) = mpsc::unbounded_channel();
        Self {
            queue: Vec::new(),
            index: None,
            position: 0.0,
            last_update: Instant::now(),
            rate: 1.0,
            state: PlaybackState::Stopped,
            shuffle: false,
            repeat: RepeatMode::Off,
            events,
            receiver: Some(receiver),
        }
    }

    #[cfg(test)]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    #[cfg(test)]
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    fn duration(&self) -> f64 {
        self.index
            .and_then(|i| self.queue.get(i))
            .map(|t| t.duration)
            .unwrap_or(0.0)
    }

    fn post(&self, event: PlayerEvent) {
        // Nobody listening is fine; the receiver may not be taken yet.
        let _ = self.events.send(event);
    }

    /// Folds elapsed wall time into `position`.
    fn settle(&mut self) {
        self.position = self.current_time();
        self.last_update = Instant::now();
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            tracing::trace!(from = ?self.state, to = ?state, "Player state changed");
            self.state = state;
            self.post(PlayerEvent::PlaybackStateChanged);
        }
    }

    fn move_to(&mut self, index: Option<usize>) {
        let changed = self.index != index;
        self.index = index;
        self.position = 0.0;
        self.last_update = Instant::now();
        if index.is_none() {
            self.set_state(PlaybackState::Stopped);
        }
        if changed {
            self.post(PlayerEvent::NowPlayingItemChanged);
        }
    }
}

impl SystemPlayer for ClockPlayer {
    fn set_queue(&mut self, items: Vec<Track>) {
        tracing::debug!(items = items.len(), "Queue replaced");
        self.queue = items;
        let first = if self.queue.is_empty() { None } else { Some(0) };
        self.move_to(first);
    }

    fn set_now_playing(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.queue.len());
        self.move_to(index);
    }

    fn now_playing_index(&self) -> Option<usize> {
        self.index
    }

    fn now_playing(&self) -> Option<Track> {
        self.index.and_then(|i| self.queue.get(i)).cloned()
    }

    fn set_rate(&mut self, rate: f32) {
        self.settle();
        self.rate = rate.max(0.0);
        if self.index.is_none() {
            return;
        }
        if self.rate > 0.0 {
            self.set_state(PlaybackState::Playing);
        } else if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
        }
    }

    fn rate(&self) -> f32 {
        self.rate
    }

    fn current_time(&self) -> f64 {
        if self.state == PlaybackState::Playing {
            let elapsed = self.last_update.elapsed().as_secs_f64() * f64::from(self.rate);
            (self.position + elapsed).min(self.duration())
        } else {
            self.position
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.duration());
        self.last_update = Instant::now();
    }

    fn skip_to_next(&mut self) {
        let next = match self.index {
            Some(i) if i + 1 < self.queue.len() => Some(i + 1),
            Some(_) if self.repeat == RepeatMode::All => Some(0),
            _ => None,
        };
        self.move_to(next);
    }

    fn skip_to_previous(&mut self) {
        let previous = self.index.map(|i| i.saturating_sub(1));
        if previous == self.index {
            self.skip_to_beginning();
        } else {
            self.move_to(previous);
        }
    }

    fn skip_to_beginning(&mut self) {
        self.position = 0.0;
        self.last_update = Instant::now();
    }

    fn stop(&mut self) {
        self.position = 0.0;
        self.last_update = Instant::now();
        self.set_state(PlaybackState::Stopped);
    }

    fn playback_state(&self) -> PlaybackState {
        self.state
    }

    fn set_shuffle(&mut self, on: bool) {
        self.shuffle = on;
    }

    fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    fn tick(&mut self) {
        if self.state != PlaybackState::Playing || self.index.is_none() {
            return;
        }
        if self.current_time() < self.duration() {
            return;
        }
        if self.repeat == RepeatMode::One {
            self.skip_to_beginning();
        } else {
            self.skip_to_next();
        }
    }

    fn take_events(&mut self) -> Option<PlayerEventChannel> {
        self.receiver.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track;

    fn queued(durations: &[f64]) -> ClockPlayer {
        let mut player = ClockPlayer::new();
        let items = durations
            .iter()
            .enumerate()
            .map(|(i, d)| track(i as u64 + 1, "t", "a", 1, *d))
            .collect();
        player.set_queue(items);
        player
    }

    #[test]
    fn rate_drives_play_and_pause() {
        let mut player = queued(&[100.0]);
        assert_eq!(player.playback_state(), PlaybackState::Stopped);
        player.set_rate(1.0);
        assert_eq!(player.playback_state(), PlaybackState::Playing);
        player.set_rate(0.0);
        assert_eq!(player.playback_state(), PlaybackState::Paused);
        player.stop();
        assert_eq!(player.playback_state(), PlaybackState::Stopped);
    }

    #[test]
    fn seeking_clamps_to_the_item() {
        let mut player = queued(&[30.0]);
        player.set_current_time(12.5);
        assert_eq!(player.current_time(), 12.5);
        player.set_current_time(-4.0);
        assert_eq!(player.current_time(), 0.0);
        player.set_current_time(99.0);
        assert_eq!(player.current_time(), 30.0);
    }

    #[test]
    fn skipping_walks_the_queue_and_posts_events() {
        let mut player = queued(&[10.0, 10.0]);
        let mut events = player.take_events().unwrap();
        assert!(player.take_events().is_none());
        // drain the set_queue notification
        while events.try_recv().is_ok() {}

        player.skip_to_next();
        assert_eq!(player.now_playing_index(), Some(1));
        assert_eq!(events.try_recv().unwrap(), PlayerEvent::NowPlayingItemChanged);

        player.skip_to_next();
        assert_eq!(player.now_playing_index(), None);
        assert_eq!(player.playback_state(), PlaybackState::Stopped);

        player.set_now_playing(Some(1));
        player.skip_to_previous();
        assert_eq!(player.now_playing_index(), Some(0));
        player.set_current_time(5.0);
        player.skip_to_previous();
        assert_eq!(player.now_playing_index(), Some(0));
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn out_of_range_now_playing_clears_the_item() {
        let mut player = queued(&[10.0]);
        player.set_now_playing(Some(3));
        assert_eq!(player.now_playing_index(), None);
        assert!(player.now_playing().is_none());
    }

    #[test]
    fn repeat_all_wraps_to_the_first_item() {
        let mut player = queued(&[10.0, 10.0]);
        player.set_shuffle(false);
        player.set_repeat(RepeatMode::All);
        assert!(!player.shuffle());
        assert_eq!(player.repeat(), RepeatMode::All);
        player.set_now_playing(Some(1));
        player.skip_to_next();
        assert_eq!(player.now_playing_index(), Some(0));
    }

    #[test]
    fn tick_advances_past_the_end_of_an_item() {
        let mut player = queued(&[0.0, 10.0]);
        player.set_rate(1.0);
        player.tick();
        assert_eq!(player.now_playing_index(), Some(1));
    }
}
