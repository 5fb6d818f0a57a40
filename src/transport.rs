//! Playback facade over the host system player
//!
//! Play and pause are expressed purely through the playback rate. Setting a
//! positive rate already starts the host player; issuing a separate play on
//! top of it makes the host stutter, so the two are never combined.

use crate::host::{PlayerEventChannel, RepeatMode, SystemPlayer};
use crate::model::{PlaybackState, Track};

pub struct Transport {
    player: Box<dyn SystemPlayer>,
    state: PlaybackState,
    /// Last rate set by the user; the host's own report lags behind.
    rate: f32,
}

impl Transport {
    pub fn new(player: Box<dyn SystemPlayer>) -> Self {
        Self {
            player,
            state: PlaybackState::Stopped,
            rate: 1.0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[cfg(test)]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn take_events(&mut self) -> Option<PlayerEventChannel> {
        self.player.take_events()
    }

    /// Re-reads the authoritative state after a host notification.
    pub fn refresh_state(&mut self) {
        self.state = self.player.playback_state();
    }

    /// Records a stop the host did on its own, without telling the host.
    pub fn mark_stopped(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    pub fn reset_modes(&mut self) {
        self.player.set_shuffle(false);
        self.player.set_repeat(RepeatMode::Off);
    }

    pub fn set_queue(&mut self, items: Vec<Track>) {
        self.player.set_queue(items);
        self.player.prepare_to_play();
    }

    pub fn point_at(&mut self, index: Option<usize>) {
        self.player.set_now_playing(index);
    }

    pub fn now_playing_index(&self) -> Option<usize> {
        self.player.now_playing_index()
    }

    pub fn now_playing(&self) -> Option<Track> {
        self.player.now_playing()
    }

    pub fn is_playing(&self) -> bool {
        self.player.playback_state() == PlaybackState::Playing
    }

    pub fn host_state(&self) -> PlaybackState {
        self.player.playback_state()
    }

    pub fn elapsed(&self) -> f64 {
        self.player.current_time()
    }

    pub fn tick(&mut self) {
        self.player.tick();
    }

    pub fn play(&mut self) {
        self.player.set_rate(self.rate);
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.player.set_rate(0.0);
        self.state = PlaybackState::Paused;
    }

    pub fn stop(&mut self) {
        self.player.stop();
        self.state = PlaybackState::Stopped;
    }

    /// Applies when `0 <= t < duration`. Returns whether it applied.
    pub fn seek_to(&mut self, t: f64, duration: f64) -> bool {
        if t >= 0.0 && t < duration {
            self.player.set_current_time(t);
            true
        } else {
            false
        }
    }

    /// Applies only while the target stays inside the track.
    pub fn skip_forward(&mut self, dt: f64, duration: f64) -> bool {
        let now = self.player.current_time();
        if now + dt < duration {
            self.player.set_current_time(now + dt);
            true
        } else {
            false
        }
    }

    pub fn skip_backward(&mut self, dt: f64) {
        let now = self.player.current_time();
        self.player.set_current_time((now - dt).max(0.0));
    }

    pub fn rewind(&mut self) {
        self.player.skip_to_beginning();
    }

    pub fn skip_to_next(&mut self) {
        self.player.skip_to_next();
    }

    pub fn skip_to_previous(&mut self) {
        self.player.skip_to_previous();
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.player.set_rate(rate);
        self.rate = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ClockPlayer;
    use crate::model::track;

    fn transport_with(duration: f64) -> Transport {
        let mut transport = Transport::new(Box::new(ClockPlayer::new()));
        transport.set_queue(vec![track(1, "t", "a", 1, duration)]);
        transport
    }

    #[test]
    fn play_restores_the_cached_rate() {
        let mut transport = transport_with(100.0);
        transport.set_rate(0.6);
        transport.pause();
        assert_eq!(transport.state(), PlaybackState::Paused);
        assert!(!transport.is_playing());
        transport.play();
        assert_eq!(transport.state(), PlaybackState::Playing);
        assert!(transport.is_playing());
        assert!((transport.rate() - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn seek_honours_track_bounds() {
        let mut transport = transport_with(10.0);
        assert!(!transport.seek_to(-0.1, 10.0));
        assert!(!transport.seek_to(10.0, 10.0));
        assert_eq!(transport.elapsed(), 0.0);
        assert!(transport.seek_to(10.0 - 1e-3, 10.0));
        assert!((transport.elapsed() - (10.0 - 1e-3)).abs() < 1e-9);
    }

    #[test]
    fn skips_clamp_or_refuse() {
        let mut transport = transport_with(20.0);
        transport.seek_to(3.0, 20.0);
        transport.skip_backward(5.0);
        assert_eq!(transport.elapsed(), 0.0);

        transport.seek_to(12.0, 20.0);
        assert!(!transport.skip_forward(8.0, 20.0));
        assert_eq!(transport.elapsed(), 12.0);
        assert!(transport.skip_forward(5.0, 20.0));
        assert_eq!(transport.elapsed(), 17.0);
    }

    #[test]
    fn stop_resets_state() {
        let mut transport = transport_with(20.0);
        transport.play();
        transport.stop();
        assert_eq!(transport.state(), PlaybackState::Stopped);
        transport.refresh_state();
        assert_eq!(transport.state(), PlaybackState::Stopped);
    }
}
