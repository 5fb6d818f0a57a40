//! Transport commands and the transcribe poll

use super::AppController;

impl AppController {
    /// Resuming re-seeks to the time on screen; the host may otherwise pick
    /// up from a slightly different spot.
    pub async fn toggle_playback(&self) {
        let mut model = self.model.lock().await;
        let is_playing = model.is_playing();
        tracing::debug!(is_playing, "Toggling playback");

        if is_playing {
            model.pause();
        } else {
            let shown = model.elapsed_of_selected();
            model.play();
            model.seek_to(shown);
        }
        tracing::info!(action = if is_playing { "paused" } else { "resumed" }, "Playback toggled");
    }

    pub async fn next_track(&self) {
        tracing::debug!("Skipping to next track");
        self.model.lock().await.next_pressed();
    }

    pub async fn previous_track(&self) {
        tracing::debug!("Previous pressed");
        self.model.lock().await.previous_pressed();
    }

    pub async fn rewind_track(&self) {
        self.model.lock().await.rewind();
    }

    /// Steps back by the configured backup seconds.
    pub async fn back_up(&self) {
        let mut model = self.model.lock().await;
        let seconds = f64::from(model.settings().backup_seconds);
        model.skip_back(seconds);
        tracing::debug!(seconds, elapsed = model.elapsed_of_selected(), "Backed up");
    }

    pub async fn skip_ahead(&self) {
        let mut model = self.model.lock().await;
        let seconds = f64::from(model.settings().backup_seconds);
        model.skip_forward(seconds);
    }

    pub async fn change_speed(&self, up: bool) {
        let mut model = self.model.lock().await;
        model.step_speed(up);
        tracing::debug!(speed = model.settings().speed, "Speed changed");
    }

    pub async fn change_backup(&self, up: bool) {
        self.model.lock().await.step_backup(up);
    }

    /// Starts refreshing the transcribe screen, replacing any running poll.
    pub(crate) async fn start_transcribe_poll(&self) {
        let mut slot = self.poll_task.lock().await;
        if let Some(handle) = slot.take() {
            handle.abort();
        }

        let model = self.model.clone();
        let interval = self.config.poll_interval;
        let rewind = self.config.resume_rewind;
        tracing::debug!(interval_ms = interval.as_millis() as u64, "Starting transcribe poll");

        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let mut model_guard = model.lock().await;
                if model_guard.should_quit() {
                    break;
                }
                model_guard.poll(rewind);
            }
        }));
    }

    pub(crate) async fn stop_transcribe_poll(&self) {
        if let Some(handle) = self.poll_task.lock().await.take() {
            tracing::debug!("Stopping transcribe poll");
            handle.abort();
        }
    }

    pub(crate) async fn transcribe_poll_running(&self) -> bool {
        self.poll_task.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::controller;
    use crate::model::SortMode;

    async fn controller_with_album() -> super::AppController {
        let controller = controller();
        {
            let mut model = controller.model.lock().await;
            model.load_library();
            model.retrieve_albums(None, SortMode::ByNameAscending);
            model.open_album(1, None);
        }
        controller
    }

    #[tokio::test]
    async fn toggle_plays_then_pauses() {
        let controller = controller_with_album().await;
        controller.toggle_playback().await;
        assert!(controller.model.lock().await.is_playing());
        controller.toggle_playback().await;
        assert!(!controller.model.lock().await.is_playing());
    }

    #[tokio::test]
    async fn back_up_uses_the_backup_setting() {
        let controller = controller_with_album().await;
        controller.model.lock().await.seek_to(30.0);
        controller.change_backup(true).await;
        controller.back_up().await;
        let elapsed = controller.model.lock().await.elapsed_of_selected();
        assert_eq!(elapsed, 24.0);

        controller.skip_ahead().await;
        let elapsed = controller.model.lock().await.elapsed_of_selected();
        assert_eq!(elapsed, 30.0);
    }

    #[tokio::test]
    async fn poll_saves_elapsed_until_stopped() {
        let controller = controller_with_album().await;
        {
            let mut model = controller.model.lock().await;
            model.seek_to(40.0);
            model.play();
        }

        controller.start_transcribe_poll().await;
        assert!(controller.transcribe_poll_running().await);
        // the first tick fires right away
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let saved = controller.model.lock().await.saved_elapsed();
        assert!((saved - 35.0).abs() < 0.5, "saved {saved}");

        controller.stop_transcribe_poll().await;
        assert!(!controller.transcribe_poll_running().await);
    }
}
