//! Listener for system player notifications

use crate::host::PlayerEventChannel;
use super::AppController;

impl AppController {
    pub fn start_player_event_listener(&self, mut events: PlayerEventChannel) {
        let model = self.model.clone();
        tracing::info!("Starting player event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let mut model_guard = model.lock().await;

                if model_guard.should_quit() {
                    tracing::debug!("Player event listener shutting down");
                    break;
                }

                tracing::debug!(?event, "Player event");
                model_guard.handle_player_event(event);
            }
        });
    }
}
