use crate::app::App;
use chrono::Local;
use std::sync::mpsc::TryRecvError;

/// Per-frame housekeeping that is independent of input events.
pub fn tick(app: &mut App) {
    poll_repo_stats(app);

    if let Some(expiry) = app.toast_expiry
        && Local::now() >= expiry
    {
        app.toast_expiry = None;
        app.toast_message = None;
    }
}

fn poll_repo_stats(app: &mut App) {
    let result = {
        let Some(receiver) = app.repo_stats_receiver.as_ref() else {
            return;
        };
        receiver.try_recv()
    };

    match result {
        Ok(Some(stats)) => {
            app.repo_stats_receiver = None;
            app.repo_stats = Some(stats);
        }
        // The fetch failed; the status bar just keeps the plain slug.
        Ok(None) | Err(TryRecvError::Disconnected) => {
            app.repo_stats_receiver = None;
        }
        Err(TryRecvError::Empty) => {}
    }
}
