mod app;
mod message;
mod screens;
mod state;
mod widgets;

pub use app::FeedbackApp;
pub use message::Message;
pub use state::AppState;

use crate::config::ClientConfig;

/// Opens the desktop client and blocks until its window closes.
pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let state = AppState::new(&config)?;
    iced::application(
        move || FeedbackApp::new(state.clone()),
        FeedbackApp::update,
        FeedbackApp::view,
    )
    .title(FeedbackApp::title)
    .run()
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
