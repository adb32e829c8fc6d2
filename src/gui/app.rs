use iced::{Element, Task};
use tracing::debug;

use super::{
    AppState, Message,
    screens::ScreenData,
    widgets::{layout, nav_bar},
};
use crate::core::navigation::{Route, visit};

pub struct FeedbackApp {
    state: AppState,
    screen: ScreenData,
    route: Route,
    authenticated: bool,
}

impl FeedbackApp {
    pub fn new(state: AppState) -> (Self, Task<Message>) {
        let (screen, task) = ScreenData::open(Route::SubmitFeedback, &state);
        let authenticated = state.session.is_authenticated();
        (
            Self {
                state,
                screen,
                route: Route::SubmitFeedback,
                authenticated,
            },
            task,
        )
    }

    pub fn title(&self) -> String {
        format!("Feedback System - {}", self.route.title())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => self.navigate(route.path()),
            Message::Logout => {
                let next = self.state.session.logout();
                self.navigate(next.path())
            }
            message => self.screen.update(message, &mut self.state),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        layout(nav_bar(self.authenticated, self.route), self.screen.view())
    }

    /// Mounts a fresh screen for `path`, following any redirect.
    fn navigate(&mut self, path: &str) -> Task<Message> {
        let visit = visit(path, &self.state.session);
        if let Some(from) = &visit.redirected_from {
            debug!("Redirecting {from} to {}", visit.route);
        }
        let (screen, task) = ScreenData::open(visit.route, &self.state);
        self.screen = screen;
        self.route = visit.route;
        self.authenticated = self.state.session.is_authenticated();
        task
    }
}
