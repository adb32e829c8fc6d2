pub mod dashboard;
pub mod feedback_form;
pub mod login;

use iced::{Element, Task};

use crate::{
    core::navigation::Route,
    gui::{AppState, Message},
};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug;
    type ParentMessage: std::fmt::Debug;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

/// The screen mounted for the current route.
#[derive(Debug, Clone)]
pub enum ScreenData {
    FeedbackForm(feedback_form::FeedbackFormScreen),
    Login(login::LoginScreen),
    Dashboard(dashboard::DashboardScreen),
}

impl ScreenData {
    /// Mounts the screen for `route` along with whatever it loads on entry.
    pub fn open(route: Route, state: &AppState) -> (Self, Task<Message>) {
        match route {
            Route::SubmitFeedback => {
                let (screen, task) = feedback_form::FeedbackFormScreen::new(state);
                (ScreenData::FeedbackForm(screen), task.map(Message::FeedbackForm))
            }
            Route::Login => (ScreenData::Login(login::LoginScreen::default()), Task::none()),
            Route::Feedbacks => {
                let (screen, task) = dashboard::DashboardScreen::new(state);
                (ScreenData::Dashboard(screen), task.map(Message::Dashboard))
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self {
            ScreenData::FeedbackForm(screen) => screen.view().map(Message::FeedbackForm),
            ScreenData::Login(screen) => screen.view().map(Message::Login),
            ScreenData::Dashboard(screen) => screen.view().map(Message::Dashboard),
        }
    }

    pub fn update(&mut self, message: Message, state: &mut AppState) -> Task<Message> {
        match (self, message) {
            (ScreenData::FeedbackForm(page), Message::FeedbackForm(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => {
                    page.update(msg, state).map(Message::FeedbackForm)
                }
                ScreenMessage::ParentMessage(never) => match never {},
            },
            (ScreenData::Login(page), Message::Login(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page.update(msg, state).map(Message::Login),
                ScreenMessage::ParentMessage(login::ParentMessage::LoggedIn(route)) => {
                    Task::done(Message::Navigate(route))
                }
            },
            (ScreenData::Dashboard(page), Message::Dashboard(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => {
                    page.update(msg, state).map(Message::Dashboard)
                }
                ScreenMessage::ParentMessage(dashboard::ParentMessage::Redirect(route)) => {
                    Task::done(Message::Navigate(route))
                }
            },
            // left over from a screen that is no longer mounted
            _ => Task::none(),
        }
    }
}
