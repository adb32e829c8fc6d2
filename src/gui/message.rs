use crate::{
    core::navigation::Route,
    gui::screens::{
        ScreenMessage, dashboard::DashboardScreen, feedback_form::FeedbackFormScreen,
        login::LoginScreen,
    },
};

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    Logout,
    FeedbackForm(ScreenMessage<FeedbackFormScreen>),
    Login(ScreenMessage<LoginScreen>),
    Dashboard(ScreenMessage<DashboardScreen>),
}
