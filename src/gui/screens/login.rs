use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, text, text_input},
};

use crate::{
    core::{
        navigation::Route,
        session::{MOCK_PASSWORD, MOCK_USERNAME},
    },
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{error_alert, field},
    },
};

#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    username: String,
    password: String,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum LoginMessage {
    UsernameChanged(String),
    PasswordChanged(String),
    Submit,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    LoggedIn(Route),
}

impl Screen for LoginScreen {
    type Message = LoginMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let submit = ScreenMessage::ScreenMessage(LoginMessage::Submit);

        let mut content = column![text("Admin Login").size(32)]
            .spacing(16)
            .padding(20)
            .max_width(400.0)
            .align_x(Center);

        if let Some(error) = &self.error {
            content = content.push(error_alert(error));
        }

        content = content
            .push(field(
                "Username",
                text_input("Username", &self.username)
                    .on_input(|value| ScreenMessage::ScreenMessage(LoginMessage::UsernameChanged(value)))
                    .on_submit(submit.clone())
                    .padding(10),
                None,
            ))
            .push(field(
                "Password",
                text_input("Password", &self.password)
                    .secure(true)
                    .on_input(|value| ScreenMessage::ScreenMessage(LoginMessage::PasswordChanged(value)))
                    .on_submit(submit.clone())
                    .padding(10),
                None,
            ))
            .push(
                button(text("Login"))
                    .width(Length::Fill)
                    .padding(10)
                    .on_press(submit),
            )
            .push(text(format!("Use username: {MOCK_USERNAME}, password: {MOCK_PASSWORD}")).size(13));

        container(content).center_x(Length::Fill).into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LoginMessage::UsernameChanged(value) => {
                self.username = value;
                Task::none()
            }
            LoginMessage::PasswordChanged(value) => {
                self.password = value;
                Task::none()
            }
            LoginMessage::Submit => match state.session.login(&self.username, &self.password) {
                Ok(route) => {
                    self.error = None;
                    Task::done(ScreenMessage::ParentMessage(ParentMessage::LoggedIn(route)))
                }
                Err(e) => {
                    self.error = Some(e.to_string());
                    Task::none()
                }
            },
        }
    }
}
