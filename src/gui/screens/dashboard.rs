use std::fmt;

use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, pick_list, row, scrollable, text},
};

use crate::{
    core::{
        api::{ApiResult, HttpApi},
        navigation::Route,
        workflow::{Dashboard, PageRequest},
    },
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{error_alert, feedback_card, stars},
    },
    models::FeedbackPage,
};

const CARDS_PER_ROW: usize = 3;

#[derive(Debug, Clone)]
pub struct DashboardScreen {
    dashboard: Dashboard,
}

/// Entry of the subject filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectOption {
    All,
    Subject(String),
}

impl fmt::Display for SubjectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectOption::All => f.write_str("All Subjects"),
            SubjectOption::Subject(subject) => f.write_str(subject),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DashboardMessage {
    SubjectSelected(SubjectOption),
    PageSelected(u32),
    Retry,
    Loaded(PageRequest, ApiResult<FeedbackPage>),
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    Redirect(Route),
}

fn fetch(api: HttpApi, request: PageRequest) -> Task<ScreenMessage<DashboardScreen>> {
    Task::perform(
        async move {
            let result = request.fetch(&api).await;
            (request, result)
        },
        |(request, result)| ScreenMessage::ScreenMessage(DashboardMessage::Loaded(request, result)),
    )
}

impl DashboardScreen {
    pub fn new(state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let mut dashboard = Dashboard::new();
        let task = match dashboard.enter(&state.session) {
            Some(request) => fetch(state.api.clone(), request),
            None => Task::done(ScreenMessage::ParentMessage(ParentMessage::Redirect(
                Route::Login,
            ))),
        };
        (Self { dashboard }, task)
    }

    fn subject_filter(&self) -> Element<'_, ScreenMessage<Self>> {
        let options: Vec<SubjectOption> = std::iter::once(SubjectOption::All)
            .chain(
                self.dashboard
                    .subjects()
                    .iter()
                    .cloned()
                    .map(SubjectOption::Subject),
            )
            .collect();
        let selected = match self.dashboard.selected_subject() {
            Some(subject) => SubjectOption::Subject(subject.to_string()),
            None => SubjectOption::All,
        };
        column![
            text("Filter by Subject").size(14),
            pick_list(options, Some(selected), |option| {
                ScreenMessage::ScreenMessage(DashboardMessage::SubjectSelected(option))
            })
            .width(300.0)
            .padding(10),
        ]
        .spacing(4)
        .into()
    }

    fn pagination(&self) -> Element<'_, ScreenMessage<Self>> {
        if self.dashboard.is_loading() {
            return text("Loading...").into();
        }
        let current = self.dashboard.current_page();
        let go = |page: u32| ScreenMessage::ScreenMessage(DashboardMessage::PageSelected(page));

        let mut controls = row![
            button(text("‹"))
                .style(button::text)
                .on_press_maybe(self.dashboard.has_previous().then(|| go(current - 1)))
        ]
        .spacing(6)
        .align_y(Center);
        for page in 1..=self.dashboard.total_pages() {
            let style = if page == current {
                button::primary
            } else {
                button::text
            };
            controls = controls.push(button(text(page.to_string())).style(style).on_press(go(page)));
        }
        controls
            .push(
                button(text("›"))
                    .style(button::text)
                    .on_press_maybe(self.dashboard.has_next().then(|| go(current + 1))),
            )
            .into()
    }
}

impl Screen for DashboardScreen {
    type Message = DashboardMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut content = column![
            text("Feedback Dashboard").size(32),
            text("Review and analyze student feedback"),
            self.subject_filter(),
        ]
        .spacing(20)
        .padding(20)
        .align_x(Center);

        if let Some(subject) = self.dashboard.selected_subject() {
            let average = self.dashboard.average_rating();
            content = content.push(
                container(
                    text(format!(
                        "Average Rating for {subject}: {} ({average:.1})",
                        stars(average)
                    ))
                    .size(22),
                )
                .padding(16)
                .style(container::rounded_box),
            );
        }

        if let Some(error) = self.dashboard.error() {
            content = content.push(
                column![
                    error_alert(error),
                    button(text("Retry"))
                        .on_press(ScreenMessage::ScreenMessage(DashboardMessage::Retry)),
                ]
                .spacing(8)
                .align_x(Center),
            );
        }

        let feedbacks = self.dashboard.feedbacks();
        if feedbacks.is_empty() && !self.dashboard.is_loading() {
            content = content.push(text("No feedback yet."));
        }
        for chunk in feedbacks.chunks(CARDS_PER_ROW) {
            content = content.push(row(chunk.iter().map(feedback_card)).spacing(16));
        }

        content = content.push(self.pagination());

        scrollable(container(content).center_x(Length::Fill)).into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        let request = match message {
            DashboardMessage::SubjectSelected(option) => match option {
                SubjectOption::All => self.dashboard.select_subject(""),
                SubjectOption::Subject(subject) => self.dashboard.select_subject(&subject),
            },
            DashboardMessage::PageSelected(page) => self.dashboard.change_page(page),
            DashboardMessage::Retry => self.dashboard.reload(),
            DashboardMessage::Loaded(request, result) => {
                self.dashboard.apply(&request, result);
                None
            }
        };
        match request {
            Some(request) => fetch(state.api.clone(), request),
            None => Task::none(),
        }
    }
}
