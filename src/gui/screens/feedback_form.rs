use std::convert::Infallible;

use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, pick_list, text, text_input},
};

use crate::{
    core::{
        api::{ApiResult, FeedbackApi},
        workflow::{Field, FormEdit, SubmissionState, SubmitStatus, load_course_options},
    },
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{error_alert, field, rating_picker, success_alert},
    },
    models::{Course, Feedback},
};

#[derive(Debug, Clone)]
pub struct FeedbackFormScreen {
    submission: SubmissionState,
}

#[derive(Debug, Clone)]
pub enum FeedbackFormMessage {
    CoursesLoaded(Vec<Course>),
    Edit(FormEdit),
    Submit,
    Submitted(ApiResult<Feedback>),
}

fn edit(edit: FormEdit) -> ScreenMessage<FeedbackFormScreen> {
    ScreenMessage::ScreenMessage(FeedbackFormMessage::Edit(edit))
}

impl FeedbackFormScreen {
    pub fn new(state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let api = state.api.clone();
        (
            Self {
                submission: SubmissionState::new(),
            },
            Task::perform(async move { load_course_options(&api).await }, |courses| {
                ScreenMessage::ScreenMessage(FeedbackFormMessage::CoursesLoaded(courses))
            }),
        )
    }
}

impl Screen for FeedbackFormScreen {
    type Message = FeedbackFormMessage;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let form = self.submission.form();
        let errors = self.submission.errors();

        let mut content = column![
            text("Submit Feedback").size(32),
            text("Share your thoughts about the course"),
        ]
        .spacing(16)
        .padding(20)
        .max_width(600.0)
        .align_x(Center);

        match self.submission.status() {
            SubmitStatus::Succeeded => {
                content = content.push(success_alert("Feedback submitted successfully!"))
            }
            SubmitStatus::Failed(message) => content = content.push(error_alert(message)),
            SubmitStatus::Idle | SubmitStatus::Submitting => {}
        }

        let selected = (!form.subject.is_empty()).then(|| form.subject.clone());
        let rating = form.rating.map(|r| r.clamp(0.0, 5.0) as u8);

        content = content
            .push(field(
                "Student Name",
                text_input("Student Name", &form.student_name)
                    .on_input(|value| edit(FormEdit::StudentName(value)))
                    .padding(10),
                errors.get(Field::StudentName),
            ))
            .push(field(
                "Subject",
                pick_list(self.submission.course_names(), selected, |value| {
                    edit(FormEdit::Subject(value))
                })
                .placeholder("Select a subject")
                .width(Length::Fill)
                .padding(10),
                errors.get(Field::Subject),
            ))
            .push(field(
                "Rate your experience",
                rating_picker(rating, |value| {
                    edit(FormEdit::Rating(value.map(f64::from)))
                }),
                errors.get(Field::Rating),
            ))
            .push(field(
                "Comments",
                text_input("Comments", &form.comments)
                    .on_input(|value| edit(FormEdit::Comments(value)))
                    .padding(10),
                errors.get(Field::Comments),
            ))
            .push(
                button(text("Submit Feedback").size(18))
                    .padding(12)
                    .on_press_maybe((!self.submission.is_submitting()).then_some(
                        ScreenMessage::ScreenMessage(FeedbackFormMessage::Submit),
                    )),
            );

        container(content).center_x(Length::Fill).into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            FeedbackFormMessage::CoursesLoaded(courses) => {
                self.submission.set_courses(courses);
                Task::none()
            }
            FeedbackFormMessage::Edit(change) => {
                self.submission.edit(change);
                Task::none()
            }
            FeedbackFormMessage::Submit => match self.submission.begin_submit() {
                Some(feedback) => {
                    let api = state.api.clone();
                    Task::perform(
                        async move { api.submit_feedback(&feedback).await },
                        |result| ScreenMessage::ScreenMessage(FeedbackFormMessage::Submitted(result)),
                    )
                }
                None => Task::none(),
            },
            FeedbackFormMessage::Submitted(result) => {
                self.submission.finish_submit(result);
                Task::none()
            }
        }
    }
}
