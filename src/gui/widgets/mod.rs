use iced::{
    Element, Length,
    widget::{button, column, container, row, text},
};

use crate::{
    core::navigation::{NavAction, Route, nav_items},
    gui::Message,
    models::{Feedback, MAX_RATING, MIN_RATING},
};

/// Five-star rendering of a rating, rounded to the nearest star.
pub fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, f64::from(MAX_RATING)) as usize;
    let empty = usize::from(MAX_RATING) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

pub fn nav_bar<'a>(authenticated: bool, current: Route) -> Element<'a, Message> {
    let items = nav_items(authenticated, current).into_iter().map(|item| {
        let message = match item.action {
            NavAction::Go(route) => Message::Navigate(route),
            NavAction::Logout => Message::Logout,
        };
        let style = if item.active {
            button::primary
        } else {
            button::text
        };
        let item: Element<'a, Message> = button(text(item.label)).style(style).on_press(message).into();
        item
    });

    container(
        row![
            container(text("Feedback System").size(24)).width(Length::Fill),
            row(items).spacing(10),
        ]
        .align_y(iced::Alignment::Center),
    )
    .padding(12)
    .style(container::bordered_box)
    .width(Length::Fill)
    .into()
}

pub fn layout<'a>(
    nav: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let nav: Element<'a, Message> = nav.into();
    column![
        nav,
        container(content)
            .padding(24)
            .center_x(Length::Fill)
            .height(Length::Fill),
    ]
    .into()
}

pub fn success_alert<'a, M: 'a>(message: impl ToString) -> Element<'a, M> {
    container(text(message.to_string()).style(text::success))
        .padding(10)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

pub fn error_alert<'a, M: 'a>(message: impl ToString) -> Element<'a, M> {
    container(text(message.to_string()).style(text::danger))
        .padding(10)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

/// Label, input and the field's inline validation message, stacked.
pub fn field<'a, M: 'a>(
    label: &'a str,
    input: impl Into<Element<'a, M>>,
    error: Option<&'a str>,
) -> Element<'a, M> {
    let input: Element<'a, M> = input.into();
    let mut content = column![text(label).size(14), input].spacing(4);
    if let Some(error) = error {
        content = content.push(text(error).size(13).style(text::danger));
    }
    content.into()
}

/// Clickable stars. Clicking the current rating clears it.
pub fn rating_picker<'a, M: Clone + 'a>(
    current: Option<u8>,
    on_pick: impl Fn(Option<u8>) -> M + 'a,
) -> Element<'a, M> {
    let buttons = (MIN_RATING..=MAX_RATING).map(|value| {
        let filled = current.is_some_and(|c| value <= c);
        let next = if current == Some(value) {
            None
        } else {
            Some(value)
        };
        let star: Element<'a, M> = button(text(if filled { "★" } else { "☆" }).size(32))
            .style(button::text)
            .on_press(on_pick(next))
            .into();
        star
    });
    row(buttons).spacing(4).into()
}

pub fn feedback_card<'a, M: 'a>(feedback: &'a Feedback) -> Element<'a, M> {
    let mut content = column![
        text(feedback.student_name.as_str()).size(20).style(text::primary),
        text(format!("Subject: {}", feedback.subject)),
        text(stars(f64::from(feedback.rating))).size(20),
    ]
    .spacing(8);
    if let Some(comments) = feedback.visible_comments() {
        content = content.push(text(format!("\"{comments}\"")));
    }
    content = content.push(text(format!("Submitted: {}", feedback.submitted_on())).size(12));

    container(content)
        .padding(16)
        .width(Length::FillPortion(1))
        .style(container::bordered_box)
        .into()
}
