mod dashboard;
mod sequence;
mod submission;

pub use dashboard::{
    Applied, Dashboard, FetchReason, PageRequest, Phase, distinct_subjects, page_average,
};
pub use sequence::{Sequencer, Ticket};
pub use submission::{
    Field, FieldErrors, FeedbackForm, FormEdit, SubmissionState, SubmitStatus,
    load_course_options, validate_rating,
};
