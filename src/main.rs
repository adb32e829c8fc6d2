use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use coursefeedback::{
    ClientConfig, FileStore, HttpApi, Session, SessionStore,
    core::{
        navigation::visit,
        workflow::{Dashboard, FormEdit, SubmissionState, SubmitStatus, load_course_options},
    },
};

#[derive(Parser)]
#[command(name = "coursefeedback")]
#[command(about = "Submit and review student course feedback")]
struct Cli {
    /// Base URL of the feedback backend
    #[arg(long, global = true, env = "COURSEFEEDBACK_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "COURSEFEEDBACK_TIMEOUT_SECS", value_name = "SECS")]
    timeout: Option<u64>,

    /// File holding the admin session flag
    #[arg(long, global = true, env = "COURSEFEEDBACK_SESSION_FILE", value_name = "FILE")]
    session_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the desktop client (default)
    Gui,
    /// List the courses feedback can be given for
    Courses,
    /// Submit feedback for a course
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        subject: String,
        /// Whole number from 1 to 5
        #[arg(long, default_value_t = 3.0)]
        rating: f64,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Log in as administrator
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the administrator session
    Logout,
    /// Show whether an administrator session is active
    Status,
    /// List submitted feedback (administrators only)
    List {
        /// Only show feedback for this subject
        #[arg(long)]
        subject: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose {
        "coursefeedback=debug"
    } else {
        "coursefeedback=info"
    };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::load(args.api_url, args.timeout, args.session_file)?;
    let session = Session::new(FileStore::new(config.session_file()));

    match args.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(config),
        command => {
            let api = HttpApi::new(&config)?;
            tokio::runtime::Runtime::new()?.block_on(run_command(command, &api, &session))
        }
    }
}

#[cfg(feature = "gui")]
fn run_gui(config: ClientConfig) -> anyhow::Result<()> {
    coursefeedback::gui::run(config)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_config: ClientConfig) -> anyhow::Result<()> {
    bail!("Built without the `gui` feature; use one of the subcommands instead")
}

async fn run_command<S: SessionStore>(
    command: Command,
    api: &HttpApi,
    session: &Session<S>,
) -> anyhow::Result<()> {
    match command {
        Command::Gui => bail!("The GUI runs outside the async runtime"),
        Command::Login { username, password } => {
            let route = session.login(&username, &password)?;
            println!("Logged in as {username}. Dashboard: {route}");
        }
        Command::Logout => {
            let route = session.logout();
            println!("Logged out. Next: {route}");
        }
        Command::Status => {
            if session.is_authenticated() {
                println!("Administrator session active");
            } else {
                println!("Not logged in");
            }
        }
        Command::Courses => {
            let courses = load_course_options(api).await;
            if courses.is_empty() {
                println!("No courses available.");
            }
            for course in courses {
                println!("  {:<10} {}", course.code, course.name);
            }
        }
        Command::Submit {
            name,
            subject,
            rating,
            comments,
        } => {
            let mut form = SubmissionState::new();
            form.set_courses(load_course_options(api).await);
            form.edit(FormEdit::StudentName(name));
            form.edit(FormEdit::Subject(subject));
            form.edit(FormEdit::Rating(Some(rating)));
            form.edit(FormEdit::Comments(comments));

            let status = form.submit(api).await.clone();
            match status {
                SubmitStatus::Succeeded => println!("Feedback submitted successfully!"),
                SubmitStatus::Failed(message) => bail!("{message}"),
                SubmitStatus::Idle | SubmitStatus::Submitting => {
                    for (field, message) in form.errors().iter() {
                        eprintln!("  {field}: {message}");
                    }
                    bail!("Feedback not submitted");
                }
            }
        }
        Command::List { subject, page } => {
            let shown = visit("/feedbacks", session);
            let mut dashboard = Dashboard::new();
            let Some(initial) = dashboard.enter(session) else {
                bail!("Administrator login required (redirected to {})", shown.route);
            };
            dashboard.load(api, initial).await;
            if let Some(subject) = subject {
                if let Some(request) = dashboard.select_subject(&subject) {
                    dashboard.load(api, request).await;
                }
            }
            if page != 1 {
                match dashboard.change_page(page) {
                    Some(request) => {
                        dashboard.load(api, request).await;
                    }
                    None => bail!(
                        "Page {page} is out of range (1-{})",
                        dashboard.total_pages()
                    ),
                }
            }
            print_dashboard(&dashboard)?;
        }
    }
    Ok(())
}

fn print_dashboard(dashboard: &Dashboard) -> anyhow::Result<()> {
    if let Some(error) = dashboard.error() {
        bail!("{error}");
    }
    match dashboard.selected_subject() {
        Some(subject) => {
            println!(
                "Page {} of {} for {subject}",
                dashboard.current_page(),
                dashboard.total_pages()
            );
            println!(
                "Average rating for {subject}: {:.1}",
                dashboard.average_rating()
            );
        }
        None => println!(
            "Page {} of {}",
            dashboard.current_page(),
            dashboard.total_pages()
        ),
    }
    if dashboard.feedbacks().is_empty() {
        println!("No feedback yet.");
    }
    for feedback in dashboard.feedbacks() {
        println!(
            "- {} | {} | {}/5 | {}",
            feedback.student_name,
            feedback.subject,
            feedback.rating,
            feedback.submitted_on()
        );
        if let Some(comments) = feedback.visible_comments() {
            println!("    \"{comments}\"");
        }
    }
    if !dashboard.subjects().is_empty() {
        println!("Subjects: {}", dashboard.subjects().join(", "));
    }
    Ok(())
}
