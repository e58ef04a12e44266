//! `courtbook` -- interactive terminal client for the court booking
//! service.
//!
//! Browse courts, check availability in the booking grid, file and
//! cancel reservation applications, and follow application and credit
//! status from a shell prompt.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default | Description |
//! |--------------------------|----------|---------|-------------|
//! | `COURTBOOK_API_URL`      | no       | `http://localhost:5000` | Base URL of the booking service |
//! | `COURTBOOK_SESSION_FILE` | no       | `$HOME/.courtbook/session.json` | Where the login session is kept |
//! | `RUST_LOG`               | no       | `courtbook=info,courtbook_app=info` | Log filter; logs go to stderr |

use std::cell::RefCell;
use std::io::{self, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtbook_app::actions;
use courtbook_app::commands::{self, Command};
use courtbook_app::render;
use courtbook_app::{AppError, BookingState, Config, Notice, SessionStore, View};
use courtbook_client::{HttpApi, RegisterRequest};
use courtbook_core::{BookingWindow, ClickOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courtbook=info,courtbook_app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    tracing::info!(
        api_url = %config.api_url,
        session_file = %config.session_file.display(),
        "starting courtbook",
    );

    let api = HttpApi::new(config.api_url.clone());
    let store = SessionStore::new(config.session_file.clone());
    let state = RefCell::new(BookingState::new(BookingWindow::current()));

    if let Some(notice) = actions::restore_session(&api, &state, &store) {
        println!("{notice}");
    }
    println!("Court booking client. Type 'help' for commands.");

    loop {
        print!("courtbook> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let command = match commands::parse(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => command,
            Err(message) => {
                println!("{}", Notice::error(message));
                continue;
            }
        };

        match dispatch(command, &api, &state, &store).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                tracing::warn!(error = %err, "command failed");
                match err.downcast_ref::<AppError>() {
                    Some(app_err)
                        if app_err.is_unauthorized() && state.borrow().is_logged_in() =>
                    {
                        println!("{}", actions::drop_expired_session(&api, &state, &store));
                    }
                    Some(app_err) => println!("{}", Notice::error(app_err.to_string())),
                    None => println!("{}", Notice::error(format!("unexpected error: {err}"))),
                }
            }
        }
    }

    println!("Bye.");
    Ok(())
}

/// Runs one command. Returns `Ok(false)` when the loop should stop.
async fn dispatch(
    command: Command,
    api: &HttpApi,
    state: &RefCell<BookingState>,
    store: &SessionStore,
) -> anyhow::Result<bool> {
    match command {
        Command::Help => print!("{}", commands::HELP),
        Command::Quit => return Ok(false),
        Command::Courts => {
            actions::activate_view(api, state, View::Courts).await?;
            print!("{}", render::courts_list(state.borrow().courts()));
        }
        Command::Book => {
            actions::activate_view(api, state, View::Booking).await?;
            let state_ref = state.borrow();
            print!(
                "{}",
                render::date_strip(state_ref.window(), state_ref.selected_date())
            );
            print!("{}", render::grid_table(&state_ref.grid()));
            if !state_ref.selection().is_empty() {
                print!("{}", render::selection_summary(state_ref.selection()));
            }
        }
        Command::Dates => {
            let state_ref = state.borrow();
            print!(
                "{}",
                render::date_strip(state_ref.window(), state_ref.selected_date())
            );
        }
        Command::Date(date) => {
            let notice = actions::change_date(api, state, date).await?;
            println!("{notice}");
            if state.borrow().view() == View::Booking {
                print!("{}", render::grid_table(&state.borrow().grid()));
            }
        }
        Command::Court(filter) => {
            let notice = actions::change_court_filter(api, state, filter).await?;
            println!("{notice}");
            if state.borrow().view() == View::Booking {
                print!("{}", render::grid_table(&state.borrow().grid()));
            }
        }
        Command::Pick(slot_id) => {
            let notice = actions::toggle_pick(state, slot_id)?;
            println!("{notice}");
            print!("{}", render::selection_summary(state.borrow().selection()));
        }
        Command::Selection => {
            print!("{}", render::selection_summary(state.borrow().selection()));
        }
        Command::ClearSelection => println!("{}", actions::clear_selection(state)),
        Command::Apply(slot_id) => match actions::resolve_click(state, slot_id) {
            ClickOutcome::UnknownSlot => return Err(AppError::UnknownSlot { slot_id }.into()),
            ClickOutcome::NotBookable { message } => println!("{}", Notice::info(message)),
            ClickOutcome::Apply { slot_id } => {
                let prompt = actions::prepare_apply(state, slot_id)?;
                if confirm(&render::apply_prompt_text(&prompt))? {
                    let notice = actions::submit_application(api, state, slot_id).await?;
                    println!("{notice}");
                    print!("{}", render::grid_table(&state.borrow().grid()));
                } else {
                    println!("{}", Notice::info("Not submitted"));
                }
            }
        },
        Command::Cancel(application_id) => {
            let notice = actions::cancel_application(api, state, application_id).await?;
            println!("{notice}");
            print!("{}", render::applications_list(state.borrow().applications()));
        }
        Command::Status => {
            actions::activate_view(api, state, View::Status).await?;
            let state_ref = state.borrow();
            println!("Applications:");
            print!("{}", render::applications_list(state_ref.applications()));
            println!("Records:");
            print!(
                "{}",
                render::records_list(state_ref.records(), state_ref.record_stats())
            );
        }
        Command::Profile => {
            actions::activate_view(api, state, View::Profile).await?;
            let state_ref = state.borrow();
            if let Some(credit) = state_ref.credit() {
                print!("{}", render::credit_panel(credit));
            }
            println!("Recent records:");
            print!("{}", render::records_list(state_ref.records(), None));
        }
        Command::Login => {
            if state.borrow().is_logged_in() {
                println!(
                    "{}",
                    Notice::info("Already signed in; 'logout' first to switch accounts")
                );
                return Ok(true);
            }
            let student_id = prompt_line("Student id: ")?;
            if student_id.is_empty() {
                println!("{}", Notice::error("student id is required"));
                return Ok(true);
            }
            let password = rpassword::prompt_password("Password: ")?;
            let notice = actions::login(api, state, store, &student_id, &password).await?;
            println!("{notice}");
        }
        Command::Register => {
            let student_id = prompt_line("Student id: ")?;
            let name = prompt_line("Name: ")?;
            let email = prompt_line("Email: ")?;
            let phone = prompt_line("Phone (optional): ")?;
            let password = rpassword::prompt_password("Password: ")?;
            let repeat = rpassword::prompt_password("Repeat password: ")?;
            if student_id.is_empty() || name.is_empty() || email.is_empty() || password.is_empty()
            {
                println!(
                    "{}",
                    Notice::error("student id, name, email and password are required")
                );
                return Ok(true);
            }
            if password != repeat {
                println!("{}", Notice::error("passwords do not match"));
                return Ok(true);
            }
            let request = RegisterRequest {
                student_id,
                name,
                email,
                phone: (!phone.is_empty()).then_some(phone),
                password,
            };
            let notice = actions::register(api, &request).await?;
            println!("{notice}");
        }
        Command::Logout => {
            if !state.borrow().is_logged_in() {
                println!("{}", Notice::info("Not signed in"));
                return Ok(true);
            }
            let notice = actions::logout(api, state, store)?;
            println!("{notice}");
        }
        Command::Whoami => {
            let state_ref = state.borrow();
            match state_ref.student() {
                Some(student) => println!(
                    "{} ({}) <{}>",
                    student.name, student.student_id, student.email
                ),
                None => println!("{}", Notice::info("Not signed in")),
            }
        }
    }
    Ok(true)
}

fn prompt_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn confirm(label: &str) -> io::Result<bool> {
    let answer = prompt_line(label)?;
    Ok(matches!(answer.as_str(), "y" | "Y" | "yes"))
}
