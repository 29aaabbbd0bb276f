use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classtrack::client::TrackerClient;
use classtrack::filter::{to_wire_date, FilterMode, FilterParams, FilterQuery};
use classtrack::homework::{ToggleController, ToggleOutcome};
use classtrack::individual::{
    aggregate, validate_total_working_days, Classification, StudentDateFilter, SubjectScope,
};
use classtrack::models::{AttendanceStatus, HomeworkInput};
use classtrack::reconcile::reconcile;
use classtrack::report::{render, render_table};
use classtrack::view::ViewRegion;

#[derive(Parser)]
#[command(name = "classtrack")]
#[command(about = "Attendance and homework tracking for a classroom backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List subjects
    Subjects,
    /// List the student roster
    Roster,
    /// Show or record a day's attendance for one subject
    Mark {
        /// Subject id
        #[arg(short, long)]
        subject: i64,

        /// Date (year-month-day)
        #[arg(short, long)]
        date: NaiveDate,

        /// Set a student's status as STUDENT_ID=STATUS
        /// (present, informed, uninformed); repeatable
        #[arg(long = "set", value_parser = parse_mark)]
        set: Vec<MarkArg>,
    },
    /// Show a filtered attendance report
    Report {
        /// Subject id
        #[arg(short, long)]
        subject: i64,

        /// Filter granularity
        #[arg(short, long, value_enum)]
        mode: ModeArg,

        /// Date for day mode (year-month-day)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Year for month/year modes
        #[arg(long)]
        year: Option<i32>,

        /// Month (1-12) for month mode; omit for all months
        #[arg(long)]
        month: Option<u32>,
    },
    /// Individual attendance report by name or roll number
    Student {
        /// Name or roll number fragment to search for
        query: String,

        /// Restrict to one subject id; omit for all subjects
        #[arg(short, long)]
        subject: Option<i64>,

        /// Total working days for the percentage
        #[arg(short, long)]
        total_days: u32,

        /// Restrict matched rows to one year
        #[arg(long)]
        year: Option<i32>,

        /// Restrict matched rows to one month (1-12)
        #[arg(long)]
        month: Option<u32>,

        /// Restrict matched rows to one date (year-month-day)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Manage homework assignments
    Homework {
        #[command(subcommand)]
        command: HomeworkCommands,
    },
}

#[derive(Subcommand)]
enum HomeworkCommands {
    /// List assignments with completion status
    List,
    /// Post a new assignment
    Add {
        #[arg(short, long)]
        subject: i64,

        #[arg(short, long)]
        description: String,

        /// Due date (year-month-day)
        #[arg(long)]
        due: NaiveDate,
    },
    /// Update an existing assignment
    Update {
        id: i64,

        #[arg(short, long)]
        subject: i64,

        #[arg(short, long)]
        description: String,

        /// Due date (year-month-day)
        #[arg(long)]
        due: NaiveDate,
    },
    /// Delete an assignment
    Delete { id: i64 },
    /// Toggle an assignment between Pending and Completed
    Toggle { id: i64 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Day,
    Month,
    Year,
}

impl From<ModeArg> for FilterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Day => FilterMode::Day,
            ModeArg::Month => FilterMode::Month,
            ModeArg::Year => FilterMode::Year,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct MarkArg {
    student_id: i64,
    status: AttendanceStatus,
}

fn parse_mark(s: &str) -> Result<MarkArg, String> {
    let (id, status) = s
        .split_once('=')
        .ok_or_else(|| format!("expected STUDENT_ID=STATUS, got '{}'", s))?;
    let student_id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid student id '{}'", id))?;
    let status = match status.trim().to_ascii_lowercase().as_str() {
        "present" | "p" => AttendanceStatus::Present,
        "informed" | "absent-informed" | "ai" => AttendanceStatus::AbsentInformed,
        "uninformed" | "absent-uninformed" | "au" => AttendanceStatus::AbsentUninformed,
        other => return Err(format!("unknown status '{}'", other)),
    };
    Ok(MarkArg { student_id, status })
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "classtrack=info".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let client = TrackerClient::from_env();

    match cli.command {
        Commands::Subjects => {
            let subjects = client.subjects().await?;
            let rows: Vec<Vec<String>> = subjects
                .iter()
                .map(|s| vec![s.id.to_string(), s.name.clone()])
                .collect();
            print!("{}", render_table(&["Id", "Name"], &rows));
        }
        Commands::Roster => {
            let students = client.students().await?;
            let rows: Vec<Vec<String>> = students
                .iter()
                .map(|s| vec![s.id.to_string(), s.roll_no.clone(), s.name.clone()])
                .collect();
            print!("{}", render_table(&["Id", "Roll No", "Name"], &rows));
        }
        Commands::Mark { subject, date, set } => {
            mark_attendance(&client, subject, date, &set).await?;
        }
        Commands::Report {
            subject,
            mode,
            date,
            year,
            month,
        } => {
            let query = FilterQuery::build(
                mode.into(),
                subject,
                FilterParams { date, year, month },
            )?;

            // The report area shows the most recently initiated query only.
            let mut region = ViewRegion::new();
            let token = region.begin();
            tracing::info!(subject_id = subject, mode = ?query.mode, "running report");
            let rows = client.attendance_report(&query).await?;
            region.complete(token, render(&query, rows));
            if let Some(report) = region.current() {
                print!("{}", report.to_text());
            }
        }
        Commands::Student {
            query,
            subject,
            total_days,
            year,
            month,
            date,
        } => {
            student_report(&client, &query, subject, total_days, year, month, date).await?;
        }
        Commands::Homework { command } => homework(&client, command).await?,
    }

    Ok(())
}

async fn mark_attendance(
    client: &TrackerClient,
    subject_id: i64,
    date: NaiveDate,
    set: &[MarkArg],
) -> anyhow::Result<()> {
    let roster = client.students().await?;
    let saved = client.attendance_for_store(subject_id, date).await?;
    let mut view = reconcile(&roster, &saved);

    for mark in set {
        if !view.set(mark.student_id, mark.status) {
            anyhow::bail!("student {} is not on the roster", mark.student_id);
        }
    }

    let wire_date = to_wire_date(date);
    println!("{}", view.status_message(&wire_date));

    let rows: Vec<Vec<String>> = roster
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let status = view
                .selection(s.id)
                .map(|st| st.as_str().to_string())
                .unwrap_or_else(|| "-".to_string());
            vec![(i + 1).to_string(), s.roll_no.clone(), s.name.clone(), status]
        })
        .collect();
    print!(
        "{}",
        render_table(&["S.No", "Roll No", "Name", "Status"], &rows)
    );

    if set.is_empty() {
        return Ok(());
    }

    if !view.is_complete() {
        let missing: Vec<String> = view.missing().iter().map(|id| id.to_string()).collect();
        anyhow::bail!(
            "cannot save: no status selected for student(s) {}",
            missing.join(", ")
        );
    }

    let marks = view.marks_for_save()?;
    client.save_attendance(date, subject_id, &marks).await?;
    tracing::info!(subject_id, date = %wire_date, "attendance saved");
    println!("Attendance stored successfully.");
    Ok(())
}

async fn student_report(
    client: &TrackerClient,
    query: &str,
    subject: Option<i64>,
    total_days: u32,
    year: Option<i32>,
    month: Option<u32>,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    // Both checks run before anything is sent to the backend.
    validate_total_working_days(total_days)?;
    let date_filter = StudentDateFilter::from_flags(date, month, year)?;
    let scope = match subject {
        Some(id) => SubjectScope::One(id),
        None => SubjectScope::All,
    };

    let report = client.student_report(query, scope, &date_filter).await?;
    let Some(student) = report.student else {
        println!("No matching student found.");
        return Ok(());
    };

    let summary = aggregate(report.days_present, total_days)?;
    println!("{} — Roll No: {}", student.name, student.roll_no);
    println!(
        "Days Present: {} out of {} working days.",
        summary.days_present, summary.total_working_days
    );
    let verdict = match summary.classification {
        Classification::Pass => "Pass",
        Classification::Fail => "Fail",
    };
    println!(
        "Attendance Percentage: {} ({})",
        summary.display_percentage(),
        verdict
    );

    if report.rows.is_empty() {
        println!("No attendance records found for the selected criteria.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.date.clone(),
                r.subject.clone(),
                r.status.as_str().to_string(),
            ]
        })
        .collect();
    print!(
        "{}",
        render_table(&["S.No", "Date", "Subject", "Status"], &rows)
    );
    Ok(())
}

async fn homework(client: &TrackerClient, command: HomeworkCommands) -> anyhow::Result<()> {
    match command {
        HomeworkCommands::List => {
            let items = client.list_homework().await?;
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|h| {
                    vec![
                        h.id.to_string(),
                        h.subject.clone(),
                        h.description.clone(),
                        h.due_date.clone(),
                        h.status.as_str().to_string(),
                    ]
                })
                .collect();
            print!(
                "{}",
                render_table(&["Id", "Subject", "Description", "Due", "Status"], &rows)
            );
        }
        HomeworkCommands::Add {
            subject,
            description,
            due,
        } => {
            let id = client
                .add_homework(&HomeworkInput {
                    subject_id: subject,
                    description,
                    due_date: due,
                })
                .await?;
            println!("Homework posted with id {}.", id);
        }
        HomeworkCommands::Update {
            id,
            subject,
            description,
            due,
        } => {
            client
                .update_homework(
                    id,
                    &HomeworkInput {
                        subject_id: subject,
                        description,
                        due_date: due,
                    },
                )
                .await?;
            println!("Homework {} updated.", id);
        }
        HomeworkCommands::Delete { id } => {
            client.delete_homework(id).await?;
            println!("Homework {} deleted.", id);
        }
        HomeworkCommands::Toggle { id } => {
            let items = client.list_homework().await?;
            let mut controller = ToggleController::new(&items);
            let Some(toggle) = controller.begin_toggle(id) else {
                anyhow::bail!("no homework item with id {}", id);
            };

            // Optimistic: the flipped state is already what we show.
            let result = client
                .set_homework_status(id, toggle.requested)
                .await
                .map_err(|e| e.to_string());
            match controller.resolve(toggle, result) {
                ToggleOutcome::Committed => {
                    let view = controller.view(id).expect("item exists");
                    println!("Homework {} is now {}.", id, view.status.as_str());
                }
                ToggleOutcome::RolledBack(notice) => {
                    let view = controller.view(id).expect("item exists");
                    eprintln!("{}", notice);
                    println!("Homework {} is still {}.", id, view.status.as_str());
                }
                ToggleOutcome::Stale => {}
            }
        }
    }
    Ok(())
}
