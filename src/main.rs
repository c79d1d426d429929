//! `dsuboard` — render the daily standup board in the terminal.
//!
//! Runs one refresh cycle against the intern-lifecycle backend and prints
//! the day's stats plus every carousel page. Fetch failures degrade to
//! empty collections (logged), so the binary only exits non-zero on
//! argument or client construction errors.
//!
//! Usage:
//!   dsuboard [--date YYYY-MM-DD] [--member ID] [--project NAME] [--status STATUS]

use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;

use dsuboard::api::ApiClient;
use dsuboard::board::{BoardService, BoardView, MemberCard};
use dsuboard::filters::Selection;
use dsuboard::state::load_config;
use dsuboard::types::{AttendanceStatus, TaskStatus};

struct CliArgs {
    date: Option<NaiveDate>,
    member: Selection<String>,
    project: Selection<String>,
    status: Selection<TaskStatus>,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = CliArgs {
        date: None,
        member: Selection::All,
        project: Selection::All,
        status: Selection::All,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .ok_or_else(|| format!("{name} requires a value"))
        };
        match flag.as_str() {
            "--date" => {
                let raw = value("--date")?;
                let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| format!("invalid --date '{raw}' (expected YYYY-MM-DD)"))?;
                args.date = Some(date);
            }
            "--member" => args.member = Selection::from_param(&value("--member")?),
            "--project" => args.project = Selection::from_param(&value("--project")?),
            "--status" => {
                let raw = value("--status")?;
                if raw == "all" {
                    args.status = Selection::All;
                } else {
                    let status = TaskStatus::parse(&raw).ok_or_else(|| {
                        format!(
                            "invalid --status '{raw}' (expected open, in_progress, completed, blocked or all)"
                        )
                    })?;
                    args.status = Selection::Only(status);
                }
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(args)
}

fn attendance_label(status: Option<AttendanceStatus>) -> &'static str {
    match status {
        Some(AttendanceStatus::Present) => "present",
        Some(AttendanceStatus::Absent) => "absent",
        None => "unmarked",
    }
}

fn print_card(slot: usize, card: Option<&MemberCard>) {
    let marker = if slot == 1 { ">" } else { " " };
    let Some(card) = card else {
        println!("  {marker} (empty)");
        return;
    };

    println!(
        "  {marker} {} — {} • {} [{}]",
        card.member.name,
        card.member.domain,
        card.member.project,
        attendance_label(card.attendance),
    );
    if card.today_tasks.is_empty() {
        println!("      today: no tasks");
    } else {
        for task_card in &card.today_tasks {
            match &task_card.aging {
                Some(aging) => println!(
                    "      today: {} ({}) — {}",
                    task_card.task.title,
                    task_card.task.status.as_str(),
                    aging.text
                ),
                None => println!(
                    "      today: {} ({})",
                    task_card.task.title,
                    task_card.task.status.as_str()
                ),
            }
        }
    }
    for task in &card.yesterday_tasks {
        println!("      yesterday: {} ({})", task.title, task.status.as_str());
    }
}

fn print_page(view: &BoardView, page: usize) {
    println!("page {page}:");
    for (slot, card) in view.cards.iter().enumerate() {
        print_card(slot, card.as_ref());
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("dsuboard: {err}");
            return ExitCode::from(2);
        }
    };

    let config = load_config();
    let api = match ApiClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            eprintln!("dsuboard: failed to build API client: {err}");
            return ExitCode::FAILURE;
        }
    };

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let service = BoardService::new(api, date);
    service.set_member_filter(args.member);
    service.set_project_filter(args.project.clone());
    service.set_status_filter(args.status);

    service.refresh().await;

    if let Selection::Only(ref name) = args.project {
        let known = service.project_names();
        if !known.iter().any(|p| p == name) {
            log::warn!("Project '{name}' is not in the fetched project list");
        }
    }

    let view = service.view();
    println!(
        "DSU board for {} — total {}, submitted {}, pending {}, blocked {}",
        view.date, view.stats.total, view.stats.submitted, view.stats.not_submitted, view.stats.blocked
    );

    let mut page = 1;
    print_page(&view, page);
    while service.view().can_go_right {
        service.go_right();
        page += 1;
        print_page(&service.view(), page);
    }

    ExitCode::SUCCESS
}
