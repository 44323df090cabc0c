use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tablecall::dashboard::{
    AlertError, Alerter, Config, Dashboard, HttpSource, Player, PushStatus, SoundPreference, View,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::prelude::*;

const HELP: &str = "commands: <n> | done <id> | sound on | sound off | refresh | quit";

fn init_tracing() {
    // stdout belongs to the rendered list
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

struct TerminalBell;

fn ring() -> Result<(), AlertError> {
    let mut out = std::io::stdout().lock();
    out.write_all(b"\x07")
        .and_then(|_| out.flush())
        .map_err(|err| AlertError(err.to_string()))
}

#[async_trait]
impl Alerter for TerminalBell {
    async fn unlock(&self) -> Result<(), AlertError> {
        ring()
    }

    async fn play(&self) -> Result<(), AlertError> {
        ring()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Target {
    Position(usize),
    Id(String),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Resolve(Target),
    Sound(bool),
    Refresh,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        ["done", id] => Some(Command::Resolve(Target::Id(id.to_string()))),
        ["sound", "on"] => Some(Command::Sound(true)),
        ["sound", "off"] => Some(Command::Sound(false)),
        ["refresh"] => Some(Command::Refresh),
        ["quit"] | ["exit"] => Some(Command::Quit),
        [n] => n
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| Command::Resolve(Target::Position(n))),
        _ => None,
    }
}

fn render(view: &View, now: NaiveDateTime) -> String {
    let push = match view.push {
        PushStatus::Connecting => "connecting",
        PushStatus::Live => "live",
        PushStatus::Disconnected => "offline, polling",
    };
    let sound = if view.sound_enabled { "on" } else { "off" };

    let mut out = format!(
        "\n=== Open requests ({}) | sound {} | push {} ===\n",
        view.requests.len(),
        sound,
        push
    );

    if !view.ready {
        out.push_str("  loading...\n");
    } else if view.requests.is_empty() {
        out.push_str("  No open requests\n");
    }

    for (position, request) in view.requests.iter().enumerate() {
        let minutes = (now - request.created_at).num_minutes().max(0);
        out.push_str(&format!(
            "  [{}] Table {:<3} {:<17} {}  ({} min ago)  {}\n",
            position + 1,
            request.table_number,
            request.request_type.label(),
            request.created_at.format("%H:%M:%S"),
            minutes,
            request.id,
        ));
    }

    if let Some(error) = &view.last_error {
        out.push_str(&format!("  ! {}\n", error));
    }

    out
}

async fn run(dashboard: &Dashboard) {
    let mut view = dashboard.view();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = tokio::time::interval(Duration::from_secs(30));

    println!("{}", HELP);

    loop {
        tokio::select! {
            changed = view.changed() => {
                if changed.is_err() {
                    break;
                }
                print!("{}", render(&view.borrow_and_update(), Utc::now().naive_utc()));
            }
            _ = redraw.tick() => {
                print!("{}", render(&view.borrow(), Utc::now().naive_utc()));
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        tracing::error!("Failed to read command: {}", err);
                        break;
                    }
                };

                match parse_command(&line) {
                    Some(Command::Resolve(Target::Id(id))) => dashboard.resolve(id).await,
                    Some(Command::Resolve(Target::Position(n))) => {
                        let id = view.borrow().requests.get(n - 1).map(|r| r.id.clone());
                        match id {
                            Some(id) => dashboard.resolve(id).await,
                            None => println!("no request at position {}", n),
                        }
                    }
                    Some(Command::Sound(true)) => {
                        if !dashboard.enable_sound().await {
                            println!("sound could not be enabled");
                        }
                    }
                    Some(Command::Sound(false)) => dashboard.disable_sound().await,
                    Some(Command::Refresh) => dashboard.refresh().await,
                    Some(Command::Quit) => break,
                    None if line.trim().is_empty() => {}
                    None => println!("{}", HELP),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = Config::default();

    let source = match HttpSource::new(
        config.api_url.clone(),
        config.token.clone(),
        config.audience,
        config.request_timeout,
    ) {
        Ok(source) => source,
        Err(err) => {
            tracing::error!("Failed to create dashboard client: {}", err);
            std::process::exit(1);
        }
    };

    tracing::info!(api_url = %config.api_url, audience = ?config.audience, "Starting dashboard");

    let dashboard = Dashboard::start(
        Arc::new(source),
        Player::new(Arc::new(TerminalBell), false),
        SoundPreference::new(config.sound_preference_path.clone()),
        config.settings.clone(),
    )
    .await;

    run(&dashboard).await;

    dashboard.shutdown().await;
}
