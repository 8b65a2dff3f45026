use chrono::Local;
use colored::Colorize;
use std::fmt::Write;
use timeago::Formatter;
use treasure_manager::api::{CmdMessage, MessageLevel};
use treasure_manager::model::{LogEntry, StorageInfo, Treasure, TIMESTAMP_FORMAT};

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_listing(hunt_id: &str, info: Option<&StorageInfo>, treasures: &[Treasure]) {
    print!("{}", render_listing(hunt_id, info, treasures));
}

pub(super) fn print_details(treasure: &Treasure) {
    println!("\n{}", "Treasure Details:".bold());
    print!("{}", render_treasure(treasure));
}

pub(super) fn print_log(entries: &[LogEntry]) {
    for entry in entries {
        println!(
            "{} {}: {}",
            format!("[{}]", entry.timestamp).dimmed(),
            entry.operation.tag().yellow(),
            entry.details
        );
    }
}

pub(super) fn render_treasure(t: &Treasure) -> String {
    format!(
        "ID: {}\nUsername: {}\nLocation: {:.6}, {:.6}\nClue: {}\nValue: {}\n",
        t.id, t.username, t.latitude, t.longitude, t.clue, t.value
    )
}

pub(super) fn render_listing(
    hunt_id: &str,
    info: Option<&StorageInfo>,
    treasures: &[Treasure],
) -> String {
    let mut out = String::new();
    if let Some(info) = info {
        let _ = writeln!(out, "Hunt: {}", hunt_id);
        let _ = writeln!(out, "File size: {} bytes", info.size_bytes);
        let _ = writeln!(
            out,
            "Last modified: {} ({})",
            info.modified.format(TIMESTAMP_FORMAT),
            time_ago(info)
        );
        let _ = writeln!(out, "\nTreasures:");
    }
    for t in treasures {
        out.push('\n');
        out.push_str(&render_treasure(t));
    }
    out
}

fn time_ago(info: &StorageInfo) -> String {
    let elapsed = Local::now().signed_duration_since(info.modified);
    Formatter::new().convert(elapsed.to_std().unwrap_or_default())
}
