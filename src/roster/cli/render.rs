//! # Rendering
//!
//! Turns API results into terminal text. Every `render_*` function returns a
//! `String` so output can be tested without capturing stdout; the `print_*`
//! wrappers are the only functions here that write.
//!
//! Column widths are computed on display width (`unicode-width`), not byte
//! or char counts, so names like "Meikäläinen" line up.

use colored::Colorize;
use roster::api::{CmdMessage, MessageLevel};
use roster::config::RosterConfig;
use roster::error::RosterError;
use roster::form::{FormField, FormState};
use roster::model::Member;
use roster::view::Row;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const MAX_CELL_WIDTH: usize = 28;
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const COLUMN_GAP: &str = "  ";
const HEADERS: [&str; 8] = [
    "#",
    "First name",
    "Last name",
    "Address",
    "Postal code",
    "Phone",
    "Email",
    "Member since",
];

fn cells(row: &Row<'_>) -> [String; 8] {
    let f = &row.member.fields;
    [
        row.number.to_string(),
        f.first_name.clone(),
        f.last_name.clone(),
        f.address.clone(),
        f.postal_code.clone(),
        f.phone.clone(),
        f.email.clone(),
        f.membership_start.format(DATE_FORMAT).to_string(),
    ]
}

/// Renders the member list as a table. The selected row is marked with `>`.
pub fn render_member_table(rows: &[Row<'_>]) -> String {
    if rows.is_empty() {
        return "No members found.\n".to_string();
    }

    let table: Vec<[String; 8]> = rows
        .iter()
        .map(|row| cells(row).map(|cell| truncate_to_width(&cell, MAX_CELL_WIDTH)))
        .collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &table {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad_to_width(h, *w))
        .collect();
    out.push_str(&format!("  {}\n", header.join(COLUMN_GAP).bold()));

    for (row, cells) in rows.iter().zip(table.iter()) {
        let line: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| pad_to_width(cell, *w))
            .collect();
        let line = line.join(COLUMN_GAP);
        let line = line.trim_end();
        if row.selected {
            out.push_str(&format!("{} {}\n", ">".yellow().bold(), line.yellow()));
        } else {
            out.push_str(&format!("  {}\n", line));
        }
    }

    out
}

/// Renders one member as label/value lines.
pub fn render_member(member: &Member) -> String {
    let f = &member.fields;
    let mut out = String::new();
    out.push_str(&format!("{}\n", f.full_name().bold()));
    let lines = [
        ("Id", member.id.to_string()),
        ("Address", f.address.clone()),
        ("Postal code", f.postal_code.clone()),
        ("Phone", f.phone.clone()),
        ("Email", f.email.clone()),
        (
            "Member since",
            f.membership_start.format(DATE_FORMAT).to_string(),
        ),
    ];
    for (label, value) in lines {
        out.push_str(&format!("  {:<13}{}\n", format!("{}:", label).dimmed(), value));
    }
    out
}

/// Renders the form inputs as they currently stand.
pub fn render_form(form: &FormState) -> String {
    let mut out = String::new();
    let heading = match &form.selected {
        Some(member) => format!("Editing {}", member.fields.full_name()),
        None => "New member".to_string(),
    };
    out.push_str(&format!("{}\n", heading.bold()));

    for field in FormField::ALL {
        out.push_str(&format!(
            "  {:<13}{}\n",
            format!("{}:", field.label()).dimmed(),
            form.get(field)
        ));
    }
    let start = form
        .membership_start
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "(today)".to_string());
    out.push_str(&format!("  {:<13}{}\n", "Member since:".dimmed(), start));
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// The user-facing text for an error. Validation failures show only the
/// first problem unless `report_all` is set.
pub fn error_text(error: &RosterError, report_all: bool) -> String {
    match error {
        RosterError::Validation(errors) if report_all && errors.len() > 1 => errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

pub fn render_config(config: &RosterConfig, effective_connection: &str) -> String {
    let mut out = String::new();
    let configured = config.connection.as_deref().unwrap_or("");
    if configured.is_empty() {
        out.push_str(&format!("connection = {} (default)\n", effective_connection));
    } else {
        out.push_str(&format!("connection = {}\n", configured));
    }
    out.push_str(&format!("database = {}\n", config.database));
    out.push_str(&format!("collection = {}\n", config.collection));
    out.push_str(&format!("report-all-errors = {}\n", config.report_all_errors));
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
