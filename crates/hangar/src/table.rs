use chrono::{DateTime, Utc};
use hangar_core::{Project, SessionSummary};

pub struct ProjectTableFormatter {
    index_width: usize,
    name_width: usize,
    opened_width: usize,
    path_width: usize,
}

impl ProjectTableFormatter {
    pub fn new(projects: &[Project]) -> Self {
        let name_width = projects
            .iter()
            .map(|p| display_name(p).chars().count())
            .max()
            .unwrap_or(16)
            .clamp(4, 40); // Between "Name" header min and reasonable terminal width max

        Self {
            index_width: projects.len().saturating_sub(1).to_string().len().max(1),
            name_width,
            opened_width: 16,
            path_width: 50,
        }
    }

    pub fn print_table(&self, projects: &[Project]) {
        let widths = self.widths();
        println!("{}", border('┌', '┬', '┐', &widths));
        println!("{}", row(&["#", "Name", "Last opened", "Path"], &widths));
        println!("{}", border('├', '┼', '┤', &widths));
        for (index, project) in projects.iter().enumerate() {
            let opened = project
                .last_opened()
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string());
            let path = project.path().display().to_string();
            println!(
                "{}",
                row(
                    &[&index.to_string(), &display_name(project), &opened, &path],
                    &widths
                )
            );
        }
        println!("{}", border('└', '┴', '┘', &widths));
    }

    fn widths(&self) -> [usize; 4] {
        [
            self.index_width,
            self.name_width,
            self.opened_width,
            self.path_width,
        ]
    }
}

pub struct SessionTableFormatter {
    id_width: usize,
    updated_width: usize,
    messages_width: usize,
    size_width: usize,
    title_width: usize,
}

impl SessionTableFormatter {
    pub fn new(sessions: &[SessionSummary]) -> Self {
        let id_width = sessions
            .iter()
            .map(|s| s.id.chars().count())
            .max()
            .unwrap_or(8)
            .clamp(2, 36);

        Self {
            id_width,
            updated_width: 9,
            messages_width: 14,
            size_width: 9,
            title_width: 61,
        }
    }

    pub fn print_table(&self, sessions: &[SessionSummary], now: DateTime<Utc>) {
        let widths = self.widths();
        println!("{}", border('┌', '┬', '┐', &widths));
        println!("{}", row(&["ID", "Updated", "Messages", "Size", "Title"], &widths));
        println!("{}", border('├', '┼', '┤', &widths));
        for session in sessions {
            println!(
                "{}",
                row(
                    &[
                        &session.id,
                        &session.relative_time(now),
                        &session.message_count_label(),
                        &session.formatted_size(),
                        &session.display_name(),
                    ],
                    &widths
                )
            );
        }
        println!("{}", border('└', '┴', '┘', &widths));
    }

    fn widths(&self) -> [usize; 5] {
        [
            self.id_width,
            self.updated_width,
            self.messages_width,
            self.size_width,
            self.title_width,
        ]
    }
}

/// Project name with its icon and an activity marker.
fn display_name(project: &Project) -> String {
    let mut name = match project.icon() {
        Some(icon) => format!("{} {}", icon, project.name()),
        None => project.name().to_string(),
    };
    if project.has_activity() {
        name.push_str(" *");
    }
    name
}

fn border(left: char, middle: char, right: char, widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&middle.to_string()), right)
}

fn row(cells: &[&str], widths: &[usize]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!(" {} ", truncate(cell, *width)))
        .collect();
    format!("│{}│", cells.join("│"))
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings
/// including emoji and multi-byte characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
