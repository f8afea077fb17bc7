//! Terminal rendering of shell output.

use colored::Colorize;
use slurmsh_core::format::format_sim_date;
use slurmsh_core::{ListName, ListStyle, OutputLine};

const LIST_GAP: &str = "   ";

fn styled_name(name: &ListName) -> String {
    let text = name.display_name();
    match name.style {
        ListStyle::Directory => text.green().bold().to_string(),
        ListStyle::Binary => text.red().bold().to_string(),
        ListStyle::Plain => text,
    }
}

/// Render one output line with terminal colors.
pub fn render_line(line: &OutputLine) -> String {
    match line {
        OutputLine::ListRow(names) => names
            .iter()
            .map(styled_name)
            .collect::<Vec<_>>()
            .join(LIST_GAP),
        OutputLine::LongEntry {
            permissions,
            user,
            created_at,
            name,
        } => format!(
            "{}  {}   {}   {}",
            permissions,
            user,
            format_sim_date(*created_at),
            styled_name(name)
        ),
        OutputLine::Info(text) => text.yellow().to_string(),
        other => other.to_string(),
    }
}

/// Prompt text in bold blue.
pub fn render_prompt(prompt: &str) -> String {
    let (path, rest) = prompt.split_at(prompt.trim_end().len());
    format!("{}{}", path.blue().bold(), rest)
}
