use colored::*;

pub struct ListOutput {
    items: Vec<ListItem>,
}

pub struct ListItem {
    pub label: String,
    pub value: String,
    pub status: Option<ListItemStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListItemStatus {
    Success,
    Skipped,
    Warning,
    Error,
    Info,
}

impl ListOutput {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add_item(&mut self, label: String, value: String, status: Option<ListItemStatus>) {
        self.items.push(ListItem { label, value, status });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn format(&self) -> String {
        let width = self.items.iter().map(|i| i.label.len()).max().unwrap_or(0);
        let mut output = String::new();
        for item in &self.items {
            let status_symbol = match &item.status {
                Some(ListItemStatus::Success) => "✓".green(),
                Some(ListItemStatus::Skipped) => "⏭".bright_black(),
                Some(ListItemStatus::Warning) => "⚠".yellow(),
                Some(ListItemStatus::Error) => "✗".red(),
                Some(ListItemStatus::Info) => "ℹ".blue(),
                None => "•".normal(),
            };
            output.push_str(&format!(
                "  {} {:width$}  {}\n",
                status_symbol,
                item.label.bold(),
                item.value,
                width = width
            ));
        }
        output
    }
}

impl Default for ListOutput {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green(), message)
}

pub fn format_error(message: &str) -> String {
    format!("{} {}", "✗".red(), message.red())
}

pub fn format_warning(message: &str) -> String {
    format!("{} {}", "⚠".yellow(), message.yellow())
}

pub fn format_info(message: &str) -> String {
    format!("{} {}", "ℹ".blue(), message)
}

pub fn format_skip(message: &str) -> String {
    format!("{} {}", "⏭".bright_black(), message.dimmed())
}

pub fn format_section(title: &str) -> String {
    format!("\n{}\n{}", title.yellow().bold(), "─".repeat(title.chars().count()).blue())
}
