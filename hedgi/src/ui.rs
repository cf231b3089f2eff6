//! Utilities for printing and everything related to "UI".

use term_painter::{Color, Style, ToStyle};

/// Prints a message with an icon. Explicit line breaks in the message are
/// kept, long lines are rewrapped to the terminal width.
macro_rules! print_msg {
    ($kind:ident: $icon:literal => $fmt:literal $($args:tt)*) => {{
        use crate::ui::MsgKind;
        use term_painter::ToStyle;

        let icon_style = MsgKind::$kind.icon_style();
        icon_style.with(|| {
            print!("[{}] ", $icon);
        });

        let body = format!($fmt $($args)*);
        let lines = crate::ui::wrap_lines(&body);

        // Print all lines
        let body_style = MsgKind::$kind.body_style();
        for (i, line) in lines.iter().enumerate() {
            let prefix = match i {
                0 => "",
                _ if i == lines.len() - 1 => "    └ ",
                _ => "    │ ",
            };

            println!("{}{}", icon_style.paint(prefix), body_style.paint(line));
        }
    }};
}

macro_rules! progress {
    ([$fmt:literal $($args:tt)*] => $body:tt) => {{
        use std::{
            io::{stdout, Write},
            time::Instant,
        };
        use crate::ui::MsgKind;
        use term_painter::ToStyle;

        let print_body = || {
            MsgKind::Progress.body_style().with(|| {
                print!($fmt $($args)*);
                print!(" ... ");
            });
        };

        MsgKind::Progress.icon_style().with(|| print!("[…] "));
        print_body();
        let _ = stdout().flush();

        let before = Instant::now();
        let out = $body;
        let time = before.elapsed();

        print!("\r{} ", MsgKind::Progress.icon_style().paint("[✓]"));
        print_body();
        MsgKind::Progress.body_style().with(|| {
            println!("{} (in {:.2?})", MsgKind::Progress.icon_style().paint("done"), time);
        });

        (out, time)
    }};
}

macro_rules! info {
    () => { info!("") };
    ($($t:tt)*) => {
        print_msg!(Info: 'i' => $($t)*);
    };
}

macro_rules! warn {
    () => { warn!("") };
    ($($t:tt)*) => {
        print_msg!(Warning: 'w' => $($t)*);
    };
}

macro_rules! error {
    () => { error!("") };
    ($($t:tt)*) => {
        print_msg!(Error: '!' => $($t)*);
    };
}

pub enum MsgKind {
    Error,
    Warning,
    Info,
    Progress,
}

impl MsgKind {
    pub fn icon_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::Red.bold(),
            MsgKind::Warning => Color::Yellow.bold(),
            MsgKind::Info => Color::Blue.bold(),
            MsgKind::Progress => Color::Green.bold(),
        }
    }

    pub fn body_style(&self) -> Style {
        match self {
            MsgKind::Error => Color::BrightRed.to_style(),
            MsgKind::Warning => Color::BrightYellow.to_style(),
            MsgKind::Info => Color::NotSet.to_style(),
            MsgKind::Progress => Color::NotSet.to_style(),
        }
    }
}

/// Splits `body` into lines that fit into the terminal (but are never longer
/// than 100 columns). Leading indentation of each input line is kept.
pub fn wrap_lines(body: &str) -> Vec<String> {
    let line_len = std::cmp::min(
        100,
        term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
    ).saturating_sub(7);

    let mut lines = Vec::new();
    for input_line in body.lines() {
        let indent_len = input_line.len() - input_line.trim_start().len();
        let indent = &input_line[..indent_len];

        let mut current_line = indent.to_string();
        for word in input_line.split_whitespace() {
            if current_line.len() > indent_len
                && current_line.chars().count() + word.chars().count() >= line_len
            {
                lines.push(current_line.trim_end().to_string());
                current_line = indent.to_string();
            }

            current_line.push_str(word);
            current_line.push(' ');
        }
        lines.push(current_line.trim_end().to_string());
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Formats a duration in seconds with four decimal places.
pub fn fmt_seconds(d: std::time::Duration) -> String {
    format!("{:.4} seconds", d.as_secs() as f64 + d.subsec_nanos() as f64 * 1e-9)
}
