use std::io::{self, IsTerminal, Write};

use ratatui::{
    crossterm::{
        execute,
        style::{
            Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute,
            SetForegroundColor, force_color_output,
        },
    },
    style::{Color, Modifier, Style},
};

const FORCE_COLOR_VARS: [&str; 2] = ["PKG_CHANGELOG_FORCE_COLOR", "CLICOLOR_FORCE"];

#[derive(Clone, Copy)]
enum MessageKind {
    Log,
    Hint,
    Warning,
    Error,
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

pub(crate) fn print_log(message: impl AsRef<str>) {
    emit(
        Stream::Stdout,
        format!("log: {}", message.as_ref()),
        MessageKind::Log,
    );
}

pub(crate) fn print_hint(message: impl AsRef<str>) {
    emit(
        Stream::Stderr,
        format!("hint: {}", message.as_ref()),
        MessageKind::Hint,
    );
}

pub(crate) fn print_warning(message: impl AsRef<str>) {
    emit(
        Stream::Stderr,
        format!("warning: {}", message.as_ref()),
        MessageKind::Warning,
    );
}

pub(crate) fn print_error(message: impl AsRef<str>) {
    emit(
        Stream::Stderr,
        format!("error: {}", message.as_ref()),
        MessageKind::Error,
    );
}

fn emit(stream: Stream, text: String, kind: MessageKind) {
    match stream {
        Stream::Stdout => {
            let use_color = supports_color(io::stdout().is_terminal());
            write_line(&mut io::stdout(), &text, kind, use_color);
        }
        Stream::Stderr => {
            let use_color = supports_color(io::stderr().is_terminal());
            write_line(&mut io::stderr(), &text, kind, use_color);
        }
    }
}

fn write_line(writer: &mut impl Write, text: &str, kind: MessageKind, use_color: bool) {
    if use_color && write_colored_line(writer, text, style_for(kind)).is_ok() {
        return;
    }
    let _ = writeln!(writer, "{text}");
}

fn write_colored_line(writer: &mut impl Write, text: &str, style: Style) -> io::Result<()> {
    if let Some(color) = style.fg {
        execute!(writer, SetForegroundColor(CrosstermColor::from(color)))?;
    }
    if style.add_modifier.contains(Modifier::BOLD) {
        execute!(writer, SetAttribute(Attribute::Bold))?;
    }
    if style.add_modifier.contains(Modifier::DIM) {
        execute!(writer, SetAttribute(Attribute::Dim))?;
    }

    execute!(
        writer,
        Print(text),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print("\n")
    )?;
    Ok(())
}

fn supports_color(is_terminal: bool) -> bool {
    if FORCE_COLOR_VARS.into_iter().any(is_force_color_var_set) {
        force_color_output(true);
        return true;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    is_terminal
}

fn is_force_color_var_set(name: &str) -> bool {
    match std::env::var(name) {
        Ok(value) => value != "0",
        Err(_) => false,
    }
}

fn style_for(kind: MessageKind) -> Style {
    match kind {
        MessageKind::Log => Style::new().fg(Color::Blue).add_modifier(Modifier::DIM),
        MessageKind::Hint => Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        MessageKind::Warning => Style::new()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
        MessageKind::Error => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}
