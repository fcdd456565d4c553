//! One-line status messages on stderr, each led by a marker glyph.

use owo_colors::OwoColorize;

use super::colors_enabled;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Done,
    Note,
    Caution,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Tone::Done => "✓",
            Tone::Note => "ℹ",
            Tone::Caution => "⚠",
        }
    }
}

fn line(tone: Tone, message: &str, color: bool) -> String {
    let marker = tone.marker();
    if !color {
        return format!("{marker} {message}");
    }
    match tone {
        Tone::Done => format!("{} {message}", marker.green().bold()),
        Tone::Note => format!("{} {message}", marker.blue().bold()),
        Tone::Caution => format!("{} {}", marker.yellow().bold(), message.yellow()),
    }
}

pub fn success(message: &str) {
    eprintln!("{}", line(Tone::Done, message, colors_enabled()));
}

pub fn info(message: &str) {
    eprintln!("{}", line(Tone::Note, message, colors_enabled()));
}

pub fn warning(message: &str) {
    eprintln!("{}", line(Tone::Caution, message, colors_enabled()));
}
