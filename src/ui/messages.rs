//! One-line status messages for CLI commands.
//!
//! Results go to stdout, errors to stderr. Service diagnostics use `tracing`
//! instead.

use std::fmt;

const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Tone::Info => ("\x1b[34;1m", "ℹ️"),
            Tone::Success => ("\x1b[32;1m", "✅"),
            Tone::Warning => ("\x1b[33;1m", "⚠️"),
            Tone::Error => ("\x1b[31;1m", "❌"),
        }
    }
}

fn emit(tone: Tone, msg: &dyn fmt::Display) {
    let (color, icon) = tone.style();
    match tone {
        Tone::Error => eprintln!("{color}{icon}{RESET} {msg}"),
        _ => println!("{color}{icon}{RESET} {msg}"),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Tone::Info, &msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Tone::Success, &msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Tone::Warning, &msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Tone::Error, &msg);
}
