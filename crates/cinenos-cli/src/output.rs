use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;
use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
    // Set once a command result went to stdout in a JSON format
    result_written: Cell<bool>,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            result_written: Cell::new(false),
        }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", Some("✓".green().to_string()), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message("info", None, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", Some("⚠".yellow().to_string()), msg.as_ref());
    }

    /// Human-only text such as tables and cards; dropped in JSON mode
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", msg.as_ref());
    }

    /// Command result for the JSON formats
    pub fn json(&self, data: &serde_json::Value) {
        if self.is_human() {
            return;
        }
        self.print_json(data);
        self.result_written.set(true);
    }

    /// Status messages never follow a JSON result, so stdout stays one document
    fn shows_messages(&self) -> bool {
        !self.quiet && (self.is_human() || !self.result_written.get())
    }

    fn message(&self, kind: &str, marker: Option<String>, msg: &str) {
        if !self.shows_messages() {
            return;
        }
        match self.format {
            OutputFormat::Human => match marker {
                Some(marker) => println!("{} {}", marker, msg),
                None => println!("{}", msg),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({"type": kind, "message": msg}));
            }
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty | OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default())
            }
        }
    }
}
