//! Purpose: Render records as pretty JSON, optionally marking undeclared fields with color.
//! Exports: colorize_records.
//! Role: Pure formatter used by the CLI `normalize --pretty` path.
//! Invariants: With color disabled, output equals serde_json::to_string_pretty.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

const COLOR_KEY: &str = "36";
const COLOR_EXTRA_KEY: &str = "33";
const COLOR_LEAF: &str = "32";
const COLOR_PUNCT: &str = "39";

/// `declared` lists the record's own property names; other top-level keys
/// of each record are extra fields and get their own key color.
pub fn colorize_records(value: &Value, declared: &[&str], use_color: bool) -> String {
    let mut out = String::new();
    let mut style = Style {
        declared,
        use_color,
        out: &mut out,
    };
    match value {
        Value::Array(records) => style.write_array(records, 0, true),
        record => style.write_value(record, 0, true),
    }
    out
}

struct Style<'a> {
    declared: &'a [&'a str],
    use_color: bool,
    out: &'a mut String,
}

impl Style<'_> {
    fn write_value(&mut self, value: &Value, indent: usize, record_level: bool) {
        match value {
            Value::Array(items) => self.write_array(items, indent, false),
            Value::Object(map) => self.write_object(map, indent, record_level),
            leaf => {
                let text = leaf.to_string();
                self.push_colored(&text, COLOR_LEAF);
            }
        }
    }

    fn write_array(&mut self, items: &[Value], indent: usize, records: bool) {
        if items.is_empty() {
            self.push_colored("[]", COLOR_PUNCT);
            return;
        }
        self.push_colored("[", COLOR_PUNCT);
        self.out.push('\n');
        for (idx, item) in items.iter().enumerate() {
            self.push_indent(indent + 1);
            self.write_value(item, indent + 1, records);
            if idx + 1 < items.len() {
                self.push_colored(",", COLOR_PUNCT);
            }
            self.out.push('\n');
        }
        self.push_indent(indent);
        self.push_colored("]", COLOR_PUNCT);
    }

    fn write_object(&mut self, map: &Map<String, Value>, indent: usize, record_level: bool) {
        if map.is_empty() {
            self.push_colored("{}", COLOR_PUNCT);
            return;
        }
        self.push_colored("{", COLOR_PUNCT);
        self.out.push('\n');
        let len = map.len();
        for (idx, (key, value)) in map.iter().enumerate() {
            self.push_indent(indent + 1);
            let color = if record_level && !self.declared.contains(&key.as_str()) {
                COLOR_EXTRA_KEY
            } else {
                COLOR_KEY
            };
            let encoded = Value::String(key.clone()).to_string();
            self.push_colored(&encoded, color);
            self.push_colored(":", COLOR_PUNCT);
            self.out.push(' ');
            self.write_value(value, indent + 1, false);
            if idx + 1 < len {
                self.push_colored(",", COLOR_PUNCT);
            }
            self.out.push('\n');
        }
        self.push_indent(indent);
        self.push_colored("}", COLOR_PUNCT);
    }

    fn push_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }

    fn push_colored(&mut self, text: &str, color: &str) {
        if !self.use_color {
            self.out.push_str(text);
            return;
        }
        self.out.push_str("\u{1b}[");
        self.out.push_str(color);
        self.out.push('m');
        self.out.push_str(text);
        self.out.push_str("\u{1b}[0m");
    }
}
