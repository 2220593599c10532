//! Saved state export
//!
//! Formats a [`SavedState`] as Rust source for copy-paste back into code.

use crate::gui::SavedState;
use crate::value::Value;

const HEADER: &str = "// Exported from Controls\n\n";

/// Export every saved value as flat Rust constants
///
/// Folder titles become name prefixes:
/// ```text
/// // Exported from Controls
/// const SPEED: f64 = 3.5;
/// const PHYSICS_GRAVITY: f64 = 9.8;
/// ```
pub fn export_as_rust_flat(state: &SavedState) -> String {
    let mut output = String::from(HEADER);
    write_flat(state, "", &mut output);
    output
}

fn write_flat(state: &SavedState, prefix: &str, output: &mut String) {
    for (name, value) in &state.controllers {
        let full = format!("{}{}", prefix, name);
        output.push_str(&format_rust_const(&full, value));
        output.push('\n');
    }
    for (title, folder) in &state.folders {
        let prefix = format!("{}{}_", prefix, title);
        write_flat(folder, &prefix, output);
    }
}

/// Export saved values as nested Rust modules, one per folder
///
/// ```text
/// // Exported from Controls
/// pub const SPEED: f64 = 3.5;
///
/// pub mod physics {
///     pub const GRAVITY: f64 = 9.8;
/// }
/// ```
pub fn export_as_rust_grouped(state: &SavedState) -> String {
    let mut output = String::from(HEADER);
    format_tree(state, &mut output, 0);
    output
}

fn format_tree(state: &SavedState, output: &mut String, indent: usize) {
    let indent_str = "    ".repeat(indent);

    for (name, value) in &state.controllers {
        let const_line = format_rust_const(name, value);
        let pub_line = const_line.replacen("const ", "pub const ", 1);
        output.push_str(&format!("{}{}\n", indent_str, pub_line));
    }
    for (title, folder) in &state.folders {
        output.push_str(&format!("\n{}pub mod {} {{\n", indent_str, module_name(title)));
        format_tree(folder, output, indent + 1);
        output.push_str(&format!("{}}}\n", indent_str));
    }
}

/// `"jump force"` -> `JUMP_FORCE`
fn const_name(name: &str) -> String {
    sanitize(name).to_uppercase()
}

/// `"Jump Force"` -> `jump_force`
fn module_name(title: &str) -> String {
    sanitize(title).to_lowercase()
}

fn sanitize(name: &str) -> String {
    let mut out: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Format a single value as a Rust const declaration
fn format_rust_const(name: &str, value: &Value) -> String {
    let const_name = const_name(name);

    match value {
        // {:?} keeps a trailing `.0` so the literal stays an f64
        Value::Number(v) if v.is_finite() => format!("const {}: f64 = {:?};", const_name, v),
        Value::Bool(v) => format!("const {}: bool = {};", const_name, v),
        Value::String(s) => format!("const {}: &str = {:?};", const_name, s),
        other => format!("// {}: {} value not exportable", const_name, other.type_name()),
    }
}
