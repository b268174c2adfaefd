//! Output rendering
//!
//! Text and JSON views of a program tree, menu labels, and the request path
//! used to upload a program.

use crate::config::OutputFormat;
use anyhow::Result;
use plug_program::Program;
use std::fmt::Write;

/// Render the event/command tree
pub fn render_program(program: &Program, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(program)?),
        OutputFormat::Txt => {
            if program.is_empty() {
                return Ok("(no events)".to_string());
            }
            let mut out = String::new();
            for (i, event) in program.events().iter().enumerate() {
                writeln!(out, "[{}] {} ({})", i, event.label(), event.code())?;
                for (j, command) in event.commands().iter().enumerate() {
                    writeln!(
                        out,
                        "    [{}] {} {} {}",
                        j,
                        command.label(),
                        command.code(),
                        command.argument()
                    )?;
                }
            }
            Ok(out.trim_end().to_string())
        }
    }
}

/// Render the labels a menu would offer
pub fn render_labels(labels: &[&str], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(labels)?),
        OutputFormat::Txt => Ok(labels.join("\n")),
    }
}

/// Render an encoded program, with its tree in JSON mode
pub fn render_encoded(text: &str, program: &Program, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "program": text,
            "tree": program,
        }))?),
        OutputFormat::Txt => Ok(text.to_string()),
    }
}

/// Request path the controller accepts a program on: `{endpoint}?{program}`
pub fn upload_path(endpoint: &str, program: &str) -> String {
    format!("{endpoint}?{program}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use plug_program::{decode, Vocabulary};

    #[test]
    fn test_render_text_tree() {
        let program = decode("s1@reset:w2.5", &Vocabulary::standard()).unwrap();
        let text = render_program(&program, OutputFormat::Txt).unwrap();
        assert_eq!(
            text,
            "[0] On Upload (upload)\n    [0] SAY s 1\n[1] On Reset (reset)\n    [0] WAIT w 2.5"
        );
    }

    #[test]
    fn test_render_empty_tree() {
        let text = render_program(&plug_program::Program::new(), OutputFormat::Txt).unwrap();
        assert_eq!(text, "(no events)");
    }

    #[test]
    fn test_render_json_tree() {
        let program = decode("@reset:w1", &Vocabulary::standard()).unwrap();
        let json = render_program(&program, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["events"][0]["code"], "reset");
        assert_eq!(value["events"][0]["commands"][0]["label"], "WAIT");
        assert_eq!(value["events"][0]["commands"][0]["argument"], "1");
        assert!(value["events"][0].get("id").is_none());
    }

    #[test]
    fn test_render_labels() {
        let labels = ["On Upload", "On Reset"];
        assert_eq!(
            render_labels(&labels, OutputFormat::Txt).unwrap(),
            "On Upload\nOn Reset"
        );
    }

    #[test]
    fn test_upload_path() {
        assert_eq!(upload_path("/setprog", "s1@reset:w2"), "/setprog?s1@reset:w2");
        assert_eq!(upload_path("/setprog", ""), "/setprog?");
    }
}
