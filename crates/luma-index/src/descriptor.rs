//! Author-side `package.json` descriptor checks.

use serde_json::{Map, Value};

use luma_core::{Constraint, PackageName, Version};

use crate::diagnostics::{DiagnosticKind, ValidationError};
use crate::validator::{type_name, UNKNOWN_PACKAGE};

/// Check a parsed `package.json` descriptor, returning every defect found.
pub fn validate_descriptor(raw: &Value) -> Vec<ValidationError> {
    let Some(obj) = raw.as_object() else {
        return vec![ValidationError::new(
            UNKNOWN_PACKAGE,
            None,
            "$",
            DiagnosticKind::Schema,
            format!("descriptor must be an object, found {}", type_name(raw)),
        )];
    };

    let mut report = Report {
        package: obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_PACKAGE)
            .to_string(),
        version: obj.get("version").and_then(Value::as_str).map(String::from),
        errors: Vec::new(),
    };

    if let Some(name) = report.string(obj, "name", true) {
        if let Err(e) = PackageName::parse(name) {
            report.push("name", DiagnosticKind::Parse, e.to_string());
        }
    }
    if let Some(version) = report.string(obj, "version", true) {
        if let Err(e) = Version::parse(version) {
            report.push("version", DiagnosticKind::Parse, e.to_string());
        }
    }
    report.string(obj, "displayName", true);
    report.string(obj, "description", true);

    match obj.get("engine") {
        None => report.push("engine", DiagnosticKind::Schema, "missing required field"),
        Some(Value::Object(engine)) => match engine.get("luma") {
            None => report.push("engine.luma", DiagnosticKind::Schema, "missing required field"),
            Some(Value::String(c)) => {
                if let Err(e) = Constraint::parse(c) {
                    report.push("engine.luma", DiagnosticKind::Parse, e.to_string());
                }
            }
            Some(other) => report.mistyped("engine.luma", "string", other),
        },
        Some(other) => report.mistyped("engine", "object", other),
    }

    match obj.get("author") {
        None | Some(Value::String(_)) => {}
        Some(Value::Object(author)) => {
            if !author.contains_key("name") {
                report.push(
                    "author.name",
                    DiagnosticKind::Schema,
                    "required when author is an object",
                );
            }
            if let Some(url) = author.get("url") {
                report.http_url("author.url", url);
            }
        }
        Some(other) => report.mistyped("author", "string or object", other),
    }

    match obj.get("dependencies") {
        None => {}
        Some(Value::Object(deps)) => {
            for (dep, constraint) in deps {
                let field = format!("dependencies.{dep}");
                if let Err(e) = PackageName::parse(dep) {
                    report.push(&field, DiagnosticKind::Parse, e.to_string());
                }
                match constraint {
                    Value::String(c) => {
                        if let Err(e) = Constraint::parse(c) {
                            report.push(&field, DiagnosticKind::Parse, e.to_string());
                        }
                    }
                    other => report.mistyped(&field, "constraint string", other),
                }
            }
        }
        Some(other) => report.mistyped("dependencies", "object", other),
    }

    if let Some(homepage) = obj.get("homepage") {
        report.http_url("homepage", homepage);
    }

    report.string_array(obj, "keywords");
    report.string_array(obj, "postInstall");

    match obj.get("samples") {
        None => {}
        Some(Value::Array(samples)) => {
            for (i, sample) in samples.iter().enumerate() {
                let field = format!("samples[{i}]");
                match sample {
                    Value::Object(sample) => {
                        for key in ["displayName", "path"] {
                            if !sample.contains_key(key) {
                                report.push(
                                    &format!("{field}.{key}"),
                                    DiagnosticKind::Schema,
                                    "missing required field",
                                );
                            }
                        }
                    }
                    other => report.mistyped(&field, "object", other),
                }
            }
        }
        Some(other) => report.mistyped("samples", "array", other),
    }

    report.errors
}

struct Report {
    package: String,
    version: Option<String>,
    errors: Vec<ValidationError>,
}

impl Report {
    fn push(&mut self, field: &str, kind: DiagnosticKind, message: impl Into<String>) {
        self.errors.push(ValidationError::new(
            &self.package,
            self.version.clone(),
            field,
            kind,
            message,
        ));
    }

    fn mistyped(&mut self, field: &str, expected: &str, found: &Value) {
        self.push(
            field,
            DiagnosticKind::Schema,
            format!("expected {expected}, found {}", type_name(found)),
        );
    }

    fn string<'v>(&mut self, obj: &'v Map<String, Value>, key: &str, required: bool) -> Option<&'v str> {
        match obj.get(key) {
            None if required => {
                self.push(key, DiagnosticKind::Schema, "missing required field");
                None
            }
            None => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                self.mistyped(key, "string", other);
                None
            }
        }
    }

    fn http_url(&mut self, field: &str, value: &Value) {
        match value.as_str() {
            Some(u) if u.starts_with("http://") || u.starts_with("https://") => {}
            _ => self.push(field, DiagnosticKind::Schema, "must be an http:// or https:// URL"),
        }
    }

    fn string_array(&mut self, obj: &Map<String, Value>, key: &str) {
        match obj.get(key) {
            None => {}
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        self.mistyped(&format!("{key}[{i}]"), "string", item);
                    }
                }
            }
            Some(other) => self.mistyped(key, "array", other),
        }
    }
}
