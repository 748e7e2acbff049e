//! Per-manifest validation of raw JSON records.
//!
//! [`Validator::check`] never fails: it returns every defect found in the
//! record and, when there are none, the typed [`Manifest`].

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use luma_core::config::CategoryConfig;
use luma_core::{Category, Checksum, Constraint, Manifest, PackageName, Version, VersionEntry};

use crate::diagnostics::{DiagnosticKind, ValidationError};

/// Package label used in diagnostics when a record has no string `name`.
pub const UNKNOWN_PACKAGE: &str = "<unknown>";

/// Outcome of checking one raw manifest.
#[derive(Debug, Clone)]
pub struct Checked {
    /// The typed manifest; present only when `errors` is empty.
    pub manifest: Option<Manifest>,
    /// Every defect, grouped by version in order of first appearance.
    pub errors: Vec<ValidationError>,
}

impl Checked {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Manifest validator. Holds only the category inference settings.
#[derive(Debug, Clone)]
pub struct Validator {
    core_prefixes: Vec<String>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_config(&CategoryConfig::default())
    }
}

impl Validator {
    pub fn new(core_prefixes: Vec<String>) -> Self {
        Self { core_prefixes }
    }

    pub fn from_config(config: &CategoryConfig) -> Self {
        Self::new(config.core_prefixes.clone())
    }

    /// All diagnostics for one raw manifest record.
    pub fn validate(&self, raw: &Value) -> Vec<ValidationError> {
        self.check(raw).errors
    }

    /// Validate a raw record and, if it is clean, convert it into a [`Manifest`].
    pub fn check(&self, raw: &Value) -> Checked {
        let Some(obj) = raw.as_object() else {
            return Checked {
                manifest: None,
                errors: vec![ValidationError::new(
                    UNKNOWN_PACKAGE,
                    None,
                    "$",
                    DiagnosticKind::Schema,
                    format!("manifest must be an object, found {}", type_name(raw)),
                )],
            };
        };

        let label = obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_PACKAGE)
            .to_string();
        let mut errors = Vec::new();

        let name = match obj.get("name") {
            None => {
                errors.push(schema(&label, "name", "missing required field"));
                None
            }
            Some(Value::String(s)) => match PackageName::parse(s) {
                Ok(name) => Some(name),
                Err(e) => {
                    errors.push(ValidationError::new(
                        &label,
                        None,
                        "name",
                        DiagnosticKind::Parse,
                        e.to_string(),
                    ));
                    None
                }
            },
            Some(other) => {
                errors.push(schema(
                    &label,
                    "name",
                    format!("expected string, found {}", type_name(other)),
                ));
                None
            }
        };

        let raw_entries: &[Value] = match obj.get("versions") {
            None => {
                errors.push(schema(&label, "versions", "missing required field"));
                &[]
            }
            Some(Value::Array(items)) => items,
            Some(other) => {
                errors.push(schema(
                    &label,
                    "versions",
                    format!("expected array, found {}", type_name(other)),
                ));
                &[]
            }
        };

        let mut groups: Vec<(usize, Vec<ValidationError>)> = Vec::new();
        let mut entries = Vec::new();
        let mut first_index: HashMap<Version, usize> = HashMap::new();
        let mut first_label: HashMap<String, usize> = HashMap::new();

        for (index, raw_entry) in raw_entries.iter().enumerate() {
            let mut check = EntryCheck::new(&label, index);
            let (version, entry) = check.run(raw_entry, name.as_ref(), &self.core_prefixes);

            if let Some(version) = version {
                match first_index.get(&version) {
                    Some(&earlier) => check.push(
                        "version",
                        DiagnosticKind::DuplicateVersion,
                        format!("version {version} is already published at versions[{earlier}]"),
                    ),
                    None => {
                        first_index.insert(version, index);
                    }
                }
            }

            let key = match &check.version {
                Some(l) => *first_label.entry(l.clone()).or_insert(index),
                None => index,
            };
            groups.push((key, check.errors));
            entries.extend(entry);
        }

        groups.sort_by_key(|(key, _)| *key);
        errors.extend(groups.into_iter().flat_map(|(_, errs)| errs));

        let manifest = match name {
            Some(name) if errors.is_empty() => match Manifest::from_entries(name, entries) {
                Ok(manifest) => Some(manifest),
                Err(dup) => {
                    errors.push(ValidationError::new(
                        &label,
                        Some(dup.version.clone()),
                        "versions",
                        DiagnosticKind::DuplicateVersion,
                        dup.to_string(),
                    ));
                    None
                }
            },
            _ => None,
        };

        if !errors.is_empty() {
            tracing::debug!("{label}: {} validation error(s)", errors.len());
        }

        Checked { manifest, errors }
    }
}

/// Collects diagnostics for `versions[index]`.
struct EntryCheck<'a> {
    package: &'a str,
    index: usize,
    /// Raw `version` text, used to label diagnostics even when it doesn't parse.
    version: Option<String>,
    errors: Vec<ValidationError>,
}

impl<'a> EntryCheck<'a> {
    fn new(package: &'a str, index: usize) -> Self {
        Self {
            package,
            index,
            version: None,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, key: &str, kind: DiagnosticKind, message: impl Into<String>) {
        self.errors.push(ValidationError::new(
            self.package,
            self.version.clone(),
            format!("versions[{}].{key}", self.index),
            kind,
            message,
        ));
    }

    fn required_str<'v>(&mut self, obj: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
        match obj.get(key) {
            None => {
                self.push(key, DiagnosticKind::Schema, "missing required field");
                None
            }
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                self.push(
                    key,
                    DiagnosticKind::Schema,
                    format!("expected string, found {}", type_name(other)),
                );
                None
            }
        }
    }

    /// Returns the parsed version (if any) for duplicate detection, and the
    /// typed entry when this entry is free of defects.
    fn run(
        &mut self,
        raw: &Value,
        name: Option<&PackageName>,
        core_prefixes: &[String],
    ) -> (Option<Version>, Option<VersionEntry>) {
        let Some(obj) = raw.as_object() else {
            self.errors.push(ValidationError::new(
                self.package,
                None,
                format!("versions[{}]", self.index),
                DiagnosticKind::Schema,
                format!("expected object, found {}", type_name(raw)),
            ));
            return (None, None);
        };
        self.version = obj.get("version").and_then(Value::as_str).map(String::from);

        let version = match self.required_str(obj, "version") {
            Some(s) => match Version::parse(s) {
                Ok(v) => Some(v),
                Err(e) => {
                    self.push("version", DiagnosticKind::Parse, e.to_string());
                    None
                }
            },
            None => None,
        };

        let checksum = match self.required_str(obj, "shasum") {
            Some(s) => match Checksum::parse(s) {
                Ok(c) => Some(c),
                Err(e) => {
                    self.push("shasum", DiagnosticKind::ChecksumFormat, e.to_string());
                    None
                }
            },
            None => None,
        };

        let url = match self.required_str(obj, "url") {
            Some(u) if u.starts_with("http://") || u.starts_with("https://") => Some(u.to_string()),
            Some(u) => {
                self.push(
                    "url",
                    DiagnosticKind::Schema,
                    format!("'{u}' must start with http:// or https://"),
                );
                None
            }
            None => None,
        };

        let published = match self.required_str(obj, "published") {
            Some(p) if !p.trim().is_empty() => Some(p.to_string()),
            Some(_) => {
                self.push("published", DiagnosticKind::Schema, "must not be empty");
                None
            }
            None => None,
        };

        let size = match obj.get("size") {
            None => {
                self.push("size", DiagnosticKind::Schema, "missing required field");
                None
            }
            Some(value) => match value.as_u64() {
                Some(n) if n > 0 => Some(n),
                _ => {
                    self.push(
                        "size",
                        DiagnosticKind::Schema,
                        format!("must be a positive integer, found {value}"),
                    );
                    None
                }
            },
        };

        let category = match obj.get("category") {
            None => name.map(|n| Category::infer(n, core_prefixes)),
            Some(Value::String(given)) => match Category::normalize(given) {
                Some(c) => Some(c),
                None => {
                    self.push(
                        "category",
                        DiagnosticKind::Schema,
                        format!("unknown category '{given}' (expected registry or assets-store)"),
                    );
                    None
                }
            },
            Some(other) => {
                self.push(
                    "category",
                    DiagnosticKind::Schema,
                    format!("expected string, found {}", type_name(other)),
                );
                None
            }
        };

        let engine = self.engine(obj.get("engineVersion"));
        let dependencies = self.dependencies(obj.get("dependencies"));

        let description = match obj.get("description") {
            None => None,
            Some(Value::String(d)) => Some(d.clone()),
            Some(other) => {
                self.push(
                    "description",
                    DiagnosticKind::Schema,
                    format!("expected string, found {}", type_name(other)),
                );
                None
            }
        };

        if !self.errors.is_empty() {
            return (version, None);
        }

        let entry = match (version, checksum, size, url, published, category) {
            (Some(version), Some(checksum), Some(size), Some(url), Some(published), Some(category)) => {
                Some(VersionEntry {
                    version,
                    checksum,
                    size,
                    url,
                    dependencies,
                    engine,
                    category,
                    published,
                    description,
                })
            }
            _ => None,
        };
        (version, entry)
    }

    /// `engineVersion` is either a constraint string or `{"min": X, "max": Y}`,
    /// read as `>=X <=Y`.
    fn engine(&mut self, raw: Option<&Value>) -> Option<Constraint> {
        match raw? {
            Value::String(s) => match Constraint::parse(s) {
                Ok(c) => Some(c),
                Err(e) => {
                    self.push("engineVersion", DiagnosticKind::Parse, e.to_string());
                    None
                }
            },
            Value::Object(range) => {
                if !range.contains_key("min") && !range.contains_key("max") {
                    self.push(
                        "engineVersion",
                        DiagnosticKind::Schema,
                        "engineVersion object must contain 'min' or 'max'",
                    );
                    return None;
                }
                let mut atoms = Vec::new();
                for (key, op) in [("min", ">="), ("max", "<=")] {
                    let Some(bound) = range.get(key) else {
                        continue;
                    };
                    let field = format!("engineVersion.{key}");
                    match bound.as_str().map(Version::parse) {
                        Some(Ok(v)) => atoms.push(format!("{op}{v}")),
                        Some(Err(e)) => self.push(&field, DiagnosticKind::Parse, e.to_string()),
                        None => self.push(
                            &field,
                            DiagnosticKind::Schema,
                            format!("expected version string, found {}", type_name(bound)),
                        ),
                    }
                }
                Constraint::parse(&atoms.join(" ")).ok()
            }
            other => {
                self.push(
                    "engineVersion",
                    DiagnosticKind::Schema,
                    format!(
                        "expected constraint string or range object, found {}",
                        type_name(other)
                    ),
                );
                None
            }
        }
    }

    fn dependencies(&mut self, raw: Option<&Value>) -> BTreeMap<PackageName, Constraint> {
        let mut deps = BTreeMap::new();
        let map = match raw {
            None => return deps,
            Some(Value::Object(map)) => map,
            Some(other) => {
                self.push(
                    "dependencies",
                    DiagnosticKind::Schema,
                    format!("expected object, found {}", type_name(other)),
                );
                return deps;
            }
        };

        for (dep_name, raw_constraint) in map {
            let field = format!("dependencies.{dep_name}");
            let name = match PackageName::parse(dep_name) {
                Ok(n) => Some(n),
                Err(e) => {
                    self.push(&field, DiagnosticKind::Parse, e.to_string());
                    None
                }
            };
            let constraint = match raw_constraint {
                Value::String(s) => match Constraint::parse(s) {
                    Ok(c) => Some(c),
                    Err(e) => {
                        self.push(&field, DiagnosticKind::Parse, e.to_string());
                        None
                    }
                },
                other => {
                    self.push(
                        &field,
                        DiagnosticKind::Schema,
                        format!("expected constraint string, found {}", type_name(other)),
                    );
                    None
                }
            };
            if let (Some(name), Some(constraint)) = (name, constraint) {
                deps.insert(name, constraint);
            }
        }
        deps
    }
}

fn schema(package: &str, field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::new(package, None, field, DiagnosticKind::Schema, message)
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
