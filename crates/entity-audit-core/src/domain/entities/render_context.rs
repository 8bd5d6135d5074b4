use std::collections::BTreeMap;

use chrono::Datelike;

use crate::domain::{entities::project::ProjectConfig, strategy::AuditFlags};

/// Values substituted into the shared audit artifact templates.
///
/// Placeholders are written `{{NAME}}`. Available names:
///
/// | Name | Example |
/// |------|---------|
/// | `PACKAGE_NAME` | `com.mycompany.myapp` |
/// | `AUDIT_FRAMEWORK` | `javers` |
/// | `AUDIT_FRAMEWORK_CUSTOM` | `true` |
/// | `AUDIT_FRAMEWORK_JAVERS` | `false` |
/// | `AUDIT_PAGE` | `true` |
/// | `TABLE_PREFIX` | `jhi` |
/// | `YEAR` | `2026` |
#[derive(Debug, Clone)]
pub struct RenderContext {
    package_name: String,
    variables: BTreeMap<&'static str, String>,
}

impl RenderContext {
    pub fn new(project: &ProjectConfig, flags: &AuditFlags) -> Self {
        let package_name = project.package_name().to_owned();
        let variables = BTreeMap::from([
            ("PACKAGE_NAME", package_name.clone()),
            ("AUDIT_FRAMEWORK", flags.framework.to_string()),
            ("AUDIT_FRAMEWORK_CUSTOM", flags.custom.to_string()),
            ("AUDIT_FRAMEWORK_JAVERS", flags.javers.to_string()),
            ("AUDIT_PAGE", flags.audit_page.to_string()),
            ("TABLE_PREFIX", project.table_prefix()),
            ("YEAR", chrono::Utc::now().year().to_string()),
        ]);
        Self {
            package_name,
            variables,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Substitute every known `{{NAME}}`; unknown or unterminated
    /// placeholders are copied through untouched.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            match after.find("}}") {
                Some(close) => {
                    let name = &after[..close];
                    match self.get(name) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(name);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[close + 2..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Lower snake case, splitting on separators, on `aB` and before the last
/// capital of an acronym (`HTTPRequest` is `http_request`).
pub(crate) fn to_snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary =
                prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    if out.ends_with('_') {
        out.pop();
    }
    out
}
