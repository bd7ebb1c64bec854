//! Schema validation for manifest sections.
//!
//! Schemas are a small subset of JSON Schema (types, `required`,
//! `properties`, `patternProperties`, `additionalProperties`, `minItems`,
//! `oneOf`, `anyOf`) encoded as [`Node`] trees. Violations are reported as
//! human-readable strings, prefixed with the dotted path of the offending
//! value when it is not the root: `[dependencies.foo] 1 is not of type
//! 'string'`.

use std::sync::LazyLock;

use miette::Diagnostic as MietteDiagnostic;
use regex::Regex;
use thiserror::Error;

/// Name of the `[tool.poetry]` schema.
pub const POETRY_SCHEMA: &str = "poetry-schema";

/// Error raised for malformed validation requests.
#[derive(Debug, Error, MietteDiagnostic, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Schema {0} does not exist.")]
    #[diagnostic(code(poetry_factory::schema::unknown))]
    UnknownSchema(String),
}

/// Validate `obj` against the schema named `schema_name`.
pub fn validate_object(obj: &toml::Table, schema_name: &str) -> Result<Vec<String>, SchemaError> {
    let schema = match schema_name {
        POETRY_SCHEMA => &*POETRY,
        _ => return Err(SchemaError::UnknownSchema(schema_name.to_string())),
    };

    let mut violations = Vec::new();
    let mut path = Vec::new();
    schema.check_table(obj, &mut path, &mut violations);

    Ok(violations
        .into_iter()
        .map(|(path, message)| {
            if path.is_empty() {
                message
            } else {
                format!("[{}] {}", path.join("."), message)
            }
        })
        .collect())
}

type Violation = (Vec<String>, String);

/// Key pattern for `patternProperties`.
#[derive(Debug, Clone, Copy)]
enum KeyPattern {
    /// `^[a-zA-Z-_.0-9]+$`
    Name,
    /// `^.+$`
    NonEmpty,
}

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\-_.0-9]+$").expect("name pattern is valid"));

impl KeyPattern {
    fn matches(self, key: &str) -> bool {
        match self {
            KeyPattern::Name => NAME_RE.is_match(key),
            KeyPattern::NonEmpty => !key.is_empty(),
        }
    }
}

/// Schema node.
#[derive(Debug, Clone)]
enum Node {
    Any,
    String,
    Boolean,
    Array {
        items: Box<Node>,
        min_items: usize,
    },
    Object(ObjectNode),
    OneOf(Vec<Node>),
    AnyOf(Vec<Node>),
}

#[derive(Debug, Clone, Default)]
struct ObjectNode {
    required: Vec<&'static str>,
    properties: Vec<(&'static str, Node)>,
    patterns: Vec<(KeyPattern, Node)>,
    closed: bool,
}

impl ObjectNode {
    fn required(mut self, keys: &[&'static str]) -> Self {
        self.required.extend_from_slice(keys);
        self
    }

    fn property(mut self, key: &'static str, node: Node) -> Self {
        self.properties.push((key, node));
        self
    }

    fn pattern(mut self, pattern: KeyPattern, node: Node) -> Self {
        self.patterns.push((pattern, node));
        self
    }

    /// Disallow keys matched by neither `properties` nor `patterns`.
    fn closed(mut self) -> Node {
        self.closed = true;
        Node::Object(self)
    }

    fn open(self) -> Node {
        Node::Object(self)
    }
}

fn object() -> ObjectNode {
    ObjectNode::default()
}

fn array_of(items: Node) -> Node {
    Node::Array {
        items: Box::new(items),
        min_items: 0,
    }
}

fn strings() -> Node {
    array_of(Node::String)
}

impl Node {
    fn type_name(&self) -> Option<&'static str> {
        match self {
            Node::String => Some("string"),
            Node::Boolean => Some("boolean"),
            Node::Array { .. } => Some("array"),
            Node::Object(_) => Some("object"),
            Node::Any | Node::OneOf(_) | Node::AnyOf(_) => None,
        }
    }

    fn is_valid(&self, value: &toml::Value) -> bool {
        let mut violations = Vec::new();
        self.check(value, &mut Vec::new(), &mut violations);
        violations.is_empty()
    }

    fn check(&self, value: &toml::Value, path: &mut Vec<String>, out: &mut Vec<Violation>) {
        match (self, value) {
            (Node::Any, _) => {}
            (Node::String, toml::Value::String(_)) => {}
            (Node::Boolean, toml::Value::Boolean(_)) => {}
            (Node::Array { items, min_items }, toml::Value::Array(values)) => {
                if values.len() < *min_items {
                    out.push((path.clone(), format!("{} is too short", describe(value))));
                }
                for (index, item) in values.iter().enumerate() {
                    path.push(index.to_string());
                    items.check(item, path, out);
                    path.pop();
                }
            }
            (Node::Object(node), toml::Value::Table(table)) => {
                node.check(table, path, out);
            }
            (Node::OneOf(options), _) => {
                let matched = options.iter().filter(|n| n.is_valid(value)).count();
                if matched == 0 {
                    out.push((
                        path.clone(),
                        format!("{} is not valid under any of the given schemas", describe(value)),
                    ));
                } else if matched > 1 {
                    out.push((
                        path.clone(),
                        format!("{} is valid under each of several given schemas", describe(value)),
                    ));
                }
            }
            (Node::AnyOf(options), _) => {
                if !options.iter().any(|n| n.is_valid(value)) {
                    out.push((
                        path.clone(),
                        format!("{} is not valid under any of the given schemas", describe(value)),
                    ));
                }
            }
            (expected, _) => {
                let type_name = expected.type_name().unwrap_or("value");
                out.push((
                    path.clone(),
                    format!("{} is not of type '{}'", describe(value), type_name),
                ));
            }
        }
    }

    fn check_table(&self, table: &toml::Table, path: &mut Vec<String>, out: &mut Vec<Violation>) {
        match self {
            Node::Object(node) => node.check(table, path, out),
            other => other.check(&toml::Value::Table(table.clone()), path, out),
        }
    }
}

impl ObjectNode {
    fn check(&self, table: &toml::Table, path: &mut Vec<String>, out: &mut Vec<Violation>) {
        for key in &self.required {
            if !table.contains_key(*key) {
                out.push((path.clone(), format!("'{}' is a required property", key)));
            }
        }

        if self.closed {
            let unexpected: Vec<&str> = table
                .keys()
                .map(String::as_str)
                .filter(|key| {
                    !self.properties.iter().any(|(name, _)| name == key)
                        && !self.patterns.iter().any(|(pattern, _)| pattern.matches(key))
                })
                .collect();

            if !unexpected.is_empty() {
                let verb = if unexpected.len() == 1 { "was" } else { "were" };
                out.push((
                    path.clone(),
                    format!(
                        "Additional properties are not allowed ('{}' {} unexpected)",
                        unexpected.join("', '"),
                        verb
                    ),
                ));
            }
        }

        for (key, value) in table {
            path.push(key.clone());
            for (name, node) in &self.properties {
                if name == key {
                    node.check(value, path, out);
                }
            }
            for (pattern, node) in &self.patterns {
                if pattern.matches(key) {
                    node.check(value, path, out);
                }
            }
            path.pop();
        }
    }
}

/// Render a value for messages.
fn describe(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

// =============================================================================
// poetry-schema
// =============================================================================

static POETRY: LazyLock<Node> = LazyLock::new(poetry_schema);

/// Keys shared by every table-shaped dependency.
fn dependency_table() -> ObjectNode {
    object()
        .property("python", Node::String)
        .property("platform", Node::String)
        .property("markers", Node::String)
        .property("allow-prereleases", Node::Boolean)
        .property("allows-prereleases", Node::Boolean)
        .property("optional", Node::Boolean)
        .property("extras", strings())
}

fn long_dependency() -> Node {
    dependency_table()
        .required(&["version"])
        .property("version", Node::String)
        .property("source", Node::String)
        .closed()
}

fn git_dependency() -> Node {
    dependency_table()
        .required(&["git"])
        .property("git", Node::String)
        .property("branch", Node::String)
        .property("tag", Node::String)
        .property("rev", Node::String)
        .property("develop", Node::Boolean)
        .closed()
}

fn file_dependency() -> Node {
    dependency_table()
        .required(&["file"])
        .property("file", Node::String)
        .closed()
}

fn path_dependency() -> Node {
    dependency_table()
        .required(&["path"])
        .property("path", Node::String)
        .property("develop", Node::Boolean)
        .closed()
}

fn url_dependency() -> Node {
    dependency_table()
        .required(&["url"])
        .property("url", Node::String)
        .closed()
}

fn single_dependency() -> Vec<Node> {
    vec![
        Node::String,
        long_dependency(),
        git_dependency(),
        file_dependency(),
        path_dependency(),
        url_dependency(),
    ]
}

fn dependency() -> Node {
    let mut options = single_dependency();
    options.push(Node::Array {
        items: Box::new(Node::OneOf(single_dependency())),
        min_items: 1,
    });
    Node::OneOf(options)
}

fn dependencies() -> Node {
    object()
        .property("python", Node::String)
        .pattern(KeyPattern::Name, dependency())
        .open()
}

fn format() -> Node {
    Node::OneOf(vec![Node::String, strings()])
}

fn poetry_schema() -> Node {
    let include_rule = object()
        .required(&["path"])
        .property("path", Node::String)
        .property("format", format())
        .closed();

    let package_rule = object()
        .required(&["include"])
        .property("include", Node::String)
        .property("from", Node::String)
        .property("format", format())
        .closed();

    let script = Node::OneOf(vec![
        Node::String,
        object()
            .required(&["callable"])
            .property("callable", Node::String)
            .property("extras", strings())
            .closed(),
    ]);

    let source = object()
        .required(&["name", "url"])
        .property("name", Node::String)
        .property("url", Node::String)
        .property("default", Node::Boolean)
        .property("secondary", Node::Boolean)
        .closed();

    object()
        .required(&["name", "version", "authors"])
        .property("name", Node::String)
        .property("version", Node::String)
        .property("description", Node::String)
        .property("keywords", strings())
        .property("homepage", Node::String)
        .property("repository", Node::String)
        .property("documentation", Node::String)
        .property("license", Node::String)
        .property("authors", strings())
        .property("maintainers", strings())
        .property("readme", Node::String)
        .property("classifiers", strings())
        .property("platform", Node::String)
        .property("packages", array_of(package_rule))
        .property("include", array_of(Node::AnyOf(vec![Node::String, include_rule])))
        .property("exclude", array_of(Node::Any))
        .property("dependencies", dependencies())
        .property("dev-dependencies", dependencies())
        .property(
            "extras",
            object().pattern(KeyPattern::Name, strings()).open(),
        )
        .property(
            "build",
            Node::AnyOf(vec![Node::String, object().open()]),
        )
        .property("source", array_of(source))
        .property(
            "scripts",
            object().pattern(KeyPattern::Name, script).open(),
        )
        .property("plugins", object().open())
        .property(
            "urls",
            object().pattern(KeyPattern::NonEmpty, Node::String).open(),
        )
        .closed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(content: &str) -> toml::Table {
        toml::from_str(content).unwrap()
    }

    fn errors(content: &str) -> Vec<String> {
        validate_object(&section(content), POETRY_SCHEMA).unwrap()
    }

    const MINIMAL: &str = r#"
name = "demo"
version = "1.0.0"
authors = ["Jane Doe <jane@example.com>"]
"#;

    #[test]
    fn test_minimal_section_is_valid() {
        assert!(errors(MINIMAL).is_empty());
    }

    #[test]
    fn test_unknown_schema() {
        let result = validate_object(&section(MINIMAL), "cargo-schema");
        assert_eq!(
            result,
            Err(SchemaError::UnknownSchema("cargo-schema".to_string()))
        );
    }

    #[test]
    fn test_missing_required_keys() {
        let errors = errors(
            r#"
name = "demo"
"#,
        );
        assert_eq!(
            errors,
            vec![
                "'version' is a required property".to_string(),
                "'authors' is a required property".to_string(),
            ]
        );
    }

    #[test]
    fn test_wrong_type_has_path() {
        let errors = errors(
            r#"
name = "demo"
version = 1
authors = ["Jane"]
"#,
        );
        assert_eq!(errors, vec!["[version] 1 is not of type 'string'".to_string()]);
    }

    #[test]
    fn test_additional_properties() {
        let errors = errors(&format!("{}\nflavour = \"vanilla\"\n", MINIMAL));
        assert_eq!(
            errors,
            vec!["Additional properties are not allowed ('flavour' was unexpected)".to_string()]
        );
    }

    #[test]
    fn test_dependency_shapes() {
        let errors = errors(&format!(
            r#"{}
[dependencies]
python = "^3.8"
requests = "^2.0"
black = ["^20.0", {{ version = "^21.0", python = "^3.9" }}]
mylib = {{ path = "../mylib", develop = true }}
legacy = {{ version = "1.0", allows-prereleases = true }}
pendulum = {{ git = "https://github.com/sdispater/pendulum.git", branch = "master" }}
"#,
            MINIMAL
        ));
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_invalid_dependency() {
        let errors = errors(&format!(
            r#"{}
[dependencies]
requests = {{ flavour = "vanilla" }}
"#,
            MINIMAL
        ));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("[dependencies.requests] "));
        assert!(errors[0].ends_with("is not valid under any of the given schemas"));
    }

    #[test]
    fn test_empty_multiple_constraints() {
        let errors = errors(&format!("{}\n[dependencies]\nblack = []\n", MINIMAL));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("[dependencies.black]"));
    }

    #[test]
    fn test_include_and_build() {
        let errors = errors(&format!(
            r#"{}
build = "build.py"
include = ["README.md", {{ path = "data/*", format = "sdist" }}]
exclude = ["tests"]
packages = [{{ include = "demo", from = "src" }}]
"#,
            MINIMAL
        ));
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_include_rule_requires_path() {
        let errors = errors(&format!(
            "{}\ninclude = [{{ format = \"sdist\" }}]\n",
            MINIMAL
        ));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("[include.0]"));
    }

    #[test]
    fn test_scripts_and_extras() {
        let errors = errors(&format!(
            r#"{}
[extras]
cli = ["click"]

[scripts]
demo = "demo.cli:main"
fancy = {{ callable = "demo.cli:fancy", extras = ["cli"] }}
"#,
            MINIMAL
        ));
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_extras_must_be_string_lists() {
        let errors = errors(&format!("{}\n[extras]\ncli = \"click\"\n", MINIMAL));
        assert_eq!(errors, vec!["[extras.cli] 'click' is not of type 'array'".to_string()]);
    }
}
