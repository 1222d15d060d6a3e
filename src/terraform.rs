#![deny(missing_docs)]

//! # Terraform Resource Generation
//!
//! Renders provisioning declarations for each content-type object: a
//! `amplience_content_type_schema` resource, a matching
//! `amplience_content_type` resource, and repository assignment resources
//! when repositories are configured. The generator is an explicit builder
//! value threaded through the visit, and rendering returns the final HCL
//! text; writing it to disk is the caller's concern.

use crate::error::{AppError, AppResult};
use crate::schema::markers::{find_marker, kinds, names};
use crate::schema::models::{ObjectDefinition, SchemaDocument};
use crate::schema_generator::type_uri;
use crate::validation::validate_document;
use heck::{ToKebabCase, ToSnakeCase, ToTitleCase};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A content preview environment attached to generated content types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visualization {
    /// Display label; values starting with `var.`/`local.`/`visualization`
    /// render as raw expressions.
    pub label: String,
    /// Templated preview URI; same expression rules as `label`.
    pub templated_uri: String,
    /// Whether this visualization is the default. At most one, and it may
    /// not also carry `for_each`.
    #[serde(default)]
    pub default: bool,
    /// Optional expression expanding this entry into a `dynamic` block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_each: Option<String>,
}

impl Visualization {
    /// Creates a static visualization entry.
    pub fn new(label: impl Into<String>, templated_uri: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            templated_uri: templated_uri.into(),
            default: false,
            for_each: None,
        }
    }

    /// Marks this entry as the default visualization.
    pub fn with_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Expands this entry over a collection expression.
    pub fn with_for_each(mut self, expression: impl Into<String>) -> Self {
        self.for_each = Some(expression.into());
        self
    }
}

/// Configuration for Terraform resource generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerraformConfig {
    /// The hostname used for content-type URIs.
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Optional suffix matching the generated schema file stems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_suffix: Option<String>,
    /// Content repositories by name, values either ids or expressions.
    #[serde(default)]
    pub content_repositories: IndexMap<String, String>,
    /// Slot repositories by name.
    #[serde(default)]
    pub slot_repositories: IndexMap<String, String>,
    /// Visualizations attached to types opting in via the marker.
    #[serde(default)]
    pub visualization: Vec<Visualization>,
    /// Whether to emit the `terraform.required_providers` block.
    #[serde(default = "default_true")]
    pub add_required_provider: bool,
}

fn default_hostname() -> String {
    crate::config::DEFAULT_HOSTNAME.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            schema_suffix: None,
            content_repositories: IndexMap::new(),
            slot_repositories: IndexMap::new(),
            visualization: Vec::new(),
            add_required_provider: true,
        }
    }
}

impl TerraformConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hostname.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Sets the schema file-stem suffix.
    pub fn with_schema_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.schema_suffix = Some(suffix.into());
        self
    }

    /// Adds a content repository.
    pub fn with_content_repository(
        mut self,
        name: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        self.content_repositories.insert(name.into(), id.into());
        self
    }

    /// Adds a slot repository.
    pub fn with_slot_repository(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.slot_repositories.insert(name.into(), id.into());
        self
    }

    /// Adds a visualization entry.
    pub fn with_visualization(mut self, visualization: Visualization) -> Self {
        self.visualization.push(visualization);
        self
    }

    /// Disables the required-provider block.
    pub fn without_required_provider(mut self) -> Self {
        self.add_required_provider = false;
        self
    }

    /// Checks the visualization rules: at most one `for_each` entry, at
    /// most one default, and the default may not also be a `for_each`
    /// entry.
    pub fn validate(&self) -> AppResult<()> {
        let for_each_count = self
            .visualization
            .iter()
            .filter(|v| v.for_each.is_some())
            .count();
        if for_each_count > 1 {
            return Err(AppError::Config(
                "only 1 visualization may carry a for_each property".into(),
            ));
        }

        let default_count = self.visualization.iter().filter(|v| v.default).count();
        if default_count > 1
            || self
                .visualization
                .iter()
                .any(|v| v.default && v.for_each.is_some())
        {
            return Err(AppError::Config(
                "only 1 visualization may be the default, and it may not carry for_each".into(),
            ));
        }

        Ok(())
    }
}

/// An HCL attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum TfValue {
    /// A quoted string.
    Str(String),
    /// A boolean literal.
    Bool(bool),
    /// An integer literal.
    Int(i64),
    /// A raw expression rendered verbatim (`var.x`, resource addresses).
    Expr(String),
    /// A function call (`file(...)`).
    Call(String, Vec<TfValue>),
    /// A list of values.
    List(Vec<TfValue>),
    /// A multi-line object value.
    Object(Vec<(String, TfValue)>),
}

impl TfValue {
    fn render(&self, indent: usize) -> String {
        match self {
            TfValue::Str(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            TfValue::Bool(b) => b.to_string(),
            TfValue::Int(n) => n.to_string(),
            TfValue::Expr(e) => e.clone(),
            TfValue::Call(name, args) => {
                let rendered: Vec<String> = args.iter().map(|arg| arg.render(indent)).collect();
                format!("{}({})", name, rendered.join(", "))
            }
            TfValue::List(values) => {
                let rendered: Vec<String> = values.iter().map(|v| v.render(indent)).collect();
                format!("[{}]", rendered.join(", "))
            }
            TfValue::Object(entries) => {
                let pad = "  ".repeat(indent + 1);
                let mut out = String::from("{\n");
                for (name, value) in entries {
                    out.push_str(&format!("{}{} = {}\n", pad, name, value.render(indent + 1)));
                }
                out.push_str(&format!("{}}}", "  ".repeat(indent)));
                out
            }
        }
    }
}

/// An entry inside a block body.
#[derive(Debug, Clone, PartialEq)]
enum BodyItem {
    Attribute(String, TfValue),
    Block(TfBlock),
}

/// A renderable HCL block (`resource`, `data`, `terraform`, or a nested
/// block like `icon`).
#[derive(Debug, Clone, PartialEq)]
pub struct TfBlock {
    kind: String,
    labels: Vec<String>,
    body: Vec<BodyItem>,
}

impl TfBlock {
    /// Creates a bare block (`terraform`, `icon`, ...).
    pub fn named(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            labels: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Creates a `resource` block with type and name labels.
    pub fn resource(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::named("resource")
            .with_label(resource_type)
            .with_label(name)
    }

    /// Creates a `data` block with type and name labels.
    pub fn data(data_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::named("data").with_label(data_type).with_label(name)
    }

    /// Adds a quoted label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: TfValue) -> Self {
        self.body.push(BodyItem::Attribute(name.into(), value));
        self
    }

    /// Adds a nested block.
    pub fn with_nested(mut self, block: TfBlock) -> Self {
        self.body.push(BodyItem::Block(block));
        self
    }

    fn render(&self, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        out.push_str(&pad);
        out.push_str(&self.kind);
        for label in &self.labels {
            out.push_str(&format!(" \"{}\"", label));
        }
        out.push_str(" {\n");
        for item in &self.body {
            match item {
                BodyItem::Attribute(name, value) => {
                    out.push_str(&format!(
                        "{}  {} = {}\n",
                        pad,
                        name,
                        value.render(indent + 1)
                    ));
                }
                BodyItem::Block(block) => block.render(indent + 1, out),
            }
        }
        out.push_str(&pad);
        out.push_str("}\n");
    }
}

/// Accumulates blocks and renders the final configuration text.
///
/// The value is threaded functionally through the object-type visit; it
/// never aliases shared mutable state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerraformGenerator {
    blocks: Vec<TfBlock>,
}

impl TerraformGenerator {
    /// Creates an empty generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a top-level block.
    pub fn with_block(mut self, block: TfBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Renders all accumulated blocks, separated by blank lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            block.render(0, &mut out);
        }
        out
    }
}

/// Validates the configuration and the schema document, then renders the
/// provisioning declarations for every content-type object type.
pub fn generate_resources(schema: &SchemaDocument, config: &TerraformConfig) -> AppResult<String> {
    config.validate()?;
    validate_document(schema)?;

    let mut tfg = TerraformGenerator::new();
    if config.add_required_provider {
        tfg = tfg.with_block(required_provider_block());
    }

    // Repositories surface as data sources so assignments can reference
    // them by address.
    for (name, id) in &config.content_repositories {
        tfg = tfg.with_block(repository_data(name, id));
    }
    for (name, id) in &config.slot_repositories {
        tfg = tfg.with_block(repository_data(name, id));
    }

    for ty in schema.content_types() {
        tfg = visit_object_type(tfg, ty, config);
    }

    Ok(tfg.render())
}

fn required_provider_block() -> TfBlock {
    TfBlock::named("terraform").with_nested(TfBlock::named("required_providers").with_attribute(
        "amplience",
        TfValue::Object(vec![("source".into(), TfValue::Str("labd/amplience".into()))]),
    ))
}

fn repository_data(name: &str, id: &str) -> TfBlock {
    TfBlock::data("amplience_content_repository", name.to_snake_case())
        .with_attribute("id", maybe_expr(id))
}

/// Values starting with a known expression prefix render verbatim rather
/// than quoted.
fn maybe_expr(value: &str) -> TfValue {
    maybe_expr_with(value, &[])
}

fn maybe_expr_with(value: &str, extra_prefixes: &[&str]) -> TfValue {
    let is_expr = ["var.", "local."]
        .iter()
        .chain(extra_prefixes)
        .any(|prefix| value.starts_with(prefix));
    if is_expr {
        TfValue::Expr(value.to_string())
    } else {
        TfValue::Str(value.to_string())
    }
}

/// Adds the schema, content-type and assignment resources for one object
/// type to the generator.
fn visit_object_type(
    tfg: TerraformGenerator,
    ty: &ObjectDefinition,
    config: &TerraformConfig,
) -> TerraformGenerator {
    let Some(marker) = find_marker(ty, names::CONTENT_TYPE) else {
        return tfg;
    };

    let name = ty.name.to_snake_case();
    let uri = type_uri(&ty.name, &config.hostname);
    let is_slot = marker.enum_argument("kind") == Some(kinds::SLOT);
    let auto_sync = marker.bool_argument("autoSync").unwrap_or(true);

    let stem = match &config.schema_suffix {
        Some(suffix) => format!("{}-{}", ty.name.to_kebab_case(), suffix),
        None => ty.name.to_kebab_case(),
    };

    let schema_resource = TfBlock::resource("amplience_content_type_schema", name.as_str())
        .with_attribute(
            "body",
            TfValue::Call(
                "file".into(),
                vec![TfValue::Str(format!(
                    "${{path.module}}/schemas/{}.json",
                    stem
                ))],
            ),
        )
        .with_attribute("schema_id", TfValue::Str(uri.clone()))
        .with_attribute(
            "validation_level",
            TfValue::Str(if is_slot { "SLOT" } else { "CONTENT_TYPE" }.into()),
        )
        .with_attribute("auto_sync", TfValue::Bool(auto_sync));

    let mut content_type = TfBlock::resource("amplience_content_type", name.as_str())
        .with_attribute("content_type_uri", TfValue::Str(uri))
        .with_attribute("label", TfValue::Str(ty.name.to_title_case()));

    if let Some(icon) = marker.string_argument("icon") {
        content_type = content_type.with_nested(
            TfBlock::named("icon")
                .with_attribute("size", TfValue::Int(256))
                .with_attribute("url", TfValue::Str(icon.into())),
        );
    }

    content_type = content_type.with_attribute("status", TfValue::Str("ACTIVE".into()));

    if marker.bool_argument("visualizations").unwrap_or(false) {
        for visualization in &config.visualization {
            content_type = content_type.with_nested(visualization_block(visualization));
        }
    }

    content_type = content_type.with_attribute(
        "depends_on",
        TfValue::List(vec![TfValue::Expr(format!(
            "amplience_content_type_schema.{}",
            name
        ))]),
    );

    let mut tfg = tfg.with_block(schema_resource).with_block(content_type);

    let repositories = if is_slot {
        &config.slot_repositories
    } else {
        &config.content_repositories
    };
    // The repository argument selects by name; fall back to the first
    // configured repository.
    let wanted = marker.string_argument("repository");
    let repository = wanted
        .filter(|name| repositories.contains_key(*name))
        .or_else(|| repositories.keys().next().map(String::as_str));
    if let Some(repository) = repository {
        tfg = tfg.with_block(
            TfBlock::resource("amplience_content_type_assignment", name.as_str())
                .with_attribute(
                    "content_type_id",
                    TfValue::Expr(format!("amplience_content_type.{}.id", name)),
                )
                .with_attribute(
                    "repository_id",
                    TfValue::Expr(format!(
                        "data.amplience_content_repository.{}.id",
                        repository.to_snake_case()
                    )),
                ),
        );
    }

    tfg
}

fn visualization_block(visualization: &Visualization) -> TfBlock {
    let content = |block: TfBlock| {
        block
            .with_attribute(
                "label",
                maybe_expr_with(&visualization.label, &["visualization"]),
            )
            .with_attribute(
                "templated_uri",
                maybe_expr_with(&visualization.templated_uri, &["visualization"]),
            )
            .with_attribute("default", TfValue::Bool(visualization.default))
    };

    match &visualization.for_each {
        Some(expression) => TfBlock::named("dynamic")
            .with_label("visualization")
            .with_attribute("for_each", TfValue::Expr(expression.clone()))
            .with_nested(content(TfBlock::named("content"))),
        None => content(TfBlock::named("visualization")),
    }
}
