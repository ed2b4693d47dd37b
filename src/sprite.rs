use crate::block::RenderMode;
use crate::script::Script;
use crate::translator::{BuildContext, TranslateError};
use crate::xml;
use std::collections::HashSet;
use xmltree::Element;

/// Upper bound on underscores appended while resolving a name collision.
pub const MAX_NAME_SUFFIX: usize = 64;

#[derive(Debug, Clone)]
pub struct Sprite {
    name: String,
    declared_name: String,
    scripts: Vec<Script>,
}

impl Sprite {
    pub fn new(name: impl Into<String>, declared_name: impl Into<String>, scripts: Vec<Script>) -> Self {
        Self {
            name: name.into(),
            declared_name: declared_name.into(),
            scripts,
        }
    }

    /// Builds the sprite's header scripts. `ctx.owner` must already hold the
    /// uniquified identifier.
    pub(crate) fn from_node(
        node: &Element,
        declared_name: &str,
        ctx: &mut BuildContext<'_>,
    ) -> Result<Self, TranslateError> {
        let mut scripts = Vec::new();
        for script_node in xml::find(node, "scripts/script") {
            let script = Script::from_node(script_node, ctx, true)?;
            if script.blocks().is_empty() {
                let message = format!("Skipping empty script of sprite '{}'.", declared_name);
                ctx.warn(message);
                continue;
            }
            scripts.push(script);
        }
        Ok(Self::new(ctx.owner, declared_name, scripts))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    pub fn render(&self) -> String {
        let scripts = self
            .scripts
            .iter()
            .map(|script| script.render(RenderMode::Statement))
            .collect::<Vec<_>>();
        format!("{} = new Sprite();\n\n{}", self.name, scripts.join("\n\n"))
    }
}

/// Lowercases `declared` and camel-cases its whitespace-separated words.
/// Lowercasing keeps sprite names clear of the runtime's capitalized globals.
pub fn to_valid_js_name(declared: &str) -> String {
    let lowered = declared.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for (i, word) in lowered.split_whitespace().enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    let mut name = out
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect::<String>();
    if name.is_empty() {
        name.push_str("sprite");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if reserved_names().contains(name.as_str()) {
        name.push('_');
    }
    name
}

/// Appends underscores to `base` until `is_taken` rejects it.
pub fn uniquify<F>(base: &str, is_taken: F) -> Result<String, TranslateError>
where
    F: Fn(&str) -> bool,
{
    let mut name = base.to_string();
    for _ in 0..=MAX_NAME_SUFFIX {
        if !is_taken(&name) {
            return Ok(name);
        }
        name.push('_');
    }
    Err(TranslateError::NameExhausted {
        base: base.to_string(),
    })
}

fn reserved_names() -> HashSet<&'static str> {
    [
        "arguments",
        "await",
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "eval",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "implements",
        "import",
        "in",
        "instanceof",
        "interface",
        "let",
        "new",
        "null",
        "package",
        "private",
        "protected",
        "public",
        "random",
        "return",
        "static",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "undefined",
        "var",
        "void",
        "while",
        "with",
        "yield",
    ]
    .into_iter()
    .collect()
}
