use crate::script::Script;
use crate::substitute::substitute;
use crate::template::{self, RawTemplate};
use crate::translator::{BuildContext, TranslateError};
use crate::xml;
use xmltree::Element;

/// Text emitted for an argument that is absent or could not be classified.
pub const UNDEFINED: &str = "undefined";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Expression,
    Statement,
    /// Bare `{ ... }` body for a script substituted into a control construct.
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    pub components: Vec<String>,
}

impl Color {
    pub fn parse(raw: &str) -> Self {
        Self {
            components: raw
                .split(',')
                .map(|part| part.trim().to_string())
                .collect(),
        }
    }

    pub fn render(&self) -> String {
        format!("new Color({})", self.components.join(", "))
    }
}

#[derive(Debug, Clone)]
pub enum Arg {
    Literal(String),
    Color(Color),
    List(Vec<Arg>),
    Block(Block),
    Script(Script),
    /// A child element of unknown shape; carries its tag name.
    Unclassified(String),
}

impl Arg {
    pub fn render(&self, mode: RenderMode) -> String {
        match self {
            Arg::Literal(value) => value.clone(),
            Arg::Color(color) => color.render(),
            Arg::List(items) => format!(
                "[{}]",
                items
                    .iter()
                    .map(|item| item.render(RenderMode::Expression))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Arg::Block(block) => block.render(mode),
            Arg::Script(script) => script.render(mode),
            Arg::Unclassified(_) => UNDEFINED.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    block_type: String,
    args: Vec<Arg>,
}

impl Block {
    pub fn new(block_type: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            block_type: block_type.into(),
            args,
        }
    }

    pub(crate) fn from_node(node: &Element, ctx: &mut BuildContext<'_>) -> Result<Self, TranslateError> {
        let block_type = xml::attr(node, "s")
            .ok_or_else(|| TranslateError::MissingAttribute {
                element: node.name.clone(),
                attribute: "s".to_string(),
            })?
            .to_string();
        let mut args = Vec::new();
        for child in xml::child_elements(node) {
            args.push(classify_arg(child, &block_type, ctx)?);
        }
        Ok(Self { block_type, args })
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn render(&self, mode: RenderMode) -> String {
        if let Some(template) = template::lookup(&self.block_type) {
            return match template.raw {
                RawTemplate::Text(text) => substitute(text, &self.args),
                RawTemplate::Custom(render) => render(&self.args),
            };
        }
        let args = self
            .args
            .iter()
            .map(|arg| arg.render(RenderMode::Expression))
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("this.{}({})", self.block_type, args);
        if mode == RenderMode::Statement {
            out.push(';');
        }
        out
    }
}

fn classify_arg(
    node: &Element,
    block_type: &str,
    ctx: &mut BuildContext<'_>,
) -> Result<Arg, TranslateError> {
    match node.name.as_str() {
        "l" => Ok(Arg::Literal(literal_text(node))),
        "color" => Ok(Arg::Color(Color::parse(&xml::text(node)))),
        "list" => {
            let mut items = Vec::new();
            for item in xml::child_elements(node) {
                items.push(classify_arg(item, block_type, ctx)?);
            }
            Ok(Arg::List(items))
        }
        "block" => Ok(Arg::Block(Block::from_node(node, ctx)?)),
        "script" => Ok(Arg::Script(Script::from_node(node, ctx, false)?)),
        other => {
            ctx.unclassified(other, block_type)?;
            Ok(Arg::Unclassified(other.to_string()))
        }
    }
}

/// Dropdown literals wrap their value in an `<option>` child.
fn literal_text(node: &Element) -> String {
    match xml::child_elements(node).find(|child| child.name == "option") {
        Some(option) => xml::text(option),
        None => xml::text(node),
    }
}
