use crate::block::{Block, RenderMode};
use crate::translator::{BuildContext, TranslateError};
use crate::xml;
use xmltree::Element;

/// Which registration method a top-level script is emitted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Go,
    Click,
    Message,
}

impl HeaderKind {
    pub fn from_hat(block_type: &str) -> Self {
        match block_type {
            "receiveGo" => HeaderKind::Go,
            "receiveClick" => HeaderKind::Click,
            _ => HeaderKind::Message,
        }
    }

    pub fn method(self) -> &'static str {
        match self {
            HeaderKind::Go => "onReceiveGo",
            HeaderKind::Click => "onReceiveClick",
            HeaderKind::Message => "onReceiveMessage",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Script {
    owner: String,
    is_header: bool,
    blocks: Vec<Block>,
}

impl Script {
    pub fn new(owner: impl Into<String>, is_header: bool, blocks: Vec<Block>) -> Self {
        Self {
            owner: owner.into(),
            is_header,
            blocks,
        }
    }

    pub(crate) fn from_node(
        node: &Element,
        ctx: &mut BuildContext<'_>,
        is_header: bool,
    ) -> Result<Self, TranslateError> {
        let mut blocks = Vec::new();
        for child in xml::child_elements(node) {
            if child.name == "block" {
                blocks.push(Block::from_node(child, ctx)?);
            } else {
                let message = format!(
                    "Skipping <{}> inside a script of sprite '{}'.",
                    child.name, ctx.owner
                );
                ctx.warn(message);
            }
        }
        Ok(Self::new(ctx.owner, is_header, blocks))
    }

    pub fn is_header(&self) -> bool {
        self.is_header
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn header_kind(&self) -> HeaderKind {
        self.blocks
            .first()
            .map(|hat| HeaderKind::from_hat(hat.block_type()))
            .unwrap_or(HeaderKind::Message)
    }

    pub fn render(&self, mode: RenderMode) -> String {
        // The hat block of a header script becomes the registration call.
        let body = if self.is_header {
            self.blocks.get(1..).unwrap_or_default()
        } else {
            &self.blocks[..]
        };
        let mut lines = Vec::new();
        if self.is_header {
            lines.push(format!(
                "{}.{}(function () {{",
                self.owner,
                self.header_kind().method()
            ));
        } else if mode == RenderMode::Block {
            lines.push("{".to_string());
        } else {
            lines.push("function () {".to_string());
        }
        for block in body {
            let rendered = block.render(RenderMode::Statement);
            lines.extend(rendered.split('\n').map(|line| format!("\t{}", line)));
        }
        lines.push(if self.is_header { "});" } else { "}" }.to_string());
        lines.join("\n")
    }
}
