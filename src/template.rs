use crate::block::{Arg, RenderMode};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Renders a block straight from its arguments, for shapes that placeholder
/// substitution cannot express.
pub type CustomRender = fn(&[Arg]) -> String;

#[derive(Clone, Copy)]
pub enum RawTemplate {
    Text(&'static str),
    Custom(CustomRender),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateFlags {
    /// Wrap in parentheses when substituted through a `$p` placeholder.
    pub needs_parens: bool,
}

impl TemplateFlags {
    pub const NONE: TemplateFlags = TemplateFlags {
        needs_parens: false,
    };
    pub const PARENS: TemplateFlags = TemplateFlags { needs_parens: true };

    /// Parses a flag string such as `"o"`. Unknown letters are ignored.
    pub fn parse(flags: &str) -> Self {
        Self {
            needs_parens: flags.contains('o'),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Template {
    pub raw: RawTemplate,
    pub flags: TemplateFlags,
}

impl Template {
    const fn text(raw: &'static str, flags: TemplateFlags) -> Self {
        Self {
            raw: RawTemplate::Text(raw),
            flags,
        }
    }

    const fn custom(render: CustomRender, flags: TemplateFlags) -> Self {
        Self {
            raw: RawTemplate::Custom(render),
            flags,
        }
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.raw {
            RawTemplate::Text(text) => write!(f, "Template({:?}, {:?})", text, self.flags),
            RawTemplate::Custom(_) => write!(f, "Template(<custom>, {:?})", self.flags),
        }
    }
}

pub fn lookup(block_type: &str) -> Option<&'static Template> {
    table().get(block_type)
}

pub fn needs_parens(block_type: &str) -> bool {
    lookup(block_type)
        .map(|template| template.flags.needs_parens)
        .unwrap_or(false)
}

fn table() -> &'static HashMap<&'static str, Template> {
    static TABLE: OnceLock<HashMap<&'static str, Template>> = OnceLock::new();
    TABLE.get_or_init(template_entries)
}

fn template_entries() -> HashMap<&'static str, Template> {
    let o = TemplateFlags::PARENS;
    let none = TemplateFlags::NONE;
    [
        ("reportSum", Template::text("$p1 + $p2", o)),
        ("reportDifference", Template::text("$p1 - $p2", o)),
        ("reportProduct", Template::text("$p1 * $p2", o)),
        ("reportQuotient", Template::text("$p1 / $p2", o)),
        ("reportModulus", Template::text("$p1 % $p2", o)),
        ("reportRandom", Template::text("random($1, $2)", none)),
        ("reportLessThan", Template::text("$p1 < $p2", o)),
        ("reportEquals", Template::text("$p1 == $p2", o)),
        ("reportGreaterThan", Template::text("$p1 > $p2", o)),
        ("reportNot", Template::text("!$p1", o)),
        ("reportAttributeOf", Template::text("$p2[$s1]", none)),
        ("reportTrue", Template::text("true", none)),
        ("reportFalse", Template::text("false", none)),
        ("reportAnd", Template::text("$p1 && $p2", o)),
        ("reportOr", Template::text("$p1 || $p2", o)),
        (
            "reportMap",
            Template::text("$p1.map(function (item) { $p2(item) })", none),
        ),
        ("reportNewList", Template::custom(render_list_literal, none)),
        ("reportJoinWords", Template::custom(render_join_words, none)),
        ("doForever", Template::text("while (true) $b1", none)),
        ("doRepeat", Template::text("($1).times($2)", none)),
        ("doUntil", Template::text("while (!($1)) $b2", none)),
        ("doIf", Template::text("if ($1) $b2", none)),
        ("doIfElse", Template::text("if ($1) $b2 else $b3", none)),
    ]
    .into_iter()
    .collect()
}

/// Items of every argument, with `list` arguments spread in place.
fn spread_items(args: &[Arg]) -> Vec<String> {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            Arg::List(items) => out.extend(items.iter().map(|item| item.render(RenderMode::Expression))),
            other => out.push(other.render(RenderMode::Expression)),
        }
    }
    out
}

fn render_list_literal(args: &[Arg]) -> String {
    format!("[{}]", spread_items(args).join(", "))
}

fn render_join_words(args: &[Arg]) -> String {
    format!("[{}].join('')", spread_items(args).join(", "))
}
