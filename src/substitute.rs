use crate::block::{Arg, RenderMode, UNDEFINED};
use crate::template;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::OnceLock;

/// One `$<flags><index>` occurrence in a template string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// 1-based argument index.
    pub index: usize,
    pub block: bool,
    pub string: bool,
    pub parens: bool,
}

impl Placeholder {
    pub fn new(flags: &str, index: usize) -> Self {
        Self {
            index,
            block: flags.contains('b'),
            string: flags.contains('s'),
            parens: flags.contains('p'),
        }
    }

    pub fn resolve(&self, args: &[Arg]) -> String {
        let Some(arg) = self.index.checked_sub(1).and_then(|i| args.get(i)) else {
            return UNDEFINED.to_string();
        };
        let mut text = None;
        if self.block {
            text = Some(arg.render(RenderMode::Block));
        }
        if self.string {
            let raw = text.unwrap_or_else(|| arg.render(RenderMode::Expression));
            text = Some(quote(&raw));
        }
        match text {
            Some(text) => text,
            None if self.parens => parenthesize(arg),
            None => arg.render(RenderMode::Expression),
        }
    }
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$([A-Za-z]*)(\d+)").expect("placeholder regex must compile"))
}

fn from_captures(caps: &Captures<'_>) -> Placeholder {
    // An index too large for usize can never name an argument.
    let index = caps[2].parse::<usize>().unwrap_or(0);
    Placeholder::new(&caps[1], index)
}

pub fn parse_placeholders(template: &str) -> Vec<Placeholder> {
    placeholder_re()
        .captures_iter(template)
        .map(|caps| from_captures(&caps))
        .collect()
}

pub fn substitute(template: &str, args: &[Arg]) -> String {
    placeholder_re()
        .replace_all(template, |caps: &Captures<'_>| from_captures(caps).resolve(args))
        .into_owned()
}

/// Target-dialect string literal for `text`.
pub fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

fn parenthesize(arg: &Arg) -> String {
    let rendered = arg.render(RenderMode::Expression);
    match arg {
        Arg::Block(block) if template::needs_parens(block.block_type()) => {
            format!("({})", rendered)
        }
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;

    fn lit(value: &str) -> Arg {
        Arg::Literal(value.to_string())
    }

    fn sum(a: &str, b: &str) -> Arg {
        Arg::Block(Block::new("reportSum", vec![lit(a), lit(b)]))
    }

    #[test]
    fn placeholders_carry_independent_flags() {
        let found = parse_placeholders("$1 $p2 $sb1 $p12");
        assert_eq!(
            found,
            vec![
                Placeholder::new("", 1),
                Placeholder::new("p", 2),
                Placeholder {
                    index: 1,
                    block: true,
                    string: true,
                    parens: false
                },
                Placeholder::new("p", 12),
            ]
        );
    }

    #[test]
    fn parens_only_wrap_flagged_blocks() {
        let args = vec![sum("3", "4"), lit("5")];
        assert_eq!(substitute("$p1 * $p2", &args), "(3 + 4) * 5");
        assert_eq!(substitute("$1 * $2", &args), "3 + 4 * 5");
        let random = Arg::Block(Block::new("reportRandom", vec![lit("1"), lit("6")]));
        assert_eq!(substitute("$p1", &[random]), "random(1, 6)");
    }

    #[test]
    fn string_flag_quotes_rendered_text() {
        let args = vec![lit("x \"pos\""), lit("sprite")];
        assert_eq!(substitute("$p2[$s1]", &args), r#"sprite["x \"pos\""]"#);
    }

    #[test]
    fn string_flag_suppresses_parens() {
        assert_eq!(substitute("$ps1", &[sum("1", "2")]), "\"1 + 2\"");
    }

    #[test]
    fn missing_arguments_render_undefined() {
        assert_eq!(substitute("random($1, $2)", &[lit("1")]), "random(1, undefined)");
        assert_eq!(substitute("$0", &[lit("1")]), "undefined");
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        assert_eq!(substitute("true", &[]), "true");
        assert_eq!(substitute("a $ b", &[]), "a $ b");
    }
}
