use crate::sprite::{to_valid_js_name, uniquify, Sprite};
use crate::xml;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use xmltree::Element;

const SPRITE_PATHS: [&str; 2] = [
    "project/stage/sprites/sprite",
    "snapdata/project/stage/sprites/sprite",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateOptions {
    /// Reject argument nodes of unknown shape instead of emitting `undefined`.
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub enum TranslateError {
    Xml { message: String },
    NotAProject { root: String },
    MissingAttribute { element: String, attribute: String },
    UnclassifiedArgument { tag: String, block_type: String },
    NameExhausted { base: String },
}

impl Display for TranslateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::Xml { message } => write!(f, "Invalid project XML: {}", message),
            TranslateError::NotAProject { root } => write!(
                f,
                "Expected a <project> or <snapdata> document, found <{}>.",
                root
            ),
            TranslateError::MissingAttribute { element, attribute } => write!(
                f,
                "<{}> is missing required attribute '{}'.",
                element, attribute
            ),
            TranslateError::UnclassifiedArgument { tag, block_type } => write!(
                f,
                "Unidentified argument <{}> in block '{}'.",
                tag, block_type
            ),
            TranslateError::NameExhausted { base } => write!(
                f,
                "Could not find a free identifier for '{}' within {} suffixes.",
                base,
                crate::sprite::MAX_NAME_SUFFIX
            ),
        }
    }
}

impl Error for TranslateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateWarning {
    pub message: String,
}

impl Display for TranslateWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub warnings: Vec<TranslateWarning>,
}

/// State threaded through sprite, script and block construction.
pub(crate) struct BuildContext<'a> {
    pub owner: &'a str,
    pub options: TranslateOptions,
    warnings: &'a mut Vec<TranslateWarning>,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        owner: &'a str,
        options: TranslateOptions,
        warnings: &'a mut Vec<TranslateWarning>,
    ) -> Self {
        Self {
            owner,
            options,
            warnings,
        }
    }

    pub fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.warnings.push(TranslateWarning { message });
    }

    pub fn unclassified(&mut self, tag: &str, block_type: &str) -> Result<(), TranslateError> {
        if self.options.strict {
            return Err(TranslateError::UnclassifiedArgument {
                tag: tag.to_string(),
                block_type: block_type.to_string(),
            });
        }
        self.warn(format!(
            "Unidentified argument <{}> in block '{}' of sprite '{}'.",
            tag, block_type, self.owner
        ));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Translator {
    options: TranslateOptions,
    sprites: BTreeMap<String, Sprite>,
    name_mappings: HashMap<String, String>,
    warnings: Vec<TranslateWarning>,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn make_sprite(&mut self, node: &Element) -> Result<&Sprite, TranslateError> {
        let declared = xml::attr(node, "name").ok_or_else(|| TranslateError::MissingAttribute {
            element: node.name.clone(),
            attribute: "name".to_string(),
        })?;
        let name = uniquify(&to_valid_js_name(declared), |candidate| {
            self.sprites.contains_key(candidate)
        })?;
        log::debug!("Sprite '{}' translates as '{}'.", declared, name);

        let mut ctx = BuildContext::new(&name, self.options, &mut self.warnings);
        let sprite = Sprite::from_node(node, declared, &mut ctx)?;

        self.name_mappings
            .insert(declared.to_string(), name.clone());
        Ok(self.sprites.entry(name).or_insert(sprite))
    }

    /// Generated identifier of the sprite last declared as `declared`.
    pub fn generated_name(&self, declared: &str) -> Option<&str> {
        self.name_mappings.get(declared).map(String::as_str)
    }

    pub fn sprite(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    pub fn sprite_names(&self) -> impl Iterator<Item = &str> {
        self.sprites.keys().map(String::as_str)
    }

    pub fn warnings(&self) -> &[TranslateWarning] {
        &self.warnings
    }

    pub fn render(&self) -> String {
        if self.sprites.is_empty() {
            return String::new();
        }
        let names = self.sprite_names().collect::<Vec<_>>();
        let bodies = self.sprites.values().map(Sprite::render).collect::<Vec<_>>();
        format!("var {};\n\n{}", names.join(", "), bodies.join("\n\n"))
    }

    pub fn finish(self) -> Translation {
        Translation {
            text: self.render(),
            warnings: self.warnings,
        }
    }
}

pub fn translate_project(
    root: &Element,
    options: TranslateOptions,
) -> Result<Translation, TranslateError> {
    if root.name != "project" && root.name != "snapdata" {
        return Err(TranslateError::NotAProject {
            root: root.name.clone(),
        });
    }
    let mut translator = Translator::new(options);
    for path in SPRITE_PATHS {
        for node in xml::find_from_root(root, path) {
            translator.make_sprite(node)?;
        }
    }
    Ok(translator.finish())
}

pub fn translate_xml(source: &str, options: TranslateOptions) -> Result<Translation, TranslateError> {
    let root = xml::parse_document(source)?;
    translate_project(&root, options)
}
