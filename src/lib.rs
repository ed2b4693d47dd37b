pub mod block;
pub mod script;
pub mod sprite;
pub mod substitute;
pub mod template;
pub mod translator;
pub mod xml;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

#[cfg(all(target_arch = "wasm32", feature = "wasm-bindings"))]
pub mod wasm;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
pub use translator::{translate_xml, TranslateError, TranslateOptions, Translation, Translator};

#[cfg(not(target_arch = "wasm32"))]
pub fn run_cli(args: &cli::Args) -> Result<()> {
    let total_stages = 3 + usize::from(args.output.is_some());
    let progress = CliProgress::new("Translate", total_stages, args.quiet);
    let mut stage = 0usize;

    stage += 1;
    progress.emit(stage, "Resolving input path");
    let input = canonicalize_file(&args.input)?;

    stage += 1;
    progress.emit(stage, "Reading project XML");
    let source = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read '{}'.", pretty_path(&input)))?;

    stage += 1;
    progress.emit(stage, "Translating sprites and scripts");
    let translation = translate_source(&source, &input, TranslateOptions { strict: args.strict })?;
    if !translation.warnings.is_empty() {
        log::info!("Translated with {} warning(s).", translation.warnings.len());
    }

    match &args.output {
        Some(output) => {
            stage += 1;
            progress.emit(stage, "Writing generated code");
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(output, translation.text.as_bytes())
                .with_context(|| format!("Failed to write '{}'.", pretty_path(output)))?;
        }
        None => println!("{}", translation.text),
    }
    Ok(())
}

pub fn translate_source(source: &str, origin: &Path, options: TranslateOptions) -> Result<Translation> {
    translate_xml(source, options)
        .with_context(|| format!("Translation of '{}' failed", pretty_path(origin)))
}

pub fn translate_file(input: &Path, options: TranslateOptions) -> Result<Translation> {
    let input = canonicalize_file(input)?;
    let source = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read '{}'.", pretty_path(&input)))?;
    translate_source(&source, &input, options)
}

pub fn canonicalize_file(path: &Path) -> Result<PathBuf> {
    if !path.exists() || !path.is_file() {
        return Err(anyhow::anyhow!("Input file not found: '{}'.", path.display()));
    }
    Ok(path.canonicalize()?)
}

fn pretty_path(path: &Path) -> String {
    let raw = path.display().to_string();
    if let Some(stripped) = raw.strip_prefix(r"\\?\") {
        stripped.to_string()
    } else {
        raw
    }
}

#[cfg(not(target_arch = "wasm32"))]
struct CliProgress {
    prefix: &'static str,
    total: usize,
    quiet: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl CliProgress {
    fn new(prefix: &'static str, total: usize, quiet: bool) -> Self {
        Self {
            prefix,
            total: total.max(1),
            quiet,
        }
    }

    fn emit(&self, step: usize, label: &str) {
        if self.quiet {
            return;
        }
        let step = step.clamp(1, self.total);
        let bar = render_progress_bar(step, self.total, 14);
        eprintln!(
            "[{}] {}... ({}/{}) {}",
            self.prefix, label, step, self.total, bar
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn render_progress_bar(step: usize, total: usize, width: usize) -> String {
    let width = width.max(1);
    let filled = ((step * width) + (total / 2)) / total;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    for i in 0..width {
        s.push(if i < filled { '=' } else { '-' });
    }
    s.push(']');
    s
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(render_progress_bar(1, 4, 8), "[==------]");
        assert_eq!(render_progress_bar(4, 4, 8), "[========]");
    }

    #[test]
    fn missing_input_file_is_reported() {
        let err = translate_file(Path::new("does/not/exist.xml"), TranslateOptions::default())
            .expect_err("file does not exist");
        assert!(err.to_string().contains("Input file not found"));
    }
}
