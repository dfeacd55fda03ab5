use serde::Serialize;
use tracing::debug;

use crate::config::TemplateConfig;
use crate::error::Result;
use super::mutation::apply_insertions;
use super::suppressor::is_documented;
use super::{Category, CommentGenerator, DeclarationMatcher, Insertion};

/// Counters for one category pass over one buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub category: Category,
    pub matched: usize,
    pub suppressed: usize,
    pub inserted: usize,
}

impl PassStats {
    fn new(category: Category) -> Self {
        Self {
            category,
            matched: 0,
            suppressed: 0,
            inserted: 0,
        }
    }
}

/// Result of annotating one buffer
#[derive(Debug, Clone)]
pub struct Annotation {
    pub text: String,
    pub passes: Vec<PassStats>,
}

impl Annotation {
    pub fn total_inserted(&self) -> usize {
        self.passes.iter().map(|p| p.inserted).sum()
    }
}

/// Text-in, text-out annotation engine. Knows nothing about files.
pub struct Annotator {
    matcher: DeclarationMatcher,
    generator: CommentGenerator,
}

impl Annotator {
    pub fn new(templates: &TemplateConfig) -> Result<Self> {
        Ok(Self {
            matcher: DeclarationMatcher::new()?,
            generator: CommentGenerator::new(templates)?,
        })
    }

    /// Run the function, variable and struct/class passes in order, each
    /// re-scanning the output of the one before it
    pub fn annotate(&self, source: &str) -> Result<Annotation> {
        let mut buffer = source.to_string();
        let mut passes = Vec::with_capacity(Category::PASS_ORDER.len());
        let crlf = source.contains("\r\n");

        for category in Category::PASS_ORDER {
            let (next, stats) = self.run_pass(&buffer, category, crlf)?;
            debug!(
                "{} pass: {} matched, {} suppressed, {} inserted",
                category, stats.matched, stats.suppressed, stats.inserted
            );
            buffer = next;
            passes.push(stats);
        }

        Ok(Annotation { text: buffer, passes })
    }

    fn run_pass(&self, buffer: &str, category: Category, crlf: bool) -> Result<(String, PassStats)> {
        let mut stats = PassStats::new(category);

        // Every match is collected before the buffer changes
        let matches = self.matcher.find(buffer, category);
        stats.matched = matches.len();

        let mut insertions = Vec::with_capacity(matches.len());
        for declaration in &matches {
            if is_documented(buffer, declaration.start) {
                debug!("Skipping documented {} {}", declaration.kind, declaration.name);
                stats.suppressed += 1;
                continue;
            }

            let mut text = self.generator.generate(declaration)?;
            if crlf {
                text = text.replace("\r\n", "\n").replace('\n', "\r\n");
            }
            if !text.is_empty() {
                insertions.push(Insertion {
                    offset: declaration.start,
                    text,
                });
            }
        }
        stats.inserted = insertions.len();

        let output = apply_insertions(buffer, insertions)?;
        Ok((output, stats))
    }
}
