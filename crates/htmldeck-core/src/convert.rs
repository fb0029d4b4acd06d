//! Conversion facade: document in, PPTX out.

use crate::assembler::{Assembly, DeckAssembler, SlideRecord};
use crate::assets::AssetResolver;
use crate::config::DeckConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{EngineError, Result};
use crate::section::{parse_sections, Section};
use htmldeck_markup::{parse_file, parse_html, MarkupTree};
use htmldeck_pptx::{Deck, PptxWriter};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary of a conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Written container; `None` when the deck was only laid out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    pub slide_count: usize,

    /// `<img>` references across all sections, resolved or not
    pub image_references: usize,

    /// Images actually placed on slides
    pub images_placed: usize,

    pub slides: Vec<SlideRecord>,

    pub diagnostics: Vec<Diagnostic>,
}

impl ConversionReport {
    fn new(sections: &[Section], assembly: &Assembly, output: Option<PathBuf>) -> Self {
        Self {
            output,
            slide_count: assembly.deck.len(),
            image_references: sections
                .iter()
                .map(|s| s.images.len() + s.unresolved.len())
                .sum(),
            images_placed: assembly.slides.iter().map(|s| s.images).sum(),
            slides: assembly.slides.clone(),
            diagnostics: assembly.diagnostics.clone(),
        }
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }
}

/// A laid-out deck that has not been written.
#[derive(Debug, Clone)]
pub struct DeckPlan {
    pub deck: Deck,
    pub report: ConversionReport,
}

/// Converts HTML slide documents to PPTX.
///
/// # Example
///
/// ```
/// use htmldeck_core::{Converter, DeckConfig};
///
/// let converter = Converter::new(DeckConfig::default());
/// let plan = converter.plan_str("<section><h2>Questions?</h2></section>");
/// assert_eq!(plan.report.slide_count, 1);
/// assert_eq!(plan.report.slides[0].template.as_str(), "closing-references");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: DeckConfig,
}

impl Converter {
    pub fn new(config: DeckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    fn resolver(&self) -> AssetResolver {
        AssetResolver::new(&self.config.assets.root)
    }

    fn plan_tree(&self, tree: &MarkupTree) -> DeckPlan {
        let sections = parse_sections(tree, &self.resolver());
        let assembly = DeckAssembler::new(&self.config).assemble(&sections);
        let report = ConversionReport::new(&sections, &assembly, None);
        DeckPlan {
            deck: assembly.deck,
            report,
        }
    }

    /// Lay out a document held in memory.
    pub fn plan_str(&self, html: &str) -> DeckPlan {
        self.plan_tree(&parse_html(html))
    }

    /// Lay out a document file without writing anything.
    pub fn plan_file(&self, input: impl AsRef<Path>) -> Result<DeckPlan> {
        let input = input.as_ref();
        if !input.is_file() {
            return Err(EngineError::input_not_found(input));
        }
        info!(input = %input.display(), "Reading document");
        let tree = parse_file(input)?;
        Ok(self.plan_tree(&tree))
    }

    /// Container writer for a deck, with metadata from the configuration.
    pub fn writer(&self, deck: &Deck, report: &ConversionReport) -> PptxWriter {
        let meta = &self.config.meta;
        let title = meta.title.clone().or_else(|| {
            report
                .slides
                .iter()
                .map(|s| s.title.as_str())
                .find(|t| !t.is_empty())
                .map(str::to_string)
        });

        let mut writer = PptxWriter::new()
            .with_locale(meta.locale.clone())
            .with_canvas(self.config.canvas.width, self.config.canvas.height);
        if let Some(title) = title {
            writer = writer.with_title(title);
        }
        if let Some(author) = &meta.author {
            writer = writer.with_author(author.clone());
        }
        writer.add_deck(deck);
        writer
    }

    /// Lay out `input` and write the container to `output`.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<ConversionReport> {
        let output = output.as_ref();
        let DeckPlan { deck, mut report } = self.plan_file(input)?;

        self.writer(&deck, &report).write_to_file(output)?;
        info!(
            output = %output.display(),
            slides = report.slide_count,
            warnings = report.warning_count(),
            "Wrote presentation"
        );

        report.output = Some(output.to_path_buf());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateId;

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Converter::default()
            .convert_file(dir.path().join("absent.html"), dir.path().join("out.pptx"))
            .unwrap_err();
        assert_eq!(err.code(), "DECK001");
        assert!(!dir.path().join("out.pptx").exists());
    }

    #[test]
    fn test_empty_document_gives_empty_deck() {
        let plan = Converter::default().plan_str("<html><body><p>No slides</p></body></html>");
        assert!(plan.deck.is_empty());
        assert_eq!(plan.report.slide_count, 0);
    }

    #[test]
    fn test_report_counts() {
        let plan = Converter::default().plan_str(
            r#"<section><h2>The Critical Blind Spot</h2></section>
               <section><h2>Chart</h2><img src="images/a.png"><img src="images/b.png"></section>"#,
        );
        assert_eq!(plan.report.slide_count, 2);
        assert_eq!(plan.report.image_references, 2);
        assert_eq!(plan.report.images_placed, 0);
        assert_eq!(plan.report.slides[0].template, TemplateId::AlertCards);
        assert_eq!(plan.report.warning_count(), 2);

        let json = serde_json::to_value(&plan.report).unwrap();
        assert_eq!(json["slides"][0]["template"], "alert-cards");
        assert!(json.get("output").is_none());
    }

    #[test]
    fn test_writer_packages_every_slide() {
        let converter = Converter::default();
        let plan = converter.plan_str("<section></section><section><h1>Deck Title</h1></section>");
        let bytes = converter.writer(&plan.deck, &plan.report).generate().unwrap();
        let summary = htmldeck_pptx::read_package(&bytes).unwrap();
        assert_eq!(summary.slides.len(), 2);
        assert!(summary.slides[1].contains_text("Deck Title"));
    }
}
