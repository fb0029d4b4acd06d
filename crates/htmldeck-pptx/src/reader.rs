//! Read a written package back into a summary.
//!
//! Only what the writer produces is understood: per slide, the text runs,
//! the picture count and the background fill.

use crate::error::{PptxError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Contents of one slide part
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideSummary {
    /// Text of every `<a:t>` run, in document order
    pub texts: Vec<String>,

    /// Number of `<p:pic>` elements
    pub pictures: usize,

    /// Background fill as uppercase `RRGGBB`
    pub background: Option<String>,
}

impl SlideSummary {
    /// Whether any run contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

/// Contents of a package
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageSummary {
    pub slides: Vec<SlideSummary>,

    /// Entries under `ppt/media/`
    pub media: Vec<String>,
}

/// Summarize a PPTX package.
pub fn read_package(bytes: &[u8]) -> Result<PackageSummary> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    if archive.by_name("ppt/presentation.xml").is_err() {
        return Err(PptxError::invalid_package("missing ppt/presentation.xml"));
    }

    let mut media: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/media/"))
        .map(str::to_string)
        .collect();
    media.sort();

    let mut slides = Vec::new();
    for n in 1.. {
        let name = format!("ppt/slides/slide{}.xml", n);
        let xml = match archive.by_name(&name) {
            Ok(mut file) => {
                let mut xml = String::new();
                file.read_to_string(&mut xml)?;
                xml
            }
            Err(_) => break,
        };
        slides.push(summarize_slide(&xml)?);
    }

    Ok(PackageSummary { slides, media })
}

fn summarize_slide(xml: &str) -> Result<SlideSummary> {
    let mut reader = Reader::from_str(xml);
    let mut summary = SlideSummary::default();
    let mut in_text = false;
    let mut in_background = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"a:t" => in_text = true,
                b"p:bg" => in_background = true,
                b"p:pic" => summary.pictures += 1,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"a:t" => in_text = false,
                b"p:bg" => in_background = false,
                _ => {}
            },
            Event::Empty(e) if in_background && e.name().as_ref() == b"a:srgbClr" => {
                if let Some(attr) = e
                    .try_get_attribute("val")
                    .map_err(|err| PptxError::invalid_package(err.to_string()))?
                {
                    let value = attr
                        .unescape_value()
                        .map_err(|err| PptxError::invalid_package(err.to_string()))?;
                    summary.background = Some(value.into_owned());
                }
            }
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|err| PptxError::invalid_package(err.to_string()))?;
                summary.texts.push(text.into_owned());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(summary)
}
