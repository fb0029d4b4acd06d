//! Layout templates.
//!
//! One template per recognized slide shape, plus [`Generic`] for
//! everything else. A template reads a [`Section`] and appends positioned
//! elements to a [`SlideBuilder`]; an error aborts the template but keeps
//! what it already placed.

mod alert_cards;
mod chart_callouts;
mod closing;
pub mod common;
mod dashboard;
mod featured_image;
mod generic;
mod hook;
mod image_cards;
mod metric_comparison;
mod mission;
mod table_image;
mod takeaways;
#[cfg(test)]
pub(crate) mod test_support;
mod theory_reality;
mod three_card;
mod title_slide;
mod two_column_lists;
mod two_step;

pub use alert_cards::AlertCards;
pub use chart_callouts::ChartWithCallouts;
pub use closing::ClosingReferences;
pub use dashboard::Dashboard;
pub use featured_image::FeaturedImage;
pub use generic::Generic;
pub use hook::StatisticHook;
pub use image_cards::ImageWithCards;
pub use metric_comparison::MetricComparison;
pub use mission::Mission;
pub use table_image::TableWithImage;
pub use takeaways::Takeaways;
pub use theory_reality::TheoryVsReality;
pub use three_card::ThreeCardOverview;
pub use title_slide::TitleSlide;
pub use two_column_lists::TwoColumnLists;
pub use two_step::TwoStepBoxes;

use crate::error::TemplateError;
use crate::layout::{RenderContext, SlideBuilder};
use crate::section::Section;
use serde::{Deserialize, Serialize};

/// Result type for template rendering
pub type TemplateResult = std::result::Result<(), TemplateError>;

/// Identifier of a layout template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    Mission,
    StatisticHook,
    ThreeCardOverview,
    ChartWithCallouts,
    TwoStepBoxes,
    FeaturedImage,
    TwoColumnLists,
    ImageWithCards,
    TableWithImage,
    MetricComparison,
    AlertCards,
    TheoryVsReality,
    Dashboard,
    Takeaways,
    ClosingReferences,
    TitleSlide,
    Generic,
}

impl TemplateId {
    /// Every identifier, in classification priority order.
    pub const ALL: [TemplateId; 17] = [
        Self::Mission,
        Self::StatisticHook,
        Self::ThreeCardOverview,
        Self::ChartWithCallouts,
        Self::TwoStepBoxes,
        Self::FeaturedImage,
        Self::TwoColumnLists,
        Self::ImageWithCards,
        Self::TableWithImage,
        Self::MetricComparison,
        Self::AlertCards,
        Self::TheoryVsReality,
        Self::Dashboard,
        Self::Takeaways,
        Self::ClosingReferences,
        Self::TitleSlide,
        Self::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mission => "mission",
            Self::StatisticHook => "statistic-hook",
            Self::ThreeCardOverview => "three-card-overview",
            Self::ChartWithCallouts => "chart-with-callouts",
            Self::TwoStepBoxes => "two-step-boxes",
            Self::FeaturedImage => "featured-image",
            Self::TwoColumnLists => "two-column-lists",
            Self::ImageWithCards => "image-with-cards",
            Self::TableWithImage => "table-with-image",
            Self::MetricComparison => "metric-comparison",
            Self::AlertCards => "alert-cards",
            Self::TheoryVsReality => "theory-vs-reality",
            Self::Dashboard => "dashboard",
            Self::Takeaways => "takeaways",
            Self::ClosingReferences => "closing-references",
            Self::TitleSlide => "title-slide",
            Self::Generic => "generic",
        }
    }

    /// The template implementing this identifier.
    pub fn template(&self) -> &'static dyn SlideTemplate {
        match self {
            Self::Mission => &Mission,
            Self::StatisticHook => &StatisticHook,
            Self::ThreeCardOverview => &ThreeCardOverview,
            Self::ChartWithCallouts => &ChartWithCallouts,
            Self::TwoStepBoxes => &TwoStepBoxes,
            Self::FeaturedImage => &FeaturedImage,
            Self::TwoColumnLists => &TwoColumnLists,
            Self::ImageWithCards => &ImageWithCards,
            Self::TableWithImage => &TableWithImage,
            Self::MetricComparison => &MetricComparison,
            Self::AlertCards => &AlertCards,
            Self::TheoryVsReality => &TheoryVsReality,
            Self::Dashboard => &Dashboard,
            Self::Takeaways => &Takeaways,
            Self::ClosingReferences => &ClosingReferences,
            Self::TitleSlide => &TitleSlide,
            Self::Generic => &Generic,
        }
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed layout recipe mapping a section to slide elements
pub trait SlideTemplate: Sync {
    /// Identifier this template is registered under
    fn id(&self) -> TemplateId;

    /// Append this section's elements to `slide`.
    fn render(
        &self,
        section: &Section,
        ctx: &RenderContext<'_>,
        slide: &mut SlideBuilder,
    ) -> TemplateResult;
}
