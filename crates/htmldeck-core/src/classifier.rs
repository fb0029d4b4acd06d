//! Template selection.
//!
//! An explicit ordered rule list: the first rule whose predicate holds
//! selects the template, and [`TemplateId::Generic`] catches the rest.

use crate::section::Section;
use crate::templates::TemplateId;
use tracing::debug;

/// One `(predicate, template)` pair
pub struct ClassificationRule {
    pub template: TemplateId,
    /// Human-readable form of the predicate
    pub description: &'static str,
    pub predicate: fn(&Section) -> bool,
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("template", &self.template)
            .field("description", &self.description)
            .finish()
    }
}

fn title_any(section: &Section, needles: &[&str]) -> bool {
    needles.iter().any(|n| section.title_contains(n))
}

/// Rules in priority order.
pub static RULES: &[ClassificationRule] = &[
    ClassificationRule {
        template: TemplateId::Mission,
        description: "title contains 'Mission' and the section has an image",
        predicate: |s| s.title_contains("Mission") && s.has_images(),
    },
    ClassificationRule {
        template: TemplateId::StatisticHook,
        description: "markup contains '537 Million' or title contains '537'",
        predicate: |s| s.html().contains("537 Million") || s.title_contains("537"),
    },
    ClassificationRule {
        template: TemplateId::ThreeCardOverview,
        description: "title contains 'Our Data' or 'Pima Indians'",
        predicate: |s| title_any(s, &["Our Data", "Pima Indians"]),
    },
    ClassificationRule {
        template: TemplateId::ChartWithCallouts,
        description: "title contains 'Class Imbalance' or 'Red Flag'",
        predicate: |s| title_any(s, &["Class Imbalance", "Red Flag"]),
    },
    ClassificationRule {
        template: TemplateId::TwoStepBoxes,
        description: "title contains 'Preparing for Battle' or 'Data Preprocessing'",
        predicate: |s| title_any(s, &["Preparing for Battle", "Data Preprocessing"]),
    },
    ClassificationRule {
        template: TemplateId::FeaturedImage,
        description: "title contains 'Data Visualization'",
        predicate: |s| s.title_contains("Data Visualization"),
    },
    ClassificationRule {
        template: TemplateId::TwoColumnLists,
        description: "title contains 'Key Correlations'",
        predicate: |s| s.title_contains("Key Correlations"),
    },
    ClassificationRule {
        template: TemplateId::ImageWithCards,
        description: "title contains 'Principal Component Analysis'",
        predicate: |s| s.title_contains("Principal Component Analysis"),
    },
    ClassificationRule {
        template: TemplateId::TableWithImage,
        description: "title contains 'Moment of Truth'",
        predicate: |s| s.title_contains("Moment of Truth"),
    },
    ClassificationRule {
        template: TemplateId::MetricComparison,
        description: "title contains 'LDA vs QDA' or 'Detailed Results'",
        predicate: |s| title_any(s, &["LDA vs QDA", "Detailed Results"]),
    },
    ClassificationRule {
        template: TemplateId::AlertCards,
        description: "title contains 'Critical Blind Spot'",
        predicate: |s| s.title_contains("Critical Blind Spot"),
    },
    ClassificationRule {
        template: TemplateId::TheoryVsReality,
        description: "title contains 'Plot Twist'",
        predicate: |s| s.title_contains("Plot Twist"),
    },
    ClassificationRule {
        template: TemplateId::Dashboard,
        description: "title contains 'Interactive Dashboard'",
        predicate: |s| s.title_contains("Interactive Dashboard"),
    },
    ClassificationRule {
        template: TemplateId::Takeaways,
        description: "title contains 'What We Learned' or \"Journey's End\"",
        predicate: |s| title_any(s, &["What We Learned", "Journey's End"]),
    },
    ClassificationRule {
        template: TemplateId::ClosingReferences,
        description: "title contains 'Questions'",
        predicate: |s| s.title_contains("Questions"),
    },
    ClassificationRule {
        template: TemplateId::TitleSlide,
        description: "title contains 'Comparative Analysis'",
        predicate: |s| s.title_contains("Comparative Analysis"),
    },
];

/// First rule matching `section`.
pub fn matching_rule(section: &Section) -> Option<&'static ClassificationRule> {
    RULES.iter().find(|rule| (rule.predicate)(section))
}

/// Select the template for `section`.
pub fn classify(section: &Section) -> TemplateId {
    let template = matching_rule(section)
        .map(|rule| rule.template)
        .unwrap_or(TemplateId::Generic);
    debug!(index = section.index, title = %section.title, %template, "Classified section");
    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetResolver;
    use crate::section::parse_sections;
    use htmldeck_markup::parse_html;

    fn section(html: &str) -> Section {
        let dir = tempfile::tempdir().unwrap();
        let tree = parse_html(html);
        parse_sections(&tree, &AssetResolver::new(dir.path()))
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn test_title_rules() {
        let cases = [
            ("Our Data: 768 Pima Indians", TemplateId::ThreeCardOverview),
            ("The Red Flag: Class Imbalance", TemplateId::ChartWithCallouts),
            ("Preparing for Battle", TemplateId::TwoStepBoxes),
            ("Data Visualization", TemplateId::FeaturedImage),
            ("Key Correlations", TemplateId::TwoColumnLists),
            ("Principal Component Analysis", TemplateId::ImageWithCards),
            ("The Moment of Truth", TemplateId::TableWithImage),
            ("LDA vs QDA: Detailed Results", TemplateId::MetricComparison),
            ("The Critical Blind Spot", TemplateId::AlertCards),
            ("The Plot Twist", TemplateId::TheoryVsReality),
            ("Interactive Dashboard: See It Live", TemplateId::Dashboard),
            ("Journey's End: What We Learned", TemplateId::Takeaways),
            ("Questions?", TemplateId::ClosingReferences),
            ("LDA vs QDA: A Comparative Analysis", TemplateId::MetricComparison),
            ("Diabetes Prediction: A Comparative Analysis", TemplateId::TitleSlide),
            ("Methodology", TemplateId::Generic),
        ];
        for (title, expected) in cases {
            let s = section(&format!("<section><h2>{}</h2></section>", title));
            assert_eq!(classify(&s), expected, "{}", title);
        }
    }

    #[test]
    fn test_mission_requires_image() {
        let s = section("<section><h2>Our Mission</h2><img src=\"images/nope.png\"></section>");
        assert_eq!(classify(&s), TemplateId::Generic);
    }

    #[test]
    fn test_hook_matches_markup() {
        let s = section("<section><h1>537 Million</h1><p>People worldwide</p></section>");
        assert_eq!(classify(&s), TemplateId::StatisticHook);

        let s = section("<section><div><span>537 Million</span></div><p>Our Data</p></section>");
        assert!(s.title.is_empty());
        assert_eq!(classify(&s), TemplateId::StatisticHook);
    }

    #[test]
    fn test_empty_title_is_generic() {
        let s = section("<section><p>Questions are welcome</p></section>");
        assert_eq!(classify(&s), TemplateId::Generic);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let s = section("<section><h2>Key Correlations</h2></section>");
        let first = classify(&s);
        for _ in 0..10 {
            assert_eq!(classify(&s), first);
        }
    }

    #[test]
    fn test_every_specialized_template_has_one_rule() {
        for id in TemplateId::ALL {
            let count = RULES.iter().filter(|r| r.template == id).count();
            let expected = usize::from(id != TemplateId::Generic);
            assert_eq!(count, expected, "{}", id);
        }
    }
}
