//! Fallback content.
//!
//! Literal text a template falls back to when a region is missing from
//! the markup, keyed by template and region name.

use crate::templates::TemplateId;
use tracing::trace;

/// Fallback content of one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultContent {
    Text(&'static str),
    List(&'static [&'static str]),
}

use self::DefaultContent::{List, Text};
use crate::templates::TemplateId as T;

/// The fallback table.
pub static DEFAULTS: &[(TemplateId, &str, DefaultContent)] = &[
    // three-card overview
    (T::ThreeCardOverview, "card1.heading", Text("768 Women")),
    (
        T::ThreeCardOverview,
        "card1.details",
        List(&["Pima Indian heritage, aged 21+", "Real patients, real data"]),
    ),
    (T::ThreeCardOverview, "card2.heading", Text("8 Predictors")),
    (
        T::ThreeCardOverview,
        "card2.details",
        List(&[
            "Glucose, BMI, Insulin, Age, Blood Pressure, Pregnancies, Skin Thickness, Pedigree",
            "Simple, non-invasive measurements",
        ]),
    ),
    (T::ThreeCardOverview, "card3.heading", Text("Binary Outcome")),
    (
        T::ThreeCardOverview,
        "card3.details",
        List(&["0 = No Diabetes", "1 = Diabetes", "Clear classification goal"]),
    ),
    // chart with callouts
    (
        T::ChartWithCallouts,
        "numbers",
        List(&["No Diabetes: ~500 cases (65%)", "Diabetes: ~265 cases (35%)"]),
    ),
    (
        T::ChartWithCallouts,
        "warning",
        Text("A 2:1 imbalance means our model might favor the majority class. This will become critical later in our story."),
    ),
    // featured image
    (
        T::FeaturedImage,
        "insights",
        List(&[
            "Glucose appears to be the strongest distinguishing factor (diabetes cases cluster at Glucose > 120-130)",
            "Higher BMI and Age show increased diabetes prevalence, but with significant overlap",
            "No clear linear separation, suggesting non-linear boundaries may be needed",
        ]),
    ),
    // two-column lists
    (
        T::TwoColumnLists,
        "strong",
        List(&[
            "Age & Pregnancies (0.54): Strongest correlation; older women tend to have higher pregnancy counts.",
            "BMI & Skin Thickness (0.54): Expected physiological relationship - both measure body composition.",
            "Glucose & Insulin (0.42): Moderate positive correlation - insulin response to glucose levels.",
        ]),
    ),
    (
        T::TwoColumnLists,
        "weak",
        List(&[
            "BloodPressure & DiabetesPedigreeFunction (0.00): No linear relationship.",
            "Pregnancies & BMI (0.02): Nearly independent.",
        ]),
    ),
    (
        T::TwoColumnLists,
        "implications",
        List(&[
            "No perfect multicollinearity: All correlations are moderate, suggesting each predictor contributes unique information. This supports the use of discriminant analysis methods.",
            "No single dominant predictor: The outcome cannot be predicted by a single variable, necessitating multivariate approaches like LDA/QDA.",
        ]),
    ),
    // image with cards
    (T::ImageWithCards, "card1.heading", Text("47.23% Variance Explained")),
    (
        T::ImageWithCards,
        "card1.detail",
        Text("First 2 components (PC1 + PC2) capture less than half of total variance."),
    ),
    (T::ImageWithCards, "card2.heading", Text("5 Components Needed")),
    (
        T::ImageWithCards,
        "card2.detail",
        Text("Required to capture >80% of the dataset's information."),
    ),
    (T::ImageWithCards, "observation.heading", Text("Key Observation")),
    (
        T::ImageWithCards,
        "observation.detail",
        Text("Heavy Overlap: The first two principal components show significant overlap between diabetes and no-diabetes groups, indicating that linear separation in reduced space is challenging. This supports the need for discriminant analysis methods."),
    ),
    // table with image
    (
        T::TableWithImage,
        "headers",
        List(&["Metric", "LDA (Linear)", "QDA (Quadratic)"]),
    ),
    (T::TableWithImage, "row1", List(&["Accuracy", "76.09%", "71.30%"])),
    (
        T::TableWithImage,
        "row2",
        List(&["Sensitivity (Healthy)", "86.67%", "82.00%"]),
    ),
    (
        T::TableWithImage,
        "row3",
        List(&["Specificity (Diabetic)", "56.25%", "51.25%"]),
    ),
    (T::TableWithImage, "row4", List(&["AUC (ROC)", "0.835", "0.806"])),
    // metric comparison; values follow METRIC_NAMES order
    (
        T::MetricComparison,
        "lda.metrics",
        List(&["76.09%", "86.67%", "56.25%", "0.835", "0.71", "0.78"]),
    ),
    (
        T::MetricComparison,
        "lda.strength",
        Text("More robust to class imbalance, better generalization."),
    ),
    (
        T::MetricComparison,
        "qda.metrics",
        List(&["71.30%", "82.00%", "51.25%", "0.806", "0.66", "0.73"]),
    ),
    (
        T::MetricComparison,
        "qda.limitation",
        Text("Overfits on smaller class, less stable with imbalanced data."),
    ),
    (
        T::MetricComparison,
        "winner",
        Text("Winner: LDA - Despite theoretical preference for QDA (unequal covariance), LDA demonstrates superior performance with 4.79% higher accuracy and better stability on imbalanced data."),
    ),
    // alert cards
    (T::AlertCards, "card1.number", Text("56%")),
    (T::AlertCards, "card1.label", Text("Specificity")),
    (
        T::AlertCards,
        "card1.text",
        Text("Only 56% of diabetic cases correctly identified"),
    ),
    (T::AlertCards, "card2.number", Text("44%")),
    (T::AlertCards, "card2.label", Text("Missed Cases")),
    (
        T::AlertCards,
        "card2.text",
        Text("44% of diabetic patients go undetected"),
    ),
    (
        T::AlertCards,
        "critical",
        Text("Critical Issue: The model is excellent at identifying healthy individuals (86.67% sensitivity), but struggles with positive cases due to class imbalance (65% No Diabetes vs 35% Diabetes). This is a significant limitation for clinical application where missing diabetic cases has serious consequences."),
    ),
    // theory vs reality
    (T::TheoryVsReality, "theory.heading", Text("What Theory Said")),
    (
        T::TheoryVsReality,
        "theory.items",
        List(&[
            "Box's M Test: p < 0.05",
            "We rejected the null hypothesis of equal covariance. This means the covariance matrices differ significantly between diabetes and no-diabetes groups.",
            "Statistical theory clearly suggests QDA should win (since it allows different covariances).",
            "The textbooks were confident...",
        ]),
    ),
    (T::TheoryVsReality, "reality.heading", Text("What Data Revealed")),
    (
        T::TheoryVsReality,
        "reality.items",
        List(&[
            "LDA Won by 4.79%",
            "Despite the violation, LDA was more robust. QDA likely overfitted the noise in the smaller class.",
            "...but reality had other plans",
        ]),
    ),
    // dashboard
    (T::Dashboard, "features.heading", Text("Interactive Features")),
    (
        T::Dashboard,
        "features.items",
        List(&[
            "Class Distribution Slider: Adjust from 40% to 70% to see how balance affects performance",
            "SMOTE Toggle: Enable/disable synthetic oversampling",
            "Real-Time Updates: Metrics recalculate with actual R model training",
            "Live ROC Curves: Watch curves update as parameters change",
        ]),
    ),
    (T::Dashboard, "explore.heading", Text("What You Can Explore")),
    (
        T::Dashboard,
        "explore.items",
        List(&[
            "Balanced Classes (50/50): See how specificity improves",
            "SMOTE Impact: Compare with/without synthetic oversampling",
            "Model Comparison: Watch LDA vs QDA performance change",
            "Tooltips: Hover over metrics for explanations",
        ]),
    ),
    (
        T::Dashboard,
        "demo.url",
        Text("https://asds-5303-final-project-presentatio.vercel.app/dashboard.html"),
    ),
    // takeaways
    (T::Takeaways, "left.heading", Text("Key Takeaways")),
    (
        T::Takeaways,
        "left.items",
        List(&[
            "LDA Wins: Despite theory favoring QDA, LDA achieved 76.09% accuracy with superior robustness. Sometimes simpler is better.",
            "Critical Gap: Missing 44% of diabetic cases is unacceptable. We must do better.",
            "Root Cause: Class imbalance (65% vs 35%) is the villain in our story. This must be addressed.",
        ]),
    ),
    (T::Takeaways, "right.heading", Text("The Path Forward")),
    (
        T::Takeaways,
        "right.items",
        List(&[
            "SMOTE: Balance the classes to give diabetes cases a fair chance.",
            "Cost-Sensitive Learning: Prioritize catching diabetic cases\u{2014}missing them costs more than false alarms.",
            "Ensemble Methods: Combine LDA with Random Forest, SVM for a stronger team.",
            "Feature Engineering: Uncover hidden patterns through interaction terms.",
        ]),
    ),
    (
        T::Takeaways,
        "bottom-line",
        Text("The Bottom Line: We have a good start, but we're not ready for clinical deployment yet."),
    ),
    (
        T::Takeaways,
        "promise",
        Text("Our Promise: We'll continue improving until we can confidently detect diabetes early."),
    ),
    // closing references
    (
        T::ClosingReferences,
        "references",
        List(&[
            "1. International Diabetes Federation. (2021). IDF Diabetes Atlas, 10th Edition. Brussels, Belgium: International Diabetes Federation.",
            "2. National Institute of Diabetes and Digestive and Kidney Diseases. Pima Indians Diabetes Database. UCI Machine Learning Repository.",
            "3. James, G., Witten, D., Hastie, T., & Tibshirani, R. (2013). An Introduction to Statistical Learning: with Applications in R. New York: Springer.",
            "4. Venables, W. N., & Ripley, B. D. (2002). Modern Applied Statistics with S (4th ed.). New York: Springer.",
            "5. American Diabetes Association. (2023). Standards of Care in Diabetes \u{2013} 2023. Diabetes Care, 46(Supplement 1), S1-S291.",
            "6. Chawla, N. V., Bowyer, K. W., Hall, L. O., & Kegelmeyer, W. P. (2002). SMOTE: Synthetic Minority Over-sampling Technique. Journal of Artificial Intelligence Research, 16, 321-357.",
        ]),
    ),
];

/// Fallback content of a region.
pub fn lookup(template: TemplateId, region: &str) -> Option<DefaultContent> {
    DEFAULTS
        .iter()
        .find(|(t, r, _)| *t == template && *r == region)
        .map(|(_, _, content)| *content)
}

/// Fallback text of a region; empty when the region has none.
pub fn text(template: TemplateId, region: &str) -> &'static str {
    match lookup(template, region) {
        Some(Text(text)) => text,
        _ => {
            trace!(%template, region, "No text default");
            ""
        }
    }
}

/// Fallback list of a region; empty when the region has none.
pub fn list(template: TemplateId, region: &str) -> &'static [&'static str] {
    match lookup(template, region) {
        Some(List(items)) => items,
        _ => {
            trace!(%template, region, "No list default");
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let mut seen = HashSet::new();
        for (template, region, _) in DEFAULTS {
            assert!(seen.insert((*template, *region)), "{template} {region}");
        }
    }

    #[test]
    fn test_no_blank_defaults() {
        for (template, region, content) in DEFAULTS {
            match content {
                Text(text) => assert!(!text.trim().is_empty(), "{template} {region}"),
                List(items) => {
                    assert!(!items.is_empty(), "{template} {region}");
                    assert!(items.iter().all(|i| !i.trim().is_empty()));
                }
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(
            text(TemplateId::Dashboard, "features.heading"),
            "Interactive Features"
        );
        assert_eq!(list(TemplateId::Dashboard, "explore.items").len(), 4);
        assert_eq!(list(TemplateId::ClosingReferences, "references").len(), 6);
        assert_eq!(text(TemplateId::Generic, "anything"), "");
        assert!(list(TemplateId::Dashboard, "features.heading").is_empty());
    }
}
