//! Mocked feature-importance chart and explanation prompt assembly.
//!
//! There is no model artifact in this demo: importances are random numbers
//! shaped like SHAP output. The natural-language explanation is delegated
//! to the generative endpoint, with a locally assembled fallback.

use crate::types::CustomerProfile;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One bar of the mocked importance chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureImportance {
    /// Feature name.
    pub feature: String,
    /// Signed contribution weight in [-1, 1].
    pub weight: f64,
}

/// Produces mocked importances and explanation prompts.
#[derive(Debug, Clone)]
pub struct Explainer {
    feature_names: Vec<String>,
}

impl Explainer {
    /// Create an explainer over the configured feature names.
    pub fn new(feature_names: Vec<String>) -> Self {
        Self { feature_names }
    }

    /// Random signed weights per feature, strongest contribution first.
    pub fn feature_importances(&self) -> Vec<FeatureImportance> {
        let mut rng = rand::rng();
        let mut importances: Vec<FeatureImportance> = self
            .feature_names
            .iter()
            .map(|feature| FeatureImportance {
                feature: feature.clone(),
                weight: rng.random_range(-1.0..=1.0),
            })
            .collect();
        importances.sort_by(|a, b| {
            b.weight
                .abs()
                .partial_cmp(&a.weight.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        importances
    }

    /// Prompt for the generative endpoint.
    pub fn build_prompt(
        &self,
        profile: &CustomerProfile,
        importances: &[FeatureImportance],
    ) -> String {
        let factors = importances
            .iter()
            .map(|entry| format!("{}: {:+.2}", entry.feature, entry.weight))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Khách hàng {} tuổi, nghề nghiệp {}, tình trạng hôn nhân {}, \
             đã sử dụng {} sản phẩm. Các yếu tố ảnh hưởng đến đề xuất: {}. \
             Hãy giải thích ngắn gọn bằng tiếng Việt vì sao khách hàng nhận \
             được các đề xuất này.",
            profile.age, profile.occupation, profile.marital_status,
            profile.adopted_products_count, factors,
        )
    }

    /// Locally assembled explanation when the generative endpoint is down.
    pub fn fallback_explanation(
        &self,
        profile: &CustomerProfile,
        importances: &[FeatureImportance],
    ) -> String {
        let top: Vec<&str> = importances
            .iter()
            .take(3)
            .map(|entry| entry.feature.as_str())
            .collect();
        format!(
            "Dựa trên hồ sơ của khách hàng ({} tuổi, {}), các yếu tố ảnh hưởng \
             lớn nhất đến đề xuất là: {}. Đây là giải thích được tạo tự động \
             trong chế độ demo offline.",
            profile.age,
            profile.occupation,
            top.join(", "),
        )
    }
}
