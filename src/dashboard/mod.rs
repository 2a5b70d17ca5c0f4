//! Admin analytics dashboard data and chart helpers

pub mod charts;

pub use charts::{DonutSegment, donut_segments, sparkline_path};

use serde::{Deserialize, Serialize};

/// Aggregated figures shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_articles: u64,
    pub total_companies: u64,
    pub total_users: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub ai_generated_articles: u64,
    /// Daily view counts, oldest first
    pub views_series: Vec<u64>,
    /// Article count per category
    pub categories: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: u64,
}

impl DashboardStats {
    /// Donut chart for the category breakdown
    pub fn category_donut(&self, radius: f64) -> Vec<DonutSegment> {
        let parts: Vec<(&str, u64)> = self
            .categories
            .iter()
            .map(|share| (share.category.as_str(), share.count))
            .collect();
        donut_segments(&parts, radius)
    }

    /// Sparkline for the daily views series
    pub fn views_sparkline(&self, width: f64, height: f64) -> String {
        let values: Vec<f64> = self.views_series.iter().map(|v| *v as f64).collect();
        sparkline_path(&values, width, height)
    }
}

/// Count-up animation for a dashboard figure
///
/// Produces `steps` evenly spaced frames; the last frame is always the
/// target itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    pub target: u64,
    pub steps: u32,
}

impl CounterAnimation {
    pub fn new(target: u64, steps: u32) -> Self {
        Self {
            target,
            steps: steps.max(1),
        }
    }

    /// Value displayed at frame `index` (1-based)
    pub fn frame(&self, index: u32) -> u64 {
        let index = index.min(self.steps);
        ((self.target as u128 * index as u128) / self.steps as u128) as u64
    }

    pub fn frames(&self) -> impl Iterator<Item = u64> + '_ {
        (1..=self.steps).map(|index| self.frame(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_ends_on_target() {
        let frames: Vec<u64> = CounterAnimation::new(1_000, 4).frames().collect();
        assert_eq!(frames, vec![250, 500, 750, 1_000]);
    }

    #[test]
    fn test_counter_is_monotonic() {
        let animation = CounterAnimation::new(7, 10);
        let frames: Vec<u64> = animation.frames().collect();
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(frames.last(), Some(&7));
    }

    #[test]
    fn test_zero_steps_is_single_frame() {
        let frames: Vec<u64> = CounterAnimation::new(5, 0).frames().collect();
        assert_eq!(frames, vec![5]);
    }

    #[test]
    fn test_stats_deserialize_partial() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"total_articles": 12, "views_series": [1, 2, 3]}"#).unwrap();
        assert_eq!(stats.total_articles, 12);
        assert_eq!(stats.total_users, 0);
        assert!(!stats.views_sparkline(100.0, 20.0).is_empty());
        assert!(stats.category_donut(40.0).is_empty());
    }
}
