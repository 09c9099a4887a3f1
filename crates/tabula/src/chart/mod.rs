//! Chart aggregation and recommendations.

mod config;
mod generator;

pub use config::{ChartConfig, ChartType};
pub use generator::{
    ChartData, ChartDataGenerator, ChartPoint, ChartRecommendation, DEFAULT_POINT_LIMIT,
    MAX_RECOMMENDATIONS, PieSlice,
};
