pub mod report;
pub mod review;

pub use report::{AggregateReport, AnalysisResponse, EmotionPoint, EmotionTrend, GenreEmotionRow};
pub use review::{EmotionScore, PredictRequest, ReviewResult, SentimentLabel};
