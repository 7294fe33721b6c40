pub mod frame_stats;
pub mod game_metrics;

pub use frame_stats::FrameStats;
pub use game_metrics::GameMetrics;
