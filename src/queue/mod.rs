pub mod capacity;
pub mod estimator;
pub mod index;
pub mod view;

pub use estimator::estimate_models;
pub use view::queue_stats;
