pub mod controller;
pub mod detector;
pub mod listener;
pub mod runtime;
pub mod state;

pub use controller::VisitTracker;
pub use runtime::Tracker;
pub use state::Visit;
