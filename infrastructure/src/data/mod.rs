//! Student data adapters

mod loader;

pub use loader::{
    DataLoadError, DataLoader, StudentData, active_tasks, select_profile, upcoming_events,
};
