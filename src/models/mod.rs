mod report;

pub use report::{EventKind, ReportPayload};
