mod report;

pub use report::{
    CreateReport, Rating, Report, ReportCategory, ReportFilter, ReportPatch, ReportStatus,
    TimelineEntry,
};
