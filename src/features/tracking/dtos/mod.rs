mod tracking_dto;

pub use tracking_dto::{RecentReportDto, SubmitRatingDto, TrackQuery};
