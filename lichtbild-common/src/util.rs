use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[month repr:short] [day padding:none], [year] at [hour repr:12 padding:none]:[minute] [period]"
);

/// Formats a timestamp the way post cards show it, e.g. `Oct 19, 2026 at 2:05 PM`.
pub fn format_date_string(date_time: OffsetDateTime) -> Result<String, time::error::Format> {
    date_time.format(DATE_FORMAT)
}
