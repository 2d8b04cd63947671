//! SQL for the traffic table. Values are never interpolated into the
//! statement text; only positional placeholders are generated.

pub const TRAFFIC_TABLE: &str = "datos_tramo";

/// Distinct dates, most recent first.
pub const DISTINCT_DATES_SQL: &str =
    "SELECT DISTINCT fecha::date AS fecha FROM datos_tramo ORDER BY fecha DESC";

/// A statement plus the values bound to `$1..$n`, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl SegmentQuery {
    /// The date bound to `$1`.
    pub fn date(&self) -> &str {
        &self.params[0]
    }

    /// The segment ids bound to `$2..`.
    pub fn segments(&self) -> &[String] {
        &self.params[1..]
    }

    pub fn placeholder_count(&self) -> usize {
        self.params.len() - 1
    }
}

/// Builds the rows-for-date-and-segments query.
///
/// Returns `None` for an empty segment list: `IN ()` is not valid SQL and
/// the answer is known to be empty anyway.
pub fn build_segment_query(date: &str, segments: &[String]) -> Option<SegmentQuery> {
    if segments.is_empty() {
        return None;
    }

    // $1 is the date.
    let placeholders = (0..segments.len())
        .map(|i| format!("${}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "SELECT row_to_json({table}.*) AS record FROM {table} WHERE fecha = $1::date AND tramo IN ({placeholders})",
        table = TRAFFIC_TABLE,
        placeholders = placeholders,
    );

    let mut params = Vec::with_capacity(segments.len() + 1);
    params.push(date.to_string());
    params.extend(segments.iter().cloned());

    Some(SegmentQuery { sql, params })
}
