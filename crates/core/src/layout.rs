//! Column layout strings and submitted layout state.
//!
//! A dashboard's `column_layout` is a string like `"30-30-40"`: the
//! number of segments is the number of columns and each segment is that
//! column's width in percent. Clients submit widget arrangements as
//! *layout state* text, `"5,6;7;;9,10"`: columns separated by `;`,
//! widget ids within a column separated by `,` in top-to-bottom order.
//!
//! Parsing lives here so the API and repository layers share one
//! definition of both formats. Nothing in this module touches storage.

use crate::error::CoreError;
use crate::types::DbId;

/// Separator between column width segments in `column_layout`.
pub const WIDTH_SEPARATOR: char = '-';

/// Separator between columns in submitted layout state.
pub const COLUMN_SEPARATOR: char = ';';

/// Separator between widget ids within one column of layout state.
pub const ROW_SEPARATOR: char = ',';

/// Maximum number of columns a dashboard may declare.
pub const MAX_COLUMN_COUNT: usize = 12;

/// Column layout given to dashboards created without one.
pub const DEFAULT_COLUMN_LAYOUT: &str = "50-50";

/// An ordered placement plan: one entry per column (left to right), each
/// an ordered list of widget ids (top to bottom).
pub type PlacementPlan = Vec<Vec<DbId>>;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Parse a `column_layout` string into column widths (percent).
///
/// Rejects empty strings, more than [`MAX_COLUMN_COUNT`] segments, and
/// segments that are not integers in `1..=100`.
pub fn parse_column_layout(layout: &str) -> Result<Vec<u8>, CoreError> {
    if layout.is_empty() {
        return Err(CoreError::Validation(
            "Column layout must not be empty".to_string(),
        ));
    }

    let segments: Vec<&str> = layout.split(WIDTH_SEPARATOR).collect();
    if segments.len() > MAX_COLUMN_COUNT {
        return Err(CoreError::Validation(format!(
            "Column layout has {} columns (max {MAX_COLUMN_COUNT})",
            segments.len()
        )));
    }

    let mut widths = Vec::with_capacity(segments.len());
    for segment in segments {
        let width: u8 = segment.parse().map_err(|_| {
            CoreError::Validation(format!(
                "Invalid column width '{segment}' in layout '{layout}'"
            ))
        })?;
        if width == 0 || width > 100 {
            return Err(CoreError::Validation(format!(
                "Column width must be between 1 and 100, got {width}"
            )));
        }
        widths.push(width);
    }
    Ok(widths)
}

/// Number of columns a `column_layout` string declares.
pub fn column_count(layout: &str) -> Result<usize, CoreError> {
    Ok(parse_column_layout(layout)?.len())
}

// ---------------------------------------------------------------------------
// Layout state
// ---------------------------------------------------------------------------

/// Decode submitted layout state into a [`PlacementPlan`].
///
/// Empty column segments parse to empty columns, never get skipped, so
/// column indices stay positionally stable. A non-numeric widget id is a
/// caller error and fails the whole parse; ids are never silently
/// dropped. An empty input is an empty plan (every widget unplaced).
pub fn parse_layout_state(state: &str) -> Result<PlacementPlan, CoreError> {
    if state.is_empty() {
        return Ok(Vec::new());
    }

    let mut plan = Vec::new();
    for column in state.split(COLUMN_SEPARATOR) {
        if column.is_empty() {
            plan.push(Vec::new());
            continue;
        }
        let mut ids = Vec::new();
        for token in column.split(ROW_SEPARATOR) {
            let id: DbId = token.trim().parse().map_err(|_| {
                CoreError::Parse(format!("Invalid widget id '{token}' in layout state"))
            })?;
            ids.push(id);
        }
        plan.push(ids);
    }
    Ok(plan)
}
