//! Text reports built on [`Table`].

use crate::duration::format_duration;
use crate::intersection::{CommonWindow, LocalizedWindow};
use crate::table::Table;
use crate::timeframe::{TimeFrame, DATETIME_FORMAT};
use crate::visualize::{Visualization, FILLED};

/// One row per timeframe: offset, local times, and UTC times.
pub fn timeframe_table<'a, I>(frames: I) -> Table
where
    I: IntoIterator<Item = (&'a str, &'a TimeFrame)>,
{
    let mut table = Table::new([
        "ID",
        "UTC Offset",
        "Start Time",
        "End Time",
        "Start Time (UTC)",
        "End Time (UTC)",
    ]);
    for (id, frame) in frames {
        table.push_row([
            id.to_string(),
            frame.offset().to_string(),
            frame.local_start().format(DATETIME_FORMAT).to_string(),
            frame.local_end().format(DATETIME_FORMAT).to_string(),
            frame.normalized_start().format(DATETIME_FORMAT).to_string(),
            frame.normalized_end().format(DATETIME_FORMAT).to_string(),
        ]);
    }
    table
}

/// The common window as seen from each timeframe's own clock.
pub fn localized_table(windows: &[LocalizedWindow]) -> Table {
    let mut table = Table::new(["ID", "UTC Offset", "Local Start Time", "Local End Time"]);
    for window in windows {
        table.push_row([
            window.id.clone(),
            window.offset.to_string(),
            window.start.format(DATETIME_FORMAT).to_string(),
            window.end.format(DATETIME_FORMAT).to_string(),
        ]);
    }
    table
}

/// Start, end, and duration lines for a common window.
pub fn window_summary(window: &CommonWindow) -> String {
    format!(
        "Start Time : {} UTC\nEnd Time   : {} UTC\nDuration   : {}\n",
        window.start.format(DATETIME_FORMAT),
        window.end.format(DATETIME_FORMAT),
        window.human_duration(),
    )
}

/// Legend line, e.g. `# = 10 minutes`.
pub fn legend(visualization: &Visualization) -> String {
    let weight = u64::try_from(visualization.weight).unwrap_or(0);
    format!("{FILLED} = {}", format_duration(weight).trim_end())
}

pub fn visualization_table(visualization: &Visualization) -> Table {
    let mut table = Table::new(["ID", "Timeline"]);
    for row in &visualization.rows {
        table.push_row([row.id.as_str(), row.markers.as_str()]);
    }
    table
}
