use wirelog_types::{LogMessage, RenderedLine, ViewState};

use crate::filter;
use crate::format::text::{clip, payload_text, sanitize};
use crate::format::time::clock_time;
use crate::format::topic::short_topic;

/// Per-field display cap. Anything longer is clipped with an ellipsis so a
/// runaway payload cannot swamp the log surface.
pub const MAX_FIELD_CHARS: usize = 300;

/// Build the display projection of one message. Pure: the stored message
/// is never modified, and rendering twice yields the same line.
pub fn render_line(msg: &LogMessage) -> RenderedLine {
    RenderedLine {
        clock: clip(&sanitize(&clock_time(&msg.timestamp)), MAX_FIELD_CHARS),
        topic: clip(&sanitize(short_topic(&msg.topic)), MAX_FIELD_CHARS),
        payload: clip(&sanitize(&payload_text(&msg.payload)), MAX_FIELD_CHARS),
        alert: msg.topic.contains("alert"),
    }
}

/// Incremental path: decide whether a just-arrived message produces a
/// visible line. While paused nothing renders (the buffer still records
/// the message); otherwise the filter decides.
pub fn project_append(msg: &LogMessage, view: &ViewState) -> Option<RenderedLine> {
    if view.paused {
        return None;
    }
    if !filter::matches(msg, &view.filter) {
        return None;
    }
    Some(render_line(msg))
}

/// Full rebuild: every buffered message passing the current filter, in
/// buffer order. Used on filter change and on resume; pause does not gate
/// this path.
pub fn project_all<'a>(
    messages: impl IntoIterator<Item = &'a LogMessage>,
    view: &ViewState,
) -> Vec<RenderedLine> {
    messages
        .into_iter()
        .filter(|msg| filter::matches(msg, &view.filter))
        .map(render_line)
        .collect()
}
