use std::collections::VecDeque;

use chrono::{DateTime, Local};
use wirelog_core::format::text::format_count;
use wirelog_core::{MessageBuffer, project_all, project_append};
use wirelog_runtime::Config;
use wirelog_types::{LogMessage, RenderedLine, ViewState};

/// Controller state for the console view.
///
/// The buffer is the authoritative record; `lines` is the disposable
/// projection the renderer draws. Both are bounded by the same capacity
/// with their own FIFO eviction, so a pile-up of redraws can never outgrow
/// the history itself.
pub struct App {
    buffer: MessageBuffer,
    view: ViewState,
    lines: VecDeque<RenderedLine>,
    line_cap: usize,
    follow_slack: usize,
    /// Scroll position as distance from the bottom, in lines. 0 = pinned
    /// to the newest line.
    scroll_from_bottom: usize,
    endpoint: String,
    connected: bool,
    connected_since: Option<DateTime<Local>>,
    filter_input: String,
    filter_editing: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            buffer: MessageBuffer::new(config.buffer_capacity),
            view: ViewState::default(),
            lines: VecDeque::new(),
            line_cap: config.buffer_capacity,
            follow_slack: config.follow_slack as usize,
            scroll_from_bottom: 0,
            endpoint: config.endpoint_url(),
            connected: false,
            connected_since: None,
            filter_input: String::new(),
            filter_editing: false,
            should_quit: false,
        }
    }

    /// One message arrived: record it, then render it if the view is live
    /// and the filter lets it through. Buffering and rendering happen in
    /// one step; there is no state where a message is half-processed.
    pub fn on_message(&mut self, msg: LogMessage) {
        let line = project_append(&msg, &self.view);
        self.buffer.append(msg);
        if let Some(line) = line {
            self.push_line(line);
        }
    }

    fn push_line(&mut self, line: RenderedLine) {
        let following = self.scroll_from_bottom <= self.follow_slack;
        self.lines.push_back(line);
        if self.lines.len() > self.line_cap {
            self.lines.pop_front();
        }
        if following {
            // Reading near the bottom: keep tracking the newest line.
            self.scroll_from_bottom = 0;
        } else {
            // Scrolled up: the same content stays in view.
            self.scroll_from_bottom += 1;
        }
        self.clamp_scroll();
    }

    pub fn on_status(&mut self, up: bool) {
        if up && !self.connected {
            self.connected_since = Some(Local::now());
        }
        if !up {
            self.connected_since = None;
        }
        self.connected = up;
    }

    pub fn toggle_pause(&mut self) {
        self.view.paused = !self.view.paused;
        if !self.view.paused {
            // Resume means "catch me up": everything buffered while
            // paused, under the current filter, ending at the bottom.
            self.rebuild();
        }
    }

    pub fn start_filter_edit(&mut self) {
        self.filter_editing = true;
    }

    pub fn finish_filter_edit(&mut self) {
        self.filter_editing = false;
    }

    pub fn filter_push(&mut self, c: char) {
        self.filter_input.push(c);
        self.apply_filter();
    }

    pub fn filter_backspace(&mut self) {
        self.filter_input.pop();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.view.set_filter(&self.filter_input);
        self.rebuild();
    }

    /// Throw the projection away and re-derive it from the buffer.
    fn rebuild(&mut self) {
        self.lines = project_all(self.buffer.iter(), &self.view).into();
        while self.lines.len() > self.line_cap {
            self.lines.pop_front();
        }
        self.scroll_from_bottom = 0;
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_from_bottom += n;
        self.clamp_scroll();
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(n);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    fn clamp_scroll(&mut self) {
        let max = self.lines.len().saturating_sub(1);
        if self.scroll_from_bottom > max {
            self.scroll_from_bottom = max;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // View accessors for the renderer.

    pub fn lines(&self) -> &VecDeque<RenderedLine> {
        &self.lines
    }

    pub fn scroll_from_bottom(&self) -> usize {
        self.scroll_from_bottom
    }

    pub fn counter_label(&self) -> String {
        format_count(self.buffer.len())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn connected_since(&self) -> Option<DateTime<Local>> {
        self.connected_since
    }

    pub fn is_paused(&self) -> bool {
        self.view.paused
    }

    pub fn filter_input(&self) -> &str {
        &self.filter_input
    }

    pub fn is_filter_editing(&self) -> bool {
        self.filter_editing
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
