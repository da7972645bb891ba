//! Status-line display surface

use std::io::{Stdout, Write};

use crate::player::{ContainerFlags, DisplayModel, DisplaySurface, NavSlot, PlayControlFlags};

const BAR_WIDTH: usize = 20;

/// Display surface printing one status line whenever the visible state
/// changes
pub struct TerminalSurface<W = Stdout> {
    model: DisplayModel,
    out: W,
    last: Option<String>,
}

impl TerminalSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            model: DisplayModel::default(),
            out,
            last: None,
        }
    }

    pub fn model(&self) -> &DisplayModel {
        &self.model
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render the model, `None` while the player is closed or hidden
pub fn status_line(model: &DisplayModel) -> Option<String> {
    if !model.container.active || model.container.hidden {
        return None;
    }

    let icon = if model.play_control.loading {
        "…"
    } else if model.play_control.playing {
        "▶"
    } else {
        "⏸"
    };

    let filled = ((model.progress.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));

    let mut line = format!(
        "{} {} | {}  {} / {} [{}] {:.1}%",
        icon,
        model.now_playing,
        model.title,
        model.elapsed,
        model.duration,
        bar,
        model.progress
    );

    let prev = model.nav(NavSlot::Prev);
    if prev.target.is_some() {
        line.push_str(&format!("  « {}", prev.label));
    }
    let next = model.nav(NavSlot::Next);
    if next.target.is_some() {
        line.push_str(&format!("  {} »", next.label));
    }

    Some(line)
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn set_artwork(&mut self, url: &str) {
        self.model.set_artwork(url);
    }

    fn set_now_playing(&mut self, text: &str) {
        self.model.set_now_playing(text);
    }

    fn set_title(&mut self, text: &str) {
        self.model.set_title(text);
    }

    fn set_duration(&mut self, text: &str) {
        self.model.set_duration(text);
    }

    fn set_elapsed(&mut self, text: &str) {
        self.model.set_elapsed(text);
    }

    fn set_progress(&mut self, percent: f64) {
        self.model.set_progress(percent);
    }

    fn set_seek_range(&mut self, min: f64, max: f64) {
        self.model.set_seek_range(min, max);
    }

    fn set_seek_value(&mut self, value: f64) {
        self.model.set_seek_value(value);
    }

    fn set_nav(&mut self, slot: NavSlot, label: &str, target: Option<&str>) {
        self.model.set_nav(slot, label, target);
    }

    fn set_play_control(&mut self, flags: PlayControlFlags) {
        self.model.set_play_control(flags);
    }

    fn set_container(&mut self, flags: ContainerFlags) {
        self.model.set_container(flags);
    }

    fn present(&mut self) {
        let line = status_line(&self.model);
        if line == self.last {
            return;
        }
        if let Some(text) = &line {
            if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
                tracing::warn!("Failed to write status line: {}", e);
            }
        }
        self.last = line;
    }

    fn notice(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write notice: {}", e);
        }
        // Repeat the status line below the notice
        self.last = None;
    }
}
