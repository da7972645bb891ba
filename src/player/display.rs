//! Display surface seam
//!
//! The controller never holds live UI handles. It writes through a table of
//! named update operations, and reads nothing back except the scrub target
//! carried by input events.

/// Visual flags of the play/pause control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayControlFlags {
    pub loading: bool,
    pub playing: bool,
    pub paused: bool,
}

impl PlayControlFlags {
    pub fn playing() -> Self {
        Self {
            loading: false,
            playing: true,
            paused: false,
        }
    }

    pub fn paused() -> Self {
        Self {
            loading: false,
            playing: false,
            paused: true,
        }
    }

    /// Same flags with `loading` added
    pub fn with_loading(self) -> Self {
        Self {
            loading: true,
            ..self
        }
    }

    pub fn without_loading(self) -> Self {
        Self {
            loading: false,
            ..self
        }
    }
}

/// Visual flags of the player container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerFlags {
    pub active: bool,
    pub hidden: bool,
}

/// Which adjacent-episode control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSlot {
    Prev,
    Next,
}

/// Named update operations the controller writes to
pub trait DisplaySurface {
    fn set_artwork(&mut self, url: &str);
    fn set_now_playing(&mut self, text: &str);
    fn set_title(&mut self, text: &str);
    /// Total length, already formatted
    fn set_duration(&mut self, text: &str);
    /// Elapsed time, already formatted
    fn set_elapsed(&mut self, text: &str);
    /// Width of the progress fill, in percent
    fn set_progress(&mut self, percent: f64);
    fn set_seek_range(&mut self, min: f64, max: f64);
    fn set_seek_value(&mut self, value: f64);
    /// Number label of a navigation control and the location it loads.
    /// `None` removes the target so the control cannot trigger a load.
    fn set_nav(&mut self, slot: NavSlot, label: &str, target: Option<&str>);
    fn set_play_control(&mut self, flags: PlayControlFlags);
    fn set_container(&mut self, flags: ContainerFlags);

    /// Called by the host after each handled message
    fn present(&mut self) {}

    /// One line of text outside the player regions, such as command help
    fn notice(&mut self, _text: &str) {}
}

/// Number label and load target of a navigation control
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavRegion {
    pub label: String,
    pub target: Option<String>,
}

/// Last value written to every display region
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayModel {
    pub artwork: String,
    pub now_playing: String,
    pub title: String,
    pub duration: String,
    pub elapsed: String,
    pub progress: f64,
    pub seek_min: f64,
    pub seek_max: f64,
    pub seek_value: f64,
    pub prev: NavRegion,
    pub next: NavRegion,
    pub play_control: PlayControlFlags,
    pub container: ContainerFlags,
    /// Every notice written, oldest first
    pub notices: Vec<String>,
}

impl DisplayModel {
    pub fn nav(&self, slot: NavSlot) -> &NavRegion {
        match slot {
            NavSlot::Prev => &self.prev,
            NavSlot::Next => &self.next,
        }
    }

    /// Progress as a CSS-style width, e.g. `49.6%`
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress)
    }
}

impl DisplaySurface for DisplayModel {
    fn set_artwork(&mut self, url: &str) {
        self.artwork = url.to_string();
    }

    fn set_now_playing(&mut self, text: &str) {
        self.now_playing = text.to_string();
    }

    fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
    }

    fn set_duration(&mut self, text: &str) {
        self.duration = text.to_string();
    }

    fn set_elapsed(&mut self, text: &str) {
        self.elapsed = text.to_string();
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = percent;
    }

    fn set_seek_range(&mut self, min: f64, max: f64) {
        self.seek_min = min;
        self.seek_max = max;
    }

    fn set_seek_value(&mut self, value: f64) {
        self.seek_value = value;
    }

    fn set_nav(&mut self, slot: NavSlot, label: &str, target: Option<&str>) {
        let region = match slot {
            NavSlot::Prev => &mut self.prev,
            NavSlot::Next => &mut self.next,
        };
        region.label = label.to_string();
        region.target = target.map(str::to_string);
    }

    fn set_play_control(&mut self, flags: PlayControlFlags) {
        self.play_control = flags;
    }

    fn set_container(&mut self, flags: ContainerFlags) {
        self.container = flags;
    }

    fn notice(&mut self, text: &str) {
        self.notices.push(text.to_string());
    }
}
