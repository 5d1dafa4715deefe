//! Banner lines for marking the start and end of a run in a log

/// Banner layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerStyle {
    /// Total width of the two fill runs (default: 60)
    pub width: usize,
    /// Fill character (default: '-')
    pub fill: char,
    /// `Some(true)` appends "started", `Some(false)` appends "exiting"
    pub action: Option<bool>,
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            width: 60,
            fill: '-',
            action: None,
        }
    }
}

impl BannerStyle {
    /// Use the first character of `fill`, keeping the current fill if it is empty
    pub fn with_fill_str(mut self, fill: &str) -> Self {
        if let Some(c) = fill.chars().next() {
            self.fill = c;
        }
        self
    }
}

/// Center `text` between two runs of the fill character
pub fn banner(text: &str, style: &BannerStyle) -> String {
    let run: String = std::iter::repeat(style.fill).take(style.width / 2).collect();
    match style.action {
        Some(started) => {
            let action = if started { "started" } else { "exiting" };
            format!("{} {} {} {}", run, text, action, run)
        }
        None => format!("{} {} {}", run, text, run),
    }
}
