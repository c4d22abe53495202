/// Portfolio page: loading placeholder for a fixed delay, then project cards
use std::time::{Duration, Instant};

/// How long the loading placeholder stays up before the content is revealed
pub const LOADING_DELAY: Duration = Duration::from_secs(2);

const SPINNER_FRAMES: &[char] = &['|', '/', '-', '\\'];

/// One static portfolio entry
pub struct ProjectCard {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

pub const PROJECTS: &[ProjectCard] = &[
    ProjectCard {
        title: "Professional Portfolio",
        description: "Resume, project history and contact details.",
        link: "https://spaceplushy.github.io/ProfessionalPortfolio/",
    },
    ProjectCard {
        title: "Shape Viewer",
        description: "The interactive 3D viewer on the Viewer page.",
        link: "https://github.com/spaceplushy/spinview",
    },
    ProjectCard {
        title: "Snake",
        description: "A small grid snake game, playable on the Snake page.",
        link: "https://github.com/spaceplushy/spinview",
    },
];

/// Tracks the reveal timer. The page shows a spinner until the fixed delay
/// elapses, then the cards; re-opening the page restarts the timer.
pub struct PortfolioPage {
    opened_at: Option<Instant>,
    loading: bool,
}

impl PortfolioPage {
    pub fn new() -> Self {
        Self {
            opened_at: None,
            loading: true,
        }
    }

    /// Restart the loading placeholder, called when the page is shown
    pub fn open(&mut self, now: Instant) {
        self.opened_at = Some(now);
        self.loading = true;
    }

    /// Advance the timer off the frame clock
    pub fn poll(&mut self, now: Instant) {
        if let Some(opened) = self.opened_at {
            if now.duration_since(opened) >= LOADING_DELAY {
                self.loading = false;
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn spinner_glyph(frame: u32) -> char {
        SPINNER_FRAMES[frame as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for PortfolioPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_after_delay() {
        let t0 = Instant::now();
        let mut page = PortfolioPage::new();
        page.open(t0);
        assert!(page.is_loading());

        page.poll(t0 + Duration::from_millis(1500));
        assert!(page.is_loading());

        page.poll(t0 + Duration::from_millis(2001));
        assert!(!page.is_loading());
    }

    #[test]
    fn test_reopen_restarts_timer() {
        let t0 = Instant::now();
        let mut page = PortfolioPage::new();
        page.open(t0);
        page.poll(t0 + Duration::from_secs(3));
        assert!(!page.is_loading());

        page.open(t0 + Duration::from_secs(4));
        assert!(page.is_loading());
        page.poll(t0 + Duration::from_secs(5));
        assert!(page.is_loading());
        page.poll(t0 + Duration::from_secs(7));
        assert!(!page.is_loading());
    }

    #[test]
    fn test_spinner_cycles() {
        let glyphs: Vec<char> = (0..4).map(PortfolioPage::spinner_glyph).collect();
        assert_eq!(glyphs, vec!['|', '/', '-', '\\']);
        assert_eq!(PortfolioPage::spinner_glyph(4), '|');
    }
}
