use std::io::{IsTerminal, Write};

const BAR_WIDTH: usize = 40;

/// Receives batch progress from the driver.
pub trait Progress {
    fn advance(&mut self, done: usize, total: usize);

    fn finish(&mut self) {}
}

/// Ignores all progress.
#[cfg(test)]
pub struct Silent;

#[cfg(test)]
impl Progress for Silent {
    fn advance(&mut self, _done: usize, _total: usize) {}
}

/// In-place progress bar on stderr, drawn only when stderr is a terminal.
pub struct TerminalBar {
    label: &'static str,
    enabled: bool,
    drawn: bool,
}

impl TerminalBar {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            enabled: std::io::stderr().is_terminal(),
            drawn: false,
        }
    }
}

impl Progress for TerminalBar {
    fn advance(&mut self, done: usize, total: usize) {
        if !self.enabled {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        // stderr write errors are ignored
        let _ = write!(stderr, "\r{} {}", self.label, render_bar(done, total, BAR_WIDTH));
        let _ = stderr.flush();
        self.drawn = true;
    }

    fn finish(&mut self) {
        if self.drawn {
            eprintln!();
            self.drawn = false;
        }
    }
}

pub(crate) fn render_bar(done: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        width
    } else {
        (done.min(total) * width) / total
    };
    format!(
        "[{}{}] {}/{}",
        "=".repeat(filled),
        " ".repeat(width - filled),
        done,
        total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 4, "[        ] 0/4")]
    #[case(1, 4, "[==      ] 1/4")]
    #[case(3, 4, "[======  ] 3/4")]
    #[case(4, 4, "[========] 4/4")]
    #[case(0, 0, "[========] 0/0")]
    fn bar_fills_in_proportion(#[case] done: usize, #[case] total: usize, #[case] expected: &str) {
        assert_eq!(render_bar(done, total, 8), expected);
    }
}
