//! Terminal display adapter.
//!
//! Prints `Rotary Value: {position};{toggle}` whenever the rendered snapshot
//! differs from the last one. Identical snapshots are skipped so the
//! terminal only scrolls when the knob or button actually changed.

use std::io::Write;

use log::debug;

use crate::app::ports::DisplayPort;
use crate::app::shared::Snapshot;

pub struct TerminalDisplay<W: Write> {
    out: W,
    last: Option<Snapshot>,
}

impl TerminalDisplay<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplayPort for TerminalDisplay<W> {
    fn render(&mut self, snapshot: Snapshot) {
        if self.last == Some(snapshot) {
            return;
        }
        self.last = Some(snapshot);
        let written = writeln!(
            self.out,
            "Rotary Value: {};{}",
            snapshot.position,
            snapshot.toggle.as_u8()
        )
        .and_then(|()| self.out.flush());
        if let Err(e) = written {
            debug!("display: write failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::button::Toggle;

    #[test]
    fn renders_only_on_change() {
        let mut display = TerminalDisplay::new(Vec::new());
        let a = Snapshot { position: 5, toggle: Toggle::Off };
        let b = Snapshot { position: 5, toggle: Toggle::On };
        display.render(a);
        display.render(a);
        display.render(b);
        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(text, "Rotary Value: 5;0\nRotary Value: 5;1\n");
    }
}
