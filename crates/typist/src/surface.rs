//! Output surfaces used by the terminal front ends.

use std::io::{self, Write};
use std::sync::{Arc, RwLock};

use crossterm::{
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use tracing::warn;
use typist_core::Glyph;
use typist_engine::{OutputSurface, Status};

/// What the sequencer has shown so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub glyphs: Vec<Glyph>,
    /// Terminal status once the sequencer stops.
    pub status: Option<Status>,
}

/// Surface mirrored into shared memory so the UI thread can draw it.
///
/// The sequencer thread writes; the render loop reads with `try_read` and
/// keeps its previous snapshot when the lock is contended.
#[derive(Debug, Clone, Default)]
pub struct SharedSurface {
    inner: Arc<RwLock<Snapshot>>,
}

impl SharedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state, or `None` if a write is in progress.
    pub fn try_snapshot(&self) -> Option<Snapshot> {
        self.inner.try_read().ok().map(|s| s.clone())
    }

    fn update(&self, f: impl FnOnce(&mut Snapshot)) {
        if let Ok(mut snapshot) = self.inner.write() {
            f(&mut snapshot);
        }
    }
}

impl OutputSurface for SharedSurface {
    fn insert(&mut self, glyph: Glyph) {
        self.update(|s| s.glyphs.push(glyph));
    }

    fn remove(&mut self, _glyph: Glyph) {
        self.update(|s| {
            s.glyphs.pop();
        });
    }

    fn finish(&mut self, status: Status) {
        self.update(|s| s.status = Some(status));
    }
}

/// Surface that types straight into a terminal line.
///
/// Removals redraw the whole line, so wide and combining characters erase
/// cleanly.
#[derive(Debug)]
pub struct StdoutSurface<W: Write> {
    out: W,
    glyphs: Vec<Glyph>,
    error: Option<io::Error>,
}

impl<W: Write> StdoutSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            glyphs: Vec::new(),
            error: None,
        }
    }

    /// First write error, if any. Later output is skipped once one occurs.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(out: &mut W, glyph: Glyph) -> io::Result<()> {
        if glyph.emphasis.is_plain() {
            return queue!(out, Print(glyph.ch));
        }
        if glyph.emphasis.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if glyph.emphasis.italic {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if glyph.emphasis.underline {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }
        queue!(out, Print(glyph.ch), SetAttribute(Attribute::Reset))
    }

    fn redraw(&mut self) -> io::Result<()> {
        queue!(self.out, Print('\r'), Clear(ClearType::CurrentLine))?;
        for glyph in &self.glyphs {
            Self::print(&mut self.out, *glyph)?;
        }
        self.out.flush()
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            warn!(%err, "failed to write greeting");
            self.error.get_or_insert(err);
        }
    }
}

impl<W: Write> OutputSurface for StdoutSurface<W> {
    fn insert(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
        if self.error.is_some() {
            return;
        }
        let result = Self::print(&mut self.out, glyph).and_then(|_| self.out.flush());
        self.record(result);
    }

    fn remove(&mut self, _glyph: Glyph) {
        self.glyphs.pop();
        if self.error.is_some() {
            return;
        }
        let result = self.redraw();
        self.record(result);
    }

    fn finish(&mut self, _status: Status) {
        if self.error.is_some() {
            return;
        }
        let result = writeln!(self.out).and_then(|_| self.out.flush());
        self.record(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typist_core::Emphasis;

    #[test]
    fn test_shared_surface_mirrors_sequencer() {
        let surface = SharedSurface::new();
        let mut writer = surface.clone();

        writer.insert(Glyph::plain('o'));
        writer.insert(Glyph::plain('k'));
        writer.remove(Glyph::plain('k'));
        writer.finish(Status::Completed);

        let snapshot = surface.try_snapshot().unwrap();
        assert_eq!(snapshot.glyphs, vec![Glyph::plain('o')]);
        assert_eq!(snapshot.status, Some(Status::Completed));
    }

    #[test]
    fn test_stdout_surface_types_plain_text() {
        let mut surface = StdoutSurface::new(Vec::new());
        for ch in "Hallo".chars() {
            surface.insert(Glyph::plain(ch));
        }

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out, "Hallo");
    }

    #[test]
    fn test_stdout_surface_redraws_on_remove() {
        let mut surface = StdoutSurface::new(Vec::new());
        surface.insert(Glyph::plain('世'));
        surface.insert(Glyph::plain('界'));
        surface.remove(Glyph::plain('界'));
        surface.finish(Status::Completed);
        assert!(surface.take_error().is_none());

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert!(out.starts_with("世界\r"));
        assert!(out.ends_with("世\n"));
    }

    #[test]
    fn test_stdout_surface_styles_emphasis() {
        let mut surface = StdoutSurface::new(Vec::new());
        surface.insert(Glyph::new(
            'W',
            Emphasis {
                bold: true,
                ..Emphasis::PLAIN
            },
        ));

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert!(out.contains('W'));
        assert!(out.len() > 1);
    }
}
