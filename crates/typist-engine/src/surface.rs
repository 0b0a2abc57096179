//! Output surfaces the sequencer writes to.

use typist_core::Glyph;

use crate::sequencer::Status;

/// A single mutable text container.
///
/// The sequencer reports every glyph it reveals or removes, in order. The
/// surface is owned by one sequencer for its whole lifetime.
pub trait OutputSurface {
    /// Whether the surface can currently receive output.
    ///
    /// Checked once when the sequencer is built.
    fn is_attached(&self) -> bool {
        true
    }

    /// A glyph was appended to the visible buffer.
    fn insert(&mut self, glyph: Glyph);

    /// The trailing glyph was removed from the visible buffer.
    fn remove(&mut self, glyph: Glyph);

    /// The sequencer reached a terminal state.
    fn finish(&mut self, _status: Status) {}
}

impl<S: OutputSurface + ?Sized> OutputSurface for &mut S {
    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn insert(&mut self, glyph: Glyph) {
        (**self).insert(glyph)
    }

    fn remove(&mut self, glyph: Glyph) {
        (**self).remove(glyph)
    }

    fn finish(&mut self, status: Status) {
        (**self).finish(status)
    }
}

impl<S: OutputSurface + ?Sized> OutputSurface for Box<S> {
    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn insert(&mut self, glyph: Glyph) {
        (**self).insert(glyph)
    }

    fn remove(&mut self, glyph: Glyph) {
        (**self).remove(glyph)
    }

    fn finish(&mut self, status: Status) {
        (**self).finish(status)
    }
}

/// One mutation observed by a [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Inserted(Glyph),
    Removed(Glyph),
}

/// Surface that keeps a log of every mutation and a mirror of the text.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
    glyphs: Vec<Glyph>,
    finished: Option<Status>,
    attached: bool,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            glyphs: Vec::new(),
            finished: None,
            attached: true,
        }
    }

    /// A surface that reports itself as not attached.
    pub fn detached() -> Self {
        Self {
            attached: false,
            ..Self::new()
        }
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Mirrored text without emphasis.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }

    /// Terminal status reported by the sequencer, if any.
    pub fn finished(&self) -> Option<Status> {
        self.finished
    }
}

impl OutputSurface for RecordingSurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn insert(&mut self, glyph: Glyph) {
        self.events.push(SurfaceEvent::Inserted(glyph));
        self.glyphs.push(glyph);
    }

    fn remove(&mut self, glyph: Glyph) {
        self.events.push(SurfaceEvent::Removed(glyph));
        self.glyphs.pop();
    }

    fn finish(&mut self, status: Status) {
        self.finished = Some(status);
    }
}
