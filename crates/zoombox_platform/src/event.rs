//! Raw resize events delivered by the host

use std::fmt;

/// Where a raw resize was observed
///
/// The document and the viewport are treated as one combined source. Both
/// are kept distinct only so logs can tell them apart; a firing from each
/// is two separate occurrences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeSource {
    /// The hosting document
    Document,
    /// The viewport (window)
    Viewport,
}

/// What kind of raw occurrence this is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizeKind {
    /// Host finished loading; the first measurement pass
    Ready,
    /// The source changed size
    #[default]
    Resize,
}

/// A raw resize occurrence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResizeEvent {
    /// Source of the occurrence
    pub source: ResizeSource,
    /// Ready or resize
    pub kind: ResizeKind,
}

impl ResizeEvent {
    /// A resize observed on `source`
    pub fn resize(source: ResizeSource) -> Self {
        Self {
            source,
            kind: ResizeKind::Resize,
        }
    }

    /// The host ready notification for `source`
    pub fn ready(source: ResizeSource) -> Self {
        Self {
            source,
            kind: ResizeKind::Ready,
        }
    }
}

impl fmt::Display for ResizeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            ResizeSource::Document => "document",
            ResizeSource::Viewport => "viewport",
        };
        let kind = match self.kind {
            ResizeKind::Ready => "ready",
            ResizeKind::Resize => "resize",
        };
        write!(f, "{source}:{kind}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_kind_default() {
        assert_eq!(ResizeKind::default(), ResizeKind::Resize);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(
            ResizeEvent::resize(ResizeSource::Viewport).to_string(),
            "viewport:resize"
        );
        assert_eq!(
            ResizeEvent::ready(ResizeSource::Document).to_string(),
            "document:ready"
        );
    }
}
