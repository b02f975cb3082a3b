//! Newline-delimited framing.

use bytes::{Bytes, BytesMut};

/// One frame read from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frame {
    /// A blank keep-alive line
    Heartbeat,
    /// A non-blank line with its terminator stripped
    Line(Bytes),
    /// A line longer than the limit; its bytes were discarded
    Oversized(usize),
}

/// Reassembles lines from arbitrarily split byte chunks.
///
/// Lines end with `\n`; a preceding `\r` is dropped. Lines that are blank
/// after trimming ASCII whitespace are heartbeats. A line that grows past
/// `max_line` bytes is dropped as it arrives and reported once, as
/// [`Frame::Oversized`], when its terminator is seen.
#[derive(Debug)]
pub(crate) struct LineBuffer {
    buf: BytesMut,
    /// Prefix of `buf` already known to contain no `\n`.
    scanned: usize,
    max_line: usize,
    /// Bytes dropped from the current oversized line.
    discarded: usize,
}

impl LineBuffer {
    pub(crate) fn new(max_line: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            scanned: 0,
            max_line: max_line.max(1),
            discarded: 0,
        }
    }

    /// Append a chunk read from the connection.
    pub(crate) fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Take the next complete frame, if one is buffered.
    pub(crate) fn next_frame(&mut self) -> Option<Frame> {
        let Some(offset) = self.buf[self.scanned..].iter().position(|&b| b == b'\n') else {
            if self.buf.len() > self.max_line {
                self.discarded += self.buf.len();
                self.buf.clear();
                self.scanned = 0;
            } else {
                self.scanned = self.buf.len();
            }
            return None;
        };

        let line = self.buf.split_to(self.scanned + offset + 1).freeze();
        self.scanned = 0;

        let total = std::mem::take(&mut self.discarded) + line.len();
        if total > self.max_line {
            return Some(Frame::Oversized(total));
        }
        Some(classify(line))
    }

    /// Bytes of an unterminated trailing line.
    pub(crate) fn pending(&self) -> usize {
        self.discarded + self.buf.len()
    }
}

fn classify(line: Bytes) -> Frame {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |p| p + 1);

    if start >= end {
        Frame::Heartbeat
    } else {
        Frame::Line(line.slice(start..end))
    }
}
