//! Scanline state machine
//!
//! A frame is a fixed number of lines. Each line has one horizontal sync
//! pulse followed by a run of pixel words. Vertical sync is asserted on one
//! line and released on a later one. The counter below decides what each
//! line must do; executing it against pins is the generator's job.

use crate::config::SignalTiming;

/// Vertical sync transition scheduled for a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VsyncEdge {
    /// Drive vertical sync low
    Assert,
    /// Drive vertical sync high
    Release,
}

impl VsyncEdge {
    /// Pin level for this edge (sync is active-low)
    pub const fn level(self) -> bool {
        matches!(self, VsyncEdge::Release)
    }
}

/// Everything one scanline has to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinePlan {
    /// Line index within the frame
    pub line: u16,
    /// Vertical sync change at the start of the line, if any
    pub vsync: Option<VsyncEdge>,
    /// Pixel counter value carried by the first word
    pub first_word: u16,
    /// Number of consecutive words to write
    pub word_count: u8,
}

impl LinePlan {
    /// Word values in write order, wrapping at 16 bits
    pub fn words(&self) -> impl Iterator<Item = u16> {
        let first = self.first_word;
        (0..self.word_count as u16).map(move |i| first.wrapping_add(i))
    }
}

/// Line and pixel counters for a running raster
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameCounter {
    timing: SignalTiming,
    line: u16,
    pixel: u16,
    frames: u32,
}

impl FrameCounter {
    /// Start at line 0 with a zero pixel counter
    pub const fn new(timing: SignalTiming) -> Self {
        Self {
            timing,
            line: 0,
            pixel: 0,
            frames: 0,
        }
    }

    /// Timing this counter was built with
    pub fn timing(&self) -> &SignalTiming {
        &self.timing
    }

    /// Line that the next call to [`advance`](Self::advance) will plan
    pub fn line(&self) -> u16 {
        self.line
    }

    /// Value the next pixel word will carry
    pub fn pixel(&self) -> u16 {
        self.pixel
    }

    /// Completed frames (wraps)
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Whether vertical sync is held low during `line`
    pub fn vsync_active(&self, line: u16) -> bool {
        line >= self.timing.vsync_start_line && line < self.timing.vsync_end_line
    }

    /// Vertical sync edge due at the start of `line`
    pub fn vsync_edge(&self, line: u16) -> Option<VsyncEdge> {
        if line == self.timing.vsync_start_line {
            Some(VsyncEdge::Assert)
        } else if line == self.timing.vsync_end_line {
            Some(VsyncEdge::Release)
        } else {
            None
        }
    }

    /// Plan the current line and move on to the next one
    ///
    /// Reserves `words_per_line` pixel values and wraps the line index back
    /// to 0 after the last line of the frame.
    pub fn advance(&mut self) -> LinePlan {
        let plan = LinePlan {
            line: self.line,
            vsync: self.vsync_edge(self.line),
            first_word: self.pixel,
            word_count: self.timing.words_per_line,
        };

        self.pixel = self
            .pixel
            .wrapping_add(self.timing.words_per_line as u16);

        self.line += 1;
        if self.line >= self.timing.lines_per_frame {
            self.line = 0;
            self.frames = self.frames.wrapping_add(1);
        }

        plan
    }

    /// Go back to line 0 and zero the pixel counter
    pub fn reset(&mut self) {
        self.line = 0;
        self.pixel = 0;
        self.frames = 0;
    }
}
