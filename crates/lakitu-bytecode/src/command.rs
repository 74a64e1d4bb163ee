//! Byte-packing helpers shared by the geography and population codecs.

/// Blocks per page.
pub(crate) const PAGE_WIDTH: u32 = 16;

/// Bit 7 of a command's flag byte: advance to the next page before
/// interpreting the command.
pub(crate) const NEW_PAGE_FLAG: u8 = 0b1000_0000;

/// An actor's X position within its page, ready for the high nibble of
/// the command's first byte.
pub(crate) fn relative_x(x: u32) -> u8 {
    u8::try_from(x % PAGE_WIDTH).unwrap_or(0)
}

/// The page an absolute X coordinate falls on.
pub(crate) fn page_of(x: u32) -> u32 {
    x / PAGE_WIDTH
}

/// Walks pages while emitting commands in X order.
///
/// For each actor the walker decides between three encodings: same page
/// (no flag), next page (new-page flag on the command), or a jump of two
/// or more pages (a separate page-set command first).
pub(crate) struct PageWalker {
    page: u32,
}

pub(crate) enum PageStep {
    /// Emit the command with no flag.
    Stay,
    /// Emit the command with [`NEW_PAGE_FLAG`] set.
    Advance,
    /// Emit a page-set command targeting this page, then the command
    /// with no flag.
    Jump(u8),
}

impl PageWalker {
    pub(crate) fn new() -> Self {
        Self { page: 0 }
    }

    pub(crate) fn step_to(&mut self, x: u32) -> PageStep {
        let target = page_of(x);
        if target == self.page + 1 {
            self.page = target;
            PageStep::Advance
        } else if target > self.page {
            self.page = target;
            // Page numbers are 6 bits on the wire.
            PageStep::Jump(u8::try_from(target & 0x3F).unwrap_or(0x3F))
        } else {
            // Same page, or behind the current page; the game engine
            // never scrolls back, so no flag is emitted.
            PageStep::Stay
        }
    }
}
