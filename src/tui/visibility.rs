/// Open/closed state of a popover driven by its anchor.
///
/// The popover opens when created with an anchor or when a different,
/// present anchor arrives. Removing the anchor does not close it; only
/// [`Visibility::close`] does.
#[derive(Debug, Clone)]
pub struct Visibility<A> {
    anchor: Option<A>,
    open: bool,
}

impl<A: PartialEq> Visibility<A> {
    pub fn new(anchor: Option<A>) -> Self {
        let open = anchor.is_some();
        Self { anchor, open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn anchor(&self) -> Option<&A> {
        self.anchor.as_ref()
    }

    /// Record the host's current anchor. Returns true if this opened the popover.
    pub fn set_anchor(&mut self, anchor: Option<A>) -> bool {
        let changed = self.anchor != anchor;
        self.anchor = anchor;
        if changed && self.anchor.is_some() && !self.open {
            self.open = true;
            return true;
        }
        false
    }

    /// Close the popover, calling `on_close` once if it was open.
    pub fn close(&mut self, on_close: impl FnOnce()) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        on_close();
        true
    }
}
