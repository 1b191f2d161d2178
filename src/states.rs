use bitflags::bitflags;

bitflags! {
    /// Interaction states a host tracks per mounted element.
    ///
    /// Only `FOCUS` selects extension styles today; the other states are
    /// tracked so hosts can share one state word with their own widgets.
    ///
    /// # Example
    ///
    /// ```
    /// use extended_styles::InteractionStates;
    ///
    /// let mut states = InteractionStates::empty();
    /// states |= InteractionStates::FOCUS;
    ///
    /// assert!(states.is_focused());
    /// assert!(!states.contains(InteractionStates::PRESSED));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InteractionStates: u8 {
        /// Element has keyboard/input focus
        const FOCUS    = 0b0000_0001;
        /// Pointer is over the element
        const HOVER    = 0b0000_0010;
        /// Element is being pressed
        const PRESSED  = 0b0000_0100;
        /// Element does not accept input
        const DISABLED = 0b0000_1000;
    }
}

impl InteractionStates {
    pub fn is_focused(&self) -> bool {
        self.contains(Self::FOCUS)
    }
}
