//! Timed status overlays
//!
//! Short messages confirming a physical button press. While one is showing
//! it owns the screen.

/// Overlay message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverlayKind {
    /// Device switched on or off
    Power(bool),
    /// Test mode switched on or off
    TestMode(bool),
    /// Sleep override activated or released
    OverrideSleep(bool),
    /// New tap duration (ms)
    TapDuration(u16),
}

impl OverlayKind {
    /// Default display time (ms)
    pub const fn duration_ms(self) -> u16 {
        match self {
            OverlayKind::TapDuration(_) => 1000,
            _ => 1500,
        }
    }

    /// Default priority; power changes win over everything else
    pub const fn priority(self) -> u8 {
        match self {
            OverlayKind::Power(_) => 2,
            _ => 1,
        }
    }
}

/// An overlay shown at a given time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overlay {
    kind: OverlayKind,
    start_ms: u32,
    duration_ms: u16,
    priority: u8,
}

impl Overlay {
    pub const fn new(kind: OverlayKind, start_ms: u32, duration_ms: u16, priority: u8) -> Self {
        Self {
            kind,
            start_ms,
            duration_ms,
            priority,
        }
    }

    /// Overlay with the kind's default duration and priority
    pub const fn standard(kind: OverlayKind, start_ms: u32) -> Self {
        Self::new(kind, start_ms, kind.duration_ms(), kind.priority())
    }

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Check if the overlay is still showing at `now_ms`
    pub fn is_active(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.start_ms) < u32::from(self.duration_ms)
    }
}

/// Holder for the overlay currently owning the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OverlaySlot {
    current: Option<Overlay>,
}

impl OverlaySlot {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Offer an overlay
    ///
    /// It replaces the current one if that has expired or has a priority no
    /// higher than the new one. Returns whether it was accepted.
    pub fn show(&mut self, overlay: Overlay) -> bool {
        let accept = match self.current {
            Some(current) => {
                !current.is_active(overlay.start_ms) || overlay.priority >= current.priority
            }
            None => true,
        };
        if accept {
            self.current = Some(overlay);
        }
        accept
    }

    /// Overlay showing at `now_ms`, if any
    pub fn active(&self, now_ms: u32) -> Option<&Overlay> {
        self.current.as_ref().filter(|o| o.is_active(now_ms))
    }

    /// Drop the current overlay once it has run out
    ///
    /// Must be called every tick so an old overlay cannot reappear after
    /// the millisecond counter wraps.
    pub fn expire(&mut self, now_ms: u32) {
        if self.current.is_some_and(|o| !o.is_active(now_ms)) {
            self.current = None;
        }
    }

    /// Drop the current overlay
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_expires() {
        let mut slot = OverlaySlot::new();
        slot.show(Overlay::new(OverlayKind::TestMode(true), 100, 500, 0));
        assert!(slot.active(100).is_some());
        assert!(slot.active(599).is_some());
        assert!(slot.active(600).is_none());
    }

    #[test]
    fn test_lower_priority_rejected_while_active() {
        let mut slot = OverlaySlot::new();
        assert!(slot.show(Overlay::standard(OverlayKind::Power(false), 0)));
        assert!(!slot.show(Overlay::standard(OverlayKind::TapDuration(12), 10)));
        assert_eq!(slot.active(10).unwrap().kind(), OverlayKind::Power(false));

        // Accepted once the first one has expired
        assert!(slot.show(Overlay::standard(OverlayKind::TapDuration(12), 2000)));
        assert_eq!(slot.active(2000).unwrap().kind(), OverlayKind::TapDuration(12));
    }

    #[test]
    fn test_equal_priority_replaces() {
        let mut slot = OverlaySlot::new();
        slot.show(Overlay::standard(OverlayKind::TapDuration(10), 0));
        assert!(slot.show(Overlay::standard(OverlayKind::TapDuration(11), 5)));
        assert_eq!(slot.active(5).unwrap().kind(), OverlayKind::TapDuration(11));
    }

    #[test]
    fn test_expiry_across_rollover() {
        let mut slot = OverlaySlot::new();
        let start = u32::MAX - 100;
        slot.show(Overlay::new(OverlayKind::OverrideSleep(true), start, 500, 1));
        assert!(slot.active(start.wrapping_add(300)).is_some());
        assert!(slot.active(start.wrapping_add(500)).is_none());
    }

    #[test]
    fn test_expired_overlay_stays_gone_after_wrap() {
        let mut slot = OverlaySlot::new();
        slot.show(Overlay::standard(OverlayKind::Power(false), 0));
        slot.expire(1_000);
        assert!(slot.active(1_000).is_some());
        slot.expire(1_500);
        assert!(slot.active(1_500).is_none());
        slot.expire(u32::MAX / 2);
        assert!(slot.active(100).is_none());
    }

    #[test]
    fn test_clear() {
        let mut slot = OverlaySlot::new();
        slot.show(Overlay::standard(OverlayKind::Power(true), 0));
        slot.clear();
        assert!(slot.active(0).is_none());
    }
}
