/// Input events a scene understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A single tap/click anywhere on the surface.
    Activate,
    /// The surface changed size.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// Hosts that cannot deliver input on the simulation thread push here; the
/// scene applies the queue, in order, at the next tick boundary.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_in_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Resize { width: 640.0, height: 480.0 });
        q.push(InputEvent::Activate);
        assert_eq!(q.len(), 2);
        let events: Vec<_> = q.drain().collect();
        assert_eq!(events[0], InputEvent::Resize { width: 640.0, height: 480.0 });
        assert_eq!(events[1], InputEvent::Activate);
        assert!(q.is_empty());
    }
}
