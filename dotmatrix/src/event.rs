//! Click events and their listeners

use egui::Pos2;

/// A press on one dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotMatrixEvent {
    /// Column of the dot that was hit.
    pub x: usize,
    /// Row of the dot that was hit.
    pub y: usize,
    /// Pointer position in screen coordinates.
    pub screen_x: f32,
    pub screen_y: f32,
}

impl DotMatrixEvent {
    pub fn new(x: usize, y: usize, screen_pos: Pos2) -> Self {
        Self { x, y, screen_x: screen_pos.x, screen_y: screen_pos.y }
    }

    pub fn screen_pos(&self) -> Pos2 {
        Pos2::new(self.screen_x, self.screen_y)
    }
}

/// Handle returned by [`Listeners::add`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&DotMatrixEvent)>;

/// Ordered listener registry. Listeners run synchronously in the order
/// they were added.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Callback)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl FnMut(&DotMatrixEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fire(&mut self, event: &DotMatrixEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("len", &self.entries.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        for tag in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            listeners.add(move |e: &DotMatrixEvent| log.borrow_mut().push((tag, e.x, e.y)));
        }
        listeners.fire(&DotMatrixEvent::new(2, 3, Pos2::new(10.0, 20.0)));
        assert_eq!(*log.borrow(), vec![("a", 2, 3), ("b", 2, 3), ("c", 2, 3)]);
    }

    #[test]
    fn test_remove_and_clear() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::new();
        let c1 = Rc::clone(&count);
        let first = listeners.add(move |_| *c1.borrow_mut() += 1);
        let c2 = Rc::clone(&count);
        listeners.add(move |_| *c2.borrow_mut() += 10);

        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        listeners.fire(&DotMatrixEvent::new(0, 0, Pos2::ZERO));
        assert_eq!(*count.borrow(), 10);

        listeners.clear();
        assert!(listeners.is_empty());
        listeners.fire(&DotMatrixEvent::new(0, 0, Pos2::ZERO));
        assert_eq!(*count.borrow(), 10);
    }

    #[test]
    fn test_screen_pos() {
        let e = DotMatrixEvent::new(1, 1, Pos2::new(3.5, 4.5));
        assert_eq!(e.screen_pos(), Pos2::new(3.5, 4.5));
    }
}
