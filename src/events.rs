/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of reduction-drive.
 *
 * reduction-drive is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * reduction-drive is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with reduction-drive. If not, see <https://www.gnu.org/licenses/>.
 */

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::error;

use crate::error::Result;
use crate::traits::WheelPart;

/// Fired whenever the editing collaborator reports a modification anywhere
/// on the vehicle. The event carries no payload identifying which field
/// changed; listeners do their own diffing.
pub trait EditorModifiedListener {
    fn on_editor_modified(&mut self, part: &mut dyn WheelPart) -> Result<()>;
}

pub type ListenerHandle = u64;

/// Single-threaded editor-modified dispatch list. Listeners are held weakly;
/// a listener dropped by its owner is pruned on the next fire.
#[derive(Default)]
pub struct EditorEvents {
    listeners: Vec<(ListenerHandle, Weak<RefCell<dyn EditorModifiedListener>>)>,
    next_handle: ListenerHandle,
}

impl EditorEvents {
    pub fn new() -> Rc<RefCell<EditorEvents>> {
        Rc::new(RefCell::new(EditorEvents::default()))
    }

    /// Register a listener for the lifetime of the returned subscription.
    /// Dropping the subscription deregisters on every exit path.
    pub fn subscribe<L>(events: &Rc<RefCell<EditorEvents>>,
                        listener: &Rc<RefCell<L>>) -> EditorSubscription
        where L: EditorModifiedListener + 'static
    {
        let listener: Rc<RefCell<dyn EditorModifiedListener>> = listener.clone();
        let weak: Weak<RefCell<dyn EditorModifiedListener>> = Rc::downgrade(&listener);
        let mut inner = events.borrow_mut();
        let handle = inner.next_handle;
        inner.next_handle += 1;
        inner.listeners.push((handle, weak));
        EditorSubscription {
            events: Rc::downgrade(events),
            handle,
        }
    }

    /// Dispatch the modification notification to every live listener.
    /// Listener errors are logged, never propagated back to the host.
    pub fn fire(&mut self, part: &mut dyn WheelPart) {
        self.listeners.retain(|(_, weak)| weak.strong_count() > 0);
        for (_, weak) in &self.listeners {
            if let Some(listener) = weak.upgrade() {
                if let Err(e) = listener.borrow_mut().on_editor_modified(part) {
                    error!("Editor modified listener failed. {}", e.to_string());
                }
            }
        }
    }

    pub fn num_listeners(&self) -> usize {
        self.listeners.len()
    }

    fn remove(&mut self, handle: ListenerHandle) {
        self.listeners.retain(|(h, _)| *h != handle);
    }
}

pub struct EditorSubscription {
    events: Weak<RefCell<EditorEvents>>,
    handle: ListenerHandle,
}

impl Drop for EditorSubscription {
    fn drop(&mut self) {
        if let Some(events) = self.events.upgrade() {
            events.borrow_mut().remove(self.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::error::Result;
    use crate::events::{EditorEvents, EditorModifiedListener};
    use crate::part::StandalonePart;
    use crate::traits::WheelPart;

    #[derive(Default)]
    struct CountingListener {
        notifications: u32,
    }

    impl EditorModifiedListener for CountingListener {
        fn on_editor_modified(&mut self, _part: &mut dyn WheelPart) -> Result<()> {
            self.notifications += 1;
            Ok(())
        }
    }

    #[test]
    fn fire_reaches_subscribed_listener() {
        let events = EditorEvents::new();
        let listener = Rc::new(RefCell::new(CountingListener::default()));
        let _subscription = EditorEvents::subscribe(&events, &listener);

        let mut part = StandalonePart::default();
        events.borrow_mut().fire(&mut part);
        events.borrow_mut().fire(&mut part);
        assert_eq!(listener.borrow().notifications, 2);
    }

    #[test]
    fn dropping_subscription_deregisters() {
        let events = EditorEvents::new();
        let listener = Rc::new(RefCell::new(CountingListener::default()));
        let subscription = EditorEvents::subscribe(&events, &listener);
        assert_eq!(events.borrow().num_listeners(), 1);

        drop(subscription);
        assert_eq!(events.borrow().num_listeners(), 0);

        let mut part = StandalonePart::default();
        events.borrow_mut().fire(&mut part);
        assert_eq!(listener.borrow().notifications, 0);
    }

    #[test]
    fn dropped_listener_is_pruned_on_fire() {
        let events = EditorEvents::new();
        let listener = Rc::new(RefCell::new(CountingListener::default()));
        let _subscription = EditorEvents::subscribe(&events, &listener);
        drop(listener);

        let mut part = StandalonePart::default();
        events.borrow_mut().fire(&mut part);
        assert_eq!(events.borrow().num_listeners(), 0);
    }
}
