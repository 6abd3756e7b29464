//! Change notifications for the board position.
//!
//! Events carry no payload. Observers get the read-only
//! [`BoardPositionView`] and pull whatever they need from it. When one
//! action changes both values, [`BoardPositionEvent::NumberOfBoardPositionsChanged`]
//! is always delivered before [`BoardPositionEvent::CurrentBoardPositionChanged`].

use std::fmt;

use crate::board_position::BoardPositionView;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoardPositionEvent {
    NumberOfBoardPositionsChanged,
    CurrentBoardPositionChanged,
}

/// Receives board position events.
///
/// Any `FnMut(BoardPositionEvent, &BoardPositionView)` closure is an observer.
pub trait BoardPositionObserver {
    fn board_position_changed(&mut self, event: BoardPositionEvent, view: &BoardPositionView<'_>);
}

impl<F> BoardPositionObserver for F
where
    F: FnMut(BoardPositionEvent, &BoardPositionView<'_>),
{
    fn board_position_changed(&mut self, event: BoardPositionEvent, view: &BoardPositionView<'_>) {
        self(event, view)
    }
}

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn BoardPositionObserver>)>,
}

impl ObserverRegistry {
    pub fn subscribe(&mut self, observer: Box<dyn BoardPositionObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(i, _)| *i != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `event` to every observer in subscription order.
    pub fn notify(&mut self, event: BoardPositionEvent, view: &BoardPositionView<'_>) {
        tracing::trace!(?event, observers = self.observers.len(), "notifying");
        for (_, observer) in &mut self.observers {
            observer.board_position_changed(event, view);
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
