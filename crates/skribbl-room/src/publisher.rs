//! Typed subscribe/publish surface over [`RoomEvent`].
//!
//! Delivery is synchronous: `publish` runs every matching callback to
//! completion, in subscription order, before it returns. Callbacks also get
//! the [`RoomState`] as it stands after the update. Channel subscribers get a
//! clone pushed onto an unbounded tokio channel.

use std::fmt;

use tokio::sync::mpsc;

use crate::{EventKind, RoomEvent, RoomState};

/// Handle returned by every subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Callback = Box<dyn FnMut(&RoomEvent, &RoomState) + Send>;

enum Sink {
    Callback(Callback),
    Channel(mpsc::UnboundedSender<RoomEvent>),
}

struct Subscriber {
    id: SubscriptionId,
    /// `None` receives every event.
    kind: Option<EventKind>,
    sink: Sink,
}

/// Fan-out of room events to callbacks and channels.
#[derive(Default)]
pub struct EventPublisher {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl EventPublisher {
    /// A publisher with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `callback` for every event.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&RoomEvent, &RoomState) + Send + 'static,
    {
        self.add(None, Sink::Callback(Box::new(callback)))
    }

    /// Calls `callback` only for events of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&RoomEvent, &RoomState) + Send + 'static,
    {
        self.add(Some(kind), Sink::Callback(Box::new(callback)))
    }

    /// Every event, cloned onto an unbounded channel.
    ///
    /// Dropping the receiver ends the subscription on the next publish.
    pub fn channel(&mut self) -> mpsc::UnboundedReceiver<RoomEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.add(None, Sink::Channel(tx));
        rx
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|sub| sub.id != id);
        self.subscribers.len() != before
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Delivers `event` and returns how many subscribers received it.
    ///
    /// `state` must already reflect the update that produced `event`.
    pub fn publish(&mut self, event: &RoomEvent, state: &RoomState) -> usize {
        let kind = event.kind();
        let mut delivered = 0;

        self.subscribers.retain_mut(|sub| {
            if sub.kind.is_some_and(|wanted| wanted != kind) {
                return true;
            }
            match &mut sub.sink {
                Sink::Callback(callback) => {
                    callback(event, state);
                    delivered += 1;
                    true
                }
                Sink::Channel(tx) => {
                    if tx.send(event.clone()).is_ok() {
                        delivered += 1;
                        true
                    } else {
                        tracing::debug!(
                            subscription = %sub.id,
                            "event receiver dropped, unsubscribing"
                        );
                        false
                    }
                }
            }
        });

        delivered
    }

    fn add(&mut self, kind: Option<EventKind>, sink: Sink) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, kind, sink });
        id
    }
}

impl fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPublisher")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
