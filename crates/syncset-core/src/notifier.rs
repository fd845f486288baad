//! Observer registry fired while a follower applies a delta.

use crate::op::OpKind;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer<T> = Box<dyn FnMut(OpKind, Option<&T>) + Send>;

/// Ordered list of observers called as `(kind, item)`; `item` is `None` for
/// `Clear`.
pub struct ChangeNotifier<T> {
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_id: u64,
}

impl<T> ChangeNotifier<T> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register an observer. Observers run in registration order.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(OpKind, Option<&T>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Call every observer once. A panicking observer is logged and skipped;
    /// the remaining observers still run.
    pub fn notify(&mut self, kind: OpKind, item: Option<&T>) {
        for (id, observer) in self.observers.iter_mut() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer(kind, item)));
            if outcome.is_err() {
                tracing::warn!(subscription = id.0, %kind, "change observer panicked");
            }
        }
    }
}

impl<T> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ChangeNotifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut notifier: ChangeNotifier<u32> = ChangeNotifier::new();

        for name in ["first", "second"] {
            let calls = Arc::clone(&calls);
            notifier.subscribe(move |kind, item: Option<&u32>| {
                calls.lock().unwrap().push((name, kind, item.copied()));
            });
        }

        notifier.notify(OpKind::Add, Some(&7));
        notifier.notify(OpKind::Clear, None);

        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                ("first", OpKind::Add, Some(7)),
                ("second", OpKind::Add, Some(7)),
                ("first", OpKind::Clear, None),
                ("second", OpKind::Clear, None),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Arc::new(Mutex::new(0));
        let mut notifier: ChangeNotifier<u32> = ChangeNotifier::new();

        let counter = Arc::clone(&hits);
        let id = notifier.subscribe(move |_, _| *counter.lock().unwrap() += 1);

        notifier.notify(OpKind::Add, Some(&1));
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify(OpKind::Add, Some(&2));

        assert_eq!(*hits.lock().unwrap(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_panicking_observer_does_not_stop_others() {
        let hits = Arc::new(Mutex::new(0));
        let mut notifier: ChangeNotifier<u32> = ChangeNotifier::new();

        notifier.subscribe(|_, _| panic!("observer failure"));
        let counter = Arc::clone(&hits);
        notifier.subscribe(move |_, _| *counter.lock().unwrap() += 1);

        notifier.notify(OpKind::Remove, Some(&3));
        notifier.notify(OpKind::Remove, Some(&4));

        assert_eq!(*hits.lock().unwrap(), 2);
    }
}
