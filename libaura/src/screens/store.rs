//! Observable state holder shared by the screens
//!
//! A `Store` keeps the latest snapshot in a `tokio::sync::watch` channel.
//! Every transition goes through the screen's pure reducer and replaces the
//! snapshot as a whole, so subscribers never observe a half-applied update.

use tokio::sync::watch;

/// Pure state transition: `(State, Action) -> State`
pub trait Reducer: Clone {
    type Action;

    fn reduce(self, action: Self::Action) -> Self;
}

#[derive(Debug)]
pub struct Store<S> {
    sender: watch::Sender<S>,
}

impl<S: Reducer> Store<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Latest published snapshot
    pub fn state(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Receiver that sees every snapshot published from now on
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    /// Apply an action and publish the result
    pub fn dispatch(&self, action: S::Action) -> S {
        self.sender.send_modify(|state| {
            *state = state.clone().reduce(action);
        });
        self.state()
    }

    /// Apply an action only if `guard` accepts the current snapshot
    ///
    /// The check and the update happen under the channel's lock, so two
    /// callers cannot both pass the guard for the same snapshot.
    pub fn dispatch_if<G>(&self, guard: G, action: S::Action) -> bool
    where
        G: FnOnce(&S) -> bool,
    {
        self.sender.send_if_modified(|state| {
            if guard(state) {
                *state = state.clone().reduce(action);
                true
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter(u32);

    impl Reducer for Counter {
        type Action = u32;

        fn reduce(self, action: u32) -> Self {
            Counter(self.0 + action)
        }
    }

    #[test]
    fn test_dispatch_publishes() {
        let store = Store::new(Counter(0));
        let receiver = store.subscribe();

        assert_eq!(store.dispatch(2), Counter(2));
        assert_eq!(*receiver.borrow(), Counter(2));
        assert_eq!(store.state(), Counter(2));
    }

    #[test]
    fn test_dispatch_if_respects_guard() {
        let store = Store::new(Counter(1));

        assert!(!store.dispatch_if(|c| c.0 == 0, 5));
        assert_eq!(store.state(), Counter(1));

        assert!(store.dispatch_if(|c| c.0 == 1, 5));
        assert_eq!(store.state(), Counter(6));
    }

    #[tokio::test]
    async fn test_subscriber_is_notified() {
        let store = Store::new(Counter(0));
        let mut receiver = store.subscribe();

        store.dispatch(1);
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), Counter(1));
    }
}
