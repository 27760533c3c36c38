//! Named event dispatch.

use hashbrown::HashMap;

use crate::trigger::StateTrigger;

pub type Listener = Box<dyn FnMut(&str) + Send>;

/// Routes fired event names to the listeners registered under them.
#[derive(Default)]
pub struct EventReceiver {
    listeners: HashMap<String, Vec<Listener>>,
}

impl std::fmt::Debug for EventReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .listeners
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventReceiver")
            .field("listeners", &counts)
            .finish()
    }
}

impl EventReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, event_name: impl Into<String>, listener: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.listeners
            .entry(event_name.into())
            .or_default()
            .push(Box::new(listener));
    }

    /// Run every listener for `event_name` in registration order. Returns how many ran.
    pub fn dispatch(&mut self, event_name: &str) -> usize {
        match self.listeners.get_mut(event_name) {
            Some(listeners) => {
                for listener in listeners.iter_mut() {
                    listener(event_name);
                }
                listeners.len()
            }
            None => {
                log::trace!("no listeners for animation event '{event_name}'");
                0
            }
        }
    }

    pub fn remove(&mut self, event_name: &str) -> bool {
        self.listeners.remove(event_name).is_some()
    }

    pub fn contains(&self, event_name: &str) -> bool {
        self.listeners.contains_key(event_name)
    }

    /// Number of distinct event names with listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Every trigger attached to one animation state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateEvents {
    triggers: Vec<StateTrigger>,
}

impl StateEvents {
    pub fn new(triggers: Vec<StateTrigger>) -> Self {
        Self { triggers }
    }

    pub fn triggers(&self) -> &[StateTrigger] {
        &self.triggers
    }

    pub fn enter(&mut self) {
        self.triggers.iter_mut().for_each(StateTrigger::enter);
    }

    pub fn exit(&mut self) {
        self.triggers.iter_mut().for_each(StateTrigger::exit);
    }

    /// Tick every trigger without dispatching; returns fired names in declaration order.
    pub fn poll(&mut self, progress: f32) -> Vec<String> {
        self.triggers
            .iter_mut()
            .filter_map(|t| t.tick(progress).map(str::to_string))
            .collect()
    }

    /// Tick every trigger and dispatch those that fire, in declaration order.
    pub fn tick(&mut self, progress: f32, receiver: &mut EventReceiver) -> Vec<String> {
        let fired = self.poll(progress);
        for name in &fired {
            receiver.dispatch(name);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn dispatch_runs_all_listeners_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut rx = EventReceiver::new();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            rx.on("jump", move |name| seen.lock().unwrap().push(format!("{tag}:{name}")));
        }
        assert_eq!(rx.dispatch("jump"), 2);
        assert_eq!(*seen.lock().unwrap(), vec!["first:jump", "second:jump"]);
    }

    #[test]
    fn unknown_event_is_a_noop() {
        let mut rx = EventReceiver::new();
        assert_eq!(rx.dispatch("missing"), 0);
        assert!(rx.is_empty());
    }

    #[test]
    fn remove_drops_listeners() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut rx = EventReceiver::new();
        let h = Arc::clone(&hits);
        rx.on("land", move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert!(rx.contains("land"));
        assert!(rx.remove("land"));
        assert!(!rx.remove("land"));
        assert_eq!(rx.dispatch("land"), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn state_events_dispatch_each_trigger_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut rx = EventReceiver::new();
        let h = Arc::clone(&hits);
        rx.on("apex", move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        let mut events = StateEvents::new(vec![
            StateTrigger::new("apex", 0.5),
            StateTrigger::new("land", 0.9),
        ]);
        events.enter();
        assert!(events.tick(0.1, &mut rx).is_empty());
        assert_eq!(events.tick(0.95, &mut rx), vec!["apex", "land"]);
        assert!(events.tick(1.95, &mut rx).is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        events.exit();
        events.enter();
        assert_eq!(events.tick(0.6, &mut rx), vec!["apex"]);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn poll_reports_without_dispatch() {
        let mut events = StateEvents::new(vec![StateTrigger::new("apex", 0.5)]);
        assert!(events.poll(0.9).is_empty());
        events.enter();
        assert_eq!(events.poll(0.9), vec!["apex"]);
        assert!(events.triggers()[0].has_fired());
    }

    #[test]
    fn debug_lists_listener_counts() {
        let mut rx = EventReceiver::new();
        rx.on("b", |_| {});
        rx.on("a", |_| {});
        rx.on("a", |_| {});
        assert_eq!(
            format!("{rx:?}"),
            r#"EventReceiver { listeners: [("a", 2), ("b", 1)] }"#
        );
    }
}
