use crate::diff::payload::DiffPayload;

/// Callback invoked with the new value and the payload that produced it
pub type ChangeHandler<V, C> = Box<dyn FnMut(&V, &DiffPayload<C>) + Send>;

/// Returned by `connect`, pass it back to `disconnect`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerKey(u64);

/// An ordered list of change handlers
pub struct Signal<V, C> {
    next_key: u64,
    handlers: Vec<(HandlerKey, ChangeHandler<V, C>)>,
}

impl<V, C> Default for Signal<V, C> {
    fn default() -> Self {
        Self {
            next_key: 0,
            handlers: Vec::new(),
        }
    }
}

impl<V, C> Signal<V, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect<F>(&mut self, handler: F) -> HandlerKey
    where
        F: FnMut(&V, &DiffPayload<C>) + Send + 'static,
    {
        let key = HandlerKey(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.handlers.push((key, Box::new(handler)));
        key
    }

    pub fn disconnect(&mut self, key: &HandlerKey) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_key, _)| handler_key != key);
        before != self.handlers.len()
    }

    /// Call every handler in connection order
    pub fn fire(&mut self, value: &V, payload: &DiffPayload<C>) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(value, payload);
        }
    }

    pub fn fire_one(&mut self, key: &HandlerKey, value: &V, payload: &DiffPayload<C>) {
        if let Some((_, handler)) = self
            .handlers
            .iter_mut()
            .find(|(handler_key, _)| handler_key == key)
        {
            handler(value, payload);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
