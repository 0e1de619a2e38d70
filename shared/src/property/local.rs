use crate::{
    diff::payload::DiffPayload,
    property::{BatchedProperty, Property},
    role::LocalSimulationRole,
    shape::ReplicaShape,
    signal::HandlerKey,
};

impl<S: ReplicaShape> Property<S, LocalSimulationRole<S>> {
    /// Subscribe to every value change the local viewer sees
    pub fn on_changed<F>(&mut self, handler: F) -> HandlerKey
    where
        F: FnMut(&S::Value, &DiffPayload<S::Change>) + Send + 'static,
    {
        self.role.connect(handler)
    }

    /// Like [`Property::on_changed`], but also called right away with the
    /// current value when there is one
    pub fn observe<F>(&mut self, handler: F) -> HandlerKey
    where
        F: FnMut(&S::Value, &DiffPayload<S::Change>) + Send + 'static,
    {
        let key = self.role.connect(handler);
        let value = self.role.local_value(&self.state);
        if !S::is_vacant(value) {
            let payload = S::full_payload(value);
            self.role.fire_one(&key, value, &payload);
        }
        key
    }

    pub fn disconnect(&mut self, key: &HandlerKey) -> bool {
        self.role.disconnect(key)
    }

    pub fn get_local(&self) -> S::Value {
        self.role.local_value(&self.state).clone()
    }
}

impl<S: ReplicaShape> BatchedProperty<S, LocalSimulationRole<S>> {
    pub fn on_changed<F>(&mut self, handler: F) -> HandlerKey
    where
        F: FnMut(&S::Value, &DiffPayload<S::Change>) + Send + 'static,
    {
        self.role.connect(handler)
    }

    pub fn observe<F>(&mut self, handler: F) -> HandlerKey
    where
        F: FnMut(&S::Value, &DiffPayload<S::Change>) + Send + 'static,
    {
        let key = self.role.connect(handler);
        let value = self.role.local_value(&self.state);
        if !S::is_vacant(value) {
            let payload = S::full_payload(value);
            self.role.fire_one(&key, value, &payload);
        }
        key
    }

    pub fn disconnect(&mut self, key: &HandlerKey) -> bool {
        self.role.disconnect(key)
    }

    pub fn get_local(&self) -> S::Value {
        self.role.local_value(&self.state).clone()
    }
}
