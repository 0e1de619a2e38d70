use crate::{diff::payload::DiffPayload, types::ObserverKey};

/// Who a payload is addressed to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipients {
    All,
    /// Every observer except those listed, usually the ones holding an override
    AllExcept(Vec<ObserverKey>),
    One(ObserverKey),
}

impl Recipients {
    pub(crate) fn all_except(excluded: Vec<ObserverKey>) -> Self {
        if excluded.is_empty() {
            Recipients::All
        } else {
            Recipients::AllExcept(excluded)
        }
    }

    pub fn includes(&self, observer: &ObserverKey) -> bool {
        match self {
            Recipients::All => true,
            Recipients::AllExcept(excluded) => !excluded.contains(observer),
            Recipients::One(target) => target == observer,
        }
    }
}

/// A payload ready to be handed to a role for delivery
#[derive(Clone, Debug, PartialEq)]
pub struct Outbound<C> {
    pub recipients: Recipients,
    pub payload: DiffPayload<C>,
}

impl<C> Outbound<C> {
    pub fn new(recipients: Recipients, payload: DiffPayload<C>) -> Self {
        Self {
            recipients,
            payload,
        }
    }

    pub fn to_one(observer: ObserverKey, payload: DiffPayload<C>) -> Self {
        Self::new(Recipients::One(observer), payload)
    }
}
