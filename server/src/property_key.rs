use std::{fmt, marker::PhantomData};

use quiver_shared::ChannelId;

/// Typed handle to a property owned by the [`Server`](crate::Server)
pub struct PropertyKey<P> {
    channel: ChannelId,
    phantom_p: PhantomData<fn() -> P>,
}

impl<P> PropertyKey<P> {
    pub(crate) fn new(channel: ChannelId) -> Self {
        Self {
            channel,
            phantom_p: PhantomData,
        }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }
}

impl<P> Clone for PropertyKey<P> {
    fn clone(&self) -> Self {
        Self::new(self.channel.clone())
    }
}

impl<P> PartialEq for PropertyKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.channel == other.channel
    }
}

impl<P> Eq for PropertyKey<P> {}

impl<P> fmt::Debug for PropertyKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyKey").field(&self.channel).finish()
    }
}
