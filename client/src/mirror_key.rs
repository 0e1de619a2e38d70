use std::{fmt, marker::PhantomData};

use quiver_shared::ChannelId;

/// Typed handle to a [`Mirror`](crate::Mirror) held by the [`Client`](crate::Client)
pub struct MirrorKey<S> {
    channel: ChannelId,
    phantom_s: PhantomData<fn() -> S>,
}

impl<S> MirrorKey<S> {
    pub(crate) fn new(channel: ChannelId) -> Self {
        Self {
            channel,
            phantom_s: PhantomData,
        }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }
}

impl<S> Clone for MirrorKey<S> {
    fn clone(&self) -> Self {
        Self::new(self.channel.clone())
    }
}

impl<S> fmt::Debug for MirrorKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MirrorKey").field(&self.channel).finish()
    }
}
