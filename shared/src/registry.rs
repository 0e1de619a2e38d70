use std::collections::HashSet;

use log::debug;

use crate::{error::ChannelError, types::ChannelId};

pub const DEFAULT_MAX_CHANNEL_NAME_LENGTH: usize = 50;

/// Names every channel of a process. Built once by the process root and
/// handed to each entity it creates.
pub struct ChannelRegistry {
    max_name_length: usize,
    counter: u64,
    channels: HashSet<ChannelId>,
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHANNEL_NAME_LENGTH)
    }
}

impl ChannelRegistry {
    pub fn new(max_name_length: usize) -> Self {
        Self {
            max_name_length,
            counter: 0,
            channels: HashSet::new(),
        }
    }

    /// Register a fresh channel name.
    ///
    /// Without a hint the name is a counter. A hint is cut down to the maximum
    /// length, and a name already in use gets `_<counter>` appended, with the
    /// hint shortened further so the suffixed name still fits.
    pub fn generate_name(&mut self, hint: Option<&str>) -> ChannelId {
        let base = match hint {
            Some(hint) if !hint.is_empty() => truncate(hint, self.max_name_length),
            _ => self.next_count().to_string(),
        };

        let mut name = base.clone();
        while self.channels.contains(name.as_str()) {
            let suffix = format!("_{}", self.next_count());
            let room = self.max_name_length.saturating_sub(suffix.chars().count());
            name = format!("{}{}", truncate(&base, room), suffix);
        }

        let channel = ChannelId::new(name);
        debug!("registered channel {}", channel);
        self.channels.insert(channel.clone());
        channel
    }

    /// Look up `name`, registering it when it is unknown
    pub fn get_or_create(&mut self, name: &str) -> ChannelId {
        let channel = ChannelId::from(name);
        if self.channels.insert(channel.clone()) {
            debug!("registered channel {}", channel);
        }
        channel
    }

    pub fn contains(&self, channel: &ChannelId) -> bool {
        self.channels.contains(channel)
    }

    pub fn release(&mut self, channel: &ChannelId) -> Result<(), ChannelError> {
        if self.channels.remove(channel) {
            Ok(())
        } else {
            Err(ChannelError::NotRegistered {
                channel: channel.clone(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    fn next_count(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

fn truncate(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}
