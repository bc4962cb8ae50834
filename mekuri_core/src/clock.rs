use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Elapsed session time split into whole minutes and leftover seconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpentTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl SpentTime {
    pub const fn from_total_secs(total_secs: u32) -> Self {
        Self {
            minutes: total_secs / 60,
            seconds: total_secs % 60,
        }
    }

    pub const fn total_secs(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }

    /// Zero-padded `MM:SS` for the in-game stats line.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    /// Prose form for the share text, dropping a zero minute part entirely.
    pub fn human(&self) -> String {
        if self.minutes == 0 {
            format!("{}s", self.seconds)
        } else {
            format!("{}m {}s", self.minutes, self.seconds)
        }
    }
}
