use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HedError {
    #[error("Invalid IP address: {0}")]
    InvalidIp(String),

    #[error("Invalid hostname {0:?}: must be non-empty without whitespace or '#'")]
    InvalidHost(String),

    #[error("Invalid group name {0:?}: must be non-empty without whitespace, '#', '[' or ']'")]
    InvalidGroupName(String),

    #[error("`System` is reserved and cannot be used as a group name")]
    ReservedGroup,

    #[error("`{0}` already exists")]
    GroupExists(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Host not found: {0}")]
    HostNotFound(String),

    #[error("No history entry at index {0}")]
    HistoryEntryNotFound(usize),
}
