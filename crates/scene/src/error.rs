use sharedraw_net::NetworkId;

/// Errors raised while building a scene
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Network id {0} is already registered")]
    DuplicateNetworkId(NetworkId),

    #[error("Invalid network id {0}; ids must be non-negative")]
    InvalidNetworkId(i32),
}
