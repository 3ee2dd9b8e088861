use super::protocol::Frame;

/// Publish/subscribe channel scoped to one room.
///
/// Sends are fire-and-forget: no acknowledgement, no retry. Implementations
/// that can fail should log and drop rather than surface the error, since the
/// next state broadcast supersedes anything lost.
pub trait Transport {
    /// Identifier the transport assigned to this connection.
    fn local_id(&self) -> &str;

    fn send(&mut self, frame: Frame);

    fn poll(&mut self) -> Vec<Frame>;
}
