//! Native event abstraction.

/// An event delivered by a platform target.
///
/// Methods take `&self`: platform events are shared objects whose flags are
/// flipped in place while they propagate.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a native event",
    label = "missing `NativeEvent` implementation",
    note = "Events relayed from a target must implement `NativeEvent`."
)]
pub trait NativeEvent: 'static {
    /// The event type, e.g. `"keydown"`.
    fn event_type(&self) -> &str;

    /// Cancel the platform's default action.
    fn prevent_default(&self) {}

    /// Stop propagation to further targets.
    fn stop_propagation(&self) {}
}
