//! Uniform lifecycle of every mechanism.

/// Lifecycle shared by the lift, slide, grabber and drivetrain.
///
/// All operations are total; none can fail once devices are bound.
pub trait Subsystem {
    /// Bring the mechanism to its session-start state.
    fn initialize(&mut self);

    /// Advance one control tick.
    fn update(&mut self);

    /// Return to the mechanism's rest setpoint.
    fn reset(&mut self);

    /// Cut actuator output.
    fn stop(&mut self);
}
