//! End effector: claw, rotation, elbows and wrist.

pub mod grabber;
