//! Boundary to the physics system's broad-phase registration
//!
//! The grid never talks to a physics world directly. It is handed a
//! [`RegistrationBridge`] at construction and reports, per collider, when
//! that collider should start or stop taking part in collision detection.

use crate::foundation::collections::ColliderHandle;

/// Adds colliders to / removes colliders from active collision detection
///
/// Implementations may assume the grid never registers a collider twice
/// in a row, and only unregisters colliders it knows to be registered,
/// except during the initial static scan where every discovered collider
/// is unregistered once unconditionally.
pub trait RegistrationBridge {
    /// Start detecting collisions for `collider`
    fn register(&mut self, collider: ColliderHandle);

    /// Stop detecting collisions for `collider`
    fn unregister(&mut self, collider: ColliderHandle);
}

impl<T: RegistrationBridge + ?Sized> RegistrationBridge for &mut T {
    fn register(&mut self, collider: ColliderHandle) {
        (**self).register(collider);
    }

    fn unregister(&mut self, collider: ColliderHandle) {
        (**self).unregister(collider);
    }
}

impl<T: RegistrationBridge + ?Sized> RegistrationBridge for Box<T> {
    fn register(&mut self, collider: ColliderHandle) {
        (**self).register(collider);
    }

    fn unregister(&mut self, collider: ColliderHandle) {
        (**self).unregister(collider);
    }
}
