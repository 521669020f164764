//! Event and messaging system.
//!
//! A small typed event bus. The physics step pushes [`CollisionEvent`]s into
//! it while it runs; the frame loop drains them afterwards, before the next
//! input evaluation, so contact always lands ahead of the jump check.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

use crate::physics::BodyHandle;

/// Contact between two bodies during a physics sub-step.
///
/// Pushed once per participant, with `body` the participant and `other` its
/// peer, mirroring a per-body `collide` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub body: BodyHandle,
    pub other: BodyHandle,
}

/// Typed event bus.
#[derive(Default)]
pub struct EventBus {
    queues: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an event into the queue.
    pub fn push<E: 'static + Send + Sync>(&mut self, e: E) {
        let q = self
            .queues
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<E>::new()));
        if let Some(q) = q.downcast_mut::<Vec<E>>() {
            q.push(e);
        }
    }

    /// Drains all queued events of a type.
    pub fn drain<E: 'static + Send + Sync>(&mut self) -> Vec<E> {
        self.queues
            .remove(&TypeId::of::<E>())
            .and_then(|boxed| boxed.downcast::<Vec<E>>().ok())
            .map(|boxed| *boxed)
            .unwrap_or_default()
    }
}
