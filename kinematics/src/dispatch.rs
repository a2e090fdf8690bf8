//! Two-phase application of passenger movements around a platform translation.
//!
//! Order per tick:
//! 1. Every record with `move_before_platform == true`, in list order.
//! 2. The platform translates by its own displacement.
//! 3. Every record with `move_before_platform == false`, in list order.
//!
//! Passengers are addressed through [`PassengerMovers`]; the dispatcher never owns them. Lookups
//! are memoized per platform so repeated ticks do not search the scene again.

use std::collections::HashMap;

use crate::{
    passenger::PassengerMovement,
    types::{ActorId, Vec3},
};

/// Opaque handle to a passenger's movement routine, issued by [`PassengerMovers::lookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoverHandle(pub usize);

/// Scene-side access to passenger movement routines.
pub trait PassengerMovers {
    /// Resolve a struck actor to its movement routine. `None` if it has none.
    fn lookup(&mut self, actor: ActorId) -> Option<MoverHandle>;

    /// Move a passenger through its own collision-aware movement routine.
    fn move_passenger(&mut self, mover: MoverHandle, displacement: Vec3, standing_on_platform: bool);

    /// Called once the platform has translated, before any riding passenger moves.
    ///
    /// Scenes that keep a separate collision copy of the platform sync it here so riders probe
    /// against the platform's new position.
    fn platform_translated(&mut self, _platform: ActorId, _displacement: Vec3) {}
}

/// Actor to mover memo for one platform.
///
/// Only successful lookups are stored; an actor without a mover is asked about again next time
/// in case it gains one.
#[derive(Clone, Debug, Default)]
pub struct MoverCache {
    entries: HashMap<ActorId, MoverHandle>,
}

impl MoverCache {
    pub fn resolve<M: PassengerMovers + ?Sized>(
        &mut self,
        actor: ActorId,
        movers: &mut M,
    ) -> Option<MoverHandle> {
        if let Some(handle) = self.entries.get(&actor) {
            return Some(*handle);
        }
        let handle = movers.lookup(actor)?;
        self.entries.insert(actor, handle);
        Some(handle)
    }

    /// Drop the memo for an actor that left the scene.
    pub fn forget(&mut self, actor: ActorId) -> Option<MoverHandle> {
        self.entries.remove(&actor)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-tick dispatch counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Passengers moved before the platform.
    pub before: usize,
    /// Passengers moved after the platform.
    pub after: usize,
    /// Records whose actor had no mover.
    pub skipped: usize,
}

#[derive(Clone, Debug, Default)]
pub struct MotionDispatcher {
    cache: MoverCache,
}

impl MotionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cache(&self) -> &MoverCache {
        &self.cache
    }

    #[inline]
    pub fn cache_mut(&mut self) -> &mut MoverCache {
        &mut self.cache
    }

    /// Run both phases around `translate_platform(displacement)`.
    ///
    /// Records for actors without a mover are skipped and counted.
    pub fn dispatch<M, F>(
        &mut self,
        movements: &[PassengerMovement],
        platform: ActorId,
        displacement: Vec3,
        movers: &mut M,
        translate_platform: F,
    ) -> DispatchReport
    where
        M: PassengerMovers + ?Sized,
        F: FnOnce(Vec3),
    {
        let mut report = DispatchReport::default();

        report.before = self.run_phase(movements, true, movers, &mut report.skipped);

        translate_platform(displacement);
        if displacement != Vec3::zeros() {
            movers.platform_translated(platform, displacement);
        }

        report.after = self.run_phase(movements, false, movers, &mut report.skipped);
        report
    }

    fn run_phase<M: PassengerMovers + ?Sized>(
        &mut self,
        movements: &[PassengerMovement],
        before_platform: bool,
        movers: &mut M,
        skipped: &mut usize,
    ) -> usize {
        let mut moved = 0;
        for m in movements
            .iter()
            .filter(|m| m.move_before_platform == before_platform)
        {
            match self.cache.resolve(m.actor, movers) {
                Some(handle) => {
                    movers.move_passenger(handle, m.displacement, m.standing_on_platform);
                    moved += 1;
                }
                None => {
                    log::debug!("{}: no mover, skipping", m.actor);
                    *skipped += 1;
                }
            }
        }
        moved
    }
}
