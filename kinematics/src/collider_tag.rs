use thiserror::Error;

use crate::{layers::LayerMask, types::ActorId};

/// Packed identity + layer membership of a collider, stored as rapier `user_data`.
///
/// # Why this exists
/// Rapier hands back a `ColliderHandle` from scene queries, and the only free-form storage on a
/// collider is a single `u128`. Packing the actor id and the collider's layers into that value
/// lets a query filter and resolve hits without a side table.
///
/// # Bit layout
/// (least-significant bit = bit 0)
///
/// - bits 0..=63   : actor id (u64)
/// - bits 64..=95  : layer bits (u32)
/// - bits 96..=127 : reserved (must be zero for now)
///
/// # Invariants
/// - Two different `(actor, layers)` pairs never produce the same tag.
/// - Reserved bits remain zero.
pub type ColliderTag = u128;

const ID_BITS: u32 = u64::BITS;
const LAYER_BITS: u32 = u32::BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColliderTagError {
    #[error("collider tag reserved bits are non-zero")]
    ReservedBitsSet,
    #[error("collider tag has no layers")]
    NoLayers,
}

/// Packs an actor id and its layer membership into a [`ColliderTag`].
pub fn pack_collider_tag(actor: ActorId, layers: LayerMask) -> ColliderTag {
    (actor.0 as u128) | ((layers.bits as u128) << ID_BITS)
}

/// Extracts the [`ActorId`] from a tag. Does not validate the layer bits.
pub fn unpack_actor(tag: ColliderTag) -> ActorId {
    const ID_MASK: u128 = u64::MAX as u128;
    ActorId((tag & ID_MASK) as u64)
}

/// Extracts the layer membership from a tag.
pub fn unpack_layers(tag: ColliderTag) -> LayerMask {
    const LAYER_MASK: u128 = u32::MAX as u128;
    LayerMask::new(((tag >> ID_BITS) & LAYER_MASK) as u32)
}

/// Validates that a tag conforms to the packing contract.
///
/// Checks:
/// - reserved bits (96..=127) are zero
/// - at least one layer bit is set (a layerless collider can never be hit)
pub fn validate_collider_tag(tag: ColliderTag) -> Result<(), ColliderTagError> {
    const RESERVED_MASK: u128 = !0u128 << (ID_BITS + LAYER_BITS);
    if (tag & RESERVED_MASK) != 0 {
        return Err(ColliderTagError::ReservedBitsSet);
    }
    if unpack_layers(tag).is_empty() {
        return Err(ColliderTagError::NoLayers);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::CollisionLayer;

    #[test]
    fn pack_unpacks_actor_and_layers() {
        let ids: [u64; 5] = [0, 1, 42, u32::MAX as u64, u64::MAX];
        let layers = [
            CollisionLayer::Environment.into_mask(),
            CollisionLayer::Passenger.into_mask(),
            LayerMask::new(u32::MAX),
        ];

        for &id in &ids {
            for &mask in &layers {
                let tag = pack_collider_tag(ActorId(id), mask);

                assert_eq!(unpack_actor(tag), ActorId(id));
                assert_eq!(unpack_layers(tag), mask);
                assert_eq!(validate_collider_tag(tag), Ok(()));
            }
        }
    }

    #[test]
    fn pack_places_id_in_low_64_bits_and_layers_in_next_32_bits() {
        let id = 0x0123_4567_89AB_CDEF;
        let mask = CollisionLayer::Platform.into_mask();

        let tag = pack_collider_tag(ActorId(id), mask);

        let expected = (id as u128) | ((mask.bits as u128) << 64);
        assert_eq!(tag, expected);
        assert_eq!(tag >> 96, 0);
    }

    #[test]
    fn validate_fails_if_reserved_bits_non_zero() {
        let tag = pack_collider_tag(ActorId(7), CollisionLayer::Passenger.into_mask()) | (1u128 << 96);
        assert_eq!(validate_collider_tag(tag), Err(ColliderTagError::ReservedBitsSet));
    }

    #[test]
    fn validate_fails_without_layers() {
        let tag = pack_collider_tag(ActorId(7), LayerMask::empty());
        assert_eq!(validate_collider_tag(tag), Err(ColliderTagError::NoLayers));
    }
}
