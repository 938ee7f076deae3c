// SPDX-License-Identifier: MIT OR Apache-2.0

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// The five permission bits a principal can hold on a path.
    ///
    /// Bit values match the storage layer's share constants so that grants
    /// and rules can be passed through from the backing store unchanged.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PermissionMask: u8 {
        const READ = 1;
        const UPDATE = 2;
        const CREATE = 4;
        const DELETE = 8;
        const SHARE = 16;
        const ALL = 31;
    }
}

impl PermissionMask {
    /// Bits required for administrative access. SHARE is not required.
    pub const ADMIN: PermissionMask = PermissionMask::READ
        .union(PermissionMask::UPDATE)
        .union(PermissionMask::CREATE)
        .union(PermissionMask::DELETE);

    /// READ, UPDATE, CREATE and DELETE are all set.
    pub fn is_admin(&self) -> bool {
        self.contains(Self::ADMIN)
    }

    /// Flatten the mask into the boolean descriptor consumed by UI layers.
    pub fn summary(&self) -> PermissionSummary {
        PermissionSummary::from_mask(*self)
    }
}

/// Resolved permissions on one path, flattened into the per-capability
/// booleans the UI uses to gate edit, delete and share affordances.
///
/// `can_write` reflects the UPDATE bit; `raw` carries the full bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSummary {
    pub can_read: bool,
    pub can_write: bool,
    pub can_create: bool,
    pub can_delete: bool,
    pub can_share: bool,
    pub is_admin: bool,
    pub raw: u8,
}

impl PermissionSummary {
    pub fn from_mask(mask: PermissionMask) -> Self {
        Self {
            can_read: mask.contains(PermissionMask::READ),
            can_write: mask.contains(PermissionMask::UPDATE),
            can_create: mask.contains(PermissionMask::CREATE),
            can_delete: mask.contains(PermissionMask::DELETE),
            can_share: mask.contains(PermissionMask::SHARE),
            is_admin: mask.is_admin(),
            raw: mask.bits(),
        }
    }

    /// The all-zero result handed to principals without any access.
    pub fn none() -> Self {
        Self::from_mask(PermissionMask::empty())
    }

    pub fn mask(&self) -> PermissionMask {
        PermissionMask::from_bits_truncate(self.raw)
    }

    /// Any bit at all is set.
    pub fn has_access(&self) -> bool {
        self.raw != 0
    }
}
