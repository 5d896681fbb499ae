//! Per-interface VLAN membership table.
//!
//! Shared layout between the loader and the XDP program's `IF_VLAN_INFO`
//! map. The forwarding routine strips a single tag regardless of this
//! table; nothing on the fast path consults it yet.

/// Maximum number of VLANs carried by a trunk port.
pub const MAX_TRUNK_VLANS: usize = 8;

/// Maximum number of interfaces (map entries, indexed by ifindex).
pub const MAX_IFACES: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VlanMode {
    Access = 0,
    Trunk = 1,
}

/// One map entry. VLAN ids are stored in network byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct IfVlanInfo {
    /// [`VlanMode`] discriminant.
    pub mode: u8,
    /// Native VLAN, for both access and trunk ports.
    pub pvid: u16,
    /// Carried VLANs on a trunk; unused slots are zero.
    pub trunks: [u16; MAX_TRUNK_VLANS],
}

impl IfVlanInfo {
    pub fn access(pvid: u16) -> Self {
        Self {
            mode: VlanMode::Access as u8,
            pvid: (pvid & 0x0FFF).to_be(),
            trunks: [0; MAX_TRUNK_VLANS],
        }
    }

    /// Ids past [`MAX_TRUNK_VLANS`] are ignored.
    pub fn trunk(pvid: u16, vids: &[u16]) -> Self {
        let mut trunks = [0u16; MAX_TRUNK_VLANS];
        for (slot, vid) in trunks.iter_mut().zip(vids) {
            *slot = (vid & 0x0FFF).to_be();
        }
        Self {
            mode: VlanMode::Trunk as u8,
            pvid: (pvid & 0x0FFF).to_be(),
            trunks,
        }
    }

    pub fn mode(&self) -> Option<VlanMode> {
        match self.mode {
            0 => Some(VlanMode::Access),
            1 => Some(VlanMode::Trunk),
            _ => None,
        }
    }

    pub fn native_vid(&self) -> u16 {
        u16::from_be(self.pvid)
    }

    pub fn trunk_vids(&self) -> impl Iterator<Item = u16> + '_ {
        self.trunks
            .iter()
            .map(|vid| u16::from_be(*vid))
            .filter(|vid| *vid != 0)
    }
}
