use super::HoleSpan;

/// Per-sector solidity flags derived from a hole layout.
///
/// `true` marks a solid sector, `false` a sector removed by some hole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorMask {
    solid: Vec<bool>,
}

impl SectorMask {
    /// Marks every sector covered by any of `holes` as removed.
    #[must_use]
    pub fn new(segment_count: u32, holes: &[HoleSpan]) -> Self {
        let mut solid = vec![true; segment_count as usize];
        if segment_count > 0 {
            for hole in holes {
                for sector in hole.sectors(segment_count) {
                    solid[sector as usize] = false;
                }
            }
        }
        Self { solid }
    }

    /// Number of sectors in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solid.len()
    }

    /// Returns `true` if the ring has no sectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solid.is_empty()
    }

    /// Returns `true` if `sector` is solid. Out-of-range sectors are not.
    #[must_use]
    pub fn is_solid(&self, sector: usize) -> bool {
        self.solid.get(sector).copied().unwrap_or(false)
    }

    /// Number of solid sectors.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    /// Iterates the flags in sector order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.solid.iter().copied()
    }
}
