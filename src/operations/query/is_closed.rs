use std::collections::HashMap;

use crate::math::Point3;
use crate::tessellation::MeshBuffer;

/// Checks that a mesh bounds a closed, consistently oriented surface.
///
/// Vertices are welded by exact position first, since the platform builder
/// duplicates rim vertices wherever normals differ. The surface is closed
/// when every directed edge `a → b` is matched by as many `b → a` edges.
pub struct IsClosed<'a> {
    mesh: &'a MeshBuffer,
}

impl<'a> IsClosed<'a> {
    /// Creates a new `IsClosed` query.
    #[must_use]
    pub fn new(mesh: &'a MeshBuffer) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning `true` if no edge is left open.
    #[must_use]
    pub fn execute(&self) -> bool {
        self.open_edges() == 0
    }

    /// Number of directed edges without a matching reverse edge.
    #[must_use]
    pub fn open_edges(&self) -> usize {
        let welded = weld(&self.mesh.positions);

        let mut edges: HashMap<(usize, usize), i64> = HashMap::new();
        for tri in &self.mesh.indices {
            let [a, b, c] = tri.map(|i| welded[i as usize]);
            for (from, to) in [(a, b), (b, c), (c, a)] {
                if from != to {
                    *edges.entry((from, to)).or_default() += 1;
                }
            }
        }

        edges
            .iter()
            .map(|(&(from, to), &count)| {
                let reverse = edges.get(&(to, from)).copied().unwrap_or(0);
                usize::try_from(count - reverse).unwrap_or(0)
            })
            .sum()
    }
}

/// Maps each vertex to the first vertex sharing its exact position.
fn weld(positions: &[Point3]) -> Vec<usize> {
    let mut first: HashMap<[u32; 3], usize> = HashMap::new();
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| *first.entry(position_key(p)).or_insert(i))
        .collect()
}

fn position_key(p: &Point3) -> [u32; 3] {
    // adding zero folds -0.0 into 0.0
    [(p.x + 0.0).to_bits(), (p.y + 0.0).to_bits(), (p.z + 0.0).to_bits()]
}
