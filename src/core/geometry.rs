use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Unique vertices plus a line-list index buffer (two indices per edge).
#[derive(Clone, Debug, Default)]
pub struct WireMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u32>,
}

impl WireMesh {
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.indices.len() / 2
    }
}

const ICO_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn ico_corners() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

// Lattice point identified by integer barycentric weights over icosahedron
// corners; points on shared edges get the same key from both faces.
type LatticeKey = [(u32, u32); 3];

fn lattice_key(face: [u32; 3], weights: [u32; 3]) -> LatticeKey {
    let mut key = [(u32::MAX, 0u32); 3];
    let mut n = 0;
    for (corner, w) in face.iter().zip(weights.iter()) {
        if *w > 0 {
            key[n] = (*corner, *w);
            n += 1;
        }
    }
    key.sort_unstable();
    key
}

/// Geodesic sphere with `detail` extra subdivisions per icosahedron edge,
/// as wireframe edges. Normals point radially outward.
pub fn wire_icosphere(radius: f32, detail: u32) -> WireMesh {
    let corners = ico_corners();
    let cols = detail + 1;
    let mut mesh = WireMesh::default();
    let mut lookup: FnvHashMap<LatticeKey, u32> = FnvHashMap::default();
    let mut edges: FnvHashSet<(u32, u32)> = FnvHashSet::default();

    let mut vertex_at = |face: [u32; 3], i: u32, j: u32, mesh: &mut WireMesh| -> u32 {
        // weights for corners (a, b, c)
        let key = lattice_key(face, [cols - i - j, j, i]);
        *lookup.entry(key).or_insert_with(|| {
            let mut p = Vec3::ZERO;
            for (corner, w) in key.iter() {
                if *w > 0 {
                    p += corners[*corner as usize] * (*w as f32);
                }
            }
            let n = (p / cols as f32).normalize();
            mesh.vertices.push(SphereVertex {
                position: (n * radius).to_array(),
                normal: n.to_array(),
            });
            (mesh.vertices.len() - 1) as u32
        })
    };

    for face in ICO_FACES.iter().copied() {
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(cols as usize + 1);
        for i in 0..=cols {
            let rows = cols - i;
            let row: Vec<u32> = (0..=rows).map(|j| vertex_at(face, i, j, &mut mesh)).collect();
            grid.push(row);
        }
        for i in 0..cols as usize {
            let span = 2 * (cols as usize - i) - 1;
            for j in 0..span {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                    edges.insert((a.min(b), a.max(b)));
                }
            }
        }
    }

    let mut sorted: Vec<(u32, u32)> = edges.into_iter().collect();
    sorted.sort_unstable();
    mesh.indices = sorted.into_iter().flat_map(|(a, b)| [a, b]).collect();
    mesh
}
