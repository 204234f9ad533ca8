//! CPU mirror of the vertex displacement in `shaders/sphere.wgsl`.
//!
//! Classic periodic Perlin noise (mod-289 permutation polynomial, gradients on
//! an octahedron). The GPU is the real consumer; this copy exists so the
//! periodicity and displacement scaling can be checked off-device. Keep the
//! two in lockstep.

use crate::core::constants::{FREQUENCY_DIVISOR, NOISE_AMPLITUDE, NOISE_DIVISOR, NOISE_PERIOD};
use glam::{Vec2, Vec3, Vec4};

// GLSL `mod`: result takes the sign of the divisor.
#[inline]
fn mod_gl3(x: Vec3, y: Vec3) -> Vec3 {
    x - y * (x / y).floor()
}

#[inline]
fn fract_gl3(x: Vec3) -> Vec3 {
    x - x.floor()
}

#[inline]
fn fract_gl4(x: Vec4) -> Vec4 {
    x - x.floor()
}

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + 10.0) * x)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

#[inline]
fn fade(t: Vec3) -> Vec3 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

// step(edge, x) = x >= edge ? 1 : 0, component-wise
#[inline]
fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::new(
        (x.x >= edge.x) as u8 as f32,
        (x.y >= edge.y) as u8 as f32,
        (x.z >= edge.z) as u8 as f32,
        (x.w >= edge.w) as u8 as f32,
    )
}

fn gradients(ixy: Vec4) -> (Vec4, Vec4, Vec4) {
    let mut gx = ixy * (1.0 / 7.0);
    let mut gy = fract_gl4(gx.floor() * (1.0 / 7.0)) - Vec4::splat(0.5);
    gx = fract_gl4(gx);
    let gz = Vec4::splat(0.5) - gx.abs() - gy.abs();
    let sz = step4(gz, Vec4::ZERO);
    gx -= sz * (step4(Vec4::ZERO, gx) - Vec4::splat(0.5));
    gy -= sz * (step4(Vec4::ZERO, gy) - Vec4::splat(0.5));
    (gx, gy, gz)
}

/// Periodic gradient noise: `pnoise(p) == pnoise(p + rep * k)` for integer `k`.
pub fn pnoise(p: Vec3, rep: Vec3) -> f32 {
    let mut pi0 = mod_gl3(p.floor(), rep);
    let mut pi1 = mod_gl3(pi0 + Vec3::ONE, rep);
    pi0 = mod289_3(pi0);
    pi1 = mod289_3(pi1);
    let pf0 = fract_gl3(p);
    let pf1 = pf0 - Vec3::ONE;

    let ix = Vec4::new(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = Vec4::new(pi0.y, pi0.y, pi1.y, pi1.y);
    let iz0 = Vec4::splat(pi0.z);
    let iz1 = Vec4::splat(pi1.z);

    let ixy = permute(permute(ix) + iy);
    let ixy0 = permute(ixy + iz0);
    let ixy1 = permute(ixy + iz1);

    let (gx0, gy0, gz0) = gradients(ixy0);
    let (gx1, gy1, gz1) = gradients(ixy1);

    let mut g000 = Vec3::new(gx0.x, gy0.x, gz0.x);
    let mut g100 = Vec3::new(gx0.y, gy0.y, gz0.y);
    let mut g010 = Vec3::new(gx0.z, gy0.z, gz0.z);
    let mut g110 = Vec3::new(gx0.w, gy0.w, gz0.w);
    let mut g001 = Vec3::new(gx1.x, gy1.x, gz1.x);
    let mut g101 = Vec3::new(gx1.y, gy1.y, gz1.y);
    let mut g011 = Vec3::new(gx1.z, gy1.z, gz1.z);
    let mut g111 = Vec3::new(gx1.w, gy1.w, gz1.w);

    let norm0 = taylor_inv_sqrt(Vec4::new(
        g000.dot(g000),
        g010.dot(g010),
        g100.dot(g100),
        g110.dot(g110),
    ));
    g000 *= norm0.x;
    g010 *= norm0.y;
    g100 *= norm0.z;
    g110 *= norm0.w;
    let norm1 = taylor_inv_sqrt(Vec4::new(
        g001.dot(g001),
        g011.dot(g011),
        g101.dot(g101),
        g111.dot(g111),
    ));
    g001 *= norm1.x;
    g011 *= norm1.y;
    g101 *= norm1.z;
    g111 *= norm1.w;

    let n000 = g000.dot(pf0);
    let n100 = g100.dot(Vec3::new(pf1.x, pf0.y, pf0.z));
    let n010 = g010.dot(Vec3::new(pf0.x, pf1.y, pf0.z));
    let n110 = g110.dot(Vec3::new(pf1.x, pf1.y, pf0.z));
    let n001 = g001.dot(Vec3::new(pf0.x, pf0.y, pf1.z));
    let n101 = g101.dot(Vec3::new(pf1.x, pf0.y, pf1.z));
    let n011 = g011.dot(Vec3::new(pf0.x, pf1.y, pf1.z));
    let n111 = g111.dot(pf1);

    let f = fade(pf0);
    let n_z = Vec4::new(n000, n100, n010, n110).lerp(Vec4::new(n001, n101, n011, n111), f.z);
    let n_yz = Vec2::new(n_z.x, n_z.y).lerp(Vec2::new(n_z.z, n_z.w), f.y);
    let n_xyz = n_yz.x + (n_yz.y - n_yz.x) * f.x;
    2.2 * n_xyz
}

/// Scaled noise sampled by the vertex stage: `3 * pnoise(p + t, (10,10,10))`.
#[inline]
pub fn surface_noise(position: Vec3, elapsed: f32) -> f32 {
    NOISE_AMPLITUDE * pnoise(position + Vec3::splat(elapsed), Vec3::splat(NOISE_PERIOD))
}

/// Distance a vertex moves along its normal for the given frame inputs.
#[inline]
pub fn displacement(position: Vec3, elapsed: f32, frequency: f32) -> f32 {
    (frequency / FREQUENCY_DIVISOR) * (surface_noise(position, elapsed) / NOISE_DIVISOR)
}

pub fn displace(position: Vec3, normal: Vec3, elapsed: f32, frequency: f32) -> Vec3 {
    position + normal * displacement(position, elapsed, frequency)
}
