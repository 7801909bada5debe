#![allow(dead_code)]

use swblend::prelude::*;

pub const COLORS: [Rgb; 12] = [
    Rgb::new(255, 0, 0),
    Rgb::new(255, 128, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(128, 255, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 255, 128),
    Rgb::new(0, 255, 255),
    Rgb::new(0, 128, 255),
    Rgb::new(0, 0, 255),
    Rgb::new(128, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(255, 0, 128),
];

/// Deterministic pseudo-random bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect()
}

/// Encodes pixels into a packed row.
pub fn encode<P: Pixel>(pixels: &[P]) -> Vec<u8> {
    let mut data = vec![0; P::FORMAT.row_bytes(pixels.len() as u32)];
    for (x, &px) in pixels.iter().enumerate() {
        px.write_at(&mut data, x);
    }
    data
}

/// Decodes the first `count` pixels of a row.
pub fn decode<P: Pixel>(row: &[u8], count: usize) -> Vec<P> {
    (0..count).map(|x| P::read_at(row, x)).collect()
}
