use crate::ren::settings::{AddressMode, Filter, SamplerSettings};

use glam::{Vec2, Vec4};
use std::path::Path;

/// RGBA8 pixel data decoded on the host. The renderer uploads the bytes
/// verbatim; [`Texture::sample`] is the CPU reference of the sampling
/// contract the GPU sampler is configured with.
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    pub fn open(path: &Path) -> Self {
        let decoded = image::open(path)
            .expect("easel::texture - failed to decode image file")
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        log::info!("loaded texture {} ({width}x{height})", path.display());
        Self { width, height, pixels: decoded.into_raw() }
    }

    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "easel::texture - pixel data does not match dimensions",
        );
        Self { width, height, pixels }
    }

    /// Fallback asset when no image file is supplied.
    pub fn checker(width: u32, height: u32, square: u32) -> Self {
        const LIGHT: [u8; 4] = [0xe6, 0xe6, 0xe6, 0xff];
        const DARK: [u8; 4] = [0x3c, 0x3c, 0x3c, 0xff];

        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let even = ((x / square) + (y / square)) % 2 == 0;
                pixels.extend_from_slice(if even { &LIGHT } else { &DARK });
            }
        }
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn size_bytes(&self) -> u64 {
        self.pixels.len() as u64
    }

    /// Texel fetch, normalized to [0,1] floats per channel.
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        let index = (y as usize * self.width as usize + x as usize) * 4;
        let texel = &self.pixels[index..index + 4];
        Vec4::new(
            texel[0] as f32 / 255.0,
            texel[1] as f32 / 255.0,
            texel[2] as f32 / 255.0,
            texel[3] as f32 / 255.0,
        )
    }

    /// Sample at a normalized UV. Texel centers sit at `(i + 0.5) / size`,
    /// addressing is resolved per axis, and linear filtering blends the
    /// four nearest texels. UVs outside [0,1] are legal; the address mode
    /// decides what they resolve to.
    pub fn sample(&self, uv: Vec2, settings: &SamplerSettings) -> Vec4 {
        match settings.filter {
            Filter::Nearest => {
                let x = resolve((uv.x * self.width as f32).floor() as i64, self.width, settings.address_mode);
                let y = resolve((uv.y * self.height as f32).floor() as i64, self.height, settings.address_mode);
                self.texel(x, y)
            }
            Filter::Linear => {
                let x = uv.x * self.width as f32 - 0.5;
                let y = uv.y * self.height as f32 - 0.5;
                let x0 = x.floor();
                let y0 = y.floor();
                let tx = x - x0;
                let ty = y - y0;

                let fetch = |dx: i64, dy: i64| {
                    self.texel(
                        resolve(x0 as i64 + dx, self.width, settings.address_mode),
                        resolve(y0 as i64 + dy, self.height, settings.address_mode),
                    )
                };

                let top = fetch(0, 0).lerp(fetch(1, 0), tx);
                let bottom = fetch(0, 1).lerp(fetch(1, 1), tx);
                top.lerp(bottom, ty)
            }
        }
    }
}

/// Map an unnormalized texel coordinate into the image per the address mode.
fn resolve(coord: i64, size: u32, mode: AddressMode) -> u32 {
    let size = size as i64;
    let resolved = match mode {
        AddressMode::ClampToEdge => coord.clamp(0, size - 1),
        AddressMode::Repeat => coord.rem_euclid(size),
        AddressMode::MirroredRepeat => {
            let period = coord.rem_euclid(2 * size);
            if period < size { period } else { 2 * size - 1 - period }
        }
    };
    resolved as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{prop_assert_eq, proptest};

    const NEAREST_CLAMP: SamplerSettings = SamplerSettings {
        filter: Filter::Nearest,
        address_mode: AddressMode::ClampToEdge,
    };

    /// 2x2 texture with a distinct solid color per texel.
    fn quadrants() -> Texture {
        Texture::from_rgba8(2, 2, vec![
            255, 0, 0, 255, // (0,0) red
            0, 255, 0, 255, // (1,0) green
            0, 0, 255, 255, // (0,1) blue
            255, 255, 0, 255, // (1,1) yellow
        ])
    }

    #[test]
    fn nearest_clamp_resolves_each_quadrant() {
        let texture = quadrants();
        let cases = [
            (Vec2::new(0.25, 0.25), texture.texel(0, 0)),
            (Vec2::new(0.75, 0.25), texture.texel(1, 0)),
            (Vec2::new(0.25, 0.75), texture.texel(0, 1)),
            (Vec2::new(0.75, 0.75), texture.texel(1, 1)),
        ];
        for (uv, expected) in cases {
            assert_eq!(texture.sample(uv, &NEAREST_CLAMP), expected);
        }
    }

    #[test]
    fn boundary_uvs_clamp_to_the_edge_texels() {
        let texture = quadrants();
        assert_eq!(texture.sample(Vec2::ZERO, &NEAREST_CLAMP), texture.texel(0, 0));
        assert_eq!(texture.sample(Vec2::ONE, &NEAREST_CLAMP), texture.texel(1, 1));
    }

    #[test]
    fn boundary_uvs_wrap_to_the_opposite_edge_under_repeat() {
        let texture = quadrants();
        let repeat = SamplerSettings { filter: Filter::Nearest, address_mode: AddressMode::Repeat };
        assert_eq!(texture.sample(Vec2::ONE, &repeat), texture.texel(0, 0));
        assert_eq!(texture.sample(Vec2::new(1.0, 0.0), &repeat), texture.texel(0, 0));
        assert_eq!(texture.sample(Vec2::new(0.25, 1.25), &repeat), texture.texel(0, 0));
    }

    #[test]
    fn mirrored_repeat_reflects_at_the_edges() {
        let texture = quadrants();
        let mirror = SamplerSettings { filter: Filter::Nearest, address_mode: AddressMode::MirroredRepeat };
        // one texel past the right edge reflects back onto the edge texel
        assert_eq!(texture.sample(Vec2::new(1.25, 0.25), &mirror), texture.texel(1, 0));
        // one texel before the left edge reflects onto the first texel
        assert_eq!(texture.sample(Vec2::new(-0.25, 0.25), &mirror), texture.texel(0, 0));
    }

    #[test]
    fn alpha_passes_through_unmodified() {
        let texture = Texture::from_rgba8(1, 1, vec![10, 20, 30, 128]);
        let expected = 128.0 / 255.0;
        assert_eq!(texture.sample(Vec2::new(0.5, 0.5), &NEAREST_CLAMP).w, expected);
        assert_eq!(texture.sample(Vec2::new(0.5, 0.5), &SamplerSettings::default()).w, expected);
    }

    #[test]
    fn linear_center_blends_all_four_texels() {
        let texture = quadrants();
        let linear = SamplerSettings { filter: Filter::Linear, address_mode: AddressMode::ClampToEdge };
        let blended = texture.sample(Vec2::new(0.5, 0.5), &linear);
        let average = (texture.texel(0, 0) + texture.texel(1, 0) + texture.texel(0, 1) + texture.texel(1, 1)) / 4.0;
        assert!((blended - average).abs().max_element() < 1e-6);
    }

    #[test]
    fn sampling_is_pure() {
        let texture = quadrants();
        let uv = Vec2::new(0.61, 0.37);
        for settings in [SamplerSettings::default(), NEAREST_CLAMP] {
            assert_eq!(texture.sample(uv, &settings), texture.sample(uv, &settings));
        }
    }

    #[test]
    fn checker_alternates_squares() {
        let texture = Texture::checker(4, 4, 2);
        assert_ne!(texture.texel(0, 0), texture.texel(2, 0));
        assert_eq!(texture.texel(0, 0), texture.texel(2, 2));
        assert_eq!(texture.size_bytes(), 4 * 4 * 4);
    }

    proptest! {
        #[test]
        fn one_by_one_texture_samples_to_its_only_color(u in 0.0f32..=1.0, v in 0.0f32..=1.0) {
            let texture = Texture::from_rgba8(1, 1, vec![40, 80, 120, 200]);
            let expected = texture.texel(0, 0);
            for filter in [Filter::Nearest, Filter::Linear] {
                for address_mode in [AddressMode::ClampToEdge, AddressMode::Repeat, AddressMode::MirroredRepeat] {
                    let settings = SamplerSettings { filter, address_mode };
                    prop_assert_eq!(texture.sample(Vec2::new(u, v), &settings), expected);
                }
            }
        }
    }
}
