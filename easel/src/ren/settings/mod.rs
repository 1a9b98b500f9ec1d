#[derive(Clone, Copy, Debug)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self { width: 1920, height: 1080 }
    }
}

#[allow(unused)]
impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Texel filtering applied by the sampler when a fragment's UV does not
/// land exactly on a texel center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    #[default]
    Linear,
}

/// What the sampler does with UV coordinates outside [0,1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressMode {
    ClampToEdge,
    #[default]
    Repeat,
    MirroredRepeat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamplerSettings {
    pub filter: Filter,
    pub address_mode: AddressMode,
}

#[derive(Clone, Copy, Debug)]
pub struct Settings {
    pub resolution: Resolution,
    pub buffering: u32,
    pub sampler: SamplerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            buffering: 2,
            sampler: SamplerSettings::default(),
        }
    }
}

#[allow(unused)]
impl Settings {
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn buffering(mut self, buffering: u32) -> Self {
        self.buffering = buffering;
        self
    }

    pub fn sampler(mut self, sampler: SamplerSettings) -> Self {
        self.sampler = sampler;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_frames_in_flight() {
        let settings = Settings::default();
        assert_eq!(settings.buffering, 2);
        assert_eq!(settings.resolution.width, 1920);
        assert_eq!(settings.resolution.height, 1080);
    }

    #[test]
    fn default_sampler_is_linear_repeat() {
        let sampler = SamplerSettings::default();
        assert_eq!(sampler.filter, Filter::Linear);
        assert_eq!(sampler.address_mode, AddressMode::Repeat);
    }

    #[test]
    fn builders_overwrite_fields() {
        let settings = Settings::default()
            .resolution(Resolution::new(640, 480))
            .buffering(3)
            .sampler(SamplerSettings { filter: Filter::Nearest, address_mode: AddressMode::ClampToEdge });
        assert_eq!(settings.resolution.width, 640);
        assert_eq!(settings.buffering, 3);
        assert_eq!(settings.sampler.filter, Filter::Nearest);
    }
}
