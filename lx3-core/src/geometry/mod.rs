/// Total channel count of the largest supported sensor build (312 × 64).
pub const MAX_CHANNEL_COUNT: usize = 312 * 64;

/// Maximum number of samples the acquisition captures per channel.
pub const MAX_SAMPLES_PER_CHANNEL: usize = 512;

/// Channel layout of one sensor build.
///
/// Plain data; the index-map generator rejects layouts it has no
/// acquisition scheme for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SensorGeometry {
    /// Number of channels along the vertical (scan) axis.
    pub vertical_channels: u16,
    /// Number of channels along the horizontal axis.
    pub horizontal_channels: u16,
    /// Sample stride of one channel within a trace buffer.
    pub samples_per_channel: u16,
}

impl SensorGeometry {
    /// Creates a new [`SensorGeometry`].
    #[must_use]
    pub const fn new(
        vertical_channels: u16,
        horizontal_channels: u16,
        samples_per_channel: u16,
    ) -> Self {
        Self {
            vertical_channels,
            horizontal_channels,
            samples_per_channel,
        }
    }

    /// Full-resolution MEMS scanner build (256 × 64).
    #[must_use]
    pub const fn mems_256x64() -> Self {
        Self::new(256, 64, MAX_SAMPLES_PER_CHANNEL as u16)
    }

    /// Two-thirds-resolution MEMS scanner build (172 × 64).
    #[must_use]
    pub const fn mems_172x64() -> Self {
        Self::new(172, 64, MAX_SAMPLES_PER_CHANNEL as u16)
    }

    /// 3D flash build (16 × 64).
    #[must_use]
    pub const fn flash_16x64() -> Self {
        Self::new(16, 64, MAX_SAMPLES_PER_CHANNEL as u16)
    }

    /// Legacy 8-line ASIC build (8 × 32).
    #[must_use]
    pub const fn legacy_8x32() -> Self {
        Self::new(8, 32, MAX_SAMPLES_PER_CHANNEL as u16)
    }

    /// Total number of channels.
    #[must_use]
    pub const fn channel_count(&self) -> usize {
        self.vertical_channels as usize * self.horizontal_channels as usize
    }

    /// Number of samples in one full trace buffer (all channels).
    #[must_use]
    pub const fn trace_len(&self) -> usize {
        self.channel_count() * self.samples_per_channel as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(SensorGeometry::mems_256x64(), 16384)]
    #[case(SensorGeometry::mems_172x64(), 11008)]
    #[case(SensorGeometry::flash_16x64(), 1024)]
    #[case(SensorGeometry::legacy_8x32(), 256)]
    fn channel_count(#[case] geometry: SensorGeometry, #[case] expected: usize) {
        assert_eq!(expected, geometry.channel_count());
        assert_eq!(
            expected * geometry.samples_per_channel as usize,
            geometry.trace_len()
        );
    }
}
