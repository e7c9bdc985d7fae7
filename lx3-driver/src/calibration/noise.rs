use itertools::Itertools;

use crate::error::LX3DriverError;
use crate::mapping::ChannelMap;
use lx3_core::common::ScanDirection;

/// First sample of the quiet pre-pulse region analyzed by the noise
/// estimators.
pub const WINDOW_START: usize = 12;
/// Number of samples in the quiet region.
pub const WINDOW_LEN: usize = 9;

fn window<'a>(
    trc: &'a [i16],
    map: &ChannelMap,
    direction: ScanDirection,
    mem_index: u16,
) -> &'a [i16] {
    let pos = map.mem_to_trace(mem_index, direction) as usize
        * map.geometry().samples_per_channel as usize;
    &trc[pos + WINDOW_START..pos + WINDOW_START + WINDOW_LEN]
}

fn check_trace_len(trc: &[i16], map: &ChannelMap) -> Result<(), LX3DriverError> {
    let samples = map.geometry().samples_per_channel as usize;
    if samples < WINDOW_START + WINDOW_LEN {
        return Err(LX3DriverError::ChannelTooShort {
            samples,
            required: WINDOW_START + WINDOW_LEN,
        });
    }
    let expected = map.geometry().trace_len();
    if trc.len() < expected {
        return Err(LX3DriverError::TraceTooShort {
            len: trc.len(),
            expected,
        });
    }
    Ok(())
}

/// Estimates the ambient white-noise level along one sensor row.
///
/// For each horizontal position of row `column`, the quiet pre-pulse
/// window is offset-corrected by its own mean and reduced to its peak
/// excursion; the metric is the largest peak difference between
/// neighboring positions. A quiet, uniform scene yields a small value,
/// while ambient shot noise drives it up.
///
/// # Errors
///
/// [`LX3DriverError::ColumnOutOfRange`] when `column` is not a row of
/// the mapped geometry, [`LX3DriverError::TraceTooShort`] when `trc`
/// does not cover a full scan, [`LX3DriverError::ChannelTooShort`] when
/// the channels do not reach past the quiet window.
pub fn white_noise(
    trc: &[i16],
    map: &ChannelMap,
    direction: ScanDirection,
    column: u16,
) -> Result<u32, LX3DriverError> {
    let geometry = *map.geometry();
    if column >= geometry.vertical_channels {
        return Err(LX3DriverError::ColumnOutOfRange(
            column,
            geometry.vertical_channels,
        ));
    }
    check_trace_len(trc, map)?;

    let h = geometry.horizontal_channels as usize;
    let peaks = (0..h).map(|i| {
        let w = window(trc, map, direction, column * geometry.horizontal_channels + i as u16);
        let offset = w.iter().map(|&v| v as i32).sum::<i32>() / WINDOW_LEN as i32;
        w.iter().fold(0i32, |peak, &v| peak.max(v as i32 - offset))
    });

    Ok(peaks
        .tuple_windows()
        .fold(0u32, |diff, (a, b)| diff.max(a.abs_diff(b))))
}

/// Standard deviation of the quiet pre-pulse window of one pixel.
///
/// `pixel` addresses the channel in physical memory order; the trace is
/// located through the index map like the acquisition engine does.
///
/// # Errors
///
/// [`LX3DriverError::PixelOutOfRange`] when `pixel` is not a channel of
/// the mapped geometry, [`LX3DriverError::TraceTooShort`] when `trc`
/// does not cover a full scan, [`LX3DriverError::ChannelTooShort`] when
/// the channels do not reach past the quiet window.
pub fn sigma(
    trc: &[i16],
    map: &ChannelMap,
    direction: ScanDirection,
    pixel: u16,
) -> Result<i32, LX3DriverError> {
    if pixel as usize >= map.len() {
        return Err(LX3DriverError::PixelOutOfRange(pixel, map.len()));
    }
    check_trace_len(trc, map)?;

    let w = window(trc, map, direction, pixel);
    let mut sum = 0i64;
    let mut sum_sq = 0i64;
    for &v in w {
        sum += v as i64;
        sum_sq += v as i64 * v as i64;
    }
    let mean = sum / WINDOW_LEN as i64;
    // Integer division can push the estimate slightly negative on a
    // flat window.
    let var = (sum_sq / WINDOW_LEN as i64 - mean * mean).max(0);
    Ok((var as f64).sqrt() as i32)
}
