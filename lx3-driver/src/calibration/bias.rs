use tracing::trace;

use super::smooth::{WINDOW_PULSE_AMPLITUDE, WINDOW_WHITE_NOISE};

/// Lowest APD bias voltage step the supply accepts.
pub const APD_MIN_VBIAS: u32 = 1439;
/// Highest APD bias voltage step the supply accepts.
pub const APD_MAX_VBIAS: u32 = 2158;

const SATURATED_VBIAS: u32 = 1438;

const TEMP_MIN: i32 = -320;
const TEMP_MAX: i32 = 1600;

const TCOMP_FACTOR: f32 = 1.1590;
const TCOMP_APD_FACTOR: f32 = 0.8628;
const TREF_COMP_FACTOR: f32 = 0.1563;
const VBIAS_FACTOR: f32 = 13.8044;
const TCOMP_REF: f32 = 42.9835;

/// Bias curve fitted against the ambient white-noise metric. Entries
/// past the end of this prefix saturate at the supply floor.
const WHITE_NOISE_CURVE: &[u32] = &[
    2157, 2157, 2157, 2157, 2157, 2157, 2157, 2157, 2157, 2155, 2152, 2149, 2146, 2144, 2141,
    2138, 2136, 2133, 2130, 2128, 2125, 2122, 2119, 2117, 2114, 2111, 2102, 2093, 2083, 2074,
    2065, 2055, 2046, 2037, 2027, 2018, 2009, 1999, 1990, 1981, 1971, 1962, 1953, 1943, 1941,
    1940, 1938, 1936, 1934, 1932, 1930, 1928, 1927, 1925, 1923, 1921, 1919, 1917, 1915, 1914,
    1912, 1910, 1908, 1906, 1904, 1902, 1900, 1899, 1897, 1895, 1893, 1891, 1889, 1887, 1886,
    1884, 1882, 1880, 1878, 1876, 1874, 1872, 1871, 1869, 1867, 1865, 1863, 1861, 1859, 1858,
    1856, 1854, 1852, 1850, 1848, 1846, 1845, 1843, 1841, 1839, 1837, 1835, 1833, 1831, 1830,
    1828, 1826, 1824, 1822, 1820, 1818, 1817, 1815, 1813, 1811, 1809, 1807, 1805, 1804, 1802,
    1800, 1798, 1796, 1794, 1792, 1790, 1789, 1787, 1785, 1783, 1781, 1779, 1777, 1776, 1774,
    1772, 1770, 1768, 1766, 1764, 1762, 1761, 1759, 1757, 1755, 1753, 1751, 1749, 1748, 1746,
    1744, 1742, 1740, 1738, 1736, 1735, 1733, 1731, 1729, 1727, 1725, 1723, 1721, 1720, 1718,
    1716, 1714, 1712, 1710, 1708, 1707, 1705, 1703, 1701, 1699, 1697, 1695, 1694, 1692, 1690,
    1688, 1686, 1684, 1682, 1680, 1679, 1677, 1675, 1673, 1671, 1669, 1667, 1666, 1664, 1662,
    1660, 1658, 1656, 1654, 1652, 1651, 1649, 1647, 1645, 1643, 1641, 1639, 1638, 1636, 1634,
    1632, 1630, 1628, 1626, 1625, 1623, 1621, 1619, 1617, 1615, 1613, 1611, 1610, 1608, 1606,
    1604, 1602, 1600, 1598, 1597, 1595, 1593, 1591, 1589, 1587, 1585, 1583, 1582, 1580, 1578,
    1576, 1574, 1572, 1570, 1569, 1567, 1565, 1563, 1561, 1559, 1557, 1556, 1554, 1552, 1550,
    1548, 1546, 1544, 1542, 1541, 1539, 1537, 1535, 1533, 1531, 1529, 1528, 1526, 1524, 1522,
    1520, 1518, 1516, 1515, 1513, 1511, 1509, 1507, 1505, 1503, 1501, 1500, 1498, 1496, 1494,
    1492, 1490, 1488, 1487, 1485, 1483, 1481, 1479, 1477, 1475, 1473, 1472, 1470, 1468, 1466,
    1464, 1462, 1460, 1459, 1457, 1455, 1453, 1451, 1449, 1447, 1446, 1444, 1442, 1440,
];
const WHITE_NOISE_DOMAIN: u32 = 1022;

/// Bias curve fitted against the pulse-amplitude metric.
const PULSE_AMPLITUDE_CURVE: &[u32] = &[
    2027, 1943, 1934, 1926, 1917, 1908, 1899, 1890, 1881, 1872, 1864, 1855, 1846, 1837, 1828,
    1819, 1810, 1802, 1793, 1784, 1775, 1766, 1757, 1748, 1739, 1731, 1722, 1713, 1704, 1695,
    1686, 1677, 1669, 1660, 1651, 1642, 1633, 1624, 1615, 1606, 1598, 1589, 1580, 1571, 1562,
    1553, 1544, 1536, 1527, 1518, 1509, 1500, 1491, 1482, 1474, 1465, 1456, 1447,
];
const PULSE_AMPLITUDE_DOMAIN: u32 = 232;

/// Which fitted curve maps a smoothed noise metric to an APD bias.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, derive_more::Display)]
pub enum BiasModel {
    /// Curve fitted against the ambient white-noise metric.
    #[default]
    WhiteNoise,
    /// Curve fitted against the pulse-amplitude metric.
    PulseAmplitude,
}

impl BiasModel {
    const fn curve(self) -> (&'static [u32], u32) {
        match self {
            Self::WhiteNoise => (WHITE_NOISE_CURVE, WHITE_NOISE_DOMAIN),
            Self::PulseAmplitude => (PULSE_AMPLITUDE_CURVE, PULSE_AMPLITUDE_DOMAIN),
        }
    }

    /// Smoothing window paired with this model's metric.
    #[must_use]
    pub const fn smoothing_window(self) -> usize {
        match self {
            Self::WhiteNoise => WINDOW_WHITE_NOISE,
            Self::PulseAmplitude => WINDOW_PULSE_AMPLITUDE,
        }
    }

    /// Recommends an APD bias for the smoothed noise `metric`.
    ///
    /// When `apd_temperature` is given (in tenths of a degree Celsius,
    /// clamped to the sensor's rated range) the fitted value is shifted
    /// by the APD temperature-compensation model. The result always
    /// lies in `[APD_MIN_VBIAS, APD_MAX_VBIAS]`.
    #[must_use]
    pub fn recommend(self, metric: u32, apd_temperature: Option<i32>) -> u32 {
        let (curve, domain) = self.curve();
        let mut vbias = if metric >= domain {
            APD_MIN_VBIAS
        } else if (metric as usize) < curve.len() {
            curve[metric as usize]
        } else {
            SATURATED_VBIAS
        };

        if let Some(temp) = apd_temperature {
            let temp = temp.clamp(TEMP_MIN, TEMP_MAX) as f32;
            let compensated = TCOMP_APD_FACTOR
                * (temp
                    + TCOMP_FACTOR
                        * (vbias as f32 - VBIAS_FACTOR * (TCOMP_REF - TREF_COMP_FACTOR)));
            vbias = compensated.round_ties_even() as u32;
        }

        let clamped = vbias.clamp(APD_MIN_VBIAS, APD_MAX_VBIAS);
        trace!(model = %self, metric, vbias = clamped, "bias recommendation");
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(2157, 0)]
    #[case(2157, 8)]
    #[case(2155, 9)]
    #[case(2111, 25)]
    #[case(1440, 313)]
    fn white_noise_curve_lookup(#[case] expected: u32, #[case] metric: u32) {
        assert_eq!(expected, BiasModel::WhiteNoise.recommend(metric, None));
    }

    #[rstest::rstest]
    #[case(2027, 0)]
    #[case(1943, 1)]
    #[case(1447, 57)]
    fn pulse_amplitude_curve_lookup(#[case] expected: u32, #[case] metric: u32) {
        assert_eq!(expected, BiasModel::PulseAmplitude.recommend(metric, None));
    }

    #[rstest::rstest]
    #[case(BiasModel::WhiteNoise, 314)]
    #[case(BiasModel::WhiteNoise, 1021)]
    #[case(BiasModel::PulseAmplitude, 58)]
    #[case(BiasModel::PulseAmplitude, 231)]
    fn saturated_metric_clamps_to_the_floor(#[case] model: BiasModel, #[case] metric: u32) {
        assert_eq!(APD_MIN_VBIAS, model.recommend(metric, None));
    }

    #[rstest::rstest]
    #[case(BiasModel::WhiteNoise, 1022)]
    #[case(BiasModel::WhiteNoise, u32::MAX)]
    #[case(BiasModel::PulseAmplitude, 232)]
    fn metric_past_the_domain_returns_the_floor(#[case] model: BiasModel, #[case] metric: u32) {
        assert_eq!(APD_MIN_VBIAS, model.recommend(metric, None));
    }

    #[test]
    fn curves_stay_within_the_supply_range() {
        for &v in WHITE_NOISE_CURVE.iter().chain(PULSE_AMPLITUDE_CURVE) {
            assert!((APD_MIN_VBIAS..=APD_MAX_VBIAS).contains(&v));
        }
    }

    #[test]
    fn temperature_compensation_at_the_reference_point() {
        // 0.8628 * (250 + 1.1590 * (2157 - 13.8044 * (42.9835 - 0.1563)))
        // = 1781.47, rounded.
        assert_eq!(1781, BiasModel::WhiteNoise.recommend(0, Some(250)));
    }

    #[test]
    fn temperature_is_clamped_before_compensation() {
        let model = BiasModel::WhiteNoise;
        assert_eq!(
            model.recommend(0, Some(TEMP_MAX)),
            model.recommend(0, Some(i32::MAX))
        );
        assert_eq!(
            model.recommend(0, Some(TEMP_MIN)),
            model.recommend(0, Some(i32::MIN))
        );
    }

    #[test]
    fn compensated_output_is_clamped_to_the_supply_range() {
        // A hot APD over a saturated curve entry lands below the floor.
        assert_eq!(
            APD_MIN_VBIAS,
            BiasModel::WhiteNoise.recommend(1000, Some(TEMP_MIN))
        );
        assert_eq!(
            APD_MAX_VBIAS,
            BiasModel::WhiteNoise.recommend(0, Some(TEMP_MAX))
        );
    }
}
