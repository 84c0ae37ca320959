use once_cell::sync::{Lazy};

///
/// The gamma table that leaves coverage values unchanged
///
static LINEAR_GAMMA: Lazy<GammaTable> = Lazy::new(|| GammaTable::new(1.0));

///
/// An 8 bit gamma correction look-up table for coverage values
///
#[derive(Clone)]
pub struct GammaTable {
    gamma:          f64,
    look_up_table:  [u8; 256],
}

impl Default for GammaTable {
    fn default() -> Self {
        GammaTable::linear()
    }
}

impl GammaTable {
    ///
    /// Creates a gamma look-up table for a gamma correction value
    ///
    pub fn new(gamma: f64) -> Self {
        let mut lut = [0u8; 256];

        // Entry i is round(255 * (i/255)^gamma)
        for idx in 0..256 {
            let t = (idx as f64) / 255.0;
            let t = t.powf(gamma);
            let t = (t * 255.0).round().max(0.0).min(255.0) as u8;

            lut[idx] = t;
        }

        GammaTable {
            gamma:          gamma,
            look_up_table:  lut,
        }
    }

    ///
    /// The table that maps every value to itself
    ///
    pub fn linear() -> Self {
        LINEAR_GAMMA.clone()
    }

    ///
    /// Returns the gamma correction value this table is using
    ///
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    #[inline]
    pub fn look_up(&self, val: u8) -> u8 {
        self.look_up_table[val as usize]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn linear_table_is_identity() {
        let table = GammaTable::linear();

        for idx in 0..=255u8 {
            assert!(table.look_up(idx) == idx, "{} maps to {}", idx, table.look_up(idx));
        }
    }

    #[test]
    fn gamma_keeps_end_points() {
        let table = GammaTable::new(2.2);

        assert!(table.look_up(0) == 0);
        assert!(table.look_up(255) == 255);
        assert!(table.look_up(128) < 128);
        assert!(table.gamma() == 2.2);
    }
}
