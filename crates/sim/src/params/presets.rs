//! Built-in parameter sets.

use super::{AdvParams, MainParams, ParamSet};

/// A named built-in parameter set.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// 1-based index, also used as the preset's `set_label`.
    pub index: u32,
    pub name: &'static str,
    pub summary: &'static str,
}

pub const PRESETS: [Preset; 6] = [
    Preset {
        index: 1,
        name: "default",
        summary: "Default parameters",
    },
    Preset {
        index: 2,
        name: "low-fitness-cost",
        summary: "Low fitness cost (xi = 0.3)",
    },
    Preset {
        index: 3,
        name: "high-fitness-cost",
        summary: "High fitness cost (xi = 0.7)",
    },
    Preset {
        index: 4,
        name: "many-release-sites",
        summary: "Many release sites (num_driver_sites = 10)",
    },
    Preset {
        index: 5,
        name: "low-dispersal",
        summary: "Low dispersal (disp_rate = 0.002)",
    },
    Preset {
        index: 6,
        name: "high-dispersal",
        summary: "High dispersal (disp_rate = 0.05)",
    },
];

impl Preset {
    /// Build the parameter set for this preset.
    pub fn params(&self) -> ParamSet {
        let mut main = MainParams {
            set_label: self.index,
            ..MainParams::default()
        };
        let mut advanced = AdvParams::default();

        match self.index {
            2 => main.xi = 0.3,
            3 => main.xi = 0.7,
            4 => main.num_driver_sites = 10,
            5 => advanced.disp_rate = 0.002,
            6 => advanced.disp_rate = 0.05,
            _ => {}
        }

        ParamSet { main, advanced }
    }
}

/// Find a preset by 1-based index or by name.
pub fn find(key: &str) -> Option<&'static Preset> {
    let key = key.trim();
    match key.parse::<u32>() {
        Ok(index) => PRESETS.iter().find(|p| p.index == index),
        Err(_) => PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_carry_their_label() {
        for preset in &PRESETS {
            assert_eq!(preset.params().main.set_label, preset.index);
        }
    }

    #[test]
    fn test_presets_differ_from_default() {
        let base = PRESETS[0].params();
        assert_eq!(PRESETS[1].params().main.xi, 0.3);
        assert_eq!(PRESETS[2].params().main.xi, 0.7);
        assert_eq!(PRESETS[3].params().main.num_driver_sites, 10);
        assert_eq!(PRESETS[4].params().advanced.disp_rate, 0.002);
        assert_eq!(PRESETS[5].params().advanced.disp_rate, 0.05);
        assert_eq!(PRESETS[5].params().advanced.mu_a, base.advanced.mu_a);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("3").map(|p| p.name), Some("high-fitness-cost"));
        assert_eq!(find("Low-Dispersal").map(|p| p.index), Some(5));
        assert!(find("7").is_none());
        assert!(find("unknown").is_none());
    }
}
