//! The fixed set of fortunes a draw can land on.

use serde::Serialize;

use crate::api::types::Rgb;
use crate::systems::effects::Rng;

/// One possible result of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FortuneEntry {
    pub rank: &'static str,
    pub color: Rgb,
    pub message: &'static str,
}

/// Ordered best to worst.
pub const FORTUNES: [FortuneEntry; 6] = [
    FortuneEntry {
        rank: "大吉",
        color: Rgb::from_hex(0xffd700),
        message: "最高の運勢！すべてが上手くいく一日",
    },
    FortuneEntry {
        rank: "中吉",
        color: Rgb::from_hex(0xff8c42),
        message: "良いことが続きそう。積極的に動こう",
    },
    FortuneEntry {
        rank: "小吉",
        color: Rgb::from_hex(0x7bd389),
        message: "小さな幸せが見つかる予感",
    },
    FortuneEntry {
        rank: "吉",
        color: Rgb::from_hex(0x5bc0eb),
        message: "穏やかで安定した運気",
    },
    FortuneEntry {
        rank: "末吉",
        color: Rgb::from_hex(0xb39ddb),
        message: "後から運が開けてくる",
    },
    FortuneEntry {
        rank: "凶",
        color: Rgb::from_hex(0x8d99ae),
        message: "慎重に行動すれば大丈夫",
    },
];

/// Colours of the release burst.
pub const EXPLOSION_PALETTE: [Rgb; 5] = [
    Rgb::from_hex(0xffd700),
    Rgb::from_hex(0xff6b6b),
    Rgb::from_hex(0xffffff),
    Rgb::from_hex(0xff9ff3),
    Rgb::from_hex(0x48dbfb),
];

/// Colour of energy particles and concentration lines while charging.
pub const ENERGY_COLOR: Rgb = Rgb::from_hex(0xa0e9ff);

/// Read-only view over a fortune table with uniform selection.
#[derive(Debug, Clone, Copy)]
pub struct FortuneCatalog {
    entries: &'static [FortuneEntry],
}

impl FortuneCatalog {
    pub fn new(entries: &'static [FortuneEntry]) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static FortuneEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static FortuneEntry> {
        self.entries.iter()
    }

    /// Uniformly pick an index. `None` only for an empty table.
    pub fn pick(&self, rng: &mut Rng) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        Some(rng.next_int(self.entries.len() as u32) as usize)
    }
}

impl Default for FortuneCatalog {
    fn default() -> Self {
        Self::new(&FORTUNES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order() {
        let ranks: Vec<_> = FortuneCatalog::default().iter().map(|f| f.rank).collect();
        assert_eq!(ranks, vec!["大吉", "中吉", "小吉", "吉", "末吉", "凶"]);
    }

    #[test]
    fn pick_covers_every_entry() {
        let catalog = FortuneCatalog::default();
        let mut rng = Rng::new(1234);
        let mut hits = [0u32; 6];
        for _ in 0..6000 {
            let idx = catalog.pick(&mut rng).unwrap();
            hits[idx] += 1;
        }
        for (i, count) in hits.iter().enumerate() {
            assert!(*count > 700, "entry {} picked only {} times", i, count);
        }
    }

    #[test]
    fn empty_catalog_picks_nothing() {
        let catalog = FortuneCatalog::new(&[]);
        assert!(catalog.pick(&mut Rng::new(1)).is_none());
    }
}
