use std::{fs, path::Path};

use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};

use super::{
    KpkTable,
    geometry::{black_in_check, conflict, in_pawn_zone, white_in_check},
    index::TableIndex,
};
use crate::prelude::*;

/// The four totals a KPK table is judged by.
/// Default values are half of Steven J. Edwards' 1996 figures, since only pawns on
/// files A to D are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCounts {
    /// Positions where white may legally be to move
    pub legal_white_to_move: u32,
    /// Positions where black may legally be to move
    pub legal_black_to_move: u32,
    pub white_to_move_wins: u32,
    pub black_to_move_losses: u32,
}

impl Default for ReferenceCounts {
    fn default() -> Self {
        Self::EDWARDS
    }
}

impl ReferenceCounts {
    pub const EDWARDS: Self = Self {
        legal_white_to_move: 163_328 / 2,
        legal_black_to_move: 168_024 / 2,
        white_to_move_wins: 124_960 / 2,
        black_to_move_losses: 97_604 / 2,
    };

    /// Save to TOML File
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> miette::Result<()> {
        let toml_string = toml::to_string_pretty(self).into_diagnostic()?;
        fs::write(path, toml_string).into_diagnostic()?;
        Ok(())
    }

    /// Load from a TOML File
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> miette::Result<Self> {
        let path = path.as_ref();
        let file_content = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("Reading reference counts from {}", path.display()))?;
        let counts: Self = toml::from_str(&file_content)
            .into_diagnostic()
            .with_context(|| format!("Parsing reference counts in {}", path.display()))?;
        Ok(counts)
    }
}

/// Counters recomputed from a built table, plus build diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub counts: ReferenceCounts,
    pub passes: usize,
    pub byte_size: usize,
}

impl TableStats {
    /// Walks every legal placement with the pawn on ranks 2 to 7.
    pub fn collect(table: &KpkTable) -> Self {
        let mut counts = ReferenceCounts {
            legal_white_to_move: 0,
            legal_black_to_move: 0,
            white_to_move_wins: 0,
            black_to_move_losses: 0,
        };

        for ix in TableIndex::all() {
            let white_king = ix.white_king();
            let white_pawn = ix.white_pawn();
            if !in_pawn_zone(white_pawn) {
                continue;
            }
            let won = table.entry(Side::White, ix);
            let lost = table.entry(Side::Black, ix);

            for black_king in Square::all() {
                if conflict(white_king, white_pawn, black_king) {
                    continue;
                }
                if !black_in_check(white_king, white_pawn, black_king) {
                    counts.legal_white_to_move += 1;
                    counts.white_to_move_wins += won.contains_square(black_king.index()) as u32;
                }
                if !white_in_check(white_king, white_pawn, black_king) {
                    counts.legal_black_to_move += 1;
                    counts.black_to_move_losses += lost.contains_square(black_king.index()) as u32;
                }
            }
        }

        Self {
            counts,
            passes: table.passes(),
            byte_size: table.byte_size(),
        }
    }

    /// True if every counter equals the reference. Mismatches are logged.
    pub fn matches(&self, reference: &ReferenceCounts) -> bool {
        let pairs = [
            ("legal white to move", self.counts.legal_white_to_move, reference.legal_white_to_move),
            ("legal black to move", self.counts.legal_black_to_move, reference.legal_black_to_move),
            ("white to move wins", self.counts.white_to_move_wins, reference.white_to_move_wins),
            ("black to move losses", self.counts.black_to_move_losses, reference.black_to_move_losses),
        ];

        let mut ok = true;
        for (name, got, expected) in pairs {
            if got != expected {
                warn!("{name}: counted {got}, expected {expected}");
                ok = false;
            }
        }
        ok
    }

    /// Save to TOML File
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> miette::Result<()> {
        let toml_string = toml::to_string_pretty(self).into_diagnostic()?;
        fs::write(path, toml_string).into_diagnostic()?;
        Ok(())
    }
}

impl Display for TableStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "passes:               {}", self.passes)?;
        writeln!(f, "table size:           {} bytes", self.byte_size)?;
        writeln!(f, "legal white to move:  {}", self.counts.legal_white_to_move)?;
        writeln!(f, "legal black to move:  {}", self.counts.legal_black_to_move)?;
        writeln!(f, "white to move wins:   {}", self.counts.white_to_move_wins)?;
        write!(f, "black to move losses: {}", self.counts.black_to_move_losses)
    }
}
