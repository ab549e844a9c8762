pub use crate::board::{
    self,
    components::{BitBoard, BitBoardIterator, Side, Square},
};
pub use crate::consts::*;
pub use crate::kpk::{
    KPK_TABLE, KpkTable, Outcome, generate, probe, probe_checked, self_check,
    stats::{ReferenceCounts, TableStats},
};
pub use crate::utils::{self, log::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
