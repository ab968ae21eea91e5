//! Initial point allocation

use serde::Deserialize;

use crate::error::SelectionError;
use crate::property::LifeState;

/// Points proposed for the four allocatable traits; SPR keeps its initial value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PropertyAllocation {
    #[serde(default, rename = "CHR")]
    pub chr: i32,
    #[serde(default, rename = "INT")]
    pub int: i32,
    #[serde(default, rename = "STR")]
    pub str_: i32,
    #[serde(default, rename = "MNY")]
    pub mny: i32,
}

impl PropertyAllocation {
    pub fn new(chr: i32, int: i32, str_: i32, mny: i32) -> Self {
        Self { chr, int, str_, mny }
    }

    pub fn values(&self) -> [i32; 4] {
        [self.chr, self.int, self.str_, self.mny]
    }

    /// Valid iff every value is within `[0, max]` and the sum spends exactly the
    /// available points. A negative total is treated as zero.
    pub fn validate(&self, total: i32, max: i32) -> Result<(), SelectionError> {
        let values = self.values();
        let expected = total.max(0);
        let in_range = values.iter().all(|v| (0..=max).contains(v));
        if in_range && values.iter().sum::<i32>() == expected {
            Ok(())
        } else {
            Err(SelectionError::InvalidAllocation { expected, values })
        }
    }
}

impl LifeState {
    pub fn apply_allocation(&mut self, allocation: &PropertyAllocation) {
        self.chr += allocation.chr;
        self.int += allocation.int;
        self.str_ += allocation.str_;
        self.mny += allocation.mny;
    }
}
