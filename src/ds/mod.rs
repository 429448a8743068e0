pub mod frequency_list;
mod slot_arena;

pub use frequency_list::{FrequencyList, FrequencyListIdIter, FrequencyListIter};
pub use slot_arena::SlotId;
